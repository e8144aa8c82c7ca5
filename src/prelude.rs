//! Exports the standard types and functions of this crate.
//! 
pub use crate::{
    // Errors
    EpoxyError,


    // Votes and matrices ------------------------
    Vote,
    Polarity,
    LabelMatrix,
    SimilarityMatrix,


    // Neighbor search ---------------------------
    NeighborFinder,
    Neighbors,
    LfNeighbors,
    find_neighbors,


    // Extension ---------------------------------
    VoteExtender,
    ExtensionConfig,
    Thresholds,
    decide,
    extend,


    // Report ------------------------------------
    ExtensionReport,
    LfReport,
};
