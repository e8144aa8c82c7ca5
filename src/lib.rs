#![warn(missing_docs)]

//! 
//! A crate that extends the labeling functions (LFs) of
//! a weak-supervision pipeline with nearest-neighbor votes.
//! 
//! Given the votes of the LFs on a training set,
//! the votes of the same LFs on a target set, and
//! the similarity from every target item to every training item,
//! each abstention on the target set is replaced by the vote
//! of its nearest training precedent when that precedent is
//! close enough.
//! 
//! The extension takes two steps.
//! 
//! - Neighbor search ([`NeighborFinder`])
//!     For each LF and each target item the LF abstains on,
//!     finds the largest similarity to a training item
//!     the LF votes `+1` on, and to one it votes `-1` on.
//! 
//! 
//! - Extension ([`VoteExtender`])
//!     Turns an abstention into `+1` (resp. `-1`) if
//!     the closest positive (resp. negative) precedent is
//!     strictly closer than the other polarity and
//!     strictly above the LF's threshold.
//! 
//! The neighbor search does not depend on the thresholds,
//! so one search can be extended with many threshold vectors.
//! 
//! ```
//! use epoxy::prelude::*;
//! 
//! let train = LabelMatrix::from_rows(&[
//!     vec![ 1, -1],
//!     vec![ 1,  0],
//!     vec![-1,  1],
//! ]).unwrap();
//! let target = LabelMatrix::from_rows(&[vec![0, 0]]).unwrap();
//! let sim = SimilarityMatrix::from_rows(&[vec![0.9, 0.1, 0.2]]).unwrap();
//! 
//! let neighbors = NeighborFinder::init(&train, &target, &sim)
//!     .find()
//!     .unwrap();
//! let extended = VoteExtender::init(&neighbors)
//!     .thresholds([0.5, 0.5])
//!     .extend(&target)
//!     .unwrap();
//! 
//! assert_eq!(extended.to_rows(), vec![vec![1, -1]]);
//! ```

pub mod error;
pub mod vote;
pub mod label_matrix;
pub mod similarity;
pub mod neighbor;
pub mod extender;
pub mod report;
pub mod prelude;

// Shape checks shared by the two steps.
pub(crate) mod checker;


pub use error::{EpoxyError, Result};
pub use vote::{Vote, Polarity};
pub use label_matrix::{LabelMatrix, LfColumn};
pub use similarity::SimilarityMatrix;

pub use neighbor::{
    NeighborFinder,
    Neighbors,
    LfNeighbors,
    find_neighbors,
    NO_NEIGHBOR_SENTINEL,
};

pub use extender::{
    VoteExtender,
    ExtensionConfig,
    Thresholds,
    decide,
    extend,
};

pub use report::{ExtensionReport, LfReport};
