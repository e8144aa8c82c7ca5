//! Errors raised when the inputs violate the shape contract.
use polars::prelude::PolarsError;
use thiserror::Error;


/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, EpoxyError>;


/// Contract violations detected before any extension work starts.
/// Degenerate inputs (an LF that never votes one way,
/// an LF without abstentions) are not errors.
#[derive(Debug, Error)]
pub enum EpoxyError {
    /// The training and target matrices disagree on the number of LFs.
    #[error(
        "number of labeling functions differs: \
         train has {train} columns, target has {target} columns"
    )]
    LfCountMismatch {
        /// Number of LFs (columns) in the training matrix.
        train: usize,
        /// Number of LFs (columns) in the target matrix.
        target: usize,
    },

    /// The similarity matrix is not `(target rows, train rows)`.
    #[error(
        "similarity matrix has shape {actual:?}, \
         expected (target rows, train rows) = {expected:?}"
    )]
    SimilarityShapeMismatch {
        /// `(n_target, n_train)`.
        expected: (usize, usize),
        /// Shape of the given similarity matrix.
        actual: (usize, usize),
    },

    /// Two vote matrices that should share a shape do not.
    #[error("vote matrix has shape {actual:?}, expected {expected:?}")]
    MatrixShapeMismatch {
        /// Shape of the reference matrix.
        expected: (usize, usize),
        /// Shape of the other matrix.
        actual: (usize, usize),
    },

    /// The threshold vector does not hold one entry per LF.
    #[error(
        "got {actual} thresholds for {expected} labeling functions"
    )]
    ThresholdCountMismatch {
        /// Number of LFs.
        expected: usize,
        /// Number of thresholds.
        actual: usize,
    },

    /// A cell of a vote matrix is not in `{-1, 0, 1}`.
    #[error(
        "invalid vote {value} at (row {row}, column {column}), \
         expected one of -1, 0, 1"
    )]
    InvalidVote {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// The value found there.
        value: f64,
    },

    /// A row has a different length than the first one.
    #[error("row {row} has {actual} entries, expected {expected}")]
    RaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// A column has a different length than the first one.
    #[error("column {column} has {actual} entries, expected {expected}")]
    RaggedColumns {
        /// Index of the offending column.
        column: usize,
        /// Length of the first column.
        expected: usize,
        /// Length of the offending column.
        actual: usize,
    },

    /// A flat buffer cannot be reshaped into the requested shape.
    #[error("cannot reshape a buffer of length {actual} into {shape:?}")]
    BufferLength {
        /// Requested `(rows, columns)`.
        shape: (usize, usize),
        /// Length of the buffer.
        actual: usize,
    },

    /// A similarity score is NaN (or missing in a DataFrame).
    #[error("similarity at (row {row}, column {column}) is not a number")]
    NonFiniteSimilarity {
        /// Target row.
        row: usize,
        /// Training column.
        column: usize,
    },

    /// A threshold is NaN.
    #[error("threshold for labeling function {column} is not a number")]
    NonFiniteThreshold {
        /// LF index.
        column: usize,
    },

    /// A DataFrame column of votes does not hold numbers.
    #[error("votes of labeling function {column} have non-numeric dtype {dtype}")]
    NonNumericVotes {
        /// LF index.
        column: usize,
        /// Name of the offending dtype.
        dtype: String,
    },

    /// The neighbors were computed on a target with another number of rows.
    #[error("neighbors cover {actual} target rows, expected {expected}")]
    TargetRowMismatch {
        /// Number of rows of the target matrix.
        expected: usize,
        /// Number of target rows the neighbors were computed on.
        actual: usize,
    },

    /// The neighbors do not cover the expected number of LFs.
    #[error(
        "neighbors cover {actual} labeling functions, expected {expected}"
    )]
    NeighborCountMismatch {
        /// Number of LFs of the target matrix
        /// (or of the abstain indices).
        expected: usize,
        /// Number of LFs covered by the neighbors.
        actual: usize,
    },

    /// The per-LF neighbor vectors are not aligned.
    #[error(
        "neighbors for labeling function {column} are misaligned: \
         {abstains} abstentions, {positive} positive and \
         {negative} negative similarities"
    )]
    MisalignedNeighbors {
        /// LF index.
        column: usize,
        /// Number of abstain indices.
        abstains: usize,
        /// Number of closest-positive values.
        positive: usize,
        /// Number of closest-negative values.
        negative: usize,
    },

    /// The neighbors were computed on a different target matrix.
    #[error(
        "neighbors for labeling function {column} disagree with \
         the abstentions of the target matrix at row {row}"
    )]
    StaleNeighbors {
        /// LF index.
        column: usize,
        /// First row recorded on one side but not on the other.
        row: usize,
    },

    /// Conversion from/to a `polars::DataFrame` failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
