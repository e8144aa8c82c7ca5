//! Provides [`VoteExtender`], which turns abstentions into votes
//! when the nearest precedent is close enough.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    checker,
    ExtensionReport,
    LabelMatrix,
    LfNeighbors,
    Neighbors,
    Polarity,
    Result,
    Vote,
    label_matrix::LfColumn,
};


/// One threshold per LF.
/// An abstention is extended only if the winning similarity
/// is strictly greater than the LF's threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thresholds(Vec<f64>);


impl Thresholds {
    /// Construct `Thresholds` from one value per LF.
    pub fn new(thresholds: Vec<f64>) -> Self {
        Self(thresholds)
    }


    /// The same threshold for each of the `n_lf` LFs.
    pub fn uniform(threshold: f64, n_lf: usize) -> Self {
        Self(vec![threshold; n_lf])
    }


    /// Returns the number of thresholds.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns `true` if there is no threshold.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Returns the thresholds as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0[..]
    }
}


impl From<Vec<f64>> for Thresholds {
    fn from(thresholds: Vec<f64>) -> Self {
        Self(thresholds)
    }
}


impl From<&[f64]> for Thresholds {
    fn from(thresholds: &[f64]) -> Self {
        Self(thresholds.to_vec())
    }
}


impl<const N: usize> From<[f64; N]> for Thresholds {
    fn from(thresholds: [f64; N]) -> Self {
        Self(thresholds.to_vec())
    }
}


/// The reusable settings of [`VoteExtender`].
///
/// ```
/// use epoxy::prelude::*;
///
/// let config = ExtensionConfig::new(vec![0.5, 0.8]);
/// assert!(config.parallel);
/// assert!(!config.verbose);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// One threshold per LF.
    pub thresholds: Thresholds,
    /// Process the LFs with rayon.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Print an [`ExtensionReport`] after each extension.
    #[serde(default)]
    pub verbose: bool,
}


impl ExtensionConfig {
    /// Construct a config with the given thresholds,
    /// parallel and quiet.
    pub fn new<T: Into<Thresholds>>(thresholds: T) -> Self {
        Self {
            thresholds: thresholds.into(),
            parallel: default_parallel(),
            verbose: false,
        }
    }
}


fn default_parallel() -> bool {
    true
}


/// Decide what a single abstention becomes.
///
/// Returns `Some(Polarity::Positive)` iff the closest positive precedent
/// is strictly closer than the closest negative one and
/// strictly above `threshold`; symmetrically for `Negative`.
/// Ties and similarities equal to the threshold stay abstentions.
/// A missing precedent (`None`) never wins.
///
/// ```
/// use epoxy::prelude::*;
///
/// assert_eq!(decide(Some(0.9), Some(0.2), 0.5), Some(Polarity::Positive));
/// assert_eq!(decide(Some(0.2), Some(0.9), 0.5), Some(Polarity::Negative));
/// assert_eq!(decide(Some(0.7), Some(0.7), 0.5), None);
/// assert_eq!(decide(Some(0.5), None, 0.5), None);
/// assert_eq!(decide(None, None, -10.0), None);
/// ```
#[inline]
pub fn decide(pos: Option<f64>, neg: Option<f64>, threshold: f64)
    -> Option<Polarity>
{
    match (pos, neg) {
        (Some(p), Some(n)) if p > n && p > threshold
            => Some(Polarity::Positive),
        (Some(p), Some(n)) if n > p && n > threshold
            => Some(Polarity::Negative),
        (Some(p), None) if p > threshold
            => Some(Polarity::Positive),
        (None, Some(n)) if n > threshold
            => Some(Polarity::Negative),
        _ => None,
    }
}


/// Extends the abstentions of a target matrix
/// with the precedents found by [`NeighborFinder`].
///
/// Since `VoteExtender` only borrows the [`Neighbors`],
/// the same search can be extended with many thresholds.
///
/// [`NeighborFinder`]: crate::NeighborFinder
///
/// # Example
/// ```
/// use epoxy::prelude::*;
///
/// let train = LabelMatrix::from_rows(&[
///     vec![ 1, -1],
///     vec![ 1,  0],
///     vec![-1,  1],
/// ]).unwrap();
/// let target = LabelMatrix::from_rows(&[vec![0, 0]]).unwrap();
/// let sim = SimilarityMatrix::from_rows(&[vec![0.9, 0.1, 0.2]]).unwrap();
///
/// let neighbors = find_neighbors(&train, &target, &sim).unwrap();
///
/// let extended = VoteExtender::init(&neighbors)
///     .thresholds([0.5, 0.5])
///     .extend(&target)
///     .unwrap();
/// assert_eq!(extended.to_rows(), vec![vec![1, -1]]);
///
/// let unchanged = VoteExtender::init(&neighbors)
///     .thresholds([0.95, 0.95])
///     .extend(&target)
///     .unwrap();
/// assert_eq!(unchanged.to_rows(), vec![vec![0, 0]]);
/// ```
pub struct VoteExtender<'a> {
    // Output of the neighbor search on the target matrix.
    neighbors: &'a Neighbors,

    // One threshold per LF.
    thresholds: Thresholds,

    // Process the LFs with rayon.
    parallel: bool,

    // Print a report after each extension.
    verbose: bool,
}


impl<'a> VoteExtender<'a> {
    /// Initialize the `VoteExtender`.
    /// The thresholds must be set before calling `extend`
    /// unless the target has no LF.
    pub fn init(neighbors: &'a Neighbors) -> Self {
        Self {
            neighbors,
            thresholds: Thresholds::default(),
            parallel: default_parallel(),
            verbose: false,
        }
    }


    /// Set the per-LF thresholds.
    pub fn thresholds<T: Into<Thresholds>>(mut self, thresholds: T) -> Self {
        self.thresholds = thresholds.into();
        self
    }


    /// Process the LFs in parallel (`true`) or one by one (`false`).
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Print an [`ExtensionReport`] after each extension.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Apply all the settings in `config`.
    pub fn with_config(self, config: &ExtensionConfig) -> Self {
        self.thresholds(config.thresholds.clone())
            .parallel(config.parallel)
            .verbose(config.verbose)
    }


    /// Returns an extended copy of `target`.
    /// `target` must be the matrix the neighbors were computed on.
    pub fn extend(&self, target: &LabelMatrix) -> Result<LabelMatrix> {
        let extended = self.extend_quietly(target)?;

        if self.verbose {
            ExtensionReport::compare(target, &extended)?.print();
        }
        Ok(extended)
    }


    /// Same as `extend`, but also returns the coverage report.
    pub fn extend_with_report(&self, target: &LabelMatrix)
        -> Result<(LabelMatrix, ExtensionReport)>
    {
        let extended = self.extend_quietly(target)?;
        let report = ExtensionReport::compare(target, &extended)?;

        if self.verbose {
            report.print();
        }
        Ok((extended, report))
    }


    fn extend_quietly(&self, target: &LabelMatrix) -> Result<LabelMatrix> {
        checker::thresholds(self.thresholds.as_slice(), target.n_lf())?;
        checker::neighbors_fit_target(self.neighbors, target)?;

        let mut extended = target.clone();
        let thresholds = self.thresholds.as_slice();
        let lfs = self.neighbors.columns();

        if self.parallel {
            extended.columns.par_iter_mut()
                .zip(lfs)
                .zip(thresholds)
                .for_each(|((col, lf), &t)| extend_column(col, lf, t));
        } else {
            extended.columns.iter_mut()
                .zip(lfs)
                .zip(thresholds)
                .for_each(|((col, lf), &t)| extend_column(col, lf, t));
        }

        Ok(extended)
    }
}


/// Shorthand for
/// `VoteExtender::init(neighbors).thresholds(thresholds).extend(target)`.
pub fn extend(
    target: &LabelMatrix,
    neighbors: &Neighbors,
    thresholds: &[f64],
) -> Result<LabelMatrix>
{
    VoteExtender::init(neighbors)
        .thresholds(thresholds)
        .extend(target)
}


/// Overwrite the abstentions of one column that `decide` extends.
#[inline]
fn extend_column(col: &mut LfColumn, lf: &LfNeighbors, threshold: f64) {
    for (row, pos, neg) in lf.iter() {
        if let Some(polarity) = decide(pos, neg, threshold) {
            col.votes[row] = Vote::from(polarity);
        }
    }
}
