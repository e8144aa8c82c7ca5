//! Provides [`NeighborFinder`], the nearest same-LF vote search.
//!
//! For every labeling function the training items are split
//! into the ones it votes `+1` on and the ones it votes `-1` on.
//! Then, for each item of the target matrix the LF abstains on,
//! the largest similarity to either group is recorded.
use fixedbitset::FixedBitSet;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    checker,
    EpoxyError,
    LabelMatrix,
    Polarity,
    Result,
    SimilarityMatrix,
};


/// Numeric stand-in for a missing neighbor,
/// used by [`LfNeighbors::closest_positive_or_sentinel`] and
/// [`LfNeighbors::closest_negative_or_sentinel`].
/// Only meaningful when the similarity scores are non-negative.
pub const NO_NEIGHBOR_SENTINEL: f64 = -1.0;


/// The nearest positive/negative precedents of a single LF.
///
/// The three vectors are aligned by position:
/// `closest_positive[k]` is the largest similarity from
/// target row `abstains[k]` to a training item the LF votes `+1` on.
/// `None` means the LF never votes that way on the training items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LfNeighbors {
    /// Target rows the LF abstains on, in ascending order.
    pub abstains: Vec<usize>,
    /// Closest positive-voted training item for each abstention.
    pub closest_positive: Vec<Option<f64>>,
    /// Closest negative-voted training item for each abstention.
    pub closest_negative: Vec<Option<f64>>,
}


impl LfNeighbors {
    /// Returns the number of abstentions.
    pub fn len(&self) -> usize {
        self.abstains.len()
    }


    /// Returns `true` if the LF does not abstain on any target item.
    pub fn is_empty(&self) -> bool {
        self.abstains.is_empty()
    }


    /// Iterates over `(row, closest positive, closest negative)`.
    pub fn iter(&self)
        -> impl Iterator<Item = (usize, Option<f64>, Option<f64>)> + '_
    {
        self.abstains.iter()
            .zip(&self.closest_positive)
            .zip(&self.closest_negative)
            .map(|((&row, &pos), &neg)| (row, pos, neg))
    }


    /// `closest_positive` with missing neighbors
    /// replaced by [`NO_NEIGHBOR_SENTINEL`].
    pub fn closest_positive_or_sentinel(&self) -> Vec<f64> {
        or_sentinel(&self.closest_positive)
    }


    /// `closest_negative` with missing neighbors
    /// replaced by [`NO_NEIGHBOR_SENTINEL`].
    pub fn closest_negative_or_sentinel(&self) -> Vec<f64> {
        or_sentinel(&self.closest_negative)
    }
}


/// The output of [`NeighborFinder`], one [`LfNeighbors`] per LF.
/// This struct does not borrow the inputs,
/// so it can be reused to extend the target with many thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbors {
    columns: Vec<LfNeighbors>,
    n_target: usize,
}


impl Neighbors {
    /// Assemble `Neighbors` from per-LF vectors
    /// `(abstain indices, closest positive, closest negative)`
    /// computed elsewhere.
    /// The three outer vectors must have one entry per LF and
    /// the inner vectors of the same LF must have the same length.
    pub fn from_parts(
        abstains: Vec<Vec<usize>>,
        closest_positive: Vec<Vec<Option<f64>>>,
        closest_negative: Vec<Vec<Option<f64>>>,
        n_target: usize,
    ) -> Result<Self>
    {
        let n_lf = abstains.len();
        for n in [closest_positive.len(), closest_negative.len()] {
            if n != n_lf {
                return Err(EpoxyError::NeighborCountMismatch {
                    expected: n_lf,
                    actual: n,
                });
            }
        }

        let columns = abstains.into_iter()
            .zip(closest_positive)
            .zip(closest_negative)
            .enumerate()
            .map(|(column, ((abstains, closest_positive), closest_negative))| {
                let n = abstains.len();
                if closest_positive.len() != n || closest_negative.len() != n {
                    return Err(EpoxyError::MisalignedNeighbors {
                        column,
                        abstains: n,
                        positive: closest_positive.len(),
                        negative: closest_negative.len(),
                    });
                }
                Ok(LfNeighbors { abstains, closest_positive, closest_negative, })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, n_target, })
    }


    /// Returns the number of LFs.
    pub fn n_lf(&self) -> usize {
        self.columns.len()
    }


    /// Returns the number of rows of the target matrix.
    pub fn n_target(&self) -> usize {
        self.n_target
    }


    /// Returns the neighbors of the `col`-th LF.
    ///
    /// # Panics
    /// Panics if `col >= self.n_lf()`.
    pub fn column(&self, col: usize) -> &LfNeighbors {
        &self.columns[col]
    }


    pub(crate) fn columns(&self) -> &[LfNeighbors] {
        &self.columns[..]
    }


    /// Iterates over the LFs.
    pub fn iter(&self) -> std::slice::Iter<'_, LfNeighbors> {
        self.columns.iter()
    }


    /// Decompose `self` into
    /// `(abstain indices, closest positive, closest negative)`,
    /// one vector per LF.
    #[allow(clippy::type_complexity)]
    pub fn decompose(self)
        -> (Vec<Vec<usize>>, Vec<Vec<Option<f64>>>, Vec<Vec<Option<f64>>>)
    {
        let n_lf = self.columns.len();
        let mut abstains = Vec::with_capacity(n_lf);
        let mut positive = Vec::with_capacity(n_lf);
        let mut negative = Vec::with_capacity(n_lf);
        for lf in self.columns {
            abstains.push(lf.abstains);
            positive.push(lf.closest_positive);
            negative.push(lf.closest_negative);
        }
        (abstains, positive, negative)
    }
}


impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a LfNeighbors;
    type IntoIter = std::slice::Iter<'a, LfNeighbors>;
    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}


/// Finds, for every abstention of the target matrix,
/// the most similar training items on which the same LF
/// votes `+1` and `-1`.
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
/// let neighbors = NeighborFinder::init(&train, &target, &sim)
///     .parallel(false)
///     .find()
///     .unwrap();
///
/// let lf = neighbors.column(0);
/// assert_eq!(lf.abstains, vec![0]);
/// assert_eq!(lf.closest_positive, vec![Some(0.9)]);
/// assert_eq!(lf.closest_negative, vec![Some(0.2)]);
/// ```
pub struct NeighborFinder<'a> {
    // Votes on the training items.
    train: &'a LabelMatrix,

    // Votes to be extended.
    target: &'a LabelMatrix,

    // Similarities from `target` rows to `train` rows.
    similarity: &'a SimilarityMatrix,

    // Process the LFs with rayon.
    parallel: bool,
}


impl<'a> NeighborFinder<'a> {
    /// Initialize the `NeighborFinder`.
    /// By default, the LFs are processed in parallel.
    pub fn init(
        train: &'a LabelMatrix,
        target: &'a LabelMatrix,
        similarity: &'a SimilarityMatrix,
    ) -> Self
    {
        Self { train, target, similarity, parallel: true, }
    }


    /// Process the LFs in parallel (`true`) or one by one (`false`).
    /// The result does not depend on this flag.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Run the search.
    /// Fails before doing any work if the shapes of the inputs disagree.
    pub fn find(&self) -> Result<Neighbors> {
        checker::lf_count(self.train, self.target)?;
        checker::similarity_shape(self.train, self.target, self.similarity)?;

        let n_lf = self.target.n_lf();
        let columns = if self.parallel {
            (0..n_lf).into_par_iter()
                .map(|col| self.neighbors_of(col))
                .collect::<Vec<_>>()
        } else {
            (0..n_lf).map(|col| self.neighbors_of(col))
                .collect::<Vec<_>>()
        };

        Ok(Neighbors { columns, n_target: self.target.n_item(), })
    }


    /// Nearest precedents for the `col`-th LF.
    fn neighbors_of(&self, col: usize) -> LfNeighbors {
        let pos_support = self.train.support(col, Polarity::Positive);
        let neg_support = self.train.support(col, Polarity::Negative);

        let abstains = self.target.abstains(col);

        let closest_positive = self.closest(&abstains, &pos_support);
        let closest_negative = self.closest(&abstains, &neg_support);

        LfNeighbors { abstains, closest_positive, closest_negative, }
    }


    /// Max similarity from each row in `rows` to `support`.
    /// An empty support yields `None` for every row.
    #[inline]
    fn closest(&self, rows: &[usize], support: &FixedBitSet)
        -> Vec<Option<f64>>
    {
        rows.iter()
            .map(|&row| self.similarity.max_over(row, support.ones()))
            .collect()
    }
}


/// Shorthand for
/// `NeighborFinder::init(train, target, similarity).find()`.
pub fn find_neighbors(
    train: &LabelMatrix,
    target: &LabelMatrix,
    similarity: &SimilarityMatrix,
) -> Result<Neighbors>
{
    NeighborFinder::init(train, target, similarity).find()
}


fn or_sentinel(values: &[Option<f64>]) -> Vec<f64> {
    values.iter()
        .map(|v| v.unwrap_or(NO_NEIGHBOR_SENTINEL))
        .collect()
}
