//! Precondition checks shared by the neighbor search and the extension.
//! Each returns the matching `EpoxyError` instead of panicking.
use crate::{
    EpoxyError,
    LabelMatrix,
    Neighbors,
    Result,
    SimilarityMatrix,
};


/// Check whether the two vote matrices share the same LFs.
#[inline(always)]
pub(crate) fn lf_count(train: &LabelMatrix, target: &LabelMatrix)
    -> Result<()>
{
    let (train, target) = (train.n_lf(), target.n_lf());
    if train != target {
        return Err(EpoxyError::LfCountMismatch { train, target, });
    }
    Ok(())
}


/// Check whether the similarity matrix is `(target rows, train rows)`.
#[inline(always)]
pub(crate) fn similarity_shape(
    train: &LabelMatrix,
    target: &LabelMatrix,
    similarity: &SimilarityMatrix,
) -> Result<()>
{
    let expected = (target.n_item(), train.n_item());
    let actual = similarity.shape();
    if expected != actual {
        return Err(EpoxyError::SimilarityShapeMismatch { expected, actual, });
    }
    Ok(())
}


/// Check whether there is exactly one threshold per LF
/// and that none of them is NaN.
#[inline(always)]
pub(crate) fn thresholds(thresholds: &[f64], n_lf: usize) -> Result<()> {
    if thresholds.len() != n_lf {
        return Err(EpoxyError::ThresholdCountMismatch {
            expected: n_lf,
            actual: thresholds.len(),
        });
    }
    match thresholds.iter().position(|t| t.is_nan()) {
        Some(column) => Err(EpoxyError::NonFiniteThreshold { column }),
        None => Ok(()),
    }
}


/// Check whether `neighbors` was computed on `target`:
/// same number of rows and LFs, and the recorded rows are
/// exactly the abstentions of each LF.
pub(crate) fn neighbors_fit_target(
    neighbors: &Neighbors,
    target: &LabelMatrix,
) -> Result<()>
{
    if neighbors.n_lf() != target.n_lf() {
        return Err(EpoxyError::NeighborCountMismatch {
            expected: target.n_lf(),
            actual: neighbors.n_lf(),
        });
    }

    if neighbors.n_target() != target.n_item() {
        return Err(EpoxyError::TargetRowMismatch {
            expected: target.n_item(),
            actual: neighbors.n_target(),
        });
    }

    for (column, lf) in neighbors.iter().enumerate() {
        let abstains = target.abstains(column);
        if lf.abstains != abstains {
            let row = first_difference(&lf.abstains, &abstains);
            return Err(EpoxyError::StaleNeighbors { column, row, });
        }
    }
    Ok(())
}


/// First row on which two distinct sorted row lists disagree.
fn first_difference(recorded: &[usize], actual: &[usize]) -> usize {
    recorded.iter()
        .zip(actual)
        .find(|(r, a)| r != a)
        .map(|(&r, &a)| r.min(a))
        .or_else(|| {
            let n = recorded.len().min(actual.len());
            recorded.get(n).or(actual.get(n)).copied()
        })
        .unwrap_or_default()
}
