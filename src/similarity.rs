//! Struct `SimilarityMatrix` holds the similarity scores
//! from the target items to the training items.
use polars::prelude::*;

use std::ops::Index;

use crate::{EpoxyError, Result};


/// Dense row-major matrix of similarity scores.
/// Entry `(i, j)` is the similarity between target item `i` and
/// training item `j`; higher means more similar.
///
/// The scores may take any sign. NaN is rejected on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    data: Vec<f64>,
    n_target: usize,
    n_train: usize,
}


impl SimilarityMatrix {
    /// Construct a `SimilarityMatrix` from a flat row-major buffer.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>)
        -> Result<Self>
    {
        let (n_target, n_train) = shape;
        if data.len() != n_target * n_train {
            return Err(EpoxyError::BufferLength {
                shape,
                actual: data.len(),
            });
        }
        check_not_nan(&data, n_train)?;

        Ok(Self { data, n_target, n_train, })
    }


    /// Construct a `SimilarityMatrix` from row vectors,
    /// one row per target item.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
        where R: AsRef<[f64]>,
    {
        let n_target = rows.len();
        let n_train = rows.first()
            .map(|row| row.as_ref().len())
            .unwrap_or(0);

        let mut data = Vec::with_capacity(n_target * n_train);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_train {
                return Err(EpoxyError::RaggedRows {
                    row: i,
                    expected: n_train,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        check_not_nan(&data, n_train)?;

        Ok(Self { data, n_target, n_train, })
    }


    /// Convert `polars::DataFrame` into `SimilarityMatrix`.
    /// Each row of `data` is a target item and
    /// each column is a training item.
    /// Missing values are rejected.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let (n_target, n_train) = data.shape();

        let mut buffer = vec![0.0; n_target * n_train];
        for (j, series) in data.get_columns().iter().enumerate() {
            let values = series.cast(&DataType::Float64)?;
            for (i, value) in values.f64()?.into_iter().enumerate() {
                let value = value.filter(|v| !v.is_nan())
                    .ok_or(EpoxyError::NonFiniteSimilarity {
                        row: i,
                        column: j,
                    })?;
                buffer[i * n_train + j] = value;
            }
        }

        Ok(Self { data: buffer, n_target, n_train, })
    }


    /// Returns the pair `(n_target, n_train)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_target, self.n_train)
    }


    /// Returns the similarities from target item `row`
    /// to all training items.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n_train;
        &self.data[start..start + self.n_train]
    }


    /// Returns the largest similarity from target item `row`
    /// to the training items yielded by `support`.
    /// Returns `None` if `support` is empty.
    #[inline]
    pub fn max_over<I>(&self, row: usize, support: I) -> Option<f64>
        where I: IntoIterator<Item = usize>,
    {
        let sims = self.row(row);
        support.into_iter()
            .map(|j| sims[j])
            .reduce(f64::max)
    }
}


impl Index<(usize, usize)> for SimilarityMatrix {
    type Output = f64;
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.n_train + col]
    }
}


fn check_not_nan(data: &[f64], n_train: usize) -> Result<()> {
    match data.iter().position(|v| v.is_nan()) {
        Some(k) => Err(EpoxyError::NonFiniteSimilarity {
            row: k / n_train,
            column: k % n_train,
        }),
        None => Ok(()),
    }
}
