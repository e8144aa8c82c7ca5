//! Struct `LabelMatrix` holds the votes of labeling functions.
//! Rows are items, columns are labeling functions (LFs).
use fixedbitset::FixedBitSet;
use polars::prelude::*;
use rayon::prelude::*;

use std::ops::Index;

use crate::{EpoxyError, Polarity, Result, Vote};


/// The votes of a single labeling function over all items.
#[derive(Debug, Clone, PartialEq)]
pub struct LfColumn {
    /// LF name
    pub name: String,
    /// Vote on each item.
    pub votes: Vec<Vote>,
}


impl LfColumn {
    /// Construct a new column from its name and votes.
    pub fn new<T: ToString>(name: T, votes: Vec<Vote>) -> Self {
        Self { name: name.to_string(), votes, }
    }


    /// Read a column from a `polars::Series`.
    /// Any numeric dtype is accepted as long as every value is
    /// `-1`, `0`, or `1`. Missing values are read as abstentions.
    fn from_series(series: &Series, column: usize) -> Result<Self> {
        let name = series.name().to_string();

        let dtype = series.dtype();
        if !dtype.is_numeric() && *dtype != DataType::Null {
            return Err(EpoxyError::NonNumericVotes {
                column,
                dtype: dtype.to_string(),
            });
        }

        let values = series.strict_cast(&DataType::Float64)?;
        let votes = values.f64()?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                let value = value.unwrap_or(0.0);
                to_vote(value, row, column)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { name, votes, })
    }


    fn to_series(&self) -> Series {
        let votes = self.votes.iter()
            .map(|v| v.as_i64())
            .collect::<Vec<i64>>();
        Series::new(&self.name, votes)
    }


    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.votes.len()
    }


    /// Returns `true` if the column has no item.
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}


/// A matrix of LF votes, each cell in `{-1, 0, +1}`.
///
/// The votes are stored column by column
/// since every computation in this crate walks one LF at a time.
///
/// # Example
/// ```
/// use epoxy::prelude::*;
///
/// let votes = LabelMatrix::from_rows(&[
///     vec![ 1, -1],
///     vec![ 1,  0],
///     vec![-1,  1],
/// ]).unwrap();
///
/// assert_eq!(votes.shape(), (3, 2));
/// assert_eq!(votes[(1, 1)], Vote::Abstain);
/// assert_eq!(votes.abstains(1), vec![1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMatrix {
    pub(crate) columns: Vec<LfColumn>,
    pub(crate) n_item: usize,
}


impl LabelMatrix {
    /// Construct a `LabelMatrix` from row vectors.
    /// Every row must have the same length
    /// and every value must be `-1`, `0`, or `1`.
    /// Columns are named `LF [j]`.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
        where R: AsRef<[i64]>,
    {
        let n_item = rows.len();
        let n_lf = rows.first()
            .map(|row| row.as_ref().len())
            .unwrap_or(0);

        let mut columns = (0..n_lf).map(|j| {
                LfColumn::new(default_name(j), Vec::with_capacity(n_item))
            })
            .collect::<Vec<_>>();

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_lf {
                return Err(EpoxyError::RaggedRows {
                    row: i,
                    expected: n_lf,
                    actual: row.len(),
                });
            }

            for (j, &value) in row.iter().enumerate() {
                let vote = Vote::from_i64(value)
                    .ok_or(EpoxyError::InvalidVote {
                        row: i,
                        column: j,
                        value: value as f64,
                    })?;
                columns[j].votes.push(vote);
            }
        }

        Ok(Self { columns, n_item, })
    }


    /// Construct a `LabelMatrix` from column vectors,
    /// one vector of votes per LF.
    /// Unlike `from_rows`, this keeps the number of LFs
    /// even when there is no item.
    pub fn from_columns<C>(columns: &[C]) -> Result<Self>
        where C: AsRef<[i64]>,
    {
        let n_item = columns.first()
            .map(|col| col.as_ref().len())
            .unwrap_or(0);

        let columns = columns.iter()
            .enumerate()
            .map(|(j, col)| {
                let col = col.as_ref();
                if col.len() != n_item {
                    return Err(EpoxyError::RaggedColumns {
                        column: j,
                        expected: n_item,
                        actual: col.len(),
                    });
                }
                let votes = col.iter()
                    .enumerate()
                    .map(|(i, &value)| {
                        Vote::from_i64(value)
                            .ok_or(EpoxyError::InvalidVote {
                                row: i,
                                column: j,
                                value: value as f64,
                            })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(LfColumn::new(default_name(j), votes))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, n_item, })
    }


    /// Convert `polars::DataFrame` into `LabelMatrix`.
    /// Each column of `data` is a labeling function,
    /// and the column names are kept as LF names.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let n_item = data.height();

        let columns = data.get_columns()
            .par_iter()
            .enumerate()
            .map(|(j, series)| LfColumn::from_series(series, j))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { columns, n_item, })
    }


    /// Convert `self` into a `polars::DataFrame`
    /// whose columns are `i64` votes.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let series = self.columns.iter()
            .map(LfColumn::to_series)
            .collect::<Vec<_>>();
        let df = DataFrame::new(series)?;
        Ok(df)
    }


    /// Returns the votes as row vectors of integers.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.n_item).map(|i| {
                self.columns.iter()
                    .map(|col| col.votes[i].as_i64())
                    .collect()
            })
            .collect()
    }


    /// Returns the pair of the number of items and
    /// the number of labeling functions.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_item, self.columns.len())
    }


    /// Returns the number of items (rows).
    pub fn n_item(&self) -> usize {
        self.n_item
    }


    /// Returns the number of labeling functions (columns).
    pub fn n_lf(&self) -> usize {
        self.columns.len()
    }


    /// Returns the vote of LF `col` on item `row`.
    /// Returns `None` if the position is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<Vote> {
        self.columns.get(col)
            .and_then(|c| c.votes.get(row))
            .copied()
    }


    /// Returns the votes of the `col`-th LF.
    ///
    /// # Panics
    /// Panics if `col >= self.n_lf()`.
    pub fn column(&self, col: usize) -> &[Vote] {
        &self.columns[col].votes[..]
    }


    /// Returns a slice of `LfColumn`.
    pub fn columns(&self) -> &[LfColumn] {
        &self.columns[..]
    }


    /// Returns the LF names.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter()
            .map(|col| col.name.as_str())
            .collect()
    }


    /// Set the LF names.
    /// This method panics when the length of given names is
    /// not equal to the number of LFs.
    pub fn replace_names<S, T>(&mut self, names: T) -> Vec<String>
        where S: ToString,
              T: AsRef<[S]>,
    {
        let names = names.as_ref();
        assert_eq!(
            names.len(), self.n_lf(),
            "The number of names is not equal to the number of LFs"
        );

        names.iter()
            .zip(&mut self.columns[..])
            .map(|(name, col)| {
                std::mem::replace(&mut col.name, name.to_string())
            })
            .collect()
    }


    /// Returns the rows, in ascending order,
    /// on which the `col`-th LF abstains.
    pub fn abstains(&self, col: usize) -> Vec<usize> {
        self.column(col)
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_abstain().then_some(i))
            .collect()
    }


    /// Returns the set of rows on which the `col`-th LF
    /// votes with the given polarity.
    pub fn support(&self, col: usize, polarity: Polarity) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(self.n_item);
        self.column(col)
            .iter()
            .enumerate()
            .filter(|(_, v)| v.polarity() == Some(polarity))
            .for_each(|(i, _)| { bits.insert(i); });
        bits
    }


    /// Returns the fraction of items
    /// on which the `col`-th LF does not abstain.
    /// An empty matrix has coverage `0`.
    pub fn coverage(&self, col: usize) -> f64 {
        if self.n_item == 0 {
            return 0.0;
        }
        let n_vote = self.column(col)
            .iter()
            .filter(|v| !v.is_abstain())
            .count();
        n_vote as f64 / self.n_item as f64
    }


    /// Returns `true` if at least one cell is an abstention.
    pub fn has_abstains(&self) -> bool {
        self.columns.iter()
            .any(|col| col.votes.iter().any(|v| v.is_abstain()))
    }

}


impl Index<(usize, usize)> for LabelMatrix {
    type Output = Vote;
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.columns[col].votes[row]
    }
}


fn default_name(j: usize) -> String {
    format!("LF [{j}]")
}


fn to_vote(value: f64, row: usize, column: usize) -> Result<Vote> {
    let vote = if value == 1.0 {
        Vote::Positive
    } else if value == 0.0 {
        Vote::Abstain
    } else if value == -1.0 {
        Vote::Negative
    } else {
        return Err(EpoxyError::InvalidVote { row, column, value, });
    };
    Ok(vote)
}
