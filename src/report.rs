//! Coverage summary of an extension.
use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{EpoxyError, LabelMatrix, Polarity, Result};

const NAME_WIDTH: usize = 16;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 4;
const FULL_WIDTH: usize = 72;


/// How a single LF changed through the extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LfReport {
    /// LF name
    pub name: String,
    /// Number of abstentions before the extension.
    pub n_abstain: usize,
    /// Number of abstentions turned into `+1`.
    pub n_positive: usize,
    /// Number of abstentions turned into `-1`.
    pub n_negative: usize,
    /// Fraction of non-abstaining votes before the extension.
    pub coverage_before: f64,
    /// Fraction of non-abstaining votes after the extension.
    pub coverage_after: f64,
}


impl LfReport {
    /// Number of abstentions that were extended.
    pub fn n_extended(&self) -> usize {
        self.n_positive + self.n_negative
    }
}


/// Per-LF coverage before and after an extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionReport {
    lfs: Vec<LfReport>,
    n_item: usize,
}


impl ExtensionReport {
    /// Compare the votes `before` and `after` an extension.
    /// Both matrices must have the same shape.
    pub fn compare(before: &LabelMatrix, after: &LabelMatrix)
        -> Result<Self>
    {
        if before.shape() != after.shape() {
            return Err(EpoxyError::MatrixShapeMismatch {
                expected: before.shape(),
                actual: after.shape(),
            });
        }

        let lfs = before.columns()
            .iter()
            .zip(after.columns())
            .enumerate()
            .map(|(col, (b, a))| {
                let mut n_abstain = 0;
                let mut n_positive = 0;
                let mut n_negative = 0;
                b.votes.iter()
                    .zip(&a.votes)
                    .filter(|(vb, _)| vb.is_abstain())
                    .for_each(|(_, va)| {
                        n_abstain += 1;
                        match va.polarity() {
                            Some(Polarity::Positive) => { n_positive += 1; },
                            Some(Polarity::Negative) => { n_negative += 1; },
                            None => {},
                        }
                    });

                LfReport {
                    name: b.name.clone(),
                    n_abstain,
                    n_positive,
                    n_negative,
                    coverage_before: before.coverage(col),
                    coverage_after: after.coverage(col),
                }
            })
            .collect();

        Ok(Self { lfs, n_item: before.n_item(), })
    }


    /// Returns the per-LF reports.
    pub fn lfs(&self) -> &[LfReport] {
        &self.lfs[..]
    }


    /// Returns the number of items of the extended matrix.
    pub fn n_item(&self) -> usize {
        self.n_item
    }


    /// Total number of extended cells.
    pub fn n_extended(&self) -> usize {
        self.lfs.iter()
            .map(LfReport::n_extended)
            .sum()
    }


    /// Total number of cells that still abstain.
    pub fn n_remaining_abstains(&self) -> usize {
        self.lfs.iter()
            .map(|lf| lf.n_abstain - lf.n_extended())
            .sum()
    }


    /// Print the report to the standard output.
    pub fn print(&self) {
        println!(
            "\n{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "EXTENSION".bold(), "",
        );
        println!(
            "{:<NAME_WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "LF".bold().red(),
            "ABSTAIN".bold().white(),
            "+1".bold().green(),
            "-1".bold().yellow(),
            "COV.".bold().blue(),
            "COV.".bold().cyan(),
        );
        println!(
            "{:<NAME_WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "",
            "",
            "",
            "",
            "BEFORE".bold().blue(),
            "AFTER".bold().cyan(),
        );

        for lf in &self.lfs {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}",
                format!("{:<NAME_WIDTH$}", lf.name).red(),
                format!("{:>WIDTH$}", lf.n_abstain).white(),
                format!("{:>WIDTH$}", lf.n_positive).green(),
                format!("{:>WIDTH$}", lf.n_negative).yellow(),
                format!("{:>WIDTH$.PREC_WIDTH$}", lf.coverage_before).blue(),
                format!("{:>WIDTH$.PREC_WIDTH$}", lf.coverage_after).bold().cyan(),
            );
        }

        println!(
            "{:->FULL_WIDTH$}\n\
            + {:<NAME_WIDTH$}\t{:>WIDTH$}\n\
            + {:<NAME_WIDTH$}\t{:>WIDTH$}\n\
            {:=>FULL_WIDTH$}\n",
            "",
            "Extended".bold(),
            self.n_extended().to_string().bold().green(),
            "Still abstain".bold(),
            self.n_remaining_abstains().to_string().bold().yellow(),
            "",
        );
    }
}


impl fmt::Display for ExtensionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<NAME_WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "LF", "ABSTAIN", "+1", "-1", "BEFORE", "AFTER",
        )?;
        for lf in &self.lfs {
            writeln!(
                f,
                "{:<NAME_WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$.PREC_WIDTH$}\t{:>WIDTH$.PREC_WIDTH$}",
                lf.name,
                lf.n_abstain,
                lf.n_positive,
                lf.n_negative,
                lf.coverage_before,
                lf.coverage_after,
            )?;
        }
        write!(
            f,
            "extended: {}, still abstain: {}",
            self.n_extended(),
            self.n_remaining_abstains(),
        )
    }
}
