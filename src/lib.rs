//! # Decibinary numeral ranking
//!
//! A decibinary numeral is written with the digits 0-9 but evaluated with
//! powers of two as place values: `21` is worth `2·2 + 1 = 5`, the same as
//! `13`, `101` and `5`. Listing every numeral by value, and within a value by
//! decimal reading, gives a sequence
//!
//! ```text
//! rank:    1  2  3   4  5   6  7   8   9   10  11 ...
//! numeral: 0  1  2  10  3  11  4  12  20  100   5 ...
//! ```
//!
//! This crate answers "which numeral sits at rank r?" for ranks up to 10^16
//! without listing anything.
//!
//! ## Core Algorithm
//!
//! 1. **Counting**: count the numerals of every value up to a ceiling with a
//!    recurrence on the least significant digit
//! 2. **Partial sums**: cumulative counts turn a rank into a value by binary
//!    search
//! 3. **Size index**: counts split by numeral length bound how many
//!    arrangements a run of trailing digits admits
//! 4. **Descent**: starting from the largest numeral of the value, fix digits
//!    left to right, rolling a unit rightward whenever a whole block of
//!    arrangements can be skipped
//!
//! ## Usage Example
//!
//! ```
//! use decibinary::{TableConfig, Tables};
//!
//! let tables = Tables::build(&TableConfig::new(64))?;
//! assert_eq!(tables.locate(4)?.to_string(), "10");
//! assert_eq!(tables.locate(11)?.value(), 5);
//! # Ok::<(), decibinary::Error>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod numeral;  // Numerals and conversions
pub mod tables;   // Counting tables and size index
pub mod locate;   // Rank to numeral
pub mod fixture;  // Plain-text query fixtures

// Re-exports for convenience
pub use locate::LocateError;
pub use numeral::{decimal_value, Numeral, NumeralError};
pub use tables::{TableConfig, TableError, Tables};

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur anywhere in the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Table sizing or construction failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A rank query failed.
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// A numeral was malformed.
    #[error(transparent)]
    Numeral(#[from] NumeralError),

    /// A fixture could not be read or written.
    #[error(transparent)]
    Fixture(#[from] fixture::FixtureError),

    /// Queries and expected answers have different lengths.
    #[error("{ranks} ranks but {expected} expected numerals")]
    LengthMismatch {
        /// Number of ranks supplied.
        ranks: usize,
        /// Number of expected numerals supplied.
        expected: usize,
    },
}

/// Answers batches of rank queries against one shared set of tables.
///
/// Cloning is cheap; clones share the tables.
#[derive(Debug, Clone)]
pub struct Solver {
    tables: Arc<Tables>,
}

/// One disagreement found by [`Solver::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Position of the query in the batch.
    pub index: usize,
    /// Rank queried.
    pub rank: i64,
    /// Numeral the fixture expects.
    pub expected: Numeral,
    /// Numeral actually located.
    pub actual: Numeral,
}

/// Outcome of checking a batch against expected answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// Queries checked.
    pub checked: usize,
    /// Queries whose answer differed.
    pub mismatches: Vec<Mismatch>,
}

impl VerifyReport {
    /// `true` when every answer matched.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl Solver {
    /// Build tables for `config` and wrap them.
    pub fn new(config: &TableConfig) -> Result<Self, Error> {
        Ok(Self::from_tables(Arc::new(Tables::build(config)?)))
    }

    /// Solver sized to answer every rank up to `max_rank`.
    pub fn covering(max_rank: u64) -> Result<Self, Error> {
        Self::new(&TableConfig::covering_rank(max_rank)?)
    }

    /// Wrap tables that were already built.
    pub fn from_tables(tables: Arc<Tables>) -> Self {
        Self { tables }
    }

    /// Shared tables.
    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Locate every rank, stopping at the first failure.
    pub fn solve(&self, ranks: &[i64]) -> Result<Vec<Numeral>, Error> {
        debug!(queries = ranks.len(), "solving batch");
        ranks
            .iter()
            .map(|&rank| self.tables.locate(rank).map_err(Error::from))
            .collect()
    }

    /// Locate every rank and compare with `expected`.
    pub fn verify(&self, ranks: &[i64], expected: &[Numeral]) -> Result<VerifyReport, Error> {
        if ranks.len() != expected.len() {
            return Err(Error::LengthMismatch {
                ranks: ranks.len(),
                expected: expected.len(),
            });
        }

        let mut report = VerifyReport::default();
        for (index, (&rank, expected)) in ranks.iter().zip(expected).enumerate() {
            let actual = self.tables.locate(rank)?;
            report.checked += 1;
            if &actual != expected {
                warn!(rank, %expected, %actual, "located numeral differs from fixture");
                report.mismatches.push(Mismatch {
                    index,
                    rank,
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        Ok(report)
    }
}
