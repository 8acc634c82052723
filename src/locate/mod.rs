//! Rank locator: maps a 1-based global rank to its numeral.
//!
//! Numerals are ordered by value and, within a value, by decimal reading.
//! Locating a rank happens in two stages:
//!
//! 1. Binary search the partial sums for the value `v` whose group holds the
//!    rank. The distance from the end of that group, `operations`, counts how
//!    far below the maximal numeral of `v` the answer lies.
//! 2. Start from the maximal numeral (the binary expansion of `v`) and fix one
//!    digit at a time from the left. For the current leading digit, the size
//!    index says how many arrangements of the remaining positions keep it. If
//!    `operations` is smaller, the digit stays; otherwise those arrangements
//!    are skipped and the leading digit is rolled down by one, with its unit
//!    moved into the next position as two units.
//!
//! After each roll the digits to the right are again the largest arrangement
//! of their value, so the next count starts from the top of the right group.

mod workspace;

use thiserror::Error;
use tracing::trace;

use crate::numeral::{Numeral, NumeralError};
use crate::tables::{Tables, MAX_DIGITS};

use workspace::DigitBuffer;

/// Errors returned by rank queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocateError {
    /// Ranks start at 1.
    #[error("rank {0} is out of domain: ranks are 1-based")]
    RankNotPositive(i64),

    /// The rank lies past the precomputed tables.
    #[error("rank {rank} exceeds the largest rank {max} covered by the tables")]
    RankBeyondTables {
        /// Requested rank.
        rank: u64,
        /// Largest rank the tables can answer.
        max: u64,
    },

    /// The tables disagree with the descent; indicates a defect, not bad input.
    #[error("internal inconsistency while locating rank {rank}: {reason}")]
    Inconsistent {
        /// Rank being located.
        rank: u64,
        /// What went wrong.
        reason: String,
    },

    /// The located numeral could not be serialised.
    #[error(transparent)]
    Numeral(#[from] NumeralError),
}

impl Tables {
    /// Value whose group of numerals contains `rank`.
    pub fn value_of_rank(&self, rank: i64) -> Result<u32, LocateError> {
        let rank = self.checked_rank(rank)?;
        Ok(self.value_of_checked_rank(rank))
    }

    /// Numeral at the 1-based `rank`.
    pub fn locate(&self, rank: i64) -> Result<Numeral, LocateError> {
        let rank = self.checked_rank(rank)?;
        let value = self.value_of_checked_rank(rank);
        let mut operations = self.partial_sums()[value as usize] - rank;
        trace!(rank, value, operations, "locating rank");

        let sizes = self.sizes();
        let mut buffer = DigitBuffer::maximal(value);
        let mut located = Vec::with_capacity(MAX_DIGITS);

        while buffer.remaining() > 1 {
            if buffer.leading() == 0 {
                located.push(buffer.advance());
                continue;
            }

            let suffix = buffer.suffix_value();
            let variants = sizes
                .count_up_to(suffix, buffer.remaining() - 1)
                .ok_or_else(|| LocateError::Inconsistent {
                    rank,
                    reason: format!("suffix value {suffix} is past the size index"),
                })?;
            if operations < variants {
                located.push(buffer.advance());
            } else {
                operations -= variants;
                buffer
                    .roll()
                    .map_err(|overflow| LocateError::Inconsistent {
                        rank,
                        reason: format!(
                            "carry of {} ran past the last digit with {} operations left",
                            overflow.excess, operations
                        ),
                    })?;
            }
        }
        located.push(buffer.advance());

        if operations != 0 {
            return Err(LocateError::Inconsistent {
                rank,
                reason: format!("{operations} operations left after the last digit"),
            });
        }

        Ok(Numeral::from_digits(&located)?)
    }

    /// Numeral at `rank` as its decimal-looking integer.
    pub fn locate_decimal(&self, rank: i64) -> Result<u64, LocateError> {
        Ok(self.locate(rank)?.to_decimal()?)
    }

    fn checked_rank(&self, rank: i64) -> Result<u64, LocateError> {
        if rank < 1 {
            return Err(LocateError::RankNotPositive(rank));
        }
        let rank = rank as u64;
        let max = self.max_rank();
        if rank > max {
            return Err(LocateError::RankBeyondTables { rank, max });
        }
        Ok(rank)
    }

    fn value_of_checked_rank(&self, rank: u64) -> u32 {
        let covered = &self.partial_sums()[..=self.ceiling() as usize];
        covered.partition_point(|&sum| sum < rank) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeral::numerals_of;
    use crate::tables::TableConfig;

    fn small_tables() -> Tables {
        Tables::build(&TableConfig::new(64)).unwrap()
    }

    #[test]
    fn first_ranks() {
        let tables = small_tables();
        let located: Vec<u64> = (1..=15)
            .map(|rank| tables.locate_decimal(rank).unwrap())
            .collect();
        assert_eq!(
            located,
            [0, 1, 2, 10, 3, 11, 4, 12, 20, 100, 5, 13, 21, 101, 6]
        );
    }

    #[test]
    fn agrees_with_enumeration() {
        let tables = small_tables();
        for value in 0..=64 {
            let group = numerals_of(value).unwrap();
            let ranks = tables.rank_range(value).unwrap();
            assert_eq!(group.len() as u64, ranks.end() - ranks.start() + 1);
            for (rank, expected) in ranks.zip(group) {
                assert_eq!(tables.locate(rank as i64).unwrap(), expected, "rank {rank}");
            }
        }
    }

    #[test]
    fn value_of_rank_uses_group_boundaries() {
        let tables = small_tables();
        assert_eq!(tables.value_of_rank(1), Ok(0));
        assert_eq!(tables.value_of_rank(4), Ok(2));
        assert_eq!(tables.value_of_rank(5), Ok(3));
        assert_eq!(tables.value_of_rank(10), Ok(4));
        assert_eq!(tables.value_of_rank(tables.max_rank() as i64), Ok(64));
    }

    #[test]
    fn non_positive_ranks_are_out_of_domain() {
        let tables = small_tables();
        assert_eq!(tables.locate(0), Err(LocateError::RankNotPositive(0)));
        assert_eq!(tables.locate(-1), Err(LocateError::RankNotPositive(-1)));
    }

    #[test]
    fn ranks_past_the_tables_are_rejected() {
        let tables = small_tables();
        let max = tables.max_rank();
        assert_eq!(
            tables.locate(max as i64 + 1),
            Err(LocateError::RankBeyondTables { rank: max + 1, max })
        );
    }
}
