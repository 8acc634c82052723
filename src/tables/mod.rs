//! Counting tables for decibinary numerals.
//!
//! Three tables are derived once from a [`TableConfig`] and never change:
//! - `counts[v]`: how many numerals evaluate to `v`,
//! - `partial_sums[v]`: cumulative counts, i.e. the rank of the last numeral
//!   of value `v`,
//! - a [`SizeIndex`] splitting each count by numeral length.
//!
//! Counts follow a recurrence on the least significant digit. A numeral of an
//! even value `v` ends in some even digit `least <= min(9, v)` preceded by any
//! numeral of `(v - least) / 2`. Every numeral of an even value ends in a
//! digit of at most 8, so adding one to that digit pairs it off with exactly
//! one numeral of `v + 1`; odd values therefore copy their predecessor.

mod config;
mod size_index;

use std::ops::RangeInclusive;
use std::sync::OnceLock;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info};

pub use config::{TableConfig, DEFAULT_CEILING, MAXIMUM_INDEX, MAX_CEILING, MAX_DIGITS};
pub use size_index::SizeIndex;

/// Errors raised while sizing or building the tables.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    /// Ceiling of zero, or too large for numerals to fit a decimal `u64`.
    #[error("invalid ceiling {ceiling}: must be between 1 and {max}")]
    InvalidCeiling {
        /// Requested ceiling.
        ceiling: u32,
        /// Largest supported ceiling.
        max: u32,
    },

    /// A count no longer fits in a `u64`.
    #[error("numeral count overflowed at value {value}")]
    CountOverflow {
        /// Value whose count overflowed.
        value: u32,
    },

    /// No supported ceiling reaches the requested rank.
    #[error("rank {rank} is beyond the largest supported tables ({max} ranks)")]
    RankUnreachable {
        /// Requested rank.
        rank: u64,
        /// Ranks covered by the largest supported ceiling.
        max: u64,
    },
}

/// Immutable counting tables shared by every rank query.
#[derive(Debug, Clone)]
pub struct Tables {
    config: TableConfig,
    counts: Vec<u64>,
    partial_sums: Vec<u64>,
    sizes: SizeIndex,
}

/// Summary figures for a set of tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableStats {
    /// Largest covered value.
    pub ceiling: u32,
    /// Largest answerable rank.
    pub max_rank: u64,
    /// Numerals of the ceiling value.
    pub ceiling_count: u64,
    /// Digits of the longest numeral covered.
    pub max_digits: usize,
}

impl Tables {
    /// Build all tables for `config`.
    ///
    /// Runs once in increasing value order; each entry depends only on
    /// strictly smaller values.
    pub fn build(config: &TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let started = Instant::now();

        let len = config.table_len();
        let mut counts = vec![0u64; len];
        counts[0] = 1;
        counts[1] = 1;
        let mut sizes = SizeIndex::seeded(len);

        for value in (2..len).step_by(2) {
            let count = config::count_even(&counts, value)?;
            counts[value] = count;
            if value + 1 < len {
                counts[value + 1] = count;
            }
            sizes.push_even(value as u32);
        }

        let mut partial_sums = Vec::with_capacity(len);
        let mut sum = 0u64;
        for (value, &count) in counts.iter().enumerate() {
            sum = sum.checked_add(count).ok_or(TableError::CountOverflow {
                value: value as u32,
            })?;
            partial_sums.push(sum);
        }

        let tables = Self {
            config: *config,
            counts,
            partial_sums,
            sizes,
        };
        info!(
            ceiling = config.ceiling,
            max_rank = tables.max_rank(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built decibinary tables"
        );
        Ok(tables)
    }

    /// Configuration the tables were built from.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Largest covered value.
    pub fn ceiling(&self) -> u32 {
        self.config.ceiling
    }

    /// Numerals evaluating to `value`, or `None` past the tables.
    pub fn count(&self, value: u32) -> Option<u64> {
        self.counts.get(value as usize).copied()
    }

    /// Numerals of value at most `value`, or `None` past the tables.
    pub fn partial_sum(&self, value: u32) -> Option<u64> {
        self.partial_sums.get(value as usize).copied()
    }

    /// All counts, indexed by value (`ceiling + 2` entries).
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// All partial sums, indexed by value (`ceiling + 2` entries).
    pub fn partial_sums(&self) -> &[u64] {
        &self.partial_sums
    }

    /// Per-length breakdown of the counts.
    pub fn sizes(&self) -> &SizeIndex {
        &self.sizes
    }

    /// Largest rank the tables can answer.
    pub fn max_rank(&self) -> u64 {
        self.partial_sums[self.config.ceiling as usize]
    }

    /// 1-based ranks occupied by the numerals of `value`.
    pub fn rank_range(&self, value: u32) -> Option<RangeInclusive<u64>> {
        if value > self.config.ceiling {
            return None;
        }
        let last = self.partial_sums[value as usize];
        let first = last - self.counts[value as usize] + 1;
        Some(first..=last)
    }

    /// Summary figures.
    pub fn stats(&self) -> TableStats {
        let ceiling = self.config.ceiling;
        TableStats {
            ceiling,
            max_rank: self.max_rank(),
            ceiling_count: self.counts[ceiling as usize],
            max_digits: (u32::BITS - ceiling.leading_zeros()) as usize,
        }
    }
}

static SHARED: OnceLock<Result<Tables, TableError>> = OnceLock::new();

/// Tables for [`TableConfig::default`], built on first use and shared for the
/// rest of the process.
///
/// The build runs exactly once; concurrent first callers block until it is
/// done. A failed build is remembered and returned to every caller.
pub fn shared() -> Result<&'static Tables, TableError> {
    SHARED
        .get_or_init(|| {
            debug!("building shared tables");
            Tables::build(&TableConfig::default())
        })
        .as_ref()
        .map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_match_hand_enumeration() {
        let tables = Tables::build(&TableConfig::new(6)).unwrap();
        // 0: 0 | 1: 1 | 2: 2 10 | 3: 3 11 | 4: 4 12 20 100 | 5: 5 13 21 101
        // 6: 6 14 22 30 102 110
        assert_eq!(&tables.counts()[..7], &[1, 1, 2, 2, 4, 4, 6]);
        assert_eq!(&tables.partial_sums()[..7], &[1, 2, 4, 6, 10, 14, 20]);
        assert_eq!(tables.max_rank(), 20);
    }

    #[test]
    fn odd_ceiling_fills_its_even_partner() {
        let tables = Tables::build(&TableConfig::new(5)).unwrap();
        assert_eq!(tables.counts().len(), 7);
        assert_eq!(tables.count(6), Some(6));
        assert_eq!(tables.count(7), None);
    }

    #[test]
    fn rank_ranges_tile_the_rank_space() {
        let tables = Tables::build(&TableConfig::new(64)).unwrap();
        let mut next = 1;
        for value in 0..=64 {
            let range = tables.rank_range(value).unwrap();
            assert_eq!(*range.start(), next);
            next = range.end() + 1;
        }
        assert_eq!(next - 1, tables.max_rank());
        assert!(tables.rank_range(65).is_none());
    }

    #[test]
    fn size_histograms_sum_to_counts() {
        let tables = Tables::build(&TableConfig::new(512)).unwrap();
        for value in 1..=513u32 {
            let (_, by_len) = tables.sizes().histogram(value).unwrap();
            assert_eq!(
                by_len.iter().sum::<u64>(),
                tables.count(value).unwrap(),
                "value {value}"
            );
        }
    }

    #[test]
    fn invalid_ceiling_is_rejected() {
        assert_eq!(
            Tables::build(&TableConfig::new(0)).unwrap_err(),
            TableError::InvalidCeiling {
                ceiling: 0,
                max: MAX_CEILING
            }
        );
    }

    #[test]
    fn stats_report_the_ceiling_group() {
        let tables = Tables::build(&TableConfig::new(4)).unwrap();
        let stats = tables.stats();
        assert_eq!(stats.ceiling, 4);
        assert_eq!(stats.max_rank, 10);
        assert_eq!(stats.ceiling_count, 4);
        assert_eq!(stats.max_digits, 3);
    }
}
