//! Table sizing.
//!
//! The tables cover every value in `0..=ceiling`. The ceiling decides the
//! largest rank that can be answered, so it is normally derived from the
//! largest rank a caller intends to ask for.

use tracing::debug;

use super::TableError;

/// Largest rank the default tables are sized for.
pub const MAXIMUM_INDEX: u64 = 10_000_000_000_000_000;

/// Smallest ceiling whose ranks reach [`MAXIMUM_INDEX`].
pub const DEFAULT_CEILING: u32 = 285_112;

/// Most digits a numeral inside the largest permitted tables can have.
///
/// Keeps every numeral representable as a decimal-looking `u64`.
pub const MAX_DIGITS: usize = 19;

/// Largest permitted ceiling: the extra odd entry `ceiling + 1` must still have
/// at most [`MAX_DIGITS`] binary digits.
pub const MAX_CEILING: u32 = (1 << MAX_DIGITS) - 2;

/// Configuration parameters for building [`Tables`](super::Tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableConfig {
    /// Largest value covered by the tables.
    pub ceiling: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
        }
    }
}

impl TableConfig {
    /// Configuration covering values up to `ceiling`.
    pub fn new(ceiling: u32) -> Self {
        Self { ceiling }
    }

    /// Smallest configuration able to answer every rank up to `max_rank`.
    ///
    /// Only the value counts are computed here, so this is much cheaper than
    /// building the full tables.
    pub fn covering_rank(max_rank: u64) -> Result<Self, TableError> {
        let mut counts: Vec<u64> = vec![1, 1];
        let mut total = 2u64;
        if max_rank <= total {
            return Ok(Self::new(1));
        }

        for value in 2..=MAX_CEILING as usize {
            let count = if value % 2 == 1 {
                counts[value - 1]
            } else {
                count_even(&counts, value)?
            };
            counts.push(count);
            total = total
                .checked_add(count)
                .ok_or(TableError::CountOverflow { value: value as u32 })?;

            if total >= max_rank {
                debug!(max_rank, ceiling = value, total, "derived covering ceiling");
                return Ok(Self::new(value as u32));
            }
        }

        Err(TableError::RankUnreachable {
            rank: max_rank,
            max: total,
        })
    }

    /// Reject ceilings the tables cannot represent.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.ceiling == 0 || self.ceiling > MAX_CEILING {
            return Err(TableError::InvalidCeiling {
                ceiling: self.ceiling,
                max: MAX_CEILING,
            });
        }
        Ok(())
    }

    /// Number of table entries: every value up to the ceiling plus the odd
    /// partner of the ceiling.
    pub fn table_len(&self) -> usize {
        self.ceiling as usize + 2
    }
}

/// Count for an even `value >= 2` from the counts of smaller values.
pub(super) fn count_even(counts: &[u64], value: usize) -> Result<u64, TableError> {
    let mut count = 0u64;
    for least in (0..=value.min(9)).step_by(2) {
        let most = (value - least) >> 1;
        count = count
            .checked_add(counts[most])
            .ok_or(TableError::CountOverflow {
                value: value as u32,
            })?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_maximum_index() {
        assert_eq!(TableConfig::default().ceiling, DEFAULT_CEILING);
        assert_eq!(TableConfig::default().table_len(), DEFAULT_CEILING as usize + 2);
    }

    #[test]
    fn covering_small_ranks() {
        // Values 0..=4 hold 1 + 1 + 2 + 2 + 4 = 10 numerals.
        assert_eq!(TableConfig::covering_rank(1).unwrap().ceiling, 1);
        assert_eq!(TableConfig::covering_rank(3).unwrap().ceiling, 2);
        assert_eq!(TableConfig::covering_rank(7).unwrap().ceiling, 4);
        assert_eq!(TableConfig::covering_rank(10).unwrap().ceiling, 4);
        assert_eq!(TableConfig::covering_rank(11).unwrap().ceiling, 5);
    }

    #[test]
    fn covering_the_maximum_index_gives_the_default_ceiling() {
        let config = TableConfig::covering_rank(MAXIMUM_INDEX).unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn unreachable_rank_is_reported() {
        assert!(matches!(
            TableConfig::covering_rank(u64::MAX),
            Err(TableError::RankUnreachable { .. })
        ));
    }

    #[test]
    fn validate_bounds() {
        assert!(TableConfig::new(0).validate().is_err());
        assert!(TableConfig::new(1).validate().is_ok());
        assert!(TableConfig::new(MAX_CEILING).validate().is_ok());
        assert!(TableConfig::new(MAX_CEILING + 1).validate().is_err());
    }
}
