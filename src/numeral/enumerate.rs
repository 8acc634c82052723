//! Brute-force enumeration of every numeral of a value.
//!
//! Exponential in the value, so only usable for small inputs. The rank tables
//! are checked against it in tests and the driver uses it to list numerals.

use std::collections::HashMap;

use super::Numeral;

/// Largest value [`numerals_of`] will enumerate.
pub const ENUMERATION_LIMIT: u32 = 256;

/// All numerals of `value` in ascending decimal order.
///
/// Returns `None` when `value` exceeds [`ENUMERATION_LIMIT`].
pub fn numerals_of(value: u32) -> Option<Vec<Numeral>> {
    if value > ENUMERATION_LIMIT {
        return None;
    }
    let mut memo = HashMap::new();
    Some(to_numerals(collect(value, &mut memo)))
}

/// Numeral at the 1-based `rank`, found by walking values in order and
/// enumerating each one.
///
/// Returns `None` for rank 0 or when the rank lies past the group of
/// [`ENUMERATION_LIMIT`].
pub fn nth_by_enumeration(rank: u64) -> Option<Numeral> {
    if rank == 0 {
        return None;
    }
    let mut memo = HashMap::new();
    let mut seen = 0u64;
    for value in 0..=ENUMERATION_LIMIT {
        let group = collect(value, &mut memo);
        let size = group.len() as u64;
        if rank <= seen + size {
            let mut numerals = to_numerals(group);
            let index = (rank - seen - 1) as usize;
            return Some(numerals.swap_remove(index));
        }
        seen += size;
    }
    None
}

/// Decimal readings of every numeral of `value`, unsorted.
fn collect(value: u32, memo: &mut HashMap<u32, Vec<u64>>) -> Vec<u64> {
    if value < 2 {
        return vec![value as u64];
    }
    if let Some(known) = memo.get(&value) {
        return known.clone();
    }

    let mut readings = Vec::new();
    let mut least = value % 2;
    while least <= 9 && least <= value {
        let most = (value - least) / 2;
        for prefix in collect(most, memo) {
            // A zero prefix means `least` is the only digit.
            readings.push(prefix * 10 + least as u64);
        }
        least += 2;
    }

    memo.insert(value, readings.clone());
    readings
}

fn to_numerals(mut readings: Vec<u64>) -> Vec<Numeral> {
    readings.sort_unstable();
    readings.into_iter().map(Numeral::from_decimal).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(value: u32) -> Vec<String> {
        numerals_of(value)
            .unwrap()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn small_groups_are_sorted_ascending() {
        assert_eq!(rendered(0), ["0"]);
        assert_eq!(rendered(2), ["2", "10"]);
        assert_eq!(rendered(4), ["4", "12", "20", "100"]);
        assert_eq!(rendered(5), ["5", "13", "21", "101"]);
    }

    #[test]
    fn every_enumerated_numeral_has_the_requested_value() {
        for value in 0..=64 {
            for numeral in numerals_of(value).unwrap() {
                assert_eq!(numeral.value(), value as u64);
            }
        }
    }

    #[test]
    fn nth_walks_across_groups() {
        assert_eq!(nth_by_enumeration(0), None);
        assert_eq!(nth_by_enumeration(1), Some(Numeral::zero()));
        assert_eq!(nth_by_enumeration(4), Some(Numeral::from_decimal(10)));
        assert_eq!(nth_by_enumeration(11), Some(Numeral::from_decimal(5)));
    }

    #[test]
    fn beyond_limit_is_refused() {
        assert!(numerals_of(ENUMERATION_LIMIT + 1).is_none());
        assert!(numerals_of(ENUMERATION_LIMIT).is_some());
    }
}
