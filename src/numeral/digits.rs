use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Longest numeral accepted by [`Numeral`].
///
/// The maximal numeral of any `u32` value has at most 32 digits, and a 32-digit
/// numeral is worth less than `10·2^32`, so values always fit in a `u64`.
pub const MAX_NUMERAL_DIGITS: usize = 32;

/// Errors that can occur while constructing or serialising a numeral.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NumeralError {
    /// A digit outside `0..=9` was supplied.
    #[error("invalid decibinary digit '{digit}' at position {position}")]
    InvalidDigit {
        /// Offending digit (or character code when parsed from text).
        digit: u32,
        /// Position of the digit, most significant first.
        position: usize,
    },

    /// No digits were supplied.
    #[error("numeral must contain at least one digit")]
    Empty,

    /// The numeral has more significant digits than [`MAX_NUMERAL_DIGITS`].
    #[error("numeral has {0} digits; at most {max} are supported", max = MAX_NUMERAL_DIGITS)]
    TooLong(usize),

    /// The decimal reading of the numeral does not fit in a `u64`.
    #[error("numeral {0} does not fit in a decimal u64")]
    DecimalOverflow(String),
}

/// A decibinary numeral, stored most significant digit first.
///
/// Leading zeros are never stored: the zero numeral is the single digit `0`
/// and every other numeral starts with a non-zero digit.
///
/// Numerals order by their decimal reading, which is the order used within a
/// value's group of numerals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Numeral {
    digits: Vec<u8>,
}

impl Numeral {
    /// The zero numeral `0`.
    pub fn zero() -> Self {
        Self { digits: vec![0] }
    }

    /// Build a numeral from digits, most significant first.
    ///
    /// Leading zeros are stripped; an all-zero slice yields [`Numeral::zero`].
    pub fn from_digits(digits: &[u8]) -> Result<Self, NumeralError> {
        if digits.is_empty() {
            return Err(NumeralError::Empty);
        }
        if let Some((position, &digit)) = digits.iter().enumerate().find(|(_, d)| **d > 9) {
            return Err(NumeralError::InvalidDigit {
                digit: digit as u32,
                position,
            });
        }

        let first = digits.iter().position(|&d| d != 0);
        let significant = match first {
            Some(start) => &digits[start..],
            None => return Ok(Self::zero()),
        };
        if significant.len() > MAX_NUMERAL_DIGITS {
            return Err(NumeralError::TooLong(significant.len()));
        }

        Ok(Self {
            digits: significant.to_vec(),
        })
    }

    /// Split a decimal-looking integer into its digits (`0` maps to `[0]`).
    pub fn from_decimal(decimal: u64) -> Self {
        if decimal == 0 {
            return Self::zero();
        }
        // 20 covers u64::MAX.
        let mut digits = Vec::with_capacity(20);
        let mut rest = decimal;
        while rest > 0 {
            digits.push((rest % 10) as u8);
            rest /= 10;
        }
        digits.reverse();
        Self { digits }
    }

    /// Numeral with the most digits for `value`: its binary expansion.
    ///
    /// This is also the numeral with the greatest decimal reading.
    pub fn maximal(value: u32) -> Self {
        if value == 0 {
            return Self::zero();
        }
        let bits = u32::BITS - value.leading_zeros();
        let digits = (0..bits)
            .rev()
            .map(|bit| ((value >> bit) & 1) as u8)
            .collect();
        Self { digits }
    }

    /// Numeral with the fewest digits for `value`.
    ///
    /// Works from the least significant digit upward, taking the remainder
    /// itself once it drops below ten and otherwise the largest digit of the
    /// right parity (8 or 9).
    pub fn minimal(value: u32) -> Self {
        if value == 0 {
            return Self::zero();
        }
        let mut digits = Vec::new();
        let mut remaining = value;
        while remaining > 0 {
            let digit = if remaining < 10 {
                remaining
            } else if remaining % 2 == 0 {
                8
            } else {
                9
            };
            digits.push(digit as u8);
            remaining = (remaining - digit) / 2;
        }
        digits.reverse();
        Self { digits }
    }

    /// The integer this numeral evaluates to (`Σ digit[i]·2^(len-1-i)`).
    pub fn value(&self) -> u64 {
        self.digits
            .iter()
            .fold(0u64, |acc, &digit| acc * 2 + digit as u64)
    }

    /// Decimal reading of the numeral, e.g. `[2, 1]` becomes `21`.
    pub fn to_decimal(&self) -> Result<u64, NumeralError> {
        self.digits
            .iter()
            .try_fold(0u64, |acc, &digit| {
                acc.checked_mul(10)?.checked_add(digit as u64)
            })
            .ok_or_else(|| NumeralError::DecimalOverflow(self.to_string()))
    }

    /// Digits, most significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Number of digits (at least one).
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always `false`; a numeral has at least one digit.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl Ord for Numeral {
    fn cmp(&self, other: &Self) -> Ordering {
        // No leading zeros, so a longer numeral is always the larger one.
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for Numeral {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &digit in &self.digits {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Numeral {
    type Err = NumeralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                ch.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(NumeralError::InvalidDigit {
                        digit: ch as u32,
                        position,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_digits(&digits)
    }
}

/// Value of a decimal-looking integer read as a decibinary numeral.
///
/// Equivalent to `Numeral::from_decimal(decimal).value()` without allocating.
pub fn decimal_value(decimal: u64) -> u64 {
    let mut rest = decimal;
    let mut place = 1u64;
    let mut value = 0u64;
    while rest > 0 {
        value += place * (rest % 10);
        rest /= 10;
        place <<= 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximal_uses_binary_digits() {
        assert_eq!(Numeral::maximal(0).to_string(), "0");
        assert_eq!(Numeral::maximal(1).to_string(), "1");
        assert_eq!(Numeral::maximal(4).to_string(), "100");
        assert_eq!(Numeral::maximal(13).to_string(), "1101");
    }

    #[test]
    fn minimal_prefers_large_low_digits() {
        assert_eq!(Numeral::minimal(0).to_string(), "0");
        assert_eq!(Numeral::minimal(9).to_string(), "9");
        // 10 -> low digit 8, remaining 1
        assert_eq!(Numeral::minimal(10).to_string(), "18");
        // 21 -> 9, then 6
        assert_eq!(Numeral::minimal(21).to_string(), "69");
        assert_eq!(Numeral::minimal(21).value(), 21);
    }

    #[test]
    fn decimal_roundtrip_keeps_zero_as_single_digit() {
        assert_eq!(Numeral::from_decimal(0).digits(), &[0]);
        assert_eq!(Numeral::from_decimal(1020).digits(), &[1, 0, 2, 0]);
        assert_eq!(Numeral::from_decimal(1020).to_decimal(), Ok(1020));
        assert_eq!(Numeral::from_decimal(u64::MAX).to_decimal(), Ok(u64::MAX));
    }

    #[test]
    fn from_digits_strips_leading_zeros() {
        let numeral = Numeral::from_digits(&[0, 0, 2, 0]).unwrap();
        assert_eq!(numeral.digits(), &[2, 0]);
        assert_eq!(Numeral::from_digits(&[0, 0]).unwrap(), Numeral::zero());
    }

    #[test]
    fn from_digits_rejects_bad_input() {
        assert_eq!(Numeral::from_digits(&[]), Err(NumeralError::Empty));
        assert_eq!(
            Numeral::from_digits(&[1, 10]),
            Err(NumeralError::InvalidDigit {
                digit: 10,
                position: 1
            })
        );
        assert_eq!(
            Numeral::from_digits(&[1; 33]),
            Err(NumeralError::TooLong(33))
        );
    }

    #[test]
    fn parse_and_display() {
        let numeral: Numeral = "2101".parse().unwrap();
        assert_eq!(numeral.value(), 2 * 8 + 4 + 1);
        assert_eq!(numeral.to_string(), "2101");
        assert!(matches!(
            "21a".parse::<Numeral>(),
            Err(NumeralError::InvalidDigit { position: 2, .. })
        ));
    }

    #[test]
    fn decimal_value_matches_numeral_value() {
        for decimal in [0u64, 1, 2, 10, 21, 999, 5124105853195114] {
            assert_eq!(
                decimal_value(decimal),
                Numeral::from_decimal(decimal).value()
            );
        }
    }

    #[test]
    fn overlong_decimal_reading_is_an_error() {
        let numeral = Numeral::from_digits(&[9; 21]).unwrap();
        assert!(matches!(
            numeral.to_decimal(),
            Err(NumeralError::DecimalOverflow(_))
        ));
    }

    #[test]
    fn ordering_follows_decimal_reading() {
        let mut numerals: Vec<Numeral> = [101u64, 5, 21, 13]
            .into_iter()
            .map(Numeral::from_decimal)
            .collect();
        numerals.sort();
        let sorted: Vec<String> = numerals.iter().map(|n| n.to_string()).collect();
        assert_eq!(sorted, ["5", "13", "21", "101"]);
    }
}
