//! Decibinary numerals and conversions between numerals and their values.
//!
//! A decibinary numeral is written with decimal digits but evaluated with
//! powers of two as place values, so `21` is worth `2·2 + 1 = 5`. Several
//! numerals share each value; this module converts between the two views and
//! provides a brute-force enumeration used to cross-check the rank tables.

mod digits;
mod enumerate;

pub use digits::{decimal_value, Numeral, NumeralError, MAX_NUMERAL_DIGITS};
pub use enumerate::{nth_by_enumeration, numerals_of, ENUMERATION_LIMIT};
