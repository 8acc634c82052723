use crate::tables::MAX_DIGITS;

/// Raised when a carry runs off the least significant digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct CarryOverflow {
    /// Excess that could not be placed.
    pub excess: u32,
}

/// Fixed-capacity digit workspace used while descending from the maximal
/// numeral.
///
/// Digits live in `digits[start..end]`, most significant first. Dropping the
/// leading digit only moves `start`. Digits are `u32` because a carry may
/// briefly push a digit past 9 before it is settled.
#[derive(Debug, Clone)]
pub(super) struct DigitBuffer {
    digits: [u32; MAX_DIGITS],
    start: usize,
    end: usize,
}

impl DigitBuffer {
    /// Load the binary expansion of `value`, the maximal numeral.
    pub fn maximal(value: u32) -> Self {
        let mut digits = [0u32; MAX_DIGITS];
        let bits = (u32::BITS - value.leading_zeros()) as usize;
        let len = bits.max(1);
        debug_assert!(len <= MAX_DIGITS, "value {value} has too many digits");

        for (idx, slot) in digits[..len].iter_mut().enumerate() {
            let bit = len - 1 - idx;
            *slot = (value >> bit) & 1;
        }
        Self {
            digits,
            start: 0,
            end: len,
        }
    }

    /// Digits still in play.
    pub fn remaining(&self) -> usize {
        self.end - self.start
    }

    /// Most significant digit not yet emitted.
    pub fn leading(&self) -> u32 {
        self.digits[self.start]
    }

    /// Value of every digit after the leading one.
    pub fn suffix_value(&self) -> u32 {
        self.digits[self.start + 1..self.end]
            .iter()
            .fold(0u32, |acc, &digit| acc * 2 + digit)
    }

    /// Remove and return the leading digit.
    pub fn advance(&mut self) -> u8 {
        let digit = self.digits[self.start];
        debug_assert!(digit <= 9);
        self.start += 1;
        digit as u8
    }

    /// Move one unit of the leading digit into the next position as two units,
    /// then settle carries.
    ///
    /// A digit above 9 keeps 9 and passes its excess, doubled, to its right
    /// neighbour. On success every digit in play is at most 9.
    pub fn roll(&mut self) -> Result<(), CarryOverflow> {
        debug_assert!(self.remaining() > 1 && self.leading() > 0);
        self.digits[self.start] -= 1;
        self.digits[self.start + 1] += 2;

        for idx in self.start + 1..self.end {
            let digit = self.digits[idx];
            if digit <= 9 {
                return Ok(());
            }
            let excess = digit - 9;
            self.digits[idx] = 9;
            if idx + 1 == self.end {
                return Err(CarryOverflow { excess });
            }
            self.digits[idx + 1] += 2 * excess;
        }
        Ok(())
    }
}
