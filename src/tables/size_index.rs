//! Numeral counts broken down by digit length.
//!
//! For a value `v` the lengths of its numerals form a short contiguous range,
//! from the minimal numeral's length up to the bit length of `v`. Each range
//! is stored as a slice of one flat entry array, addressed through per-slot
//! offsets, so a lookup is two array reads.

use super::config::MAX_DIGITS;

/// Scratch width used while merging prefix histograms.
const SCRATCH_LEN: usize = MAX_DIGITS + 2;

/// Per-length numeral counts for value 1 and every even value.
///
/// Odd values above 1 share the histogram of their even predecessor: raising
/// the last digit by one maps the numerals of `v - 1` onto those of `v`
/// without changing any length. Value 0 is not stored; its only numeral is
/// `0`, which fits any positive digit budget.
#[derive(Debug, Clone)]
pub struct SizeIndex {
    /// Values `0..covered` are answered; anything above returns `None`.
    covered: u32,
    /// Shortest stored length for each slot.
    shortest: Vec<u8>,
    /// Slot `s` owns `entries[offsets[s]..offsets[s + 1]]`.
    offsets: Vec<u32>,
    entries: Vec<u64>,
}

impl SizeIndex {
    /// Index for values `0..covered`, holding only the histogram for value 1
    /// (a single 1-digit numeral) until the even values are pushed.
    pub(super) fn seeded(covered: usize) -> Self {
        let even_values = covered / 2;
        let mut index = Self {
            covered: covered as u32,
            shortest: Vec::with_capacity(even_values + 1),
            offsets: Vec::with_capacity(even_values + 2),
            entries: Vec::with_capacity(even_values * 4),
        };
        index.offsets.push(0);
        index.push_histogram(1, &[1]);
        index
    }

    /// Record the histogram of the next even value.
    ///
    /// Lengths are produced by every choice of least significant digit: a zero
    /// remainder makes `least` the whole numeral, otherwise each numeral of
    /// the remainder gains one trailing digit.
    pub(super) fn push_even(&mut self, value: u32) {
        debug_assert_eq!(value % 2, 0);
        debug_assert_eq!(self.slots(), slot(value));

        let mut scratch = [0u64; SCRATCH_LEN];
        let mut least = 0;
        while least <= 9 && least <= value {
            let most = (value - least) >> 1;
            if most == 0 {
                scratch[1] += 1;
            } else {
                let (shortest, counts) = self.stored(most);
                for (offset, &count) in counts.iter().enumerate() {
                    scratch[shortest + offset + 1] += count;
                }
            }
            least += 2;
        }

        let first = scratch.iter().position(|&c| c != 0).unwrap_or(1);
        let last = scratch.iter().rposition(|&c| c != 0).unwrap_or(first);
        self.push_histogram(first, &scratch[first..=last]);
    }

    /// Number of values covered, `0..covered`.
    pub fn covered(&self) -> u32 {
        self.covered
    }

    /// `(shortest length, counts by length)` for a non-zero value, or `None`
    /// for zero and for values past the index.
    pub fn histogram(&self, value: u32) -> Option<(usize, &[u64])> {
        if value == 0 || value >= self.covered {
            return None;
        }
        Some(self.stored(value))
    }

    /// Number of numerals of `value` with exactly `len` digits, or `None`
    /// past the index.
    pub fn count_by_size(&self, value: u32, len: usize) -> Option<u64> {
        if value == 0 {
            return Some(u64::from(len == 1));
        }
        let (shortest, counts) = self.histogram(value)?;
        Some(
            len.checked_sub(shortest)
                .and_then(|offset| counts.get(offset))
                .copied()
                .unwrap_or(0),
        )
    }

    /// Number of numerals of `value` with at most `max_len` digits, or `None`
    /// past the index.
    ///
    /// Equivalently, the number of ways to fill `max_len` digit positions
    /// (leading zeros allowed) so that they evaluate to `value`.
    pub fn count_up_to(&self, value: u32, max_len: usize) -> Option<u64> {
        if value == 0 {
            return Some(1);
        }
        let (shortest, counts) = self.histogram(value)?;
        if max_len < shortest {
            return Some(0);
        }
        let take = (max_len - shortest + 1).min(counts.len());
        Some(counts[..take].iter().sum())
    }

    /// Length of the shortest numeral of `value`, or `None` past the index.
    pub fn shortest_len(&self, value: u32) -> Option<usize> {
        if value == 0 {
            return Some(1);
        }
        self.histogram(value).map(|(shortest, _)| shortest)
    }

    /// Histogram lookup for a stored non-zero value.
    fn stored(&self, value: u32) -> (usize, &[u64]) {
        let slot = slot(canonical(value));
        let start = self.offsets[slot] as usize;
        let end = self.offsets[slot + 1] as usize;
        (self.shortest[slot] as usize, &self.entries[start..end])
    }

    fn push_histogram(&mut self, shortest: usize, counts: &[u64]) {
        self.shortest.push(shortest as u8);
        self.entries.extend_from_slice(counts);
        self.offsets.push(self.entries.len() as u32);
    }

    fn slots(&self) -> usize {
        self.shortest.len()
    }
}

/// Odd values above 1 share the histogram of `value - 1`.
fn canonical(value: u32) -> u32 {
    if value > 1 && value % 2 == 1 {
        value - 1
    } else {
        value
    }
}

/// Slot 0 holds value 1 (value 0 is never stored); even values follow.
fn slot(canonical_value: u32) -> usize {
    if canonical_value == 1 {
        0
    } else {
        (canonical_value / 2) as usize
    }
}
