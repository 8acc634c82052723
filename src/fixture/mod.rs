//! Plain-text fixtures of rank queries and expected numerals.
//!
//! Query files start with a count line followed by that many ranks, one per
//! line. Expected-output files hold one numeral per line with no count line.
//! Blank lines are ignored in both.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::numeral::Numeral;

/// Errors raised while reading or writing fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Underlying I/O failure.
    #[error("fixture I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed.
    #[error("line {line}: cannot parse '{text}': {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending text (trimmed).
        text: String,
        /// Parser message.
        reason: String,
    },

    /// A counted fixture had no count line.
    #[error("fixture is empty: expected a count line")]
    MissingCount,

    /// The count line disagrees with the entries that follow.
    #[error("fixture declares {declared} entries but contains {found}")]
    CountMismatch {
        /// Count from the first line.
        declared: usize,
        /// Entries actually present.
        found: usize,
    },
}

/// Read a count line followed by exactly that many entries.
pub fn read_counted<R, T>(reader: R) -> Result<Vec<T>, FixtureError>
where
    R: BufRead,
    T: FromStr,
    T::Err: Display,
{
    let mut lines = non_blank_lines(reader);
    let (line, text) = lines.next().ok_or(FixtureError::MissingCount)??;
    let declared: usize = parse_line(line, &text)?;

    // The count line is untrusted; grow from what is actually present.
    let mut entries = Vec::new();
    for entry in lines {
        let (line, text) = entry?;
        entries.push(parse_line(line, &text)?);
    }

    if entries.len() != declared {
        return Err(FixtureError::CountMismatch {
            declared,
            found: entries.len(),
        });
    }
    Ok(entries)
}

/// Read one entry per line.
pub fn read_values<R, T>(reader: R) -> Result<Vec<T>, FixtureError>
where
    R: BufRead,
    T: FromStr,
    T::Err: Display,
{
    non_blank_lines(reader)
        .map(|entry| {
            let (line, text) = entry?;
            parse_line(line, &text)
        })
        .collect()
}

/// Write numerals one per line.
pub fn write_numerals<W: Write>(writer: &mut W, numerals: &[Numeral]) -> Result<(), FixtureError> {
    for numeral in numerals {
        writeln!(writer, "{numeral}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write ranks in the counted query format.
pub fn write_counted<W: Write>(writer: &mut W, ranks: &[i64]) -> Result<(), FixtureError> {
    writeln!(writer, "{}", ranks.len())?;
    for rank in ranks {
        writeln!(writer, "{rank}")?;
    }
    writer.flush()?;
    Ok(())
}

fn non_blank_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), FixtureError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(text) if text.trim().is_empty() => None,
            Ok(text) => Some(Ok((idx + 1, text.trim().to_string()))),
            Err(err) => Some(Err(FixtureError::Io(err))),
        })
}

fn parse_line<T>(line: usize, text: &str) -> Result<T, FixtureError>
where
    T: FromStr,
    T::Err: Display,
{
    text.parse().map_err(|err: T::Err| FixtureError::Parse {
        line,
        text: text.to_string(),
        reason: err.to_string(),
    })
}
