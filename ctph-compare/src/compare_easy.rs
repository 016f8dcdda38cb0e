// SPDX-License-Identifier: MIT

//! The easy string-level comparison function.

use crate::macros::impl_error;
use crate::signature::{ParseError, Signature};

#[cfg(test)]
mod tests;

/// The operand (side) which caused a parse error.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorSide {
    /// The left hand side.
    Left,
    /// The right hand side.
    Right,
}

/// The error type representing a parse error for one of the operands
/// specified to the [`compare()`] function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorEither(ParseErrorSide, ParseError);

impl ParseErrorEither {
    /// Returns which operand caused a parse error.
    pub fn side(&self) -> ParseErrorSide {
        self.0
    }

    /// Returns the parse error of the failing operand.
    pub fn inner(&self) -> &ParseError {
        &self.1
    }
}

impl core::fmt::Display for ParseErrorEither {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "error occurred while parsing fuzzy hash {}: {}",
            match self.side() {
                ParseErrorSide::Left => 1,
                ParseErrorSide::Right => 2,
            },
            self.inner()
        )
    }
}

impl_error! { ParseErrorEither {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.1)
    }
} }

/// Compares two fuzzy hash signatures.
///
/// If a parse error occurs, [`Err`] containing
/// [a parse error](ParseErrorEither) is returned; the left hand side is
/// parsed (and reported) first.  Otherwise, [`Ok`] containing the
/// similarity score (`0..=100`) is returned.
///
/// A score of zero means the signatures did not match; this includes two
/// well-formed signatures whose
/// [block sizes are not comparable](crate::BlockSizeRelation::Far).
///
/// This function is pure: it holds no state across calls and is safe to
/// invoke concurrently from multiple threads.
///
/// # Example
///
/// ```
/// assert_eq!(
///     ctph::compare(
///         "3:ABCDEFGHIJKLMN:OPQRSTUV",
///         "3:ABCDEFGHIJKLMNX:OPQRSTUV"
///     ).unwrap(),
///     16
/// );
/// ```
pub fn compare(lhs: &str, rhs: &str) -> Result<u32, ParseErrorEither> {
    let lhs: Signature = match str::parse(lhs) {
        Ok(value) => value,
        Err(err) => {
            return Err(ParseErrorEither(ParseErrorSide::Left, err));
        }
    };
    let rhs: Signature = match str::parse(rhs) {
        Ok(value) => value,
        Err(err) => {
            return Err(ParseErrorEither(ParseErrorSide::Right, err));
        }
    };
    Ok(lhs.compare(&rhs))
}
