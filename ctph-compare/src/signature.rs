// SPDX-License-Identifier: MIT

//! Parsed fuzzy hash signatures and block size relations.

use alloc::vec::Vec;
use core::num::ParseIntError;
use core::str::FromStr;

use crate::compare::score_strings;
use crate::macros::impl_error;

/// The field separator of the signature text format.
const SEPARATOR: u8 = b':';

/// The maximum length of a run of identical characters a normalized
/// block hash may contain.
///
/// Longer runs are truncated to this length while parsing.  Runs beyond
/// this length carry no discriminative signal and would otherwise bias
/// the edit distance.
pub(crate) const MAX_SEQUENCE_SIZE: usize = 2;

/// The error type for parse operations of [`Signature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The signature string is empty.
    EmptyInput,
    /// The signature does not follow the `blocksize:hash1:hash2` format
    /// (wrong field count, or a block size field that is not a valid
    /// base-10 non-negative integer).
    ///
    /// When the block size field failed to parse as an integer, the
    /// failure detail is carried here and surfaced through
    /// [`Error::source()`](std::error::Error::source).
    InvalidFormat(Option<ParseIntError>),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ParseError::EmptyInput => "empty string",
            ParseError::InvalidFormat(_) => "invalid ssdeep format",
        })
    }
}

impl_error! { ParseError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ParseError::InvalidFormat(Some(err)) => Some(err),
            _ => None,
        }
    }
} }

/// An enumeration representing the relation between block sizes of
/// two signatures.
///
/// Scoring is only meaningful between block hashes sampled at the same
/// resolution.  Since valid producers double the block size per step,
/// two signatures are comparable only when their block sizes are equal
/// or exactly a factor of two apart; everything else is
/// [`Far`](Self::Far) and scores zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSizeRelation {
    /// The block sizes are equal.
    NearEq,
    /// The left hand side has half the block size of the right hand side.
    NearLt,
    /// The left hand side has double the block size of the right hand side.
    NearGt,
    /// The block sizes are neither equal nor a factor of two apart;
    /// the signatures are not comparable.
    Far,
}

impl BlockSizeRelation {
    /// Returns whether this relation permits a comparison.
    pub fn is_near(&self) -> bool {
        !matches!(self, BlockSizeRelation::Far)
    }
}

/// A state after scanning one block hash field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockHashScanState {
    /// The end of the string is encountered.
    MetEndOfString,
    /// The field separator (`:`) is encountered.
    MetSeparator,
}

/// Scans one block hash field of `bytes` starting at `*pos`, appending
/// the normalized contents to `out`.
///
/// Runs of an identical byte longer than [`MAX_SEQUENCE_SIZE`] are
/// truncated to [`MAX_SEQUENCE_SIZE`].  `*pos` is left one past the
/// separator (or at the end of the string) so that scanning can
/// continue.
fn scan_block_hash(bytes: &[u8], pos: &mut usize, out: &mut Vec<u8>) -> BlockHashScanState {
    let mut seq: usize = 0;
    // SEPARATOR cannot occur inside a field, so it is a safe sentinel.
    let mut prev = SEPARATOR;
    while *pos < bytes.len() {
        let curr = bytes[*pos];
        *pos += 1;
        if curr == SEPARATOR {
            return BlockHashScanState::MetSeparator;
        }
        if curr == prev {
            seq += 1;
            if seq < MAX_SEQUENCE_SIZE {
                out.push(curr);
            }
        } else {
            out.push(curr);
            seq = 0;
            prev = curr;
        }
    }
    BlockHashScanState::MetEndOfString
}

/// A parsed and normalized fuzzy hash signature.
///
/// The textual form is `blocksize:hash1:hash2`: a base-10 non-negative
/// block size and two block hashes, where each character of the first
/// block hash covers `blocksize` bytes of the original input and each
/// character of the second covers twice that.
///
/// Parsing normalizes both block hashes by truncating runs of identical
/// characters longer than two; the stored form is therefore not always
/// the input form.
///
/// # Example
///
/// ```
/// use ctph::Signature;
///
/// let sig: Signature = "3:ABCDEFGHIJKLMN:OPQRSTUV".parse().unwrap();
/// assert_eq!(sig.block_size(), 3);
/// assert_eq!(sig.compare(&sig), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    /// The block size.
    block_size: u32,
    /// The normalized block hash 1 (each character covers
    /// [`block_size`](Self::block_size) bytes of the original input).
    block_hash_1: Vec<u8>,
    /// The normalized block hash 2 (each character covers
    /// `block_size * 2` bytes of the original input).
    block_hash_2: Vec<u8>,
}

impl Signature {
    /// Returns the block size.
    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Returns the normalized block hash 1.
    pub fn block_hash_1(&self) -> &[u8] {
        &self.block_hash_1
    }

    /// Returns the normalized block hash 2.
    pub fn block_hash_2(&self) -> &[u8] {
        &self.block_hash_2
    }

    /// Compares the block sizes of `self` and `other`.
    pub fn block_size_relation(&self, other: &Signature) -> BlockSizeRelation {
        let lhs = self.block_size as u64;
        let rhs = other.block_size as u64;
        if lhs == rhs {
            BlockSizeRelation::NearEq
        } else if lhs == rhs * 2 {
            BlockSizeRelation::NearGt
        } else if lhs * 2 == rhs {
            BlockSizeRelation::NearLt
        } else {
            BlockSizeRelation::Far
        }
    }

    /// Compares two signatures and returns the similarity score
    /// (`0..=100`).
    ///
    /// Equal signatures score `100`.  Signatures with
    /// [incomparable block sizes](BlockSizeRelation::Far) score `0`;
    /// "not comparable" is deliberately not an error.  Otherwise the
    /// block hashes sampled at the matching resolution are scored by
    /// edit distance, behind a common substring prefilter.
    ///
    /// The result value is commutative.
    pub fn compare(&self, other: &Signature) -> u32 {
        if self.block_size == other.block_size
            && self.block_hash_1 == other.block_hash_1
            && self.block_hash_2 == other.block_hash_2
        {
            return 100;
        }
        // The relation already restricts the dispatch below to
        // {equal, double, half}; each arm pairs the two block hashes
        // sampled at the same resolution.
        match self.block_size_relation(other) {
            BlockSizeRelation::NearEq => u32::max(
                score_strings(
                    &self.block_hash_1,
                    &other.block_hash_1,
                    self.block_size as u64,
                ),
                score_strings(
                    &self.block_hash_2,
                    &other.block_hash_2,
                    self.block_size as u64 * 2,
                ),
            ),
            BlockSizeRelation::NearGt => score_strings(
                &self.block_hash_1,
                &other.block_hash_2,
                other.block_size as u64,
            ),
            BlockSizeRelation::NearLt => score_strings(
                &self.block_hash_2,
                &other.block_hash_1,
                self.block_size as u64,
            ),
            BlockSizeRelation::Far => 0,
        }
    }
}

impl FromStr for Signature {
    type Err = ParseError;

    /// Parses and normalizes a signature from its textual form.
    ///
    /// The input is scanned once, left to right.  The block size field
    /// is parsed as a base-10 `u32` (any failure there, including an
    /// empty field or overflow, is an
    /// [invalid format](ParseError::InvalidFormat) carrying the integer
    /// parse detail).  Both block hash fields are copied with run
    /// truncation; a missing second separator or an extra separator in
    /// the final field is an invalid format.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let bytes = s.as_bytes();
        let sep = match bytes.iter().position(|&ch| ch == SEPARATOR) {
            Some(i) => i,
            None => return Err(ParseError::InvalidFormat(None)),
        };
        // `sep` indexes an ASCII byte, so slicing the str is safe.
        let block_size: u32 = s[..sep]
            .parse()
            .map_err(|err| ParseError::InvalidFormat(Some(err)))?;

        let mut pos = sep + 1;
        let mut block_hash_1 = Vec::with_capacity(bytes.len() - pos);
        match scan_block_hash(bytes, &mut pos, &mut block_hash_1) {
            BlockHashScanState::MetSeparator => {}
            BlockHashScanState::MetEndOfString => {
                return Err(ParseError::InvalidFormat(None));
            }
        }
        let mut block_hash_2 = Vec::with_capacity(bytes.len() - pos);
        match scan_block_hash(bytes, &mut pos, &mut block_hash_2) {
            BlockHashScanState::MetEndOfString => {}
            // A third separator means too many fields.
            BlockHashScanState::MetSeparator => {
                return Err(ParseError::InvalidFormat(None));
            }
        }
        Ok(Signature {
            block_size,
            block_hash_1,
            block_hash_2,
        })
    }
}
