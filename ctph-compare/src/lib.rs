// SPDX-License-Identifier: MIT

//! Comparison of ssdeep-compatible fuzzy hash signatures.
//!
//! This crate compares two Context Triggered Piecewise Hash (CTPH)
//! signatures in the established `blocksize:hash1:hash2` text format and
//! returns a similarity score in the range `0..=100`.  It does not
//! generate signatures from raw data; it only consumes signature strings
//! produced elsewhere.
//!
//! The comparison pipeline is the classic spamsum one:
//!
//! 1.  Both signatures are parsed and normalized (runs of an identical
//!     character longer than two are truncated; longer runs carry no
//!     discriminative signal and would bias the edit distance).
//! 2.  A rolling-hash prefilter rejects block hash pairs that share no
//!     common substring of [`ROLLING_WINDOW`](internal_hashes::RollingHash::WINDOW_SIZE)
//!     characters.
//! 3.  Pairs that survive the prefilter are scored by Levenshtein edit
//!     distance, scaled to `0..=100` and capped for small block sizes so
//!     that short signatures cannot exaggerate a match.
//!
//! Two well-formed signatures whose block sizes are neither equal nor
//! exactly a factor of two apart are defined as *not comparable* and
//! score `0`.  This is not an error condition; do not mistake it for
//! "identical content" (score `100`) or for invalid input (an [`Err`]).
//!
//! # Example
//!
//! ```
//! assert_eq!(
//!     ctph::compare(
//!         "3:ABCDEFGHIJKLMN:OPQRSTUV",
//!         "3:ABCDEFGHIJKLMNX:OPQRSTUV"
//!     ).unwrap(),
//!     16
//! );
//! ```

// no_std (the parser and the prefilter require alloc)
#![cfg_attr(not(any(test, doc, feature = "std")), no_std)]
// Non-test code requires documents
#![cfg_attr(not(test), warn(missing_docs))]
#![cfg_attr(not(test), warn(clippy::missing_docs_in_private_items))]

extern crate alloc;

mod compare;
mod compare_easy;
mod macros;
mod rolling_hash;
mod signature;
mod test_utils;

pub use compare_easy::{compare, ParseErrorEither, ParseErrorSide};
pub use signature::{BlockSizeRelation, ParseError, Signature};

/// Module containing internal hash functions.
pub mod internal_hashes {
    pub use super::rolling_hash::RollingHash;
}

/// Constant assertions related to the base requirements.
#[doc(hidden)]
mod const_asserts {
    use static_assertions::const_assert;

    use super::compare::{BLOCK_SIZE_SMALL_LIMIT, MIN_BLOCK_SIZE, SPAMSUM_LENGTH};
    use super::rolling_hash::ROLLING_WINDOW;

    // We expect that usize is at least 16 bits in width.
    const_assert!(usize::BITS >= 16);

    // The prefilter window must fit in a full-length block hash,
    // otherwise no pair could ever be scored.
    const_assert!((ROLLING_WINDOW as u64) <= SPAMSUM_LENGTH);

    // At the first uncapped block size, the would-be cap of the shortest
    // scorable pair already reaches the maximum score.  Raising the limit
    // without revisiting the cap formula breaks this.
    const_assert!(
        BLOCK_SIZE_SMALL_LIMIT * (ROLLING_WINDOW as u64) / MIN_BLOCK_SIZE >= 100
    );
}
