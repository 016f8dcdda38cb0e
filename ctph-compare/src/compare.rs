// SPDX-License-Identifier: MIT

//! Block hash pair scoring: prefilter, edit distance scaling and
//! small block size capping.

use alloc::vec::Vec;

use crate::rolling_hash::{RollingHash, ROLLING_WINDOW};

mod edit_distance;

use edit_distance::edit_distance;

/// The maximum length of a block hash in the wire format.
///
/// The raw edit distance is scaled against this constant so that scores
/// stay comparable between producers.  Note that the parser itself does
/// not enforce this length.
pub(crate) const SPAMSUM_LENGTH: u64 = 64;

/// The smallest block size a conforming producer emits; the granularity
/// unit of the small block size score cap.
pub(crate) const MIN_BLOCK_SIZE: u64 = 3;

/// The block size below which scores are capped.
///
/// For block sizes this small, a high edit distance score does not mean
/// much (the signatures cover little data), so the score is capped in
/// proportion to the block size and the shorter block hash.
pub(crate) const BLOCK_SIZE_SMALL_LIMIT: u64 =
    (99 + ROLLING_WINDOW as u64) / ROLLING_WINDOW as u64 * MIN_BLOCK_SIZE;

/// Returns whether `s1` and `s2` share a common substring of
/// [`ROLLING_WINDOW`] bytes.
///
/// The rolling checksum of every window of `s1` is cached in order, then
/// `s2` is scanned with its own rolling state; every checksum hit is
/// confirmed with a byte comparison of the two windows, so checksum
/// collisions cannot produce false positives.
///
/// This is a cheap average-case O(len1 + len2) rejection of pairs that
/// cannot plausibly be similar, performed before the full edit distance.
pub(crate) fn has_common_substring(s1: &[u8], s2: &[u8]) -> bool {
    if s1.len() < ROLLING_WINDOW || s2.len() < ROLLING_WINDOW {
        return false;
    }

    let mut hashes: Vec<u32> = Vec::with_capacity(s1.len() - ROLLING_WINDOW + 1);
    let mut state = RollingHash::new();
    state.update(&s1[..ROLLING_WINDOW - 1]);
    for &ch in &s1[ROLLING_WINDOW - 1..] {
        state.update_by_byte(ch);
        hashes.push(state.value());
    }

    let mut state = RollingHash::new();
    state.update(&s2[..ROLLING_WINDOW - 1]);
    for j in 0..=(s2.len() - ROLLING_WINDOW) {
        state.update_by_byte(s2[j + ROLLING_WINDOW - 1]);
        let h = state.value();
        for (i, &cached) in hashes.iter().enumerate() {
            // A checksum hit is only a candidate; confirm with the bytes.
            if cached == h && s1[i..i + ROLLING_WINDOW] == s2[j..j + ROLLING_WINDOW] {
                return true;
            }
        }
    }
    false
}

/// Scales a raw edit distance to a `0..=100` score (familiar to humans).
///
/// `100` means a perfect match; the smaller the score, the lower the
/// similarity.  Both lengths must be at least [`ROLLING_WINDOW`]
/// (guaranteed by the prefilter), which keeps the divisor non-zero.
fn raw_score_by_edit_distance(len1: u64, len2: u64, dist: u64) -> u64 {
    debug_assert!(len1 >= ROLLING_WINDOW as u64);
    debug_assert!(len2 >= ROLLING_WINDOW as u64);
    debug_assert!(dist <= len1 + len2);
    let scaled = dist * SPAMSUM_LENGTH / (len1 + len2);
    let pct = 100 * scaled / SPAMSUM_LENGTH;
    100 - pct
}

/// Returns the score cap for a small block size comparison.
///
/// The cap gets higher as the block size and the shorter block hash get
/// longer; scores above it exaggerate how much data actually matched.
fn score_cap_on_block_hash_comparison(block_size: u64, len1: u64, len2: u64) -> u64 {
    debug_assert!(block_size < BLOCK_SIZE_SMALL_LIMIT);
    block_size * u64::min(len1, len2) / MIN_BLOCK_SIZE
}

/// Scores a pair of block hashes sampled at the same effective
/// block size.
///
/// Returns `0` when the pair shares no common substring of
/// [`ROLLING_WINDOW`] bytes; otherwise the edit distance based score,
/// capped when `block_size` is below [`BLOCK_SIZE_SMALL_LIMIT`].
pub(crate) fn score_strings(s1: &[u8], s2: &[u8], block_size: u64) -> u32 {
    if !has_common_substring(s1, s2) {
        return 0;
    }
    let len1 = s1.len() as u64;
    let len2 = s2.len() as u64;
    let dist = edit_distance(s1, s2) as u64;
    let score = raw_score_by_edit_distance(len1, len2, dist);
    if block_size >= BLOCK_SIZE_SMALL_LIMIT {
        return score as u32;
    }
    let cap = score_cap_on_block_hash_comparison(block_size, len1, len2);
    u64::min(score, cap) as u32
}
