// SPDX-License-Identifier: MIT

//! Levenshtein edit distance between two block hashes.

use alloc::vec;
use alloc::vec::Vec;

/// Computes the Levenshtein distance between two byte strings.
///
/// This is the minimum number of single-character insertions, deletions
/// and substitutions (unit cost each) transforming `s1` into `s2`.  The
/// result value is symmetric in its arguments.
///
/// Uses two rows instead of the full matrix, so the space cost is
/// O(len2) while the time cost stays O(len1 * len2).
pub(crate) fn edit_distance(s1: &[u8], s2: &[u8]) -> usize {
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let mut prev: Vec<usize> = (0..=s2.len()).collect();
    let mut curr: Vec<usize> = vec![0; s2.len() + 1];

    for (i, &c1) in s1.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &c2) in s2.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr[j + 1] = usize::min(
                usize::min(
                    prev[j + 1] + 1, // deletion
                    curr[j] + 1,     // insertion
                ),
                prev[j] + cost, // substitution
            );
        }
        core::mem::swap(&mut prev, &mut curr);
    }
    prev[s2.len()]
}
