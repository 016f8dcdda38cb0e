// SPDX-License-Identifier: GPL-2.0-or-later

//! A 32-bit rolling hash as used in the common substring prefilter.

/// See [`RollingHash::WINDOW_SIZE`].
pub const ROLLING_WINDOW: usize = 7;

/// Hasher which computes a variant of 32-bit rolling hash as used in
/// ssdeep.
///
/// During comparison, this hash is used to cheaply enumerate all
/// [`WINDOW_SIZE`](Self::WINDOW_SIZE)-character windows of a block hash
/// so that pairs sharing no common window can be rejected without
/// computing an edit distance.
///
/// There is no finalization; [`value()`](Self::value) may be read after
/// every update.  The state is a small plain value, created fresh for
/// each prefilter invocation and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingHash {
    /// Current rolling window index.
    index: u32,

    /// Hash component 1.
    ///
    /// The sum of the last [`WINDOW_SIZE`](Self::WINDOW_SIZE) bytes.
    h1: u32,

    /// Hash component 2.
    ///
    /// The weighted sum of the last [`WINDOW_SIZE`](Self::WINDOW_SIZE)
    /// bytes (the latest byte has a weight of
    /// [`WINDOW_SIZE`](Self::WINDOW_SIZE), the fading byte a weight
    /// of 1).
    h2: u32,

    /// Hash component 3.
    ///
    /// A shift-xor accumulator: left-shifted by
    /// [`H3_LSHIFT`](Self::H3_LSHIFT) and xor-ed with each byte.  Since
    /// `WINDOW_SIZE * H3_LSHIFT` exceeds 32, bytes older than the window
    /// are fully shifted out.
    h3: u32,

    /// The last [`WINDOW_SIZE`](Self::WINDOW_SIZE) bytes of the
    /// processed data.
    window: [u8; ROLLING_WINDOW],
}

impl RollingHash {
    /// The window size of the rolling hash.
    ///
    /// This is 7 bytes in ssdeep.
    pub const WINDOW_SIZE: usize = ROLLING_WINDOW;

    /// Left shift width of [`h3`](Self::h3) for each byte.
    ///
    /// This is 5 in ssdeep.
    pub(crate) const H3_LSHIFT: usize = 5;

    /// Creates a new [`RollingHash`] with the initial value.
    pub fn new() -> Self {
        RollingHash {
            index: 0,
            h1: 0,
            h2: 0,
            h3: 0,
            window: [0; ROLLING_WINDOW],
        }
    }

    /// Updates the hash value by processing a byte.
    #[inline]
    pub fn update_by_byte(&mut self, ch: u8) -> &mut Self {
        debug_assert!((self.index as usize) < Self::WINDOW_SIZE);
        self.h2 = self.h2.wrapping_sub(self.h1);
        self.h2 = self
            .h2
            .wrapping_add(u32::wrapping_mul(ROLLING_WINDOW as u32, ch as u32));
        self.h1 = self.h1.wrapping_add(ch as u32);
        self.h1 = self
            .h1
            .wrapping_sub(self.window[self.index as usize] as u32);
        self.window[self.index as usize] = ch;
        self.index += 1;
        if self.index as usize == ROLLING_WINDOW {
            self.index = 0;
        }
        self.h3 <<= Self::H3_LSHIFT;
        self.h3 ^= ch as u32;
        self
    }

    /// Updates the hash value by processing a slice of [`u8`].
    pub fn update(&mut self, buf: &[u8]) -> &mut Self {
        for &ch in buf.iter() {
            self.update_by_byte(ch);
        }
        self
    }

    /// Returns the current hash value.
    ///
    /// This is the sum of its three internal states
    /// (`h1`, `h2` and `h3`).
    #[inline]
    pub fn value(&self) -> u32 {
        self.h1.wrapping_add(self.h2).wrapping_add(self.h3)
    }
}

impl Default for RollingHash {
    fn default() -> Self {
        Self::new()
    }
}
