// SPDX-License-Identifier: MIT

//! Internal macros.

/// Implements the [`Error`](std::error::Error) trait either in
/// `std` or `core`.
///
/// The trait is the same one either way (`std` re-exports
/// [`core::error::Error`]); this macro only selects the path that is
/// available for the current configuration.
macro_rules! impl_error_impl {
    ($type:ty { $($tokens:tt)* }) => {
        cfg_if::cfg_if! {
            if #[cfg(feature = "std")] {
                impl std::error::Error for $type {
                    $($tokens)*
                }
            }
            else {
                impl core::error::Error for $type {
                    $($tokens)*
                }
            }
        }
    }
}
pub(crate) use impl_error_impl as impl_error;
