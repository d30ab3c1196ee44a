// Error taxonomy for the page-delta operations.
//
// Two failure kinds exist: rejected input lengths before any comparison
// work, and malformed hex payloads surfaced from the codec layer. Both
// propagate straight to the caller; there is no retry or partial recovery
// at this level.

use thiserror::Error;

/// Errors produced by [`diff`](crate::diff()), [`apply`](crate::apply()) and
/// [`expand_diff`](crate::expand_diff).
#[derive(Debug, Error)]
pub enum DiffError {
    /// A buffer's length is not an exact multiple of the configured page
    /// size. Raised by the differencer before any comparison happens.
    #[error("buffer length {len} is not a multiple of page size {page_size}")]
    InvalidLength { len: usize, page_size: usize },

    /// A commit payload is not valid hex (odd length or a non-hex digit).
    #[error("invalid commit payload: {0}")]
    Decode(#[from] hex::FromHexError),
}
