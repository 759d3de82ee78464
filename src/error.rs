//! Error types.
//!
//! Only recoverable conditions are represented here: exhausted pools, unknown
//! handles, size mismatches and unsupported texture data. Contract violations
//! by the caller (zero dimensions, index counts that are not multiples of 3,
//! output buffers of the wrong size) panic instead.

use thiserror::Error;

/// Recoverable renderer failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The pool has no free slot left.
    #[error("couldn't allocate {pool} ID: pool exhausted")]
    PoolExhausted { pool: &'static str },

    /// The handle does not refer to an allocated slot.
    #[error("invalid {kind} ID {id}")]
    InvalidHandle { kind: &'static str, id: u32 },

    /// `populate_*` was given a different element count than was allocated.
    #[error("mismatched {kind} buffer sizes for ID {id}: {actual} != {expected}")]
    SizeMismatch {
        kind: &'static str,
        id: u32,
        expected: usize,
        actual: usize,
    },

    /// True-color source textures cannot be stored as 8-bit object textures.
    #[error("true color texture (dimensions {width}x{height}) not supported")]
    UnsupportedTextureFormat { width: u32, height: u32 },

    /// The texture exists but is the wrong variant for its use.
    #[error("object texture ID {id} is not a {expected} texture")]
    UnexpectedTextureKind { id: u32, expected: &'static str },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RenderError>;
