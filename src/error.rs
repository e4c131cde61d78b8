//! Error types shared by every construction in the crate.
//!
//! Errors fall into four families:
//!
//! - **construction**: a key, nonce, or IV of the wrong length, a primitive
//!   whose block size cannot support the requested mode, or an Ascon
//!   parameter set the permutation cannot carry
//! - **usage order**: an AEAD operation issued in a stage where it is not
//!   legal (for example associated data after the first ciphertext byte)
//! - **content**: malformed padding found while decrypting
//! - **capacity**: an output buffer too small for the result, or a message
//!   longer than one nonce's keystream
//!
//! Tag mismatches are deliberately *not* errors. `verify` reports them as
//! `Ok(false)` so that the success and failure paths have the same shape.

use thiserror::Error;

use crate::aead::Stage;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by ciphers, modes, MACs, and AEAD constructions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The key does not have a length accepted by the algorithm.
    #[error("invalid key length: {got} bytes")]
    InvalidKeyLength { got: usize },

    /// The nonce does not have a length accepted by the algorithm.
    #[error("invalid nonce length: {got} bytes")]
    InvalidNonceLength { got: usize },

    /// The IV length differs from the block size of the cipher.
    #[error("invalid IV length: expected {expected} bytes, got {got}")]
    InvalidIvLength { expected: usize, got: usize },

    /// The block size is zero or larger than the mode supports.
    #[error("unsupported block size of {block_size} bytes")]
    UnsupportedBlockSize { block_size: usize },

    /// A stream cipher block is too small to derive a one-time MAC key.
    #[error("block size too small: need at least {required} bytes, got {got}")]
    BlockSizeTooSmall { required: usize, got: usize },

    /// The destination buffer cannot hold the output.
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },

    /// A block index points past the end of the buffer.
    #[error("block {index} out of range for a {len} byte buffer")]
    BlockOutOfRange { index: usize, len: usize },

    /// Ciphertext length is not a multiple of the block size.
    #[error("ciphertext length {len} is not a multiple of the {block_size} byte block size")]
    InvalidCiphertextLength { len: usize, block_size: usize },

    /// A parameter set lies outside what the permutation can support.
    #[error("unsupported {name} parameters: {reason}")]
    UnsupportedParameters {
        name: &'static str,
        reason: &'static str,
    },

    /// More data than the cipher can encrypt under one nonce.
    #[error("keystream exhausted: at most {limit} bytes per nonce")]
    KeystreamExhausted { limit: u64 },

    /// An AEAD operation was issued in a stage where it is not allowed.
    #[error("`{operation}` is not allowed in the {stage:?} stage")]
    InvalidStage {
        operation: &'static str,
        stage: Stage,
    },

    /// Padding could not be removed.
    #[error(transparent)]
    Padding(#[from] PaddingError),
}

/// Errors raised while adding or removing block padding.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaddingError {
    /// The padded block is empty or the output block has the wrong size.
    #[error("padded block has an invalid length of {len} bytes")]
    InvalidLength { len: usize },

    /// The trailing pad count byte is zero or larger than the block.
    #[error("pad count {count} is invalid for a {block_size} byte block")]
    InvalidPadCount { count: usize, block_size: usize },

    /// Not every pad byte carries the expected value.
    #[error("pad bytes are inconsistent")]
    InconsistentPadding,

    /// The scheme's end-of-data marker was not found.
    #[error("padding marker not found")]
    MarkerNotFound,

    /// The data tail does not leave room for the padding in one block.
    #[error("tail of {len} bytes does not fit a {block_size} byte padded block")]
    TailTooLong { len: usize, block_size: usize },
}
