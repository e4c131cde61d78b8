//! Block padding schemes.
//!
//! Block-cipher modes operate on whole blocks, so the final partial block of
//! a message has to be extended before encryption and trimmed after
//! decryption. The schemes here are pure functions: they hold no state and
//! never touch more than one block.
//!
//! ## Contract
//!
//! - [`Pad::pad_size`] tells the mode how many bytes the padded tail will
//!   occupy, so output buffers can be sized before anything is encrypted.
//! - [`Pad::pad`] turns a tail shorter than a block into exactly one block.
//! - [`Pad::unpad`] recovers the tail from a decrypted final block.
//!
//! For every tail `x` shorter than the block, `unpad(pad(x)) == x`, with the
//! one documented exception of [`ZeroPadding`] on tails that end in zero
//! bytes.
//!
//! ## Schemes
//!
//! - [`Pkcs7`]: `N` bytes of value `N`; always emits a pad block.
//! - [`Iso7816`]: a `0x80` marker followed by zeros; always emits a pad block.
//! - [`ZeroPadding`]: zeros only, and only when the message is not already
//!   block-aligned.

use crate::error::PaddingError;

mod iso7816;
mod pkcs7;
mod zero;

pub use iso7816::Iso7816;
pub use pkcs7::Pkcs7;
pub use zero::ZeroPadding;

/// A padding scheme for block-cipher modes.
pub trait Pad {
    /// Number of bytes the padded tail occupies when `used` bytes of the
    /// message remain after the last whole block.
    ///
    /// Returns either `block_size` (one padded block is emitted) or `0` (no
    /// tail block is needed).
    fn pad_size(&self, used: usize, block_size: usize) -> usize;

    /// Writes `tail` followed by padding into `block`, filling it entirely.
    ///
    /// `tail` must be strictly shorter than `block`.
    fn pad(&self, tail: &[u8], block: &mut [u8]) -> Result<(), PaddingError>;

    /// Returns the data portion of a decrypted, padded final block.
    fn unpad<'a>(&self, block: &'a [u8]) -> Result<&'a [u8], PaddingError>;
}

/// Copies `tail` to the front of `block` after checking that it leaves room
/// for at least one byte of padding.
#[inline(always)]
fn copy_tail(tail: &[u8], block: &mut [u8]) -> Result<(), PaddingError> {
    if block.is_empty() {
        return Err(PaddingError::InvalidLength { len: 0 });
    }
    if tail.len() >= block.len() {
        return Err(PaddingError::TailTooLong {
            len: tail.len(),
            block_size: block.len(),
        });
    }
    block[..tail.len()].copy_from_slice(tail);
    Ok(())
}
