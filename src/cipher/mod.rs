//! Block-cipher contract.
//!
//! Modes such as [`Cbc`](crate::mode::Cbc) never see a concrete algorithm;
//! they drive any type implementing [`BlockCipher`]. A block cipher is a
//! keyed permutation on fixed-size blocks: its block size never changes and
//! it keeps no state between calls beyond its key schedule.
//!
//! Concrete algorithms are provided by the RustCrypto crates and exposed
//! here through [`RustCryptoBlock`], behind the `blowfish` and `twofish`
//! features.

use crate::error::{Error, Result};

#[cfg(any(feature = "blowfish", feature = "twofish"))]
mod rustcrypto;

#[cfg(any(feature = "blowfish", feature = "twofish"))]
pub use rustcrypto::RustCryptoBlock;

/// Blowfish (64-bit block, 4 to 56 byte key).
#[cfg(feature = "blowfish")]
pub type Blowfish = RustCryptoBlock<blowfish::Blowfish>;

/// Twofish (128-bit block, 16, 24 or 32 byte key).
#[cfg(feature = "twofish")]
pub type Twofish = RustCryptoBlock<twofish::Twofish>;

/// A keyed permutation over fixed-size blocks.
pub trait BlockCipher {
    /// Block size in bytes. Constant for the lifetime of the cipher.
    fn block_size(&self) -> usize;

    /// Encrypts `buf[index * block_size..][..block_size]` in place.
    fn encrypt_block(&self, buf: &mut [u8], index: usize) -> Result<()>;

    /// Decrypts `buf[index * block_size..][..block_size]` in place.
    fn decrypt_block(&self, buf: &mut [u8], index: usize) -> Result<()>;
}

/// Returns the byte range of block `index`, or an error when `buf` is too
/// short to contain it.
#[inline(always)]
pub(crate) fn block_range(
    buf_len: usize,
    block_size: usize,
    index: usize,
) -> Result<core::ops::Range<usize>> {
    index
        .checked_mul(block_size)
        .and_then(|start| Some(start..start.checked_add(block_size)?))
        .filter(|range| range.end <= buf_len)
        .ok_or(Error::BlockOutOfRange {
            index,
            len: buf_len,
        })
}
