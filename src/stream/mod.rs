//! Stream ciphers and the stream-cipher contract.
//!
//! A stream cipher XORs a keystream into buffers of any length. Successive
//! calls continue the same keystream: each cipher buffers its current
//! 64-byte keystream block, so a message may be processed in arbitrary
//! slices and still produce the same output as a single call.
//!
//! The AEAD composer in [`crate::aead`] relies on one extra convention:
//! consuming exactly one keystream block (block 0) yields the one-time
//! Poly1305 key *and* leaves the counter at the first data block. That only
//! works when [`StreamCipher::block_size`] is at least 32 bytes.
//!
//! Provided ciphers:
//!
//! - [`ChaCha20`] with an 8-byte (64-bit counter) or 12-byte (RFC 8439,
//!   32-bit counter, 256 GiB per nonce) nonce
//! - [`XChaCha20`] with a 24-byte nonce, via [`hchacha20`]
//! - [`Salsa20`] with an 8-byte nonce
//! - [`XSalsa20`] with a 24-byte nonce, via [`hsalsa20`]

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::mode::xor_in_place;

mod chacha20;
mod salsa20;

pub use chacha20::{ChaCha20, XChaCha20, hchacha20};
pub use salsa20::{Salsa20, XSalsa20, hsalsa20};

/// Size of one keystream block for the Salsa/ChaCha family, in bytes.
pub const BLOCK_SIZE: usize = 64;

/// A keystream generator applied by XOR.
pub trait StreamCipher {
    /// Size of one keystream block, in bytes.
    fn block_size(&self) -> usize;

    /// XORs the next `buf.len()` keystream bytes into `buf`.
    fn apply_keystream(&mut self, buf: &mut [u8]);

    /// Number of keystream blocks one key and nonce can produce before the
    /// block counter wraps, or `None` when the counter never wraps in
    /// practice.
    ///
    /// Past this point the keystream repeats from block 0. Callers that
    /// encrypt more than one message's worth of data must check it.
    fn keystream_blocks(&self) -> Option<u64> {
        None
    }

    /// Encrypts `src` into the first `src.len()` bytes of `dst`.
    fn encrypt_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        if dst.len() < src.len() {
            return Err(Error::BufferTooSmall {
                needed: src.len(),
                got: dst.len(),
            });
        }
        let dst = &mut dst[..src.len()];
        dst.copy_from_slice(src);
        self.apply_keystream(dst);
        Ok(())
    }

    /// Decrypts `src` into the first `src.len()` bytes of `dst`.
    ///
    /// Identical to encryption for a stream cipher.
    fn decrypt_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        self.encrypt_into(dst, src)
    }

    /// Ciphertext length for a `len` byte plaintext. Always `len`.
    fn encrypt_size(&self, len: usize) -> usize {
        len
    }
}

/// Construction from a key and nonce of validated length.
pub trait KeyNonceInit: Sized {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Required key length, in bytes.
    const KEY_SIZE: usize;

    /// Accepted nonce lengths, in bytes.
    const NONCE_SIZES: &'static [usize];

    /// Creates the cipher, positioned at keystream block 0.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] or [`Error::InvalidNonceLength`].
    fn new(key: &[u8], nonce: &[u8]) -> Result<Self>;
}

/// Checks key and nonce lengths against `S`'s requirements.
pub(crate) fn check_lengths<S: KeyNonceInit>(key: &[u8], nonce: &[u8]) -> Result<()> {
    if key.len() != S::KEY_SIZE {
        return Err(Error::InvalidKeyLength { got: key.len() });
    }
    if !S::NONCE_SIZES.contains(&nonce.len()) {
        return Err(Error::InvalidNonceLength { got: nonce.len() });
    }
    Ok(())
}

/// Current keystream block and the position of the next unused byte.
#[derive(Clone, Zeroize)]
struct Keystream {
    block: [u8; BLOCK_SIZE],
    pos: usize,
}

impl Keystream {
    fn new() -> Self {
        Self {
            block: [0u8; BLOCK_SIZE],
            pos: BLOCK_SIZE,
        }
    }

    /// XORs keystream into `buf`, calling `refill` whenever the current
    /// block is exhausted.
    fn apply<F>(&mut self, mut buf: &mut [u8], mut refill: F)
    where
        F: FnMut(&mut [u8; BLOCK_SIZE]),
    {
        while !buf.is_empty() {
            if self.pos == BLOCK_SIZE {
                refill(&mut self.block);
                self.pos = 0;
            }

            let take = (BLOCK_SIZE - self.pos).min(buf.len());
            let (head, rest) = core::mem::take(&mut buf).split_at_mut(take);
            xor_in_place(head, &self.block[self.pos..]);
            self.pos += take;
            buf = rest;
        }
    }
}

/// Reads a little-endian `u32` from the first four bytes of `bytes`.
#[inline(always)]
fn load_le32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Loads consecutive little-endian words from `bytes` into `words`.
#[inline(always)]
fn load_words(words: &mut [u32], bytes: &[u8]) {
    words
        .iter_mut()
        .zip(bytes.chunks_exact(4))
        .for_each(|(w, chunk)| *w = load_le32(chunk));
}

/// Serializes `words` as little-endian bytes into `out`.
#[inline(always)]
fn store_words(out: &mut [u8], words: &[u32]) {
    out.chunks_exact_mut(4)
        .zip(words)
        .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));
}
