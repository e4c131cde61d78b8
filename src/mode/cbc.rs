//! Cipher Block Chaining (NIST SP 800-38A §6.2).
//!
//! Every plaintext block is XORed with the previous ciphertext block before
//! it is encrypted; the first block is chained with the IV. The final
//! partial block is completed by the padding scheme.
//!
//! ```text
//! C[0] = E(P[0] ^ IV)
//! C[i] = E(P[i] ^ C[i - 1])
//! P[i] = D(C[i]) ^ C[i - 1]
//! ```
//!
//! Each call is independent: chaining always restarts from the stored IV,
//! so the same `Cbc` value can encrypt many messages (with the usual caveat
//! that reusing an IV under one key leaks equality of message prefixes).

use zeroize::Zeroize;

use super::xor_in_place;
use crate::cipher::BlockCipher;
use crate::error::{Error, Result};
use crate::padding::Pad;

/// Largest block size supported by the engine, in bytes.
pub const MAX_BLOCK_SIZE: usize = 32;

/// CBC engine over a block cipher `C` and a padding scheme `P`.
#[derive(Clone)]
pub struct Cbc<C, P> {
    cipher: C,
    padding: P,
    iv: [u8; MAX_BLOCK_SIZE],
    block_size: usize,
}

impl<C: BlockCipher, P: Pad> Cbc<C, P> {
    /// Creates a CBC engine.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedBlockSize`] if the cipher's block size is zero
    ///   or larger than [`MAX_BLOCK_SIZE`]
    /// - [`Error::InvalidIvLength`] if `iv` is not exactly one block long
    pub fn new(cipher: C, padding: P, iv: &[u8]) -> Result<Self> {
        let block_size = cipher.block_size();
        if block_size == 0 || block_size > MAX_BLOCK_SIZE {
            return Err(Error::UnsupportedBlockSize { block_size });
        }
        if iv.len() != block_size {
            return Err(Error::InvalidIvLength {
                expected: block_size,
                got: iv.len(),
            });
        }

        let mut stored = [0u8; MAX_BLOCK_SIZE];
        stored[..block_size].copy_from_slice(iv);

        log::debug!("initialized CBC mode with a {block_size} byte block");

        Ok(Self {
            cipher,
            padding,
            iv: stored,
            block_size,
        })
    }

    /// Block size of the underlying cipher, in bytes.
    #[inline(always)]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Exact ciphertext length produced for a `plain_len` byte plaintext.
    ///
    /// Computed without encrypting, so callers can size buffers up front.
    pub fn encrypt_size(&self, plain_len: usize) -> usize {
        let rem = plain_len % self.block_size;
        plain_len - rem + self.padding.pad_size(rem, self.block_size)
    }

    /// Encrypts `plain` into `dst` and returns the number of bytes written,
    /// which is always [`encrypt_size`](Self::encrypt_size)`(plain.len())`.
    ///
    /// # Errors
    ///
    /// [`Error::BufferTooSmall`] if `dst` cannot hold the ciphertext.
    pub fn encrypt_into(&self, dst: &mut [u8], plain: &[u8]) -> Result<usize> {
        let size = self.encrypt_size(plain.len());
        if dst.len() < size {
            return Err(Error::BufferTooSmall {
                needed: size,
                got: dst.len(),
            });
        }

        let whole = plain.len() - plain.len() % self.block_size;
        dst[..whole].copy_from_slice(&plain[..whole]);

        self.chain_encrypt(&mut dst[..size], whole, &plain[whole..])?;
        Ok(size)
    }

    /// Encrypts the first `plain_len` bytes of `buf` in place.
    ///
    /// `buf` must have room for the padded result; returns the ciphertext
    /// length.
    pub fn encrypt_in_place(&self, buf: &mut [u8], plain_len: usize) -> Result<usize> {
        let size = self.encrypt_size(plain_len);
        let needed = size.max(plain_len);
        if buf.len() < needed {
            return Err(Error::BufferTooSmall {
                needed,
                got: buf.len(),
            });
        }

        let whole = plain_len - plain_len % self.block_size;
        let mut tail = [0u8; MAX_BLOCK_SIZE];
        let tail_len = plain_len - whole;
        tail[..tail_len].copy_from_slice(&buf[whole..plain_len]);

        let result = self.chain_encrypt(&mut buf[..size], whole, &tail[..tail_len]);
        tail.zeroize();
        result.map(|()| size)
    }

    /// Decrypts `enc` into `dst` and returns the plaintext length.
    ///
    /// `dst` is used as the working area for every block but the last, so it
    /// must be at least `enc.len() - block_size` bytes long plus room for the
    /// unpadded tail.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidCiphertextLength`] if `enc` is not block-aligned
    /// - [`Error::BufferTooSmall`] if `dst` cannot hold the plaintext
    /// - [`Error::Padding`] if the final block is not correctly padded
    pub fn decrypt_into(&self, dst: &mut [u8], enc: &[u8]) -> Result<usize> {
        let bs = self.block_size;
        self.check_ciphertext_len(enc.len())?;
        if enc.is_empty() {
            return Ok(0);
        }

        let last = enc.len() - bs;
        if dst.len() < last {
            return Err(Error::BufferTooSmall {
                needed: last,
                got: dst.len(),
            });
        }
        dst[..last].copy_from_slice(&enc[..last]);

        // The chaining value always points into `enc`, never into the block
        // being overwritten in `dst`.
        let mut chain: &[u8] = &self.iv[..bs];
        for (i, ciphertext) in enc[..last].chunks_exact(bs).enumerate() {
            self.cipher.decrypt_block(&mut dst[..last], i)?;
            xor_in_place(&mut dst[i * bs..(i + 1) * bs], chain);
            chain = ciphertext;
        }

        let mut scratch = [0u8; MAX_BLOCK_SIZE];
        let result = self.open_final_block(&mut scratch, &enc[last..], chain, |data| {
            let end = last + data.len();
            if dst.len() < end {
                return Err(Error::BufferTooSmall {
                    needed: end,
                    got: dst.len(),
                });
            }
            dst[last..end].copy_from_slice(data);
            Ok(end)
        });
        scratch.zeroize();
        result
    }

    /// Decrypts `buf` in place and returns the plaintext length.
    ///
    /// Blocks are processed from last to first, so the block each one is
    /// chained with is still ciphertext when it is read.
    pub fn decrypt_in_place(&self, buf: &mut [u8]) -> Result<usize> {
        let bs = self.block_size;
        self.check_ciphertext_len(buf.len())?;
        if buf.is_empty() {
            return Ok(0);
        }

        let last = buf.len() - bs;
        let mut scratch = [0u8; MAX_BLOCK_SIZE];
        let mut final_block = [0u8; MAX_BLOCK_SIZE];
        final_block[..bs].copy_from_slice(&buf[last..]);

        let chain = if last == 0 { &self.iv[..bs] } else { &buf[last - bs..last] };
        let mut tail = [0u8; MAX_BLOCK_SIZE];
        let result = self.open_final_block(&mut scratch, &final_block[..bs], chain, |data| {
            tail[..data.len()].copy_from_slice(data);
            Ok(data.len())
        });
        scratch.zeroize();
        final_block.zeroize();
        let tail_len = result?;

        for i in (0..last / bs).rev() {
            self.cipher.decrypt_block(buf, i)?;
            let (head, rest) = buf.split_at_mut(i * bs);
            let chain = if i == 0 { &self.iv[..bs] } else { &head[(i - 1) * bs..] };
            xor_in_place(&mut rest[..bs], chain);
        }

        buf[last..last + tail_len].copy_from_slice(&tail[..tail_len]);
        tail.zeroize();
        Ok(last + tail_len)
    }

    /// Pads `tail` into the block following the `whole` aligned bytes of
    /// `buf`, then chains and encrypts every block of `buf`.
    fn chain_encrypt(&self, buf: &mut [u8], whole: usize, tail: &[u8]) -> Result<()> {
        let bs = self.block_size;
        if buf.len() > whole {
            self.padding.pad(tail, &mut buf[whole..])?;
        }

        for i in 0..buf.len() / bs {
            let (done, rest) = buf.split_at_mut(i * bs);
            let chain = if i == 0 { &self.iv[..bs] } else { &done[(i - 1) * bs..] };
            xor_in_place(&mut rest[..bs], chain);
            self.cipher.encrypt_block(rest, 0)?;
        }

        Ok(())
    }

    /// Decrypts the final block into `scratch`, never in place, removes the
    /// padding, and hands the recovered tail to `emit`.
    fn open_final_block<F>(
        &self,
        scratch: &mut [u8; MAX_BLOCK_SIZE],
        ciphertext: &[u8],
        chain: &[u8],
        emit: F,
    ) -> Result<usize>
    where
        F: FnOnce(&[u8]) -> Result<usize>,
    {
        let block = &mut scratch[..self.block_size];
        block.copy_from_slice(ciphertext);
        self.cipher.decrypt_block(block, 0)?;
        xor_in_place(block, chain);

        emit(self.padding.unpad(block)?)
    }

    fn check_ciphertext_len(&self, len: usize) -> Result<()> {
        if len % self.block_size != 0 {
            return Err(Error::InvalidCiphertextLength {
                len,
                block_size: self.block_size,
            });
        }
        Ok(())
    }
}

impl<C, P> Drop for Cbc<C, P> {
    fn drop(&mut self) {
        self.iv.zeroize();
    }
}
