//! Poly1305 one-time authenticator (RFC 8439 §2.5).
//!
//! The 130-bit accumulator and the clamped key `r` are held in ten 13-bit
//! limbs each, so every limb product fits comfortably in a `u64` and the
//! modular reduction by `2^130 - 5` reduces to multiplying the wrapped-around
//! limbs by 5.
//!
//! Messages are absorbed in 16-byte blocks:
//!
//! ```text
//! h = (h + block) * r mod (2^130 - 5)
//! ```
//!
//! where every full block carries an implicit `2^128` bit and a short final
//! block is instead terminated by a single `0x01` byte. The tag is
//! `(h + s) mod 2^128`.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ct;
use crate::error::{Error, Result};
use crate::stream::StreamCipher;

/// Poly1305 block size, in bytes.
const BLOCK_SIZE: usize = 16;

/// Mask of one 13-bit limb.
const LIMB_MASK: u32 = 0x1fff;

/// Implicit `2^128` bit, expressed in the top limb (`128 - 9 * 13 = 11`).
const HIBIT: u32 = 1 << 11;

/// Incremental Poly1305 state.
///
/// A single instance authenticates a single message. [`finalize`](Self::finalize)
/// consumes the state; [`digest`](Self::digest) finalizes a copy so the
/// original can keep absorbing data.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Poly1305 {
    /// Clamped `r`, ten 13-bit limbs.
    r: [u32; 10],

    /// Accumulator `h`, ten 13-bit limbs (partially reduced between blocks).
    h: [u32; 10],

    /// `s`, the second key half, as eight 16-bit words.
    pad: [u32; 8],

    /// Bytes of an incomplete block awaiting more input.
    buffer: [u8; BLOCK_SIZE],

    /// Number of valid bytes in `buffer`.
    leftover: usize,
}

/// Reads the eight little-endian 16-bit words of a 16-byte block.
#[inline(always)]
fn words16(bytes: &[u8]) -> [u32; 8] {
    let mut t = [0u32; 8];
    t.iter_mut()
        .zip(bytes.chunks_exact(2))
        .for_each(|(w, pair)| *w = u32::from(pair[0]) | (u32::from(pair[1]) << 8));
    t
}

impl Poly1305 {
    /// Key size, in bytes.
    pub const KEY_SIZE: usize = 32;

    /// Tag size, in bytes.
    pub const TAG_SIZE: usize = 16;

    /// Creates a new instance from a one-time 32-byte key.
    ///
    /// `key[0..16]` becomes `r` after clamping (the RFC 8439 mask
    /// `0x0ffffffc0ffffffc0ffffffc0fffffff`, applied limb by limb);
    /// `key[16..32]` becomes `s` unchanged.
    pub fn new(key: &[u8; 32]) -> Self {
        let t = words16(&key[..16]);

        let r = [
            t[0] & 0x1fff,
            ((t[0] >> 13) | (t[1] << 3)) & 0x1fff,
            ((t[1] >> 10) | (t[2] << 6)) & 0x1f03,
            ((t[2] >> 7) | (t[3] << 9)) & 0x1fff,
            ((t[3] >> 4) | (t[4] << 12)) & 0x00ff,
            (t[4] >> 1) & 0x1ffe,
            ((t[4] >> 14) | (t[5] << 2)) & 0x1fff,
            ((t[5] >> 11) | (t[6] << 5)) & 0x1f81,
            ((t[6] >> 8) | (t[7] << 8)) & 0x1fff,
            (t[7] >> 5) & 0x007f,
        ];

        Self {
            r,
            h: [0; 10],
            pad: words16(&key[16..]),
            buffer: [0; BLOCK_SIZE],
            leftover: 0,
        }
    }

    /// Derives the one-time key from a stream cipher and returns a fresh
    /// instance.
    ///
    /// One full keystream block is generated (by encrypting a zero buffer of
    /// `block_size` bytes) and its first 32 bytes become the key, which also
    /// moves the cipher to the next block where the data keystream starts.
    ///
    /// # Errors
    ///
    /// [`Error::BlockSizeTooSmall`] if the cipher's block is shorter than
    /// 32 bytes.
    pub fn from_stream<S: StreamCipher + ?Sized>(cipher: &mut S) -> Result<Self> {
        let block_size = cipher.block_size();
        if block_size < Self::KEY_SIZE {
            return Err(Error::BlockSizeTooSmall {
                required: Self::KEY_SIZE,
                got: block_size,
            });
        }

        let mut block = vec![0u8; block_size];
        cipher.apply_keystream(&mut block);

        let mut key = [0u8; 32];
        key.copy_from_slice(&block[..Self::KEY_SIZE]);
        let mac = Self::new(&key);

        key.zeroize();
        block.zeroize();
        Ok(mac)
    }

    /// One-shot tag computation.
    pub fn mac(key: &[u8; 32], msg: &[u8]) -> [u8; 16] {
        let mut mac = Self::new(key);
        mac.write(msg);
        mac.finalize()
    }

    /// Absorbs `data`. May be called any number of times.
    pub fn write(&mut self, mut data: &[u8]) {
        if self.leftover > 0 {
            let take = (BLOCK_SIZE - self.leftover).min(data.len());
            self.buffer[self.leftover..self.leftover + take].copy_from_slice(&data[..take]);
            self.leftover += take;
            data = &data[take..];

            if self.leftover < BLOCK_SIZE {
                return;
            }

            let block = self.buffer;
            self.hash(&block, HIBIT);
            self.leftover = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            self.hash(block, HIBIT);
        }

        let rest = blocks.remainder();
        self.buffer[..rest.len()].copy_from_slice(rest);
        self.leftover = rest.len();
    }

    /// Returns the tag for everything written so far without consuming the
    /// state.
    pub fn digest(&self) -> [u8; 16] {
        self.clone().finalize()
    }

    /// Completes the computation and returns the 16-byte tag.
    pub fn finalize(mut self) -> [u8; 16] {
        if self.leftover > 0 {
            let mut block = self.buffer;
            block[self.leftover] = 1;
            block[self.leftover + 1..].fill(0);
            self.hash(&block, 0);
        }

        let h = &mut self.h;

        // Full carry propagation
        let mut c = h[1] >> 13;
        h[1] &= LIMB_MASK;
        for limb in h.iter_mut().skip(2) {
            *limb += c;
            c = *limb >> 13;
            *limb &= LIMB_MASK;
        }
        h[0] += c * 5;
        c = h[0] >> 13;
        h[0] &= LIMB_MASK;
        h[1] += c;
        c = h[1] >> 13;
        h[1] &= LIMB_MASK;
        h[2] += c;

        // g = h - p, computed as h + 5 - 2^130
        let mut g = [0u32; 10];
        g[0] = h[0] + 5;
        c = g[0] >> 13;
        g[0] &= LIMB_MASK;
        for (g_i, h_i) in g.iter_mut().zip(h.iter()).skip(1) {
            *g_i = h_i + c;
            c = *g_i >> 13;
            *g_i &= LIMB_MASK;
        }
        g[9] = g[9].wrapping_sub(1 << 13);

        // A carry out of g means h >= p, in which case g is the reduced value.
        let mask = ct::mask_from_bit(c);
        for (h_i, g_i) in h.iter_mut().zip(&g) {
            *h_i = ct::select(mask, *g_i, *h_i);
        }

        // h mod 2^128 as eight 16-bit words
        let mut out = [
            h[0] | (h[1] << 13),
            (h[1] >> 3) | (h[2] << 10),
            (h[2] >> 6) | (h[3] << 7),
            (h[3] >> 9) | (h[4] << 4),
            (h[4] >> 12) | (h[5] << 1) | (h[6] << 14),
            (h[6] >> 2) | (h[7] << 11),
            (h[7] >> 5) | (h[8] << 8),
            (h[8] >> 8) | (h[9] << 5),
        ];

        // + s mod 2^128
        let mut f = 0u32;
        for (o, s) in out.iter_mut().zip(&self.pad) {
            f = (*o & 0xffff) + s + (f >> 16);
            *o = f & 0xffff;
        }

        let mut tag = [0u8; 16];
        tag.chunks_exact_mut(2)
            .zip(&out)
            .for_each(|(chunk, word)| chunk.copy_from_slice(&(*word as u16).to_le_bytes()));

        out.zeroize();
        g.zeroize();
        tag
    }

    /// Adds one 16-byte block to the accumulator and multiplies by `r`.
    ///
    /// `hibit` is [`HIBIT`] for full message blocks and `0` for the padded
    /// final block.
    fn hash(&mut self, block: &[u8], hibit: u32) {
        let t = words16(block);
        let h = &mut self.h;

        h[0] += t[0] & 0x1fff;
        h[1] += ((t[0] >> 13) | (t[1] << 3)) & 0x1fff;
        h[2] += ((t[1] >> 10) | (t[2] << 6)) & 0x1fff;
        h[3] += ((t[2] >> 7) | (t[3] << 9)) & 0x1fff;
        h[4] += ((t[3] >> 4) | (t[4] << 12)) & 0x1fff;
        h[5] += (t[4] >> 1) & 0x1fff;
        h[6] += ((t[4] >> 14) | (t[5] << 2)) & 0x1fff;
        h[7] += ((t[5] >> 11) | (t[6] << 5)) & 0x1fff;
        h[8] += ((t[6] >> 8) | (t[7] << 8)) & 0x1fff;
        h[9] += (t[7] >> 5) | hibit;

        // Schoolbook multiplication. Limbs that wrap past 2^130 are folded
        // back multiplied by 5. The carry is taken halfway through each
        // column to keep the partial sums small.
        let mut d = [0u64; 10];
        let mut c = 0u64;
        for (i, d_i) in d.iter_mut().enumerate() {
            let mut acc = c;
            for (j, &h_j) in h.iter().enumerate() {
                let r = if j <= i {
                    u64::from(self.r[i - j])
                } else {
                    5 * u64::from(self.r[i + 10 - j])
                };
                acc += u64::from(h_j) * r;
                if j == 4 {
                    c = acc >> 13;
                    acc &= u64::from(LIMB_MASK);
                }
            }
            c += acc >> 13;
            *d_i = acc & u64::from(LIMB_MASK);
        }

        c = c * 5 + d[0];
        d[0] = c & u64::from(LIMB_MASK);
        d[1] += c >> 13;

        for (h_i, d_i) in h.iter_mut().zip(&d) {
            *h_i = *d_i as u32;
        }
    }
}
