//! ChaCha20 stream cipher (RFC 8439) and its extended-nonce variant.
//!
//! Two nonce layouts are supported:
//!
//! - 8-byte nonce, 64-bit block counter (the original construction)
//! - 12-byte nonce, 32-bit block counter (RFC 8439 / IETF)
//!
//! The 32-bit counter wraps after 2^32 blocks (256 GiB) and the keystream
//! then repeats. [`StreamCipher::keystream_blocks`] reports that bound so
//! the AEAD composer can refuse longer messages.
//!
//! XChaCha20 derives a sub-key from the first 16 nonce bytes with
//! [`hchacha20`] and runs IETF ChaCha20 with the remaining 8 bytes, as
//! described in draft-irtf-cfrg-xchacha.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{
    BLOCK_SIZE, KeyNonceInit, Keystream, StreamCipher, check_lengths, load_words, store_words,
};
use crate::error::Result;

/// ChaCha20 constant words.
///
/// These values correspond to the ASCII string `"expand 32-byte k"` encoded
/// as little-endian `u32` words.
const CHACHA20_CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

/// Performs one ChaCha20 quarter round.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Applies the full ChaCha20 permutation (20 rounds, no feed-forward).
fn rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column rounds
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Builds the input state with constants and key; counter and nonce words
/// are left for the caller.
fn initial_state(key: &[u8]) -> [u32; 16] {
    let mut state = [0u32; 16];
    state[0..4].copy_from_slice(&CHACHA20_CONSTANTS);
    load_words(&mut state[4..12], key);
    state
}

/// HChaCha20: derives a 32-byte sub-key from a key and a 16-byte nonce.
///
/// The ChaCha20 permutation is applied without the final feed-forward and
/// words 0..4 and 12..16 of the result form the output.
pub fn hchacha20(key: &[u8; 32], nonce: &[u8; 16]) -> [u8; 32] {
    let mut state = initial_state(key);
    load_words(&mut state[12..16], nonce);

    rounds(&mut state);

    let mut out = [0u8; 32];
    store_words(&mut out[..16], &state[0..4]);
    store_words(&mut out[16..], &state[12..16]);
    state.zeroize();
    out
}

/// ChaCha20 keystream generator.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20 {
    state: [u32; 16],
    #[zeroize(skip)]
    wide_counter: bool,
    keystream: Keystream,
}

impl ChaCha20 {
    /// Produces the keystream block at the current counter and advances it.
    fn next_block(state: &mut [u32; 16], wide_counter: bool, out: &mut [u8; BLOCK_SIZE]) {
        let mut working = *state;
        rounds(&mut working);

        // Feed-forward
        working
            .iter_mut()
            .zip(state.iter())
            .for_each(|(w, s)| *w = w.wrapping_add(*s));
        store_words(out, &working);
        working.zeroize();

        state[12] = state[12].wrapping_add(1);
        if wide_counter && state[12] == 0 {
            state[13] = state[13].wrapping_add(1);
        }
    }
}

impl KeyNonceInit for ChaCha20 {
    const NAME: &'static str = "ChaCha20";
    const KEY_SIZE: usize = 32;
    const NONCE_SIZES: &'static [usize] = &[8, 12];

    fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        check_lengths::<Self>(key, nonce)?;

        let mut state = initial_state(key);
        let wide_counter = nonce.len() == 8;
        if wide_counter {
            load_words(&mut state[14..16], nonce);
        } else {
            load_words(&mut state[13..16], nonce);
        }

        Ok(Self {
            state,
            wide_counter,
            keystream: Keystream::new(),
        })
    }
}

impl StreamCipher for ChaCha20 {
    #[inline(always)]
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn keystream_blocks(&self) -> Option<u64> {
        (!self.wide_counter).then_some(1 << 32)
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) {
        let state = &mut self.state;
        let wide_counter = self.wide_counter;
        self.keystream
            .apply(buf, |out| Self::next_block(state, wide_counter, out));
    }
}

/// XChaCha20: ChaCha20 with a 24-byte nonce.
#[derive(Clone)]
pub struct XChaCha20 {
    inner: ChaCha20,
}

impl KeyNonceInit for XChaCha20 {
    const NAME: &'static str = "XChaCha20";
    const KEY_SIZE: usize = 32;
    const NONCE_SIZES: &'static [usize] = &[24];

    fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        check_lengths::<Self>(key, nonce)?;

        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(key);
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&nonce[..16]);

        let mut subkey = hchacha20(&key_bytes, &prefix);
        let mut ietf_nonce = [0u8; 12];
        ietf_nonce[4..].copy_from_slice(&nonce[16..]);

        let inner = ChaCha20::new(&subkey, &ietf_nonce);
        subkey.zeroize();
        key_bytes.zeroize();

        Ok(Self { inner: inner? })
    }
}

impl StreamCipher for XChaCha20 {
    #[inline(always)]
    fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    fn keystream_blocks(&self) -> Option<u64> {
        self.inner.keystream_blocks()
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) {
        self.inner.apply_keystream(buf);
    }
}
