//! Salsa20/20 stream cipher and its extended-nonce variant XSalsa20.
//!
//! Salsa20 takes a 32-byte key and an 8-byte nonce, with a 64-bit block
//! counter. XSalsa20 derives a sub-key from the first 16 bytes of a 24-byte
//! nonce with [`hsalsa20`] and runs Salsa20 with the last 8 bytes.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{
    BLOCK_SIZE, KeyNonceInit, Keystream, StreamCipher, check_lengths, load_words, store_words,
};
use crate::error::Result;

/// `"expand 32-byte k"` as little-endian words, placed on the diagonal.
const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

/// Ten double rounds of the Salsa20 core, without feed-forward.
fn rounds(x: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column round
        quarter_round(x, 0, 4, 8, 12);
        quarter_round(x, 5, 9, 13, 1);
        quarter_round(x, 10, 14, 2, 6);
        quarter_round(x, 15, 3, 7, 11);

        // Row round
        quarter_round(x, 0, 1, 2, 3);
        quarter_round(x, 5, 6, 7, 4);
        quarter_round(x, 10, 11, 8, 9);
        quarter_round(x, 15, 12, 13, 14);
    }
}

/// Places constants and key; words 6..10 (nonce and counter) are left to
/// the caller.
fn initial_state(key: &[u8]) -> [u32; 16] {
    let mut state = [0u32; 16];
    state[0] = SIGMA[0];
    state[5] = SIGMA[1];
    state[10] = SIGMA[2];
    state[15] = SIGMA[3];
    load_words(&mut state[1..5], &key[..16]);
    load_words(&mut state[11..15], &key[16..]);
    state
}

/// HSalsa20: derives a 32-byte sub-key from a key and a 16-byte nonce.
pub fn hsalsa20(key: &[u8; 32], nonce: &[u8; 16]) -> [u8; 32] {
    let mut x = initial_state(key);
    load_words(&mut x[6..10], nonce);

    rounds(&mut x);

    let words = [x[0], x[5], x[10], x[15], x[6], x[7], x[8], x[9]];
    let mut out = [0u8; 32];
    store_words(&mut out, &words);
    x.zeroize();
    out
}

/// Salsa20 keystream generator.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Salsa20 {
    state: [u32; 16],
    keystream: Keystream,
}

impl Salsa20 {
    fn next_block(state: &mut [u32; 16], out: &mut [u8; BLOCK_SIZE]) {
        let mut working = *state;
        rounds(&mut working);
        working
            .iter_mut()
            .zip(state.iter())
            .for_each(|(w, s)| *w = w.wrapping_add(*s));
        store_words(out, &working);
        working.zeroize();

        state[8] = state[8].wrapping_add(1);
        if state[8] == 0 {
            state[9] = state[9].wrapping_add(1);
        }
    }
}

impl KeyNonceInit for Salsa20 {
    const NAME: &'static str = "Salsa20";
    const KEY_SIZE: usize = 32;
    const NONCE_SIZES: &'static [usize] = &[8];

    fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        check_lengths::<Self>(key, nonce)?;

        let mut state = initial_state(key);
        load_words(&mut state[6..8], nonce);

        Ok(Self {
            state,
            keystream: Keystream::new(),
        })
    }
}

impl StreamCipher for Salsa20 {
    #[inline(always)]
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) {
        let state = &mut self.state;
        self.keystream
            .apply(buf, |out| Self::next_block(state, out));
    }
}

/// XSalsa20: Salsa20 with a 24-byte nonce.
#[derive(Clone)]
pub struct XSalsa20 {
    inner: Salsa20,
}

impl KeyNonceInit for XSalsa20 {
    const NAME: &'static str = "XSalsa20";
    const KEY_SIZE: usize = 32;
    const NONCE_SIZES: &'static [usize] = &[24];

    fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        check_lengths::<Self>(key, nonce)?;

        let mut key_bytes = [0u8; 32];
        key_bytes.copy_from_slice(key);
        let mut prefix = [0u8; 16];
        prefix.copy_from_slice(&nonce[..16]);

        let mut subkey = hsalsa20(&key_bytes, &prefix);
        let inner = Salsa20::new(&subkey, &nonce[16..]);
        subkey.zeroize();
        key_bytes.zeroize();

        Ok(Self { inner: inner? })
    }
}

impl StreamCipher for XSalsa20 {
    #[inline(always)]
    fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) {
        self.inner.apply_keystream(buf);
    }
}
