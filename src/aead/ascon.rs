//! Ascon authenticated encryption (Ascon-128, Ascon-128a, Ascon-80pq).
//!
//! A duplex sponge over the 320-bit Ascon permutation:
//!
//! ```text
//! init:     S = IV || K || N ; S = p^a(S) ; S ^= 0* || K
//! ad:       absorb rate-sized blocks with p^b, pad 0x80, p^b
//!           S ^= 0* || 1                       (domain separation)
//! data:     c = S_r ^ p ; S_r = c ; p^b between blocks
//! finalize: pad 0x80 ; S ^= 0^r || K || 0* ; S = p^a(S)
//!           T = S[24..40] ^ K[k-16..k]
//! ```
//!
//! The parameter sets differ only in key size, rate and round counts, so a
//! single engine parameterized by [`AsconParams`] serves all three.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{Aead, Stage, Tag, TAG_SIZE};
use crate::error::{Error, Result};
use crate::permutation::{AsconState, MAX_ROUNDS};

/// Largest key any parameter set uses (Ascon-80pq).
const MAX_KEY_SIZE: usize = 20;

/// Nonce size shared by every parameter set.
pub const NONCE_SIZE: usize = 16;

/// Ascon AEAD parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsconParams {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Key size, in bytes.
    pub key_size: usize,
    /// Rate, in bytes.
    pub rate: usize,
    /// Rounds used for initialization and finalization.
    pub a_rounds: usize,
    /// Rounds used between data blocks.
    pub b_rounds: usize,
}

impl AsconParams {
    /// Checks that the key, rate and round counts fit the 320-bit state.
    ///
    /// The key must be 16 to 20 bytes, the rate must leave room for the key
    /// beside it, and neither round count may exceed 12.
    pub fn validate(&self) -> Result<()> {
        let reason = if !(TAG_SIZE..=MAX_KEY_SIZE).contains(&self.key_size) {
            "key size must be 16 to 20 bytes"
        } else if self.rate == 0 || self.rate > AsconState::SIZE - self.key_size {
            "rate must be non-zero and leave room for the key"
        } else if self.a_rounds > MAX_ROUNDS || self.b_rounds > MAX_ROUNDS {
            "round counts must not exceed 12"
        } else {
            return Ok(());
        };
        Err(Error::UnsupportedParameters {
            name: self.name,
            reason,
        })
    }

    /// First four IV bytes: key bits, rate bits, `a` and `b`.
    fn iv_header(&self) -> [u8; 4] {
        [
            (self.key_size * 8) as u8,
            (self.rate * 8) as u8,
            self.a_rounds as u8,
            self.b_rounds as u8,
        ]
    }
}

/// Ascon-128: 16-byte key, 8-byte rate, `p^12`/`p^6`.
pub const ASCON_128: AsconParams = AsconParams {
    name: "Ascon-128",
    key_size: 16,
    rate: 8,
    a_rounds: 12,
    b_rounds: 6,
};

/// Ascon-128a: 16-byte key, 16-byte rate, `p^12`/`p^8`.
pub const ASCON_128A: AsconParams = AsconParams {
    name: "Ascon-128a",
    key_size: 16,
    rate: 16,
    a_rounds: 12,
    b_rounds: 8,
};

/// Ascon-80pq: 20-byte key, 8-byte rate, `p^12`/`p^6`.
pub const ASCON_80PQ: AsconParams = AsconParams {
    name: "Ascon-80pq",
    key_size: 20,
    rate: 8,
    a_rounds: 12,
    b_rounds: 6,
};

/// Incremental Ascon AEAD instance.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Ascon {
    #[zeroize(skip)]
    params: AsconParams,
    state: AsconState,
    key: [u8; MAX_KEY_SIZE],
    /// Byte position inside the current rate block.
    cursor: usize,
    #[zeroize(skip)]
    stage: Stage,
}

impl Ascon {
    /// Initializes an instance for `params` with a key and 16-byte nonce.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedParameters`] for a custom parameter set rejected
    /// by [`AsconParams::validate`], then [`Error::InvalidKeyLength`] or
    /// [`Error::InvalidNonceLength`].
    pub fn new(params: AsconParams, key: &[u8], nonce: &[u8]) -> Result<Self> {
        params.validate()?;
        if key.len() != params.key_size {
            return Err(Error::InvalidKeyLength { got: key.len() });
        }
        if nonce.len() != NONCE_SIZE {
            return Err(Error::InvalidNonceLength { got: nonce.len() });
        }

        let mut key_buf = [0u8; MAX_KEY_SIZE];
        key_buf[..key.len()].copy_from_slice(key);

        // IV || 0* || K || N, right-aligned in 40 bytes
        let mut state = AsconState::default();
        let key_offset = AsconState::SIZE - NONCE_SIZE - params.key_size;
        state.xor_bytes(0, &params.iv_header());
        state.xor_bytes(key_offset, key);
        state.xor_bytes(AsconState::SIZE - NONCE_SIZE, nonce);

        state.permute(params.a_rounds);
        state.xor_bytes(AsconState::SIZE - params.key_size, key);

        log::debug!("{} initialized", params.name);

        Ok(Self {
            params,
            state,
            key: key_buf,
            cursor: 0,
            stage: Stage::Init,
        })
    }

    /// Ascon-128 with a 16-byte key.
    pub fn ascon128(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::new(ASCON_128, key, nonce)
    }

    /// Ascon-128a with a 16-byte key.
    pub fn ascon128a(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::new(ASCON_128A, key, nonce)
    }

    /// Ascon-80pq with a 20-byte key.
    pub fn ascon80pq(key: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::new(ASCON_80PQ, key, nonce)
    }

    /// Parameter set in use.
    pub fn params(&self) -> AsconParams {
        self.params
    }

    #[inline(always)]
    fn key(&self) -> &[u8] {
        &self.key[..self.params.key_size]
    }

    /// Permutes with `p^b` once the current rate block is full.
    #[inline(always)]
    fn advance_cursor(&mut self) {
        self.cursor += 1;
        if self.cursor == self.params.rate {
            self.state.permute(self.params.b_rounds);
            self.cursor = 0;
        }
    }

    /// Closes the associated-data phase on first use.
    ///
    /// Padding and the extra permutation only happen when associated data
    /// was written; the domain separation bit is always applied.
    fn begin_data(&mut self, operation: &'static str) -> Result<()> {
        self.stage.check_not_done(operation)?;
        if self.stage < Stage::Data {
            if self.stage == Stage::AssociatedData {
                self.state.xor_byte(self.cursor, 0x80);
                self.state.permute(self.params.b_rounds);
                self.cursor = 0;
            }
            self.state.xor_byte(AsconState::SIZE - 1, 0x01);
            self.stage.advance(Stage::Data);
        }
        Ok(())
    }
}

impl Aead for Ascon {
    fn stage(&self) -> Stage {
        self.stage
    }

    fn write_ad(&mut self, ad: &[u8]) -> Result<()> {
        self.stage.check_associated_data("write_ad")?;
        // An empty write leaves the instance as if no AD was supplied.
        if ad.is_empty() {
            return Ok(());
        }

        for &b in ad {
            self.state.xor_byte(self.cursor, b);
            self.advance_cursor();
        }
        self.stage.advance(Stage::AssociatedData);
        Ok(())
    }

    fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<()> {
        self.begin_data("encrypt")?;
        for b in buf.iter_mut() {
            let c = self.state.byte(self.cursor) ^ *b;
            self.state.set_byte(self.cursor, c);
            *b = c;
            self.advance_cursor();
        }
        Ok(())
    }

    fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<()> {
        self.begin_data("decrypt")?;
        for b in buf.iter_mut() {
            let c = *b;
            *b = self.state.byte(self.cursor) ^ c;
            self.state.set_byte(self.cursor, c);
            self.advance_cursor();
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<Tag> {
        self.begin_data("finalize")?;

        let mut key = [0u8; MAX_KEY_SIZE];
        let key_size = self.params.key_size;
        key[..key_size].copy_from_slice(self.key());

        self.state.xor_byte(self.cursor, 0x80);
        self.state.xor_bytes(self.params.rate, &key[..key_size]);
        self.state.permute(self.params.a_rounds);
        self.state
            .xor_bytes(AsconState::SIZE - TAG_SIZE, &key[key_size - TAG_SIZE..key_size]);

        let mut tag = [0u8; TAG_SIZE];
        self.state.extract(AsconState::SIZE - TAG_SIZE, &mut tag);

        key.zeroize();
        self.state.zeroize();
        self.stage.advance(Stage::Done);
        Ok(tag)
    }
}
