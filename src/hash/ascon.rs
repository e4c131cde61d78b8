//! Ascon-Hash, Ascon-HashA, Ascon-Xof and Ascon-XofA.
//!
//! All four share one sponge with an 8-byte rate:
//!
//! ```text
//! S = p^12(IV || 0^256)
//! absorb 8-byte blocks, p^b after each full block
//! pad 0x80, S = p^12(S)
//! squeeze 8 bytes at a time, p^b between blocks
//! ```
//!
//! The variants differ only in the IV (which encodes the output length) and
//! in `b` (12 for Hash/Xof, 8 for the `A` variants).

use crate::error::{Error, Result};
use crate::permutation::{AsconState, MAX_ROUNDS};

/// Sponge rate, in bytes.
const RATE: usize = 8;

/// Output size of [`AsconHash`], in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Ascon hash/XOF parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsconHashParams {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// First state lane. The remaining 256 bits start at zero.
    pub iv: u64,
    /// Rounds between absorbed and squeezed blocks.
    pub b_rounds: usize,
}

impl AsconHashParams {
    /// Output length, in bits, encoded in the low word of the IV. Zero for
    /// the XOF variants.
    pub fn output_bits(&self) -> u32 {
        self.iv as u32
    }

    /// Checks the round count and that the IV declares `output_bits`.
    fn validate(&self, output_bits: u32) -> Result<()> {
        let reason = if self.b_rounds > MAX_ROUNDS {
            "round count must not exceed 12"
        } else if self.output_bits() != output_bits {
            if output_bits == 0 {
                "IV is not an XOF IV"
            } else {
                "IV does not declare a 256-bit digest"
            }
        } else {
            return Ok(());
        };
        Err(Error::UnsupportedParameters {
            name: self.name,
            reason,
        })
    }
}

/// Ascon-Hash: 256-bit digest, `p^12` between blocks.
pub const ASCON_HASH: AsconHashParams = AsconHashParams {
    name: "Ascon-Hash",
    iv: 0x0040_0c00_0000_0100,
    b_rounds: 12,
};

/// Ascon-HashA: 256-bit digest, `p^8` between blocks.
pub const ASCON_HASHA: AsconHashParams = AsconHashParams {
    name: "Ascon-HashA",
    iv: 0x0040_0c04_0000_0100,
    b_rounds: 8,
};

/// Ascon-Xof: arbitrary-length output, `p^12` between blocks.
pub const ASCON_XOF: AsconHashParams = AsconHashParams {
    name: "Ascon-Xof",
    iv: 0x0040_0c00_0000_0000,
    b_rounds: 12,
};

/// Ascon-XofA: arbitrary-length output, `p^8` between blocks.
pub const ASCON_XOFA: AsconHashParams = AsconHashParams {
    name: "Ascon-XofA",
    iv: 0x0040_0c04_0000_0000,
    b_rounds: 8,
};

/// Absorbing half of the sponge.
#[derive(Clone)]
struct Sponge {
    state: AsconState,
    cursor: usize,
    b_rounds: usize,
}

impl Sponge {
    fn new(params: &AsconHashParams) -> Self {
        let mut state = AsconState::from_lanes([params.iv, 0, 0, 0, 0]);
        state.permute(12);
        log::debug!("{} initialized", params.name);
        Self {
            state,
            cursor: 0,
            b_rounds: params.b_rounds,
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        for &b in data {
            self.state.xor_byte(self.cursor, b);
            self.cursor += 1;
            if self.cursor == RATE {
                self.state.permute(self.b_rounds);
                self.cursor = 0;
            }
        }
    }

    /// Pads the last block and switches to squeezing.
    fn into_reader(mut self) -> AsconXofReader {
        self.state.xor_byte(self.cursor, 0x80);
        self.state.permute(12);
        AsconXofReader {
            state: self.state,
            pos: 0,
            b_rounds: self.b_rounds,
        }
    }
}

/// Incremental Ascon-Hash / Ascon-HashA.
#[derive(Clone)]
pub struct AsconHash {
    sponge: Sponge,
}

impl AsconHash {
    /// Creates a hasher for a 256-bit digest parameter set such as
    /// [`ASCON_HASH`] or [`ASCON_HASHA`].
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedParameters`] for an XOF IV or more than 12 rounds.
    pub fn new(params: AsconHashParams) -> Result<Self> {
        params.validate(DIGEST_SIZE as u32 * 8)?;
        Ok(Self {
            sponge: Sponge::new(&params),
        })
    }

    /// Ascon-Hash.
    pub fn hash() -> Self {
        Self {
            sponge: Sponge::new(&ASCON_HASH),
        }
    }

    /// Ascon-HashA.
    pub fn hasha() -> Self {
        Self {
            sponge: Sponge::new(&ASCON_HASHA),
        }
    }

    /// Absorbs `data`. May be called any number of times.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Returns the digest of everything absorbed so far without consuming
    /// the hasher.
    pub fn digest(&self) -> [u8; DIGEST_SIZE] {
        self.clone().finalize()
    }

    /// Completes the computation and returns the 32-byte digest.
    pub fn finalize(self) -> [u8; DIGEST_SIZE] {
        let mut out = [0u8; DIGEST_SIZE];
        self.sponge.into_reader().squeeze(&mut out);
        out
    }
}

impl Default for AsconHash {
    fn default() -> Self {
        Self::hash()
    }
}

/// Incremental Ascon-Xof / Ascon-XofA.
#[derive(Clone)]
pub struct AsconXof {
    sponge: Sponge,
}

impl AsconXof {
    /// Creates an XOF for a parameter set such as [`ASCON_XOF`] or
    /// [`ASCON_XOFA`].
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedParameters`] for a fixed-length digest IV or more
    /// than 12 rounds.
    pub fn new(params: AsconHashParams) -> Result<Self> {
        params.validate(0)?;
        Ok(Self {
            sponge: Sponge::new(&params),
        })
    }

    /// Ascon-Xof.
    pub fn xof() -> Self {
        Self {
            sponge: Sponge::new(&ASCON_XOF),
        }
    }

    /// Ascon-XofA.
    pub fn xofa() -> Self {
        Self {
            sponge: Sponge::new(&ASCON_XOFA),
        }
    }

    /// Absorbs `data`. May be called any number of times.
    pub fn update(&mut self, data: &[u8]) {
        self.sponge.absorb(data);
    }

    /// Ends absorption and returns a reader over the output stream.
    pub fn finalize_xof(self) -> AsconXofReader {
        self.sponge.into_reader()
    }

    /// Fills `out` with output, consuming the XOF.
    pub fn finalize_into(self, out: &mut [u8]) {
        self.finalize_xof().squeeze(out);
    }
}

impl Default for AsconXof {
    fn default() -> Self {
        Self::xof()
    }
}

/// Squeezing half of the sponge.
///
/// Successive [`squeeze`](Self::squeeze) calls continue the same output
/// stream, so reading 10 then 22 bytes equals reading 32 bytes at once.
#[derive(Clone)]
pub struct AsconXofReader {
    state: AsconState,
    /// Bytes of the current rate block already handed out.
    pos: usize,
    b_rounds: usize,
}

impl AsconXofReader {
    /// Writes the next `out.len()` output bytes.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        for o in out.iter_mut() {
            if self.pos == RATE {
                self.state.permute(self.b_rounds);
                self.pos = 0;
            }
            *o = self.state.byte(self.pos);
            self.pos += 1;
        }
    }
}

/// One-shot Ascon-Hash.
pub fn ascon_hash(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut hasher = AsconHash::hash();
    hasher.update(data);
    hasher.finalize()
}

/// One-shot Ascon-Xof filling `out`.
pub fn ascon_xof(data: &[u8], out: &mut [u8]) {
    let mut xof = AsconXof::xof();
    xof.update(data);
    xof.finalize_into(out);
}
