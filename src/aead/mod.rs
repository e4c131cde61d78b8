//! Authenticated encryption with associated data.
//!
//! Every AEAD in this module is a staged protocol:
//!
//! ```text
//! Init ──write_ad──▶ AssociatedData ──encrypt/decrypt──▶ Data ──finalize/verify──▶ Done
//!   └───────────────────────────┴──────────────────────────┘
//! ```
//!
//! - associated data may only be written before the first ciphertext byte
//! - the first `encrypt`/`decrypt`/`finalize`/`verify` closes the
//!   associated-data phase exactly once
//! - `finalize`/`verify` are legal from any stage except `Done`
//! - nothing is legal once `Done`
//!
//! Out-of-order calls fail with [`Error::InvalidStage`]. A tag mismatch is
//! *not* an error: [`Aead::verify`] returns `Ok(false)`.
//!
//! Two families are provided:
//!
//! - [`Poly1305Aead`], which composes any [`StreamCipher`](crate::stream::StreamCipher)
//!   with Poly1305 as in RFC 8439, instantiated as [`ChaCha20Poly1305`],
//!   [`Salsa20Poly1305`], [`XChaCha20Poly1305`] and [`XSalsa20Poly1305`]
//! - [`Ascon`], the permutation-based sponge AEAD (Ascon-128, Ascon-128a,
//!   Ascon-80pq)
//!
//! Decryption hands out plaintext before the tag has been checked. Callers
//! must not act on it until [`Aead::verify`] has returned `Ok(true)`.

use crate::ct::ConstantTimeEq;
use crate::error::{Error, Result};

mod ascon;
mod composer;

pub use ascon::{
    ASCON_80PQ, ASCON_128, ASCON_128A, Ascon, AsconParams, NONCE_SIZE as ASCON_NONCE_SIZE,
};
pub use composer::{
    ChaCha20Poly1305, Poly1305Aead, Salsa20Poly1305, XChaCha20Poly1305, XSalsa20Poly1305,
};

/// Tag size shared by every AEAD in this module, in bytes.
pub const TAG_SIZE: usize = 16;

/// Authentication tag.
pub type Tag = [u8; TAG_SIZE];

/// Protocol stage of an AEAD instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Nothing has been written yet.
    #[default]
    Init,
    /// Associated data is being absorbed.
    AssociatedData,
    /// Ciphertext is being produced or consumed.
    Data,
    /// The tag has been produced or checked.
    Done,
}

impl Stage {
    /// Moves to `next`. Stages only ever move forward.
    pub(crate) fn advance(&mut self, next: Stage) {
        debug_assert!(next >= *self, "stage moved backwards: {self:?} -> {next:?}");
        if *self != next {
            log::trace!("aead stage {self:?} -> {next:?}");
            *self = next;
        }
    }

    /// Fails unless associated data may still be written.
    pub(crate) fn check_associated_data(self, operation: &'static str) -> Result<()> {
        match self {
            Stage::Init | Stage::AssociatedData => Ok(()),
            stage => Err(Error::InvalidStage { operation, stage }),
        }
    }

    /// Fails once the instance is finished.
    pub(crate) fn check_not_done(self, operation: &'static str) -> Result<()> {
        match self {
            Stage::Done => Err(Error::InvalidStage {
                operation,
                stage: self,
            }),
            _ => Ok(()),
        }
    }
}

/// Staged authenticated encryption with associated data.
pub trait Aead {
    /// Tag size, in bytes.
    const TAG_SIZE: usize = TAG_SIZE;

    /// Current protocol stage.
    fn stage(&self) -> Stage;

    /// Absorbs associated data. Only legal before any ciphertext.
    fn write_ad(&mut self, ad: &[u8]) -> Result<()>;

    /// Encrypts `buf` in place and authenticates the resulting ciphertext.
    fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Authenticates the ciphertext in `buf` and decrypts it in place.
    fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Finishes the message and returns its tag.
    fn finalize(&mut self) -> Result<Tag>;

    /// Finishes the message and compares its tag against `tag` in constant
    /// time. A tag of the wrong length never matches.
    fn verify(&mut self, tag: &[u8]) -> Result<bool> {
        self.stage().check_not_done("verify")?;
        let expected = self.finalize()?;
        Ok(expected[..].ct_eq(tag))
    }

    /// Encrypts `src` into the first `src.len()` bytes of `dst`.
    ///
    /// On error the contents of `dst` are unspecified.
    fn encrypt_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        let dst = prepare_output(dst, src)?;
        self.encrypt_in_place(dst)
    }

    /// Decrypts `src` into the first `src.len()` bytes of `dst`.
    ///
    /// On error the contents of `dst` are unspecified.
    fn decrypt_into(&mut self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        let dst = prepare_output(dst, src)?;
        self.decrypt_in_place(dst)
    }

    /// Ciphertext length for a `len` byte plaintext (the tag is separate).
    fn encrypt_size(&self, len: usize) -> usize {
        len
    }
}

/// Copies `src` into the front of `dst` and returns that region.
fn prepare_output<'a>(dst: &'a mut [u8], src: &[u8]) -> Result<&'a mut [u8]> {
    if dst.len() < src.len() {
        return Err(Error::BufferTooSmall {
            needed: src.len(),
            got: dst.len(),
        });
    }
    let dst = &mut dst[..src.len()];
    dst.copy_from_slice(src);
    Ok(dst)
}
