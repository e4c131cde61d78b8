//! Poly1305 AEAD over an arbitrary stream cipher (RFC 8439 §2.8).
//!
//! ```text
//! otk  = first 32 bytes of keystream block 0
//! data = keystream from block 1 onwards
//! tag  = Poly1305(otk, ad || pad16 || ct || pad16 || le64(|ad|) || le64(|ct|))
//! ```
//!
//! The composition only needs [`StreamCipher`]; the key and nonce layout is
//! whatever the underlying cipher accepts. The four standard pairings are
//! exported as type aliases.
//!
//! Data may not outrun the cipher's counter: with a bounded
//! [`StreamCipher::keystream_blocks`] (IETF ChaCha20 has 2^32 blocks) the
//! message is capped at the blocks after block 0, and longer input fails
//! with [`Error::KeystreamExhausted`](crate::Error::KeystreamExhausted).

use zeroize::Zeroize;

use super::{Aead, Stage, Tag};
use crate::error::{Error, Result};
use crate::mac::Poly1305;
use crate::stream::{ChaCha20, KeyNonceInit, Salsa20, StreamCipher, XChaCha20, XSalsa20};

/// ChaCha20-Poly1305. A 12-byte nonce gives RFC 8439; an 8-byte nonce the
/// original 64-bit-counter layout.
pub type ChaCha20Poly1305 = Poly1305Aead<ChaCha20>;

/// XChaCha20-Poly1305 with a 24-byte nonce.
pub type XChaCha20Poly1305 = Poly1305Aead<XChaCha20>;

/// Salsa20-Poly1305 with an 8-byte nonce.
pub type Salsa20Poly1305 = Poly1305Aead<Salsa20>;

/// XSalsa20-Poly1305 with a 24-byte nonce.
pub type XSalsa20Poly1305 = Poly1305Aead<XSalsa20>;

const ZERO_PAD: [u8; 16] = [0; 16];

/// A stream cipher composed with a one-time Poly1305 authenticator.
#[derive(Clone)]
pub struct Poly1305Aead<S> {
    cipher: S,
    mac: Poly1305,
    ad_len: u64,
    ct_len: u64,
    stage: Stage,
}

impl<S: StreamCipher + KeyNonceInit> Poly1305Aead<S> {
    /// Keys the stream cipher and derives the Poly1305 one-time key.
    ///
    /// # Errors
    ///
    /// Key or nonce length errors from the cipher.
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        let cipher = S::new(key, nonce)?;
        log::debug!(
            "{}-Poly1305 keyed with a {} byte nonce",
            S::NAME,
            nonce.len()
        );
        Self::from_cipher(cipher)
    }
}

impl<S: StreamCipher> Poly1305Aead<S> {
    /// Wraps an already keyed cipher positioned at keystream block 0.
    ///
    /// # Errors
    ///
    /// [`Error::BlockSizeTooSmall`](crate::Error::BlockSizeTooSmall) if the
    /// cipher's block cannot hold a 32-byte Poly1305 key.
    pub fn from_cipher(mut cipher: S) -> Result<Self> {
        let mac = Poly1305::from_stream(&mut cipher)?;
        Ok(Self {
            cipher,
            mac,
            ad_len: 0,
            ct_len: 0,
            stage: Stage::Init,
        })
    }

    /// Closes the associated-data phase on first use. The AD is padded to a
    /// 16-byte boundary exactly once.
    fn begin_data(&mut self, operation: &'static str) -> Result<()> {
        self.stage.check_not_done(operation)?;
        if self.stage < Stage::Data {
            pad16(&mut self.mac, self.ad_len);
            self.stage.advance(Stage::Data);
        }
        Ok(())
    }

    /// Fails if `len` more bytes would run the keystream past its counter.
    fn reserve(&self, len: usize) -> Result<()> {
        if let Some(blocks) = self.cipher.keystream_blocks() {
            // Block 0 keyed the MAC
            let limit = blocks
                .saturating_sub(1)
                .saturating_mul(self.cipher.block_size() as u64);
            if self.ct_len.saturating_add(len as u64) > limit {
                return Err(Error::KeystreamExhausted { limit });
            }
        }
        Ok(())
    }
}

impl<S: StreamCipher> Aead for Poly1305Aead<S> {
    fn stage(&self) -> Stage {
        self.stage
    }

    fn write_ad(&mut self, ad: &[u8]) -> Result<()> {
        self.stage.check_associated_data("write_ad")?;
        self.mac.write(ad);
        self.ad_len += ad.len() as u64;
        self.stage.advance(Stage::AssociatedData);
        Ok(())
    }

    fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<()> {
        self.begin_data("encrypt")?;
        self.reserve(buf.len())?;
        self.cipher.apply_keystream(buf);
        self.mac.write(buf);
        self.ct_len += buf.len() as u64;
        Ok(())
    }

    fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<()> {
        self.begin_data("decrypt")?;
        self.reserve(buf.len())?;
        self.mac.write(buf);
        self.cipher.apply_keystream(buf);
        self.ct_len += buf.len() as u64;
        Ok(())
    }

    fn finalize(&mut self) -> Result<Tag> {
        self.begin_data("finalize")?;

        pad16(&mut self.mac, self.ct_len);
        self.mac.write(&self.ad_len.to_le_bytes());
        self.mac.write(&self.ct_len.to_le_bytes());

        let tag = self.mac.digest();
        self.mac.zeroize();
        self.stage.advance(Stage::Done);
        Ok(tag)
    }
}

/// Zero-pads the MAC input after `len` bytes up to a 16-byte boundary.
fn pad16(mac: &mut Poly1305, len: u64) {
    let rem = (len % 16) as usize;
    if rem != 0 {
        mac.write(&ZERO_PAD[..16 - rem]);
    }
}
