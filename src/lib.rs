//! Symmetric cryptography composition layer for Nebula
//!
//! This crate turns fixed-size cryptographic transforms (a block cipher, a
//! stream cipher, a universal hash, a permutation) into complete,
//! byte-exact protocols: block chaining with padding, and authenticated
//! encryption with associated data.
//!
//! The focus is on **clarity, predictability, and auditability**. Every
//! construction reproduces its published test vectors bit for bit, checks
//! its usage order explicitly, and compares authentication tags in constant
//! time.
//!
//! # Module overview
//!
//! - `cipher`
//!   The [`BlockCipher`](cipher::BlockCipher) contract, plus Blowfish and
//!   Twofish adapters over the RustCrypto implementations (behind the
//!   `blowfish` and `twofish` features).
//!
//! - `padding`
//!   Stateless block padding schemes: PKCS#7, ISO/IEC 7816-4 and zero
//!   padding.
//!
//! - `mode`
//!   Block-cipher modes of operation. Currently CBC, generic over any
//!   cipher and padding scheme.
//!
//! - `stream`
//!   The [`StreamCipher`](stream::StreamCipher) contract with ChaCha20,
//!   XChaCha20, Salsa20 and XSalsa20.
//!
//! - `mac`
//!   Poly1305, implemented with 13-bit limbs.
//!
//! - `aead`
//!   Staged AEAD constructions: Poly1305 composed with any stream cipher
//!   (RFC 8439 layout), and the Ascon family.
//!
//!   Every AEAD follows the same four-stage protocol
//!   (`Init → AssociatedData → Data → Done`) and reports out-of-order calls
//!   as errors rather than silently producing wrong tags.
//!
//! - `hash`
//!   Ascon-Hash, Ascon-HashA, Ascon-Xof and Ascon-XofA, sharing the Ascon
//!   permutation with the AEAD.
//!
//! - `ct`
//!   Constant-time comparison and selection helpers.
//!
//! # Design goals
//!
//! - No secret-dependent branches in tag checks or final reductions
//! - Key material wiped on drop
//! - Explicit, typed errors; tag mismatch is a value, not an error
//! - Incremental APIs that accept input in arbitrary slices
//!
//! # Example
//!
//! ```
//! use cryptal_sym::aead::{Aead, ChaCha20Poly1305};
//!
//! let key = [0x42u8; 32];
//! let nonce = [0x24u8; 12];
//!
//! let mut sealer = ChaCha20Poly1305::new(&key, &nonce)?;
//! sealer.write_ad(b"header")?;
//! let mut buf = *b"attack at dawn";
//! sealer.encrypt_in_place(&mut buf)?;
//! let tag = sealer.finalize()?;
//!
//! let mut opener = ChaCha20Poly1305::new(&key, &nonce)?;
//! opener.write_ad(b"header")?;
//! opener.decrypt_in_place(&mut buf)?;
//! assert!(opener.verify(&tag)?);
//! assert_eq!(&buf, b"attack at dawn");
//! # Ok::<(), cryptal_sym::Error>(())
//! ```

pub mod aead;
pub mod cipher;
pub mod ct;
pub mod error;
pub mod hash;
pub mod mac;
pub mod mode;
pub mod padding;
pub mod stream;

mod permutation;

pub use error::{Error, PaddingError, Result};
