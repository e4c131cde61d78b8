//! Hash functions and extendable-output functions.
//!
//! Currently the Ascon family, built on the same permutation as the
//! [`Ascon`](crate::aead::Ascon) AEAD:
//!
//! - [`AsconHash::hash`] and [`AsconHash::hasha`], 32-byte digests
//! - [`AsconXof::xof`] and [`AsconXof::xofa`], any output length
//!
//! `new` accepts a custom [`AsconHashParams`] but refuses an XOF IV for a
//! digest and a digest IV for an XOF.
//!
//! ```
//! use cryptal_sym::hash::ascon_hash;
//!
//! let digest = ascon_hash(b"");
//! assert_eq!(digest[0], 0x73);
//! ```

mod ascon;

pub use ascon::{
    ASCON_HASH, ASCON_HASHA, ASCON_XOF, ASCON_XOFA, AsconHash, AsconHashParams, AsconXof,
    AsconXofReader, DIGEST_SIZE, ascon_hash, ascon_xof,
};
