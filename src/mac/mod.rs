//! Message authentication codes.
//!
//! Currently provides [`Poly1305`], the one-time authenticator used by the
//! AEAD constructions in [`crate::aead`].
//!
//! A Poly1305 key must authenticate exactly one message. AEAD constructions
//! satisfy this by deriving a fresh key from the stream cipher for every
//! `(key, nonce)` pair; see [`Poly1305::from_stream`].

mod poly1305;

pub use poly1305::Poly1305;
