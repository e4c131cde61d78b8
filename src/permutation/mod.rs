//! Cryptographic permutations shared between constructions.
//!
//! The Ascon permutation is used by both the Ascon AEAD family in
//! [`crate::aead`] and the Ascon hash/XOF family in [`crate::hash`].

mod ascon;

pub(crate) use ascon::{AsconState, MAX_ROUNDS};
