//! Block-cipher modes of operation.
//!
//! A mode turns a [`BlockCipher`](crate::cipher::BlockCipher), which only
//! knows how to permute one fixed-size block, into whole-message encryption.
//! Modes are generic over the cipher and over a
//! [`Pad`](crate::padding::Pad) scheme for the final partial block.

mod cbc;

pub use cbc::{Cbc, MAX_BLOCK_SIZE};

/// XORs `src` into `dst`, byte by byte, over the length of `dst`.
#[inline(always)]
pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    dst.iter_mut().zip(src).for_each(|(d, s)| *d ^= s);
}
