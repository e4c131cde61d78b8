//! The 320-bit Ascon permutation.
//!
//! The state is five 64-bit lanes `x0..x4`. As a byte string it is the
//! big-endian serialization of the lanes, so byte `i` lives in lane `i / 8`
//! at bit offset `56 - 8 * (i % 8)`. All sponge operations (absorbing,
//! squeezing, key injection) are expressed on that byte view.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum number of rounds (`p^12`).
pub(crate) const MAX_ROUNDS: usize = 12;

#[inline(always)]
fn shift(index: usize) -> u32 {
    (56 - 8 * (index % 8)) as u32
}

/// One substitution + linear diffusion round with round constant `c`.
#[inline(always)]
fn round(s: &mut [u64; 5], c: u64) {
    let [mut x0, mut x1, mut x2, mut x3, mut x4] = *s;

    x2 ^= c;

    // Substitution layer (bitsliced 5-bit S-box)
    x0 ^= x4;
    x4 ^= x3;
    x2 ^= x1;

    let t0 = !x0 & x1;
    let t1 = !x1 & x2;
    let t2 = !x2 & x3;
    let t3 = !x3 & x4;
    let t4 = !x4 & x0;

    x0 ^= t1;
    x1 ^= t2;
    x2 ^= t3;
    x3 ^= t4;
    x4 ^= t0;

    x1 ^= x0;
    x0 ^= x4;
    x3 ^= x2;
    x2 = !x2;

    // Linear diffusion layer
    x0 ^= x0.rotate_right(19) ^ x0.rotate_right(28);
    x1 ^= x1.rotate_right(61) ^ x1.rotate_right(39);
    x2 ^= x2.rotate_right(1) ^ x2.rotate_right(6);
    x3 ^= x3.rotate_right(10) ^ x3.rotate_right(17);
    x4 ^= x4.rotate_right(7) ^ x4.rotate_right(41);

    *s = [x0, x1, x2, x3, x4];
}

/// Ascon state viewed as 40 bytes.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub(crate) struct AsconState {
    lanes: [u64; 5],
}

impl AsconState {
    /// State size, in bytes.
    pub(crate) const SIZE: usize = 40;

    /// Creates a state from its five lanes.
    pub(crate) fn from_lanes(lanes: [u64; 5]) -> Self {
        Self { lanes }
    }

    /// Reads byte `index`.
    #[inline(always)]
    pub(crate) fn byte(&self, index: usize) -> u8 {
        (self.lanes[index / 8] >> shift(index)) as u8
    }

    /// XORs `value` into byte `index`.
    #[inline(always)]
    pub(crate) fn xor_byte(&mut self, index: usize, value: u8) {
        self.lanes[index / 8] ^= u64::from(value) << shift(index);
    }

    /// Overwrites byte `index` with `value`.
    #[inline(always)]
    pub(crate) fn set_byte(&mut self, index: usize, value: u8) {
        let shift = shift(index);
        let lane = &mut self.lanes[index / 8];
        *lane = (*lane & !(0xff << shift)) | (u64::from(value) << shift);
    }

    /// XORs `bytes` into the state starting at byte `offset`.
    pub(crate) fn xor_bytes(&mut self, offset: usize, bytes: &[u8]) {
        for (i, &b) in bytes.iter().enumerate() {
            self.xor_byte(offset + i, b);
        }
    }

    /// Copies `out.len()` state bytes starting at `offset` into `out`.
    pub(crate) fn extract(&self, offset: usize, out: &mut [u8]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = self.byte(offset + i);
        }
    }

    /// Applies the last `rounds` rounds of `p^12`.
    ///
    /// Round `i` (of 0..12) uses the constant `((0xf - i) << 4) | i`. Callers
    /// validate `rounds <= 12` up front.
    pub(crate) fn permute(&mut self, rounds: usize) {
        debug_assert!(rounds <= MAX_ROUNDS);
        for i in MAX_ROUNDS.saturating_sub(rounds)..MAX_ROUNDS {
            let c = (((0xf - i) << 4) | i) as u64;
            round(&mut self.lanes, c);
        }
    }
}
