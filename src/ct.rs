//! Constant-time comparison and selection utilities.
//!
//! Tag verification and the final Poly1305 reduction must not branch on
//! secret data. Everything here is built from XOR/OR accumulation and
//! all-ones/all-zeros masks so the work done is independent of the values
//! being compared or selected.

/// Constant-time equality.
///
/// Implementations must not introduce data-dependent branches or early
/// exits. Lengths are treated as public.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for [u8] {
    /// Every byte pair is XORed and OR-accumulated, so the running time does
    /// not depend on where the first difference occurs.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        diff(self, other, |a, b| a ^ b) == 0
    }
}

impl<const N: usize> ConstantTimeEq for [u8; N] {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        self[..].ct_eq(&other[..])
    }
}

/// OR-accumulates `xor(a[i], b[i])` over every index of the shorter input.
///
/// The closure is invoked exactly once per position, regardless of the
/// values returned so far. Callers compare the result against zero.
#[inline(always)]
pub fn diff<T, F>(a: &[T], b: &[T], mut xor: F) -> u8
where
    F: FnMut(&T, &T) -> u8,
{
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | xor(x, y))
}

/// Returns `0xffff_ffff` when `bit == 1` and `0` when `bit == 0`.
///
/// `bit` must be 0 or 1.
#[inline(always)]
pub fn mask_from_bit(bit: u32) -> u32 {
    (bit ^ 1).wrapping_sub(1)
}

/// Selects `a` where `mask` is all ones and `b` where it is all zeros.
#[inline(always)]
pub fn select(mask: u32, a: u32, b: u32) -> u32 {
    (a & mask) | (b & !mask)
}
