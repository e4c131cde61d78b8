use super::{Pad, copy_tail};
use crate::error::PaddingError;

/// Zero-byte padding.
///
/// Short tails are filled with zeros; block-aligned messages are left as is.
/// Removal strips every trailing zero byte, so a message that itself ends in
/// zeros does not round-trip. That ambiguity is inherent to the scheme and is
/// kept as-is: only use it for data whose length is carried elsewhere or
/// that cannot end in `0x00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroPadding;

impl Pad for ZeroPadding {
    #[inline(always)]
    fn pad_size(&self, used: usize, block_size: usize) -> usize {
        if block_size == 0 || used % block_size == 0 {
            0
        } else {
            block_size
        }
    }

    fn pad(&self, tail: &[u8], block: &mut [u8]) -> Result<(), PaddingError> {
        copy_tail(tail, block)?;
        block[tail.len()..].fill(0);
        Ok(())
    }

    fn unpad<'a>(&self, block: &'a [u8]) -> Result<&'a [u8], PaddingError> {
        let end = block.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        Ok(&block[..end])
    }
}
