use super::{Pad, copy_tail};
use crate::error::PaddingError;

/// End-of-data marker.
const MARKER: u8 = 0x80;

/// ISO/IEC 7816-4 padding.
///
/// A single `0x80` byte marks the end of the data and the rest of the block
/// is zero-filled. Like PKCS#7, aligned messages gain a full pad block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso7816;

impl Pad for Iso7816 {
    #[inline(always)]
    fn pad_size(&self, _used: usize, block_size: usize) -> usize {
        block_size
    }

    fn pad(&self, tail: &[u8], block: &mut [u8]) -> Result<(), PaddingError> {
        copy_tail(tail, block)?;

        block[tail.len()] = MARKER;
        block[tail.len() + 1..].fill(0);

        Ok(())
    }

    fn unpad<'a>(&self, block: &'a [u8]) -> Result<&'a [u8], PaddingError> {
        if block.is_empty() {
            return Err(PaddingError::InvalidLength { len: 0 });
        }

        // Skip the zero fill backwards; the first non-zero byte is the marker.
        match block.iter().rposition(|&b| b != 0) {
            Some(end) if block[end] == MARKER => Ok(&block[..end]),
            Some(_) => Err(PaddingError::InconsistentPadding),
            None => Err(PaddingError::MarkerNotFound),
        }
    }
}
