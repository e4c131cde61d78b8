use super::{Pad, copy_tail};
use crate::ct;
use crate::error::PaddingError;

/// PKCS#7 padding (RFC 5652 §6.3).
///
/// The tail is extended with `N` bytes of value `N`, where `N` is the number
/// of bytes missing from the block. An aligned message still receives a full
/// block of padding so that the pad is always present and detectable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pkcs7;

impl Pad for Pkcs7 {
    #[inline(always)]
    fn pad_size(&self, _used: usize, block_size: usize) -> usize {
        block_size
    }

    fn pad(&self, tail: &[u8], block: &mut [u8]) -> Result<(), PaddingError> {
        copy_tail(tail, block)?;

        let count = block.len() - tail.len();
        let value = u8::try_from(count).map_err(|_| PaddingError::InvalidPadCount {
            count,
            block_size: block.len(),
        })?;
        block[tail.len()..].fill(value);

        Ok(())
    }

    fn unpad<'a>(&self, block: &'a [u8]) -> Result<&'a [u8], PaddingError> {
        let Some(&last) = block.last() else {
            return Err(PaddingError::InvalidLength { len: 0 });
        };

        let count = last as usize;
        if count == 0 || count > block.len() {
            return Err(PaddingError::InvalidPadCount {
                count,
                block_size: block.len(),
            });
        }

        let (data, pad) = block.split_at(block.len() - count);
        if ct::diff(pad, pad, |&b, _| b ^ last) != 0 {
            return Err(PaddingError::InconsistentPadding);
        }

        Ok(data)
    }
}
