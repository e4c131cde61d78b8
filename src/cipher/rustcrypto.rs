//! Adapter from the RustCrypto `cipher` traits to [`BlockCipher`].

use cipher::{Block, BlockDecrypt, BlockEncrypt, KeyInit};

use super::{BlockCipher, block_range};
use crate::error::{Error, Result};

/// Wraps a RustCrypto block cipher so it can drive this crate's modes.
#[derive(Clone)]
pub struct RustCryptoBlock<C> {
    inner: C,
}

impl<C: KeyInit> RustCryptoBlock<C> {
    /// Runs the key schedule for `key`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyLength`] if the algorithm rejects the key size.
    pub fn new(key: &[u8]) -> Result<Self> {
        let inner =
            C::new_from_slice(key).map_err(|_| Error::InvalidKeyLength { got: key.len() })?;

        log::debug!(
            "initialized {} block cipher with a {} byte key",
            core::any::type_name::<C>(),
            key.len()
        );

        Ok(Self { inner })
    }
}

impl<C> From<C> for RustCryptoBlock<C> {
    fn from(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: BlockEncrypt + BlockDecrypt> BlockCipher for RustCryptoBlock<C> {
    #[inline(always)]
    fn block_size(&self) -> usize {
        C::block_size()
    }

    fn encrypt_block(&self, buf: &mut [u8], index: usize) -> Result<()> {
        let range = block_range(buf.len(), C::block_size(), index)?;
        self.inner
            .encrypt_block(Block::<C>::from_mut_slice(&mut buf[range]));
        Ok(())
    }

    fn decrypt_block(&self, buf: &mut [u8], index: usize) -> Result<()> {
        let range = block_range(buf.len(), C::block_size(), index)?;
        self.inner
            .decrypt_block(Block::<C>::from_mut_slice(&mut buf[range]));
        Ok(())
    }
}
