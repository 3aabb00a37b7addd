//! Running AES-128-CBC state for incremental body decryption.
//!
//! The container body is one continuous CBC stream. The chaining state must
//! survive across network chunks, so the context is created once per session
//! and advanced block by block; it is never reset mid-stream.

use aes::Aes128;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::core::CIPHER_BLOCK_SIZE;

use super::keys::KeyProvider;

type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes128CbcEnc = cbc::Encryptor<Aes128>;

/// Incremental CBC decryption context for one container body.
pub struct CipherContext {
    inner: Aes128CbcDec,
}

impl CipherContext {
    /// Create a fresh context seeded with the provider's key and IV.
    pub fn new(keys: &dyn KeyProvider) -> Self {
        let key = keys.key();
        let iv = keys.iv();
        Self {
            inner: Aes128CbcDec::new(&key.into(), &iv.into()),
        }
    }

    /// Decrypt one 16-byte block, advancing the chaining state.
    pub fn decrypt_block(&mut self, ciphertext: &[u8; CIPHER_BLOCK_SIZE]) -> [u8; CIPHER_BLOCK_SIZE] {
        let mut block = GenericArray::clone_from_slice(ciphertext);
        self.inner.decrypt_block_mut(&mut block);
        block.into()
    }
}

impl std::fmt::Debug for CipherContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherContext").finish_non_exhaustive()
    }
}

/// Incremental CBC encryption context.
///
/// The decoder never encrypts; this is the authoring counterpart used to
/// produce container bodies (and the round-trip fixtures in the test suite).
pub struct FrameEncryptor {
    inner: Aes128CbcEnc,
}

impl FrameEncryptor {
    /// Create a fresh encryptor seeded with the provider's key and IV.
    pub fn new(keys: &dyn KeyProvider) -> Self {
        let key = keys.key();
        let iv = keys.iv();
        Self {
            inner: Aes128CbcEnc::new(&key.into(), &iv.into()),
        }
    }

    /// Encrypt one 16-byte block, advancing the chaining state.
    pub fn encrypt_block(&mut self, plaintext: &[u8; CIPHER_BLOCK_SIZE]) -> [u8; CIPHER_BLOCK_SIZE] {
        let mut block = GenericArray::clone_from_slice(plaintext);
        self.inner.encrypt_block_mut(&mut block);
        block.into()
    }

    /// Encrypt a block-aligned buffer in one call.
    ///
    /// # Panics
    /// Panics if `plaintext` is not a multiple of the cipher block size.
    pub fn encrypt(&mut self, plaintext: &[u8]) -> Vec<u8> {
        assert_eq!(plaintext.len() % CIPHER_BLOCK_SIZE, 0);

        let mut out = Vec::with_capacity(plaintext.len());
        for chunk in plaintext.chunks_exact(CIPHER_BLOCK_SIZE) {
            let block: [u8; CIPHER_BLOCK_SIZE] = chunk.try_into().unwrap();
            out.extend_from_slice(&self.encrypt_block(&block));
        }
        out
    }
}

impl std::fmt::Debug for FrameEncryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameEncryptor").finish_non_exhaustive()
    }
}
