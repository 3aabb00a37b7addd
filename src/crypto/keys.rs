//! Key material and the key-provider abstraction.
//!
//! The container format uses a fixed vendor key and IV (they are not
//! session secrets). Decoders consume keys through [`KeyProvider`] so a
//! rotated key can be supplied without rebuilding the binary.

use zeroize::Zeroize;

use crate::core::CIPHER_BLOCK_SIZE;

/// AES-128 key size.
pub const KEY_SIZE: usize = 16;

/// CBC IV size (one cipher block).
pub const IV_SIZE: usize = CIPHER_BLOCK_SIZE;

/// The vendor's compiled-in container key.
pub const VENDOR_KEY: [u8; KEY_SIZE] = *b"78hrey23y28ogs89";

/// The vendor's compiled-in container IV.
pub const VENDOR_IV: [u8; IV_SIZE] = *b"1234567890123456";

/// Source of the key/IV pair used to decrypt a container body.
pub trait KeyProvider {
    /// The 128-bit AES key.
    fn key(&self) -> [u8; KEY_SIZE];

    /// The 128-bit CBC initialization vector.
    fn iv(&self) -> [u8; IV_SIZE];
}

/// Provider returning the vendor's compiled-in key and IV.
#[derive(Debug, Clone, Copy, Default)]
pub struct VendorKeys;

impl KeyProvider for VendorKeys {
    fn key(&self) -> [u8; KEY_SIZE] {
        VENDOR_KEY
    }

    fn iv(&self) -> [u8; IV_SIZE] {
        VENDOR_IV
    }
}

/// Provider holding externally supplied key material.
///
/// The key is zeroized on drop.
#[derive(Clone)]
pub struct StaticKeys {
    key: [u8; KEY_SIZE],
    iv: [u8; IV_SIZE],
}

impl StaticKeys {
    /// Create a provider from raw key material.
    pub fn new(key: [u8; KEY_SIZE], iv: [u8; IV_SIZE]) -> Self {
        Self { key, iv }
    }
}

impl KeyProvider for StaticKeys {
    fn key(&self) -> [u8; KEY_SIZE] {
        self.key
    }

    fn iv(&self) -> [u8; IV_SIZE] {
        self.iv
    }
}

impl Drop for StaticKeys {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_keys_are_fixed() {
        let keys = VendorKeys;
        assert_eq!(keys.key(), VENDOR_KEY);
        assert_eq!(keys.iv(), VENDOR_IV);
    }

    #[test]
    fn test_vendor_key_material_matches_firmware_constants() {
        // The byte values the original firmware compiled in.
        assert_eq!(
            VENDOR_KEY.to_vec(),
            hex::decode("37386872657932337932386f67733839").unwrap()
        );
        assert_eq!(
            VENDOR_IV.to_vec(),
            hex::decode("31323334353637383930313233343536").unwrap()
        );
    }

    #[test]
    fn test_static_keys_roundtrip() {
        let keys = StaticKeys::new([0xAA; 16], [0xBB; 16]);
        assert_eq!(keys.key(), [0xAA; 16]);
        assert_eq!(keys.iv(), [0xBB; 16]);
    }
}
