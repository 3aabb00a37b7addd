//! Cipher context and key management for the container body.

mod cipher;
mod keys;

pub use cipher::{CipherContext, FrameEncryptor};
pub use keys::{IV_SIZE, KEY_SIZE, KeyProvider, StaticKeys, VENDOR_IV, VENDOR_KEY, VendorKeys};
