//! The 4-byte plaintext file header.

use crate::core::FILE_HEADER_SIZE;

/// Parsed pixel-bean file header.
///
/// The header is the first four plaintext bytes of the body; everything
/// after it is ciphertext. `speed_ms` is big-endian on the wire and stored
/// in host order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Container kind discriminator.
    pub kind: u8,
    /// Number of frames the body carries.
    pub total_frames: u8,
    /// Playback delay per frame in milliseconds.
    pub speed_ms: u16,
}

impl FileHeader {
    /// Parse a header from its four wire bytes.
    pub fn parse(bytes: &[u8; FILE_HEADER_SIZE]) -> Self {
        Self {
            kind: bytes[0],
            total_frames: bytes[1],
            speed_ms: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }

    /// Encode the header back to its wire form.
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let speed = self.speed_ms.to_be_bytes();
        [self.kind, self.total_frames, speed[0], speed[1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_converts_speed_to_host_order() {
        let header = FileHeader::parse(&[0x01, 0x02, 0x12, 0x34]);
        assert_eq!(header.kind, 1);
        assert_eq!(header.total_frames, 2);
        assert_eq!(header.speed_ms, 0x1234);
    }

    #[test]
    fn test_wire_roundtrip() {
        let header = FileHeader {
            kind: 3,
            total_frames: 60,
            speed_ms: 150,
        };
        assert_eq!(FileHeader::parse(&header.to_bytes()), header);
    }
}
