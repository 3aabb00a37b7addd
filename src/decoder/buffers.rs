//! Fixed-capacity shift buffers bridging chunk and block boundaries.

/// A fixed-capacity byte accumulator drained from the front.
///
/// Used twice per session: as the ciphertext staging buffer (reconciling
/// network-chunk boundaries with cipher-block boundaries) and as the
/// decrypted-but-not-yet-emitted plaintext buffer. Writes beyond capacity
/// are ignored; the decode loop drains before refilling, so saturation is
/// only reachable through the documented overflow-drop limitation.
#[derive(Debug)]
pub(crate) struct ShiftBuffer {
    buf: Vec<u8>,
    len: usize,
}

impl ShiftBuffer {
    /// Create a buffer with a fixed capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            len: 0,
        }
    }

    /// Occupied length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Total capacity.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The occupied prefix.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Append as much of `input` as fits, returning the number consumed.
    pub fn fill_from(&mut self, input: &[u8]) -> usize {
        let take = input.len().min(self.capacity() - self.len);
        self.buf[self.len..self.len + take].copy_from_slice(&input[..take]);
        self.len += take;
        take
    }

    /// Remove the first `n` bytes, shifting the remainder to the front.
    pub fn drain_front(&mut self, n: usize) {
        debug_assert!(n <= self.len);
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }
}
