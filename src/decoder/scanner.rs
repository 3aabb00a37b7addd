//! Incremental scanner for the transport response preamble.

/// End-of-preamble terminator (blank line after the status line and headers).
const TERMINATOR: &[u8; 4] = b"\r\n\r\n";

/// Locates the end of the HTTP response preamble across chunk boundaries.
///
/// The scanner remembers how much of the `\r\n\r\n` terminator it has
/// already matched, so the preamble may be fragmented arbitrarily; nothing
/// is assumed about chunk sizes.
#[derive(Debug, Default)]
pub(crate) struct PreambleScanner {
    matched: usize,
}

impl PreambleScanner {
    /// Create a scanner with no progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `chunk`, returning the index just past the terminator if the
    /// preamble ends inside this chunk.
    pub fn advance(&mut self, chunk: &[u8]) -> Option<usize> {
        for (i, &byte) in chunk.iter().enumerate() {
            if byte == TERMINATOR[self.matched] {
                self.matched += 1;
                if self.matched == TERMINATOR.len() {
                    self.matched = 0;
                    return Some(i + 1);
                }
            } else if byte == TERMINATOR[0] {
                self.matched = 1;
            } else {
                self.matched = 0;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n\r\n";

    #[test]
    fn test_single_chunk() {
        let mut scanner = PreambleScanner::new();
        assert_eq!(scanner.advance(PREAMBLE), Some(PREAMBLE.len()));
    }

    #[test]
    fn test_body_in_same_chunk() {
        let mut scanner = PreambleScanner::new();
        let mut data = PREAMBLE.to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        assert_eq!(scanner.advance(&data), Some(PREAMBLE.len()));
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut scanner = PreambleScanner::new();
        for (i, byte) in PREAMBLE.iter().enumerate() {
            let result = scanner.advance(std::slice::from_ref(byte));
            if i + 1 == PREAMBLE.len() {
                assert_eq!(result, Some(1));
            } else {
                assert_eq!(result, None);
            }
        }
    }

    #[test]
    fn test_split_inside_terminator() {
        let mut scanner = PreambleScanner::new();
        assert_eq!(scanner.advance(b"HTTP/1.1 200 OK\r\n\r"), None);
        assert_eq!(scanner.advance(b"\nbody"), Some(1));
    }

    #[test]
    fn test_carriage_return_restarts_match() {
        // "\r\n\r" followed by "\r\n\r\n": the stray CR must restart the
        // partial match, not reset it to zero.
        let mut scanner = PreambleScanner::new();
        assert_eq!(scanner.advance(b"x\r\n\r\r\n\r\n"), Some(8));
    }
}
