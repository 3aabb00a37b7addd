//! Caller-owned output buffer for decoded frames.

use crate::core::DecoderConfig;

/// Flat frame buffer of capacity `max_frames * frame_size` bytes.
///
/// The store is owned by the caller for the whole lifetime of a download;
/// the decoder only ever writes into it. Frame `i` (0-indexed here) lives
/// at byte offset `i * frame_size`. On a failed download the store may
/// contain a prefix of validly decoded frames, but the contract does not
/// say how many.
#[derive(Debug, Clone)]
pub struct FrameStore {
    data: Vec<u8>,
    frame_size: usize,
    max_frames: usize,
}

impl FrameStore {
    /// Allocate a zeroed store sized for the given configuration.
    pub fn new(config: &DecoderConfig) -> Self {
        Self::with_geometry(config.max_frames(), config.frame_size())
    }

    /// Allocate a zeroed store with an explicit geometry.
    pub fn with_geometry(max_frames: usize, frame_size: usize) -> Self {
        Self {
            data: vec![0u8; max_frames * frame_size],
            frame_size,
            max_frames,
        }
    }

    /// Frame payload size in bytes.
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Capacity in frames.
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Borrow one decoded frame, or `None` past capacity.
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        if index >= self.max_frames {
            return None;
        }
        let start = index * self.frame_size;
        Some(&self.data[start..start + self.frame_size])
    }

    /// The whole backing buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write one frame at its slot. Internal to the decode loop.
    pub(crate) fn write_frame(&mut self, index: usize, payload: &[u8]) {
        debug_assert_eq!(payload.len(), self.frame_size);
        debug_assert!(index < self.max_frames);
        let start = index * self.frame_size;
        self.data[start..start + self.frame_size].copy_from_slice(payload);
    }
}
