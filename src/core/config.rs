//! Decoder configuration.

use std::time::Duration;

use super::constants::{
    BYTES_PER_PIXEL, CIPHER_BLOCK_SIZE, DEFAULT_IDLE_TIMEOUT, DEFAULT_MATRIX_SIZE,
    DEFAULT_MAX_FRAMES,
};
use super::error::ConfigError;

/// Validated decoder configuration.
///
/// Construct through [`DecoderConfigBuilder`]; `build()` rejects geometries
/// whose frame size does not align on cipher-block boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    width: usize,
    height: usize,
    max_frames: usize,
    idle_timeout: Duration,
}

impl DecoderConfig {
    /// Matrix width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Maximum number of frames the store will hold.
    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    /// Idle watchdog threshold.
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Frame payload size in bytes (width * height * 3, packed RGB).
    pub fn frame_size(&self) -> usize {
        self.width * self.height * BYTES_PER_PIXEL
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        // The default 16x16 geometry is always block-aligned.
        Self {
            width: DEFAULT_MATRIX_SIZE,
            height: DEFAULT_MATRIX_SIZE,
            max_frames: DEFAULT_MAX_FRAMES,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Builder for [`DecoderConfig`].
#[derive(Debug, Clone)]
pub struct DecoderConfigBuilder {
    width: usize,
    height: usize,
    max_frames: usize,
    idle_timeout: Duration,
}

impl Default for DecoderConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderConfigBuilder {
    /// Create a builder seeded with the default 16x16 geometry.
    pub fn new() -> Self {
        let defaults = DecoderConfig::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            max_frames: defaults.max_frames,
            idle_timeout: defaults.idle_timeout,
        }
    }

    /// Set the matrix width in pixels.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the matrix height in pixels.
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the frame-store capacity in frames.
    pub fn max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Set the idle watchdog threshold.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<DecoderConfig, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimension("matrix side must be nonzero"));
        }
        if self.max_frames == 0 {
            return Err(ConfigError::InvalidDimension("max_frames must be nonzero"));
        }

        let frame_size = self.width * self.height * BYTES_PER_PIXEL;
        if frame_size % CIPHER_BLOCK_SIZE != 0 {
            return Err(ConfigError::UnalignedFrameSize {
                frame_size,
                block: CIPHER_BLOCK_SIZE,
            });
        }

        Ok(DecoderConfig {
            width: self.width,
            height: self.height,
            max_frames: self.max_frames,
            idle_timeout: self.idle_timeout,
        })
    }
}
