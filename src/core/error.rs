//! Error types for the pixel-bean decoder.

use thiserror::Error;

use super::constants::{LEGACY_CODE_ACK_TIMEOUT, LEGACY_CODE_DISCONNECTED};

/// Terminal failure causes for a download.
///
/// Every cause carries its own tag through the callback boundary. The
/// original firmware collapsed all of these into two numeric codes;
/// [`DownloadError::legacy_code`] recovers that mapping for callers that
/// still need it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DownloadError {
    /// Socket or TLS failure reported by the transport.
    #[error("transport error (code {0})")]
    Transport(i8),

    /// No application-level acknowledgment within the deadline.
    #[error("no acknowledgment from server within deadline")]
    AckTimeout,

    /// No bytes received within the configured silence window.
    #[error("stream idle past the configured threshold")]
    IdleTimeout,

    /// The container declared more frames than the store can hold.
    #[error("container declares {declared} frames, store capacity is {max}")]
    FrameCountExceeded {
        /// Frame count declared in the file header.
        declared: u8,
        /// Frame-store capacity.
        max: usize,
    },

    /// The connection closed before the final frame was decoded.
    #[error("disconnected before the stream completed")]
    Disconnected,
}

impl DownloadError {
    /// Map the tagged cause onto the two-valued codes of the original
    /// untyped error callback (-2 for ack timeout, -1 for everything else).
    pub fn legacy_code(&self) -> i8 {
        match self {
            DownloadError::AckTimeout => LEGACY_CODE_ACK_TIMEOUT,
            _ => LEGACY_CODE_DISCONNECTED,
        }
    }
}

/// Errors raised while validating a [`DecoderConfig`](super::DecoderConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Frame size must align on cipher-block boundaries, otherwise frames
    /// would straddle blocks and the decode loop could never emit cleanly.
    #[error("frame size {frame_size} is not a multiple of the cipher block ({block})")]
    UnalignedFrameSize {
        /// Computed frame size (width * height * 3).
        frame_size: usize,
        /// Cipher block size.
        block: usize,
    },

    /// Zero-sized matrix or zero frame capacity.
    #[error("invalid dimension: {0}")]
    InvalidDimension(&'static str),
}
