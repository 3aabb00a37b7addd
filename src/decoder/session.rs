//! Per-download session state.

use std::time::Instant;

use crate::core::{DecoderConfig, DownloadError};
use crate::crypto::{CipherContext, KeyProvider};

use super::buffers::ShiftBuffer;
use super::header::FileHeader;
use super::scanner::PreambleScanner;

/// Decode lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Waiting for the end of the transport response preamble.
    AwaitingTransportHeader,
    /// Accumulating the 4-byte plaintext file header.
    ParsingFileHeader,
    /// Decrypting and emitting frames.
    DecodingFrames,
    /// All declared frames decoded.
    Completed,
    /// Container declared more frames than the store holds; body abandoned.
    Skipped,
    /// Failed (transport error, idle timeout, or early disconnect).
    Errored,
    /// Failed waiting for the request acknowledgment.
    TimedOut,
}

impl StreamState {
    /// Whether this state ends the stream. Terminal states never change,
    /// and handlers observing one must no-op.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            StreamState::Completed
                | StreamState::Skipped
                | StreamState::Errored
                | StreamState::TimedOut
        )
    }
}

/// All mutable state of one in-flight download.
///
/// A session is created by [`StreamDecoder::start`](super::StreamDecoder::start),
/// owned exclusively by its download, and discarded once a terminal state is
/// reached. Nothing here is shared: concurrent downloads use independent
/// sessions.
#[derive(Debug)]
pub struct Session {
    pub(super) state: StreamState,
    pub(super) header: Option<FileHeader>,
    pub(super) cipher: CipherContext,
    pub(super) scanner: PreambleScanner,
    pub(super) staging: ShiftBuffer,
    pub(super) pending: ShiftBuffer,
    /// 1-indexed frame currently being assembled.
    pub(super) current_frame: usize,
    pub(super) failure: Option<DownloadError>,
    pub(super) last_byte_at: Option<Instant>,
}

impl Session {
    pub(super) fn new(config: &DecoderConfig, keys: &dyn KeyProvider) -> Self {
        let frame_size = config.frame_size();
        Self {
            state: StreamState::AwaitingTransportHeader,
            header: None,
            cipher: CipherContext::new(keys),
            scanner: PreambleScanner::new(),
            staging: ShiftBuffer::new(frame_size),
            pending: ShiftBuffer::new(frame_size),
            current_frame: 1,
            failure: None,
            last_byte_at: None,
        }
    }

    /// Current decode state.
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// The parsed file header, available from the moment it is decoded.
    pub fn header(&self) -> Option<FileHeader> {
        self.header
    }

    /// The failure cause, if the session failed.
    pub fn failure(&self) -> Option<&DownloadError> {
        self.failure.as_ref()
    }

    /// Number of fully emitted frames so far.
    pub fn frames_decoded(&self) -> usize {
        self.current_frame - 1
    }

    /// Timestamp of the most recently received byte.
    pub fn last_byte_at(&self) -> Option<Instant> {
        self.last_byte_at
    }

    /// Record byte arrival; resets the idle clock.
    pub(crate) fn note_bytes(&mut self, now: Instant) {
        self.last_byte_at = Some(now);
    }
}
