//! The incremental decode state machine.

use tracing::{debug, trace, warn};

use crate::core::{CIPHER_BLOCK_SIZE, DecoderConfig, DownloadError, FILE_HEADER_SIZE};
use crate::crypto::KeyProvider;

use super::header::FileHeader;
use super::session::{Session, StreamState};
use super::store::FrameStore;

/// What the caller should do with the transport after a decoder entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeAction {
    /// Keep the connection open and deliver further events.
    Continue,
    /// Close the transport; the decoder is done with the stream.
    RequestClose,
}

/// Streaming decoder for pixel-bean containers.
///
/// The decoder itself is immutable configuration; all mutable state lives in
/// the [`Session`] it creates, so independent downloads never share state.
/// Bytes may arrive fragmented arbitrarily: the session's staging buffer
/// bridges chunk boundaries and the cipher context carries its chaining
/// state across calls.
#[derive(Debug, Clone)]
pub struct StreamDecoder {
    config: DecoderConfig,
}

impl StreamDecoder {
    /// Create a decoder for the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Begin a download: create the session that will own all stream state.
    ///
    /// The caller allocates the matching [`FrameStore`] and keeps ownership
    /// of it for the whole download; the decoder only writes into it.
    pub fn start(&self, keys: &dyn KeyProvider) -> Session {
        Session::new(&self.config, keys)
    }

    /// Feed one inbound transport chunk.
    ///
    /// Re-entrant across chunks and within a chunk: a single large chunk may
    /// complete the preamble, the file header, and any number of frames in
    /// one call. Once the session is terminal the call is a no-op.
    pub fn on_bytes(
        &self,
        session: &mut Session,
        store: &mut FrameStore,
        chunk: &[u8],
    ) -> DecodeAction {
        if session.state.is_terminal() {
            return DecodeAction::Continue;
        }

        let mut pos = 0;

        if session.state == StreamState::AwaitingTransportHeader {
            match session.scanner.advance(chunk) {
                Some(body_start) => {
                    debug!(preamble_end = body_start, "transport preamble consumed");
                    session.state = StreamState::ParsingFileHeader;
                    pos = body_start;
                }
                None => return DecodeAction::Continue,
            }
        }

        loop {
            match session.state {
                StreamState::ParsingFileHeader => {
                    pos += session.staging.fill_from(&chunk[pos..]);
                    if session.staging.len() < FILE_HEADER_SIZE {
                        break;
                    }

                    let mut raw = [0u8; FILE_HEADER_SIZE];
                    raw.copy_from_slice(&session.staging.as_slice()[..FILE_HEADER_SIZE]);
                    let header = FileHeader::parse(&raw);
                    debug!(
                        kind = header.kind,
                        total_frames = header.total_frames,
                        speed_ms = header.speed_ms,
                        "file header parsed"
                    );
                    session.header = Some(header);

                    if header.total_frames as usize > self.config.max_frames() {
                        warn!(
                            declared = header.total_frames,
                            max = self.config.max_frames(),
                            "frame count exceeds store capacity, skipping file"
                        );
                        session.state = StreamState::Skipped;
                        session.failure = Some(DownloadError::FrameCountExceeded {
                            declared: header.total_frames,
                            max: self.config.max_frames(),
                        });
                        return DecodeAction::RequestClose;
                    }

                    session.staging.drain_front(FILE_HEADER_SIZE);
                    session.state = StreamState::DecodingFrames;
                }

                StreamState::DecodingFrames => {
                    pos += session.staging.fill_from(&chunk[pos..]);

                    // A frame is decrypted only once its full ciphertext is
                    // staged; partial frames wait for the next chunk.
                    if session.staging.len() < self.config.frame_size() {
                        break;
                    }

                    let whole_blocks = session.staging.len() / CIPHER_BLOCK_SIZE;
                    for i in 0..whole_blocks {
                        let mut block = [0u8; CIPHER_BLOCK_SIZE];
                        let start = i * CIPHER_BLOCK_SIZE;
                        block.copy_from_slice(
                            &session.staging.as_slice()[start..start + CIPHER_BLOCK_SIZE],
                        );
                        let plain = session.cipher.decrypt_block(&block);
                        session.pending.fill_from(&plain);
                    }
                    session.staging.drain_front(whole_blocks * CIPHER_BLOCK_SIZE);

                    let frame_index = session.current_frame - 1;
                    store.write_frame(
                        frame_index,
                        &session.pending.as_slice()[..self.config.frame_size()],
                    );
                    session.pending.drain_front(self.config.frame_size());
                    trace!(frame = session.current_frame, "frame decoded");

                    session.current_frame += 1;
                    let total = session
                        .header
                        .map(|h| h.total_frames as usize)
                        .unwrap_or(0);
                    if session.current_frame > total {
                        debug!(frames = total, "stream complete");
                        session.state = StreamState::Completed;
                        // Trailing bytes in this chunk are discarded.
                        break;
                    }

                    if pos >= chunk.len() {
                        break;
                    }
                }

                // Terminal, or still awaiting the preamble with nothing left.
                _ => break,
            }
        }

        DecodeAction::Continue
    }

    /// Record a terminal transport event against the session.
    ///
    /// An ack timeout lands in [`StreamState::TimedOut`]; every other cause
    /// lands in [`StreamState::Errored`]. No-op once terminal: late events
    /// never mutate a finished session.
    pub fn on_terminal_event(&self, session: &mut Session, cause: DownloadError) {
        if session.state.is_terminal() {
            return;
        }

        warn!(%cause, frames_decoded = session.frames_decoded(), "stream aborted");
        session.state = match cause {
            DownloadError::AckTimeout => StreamState::TimedOut,
            _ => StreamState::Errored,
        };
        session.failure = Some(cause);
    }
}
