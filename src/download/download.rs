//! Event-driven download state machine.

use std::time::Instant;

use tracing::debug;

use crate::core::DownloadError;
use crate::crypto::KeyProvider;
use crate::decoder::{DecodeAction, FileHeader, FrameStore, Session, StreamDecoder, StreamState};

use super::notifier::{CompletionNotifier, ErrorHandler, SuccessHandler};
use super::watchdog::{IdleWatchdog, WatchdogVerdict};

/// Discrete lifecycle events delivered by the transport adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Inbound bytes, fragmented however the network fragmented them.
    Data(Vec<u8>),
    /// Socket or TLS level failure with the transport's error code.
    Error(i8),
    /// The transport gave up waiting for an acknowledgment.
    AckTimeout,
    /// Recurring poll tick driving the idle watchdog.
    IdlePoll,
    /// The connection closed (graceful or otherwise).
    Disconnect,
}

/// Instruction to the transport adapter after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCommand {
    /// Close the connection; decoding is done with the stream.
    Close,
}

/// One in-flight download: decoder session, idle watchdog, and completion
/// notifier, driven by queued [`TransportEvent`]s.
///
/// All handlers run on whatever single task delivers the events; the
/// download owns its [`Session`] exclusively, so concurrent downloads are
/// just independent `Download` values. Events arriving after a terminal
/// state are no-ops, whatever their order. The caller retains ownership of
/// the [`FrameStore`] and passes it into each event delivery.
pub struct Download {
    decoder: StreamDecoder,
    session: Session,
    watchdog: IdleWatchdog,
    notifier: CompletionNotifier,
}

impl Download {
    /// Begin a download: fresh session, armed-on-first-poll watchdog, and
    /// the pair of terminal callbacks (at most one of which will ever fire).
    pub fn start(
        decoder: StreamDecoder,
        keys: &dyn KeyProvider,
        on_success: SuccessHandler,
        on_error: ErrorHandler,
    ) -> Self {
        let session = decoder.start(keys);
        let watchdog = IdleWatchdog::new(decoder.config().idle_timeout());
        debug!(
            frame_size = decoder.config().frame_size(),
            max_frames = decoder.config().max_frames(),
            "download started"
        );
        Self {
            decoder,
            session,
            watchdog,
            notifier: CompletionNotifier::new(on_success, on_error),
        }
    }

    /// Current decode state.
    pub fn state(&self) -> StreamState {
        self.session.state()
    }

    /// The parsed file header, once the stream got that far.
    pub fn header(&self) -> Option<FileHeader> {
        self.session.header()
    }

    /// Number of fully decoded frames.
    pub fn frames_decoded(&self) -> usize {
        self.session.frames_decoded()
    }

    /// Whether the stream reached a terminal state.
    pub fn is_finished(&self) -> bool {
        self.session.state().is_terminal()
    }

    /// Handle one transport event.
    ///
    /// Returns a command for the transport adapter when the decoder wants
    /// the connection closed. `now` is injected so event sequences are
    /// deterministic under test.
    pub fn handle_event(
        &mut self,
        store: &mut FrameStore,
        event: TransportEvent,
        now: Instant,
    ) -> Option<TransportCommand> {
        match event {
            TransportEvent::Data(bytes) => {
                if self.session.state().is_terminal() {
                    return None;
                }
                self.session.note_bytes(now);
                match self.decoder.on_bytes(&mut self.session, store, &bytes) {
                    DecodeAction::RequestClose => Some(TransportCommand::Close),
                    DecodeAction::Continue => None,
                }
            }

            TransportEvent::Error(code) => {
                self.decoder
                    .on_terminal_event(&mut self.session, DownloadError::Transport(code));
                None
            }

            TransportEvent::AckTimeout => {
                if self.session.state().is_terminal() {
                    return None;
                }
                self.decoder
                    .on_terminal_event(&mut self.session, DownloadError::AckTimeout);
                // The ack timeout reports immediately; the trailing
                // disconnect then hits the latch instead of double-firing.
                self.notifier.notify_error(DownloadError::AckTimeout);
                None
            }

            TransportEvent::IdlePoll => {
                if self.session.state().is_terminal() {
                    return None;
                }
                match self.watchdog.on_poll(self.session.last_byte_at(), now) {
                    WatchdogVerdict::Expired => {
                        self.decoder
                            .on_terminal_event(&mut self.session, DownloadError::IdleTimeout);
                        Some(TransportCommand::Close)
                    }
                    WatchdogVerdict::Healthy => None,
                }
            }

            TransportEvent::Disconnect => {
                if self.session.state() == StreamState::Completed {
                    if let Some(header) = self.session.header() {
                        self.notifier.notify_success(header);
                    }
                } else {
                    if !self.session.state().is_terminal() {
                        self.decoder
                            .on_terminal_event(&mut self.session, DownloadError::Disconnected);
                    }
                    let cause = self
                        .session
                        .failure()
                        .cloned()
                        .unwrap_or(DownloadError::Disconnected);
                    self.notifier.notify_error(cause);
                }
                None
            }
        }
    }
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download")
            .field("state", &self.session.state())
            .field("frames_decoded", &self.session.frames_decoded())
            .field("notified", &self.notifier.fired())
            .finish_non_exhaustive()
    }
}
