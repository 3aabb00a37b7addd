//! Completion notifier: routes terminal state to exactly one callback.

use tracing::debug;

use crate::core::DownloadError;
use crate::decoder::FileHeader;

/// Success callback, invoked with the parsed file header.
pub type SuccessHandler = Box<dyn FnOnce(FileHeader) + Send>;

/// Error callback, invoked with the tagged failure cause.
pub type ErrorHandler = Box<dyn FnOnce(DownloadError) + Send>;

/// Latched dispatcher guaranteeing at most one terminal callback per
/// session, however error, timeout, and disconnect events interleave.
///
/// The original firmware could fire the error callback twice on the
/// ack-timeout path (once for the timeout, once for the trailing
/// disconnect); the latch here closes that hole.
pub struct CompletionNotifier {
    on_success: Option<SuccessHandler>,
    on_error: Option<ErrorHandler>,
    fired: bool,
}

impl CompletionNotifier {
    /// Create a notifier holding both callbacks.
    pub fn new(on_success: SuccessHandler, on_error: ErrorHandler) -> Self {
        Self {
            on_success: Some(on_success),
            on_error: Some(on_error),
            fired: false,
        }
    }

    /// Whether a terminal callback has already fired.
    pub fn fired(&self) -> bool {
        self.fired
    }

    /// Fire the success callback, unless something already fired.
    pub fn notify_success(&mut self, header: FileHeader) {
        if self.fired {
            return;
        }
        self.fired = true;
        debug!(?header, "download complete");
        if let Some(callback) = self.on_success.take() {
            callback(header);
        }
    }

    /// Fire the error callback, unless something already fired.
    pub fn notify_error(&mut self, cause: DownloadError) {
        if self.fired {
            return;
        }
        self.fired = true;
        debug!(%cause, "download failed");
        if let Some(callback) = self.on_error.take() {
            callback(cause);
        }
    }
}

impl std::fmt::Debug for CompletionNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionNotifier")
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_notifier() -> (CompletionNotifier, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let successes = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&successes);
        let e = Arc::clone(&errors);
        let notifier = CompletionNotifier::new(
            Box::new(move |_| {
                s.fetch_add(1, Ordering::SeqCst);
            }),
            Box::new(move |_| {
                e.fetch_add(1, Ordering::SeqCst);
            }),
        );
        (notifier, successes, errors)
    }

    fn header() -> FileHeader {
        FileHeader {
            kind: 1,
            total_frames: 2,
            speed_ms: 100,
        }
    }

    #[test]
    fn test_success_fires_once() {
        let (mut notifier, successes, errors) = counting_notifier();
        notifier.notify_success(header());
        notifier.notify_success(header());

        assert!(notifier.fired());
        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_error_after_error_is_latched() {
        let (mut notifier, _, errors) = counting_notifier();
        notifier.notify_error(DownloadError::AckTimeout);
        notifier.notify_error(DownloadError::Disconnected);

        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_success_after_error_is_latched() {
        let (mut notifier, successes, errors) = counting_notifier();
        notifier.notify_error(DownloadError::IdleTimeout);
        notifier.notify_success(header());

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(successes.load(Ordering::SeqCst), 0);
    }
}
