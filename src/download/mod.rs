//! Download orchestration: event dispatch, idle watchdog, completion
//! notification.

#[allow(clippy::module_inception)]
mod download;
mod notifier;
mod watchdog;

pub use download::{Download, TransportCommand, TransportEvent};
pub use notifier::{CompletionNotifier, ErrorHandler, SuccessHandler};
pub use watchdog::{IdleWatchdog, WatchdogVerdict};
