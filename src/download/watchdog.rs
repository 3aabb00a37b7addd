//! Idle watchdog: aborts a stalled download based on elapsed silence.

use std::time::{Duration, Instant};

/// Outcome of one watchdog poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogVerdict {
    /// Within the silence threshold (or the watchdog just armed).
    Healthy,
    /// Silence exceeded the threshold; the download must abort.
    Expired,
}

/// Silence timer driven by the transport's recurring poll signal.
///
/// The first poll after connection only records a baseline; every later
/// poll measures elapsed time since the last received byte (falling back to
/// the baseline while no byte has arrived yet). This is independent of the
/// transport's own ack timeout: the two are distinct failure causes.
#[derive(Debug, Clone)]
pub struct IdleWatchdog {
    threshold: Duration,
    baseline: Option<Instant>,
}

impl IdleWatchdog {
    /// Create a watchdog with the given silence threshold.
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            baseline: None,
        }
    }

    /// The configured silence threshold.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Evaluate one poll tick.
    ///
    /// `last_byte_at` is the arrival time of the most recent byte; any byte
    /// delivery resets the idle clock to that instant.
    pub fn on_poll(&mut self, last_byte_at: Option<Instant>, now: Instant) -> WatchdogVerdict {
        let Some(baseline) = self.baseline else {
            self.baseline = Some(now);
            return WatchdogVerdict::Healthy;
        };

        let reference = last_byte_at.unwrap_or(baseline);
        if now.duration_since(reference) > self.threshold {
            WatchdogVerdict::Expired
        } else {
            WatchdogVerdict::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: Duration = Duration::from_secs(10);

    #[test]
    fn test_first_poll_only_arms() {
        let mut watchdog = IdleWatchdog::new(THRESHOLD);
        let t0 = Instant::now();

        // Even with no bytes ever received, the first poll never expires.
        assert_eq!(watchdog.on_poll(None, t0), WatchdogVerdict::Healthy);
    }

    #[test]
    fn test_expires_after_silence() {
        let mut watchdog = IdleWatchdog::new(THRESHOLD);
        let t0 = Instant::now();

        assert_eq!(watchdog.on_poll(None, t0), WatchdogVerdict::Healthy);
        assert_eq!(
            watchdog.on_poll(None, t0 + Duration::from_secs(5)),
            WatchdogVerdict::Healthy
        );
        assert_eq!(
            watchdog.on_poll(None, t0 + Duration::from_secs(11)),
            WatchdogVerdict::Expired
        );
    }

    #[test]
    fn test_byte_delivery_resets_clock() {
        let mut watchdog = IdleWatchdog::new(THRESHOLD);
        let t0 = Instant::now();
        watchdog.on_poll(None, t0);

        // A byte at t0+8s pushes the deadline out to t0+18s.
        let last_byte = Some(t0 + Duration::from_secs(8));
        assert_eq!(
            watchdog.on_poll(last_byte, t0 + Duration::from_secs(15)),
            WatchdogVerdict::Healthy
        );
        assert_eq!(
            watchdog.on_poll(last_byte, t0 + Duration::from_secs(19)),
            WatchdogVerdict::Expired
        );
    }

    #[test]
    fn test_elapsed_measured_from_byte_not_poll() {
        let mut watchdog = IdleWatchdog::new(THRESHOLD);
        let t0 = Instant::now();
        watchdog.on_poll(None, t0);

        let last_byte = Some(t0 + Duration::from_secs(1));
        // Frequent polling does not keep the stream alive.
        for s in 2..=11 {
            let verdict = watchdog.on_poll(last_byte, t0 + Duration::from_secs(s));
            assert_eq!(verdict, WatchdogVerdict::Healthy, "at {s}s");
        }
        assert_eq!(
            watchdog.on_poll(last_byte, t0 + Duration::from_secs(12) + Duration::from_millis(1)),
            WatchdogVerdict::Expired
        );
    }
}
