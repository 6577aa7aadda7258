use std::time::{Duration, Instant};

/// Minimum gap between two accepted scan events.
pub const DEFAULT_SCAN_COOLDOWN: Duration = Duration::from_millis(1000);

/// Drops scan events that arrive within the cooldown window of the last
/// accepted one, so a single QR code held in view triggers one submission.
#[derive(Debug, Clone)]
pub struct ScanCooldown {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl ScanCooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Accept or drop an event observed at `now`.
    pub fn try_accept_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.window {
                return false;
            }
        }
        self.last_accepted = Some(now);
        true
    }

    pub fn try_accept(&mut self) -> bool {
        self.try_accept_at(Instant::now())
    }

    /// Forget the last accepted event, e.g. when the user taps "scan again".
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for ScanCooldown {
    fn default() -> Self {
        Self::new(DEFAULT_SCAN_COOLDOWN)
    }
}
