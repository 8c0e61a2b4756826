use std::time::Duration;

use tutor_core::evaluation::CALCULATION_TOLERANCE;

/// Time a correct answer's feedback stays on screen before the next tier loads.
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(3_500);

/// Upper bound on a single gateway call before the session gives up on it.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunables for `TutorSession`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub advance_delay: Duration,
    pub request_timeout: Duration,
    pub tolerance: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            tolerance: CALCULATION_TOLERANCE,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
