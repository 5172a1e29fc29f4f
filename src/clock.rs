//! Monotonic time source

use std::time::Duration;

/// Source of monotonic time, measured from page origin.
///
/// `std::time::Instant` is unavailable in the browser, so every timestamp in
/// this crate is a `Duration` since an origin chosen by the host
/// (`performance.now()` on the web).
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<F> Clock for F
where
    F: Fn() -> Duration,
{
    fn now(&self) -> Duration {
        self()
    }
}

/// Convert a DOM high resolution timestamp (milliseconds) into a `Duration`.
///
/// Negative and non-finite inputs map to zero.
pub fn from_millis_f64(millis: f64) -> Duration {
    if millis.is_finite() && millis > 0.0 {
        Duration::from_secs_f64(millis / 1000.0)
    } else {
        Duration::ZERO
    }
}
