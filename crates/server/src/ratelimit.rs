//! Fixed-window admission gate for the scrape tool.
//!
//! Checked before URL validation; a rejected request never reaches the
//! pipeline. The window resets wholesale once it elapses, it does not
//! slide.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::GateError;

struct Window {
    started: Instant,
    count: u32,
}

/// Admits at most `max` requests per `window`.
pub struct RateLimiter {
    window: Duration,
    max: u32,
    state: Mutex<Window>,
}

impl RateLimiter {
    /// Create a limiter with the given window length and budget.
    pub fn new(window: Duration, max: u32) -> Self {
        Self { window, max, state: Mutex::new(Window { started: Instant::now(), count: 0 }) }
    }

    /// Consume one unit of budget, or reject if the window is spent.
    pub fn check(&self) -> Result<(), GateError> {
        let mut window = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if window.started.elapsed() >= self.window {
            window.started = Instant::now();
            window.count = 0;
        }

        if window.count >= self.max {
            return Err(GateError::RateLimited);
        }

        window.count += 1;
        Ok(())
    }
}
