//=========================================================================
// Tick Clock
//=========================================================================
//
// Monotonic millisecond tick source, sampled once per poll.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== TickSource ==========================================================

/// Monotonic millisecond counter.
pub trait TickSource {
    /// Milliseconds since an arbitrary fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
}

//=== SystemClock =========================================================

/// [`TickSource`] backed by [`Instant`], counting from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
