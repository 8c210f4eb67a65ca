use std::time::{Duration, Instant};

/// A wall-clock budget polled between units of work.
///
/// Expiry never interrupts work in flight: callers check
/// [`is_expired`](Self::is_expired) once a unit (an observation, a
/// generation) is complete.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    /// Starts a budget of `budget` from now.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed())
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.budget
    }
}
