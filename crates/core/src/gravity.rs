//! Gravity timer - fixed-interval countdown driven by caller-supplied time

/// Repeating timer that fires once per elapsed interval while armed.
///
/// Arming always restarts the countdown from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityTimer {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, interval_ms: u32) {
        self.interval_ms = Some(interval_ms.max(1));
        self.elapsed_ms = 0;
    }

    pub fn disarm(&mut self) {
        self.interval_ms = None;
        self.elapsed_ms = 0;
    }

    pub fn is_armed(&self) -> bool {
        self.interval_ms.is_some()
    }

    pub fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }

    /// Spend time from `budget_ms`.
    ///
    /// Returns true if the timer fired; the time up to the firing point is
    /// taken out of the budget so the caller can loop until it returns false.
    pub fn advance(&mut self, budget_ms: &mut u32) -> bool {
        let Some(interval) = self.interval_ms else {
            return false;
        };

        let remaining = interval.saturating_sub(self.elapsed_ms);
        if *budget_ms >= remaining {
            *budget_ms -= remaining;
            self.elapsed_ms = 0;
            true
        } else {
            self.elapsed_ms += *budget_ms;
            *budget_ms = 0;
            false
        }
    }
}
