//! Gravity timer - discrete time accumulator for automatic drops
//!
//! The driver feeds elapsed wall time in; the timer reports when a gravity step is
//! due. The accumulator restarts from zero after each step (any remainder is
//! discarded), and a single call never reports more than one step.
//!
//! A step is due as soon as the total reaches the interval (`>=`), so an
//! interval that is a whole number of ticks (400ms at 16ms ticks) takes exactly
//! that many ticks.

/// Accumulates elapsed milliseconds until the next gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropTimer {
    elapsed_ms: u32,
}

impl DropTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `elapsed_ms`; returns true (and restarts) once `interval_ms` is reached
    pub fn advance(&mut self, elapsed_ms: u32, interval_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= interval_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    /// Time accumulated since the last gravity step
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_interval() {
        let mut timer = DropTimer::new();
        assert!(!timer.advance(600, 1000));
        assert_eq!(timer.elapsed_ms(), 600);
        assert!(timer.advance(400, 1000));
        assert_eq!(timer.elapsed_ms(), 0);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let mut timer = DropTimer::new();
        assert!(!timer.advance(999, 1000));
        assert!(timer.advance(1, 1000));
        assert!(!timer.advance(49, 50));
        assert!(timer.advance(1, 50));
    }

    #[test]
    fn test_large_step_fires_once_and_drops_remainder() {
        let mut timer = DropTimer::new();
        assert!(timer.advance(5000, 1000));
        assert_eq!(timer.elapsed_ms(), 0);
        assert!(!timer.advance(16, 1000));
    }

    #[test]
    fn test_reset() {
        let mut timer = DropTimer::new();
        timer.advance(900, 1000);
        timer.reset();
        assert!(!timer.advance(200, 1000));
    }
}
