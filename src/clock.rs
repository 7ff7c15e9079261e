//! Coarse interval clock producing the "history slot due" signal.
//!
//! Works on caller-supplied millisecond timestamps (embassy `Instant` on the
//! device, a virtual clock in the simulator), so it never reads time itself.
//!
//! Every history shift restarts the period, including the shift forced on
//! the first poll, so the next slot is due one full period after it.

use crate::config::Cadence;
use crate::cycle::TickOutcome;

/// Elapsed-period detector with a resettable reference point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalClock {
    period_ms: u64,
    reference_ms: u64,
}

impl IntervalClock {
    /// Clock whose reference point is `now_ms`.
    #[must_use]
    pub const fn new(
        cadence: Cadence,
        now_ms: u64,
    ) -> Self {
        Self {
            period_ms: cadence.period_ms(),
            reference_ms: now_ms,
        }
    }

    #[inline]
    #[must_use]
    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// True once a full period has passed since the reference point.
    #[must_use]
    pub const fn is_due(
        &self,
        now_ms: u64,
    ) -> bool {
        now_ms.saturating_sub(self.reference_ms) >= self.period_ms
    }

    /// Move the reference point to `now_ms`.
    pub fn restart(
        &mut self,
        now_ms: u64,
    ) {
        self.reference_ms = now_ms;
    }

    /// Restart the period if the poll that ran at `now_ms` shifted the history.
    pub fn settle(
        &mut self,
        now_ms: u64,
        outcome: &TickOutcome,
    ) {
        if outcome.shifted() {
            self.restart(now_ms);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::cycle::CycleController;
    use crate::needle::{NeedleSink, NeedleStep};

    struct NullSink;

    impl NeedleSink for NullSink {
        fn needle(
            &mut self,
            _step: NeedleStep,
        ) {
        }
    }

    #[test]
    fn test_due_after_full_period() {
        let clock = IntervalClock::new(Cadence::Minutely, 1_000);
        assert!(!clock.is_due(1_000));
        assert!(!clock.is_due(60_999));
        assert!(clock.is_due(61_000));
        assert!(clock.is_due(500_000));
    }

    #[test]
    fn test_restart_moves_reference() {
        let mut clock = IntervalClock::new(Cadence::Hourly, 0);
        assert!(clock.is_due(3_600_000));
        clock.restart(3_605_000);
        assert!(!clock.is_due(3_610_000));
        assert!(clock.is_due(7_205_000));
    }

    #[test]
    fn test_forced_first_shift_restarts_period() {
        let mut controller = CycleController::new(&Settings::DEFAULT);
        let mut clock = IntervalClock::new(Cadence::Hourly, 0);

        // Sensor came up late: the first successful poll is at 20 minutes
        let first = 1_200_000;
        let elapsed = clock.is_due(first);
        let outcome = controller.tick(101_325, elapsed, &mut NullSink);
        assert!(!elapsed && outcome.shifted());
        clock.settle(first, &outcome);

        assert!(!clock.is_due(3_600_000));
        assert!(clock.is_due(first + 3_600_000));
    }

    #[test]
    fn test_hold_poll_keeps_reference() {
        let mut controller = CycleController::new(&Settings::DEFAULT);
        let mut clock = IntervalClock::new(Cadence::Minutely, 0);
        let first = controller.tick(101_325, false, &mut NullSink);
        clock.settle(0, &first);

        let held = controller.tick(101_325, clock.is_due(30_000), &mut NullSink);
        clock.settle(30_000, &held);

        assert!(!held.shifted());
        assert!(clock.is_due(60_000));
    }

    #[test]
    fn test_time_before_reference_is_not_due() {
        let clock = IntervalClock::new(Cadence::Minutely, 10_000);
        assert!(!clock.is_due(0));
    }
}
