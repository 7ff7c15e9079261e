//! Eleven-slot pressure history, newest first.
//!
//! The buffer is shifted exactly once per elapsed cadence period. Index 0 is
//! "now", index 10 is roughly ten periods ago. Values are whole hPa and are
//! stored as given: filtering implausible readings is not this type's job.

use crate::config::{HISTORY_SLOTS, SEED_HISTORY};

/// Fixed-depth pressure history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PressureHistory {
    slots: [i16; HISTORY_SLOTS],
}

impl PressureHistory {
    /// History pre-filled with the synthetic power-on staircase.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_seed(SEED_HISTORY)
    }

    #[must_use]
    pub const fn with_seed(slots: [i16; HISTORY_SLOTS]) -> Self {
        Self { slots }
    }

    /// Shift every slot one step toward the oldest end, drop the oldest
    /// value and store `hpa` as the new "now".
    ///
    /// Returns a copy of the updated sequence.
    pub fn push(
        &mut self,
        hpa: i16,
    ) -> [i16; HISTORY_SLOTS] {
        self.slots.copy_within(0..HISTORY_SLOTS - 1, 1);
        self.slots[0] = hpa;
        self.slots
    }

    #[inline]
    #[must_use]
    pub const fn slots(&self) -> &[i16; HISTORY_SLOTS] {
        &self.slots
    }

    /// Most recent value.
    #[inline]
    #[must_use]
    pub const fn newest(&self) -> i16 {
        self.slots[0]
    }
}

impl Default for PressureHistory {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_seed() {
        let history = PressureHistory::new();
        assert_eq!(history.slots(), &SEED_HISTORY);
        assert_eq!(history.newest(), 999);
    }

    #[test]
    fn test_push_onto_seed() {
        let mut history = PressureHistory::new();
        let snapshot = history.push(1013);
        assert_eq!(snapshot, [1013, 999, 1003, 1006, 1010, 1014, 1018, 1021, 1025, 1029, 1032]);
        assert_eq!(history.slots(), &snapshot);
    }

    #[test]
    fn test_shift_invariant_over_many_pushes() {
        let mut history = PressureHistory::new();
        for step in 0..40i16 {
            let before = *history.slots();
            let reading = 980 + step * 3;
            let after = history.push(reading);
            assert_eq!(after[0], reading);
            for k in 1..HISTORY_SLOTS {
                assert_eq!(after[k], before[k - 1], "slot {k} after push {step}");
            }
        }
    }

    #[test]
    fn test_seed_fully_replaced_after_eleven_pushes() {
        let mut history = PressureHistory::new();
        for _ in 0..HISTORY_SLOTS {
            history.push(1013);
        }
        assert!(history.slots().iter().all(|&p| p == 1013));
    }

    #[test]
    fn test_accepts_implausible_values() {
        let mut history = PressureHistory::new();
        history.push(i16::MIN);
        history.push(i16::MAX);
        assert_eq!(&history.slots()[..2], &[i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_returned_snapshot_is_independent() {
        let mut history = PressureHistory::new();
        let first = history.push(1000);
        history.push(1001);
        assert_eq!(first[0], 1000);
        assert_eq!(history.newest(), 1001);
    }
}
