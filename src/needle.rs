//! Needle animation state machine.
//!
//! Six independent needles, each holding a current and a target position in
//! gauge units. One tick moves every travelling needle by exactly one unit
//! toward its target and emits one [`NeedleStep`] per moved needle. The
//! controller drives [`NeedleAnimator::converge`] until every needle rests,
//! so the display visibly sweeps instead of jumping.
//!
//! # States
//!
//! ```text
//!            set_targets (target != current)
//! Converged ------------------------------> Traveling
//!     ^                                        |
//!     +------ step (current == target) --------+
//! ```
//!
//! Targets are clamped to the end stops `0..=100` when assigned. The raw,
//! unclamped values are kept separately for the gauge labels.
//!
//! A needle that has never been drawn has no current position. Its first
//! step is a [`NeedleStep::Placed`], either directly on the target
//! ([`FirstRun::Snap`]) or on a configured start position that the needle
//! then sweeps away from ([`FirstRun::SweepFrom`]).

use crate::config::{FirstRun, GAUGE_COUNT, SCALE_LENGTH};

// =============================================================================
// Types
// =============================================================================

/// One incremental drawing instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NeedleStep {
    /// First appearance of a needle: draw the full needle at `position`.
    Placed { gauge: usize, position: i16 },
    /// Single-unit move: erase the edge at `from`, draw the edge at `to`.
    Moved { gauge: usize, from: i16, to: i16 },
}

impl NeedleStep {
    #[must_use]
    pub const fn gauge(&self) -> usize {
        match *self {
            Self::Placed { gauge, .. } | Self::Moved { gauge, .. } => gauge,
        }
    }

    /// Position of the needle after this step.
    #[must_use]
    pub const fn position(&self) -> i16 {
        match *self {
            Self::Placed { position, .. } => position,
            Self::Moved { to, .. } => to,
        }
    }
}

/// Per-needle animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NeedleState {
    Converged,
    Traveling,
}

/// Receiver for animation output (the renderer).
pub trait NeedleSink {
    /// Apply one needle step.
    fn needle(
        &mut self,
        step: NeedleStep,
    );

    /// Called after each tick that moved at least one needle.
    fn tick_done(&mut self) {}
}

/// Limit a gauge value to the physical end stops.
#[inline]
#[must_use]
pub const fn clamp_to_end_stops(units: i32) -> i16 {
    if units < 0 {
        0
    } else if units > SCALE_LENGTH as i32 {
        SCALE_LENGTH
    } else {
        units as i16
    }
}

// =============================================================================
// Animator
// =============================================================================

/// Current and target positions of the six gauge needles.
#[derive(Clone, Debug)]
pub struct NeedleAnimator {
    current: [Option<i16>; GAUGE_COUNT],
    target: [i16; GAUGE_COUNT],
    raw: [i32; GAUGE_COUNT],
    first_run: FirstRun,
}

impl NeedleAnimator {
    /// Animator with every needle undrawn.
    #[must_use]
    pub const fn new(first_run: FirstRun) -> Self {
        Self {
            current: [None; GAUGE_COUNT],
            target: [0; GAUGE_COUNT],
            raw: [0; GAUGE_COUNT],
            first_run,
        }
    }

    /// Animator whose needles already rest at `positions` (clamped).
    #[must_use]
    pub fn resting_at(positions: [i16; GAUGE_COUNT]) -> Self {
        let raw = positions.map(i32::from);
        let clamped = raw.map(clamp_to_end_stops);
        Self {
            current: clamped.map(Some),
            target: clamped,
            raw,
            first_run: FirstRun::Snap,
        }
    }

    /// Assign new targets. Values are clamped to the end stops; the
    /// unclamped values remain available through [`Self::labels`].
    pub fn set_targets(
        &mut self,
        raw: [i32; GAUGE_COUNT],
    ) {
        self.raw = raw;
        self.target = raw.map(clamp_to_end_stops);
    }

    #[inline]
    #[must_use]
    pub const fn current(
        &self,
        gauge: usize,
    ) -> Option<i16> {
        self.current[gauge]
    }

    #[inline]
    #[must_use]
    pub const fn target(
        &self,
        gauge: usize,
    ) -> i16 {
        self.target[gauge]
    }

    /// Unclamped gauge values for the numeric labels.
    #[inline]
    #[must_use]
    pub const fn labels(&self) -> [i32; GAUGE_COUNT] {
        self.raw
    }

    #[must_use]
    pub fn state(
        &self,
        gauge: usize,
    ) -> NeedleState {
        if self.current[gauge] == Some(self.target[gauge]) {
            NeedleState::Converged
        } else {
            NeedleState::Traveling
        }
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        (0..GAUGE_COUNT).all(|gauge| self.state(gauge) == NeedleState::Converged)
    }

    /// Advance one needle by a single unit, or place it if undrawn.
    ///
    /// Returns `None` when the needle is already converged.
    pub fn step(
        &mut self,
        gauge: usize,
    ) -> Option<NeedleStep> {
        let target = self.target[gauge];

        let Some(from) = self.current[gauge] else {
            let position = match self.first_run {
                FirstRun::Snap => target,
                FirstRun::SweepFrom(start) => clamp_to_end_stops(i32::from(start)),
            };
            self.current[gauge] = Some(position);
            return Some(NeedleStep::Placed { gauge, position });
        };

        if from == target {
            return None;
        }

        let to = if target > from { from + 1 } else { from - 1 };
        self.current[gauge] = Some(to);
        Some(NeedleStep::Moved { gauge, from, to })
    }

    /// Step every gauge once, left to right. Returns the number of steps emitted.
    pub fn tick<S: NeedleSink>(
        &mut self,
        sink: &mut S,
    ) -> usize {
        let mut moved = 0;
        for gauge in 0..GAUGE_COUNT {
            if let Some(step) = self.step(gauge) {
                sink.needle(step);
                moved += 1;
            }
        }
        if moved > 0 {
            sink.tick_done();
        }
        moved
    }

    /// Tick until every needle rests on its target. Returns the tick count.
    ///
    /// Blocks for the whole sweep; there is no way to interrupt it.
    pub fn converge<S: NeedleSink>(
        &mut self,
        sink: &mut S,
    ) -> u32 {
        let mut ticks = 0;
        while self.tick(sink) > 0 {
            ticks += 1;
        }
        ticks
    }
}

impl Default for NeedleAnimator {
    fn default() -> Self {
        Self::new(FirstRun::Snap)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every step and tick boundary.
    #[derive(Default)]
    struct Recorder {
        steps: Vec<NeedleStep>,
        ticks: usize,
    }

    impl NeedleSink for Recorder {
        fn needle(
            &mut self,
            step: NeedleStep,
        ) {
            self.steps.push(step);
        }

        fn tick_done(&mut self) {
            self.ticks += 1;
        }
    }

    #[test]
    fn test_clamp_to_end_stops() {
        assert_eq!(clamp_to_end_stops(-248), 0);
        assert_eq!(clamp_to_end_stops(-1), 0);
        assert_eq!(clamp_to_end_stops(0), 0);
        assert_eq!(clamp_to_end_stops(57), 57);
        assert_eq!(clamp_to_end_stops(100), 100);
        assert_eq!(clamp_to_end_stops(101), 100);
        assert_eq!(clamp_to_end_stops(i32::from(i16::MAX)), 100);
        assert_eq!(clamp_to_end_stops(4_872_564), 100);
        assert_eq!(clamp_to_end_stops(-3_376_800), 0);
    }

    #[test]
    fn test_sweep_down_87_to_12() {
        let mut animator = NeedleAnimator::resting_at([87, 0, 0, 0, 0, 0]);
        animator.set_targets([12, 0, 0, 0, 0, 0]);
        let mut sink = Recorder::default();

        let ticks = animator.converge(&mut sink);

        assert_eq!(ticks, 75);
        assert_eq!(sink.ticks, 75);
        let mut expected = 87;
        for step in &sink.steps {
            let NeedleStep::Moved { gauge, from, to } = *step else {
                panic!("unexpected placement");
            };
            assert_eq!(gauge, 0);
            assert_eq!(from, expected);
            assert_eq!(to, expected - 1);
            expected = to;
        }
        assert_eq!(animator.current(0), Some(12));
    }

    #[test]
    fn test_convergence_exact_step_count() {
        for (start, goal) in [(0, 100), (100, 0), (50, 50), (33, 34), (12, 87)] {
            let mut animator = NeedleAnimator::resting_at([start; GAUGE_COUNT]);
            animator.set_targets([i32::from(goal); GAUGE_COUNT]);
            let mut sink = Recorder::default();
            let ticks = animator.converge(&mut sink);

            assert_eq!(ticks, u32::from((start - goal).unsigned_abs()), "{start}->{goal}");
            let (lo, hi) = (start.min(goal), start.max(goal));
            assert!(sink.steps.iter().all(|s| (lo..=hi).contains(&s.position())));
            assert!(animator.is_converged());
        }
    }

    #[test]
    fn test_needles_move_independently() {
        let mut animator = NeedleAnimator::resting_at([10, 20, 30, 40, 50, 60]);
        animator.set_targets([12, 20, 27, 40, 50, 61]);
        let mut sink = Recorder::default();

        assert_eq!(animator.tick(&mut sink), 3);
        assert_eq!(animator.state(0), NeedleState::Traveling);
        assert_eq!(animator.state(1), NeedleState::Converged);
        assert_eq!(animator.state(5), NeedleState::Converged);

        let remaining = animator.converge(&mut sink);
        assert_eq!(remaining, 2);
        assert_eq!(animator.current(2), Some(27));
    }

    #[test]
    fn test_targets_are_clamped_labels_are_not() {
        let mut animator = NeedleAnimator::resting_at([50; GAUGE_COUNT]);
        animator.set_targets([-248, 0, 41, 100, 153, 50]);
        assert_eq!(animator.target(0), 0);
        assert_eq!(animator.target(4), 100);
        assert_eq!(animator.labels(), [-248, 0, 41, 100, 153, 50]);

        animator.converge(&mut Recorder::default());
        assert_eq!(animator.current(0), Some(0));
        assert_eq!(animator.current(4), Some(100));
    }

    #[test]
    fn test_first_run_snap_places_on_target() {
        let mut animator = NeedleAnimator::new(FirstRun::Snap);
        animator.set_targets([5, 15, 23, 33, 43, 130]);
        let mut sink = Recorder::default();

        let ticks = animator.converge(&mut sink);

        assert_eq!(ticks, 1);
        assert_eq!(sink.steps.len(), GAUGE_COUNT);
        assert_eq!(sink.steps[5], NeedleStep::Placed { gauge: 5, position: 100 });
        assert!(animator.is_converged());
    }

    #[test]
    fn test_first_run_sweep_from_start() {
        let mut animator = NeedleAnimator::new(FirstRun::SweepFrom(-1));
        animator.set_targets([0, 0, 0, 0, 0, 41]);
        let mut sink = Recorder::default();

        let ticks = animator.converge(&mut sink);

        // One placement tick at the clamped start, then 41 single-unit moves
        assert_eq!(ticks, 42);
        assert_eq!(sink.steps[5], NeedleStep::Placed { gauge: 5, position: 0 });
        assert_eq!(animator.current(5), Some(41));
    }

    #[test]
    fn test_converged_animator_emits_nothing() {
        let mut animator = NeedleAnimator::resting_at([41; GAUGE_COUNT]);
        let mut sink = Recorder::default();
        assert_eq!(animator.converge(&mut sink), 0);
        assert!(sink.steps.is_empty());
        assert_eq!(sink.ticks, 0);
    }

    #[test]
    fn test_step_reports_gauge_and_position() {
        let step = NeedleStep::Moved { gauge: 3, from: 10, to: 11 };
        assert_eq!(step.gauge(), 3);
        assert_eq!(step.position(), 11);
    }
}
