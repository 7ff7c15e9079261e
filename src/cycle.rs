//! Per-poll orchestration of the pressure-history engine.
//!
//! [`CycleController`] owns every piece of mutable engine state: the
//! history, the needle animator and the running extremes. Each poll the
//! firmware hands it one corrected reading plus the "interval elapsed" flag.
//!
//! # Branches
//!
//! - **Shift** (interval elapsed, or the very first poll after boot): push
//!   the reading into the history, classify and map all slots, retarget the
//!   six needles and sweep them to convergence through the caller's sink.
//! - **Hold** (otherwise): only the running extremes are updated. The live
//!   readout is drawn by the caller on every poll regardless of branch.
//!
//! The first poll always shifts so the gauges show real data right away
//! instead of an hour later.

use crate::config::{GAUGE_COUNT, GaugeSlots, HISTORY_SLOTS, PressureRange, Settings};
use crate::diagnostics::DiagnosticLog;
use crate::extremes::RunningExtremes;
use crate::history::PressureHistory;
use crate::needle::{NeedleAnimator, NeedleSink};
use crate::range::RangeStatus;
use crate::scale::ScaleMapper;

// =============================================================================
// Outcome Types
// =============================================================================

/// Everything produced by one history shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShiftReport {
    /// Shift counter since boot, starting at 1.
    pub sequence: u32,
    /// History after the push, newest first (hPa).
    pub slots: [i16; HISTORY_SLOTS],
    /// Every slot mapped to gauge units, before end-stop clamping.
    pub mapped: [i32; HISTORY_SLOTS],
    pub status: RangeStatus,
    /// Animation ticks needed to converge the needles.
    pub ticks: u32,
}

/// Result of one poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Present when the history shifted this poll.
    pub shift: Option<ShiftReport>,
    /// Gauge values for the numeric labels (unclamped gauge units).
    pub labels: [i32; GAUGE_COUNT],
    /// Whether this reading widened the running extremes.
    pub extremes_widened: bool,
}

impl TickOutcome {
    #[inline]
    #[must_use]
    pub const fn shifted(&self) -> bool {
        self.shift.is_some()
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Owner of the history, needle and extremes state.
#[derive(Clone, Debug)]
pub struct CycleController {
    range: PressureRange,
    mapper: ScaleMapper,
    gauge_slots: GaugeSlots,
    history: PressureHistory,
    animator: NeedleAnimator,
    extremes: RunningExtremes,
    first_cycle: bool,
    shifts: u32,
    log: DiagnosticLog,
}

impl CycleController {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self::with_history(settings, PressureHistory::new())
    }

    /// Controller starting from an explicit history instead of the seed.
    #[must_use]
    pub fn with_history(
        settings: &Settings,
        history: PressureHistory,
    ) -> Self {
        Self {
            range: settings.range,
            mapper: ScaleMapper::new(settings.range),
            gauge_slots: settings.gauge_slots,
            history,
            animator: NeedleAnimator::new(settings.first_run),
            extremes: RunningExtremes::new(),
            first_cycle: true,
            shifts: 0,
            log: DiagnosticLog::new(),
        }
    }

    /// Run one poll with the corrected sea-level pressure in pascals.
    ///
    /// Shifts the history when `interval_elapsed` is set or on the first
    /// poll, and then blocks until every needle has converged, feeding each
    /// step to `sink`.
    pub fn tick<S: NeedleSink>(
        &mut self,
        pressure_pa: i32,
        interval_elapsed: bool,
        sink: &mut S,
    ) -> TickOutcome {
        let extremes_widened = self.extremes.observe(pressure_pa);

        let shift = if interval_elapsed || self.first_cycle {
            Some(self.shift(pressure_pa, sink))
        } else {
            None
        };
        self.first_cycle = false;

        TickOutcome {
            shift,
            labels: self.animator.labels(),
            extremes_widened,
        }
    }

    fn shift<S: NeedleSink>(
        &mut self,
        pressure_pa: i32,
        sink: &mut S,
    ) -> ShiftReport {
        let slots = self.history.push(pa_to_hpa(pressure_pa));
        let status = RangeStatus::classify(&slots, &self.range);
        let mapped = self.mapper.map_all(&slots);

        self.animator.set_targets(self.gauge_slots.select(&mapped));
        let ticks = self.animator.converge(sink);

        self.shifts += 1;
        self.log.record(format_args!("#{} {}hPa {}", self.shifts, slots[0], status.label()));

        ShiftReport {
            sequence: self.shifts,
            slots,
            mapped,
            status,
            ticks,
        }
    }

    #[inline]
    pub const fn history(&self) -> &PressureHistory {
        &self.history
    }

    #[inline]
    pub const fn animator(&self) -> &NeedleAnimator {
        &self.animator
    }

    #[inline]
    pub const fn extremes(&self) -> &RunningExtremes {
        &self.extremes
    }

    #[inline]
    pub const fn range(&self) -> &PressureRange {
        &self.range
    }

    #[inline]
    pub const fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Mutable log access for lines from outside the engine (sensor events).
    #[inline]
    pub fn log_mut(&mut self) -> &mut DiagnosticLog {
        &mut self.log
    }

    /// Number of history shifts since boot.
    #[inline]
    pub const fn shifts(&self) -> u32 {
        self.shifts
    }

    /// True until the first poll has run.
    #[inline]
    pub const fn is_first_cycle(&self) -> bool {
        self.first_cycle
    }
}

/// Whole hPa from pascals, truncated toward zero and saturated to `i16`.
#[must_use]
pub fn pa_to_hpa(pa: i32) -> i16 {
    (pa / 100).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

// =============================================================================
// Unit Tests
// =============================================================================
