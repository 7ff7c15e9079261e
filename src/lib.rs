//! Nautical barometer library - the testable core of the barometer firmware.
//!
//! The device samples a barometric sensor every few seconds, keeps an
//! eleven-slot hourly pressure history, maps it onto six 0-100 gauge scales
//! and sweeps the gauge needles one unit at a time toward their new targets.
//!
//! This library holds everything that does not touch peripherals directly.
//! The binaries (`pico2/` firmware, `simulator/` desktop runner) add the
//! platform-specific loop, display flushing and timing.
//!
//! # Data Flow
//!
//! ```text
//! corrected pressure -> PressureHistory::push -> classify (diagnostic)
//!                    -> ScaleMapper::map_all -> six selected slots
//!                    -> NeedleAnimator targets -> NeedleStep per tick -> NeedleSink
//! ```
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// === Pressure-history engine ===

pub mod config;
pub mod cycle;
pub mod extremes;
pub mod history;
pub mod needle;
pub mod range;
pub mod scale;

// === Collaborators (sensor, timing, text) ===

pub mod clock;
pub mod diagnostics;
pub mod readout;
pub mod sensor;

// === Rendering ===

pub mod render;
pub mod ui;
pub mod widgets;

// Re-export at top level for the binaries
pub use config::{Cadence, FirstRun, Settings};
pub use cycle::{CycleController, ShiftReport, TickOutcome};
pub use needle::{NeedleSink, NeedleStep};
pub use range::RangeStatus;
pub use render::BarometerScreen;
