//! Runtime settings chosen once at boot.
//!
//! Everything here has a `const` default that is valid by construction. The
//! validated constructors exist for builds that want a different display
//! range or gauge selection.

use core::fmt;

use super::pressure::{
    BOARD_PRESSURE_OFFSET_PA,
    DEFAULT_ELEVATION_M,
    GAUGE_COUNT,
    GAUGE_SLOTS,
    HISTORY_SLOTS,
    MAX_PRESSURE_HPA,
    MIN_PRESSURE_HPA,
};

// =============================================================================
// Errors
// =============================================================================

/// Rejected configuration value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pressure range minimum is not below its maximum.
    EmptyRange,
    /// Gauge slot index points past the history buffer.
    SlotOutOfRange { slot: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::EmptyRange => f.write_str("pressure range is empty"),
            Self::SlotOutOfRange { slot } => write!(f, "gauge slot {slot} exceeds history depth {HISTORY_SLOTS}"),
        }
    }
}

// =============================================================================
// Pressure Range
// =============================================================================

/// Displayable pressure window in whole hPa, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureRange {
    min: i16,
    max: i16,
}

impl PressureRange {
    /// 997..=1036 hPa, the span printed on the gauge faces.
    pub const DEFAULT: Self = Self {
        min: MIN_PRESSURE_HPA,
        max: MAX_PRESSURE_HPA,
    };

    /// Build a range, rejecting an empty or inverted window.
    pub const fn new(
        min: i16,
        max: i16,
    ) -> Result<Self, ConfigError> {
        if min >= max {
            return Err(ConfigError::EmptyRange);
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub const fn min(&self) -> i16 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> i16 {
        self.max
    }

    /// Width of the window in hPa (always positive).
    #[inline]
    pub const fn span(&self) -> i32 {
        self.max as i32 - self.min as i32
    }

    /// Lower bound in pascals.
    #[inline]
    pub const fn min_pa(&self) -> i32 {
        self.min as i32 * 100
    }

    /// Upper bound in pascals.
    #[inline]
    pub const fn max_pa(&self) -> i32 {
        self.max as i32 * 100
    }
}

impl Default for PressureRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Gauge Slot Selection
// =============================================================================

/// History indices shown by the six gauges, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeSlots([usize; GAUGE_COUNT]);

impl GaugeSlots {
    /// -10h, -8h, -6h, -3h, -1h, now.
    pub const DEFAULT: Self = Self(GAUGE_SLOTS);

    /// Validate that every index addresses a history slot.
    pub fn new(slots: [usize; GAUGE_COUNT]) -> Result<Self, ConfigError> {
        match slots.iter().find(|&&slot| slot >= HISTORY_SLOTS) {
            Some(&slot) => Err(ConfigError::SlotOutOfRange { slot }),
            None => Ok(Self(slots)),
        }
    }

    #[inline]
    pub const fn as_array(&self) -> &[usize; GAUGE_COUNT] {
        &self.0
    }

    /// History index shown by `gauge`.
    #[inline]
    pub const fn slot(
        &self,
        gauge: usize,
    ) -> usize {
        self.0[gauge]
    }

    /// Pick the gauge values out of an 11-slot sequence.
    pub fn select<T: Copy>(
        &self,
        values: &[T; HISTORY_SLOTS],
    ) -> [T; GAUGE_COUNT] {
        self.0.map(|slot| values[slot])
    }
}

impl Default for GaugeSlots {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Enumerations
// =============================================================================

/// How often the history shifts by one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cadence {
    /// One slot per hour (normal operation).
    Hourly,
    /// One slot per minute, for bench testing.
    Minutely,
}

impl Cadence {
    /// Length of one history slot in milliseconds.
    #[must_use]
    pub const fn period_ms(self) -> u64 {
        match self {
            Self::Hourly => 60 * 60 * 1_000,
            Self::Minutely => 60 * 1_000,
        }
    }

    /// Unit suffix used in the gauge captions ("-3h" vs "-3m").
    #[must_use]
    pub const fn suffix(self) -> char {
        match self {
            Self::Hourly => 'h',
            Self::Minutely => 'm',
        }
    }
}

/// Needle behaviour for a gauge that has never been drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FirstRun {
    /// Place the needle directly on its first target.
    Snap,
    /// Start from this gauge position and sweep to the first target.
    SweepFrom(i16),
}

/// Unit used for the temperature readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius reading into this unit.
    #[must_use]
    pub fn convert(
        self,
        celsius: f32,
    ) -> f32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Celsius => 'C',
            Self::Fahrenheit => 'F',
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Complete boot-time configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub range: PressureRange,
    pub cadence: Cadence,
    pub gauge_slots: GaugeSlots,
    pub first_run: FirstRun,
    /// Station elevation for sea-level correction, metres.
    pub elevation_m: f32,
    pub temperature_unit: TemperatureUnit,
    /// Fixed offset added to every raw pressure reading, pascals.
    pub pressure_offset_pa: i32,
}

impl Settings {
    pub const DEFAULT: Self = Self {
        range: PressureRange::DEFAULT,
        cadence: Cadence::Hourly,
        gauge_slots: GaugeSlots::DEFAULT,
        first_run: FirstRun::Snap,
        elevation_m: DEFAULT_ELEVATION_M,
        temperature_unit: TemperatureUnit::Fahrenheit,
        pressure_offset_pa: BOARD_PRESSURE_OFFSET_PA,
    };

    /// Defaults with the history shifting every minute.
    #[must_use]
    pub const fn debug() -> Self {
        Self {
            cadence: Cadence::Minutely,
            ..Self::DEFAULT
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
