//! Out-of-range classification for the pressure history.
//!
//! A pure diagnostic: the result is logged and shown, but the scale mapper
//! never consults it. Values outside the window are still mapped and later
//! saturated by the needle end-stops.

use crate::config::PressureRange;

/// Where the history sits relative to the displayable window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeStatus {
    /// Every slot is inside the window.
    InRange,
    /// At least one slot is above the maximum, none below the minimum.
    OverPressure,
    /// At least one slot is below the minimum, none above the maximum.
    UnderPressure,
    /// Slots exceed the window on both sides; one linear scale cannot show them.
    Ambiguous,
}

impl RangeStatus {
    /// Scan `slots` from scratch and classify them against `range`.
    #[must_use]
    pub fn classify(
        slots: &[i16],
        range: &PressureRange,
    ) -> Self {
        let over = slots.iter().any(|&p| p > range.max());
        let under = slots.iter().any(|&p| p < range.min());

        match (over, under) {
            (true, true) => Self::Ambiguous,
            (true, false) => Self::OverPressure,
            (false, true) => Self::UnderPressure,
            (false, false) => Self::InRange,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_in_range(self) -> bool {
        matches!(self, Self::InRange)
    }

    /// Short upper-case label for logs and the status strip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InRange => "IN RANGE",
            Self::OverPressure => "OVER",
            Self::UnderPressure => "UNDER",
            Self::Ambiguous => "AMBIGUOUS",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
