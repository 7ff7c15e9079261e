//! Linear mapping from hPa to gauge units.
//!
//! `unit = trunc((value - min) * SCALE_LENGTH / (max - min))`
//!
//! The step (0.39 hPa per unit for the default window) is applied with
//! integer arithmetic, so both window ends map exactly onto 0 and 100. The
//! mapper never clamps: values outside the window produce units below 0 or
//! above [`SCALE_LENGTH`]. Units are `i32` so that every `i16` input maps
//! without wrapping, even on a one-hPa window.

use crate::config::{HISTORY_SLOTS, PressureRange, SCALE_LENGTH};

/// Affine hPa -> gauge-unit transform, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleMapper {
    min: i32,
    span: i32,
}

impl ScaleMapper {
    #[must_use]
    pub const fn new(range: PressureRange) -> Self {
        Self {
            min: range.min() as i32,
            span: range.span(),
        }
    }

    /// Map one pressure value, rounding toward zero.
    #[must_use]
    pub const fn map(
        &self,
        hpa: i16,
    ) -> i32 {
        (hpa as i32 - self.min) * SCALE_LENGTH as i32 / self.span
    }

    /// Map every history slot independently.
    #[must_use]
    pub fn map_all(
        &self,
        slots: &[i16; HISTORY_SLOTS],
    ) -> [i32; HISTORY_SLOTS] {
        slots.map(|hpa| self.map(hpa))
    }
}

impl Default for ScaleMapper {
    fn default() -> Self {
        Self::new(PressureRange::DEFAULT)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SEED_HISTORY;

    #[test]
    fn test_range_ends() {
        let mapper = ScaleMapper::default();
        assert_eq!(mapper.map(997), 0);
        assert_eq!(mapper.map(1036), 100);
    }

    #[test]
    fn test_reference_point() {
        // 16 hPa / 0.39 = 41.03
        assert_eq!(ScaleMapper::default().map(1013), 41);
    }

    #[test]
    fn test_strictly_monotonic() {
        // 0.39 hPa per unit means every whole hPa step advances at least two units
        let mapper = ScaleMapper::default();
        for hpa in 900i16..1150 {
            assert!(mapper.map(hpa) < mapper.map(hpa + 1), "at {hpa}");
        }
    }

    #[test]
    fn test_no_clamping() {
        let mapper = ScaleMapper::default();
        assert!(mapper.map(990) < 0);
        assert!(mapper.map(1040) > 100);
        assert_eq!(mapper.map(900), -248);
    }

    #[test]
    fn test_truncates_toward_zero_below_min() {
        // -1 hPa is -2.56 units, truncated to -2 rather than floored to -3
        assert_eq!(ScaleMapper::default().map(996), -2);
    }

    #[test]
    fn test_map_all_seed() {
        let mapped = ScaleMapper::default().map_all(&SEED_HISTORY);
        assert_eq!(mapped, [5, 15, 23, 33, 43, 53, 61, 71, 82, 89, 100]);
    }

    #[test]
    fn test_extreme_inputs_do_not_wrap() {
        let mapper = ScaleMapper::default();
        assert_eq!(mapper.map(20_000), 48_725);
        assert_eq!(mapper.map(i16::MAX), 81_461);
        assert_eq!(mapper.map(i16::MIN), -86_576);
        assert!(mapper.map(i16::MAX - 1) < mapper.map(i16::MAX));
    }

    #[test]
    fn test_narrow_range_stays_monotonic() {
        let mapper = ScaleMapper::new(PressureRange::new(1000, 1001).unwrap());
        assert_eq!(mapper.map(1001), 100);
        assert_eq!(mapper.map(1300), 30_000);
        assert!(mapper.map(1300) < mapper.map(1400));
        assert_eq!(mapper.map(i16::MAX), 3_176_700);
        assert_eq!(mapper.map(i16::MIN), -3_376_800);

        let widest = ScaleMapper::new(PressureRange::new(300, 301).unwrap());
        assert_eq!(widest.map(1100), 80_000);
    }

    #[test]
    fn test_custom_range() {
        let mapper = ScaleMapper::new(PressureRange::new(950, 1050).unwrap());
        assert_eq!(mapper.map(950), 0);
        assert_eq!(mapper.map(1000), 50);
        assert_eq!(mapper.map(1050), 100);
    }
}
