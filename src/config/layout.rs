//! Display and layout configuration constants.
//!
//! The panel runs in portrait orientation (240x320). The top third holds the
//! humidity meter, a single text line shows the live pressure, and the bottom
//! half holds six narrow pressure scales side by side.
//!
//! ```text
//! +------------------------+ 0
//! | temp            hum %  |
//! |   humidity arc meter   |
//! |      %RH   trend bar   |
//! +------------------------+ 126
//! |     1013.25 mb         | 128
//! |                        |
//! | |-10h|-8h|-6h|-3h|-1h|Now| 160
//! | |    |   |   |   |   |   |
//! | | lbl| . | . | . | . |lbl| 297
//! +------------------------+ 315
//! ```
//!
//! # Optimization: Pre-computed Layout Constants
//!
//! Gauge origins and needle rows are `const` so the per-step needle drawing
//! performs no layout arithmetic beyond one addition.

use embedded_graphics::prelude::Point;

use super::pressure::{GAUGE_COUNT, SCALE_LENGTH};

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (portrait 240x320 TFT).
pub const SCREEN_WIDTH: u32 = 240;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 320;

// =============================================================================
// Pressure Scales
// =============================================================================

/// Horizontal distance between two neighbouring scales.
pub const SCALE_PITCH: i32 = 40;

/// Top edge of every scale frame.
pub const SCALE_TOP: i32 = 160;

/// Outer frame width of a scale.
pub const SCALE_WIDTH: u32 = 36;

/// Outer frame height of a scale.
pub const SCALE_HEIGHT: u32 = 155;

/// Offset of the white scale face inside the frame.
pub const FACE_OFFSET: Point = Point::new(2, 19);

/// White face width.
pub const FACE_WIDTH: u32 = SCALE_WIDTH - 3;

/// White face height (frame minus caption band and label band).
pub const FACE_HEIGHT: u32 = SCALE_HEIGHT - 38;

/// Caption top offset from the frame top.
pub const CAPTION_OFFSET_Y: i32 = 2;

/// Row of gauge unit 100 relative to the frame top; unit `v` sits at `TICK_TOP + (100 - v)`.
pub const TICK_TOP: i32 = 27;

/// Minor tick length in pixels.
pub const MINOR_TICK_LEN: i32 = 6;

/// Major tick length in pixels (every 50 units).
pub const MAJOR_TICK_LEN: i32 = 9;

/// Horizontal offset of the needle wedge from the scale origin.
pub const NEEDLE_OFFSET_X: i32 = 3;

/// Needle wedge length in pixels.
pub const NEEDLE_LENGTH: i32 = 16;

/// Half height of the needle wedge at its base.
pub const NEEDLE_HALF_HEIGHT: i32 = 5;

/// Top row of the gauge value labels.
pub const LABEL_Y: i32 = 297;

/// Right edge of the first label; later labels shift by [`SCALE_PITCH`].
pub const LABEL_RIGHT_X: i32 = 31;

/// Absolute row of gauge unit 0 (bottom of the scale).
pub const NEEDLE_ZERO_ROW: i32 = SCALE_TOP + TICK_TOP + SCALE_LENGTH as i32;

/// Pre-computed origin (top-left of the frame) for each scale.
pub const SCALE_ORIGINS: [Point; GAUGE_COUNT] = {
    let mut origins = [Point::zero(); GAUGE_COUNT];
    let mut i = 0;
    while i < GAUGE_COUNT {
        origins[i] = Point::new(i as i32 * SCALE_PITCH, SCALE_TOP);
        i += 1;
    }
    origins
};

/// Absolute screen row of a (clamped) gauge position.
#[inline]
pub const fn needle_row(position: i16) -> i32 {
    NEEDLE_ZERO_ROW - position as i32
}

/// Left edge of a gauge's needle wedge.
#[inline]
pub const fn needle_x(gauge: usize) -> i32 {
    NEEDLE_OFFSET_X + gauge as i32 * SCALE_PITCH
}

// =============================================================================
// Live Pressure Line
// =============================================================================

/// Top-left corner of the live pressure text.
pub const PRESSURE_TEXT_POS: Point = Point::new(15, 128);

/// Height of the band cleared before redrawing the pressure text.
pub const PRESSURE_TEXT_HEIGHT: u32 = 24;

/// Width of the band cleared before redrawing the pressure text.
pub const PRESSURE_TEXT_WIDTH: u32 = SCREEN_WIDTH - PRESSURE_TEXT_POS.x as u32;

// =============================================================================
// Humidity Meter
// =============================================================================

/// Meter panel top-left corner.
pub const METER_ORIGIN: Point = Point::new(0, 0);

/// Meter panel width.
pub const METER_WIDTH: u32 = SCREEN_WIDTH;

/// Meter panel height.
pub const METER_HEIGHT: u32 = 126;

/// Pivot of the meter needle.
pub const METER_PIVOT: Point = Point::new(120, 140);

/// Inner radius of the scale ticks.
pub const METER_RADIUS: f32 = 100.0;

/// Minor tick length (every 5 %RH).
pub const METER_MINOR_TICK: f32 = 6.0;

/// Major tick length (every 25 %RH).
pub const METER_MAJOR_TICK: f32 = 12.0;

/// Radius of the scale numbers.
pub const METER_NUMBER_RADIUS: f32 = 122.0;

/// Needle starts this far from the pivot, inside the panel.
pub const METER_NEEDLE_INNER: f32 = 40.0;

/// Needle tip distance from the pivot.
pub const METER_NEEDLE_OUTER: f32 = 95.0;

/// Half of the arc sweep, in degrees either side of vertical.
pub const METER_HALF_SWEEP_DEG: f32 = 50.0;

/// Temperature text, top-left corner of the panel.
pub const METER_TEMP_POS: Point = Point::new(4, 2);

/// Humidity text, right-aligned at the top-right corner.
pub const METER_HUMIDITY_POS: Point = Point::new(235, 2);

/// Text band height for the temperature and humidity figures.
pub const METER_TEXT_HEIGHT: u32 = 20;

/// Unit caption below the needle pivot.
pub const METER_CAPTION_POS: Point = Point::new(120, 112);

/// Trend bar (running extremes) top-left corner.
pub const TREND_BAR_ORIGIN: Point = Point::new(165, 112);

/// Trend bar length in pixels.
pub const TREND_BAR_LENGTH: u32 = 66;

/// Trend bar thickness in pixels.
pub const TREND_BAR_HEIGHT: u32 = 8;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_fit_on_screen() {
        let last = SCALE_ORIGINS[GAUGE_COUNT - 1];
        assert!(last.x + SCALE_WIDTH as i32 <= SCREEN_WIDTH as i32);
        assert!(SCALE_TOP + SCALE_HEIGHT as i32 <= SCREEN_HEIGHT as i32);
    }

    #[test]
    fn test_needle_rows_stay_on_face() {
        let face_top = SCALE_TOP + FACE_OFFSET.y;
        let face_bottom = face_top + FACE_HEIGHT as i32;
        for position in [0, 50, 100] {
            let row = needle_row(position);
            assert!(row - NEEDLE_HALF_HEIGHT >= face_top, "position {position}");
            assert!(row + NEEDLE_HALF_HEIGHT + 1 <= face_bottom, "position {position}");
        }
    }

    #[test]
    fn test_meter_fits_above_pressure_line() {
        assert!(METER_HEIGHT as i32 <= PRESSURE_TEXT_POS.y);
        let needle_base = METER_PIVOT.y - METER_NEEDLE_INNER as i32;
        assert!(needle_base < METER_CAPTION_POS.y);
        assert!(PRESSURE_TEXT_POS.y + (PRESSURE_TEXT_HEIGHT as i32) <= SCALE_TOP);
    }

    #[test]
    fn test_needle_row_matches_tick_rows() {
        assert_eq!(needle_row(100), SCALE_TOP + TICK_TOP);
        assert_eq!(needle_row(0), 287);
    }
}
