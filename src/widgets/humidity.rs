//! Humidity arc meter with the temperature readout and the trend bar.
//!
//! # Layout
//!
//! A cream panel across the top of the screen. The needle pivots below the
//! panel edge so only its outer part is visible, sweeping 50 degrees either
//! side of vertical for 0..100 %RH. Temperature sits in the top-left corner,
//! the humidity figure in the top-right corner, and a short bar in the
//! bottom-right corner shows where the current pressure lies between the
//! lowest and highest readings seen since boot.
//!
//! # Redraw Strategy
//!
//! The face is drawn once. Updates erase the previous needle line with the
//! face color, then repaint the two text bands and the trend bar. The needle
//! radii keep it clear of the ticks, numbers and caption, so erasing never
//! damages the face.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, Rectangle};
use embedded_graphics::text::Text;

use super::primitives::{draw_line, draw_text_band, fill_rect, polar_point};
use crate::config::layout::{
    METER_CAPTION_POS,
    METER_HALF_SWEEP_DEG,
    METER_HEIGHT,
    METER_HUMIDITY_POS,
    METER_MAJOR_TICK,
    METER_MINOR_TICK,
    METER_NEEDLE_INNER,
    METER_NEEDLE_OUTER,
    METER_NUMBER_RADIUS,
    METER_ORIGIN,
    METER_PIVOT,
    METER_RADIUS,
    METER_TEMP_POS,
    METER_TEXT_HEIGHT,
    METER_WIDTH,
    TREND_BAR_HEIGHT,
    TREND_BAR_LENGTH,
    TREND_BAR_ORIGIN,
};
use crate::readout::format_humidity;
use crate::ui::colors::{CREAM, DARK_GREY, GREEN};
use crate::ui::styles::{
    CENTERED_TOP,
    LEFT_TOP,
    METER_ERASE_STROKE,
    METER_FACE_FILL,
    METER_SCALE_STYLE,
    METER_VALUE_STYLE,
    NEEDLE_STROKE,
    RIGHT_TOP,
    TICK_STYLE,
};

/// Percent between two ticks.
const TICK_STEP_PCT: u8 = 5;

/// Percent between two numbered major ticks.
const MAJOR_STEP_PCT: u8 = 25;

/// Width of each value text band.
const VALUE_BAND_WIDTH: u32 = 96;

/// Width of the trend bar marker.
const MARKER_WIDTH: u32 = 3;

/// Needle angle in degrees from vertical. A missing humidity channel parks
/// the needle at 0 %RH.
#[must_use]
pub fn needle_angle(humidity_pct: Option<f32>) -> f32 {
    let pct = humidity_pct.map_or(0.0, |pct| pct.clamp(0.0, 100.0));
    -METER_HALF_SWEEP_DEG + pct / 100.0 * (2.0 * METER_HALF_SWEEP_DEG)
}

/// Arc meter state: remembers what to erase on the next update.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumidityMeter {
    needle: Option<Line>,
}

impl HumidityMeter {
    pub const fn new() -> Self { Self { needle: None } }

    /// Paint the panel, ticks, numbers and caption. Forgets the needle.
    pub fn draw_face<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.needle = None;

        Rectangle::new(METER_ORIGIN, Size::new(METER_WIDTH, METER_HEIGHT))
            .into_styled(METER_FACE_FILL)
            .draw(display)
            .ok();

        for pct in (0..=100u8).step_by(TICK_STEP_PCT as usize) {
            let degrees = needle_angle(Some(f32::from(pct)));
            let major = pct % MAJOR_STEP_PCT == 0;
            let len = if major { METER_MAJOR_TICK } else { METER_MINOR_TICK };

            let inner = polar_point(METER_PIVOT, METER_RADIUS, degrees);
            let outer = polar_point(METER_PIVOT, METER_RADIUS + len, degrees);
            draw_line(display, Line::new(inner, outer), TICK_STYLE);

            if major {
                let mut number = heapless::String::<4>::new();
                let _ = write!(number, "{pct}");
                let anchor = polar_point(METER_PIVOT, METER_NUMBER_RADIUS, degrees);
                Text::with_text_style(number.as_str(), anchor, METER_SCALE_STYLE, CENTERED_TOP)
                    .draw(display)
                    .ok();
            }
        }

        Text::with_text_style("%RH", METER_CAPTION_POS, METER_SCALE_STYLE, CENTERED_TOP)
            .draw(display)
            .ok();
    }

    /// Move the needle and refresh the value texts and the trend bar.
    ///
    /// `trend_position` is the marker offset along the bar, usually from
    /// [`RunningExtremes::indicator_position`](crate::extremes::RunningExtremes::indicator_position).
    pub fn update<D>(
        &mut self,
        display: &mut D,
        humidity_pct: Option<f32>,
        temperature: &str,
        trend_position: Option<u32>,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let degrees = needle_angle(humidity_pct);
        let needle = Line::new(
            polar_point(METER_PIVOT, METER_NEEDLE_INNER, degrees),
            polar_point(METER_PIVOT, METER_NEEDLE_OUTER, degrees),
        );
        if let Some(previous) = self.needle
            && previous != needle
        {
            draw_line(display, previous, METER_ERASE_STROKE);
        }
        draw_line(display, needle, NEEDLE_STROKE);
        self.needle = Some(needle);

        draw_text_band(
            display,
            METER_TEMP_POS,
            Size::new(VALUE_BAND_WIDTH, METER_TEXT_HEIGHT),
            CREAM,
            temperature,
            METER_TEMP_POS,
            METER_VALUE_STYLE,
            LEFT_TOP,
        );

        let humidity_band = METER_HUMIDITY_POS - Point::new(VALUE_BAND_WIDTH as i32 - 1, 0);
        draw_text_band(
            display,
            humidity_band,
            Size::new(VALUE_BAND_WIDTH, METER_TEXT_HEIGHT),
            CREAM,
            format_humidity(humidity_pct).as_str(),
            METER_HUMIDITY_POS,
            METER_VALUE_STYLE,
            RIGHT_TOP,
        );

        draw_trend_bar(display, trend_position);
    }

    /// Needle line drawn by the last update.
    pub const fn needle(&self) -> Option<Line> { self.needle }
}

fn draw_trend_bar<D>(
    display: &mut D,
    position: Option<u32>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_rect(display, TREND_BAR_ORIGIN, Size::new(TREND_BAR_LENGTH, TREND_BAR_HEIGHT), DARK_GREY);

    if let Some(position) = position {
        let left = position.saturating_sub(MARKER_WIDTH / 2).min(TREND_BAR_LENGTH - MARKER_WIDTH);
        fill_rect(
            display,
            TREND_BAR_ORIGIN + Point::new(left as i32, 0),
            Size::new(MARKER_WIDTH, TREND_BAR_HEIGHT),
            GREEN,
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::colors::{BLACK, RED};
    use crate::widgets::canvas::Canvas;

    fn bar() -> Size { Size::new(TREND_BAR_LENGTH, TREND_BAR_HEIGHT) }

    #[test]
    fn test_needle_angle_spans_sweep() {
        assert_eq!(needle_angle(Some(0.0)), -50.0);
        assert_eq!(needle_angle(Some(50.0)), 0.0);
        assert_eq!(needle_angle(Some(100.0)), 50.0);
        assert_eq!(needle_angle(Some(140.0)), 50.0);
        assert_eq!(needle_angle(None), -50.0);
    }

    #[test]
    fn test_face_draws_panel_and_ticks() {
        let mut canvas = Canvas::default();
        HumidityMeter::new().draw_face(&mut canvas);

        assert_eq!(canvas.at(1, METER_HEIGHT as i32 - 1), Some(CREAM));
        // Vertical major tick at 50 %RH
        assert_eq!(canvas.at(120, 35), Some(BLACK));
        assert_eq!(canvas.count(RED), 0);
    }

    #[test]
    fn test_update_moves_needle() {
        let mut canvas = Canvas::default();
        let mut meter = HumidityMeter::new();
        meter.draw_face(&mut canvas);

        meter.update(&mut canvas, Some(50.0), "72.5F", None);
        assert_eq!(canvas.at(120, 80), Some(RED));

        meter.update(&mut canvas, Some(0.0), "72.5F", None);
        assert_eq!(canvas.at(120, 80), Some(CREAM));
        assert!(canvas.count(RED) > 0);
    }

    #[test]
    fn test_update_draws_both_texts() {
        let mut canvas = Canvas::default();
        let mut meter = HumidityMeter::new();
        meter.draw_face(&mut canvas);
        meter.update(&mut canvas, Some(45.0), "21.3C", None);

        let band = Size::new(VALUE_BAND_WIDTH, METER_TEXT_HEIGHT);
        assert!(canvas.count_in(BLACK, METER_TEMP_POS, band) > 0);
        assert!(canvas.count_in(BLACK, Point::new(140, 2), band) > 0);
    }

    #[test]
    fn test_trend_marker_follows_position() {
        let mut canvas = Canvas::default();
        let mut meter = HumidityMeter::new();

        meter.update(&mut canvas, None, "", Some(0));
        assert_eq!(canvas.at(TREND_BAR_ORIGIN.x, TREND_BAR_ORIGIN.y), Some(GREEN));

        meter.update(&mut canvas, None, "", Some(TREND_BAR_LENGTH));
        assert_eq!(canvas.at(TREND_BAR_ORIGIN.x, TREND_BAR_ORIGIN.y), Some(DARK_GREY));
        let last = TREND_BAR_ORIGIN.x + TREND_BAR_LENGTH as i32 - 1;
        assert_eq!(canvas.at(last, TREND_BAR_ORIGIN.y), Some(GREEN));
    }

    #[test]
    fn test_trend_bar_without_extremes_has_no_marker() {
        let mut canvas = Canvas::default();
        HumidityMeter::new().update(&mut canvas, Some(30.0), "", None);
        assert_eq!(canvas.count_in(GREEN, TREND_BAR_ORIGIN, bar()), 0);
        assert_eq!(canvas.count_in(DARK_GREY, TREND_BAR_ORIGIN, bar()) as u32, TREND_BAR_LENGTH * TREND_BAR_HEIGHT);
    }
}
