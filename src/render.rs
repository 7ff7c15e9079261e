//! Screen composition and redraw tracking.
//!
//! Both binaries drive the same screen: draw the static parts once after
//! boot, feed needle steps to a sink while the engine converges, then call
//! [`BarometerScreen::draw_poll`] with the poll result.
//!
//! # Update Strategy
//!
//! | Element | Update Frequency | Strategy |
//! |---------|-----------------|----------|
//! | Scale frames, ticks, captions | Once | [`BarometerScreen::draw_static`] |
//! | Needles | Per animation tick | Incremental edges via [`NeedleSink`](crate::needle::NeedleSink) |
//! | Gauge labels | After a shift | Redrawn only when the values changed |
//! | Pressure line | Every poll | Band clear + redraw |
//! | Humidity meter, temperature, trend bar | Every poll | Erase old needle, redraw bands |

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::config::layout::TREND_BAR_LENGTH;
use crate::config::{Cadence, GAUGE_COUNT, GaugeSlots, Settings, TemperatureUnit};
use crate::cycle::{CycleController, TickOutcome};
use crate::readout::{format_pressure, format_temperature};
use crate::sensor::Reading;
use crate::ui::colors::BLACK;
use crate::widgets::{HumidityMeter, draw_labels, draw_pressure_line, draw_scales};

/// Owns the widget state that survives between polls.
#[derive(Clone, Copy, Debug)]
pub struct BarometerScreen {
    cadence: Cadence,
    gauge_slots: GaugeSlots,
    temperature_unit: TemperatureUnit,
    meter: HumidityMeter,
    /// Label values currently on screen, `None` after a full redraw.
    labels: Option<[i32; GAUGE_COUNT]>,
}

impl BarometerScreen {
    pub const fn new(settings: &Settings) -> Self {
        Self {
            cadence: settings.cadence,
            gauge_slots: settings.gauge_slots,
            temperature_unit: settings.temperature_unit,
            meter: HumidityMeter::new(),
            labels: None,
        }
    }

    /// Clear the display and draw everything that never changes.
    pub fn draw_static<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(BLACK).ok();
        self.meter.draw_face(display);
        draw_scales(display, &self.gauge_slots, self.cadence);
        self.labels = None;
    }

    /// Refresh the dynamic parts after one poll.
    ///
    /// `pressure_pa` is the corrected pressure that was fed to the controller.
    pub fn draw_poll<D>(
        &mut self,
        display: &mut D,
        controller: &CycleController,
        outcome: &TickOutcome,
        reading: &Reading,
        pressure_pa: i32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let range = controller.range();
        let in_range = (range.min_pa()..=range.max_pa()).contains(&pressure_pa);
        draw_pressure_line(display, format_pressure(pressure_pa, range).as_str(), in_range);

        if self.labels != Some(outcome.labels) {
            draw_labels(display, &outcome.labels);
            self.labels = Some(outcome.labels);
        }

        let temperature = format_temperature(reading.temperature_c, self.temperature_unit);
        let trend = controller.extremes().indicator_position(pressure_pa, TREND_BAR_LENGTH);
        self.meter.update(display, reading.humidity_pct, temperature.as_str(), trend);
    }

    /// Label values currently on screen.
    #[inline]
    pub const fn labels(&self) -> Option<[i32; GAUGE_COUNT]> { self.labels }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::{LABEL_Y, PRESSURE_TEXT_POS};
    use crate::needle::NeedleStep;
    use crate::ui::colors::{CREAM, GREEN, RED, YELLOW};
    use crate::widgets::GaugeCanvas;
    use crate::widgets::canvas::Canvas;

    const READING: Reading = Reading {
        temperature_c: 21.5,
        humidity_pct: Some(48.0),
        pressure_pa: 99_000.0,
    };

    fn poll(
        screen: &mut BarometerScreen,
        canvas: &mut Canvas,
        controller: &mut CycleController,
        pressure_pa: i32,
        elapsed: bool,
    ) -> TickOutcome {
        let outcome = controller.tick(pressure_pa, elapsed, &mut GaugeCanvas::new(canvas));
        screen.draw_poll(canvas, controller, &outcome, &READING, pressure_pa);
        outcome
    }

    #[test]
    fn test_static_screen_has_face_and_scales() {
        let mut canvas = Canvas::default();
        let mut screen = BarometerScreen::new(&Settings::DEFAULT);
        screen.draw_static(&mut canvas);

        assert!(canvas.count(CREAM) > 0);
        assert!(canvas.count(GREEN) > 0);
        assert_eq!(canvas.count(RED), 0);
        assert_eq!(screen.labels(), None);
    }

    #[test]
    fn test_first_poll_draws_needles_and_labels() {
        let settings = Settings::DEFAULT;
        let mut canvas = Canvas::default();
        let mut screen = BarometerScreen::new(&settings);
        let mut controller = CycleController::new(&settings);
        screen.draw_static(&mut canvas);

        let outcome = poll(&mut screen, &mut canvas, &mut controller, 101_325, false);

        assert!(outcome.shifted());
        assert_eq!(screen.labels(), Some(outcome.labels));
        assert!(canvas.count(RED) > 0);
    }

    #[test]
    fn test_labels_not_redrawn_without_change() {
        let settings = Settings::DEFAULT;
        let mut canvas = Canvas::default();
        let mut screen = BarometerScreen::new(&settings);
        let mut controller = CycleController::new(&settings);
        screen.draw_static(&mut canvas);
        poll(&mut screen, &mut canvas, &mut controller, 101_325, false);

        // Scribble over the label row; a hold poll must leave it alone
        let marker = Point::new(5, LABEL_Y);
        canvas.pixels.insert(marker, YELLOW);
        let outcome = poll(&mut screen, &mut canvas, &mut controller, 101_400, false);

        assert!(!outcome.shifted());
        assert_eq!(canvas.at(marker.x, marker.y), Some(YELLOW));
    }

    #[test]
    fn test_out_of_range_pressure_line_is_yellow() {
        let settings = Settings::DEFAULT;
        let mut canvas = Canvas::default();
        let mut screen = BarometerScreen::new(&settings);
        let mut controller = CycleController::new(&settings);
        screen.draw_static(&mut canvas);

        poll(&mut screen, &mut canvas, &mut controller, 104_000, false);

        let band = Size::new(200, 20);
        assert!(canvas.count_in(YELLOW, PRESSURE_TEXT_POS, band) > 0);
    }

    #[test]
    fn test_sink_sees_every_step() {
        struct Counter(usize);
        impl crate::needle::NeedleSink for Counter {
            fn needle(
                &mut self,
                _step: NeedleStep,
            ) {
                self.0 += 1;
            }
        }

        let mut controller = CycleController::new(&Settings::DEFAULT);
        let mut counter = Counter(0);
        controller.tick(101_325, false, &mut counter);
        // One placement per gauge
        assert_eq!(counter.0, GAUGE_COUNT);
    }
}
