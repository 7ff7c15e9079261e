//! Nautical Barometer Simulator for Windows/Desktop.
//!
//! Runs the pressure-history engine against a synthetic sensor and draws the
//! same screen as the firmware with the embedded-graphics-simulator crate.
//! A status strip below the panel shows the latest diagnostic log line.
//!
//! # Key Controls
//!
//! - **S**: Force a history shift on the next poll
//! - **Up** / **Down**: Bias the synthetic pressure by +/- 1 hPa

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

mod synthetic;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use nautical_barometer::clock::IntervalClock;
use nautical_barometer::config::POLL_INTERVAL_MS;
use nautical_barometer::config::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use nautical_barometer::sensor::{Acquisition, corrected_pressure_pa};
use nautical_barometer::widgets::{draw_needle_step, draw_status_line};
use nautical_barometer::{BarometerScreen, CycleController, NeedleSink, NeedleStep, Settings};

use crate::synthetic::SyntheticSensor;
use crate::timing::{NEEDLE_TICK, POLL_PERIOD, VirtualClock};

/// Extra rows below the panel for the status strip.
const STATUS_HEIGHT: u32 = 12;

/// Top-left corner of the status strip.
const STATUS_ORIGIN: Point = Point::new(0, SCREEN_HEIGHT as i32 + 1);

/// Pressure bias applied per arrow key press.
const NUDGE_PA: f32 = 100.0;

/// Draws needle steps and shows every animation tick in the window.
struct WindowSink<'a> {
    display: &'a mut SimulatorDisplay<Rgb565>,
    window: &'a mut Window,
}

impl NeedleSink for WindowSink<'_> {
    fn needle(
        &mut self,
        step: NeedleStep,
    ) {
        draw_needle_step(self.display, step);
    }

    fn tick_done(&mut self) {
        self.window.update(self.display);
        thread::sleep(NEEDLE_TICK);
    }
}

fn main() {
    // Sea-level values straight from the synthetic sensor, fast cadence
    let settings = Settings {
        elevation_m: 0.0,
        pressure_offset_pa: 0,
        ..Settings::debug()
    };

    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT + STATUS_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Nautical Barometer Sim", &output_settings);

    let mut screen = BarometerScreen::new(&settings);
    screen.draw_static(&mut display);
    window.update(&display);

    let mut clock = VirtualClock::new();
    let mut acquisition = Acquisition::new(SyntheticSensor::new());
    let mut controller = CycleController::new(&settings);
    let mut interval = IntervalClock::new(settings.cadence, clock.now_ms());
    let mut force_shift = false;
    controller.log_mut().push("Simulator started");

    loop {
        let poll_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::S => {
                            force_shift = true;
                            controller.log_mut().push("Shift forced");
                        }
                        Keycode::Up | Keycode::Down => {
                            let delta = if keycode == Keycode::Up { NUDGE_PA } else { -NUDGE_PA };
                            let sensor = acquisition.sensor_mut();
                            sensor.nudge(delta);
                            let bias = sensor.bias_pa() / 100.0;
                            controller.log_mut().record(format_args!("Bias {bias:+.0} hPa"));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        match acquisition.acquire(&mut clock) {
            Ok(acquired) => {
                if acquired.retried {
                    controller.log_mut().push("Read recovered on retry");
                }

                let pressure_pa = corrected_pressure_pa(&acquired.reading, &settings);
                let now = clock.now_ms();
                let elapsed = force_shift || interval.is_due(now);

                let outcome = controller.tick(
                    pressure_pa,
                    elapsed,
                    &mut WindowSink {
                        display: &mut display,
                        window: &mut window,
                    },
                );
                interval.settle(now, &outcome);
                force_shift = false;
                screen.draw_poll(&mut display, &controller, &outcome, &acquired.reading, pressure_pa);
            }
            Err(error) => controller.log_mut().record(format_args!("Read failed: {error}")),
        }

        draw_status_line(&mut display, STATUS_ORIGIN, controller.log().latest().unwrap_or(""));
        window.update(&display);

        clock.advance_ms(POLL_INTERVAL_MS);
        if let Some(rest) = POLL_PERIOD.checked_sub(poll_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
