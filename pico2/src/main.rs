//! Nautical Barometer Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows an eleven-hour pressure history on six needle scales, plus live
//! pressure, temperature and humidity, on the Pimoroni PIM715 Display Pack 2.8".
//!
//! # Architecture
//!
//! - Sensor task: runs the acquisition policy every poll interval and
//!   publishes the result through a [`Signal`]
//! - Main task: waits for each result, runs the pressure-history engine,
//!   and redraws the screen
//!
//! Needle sweeps run synchronously inside the engine. Every animation tick
//! pushes only the scale rows to the panel with a blocking transfer; the rest
//! of the frame follows with one DMA flush per poll.

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]

mod display;
mod tft;

use core::fmt::Write;

use barometer_pico2::board::{self, NEEDLE_BAND, SENSOR_RETRY_MS};
use barometer_pico2::framebuffer::{FRAME_BYTES, Framebuffer};
use defmt::{debug, info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::spi::Spi;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Instant, Timer};
use heapless::String;
use nautical_barometer::clock::IntervalClock;
use nautical_barometer::config::POLL_INTERVAL_MS;
use nautical_barometer::config::layout::PRESSURE_TEXT_POS;
use nautical_barometer::sensor::bme280::ADDRESS_PRIMARY;
use nautical_barometer::sensor::{Acquired, Acquisition, Bme280, SensorError, corrected_pressure_pa};
use nautical_barometer::widgets::{draw_needle_step, draw_status_line};
use nautical_barometer::{BarometerScreen, CycleController, NeedleSink, NeedleStep};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::display::{display_spi_config, sensor_i2c_config};
use crate::tft::Tft;

type SensorBus = I2c<'static, I2C0, Blocking>;

/// Portrait framebuffer (153,600 bytes), placed in `.bss` without touching the stack.
static FRAMEBUFFER: ConstStaticCell<[u8; FRAME_BYTES]> = ConstStaticCell::new([0; FRAME_BYTES]);

/// Latest acquisition result, one per poll interval.
static READINGS: Signal<CriticalSectionRawMutex, Result<Acquired, SensorError>> = Signal::new();

// =============================================================================
// Sensor Task
// =============================================================================

/// Acquire one reading per poll interval and hand it to the main task.
#[embassy_executor::task]
async fn sensor_task(mut acquisition: Acquisition<Bme280<SensorBus>>) {
    info!("Sensor task started");

    loop {
        READINGS.signal(acquisition.acquire(&mut Delay));
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}

// =============================================================================
// Needle Sink
// =============================================================================

/// Draws needle steps into the framebuffer and pushes the scale rows after every tick.
struct PanelSink<'a, 'd> {
    framebuffer: &'a mut Framebuffer<'static>,
    tft: &'a mut Tft<'d>,
}

impl NeedleSink for PanelSink<'_, '_> {
    fn needle(
        &mut self,
        step: NeedleStep,
    ) {
        draw_needle_step(self.framebuffer, step);
    }

    fn tick_done(&mut self) {
        let (top, bottom) = NEEDLE_BAND;
        self.tft.blocking_flush_rows(top as u16, self.framebuffer.rows(top, bottom));
    }
}

// =============================================================================
// Main
// =============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Nautical barometer starting...");

    let p = embassy_rp::init(Default::default());
    let settings = board::settings();
    info!("Cadence: {}", settings.cadence);

    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);

    // TX-only SPI with DMA, the panel has no MISO
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());
    let mut tft = Tft::new(spi, dc, cs);
    tft.init().await;

    let mut framebuffer = Framebuffer::new(FRAMEBUFFER.take());
    let mut screen = BarometerScreen::new(&settings);
    screen.draw_static(&mut framebuffer);
    tft.flush(framebuffer.as_bytes()).await;
    info!("Display initialized");

    // Sensor on I2C0: SDA=4, SCL=5
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, sensor_i2c_config());
    let mut sensor = Bme280::new(i2c, ADDRESS_PRIMARY);

    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match sensor.init(&mut Delay) {
            Ok(backend) => {
                info!("{} ready at {=u8:#x}", backend.name(), sensor.address());
                break;
            }
            Err(error) => {
                warn!("Sensor init failed (attempt {}): {}", attempt, error);
                let mut text: String<40> = String::new();
                let _ = write!(text, "sensor: {error}");
                draw_status_line(&mut framebuffer, PRESSURE_TEXT_POS, &text);
                tft.flush(framebuffer.as_bytes()).await;
                Timer::after_millis(SENSOR_RETRY_MS).await;
            }
        }
    }

    spawner.spawn(sensor_task(Acquisition::new(sensor))).unwrap();

    let mut controller = CycleController::new(&settings);
    let mut clock = IntervalClock::new(settings.cadence, now_ms());

    loop {
        let acquired = match READINGS.wait().await {
            Ok(acquired) => acquired,
            Err(error) => {
                warn!("Sensor read failed: {}", error);
                controller.log_mut().record(format_args!("read failed: {error}"));
                continue;
            }
        };
        if acquired.retried {
            warn!("Sensor read recovered on retry");
        }

        let pressure_pa = corrected_pressure_pa(&acquired.reading, &settings);
        let now = now_ms();
        let elapsed = clock.is_due(now);

        let outcome = {
            let mut sink = PanelSink {
                framebuffer: &mut framebuffer,
                tft: &mut tft,
            };
            controller.tick(pressure_pa, elapsed, &mut sink)
        };
        clock.settle(now, &outcome);

        screen.draw_poll(&mut framebuffer, &controller, &outcome, &acquired.reading, pressure_pa);
        tft.flush(framebuffer.as_bytes()).await;

        match outcome.shift {
            Some(shift) => info!(
                "Shift #{}: {} hPa {} ({} ticks)",
                shift.sequence, shift.slots[0], shift.status, shift.ticks
            ),
            None => debug!("Hold: {} Pa", pressure_pa),
        }
    }
}

/// Milliseconds since boot.
fn now_ms() -> u64 { Instant::now().as_millis() }
