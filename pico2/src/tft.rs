//! ST7789 panel driver for embassy-rp, portrait orientation.
//!
//! The panel is write-only: commands and pixel data go out over a TX-only
//! SPI bus, with DC selecting command or data. Two transfer paths exist:
//!
//! - [`Tft::flush`]: async DMA transfer of the whole frame, used once per poll
//! - [`Tft::blocking_flush_rows`]: blocking transfer of a band of rows, used
//!   from inside the needle animation where no executor is available

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Timer;

use barometer_pico2::framebuffer::{HEIGHT, WIDTH};

// ST7789 Commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

/// Native portrait scan order, RGB.
const MADCTL_PORTRAIT: u8 = 0x00;

/// 16 bits per pixel.
const COLMOD_RGB565: u8 = 0x55;

/// Owns the SPI bus and control pins of the panel.
pub struct Tft<'d> {
    spi: Spi<'d, SPI0, Async>,
    dc: Output<'d>,
    cs: Output<'d>,
}

impl<'d> Tft<'d> {
    pub fn new(
        spi: Spi<'d, SPI0, Async>,
        dc: Output<'d>,
        cs: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs }
    }

    /// Reset and configure the panel.
    pub async fn init(&mut self) {
        self.command(SWRESET, &[]);
        Timer::after_millis(150).await;

        self.command(SLPOUT, &[]);
        Timer::after_millis(10).await;

        self.command(COLMOD, &[COLMOD_RGB565]);
        self.command(MADCTL, &[MADCTL_PORTRAIT]);

        // Inversion on (required for PIM715)
        self.command(INVON, &[]);
        self.command(NORON, &[]);
        Timer::after_millis(10).await;

        self.command(DISPON, &[]);
        Timer::after_millis(10).await;
    }

    /// Stream a full frame via DMA.
    pub async fn flush(
        &mut self,
        frame: &[u8],
    ) {
        self.set_window(0, HEIGHT as u16);
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[RAMWR]).ok();
        self.dc.set_high();
        self.spi.write(frame).await.ok();
        self.cs.set_high();
    }

    /// Stream full-width rows starting at `top`, blocking until done.
    pub fn blocking_flush_rows(
        &mut self,
        top: u16,
        rows: &[u8],
    ) {
        let count = (rows.len() / (WIDTH * 2)) as u16;
        if count == 0 {
            return;
        }
        self.set_window(top, count);
        self.command(RAMWR, rows);
    }

    /// Restrict writes to full-width rows `top..top + count`.
    fn set_window(
        &mut self,
        top: u16,
        count: u16,
    ) {
        let x1 = WIDTH as u16 - 1;
        let y1 = top + count - 1;
        self.command(CASET, &[0, 0, (x1 >> 8) as u8, x1 as u8]);
        self.command(RASET, &[(top >> 8) as u8, top as u8, (y1 >> 8) as u8, y1 as u8]);
    }

    /// Send a command byte followed by its parameters with CS held low.
    fn command(
        &mut self,
        cmd: u8,
        data: &[u8],
    ) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[cmd]).ok();
        if !data.is_empty() {
            self.dc.set_high();
            self.spi.blocking_write(data).ok();
        }
        self.cs.set_high();
    }
}
