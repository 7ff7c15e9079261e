//! RGB565 framebuffer in panel byte order.
//!
//! The whole portrait screen (240x320, 153,600 bytes) lives in one static
//! buffer. Widgets draw into it through [`Framebuffer`], and the panel driver
//! streams either the whole buffer or a band of rows to the display.
//!
//! # Performance Optimizations
//!
//! - **Pixel-pair writes:** `clear()` and `fill_solid()` copy two pixels at a time
//! - **Row bands:** [`Framebuffer::rows`] exposes a contiguous slice, so a
//!   needle tick only transfers the scale area instead of the full frame

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use nautical_barometer::config::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Panel width in pixels (portrait).
pub const WIDTH: usize = SCREEN_WIDTH as usize;

/// Panel height in pixels.
pub const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Bytes per framebuffer row.
pub const ROW_BYTES: usize = WIDTH * 2;

/// Total framebuffer size in bytes.
pub const FRAME_BYTES: usize = ROW_BYTES * HEIGHT;

/// `DrawTarget` over a byte buffer holding big-endian RGB565 pixels.
pub struct Framebuffer<'a> {
    bytes: &'a mut [u8; FRAME_BYTES],
}

impl<'a> Framebuffer<'a> {
    pub fn new(bytes: &'a mut [u8; FRAME_BYTES]) -> Self { Self { bytes } }

    /// Raw bytes of the whole frame, ready to stream after `RAMWR`.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes[..] }

    /// Raw bytes of rows `top..bottom` (clamped to the panel).
    #[inline]
    pub fn rows(
        &self,
        top: usize,
        bottom: usize,
    ) -> &[u8] {
        let bottom = bottom.min(HEIGHT);
        let top = top.min(bottom);
        &self.bytes[top * ROW_BYTES..bottom * ROW_BYTES]
    }

    /// Color of one pixel, `None` outside the panel.
    pub fn pixel(
        &self,
        x: usize,
        y: usize,
    ) -> Option<Rgb565> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let idx = (y * WIDTH + x) * 2;
        let raw = u16::from_be_bytes([self.bytes[idx], self.bytes[idx + 1]]);
        Some(Rgb565::from(RawU16::new(raw)))
    }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: Rgb565,
    ) {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = (y as usize * WIDTH + x as usize) * 2;
            let bytes = RawU16::from(color).into_inner().to_be_bytes();
            self.bytes[idx] = bytes[0];
            self.bytes[idx + 1] = bytes[1];
        }
    }
}

/// Two big-endian pixels, copied four bytes at a time.
#[inline]
fn pixel_pair(color: Rgb565) -> [u8; 4] {
    let [hi, lo] = RawU16::from(color).into_inner().to_be_bytes();
    [hi, lo, hi, lo]
}

impl OriginDimensions for Framebuffer<'_> {
    fn size(&self) -> Size { Size::new(WIDTH as u32, HEIGHT as u32) }
}

impl DrawTarget for Framebuffer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size == Size::zero() {
            return Ok(());
        }

        let pair = pixel_pair(color);
        let x_start = area.top_left.x as usize;
        let width = area.size.width as usize;

        for y in area.rows() {
            let row = y as usize * ROW_BYTES;
            let span = &mut self.bytes[row + x_start * 2..row + (x_start + width) * 2];
            let mut words = span.chunks_exact_mut(4);
            for word in &mut words {
                word.copy_from_slice(&pair);
            }
            let tail = words.into_remainder();
            tail.copy_from_slice(&pair[..tail.len()]);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let pair = pixel_pair(color);
        for word in self.bytes.chunks_exact_mut(4) {
            word.copy_from_slice(&pair);
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
