//! Low-level drawing helpers shared across widgets.
//!
//! # Text Bands
//!
//! Readout text changes width between updates ("9.5C" vs "10.0C"). Instead of
//! tracking the previous string, [`draw_text_band`] clears a fixed band with
//! the background color and draws the new text on top.
//!
//! # Polar Points
//!
//! The humidity meter places ticks and the needle on an arc. [`polar_point`]
//! uses `micromath` sine/cosine, which are fast approximations without
//! `libm` tables and accurate enough for pixel placement.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Text, TextStyle};

/// Fill an axis-aligned rectangle.
pub fn fill_rect<D>(
    display: &mut D,
    top_left: Point,
    size: Size,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(top_left, size)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Draw a line with a pre-built style.
#[inline]
pub fn draw_line<D>(
    display: &mut D,
    line: Line,
    style: PrimitiveStyle<Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    line.into_styled(style).draw(display).ok();
}

/// Clear a band to `background` and draw `text` at `position`.
#[allow(clippy::too_many_arguments)]
pub fn draw_text_band<D>(
    display: &mut D,
    band_top_left: Point,
    band_size: Size,
    background: Rgb565,
    text: &str,
    position: Point,
    character_style: MonoTextStyle<'_, Rgb565>,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    fill_rect(display, band_top_left, band_size, background);
    Text::with_text_style(text, position, character_style, text_style)
        .draw(display)
        .ok();
}

/// Point at `radius` from `center`, `degrees` clockwise from straight up.
#[inline]
pub fn polar_point(
    center: Point,
    radius: f32,
    degrees: f32,
) -> Point {
    let radians = degrees * core::f32::consts::PI / 180.0;
    let dx = radius * micromath::F32(radians).sin().0;
    let dy = radius * micromath::F32(radians).cos().0;
    Point::new(center.x + round(dx), center.y - round(dy))
}

#[inline]
fn round(value: f32) -> i32 {
    if value >= 0.0 { (value + 0.5) as i32 } else { (value - 0.5) as i32 }
}

// =============================================================================
// Unit Tests
// =============================================================================
