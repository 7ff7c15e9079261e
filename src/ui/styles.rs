//! Pre-computed static text and primitive styles.
//!
//! # Optimization: Static Style Constants
//!
//! Every style the widgets use is a `const`, so nothing is constructed while
//! needles sweep. Styles whose color varies at runtime share the font
//! references exposed here.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    primitives::PrimitiveStyle,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_18_POINT;

use super::colors::{BLACK, CREAM, CYAN, GREEN, GREY, RED, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text hanging from its top edge. Gauge captions.
pub const CENTERED_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Top)
    .build();

/// Right-aligned text hanging from its top edge. Gauge labels.
pub const RIGHT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Top)
    .build();

/// Left-aligned text hanging from its top edge. Readouts and status lines.
pub const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Font References
// =============================================================================

/// Small font for captions, labels and scale numbers.
pub const SMALL_FONT: &MonoFont = &FONT_6X10;

/// Live pressure font (`ProFont` 18pt).
pub const PRESSURE_FONT: &MonoFont = &PROFONT_18_POINT;

// =============================================================================
// Text Styles
// =============================================================================

pub const CAPTION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(SMALL_FONT, CYAN);

pub const LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(SMALL_FONT, GREEN);

/// Scale numbers on the humidity meter face.
pub const METER_SCALE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(SMALL_FONT, BLACK);

/// Temperature and humidity figures inside the meter panel.
pub const METER_VALUE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, BLACK);

pub const STATUS_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(SMALL_FONT, WHITE);

// =============================================================================
// Primitive Styles
// =============================================================================

pub const FRAME_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GREY, 1);

pub const FACE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

pub const TICK_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(BLACK, 1);

pub const NEEDLE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(RED);

pub const NEEDLE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(RED, 1);

/// Erase stroke: paints over a needle edge with the face color.
pub const ERASE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(WHITE, 1);


/// Paints over the humidity needle with the meter face color.
pub const METER_ERASE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(CREAM, 1);

pub const METER_FACE_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(CREAM);
