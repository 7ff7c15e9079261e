//! Color constants for the barometer display.
//!
//! Standard colors come from the `RgbColor` trait constants. The scale frame
//! grey is the classic TFT 0x5AEB, expressed in 5-6-5 components.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Screen background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Scale faces and the live pressure text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Gauge needles.
pub const RED: Rgb565 = Rgb565::RED;

/// Gauge value labels and the trend bar marker.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Gauge captions.
pub const CYAN: Rgb565 = Rgb565::CYAN;

/// Out-of-range pressure warning.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Scale frame grey (RGB565 0x5AEB).
pub const GREY: Rgb565 = Rgb565::new(11, 23, 11);

/// Humidity meter face.
pub const CREAM: Rgb565 = Rgb565::new(31, 61, 26);

/// Dark track behind the trend bar marker.
pub const DARK_GREY: Rgb565 = Rgb565::new(8, 16, 8);
