//! Text formatting for the live readout and gauge labels.
//!
//! All helpers return fixed-capacity `heapless` strings so they work in the
//! `no_std` firmware without an allocator.

use core::fmt::Write;

use heapless::String;

use crate::config::{Cadence, PressureRange, TemperatureUnit};

/// Live pressure line, e.g. `"   1013.25 mb"`.
pub type PressureText = String<16>;

/// Short text for temperature, humidity, captions and labels.
pub type ShortText = String<8>;

/// Format the live pressure with an out-of-range marker.
///
/// `"++"` above the range maximum, `"--"` below the minimum, two spaces
/// otherwise.
pub fn format_pressure(
    pa: i32,
    range: &PressureRange,
) -> PressureText {
    let marker = if pa > range.max_pa() {
        "++"
    } else if pa < range.min_pa() {
        "--"
    } else {
        "  "
    };

    let mut text = PressureText::new();
    let _ = write!(text, "{marker}{:8.2} mb", pa as f32 / 100.0);
    text
}

/// Temperature with one decimal and unit letter, e.g. `"72.5F"`.
pub fn format_temperature(
    celsius: f32,
    unit: TemperatureUnit,
) -> ShortText {
    let mut text = ShortText::new();
    let _ = write!(text, "{:.1}{}", unit.convert(celsius), unit.symbol());
    text
}

/// Relative humidity as a whole percentage, `"--%"` without a humidity channel.
pub fn format_humidity(humidity_pct: Option<f32>) -> ShortText {
    let mut text = ShortText::new();
    match humidity_pct {
        Some(pct) => {
            let _ = write!(text, "{}%", pct.clamp(0.0, 100.0) as u8);
        }
        None => {
            let _ = text.push_str("--%");
        }
    }
    text
}

/// Gauge label: the gauge value right-aligned in four characters.
pub fn format_label(units: i32) -> ShortText {
    let mut text = ShortText::new();
    let _ = write!(text, "{units:>4}");
    text
}

/// Caption above a gauge showing history `slot`.
pub fn caption(
    slot: usize,
    cadence: Cadence,
) -> ShortText {
    let mut text = ShortText::new();
    if slot == 0 {
        let _ = text.push_str("Now");
    } else {
        let _ = write!(text, "-{slot}{}", cadence.suffix());
    }
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
