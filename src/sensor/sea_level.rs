//! Station-to-sea-level pressure correction.
//!
//! `P0 = P / (1 - 0.0065 h / (T + 0.0065 h + 273.15)) ^ 5.25588`
//!
//! with `h` the station elevation in metres and `T` the measured temperature
//! in degrees Celsius (hypsometric formula, standard lapse rate).

use libm::powf;

use super::Reading;
use crate::config::Settings;

/// Standard temperature lapse rate, K/m.
const LAPSE_RATE: f32 = 0.0065;

/// Barometric exponent `g * M / (R * L)`.
const EXPONENT: f32 = 5.25588;

const KELVIN_OFFSET: f32 = 273.15;

/// Reduce a station pressure to sea level.
#[must_use]
pub fn sea_level_pressure(
    station_pa: f32,
    temperature_c: f32,
    elevation_m: f32,
) -> f32 {
    if elevation_m == 0.0 {
        return station_pa;
    }
    let drop = LAPSE_RATE * elevation_m;
    let ratio = 1.0 - drop / (temperature_c + drop + KELVIN_OFFSET);
    station_pa / powf(ratio, EXPONENT)
}

/// Apply the configured board offset and elevation to a reading.
///
/// Returns integer pascals (hundredths of a millibar), truncated.
#[must_use]
pub fn corrected_pressure_pa(
    reading: &Reading,
    settings: &Settings,
) -> i32 {
    let station = reading.pressure_pa + settings.pressure_offset_pa as f32;
    sea_level_pressure(station, reading.temperature_c, settings.elevation_m) as i32
}

// =============================================================================
// Unit Tests
// =============================================================================
