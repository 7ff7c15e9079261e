//! Board wiring, bus speeds and boot-time settings.
//!
//! Pin mapping (Pimoroni PIM715 Display Pack 2.8" plus a BME280/BMP280 breakout):
//! - Display DC: GPIO16
//! - Display CS: GPIO17
//! - Display CLK: GPIO18 (SPI0 CLK)
//! - Display MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Sensor SDA: GPIO4 (I2C0)
//! - Sensor SCL: GPIO5 (I2C0)

use nautical_barometer::Settings;
use nautical_barometer::config::layout::{SCALE_HEIGHT, SCALE_TOP};

/// SPI clock for the ST7789 (datasheet maximum).
pub const DISPLAY_SPI_HZ: u32 = 62_500_000;

/// I2C clock for the pressure sensor.
pub const SENSOR_I2C_HZ: u32 = 100_000;

/// Pause between sensor initialization attempts.
pub const SENSOR_RETRY_MS: u64 = 5_000;

/// Rows pushed to the panel after every needle tick: the scale area.
pub const NEEDLE_BAND: (usize, usize) = (SCALE_TOP as usize, (SCALE_TOP + SCALE_HEIGHT as i32) as usize);

/// Settings for this build. The `debug-cadence` feature shifts the history
/// every minute.
#[must_use]
pub const fn settings() -> Settings {
    if cfg!(feature = "debug-cadence") { Settings::debug() } else { Settings::DEFAULT }
}

#[cfg(test)]
mod tests {
    use nautical_barometer::config::layout::{FACE_HEIGHT, FACE_OFFSET, needle_row};

    use super::*;
    use crate::framebuffer::HEIGHT;

    #[test]
    fn test_needle_band_covers_scale_face() {
        let (top, bottom) = NEEDLE_BAND;
        let face_top = (SCALE_TOP + FACE_OFFSET.y) as usize;
        assert!(top <= face_top);
        assert!(face_top + FACE_HEIGHT as usize <= bottom);
        assert!(bottom <= HEIGHT);
        assert!((top..bottom).contains(&(needle_row(0) as usize + 6)));
    }

    #[test]
    fn test_settings_follow_feature() {
        let expected = if cfg!(feature = "debug-cadence") {
            nautical_barometer::Cadence::Minutely
        } else {
            nautical_barometer::Cadence::Hourly
        };
        assert_eq!(settings().cadence, expected);
    }
}
