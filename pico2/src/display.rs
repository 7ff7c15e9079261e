//! Bus configuration for the panel and the sensor.

use barometer_pico2::board::{DISPLAY_SPI_HZ, SENSOR_I2C_HZ};
use embassy_rp::i2c::Config as I2cConfig;
use embassy_rp::spi::Config as SpiConfig;

/// SPI configuration for the ST7789 display.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = DISPLAY_SPI_HZ;
    config
}

/// I2C configuration for the BME280/BMP280; the breakout carries its own pull-ups.
pub fn sensor_i2c_config() -> I2cConfig {
    let mut config = I2cConfig::default();
    config.frequency = SENSOR_I2C_HZ;
    config
}
