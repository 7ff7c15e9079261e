//! Environment sensor capability and the acquisition policy around it.
//!
//! The engine consumes one corrected pressure per poll. Getting there takes
//! three collaborators, all in this module tree:
//!
//! - [`EnvironmentSensor`]: "give me temperature, humidity and pressure",
//!   implemented by the BME280/BMP280 driver on the device and by a synthetic
//!   source in the simulator
//! - [`Acquisition`]: throw away the first read after boot, retry once on a
//!   bad read
//! - [`sea_level`]: offset and elevation correction
//!
//! Which sensor backs the capability is decided at runtime by probing the
//! chip id, see [`bme280::Bme280::init`].

pub mod bme280;
pub mod compensation;
pub mod sea_level;

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::config::pressure::{PLAUSIBLE_PRESSURE_PA, PLAUSIBLE_TEMPERATURE_C, RETRY_DELAY_MS, SETTLE_DELAY_MS};

pub use bme280::Bme280;
pub use sea_level::{corrected_pressure_pa, sea_level_pressure};

// =============================================================================
// Readings
// =============================================================================

/// One compensated measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub temperature_c: f32,
    /// Relative humidity in percent, `None` for sensors without a humidity channel.
    pub humidity_pct: Option<f32>,
    /// Station pressure in pascals (no sea-level correction).
    pub pressure_pa: f32,
}

impl Reading {
    /// Finite values inside the sensor's operating window.
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        let (p_lo, p_hi) = PLAUSIBLE_PRESSURE_PA;
        let (t_lo, t_hi) = PLAUSIBLE_TEMPERATURE_C;
        self.pressure_pa.is_finite()
            && self.temperature_c.is_finite()
            && (p_lo..=p_hi).contains(&self.pressure_pa)
            && (t_lo..=t_hi).contains(&self.temperature_c)
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Bus failure category, mirrored from `embedded_hal::i2c::ErrorKind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFault {
    Bus,
    ArbitrationLoss,
    /// No acknowledge on the address byte (no device at that address).
    AddressNack,
    /// No acknowledge on a data byte.
    DataNack,
    Overrun,
    Other,
}

impl From<ErrorKind> for BusFault {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => Self::Bus,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => Self::AddressNack,
            ErrorKind::NoAcknowledge(_) => Self::DataNack,
            ErrorKind::Overrun => Self::Overrun,
            _ => Self::Other,
        }
    }
}

/// Reasons a sensor read can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// I2C transaction failed.
    Bus(BusFault),
    /// Chip id register holds an unsupported value.
    UnknownChip(u8),
    /// Read succeeded but the values are outside the operating window.
    Implausible,
    /// Conversion results are not available yet.
    NotReady,
}

impl SensorError {
    /// Wrap any `embedded-hal` I2C error.
    pub fn bus<E: embedded_hal::i2c::Error>(error: E) -> Self {
        Self::Bus(error.kind().into())
    }
}

impl fmt::Display for SensorError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Bus(fault) => write!(f, "I2C error: {fault:?}"),
            Self::UnknownChip(id) => write!(f, "unknown chip id 0x{id:02X}"),
            Self::Implausible => f.write_str("implausible reading"),
            Self::NotReady => f.write_str("measurement not ready"),
        }
    }
}

// =============================================================================
// Capability
// =============================================================================

/// Which chip answered the chip-id read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorBackend {
    /// Temperature, humidity and pressure.
    Bme280,
    /// Temperature and pressure only.
    Bmp280,
}

impl SensorBackend {
    #[must_use]
    pub const fn has_humidity(self) -> bool {
        matches!(self, Self::Bme280)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bme280 => "BME280",
            Self::Bmp280 => "BMP280",
        }
    }
}

/// Anything that can produce a compensated environment reading.
pub trait EnvironmentSensor {
    fn read(&mut self) -> Result<Reading, SensorError>;
}

impl<T: EnvironmentSensor + ?Sized> EnvironmentSensor for &mut T {
    fn read(&mut self) -> Result<Reading, SensorError> {
        (**self).read()
    }
}

// =============================================================================
// Acquisition Policy
// =============================================================================

/// A reading plus how it was obtained.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acquired {
    pub reading: Reading,
    /// The first attempt failed and the retry succeeded.
    pub retried: bool,
}

/// Read policy wrapped around a sensor.
///
/// The first call after boot performs one throw-away read and waits for the
/// sensor to settle. Every call then reads once; a bus error or implausible
/// reading is retried a single time after [`RETRY_DELAY_MS`].
pub struct Acquisition<S> {
    sensor: S,
    primed: bool,
}

impl<S: EnvironmentSensor> Acquisition<S> {
    pub const fn new(sensor: S) -> Self {
        Self { sensor, primed: false }
    }

    /// Obtain one plausible reading or the error of the second attempt.
    pub fn acquire<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<Acquired, SensorError> {
        if !self.primed {
            // First conversion after power-on is unreliable
            let _ = self.sensor.read();
            delay.delay_ms(SETTLE_DELAY_MS);
            self.primed = true;
        }

        match self.read_checked() {
            Ok(reading) => Ok(Acquired { reading, retried: false }),
            Err(_) => {
                delay.delay_ms(RETRY_DELAY_MS);
                self.read_checked().map(|reading| Acquired { reading, retried: true })
            }
        }
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    fn read_checked(&mut self) -> Result<Reading, SensorError> {
        let reading = self.sensor.read()?;
        if reading.is_plausible() { Ok(reading) } else { Err(SensorError::Implausible) }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
