//! Synthetic environment sensor for the desktop simulator.
//!
//! Pressure follows a slow swell plus a faster ripple, reaching past both
//! ends of the default 997..1036 hPa range so the out-of-range markers and
//! clamped needles show up. A bus fault is injected periodically to exercise
//! the acquisition retry.

use std::f32::consts::TAU;

use nautical_barometer::sensor::{BusFault, EnvironmentSensor, Reading, SensorError};

/// Every n-th read fails with a bus fault.
const FAILURE_PERIOD: u32 = 97;

/// Mean sea-level pressure of the waveform.
const BASE_PRESSURE_PA: f32 = 101_300.0;

/// Slow swell amplitude and period (reads).
const SWELL: (f32, f32) = (1_800.0, 480.0);

/// Fast ripple amplitude and period (reads).
const RIPPLE: (f32, f32) = (700.0, 47.0);

/// Deterministic sensor driven by a read counter.
#[derive(Clone, Debug)]
pub struct SyntheticSensor {
    sample: u32,
    bias_pa: f32,
    fail_every: Option<u32>,
}

impl SyntheticSensor {
    pub const fn new() -> Self {
        Self {
            sample: 0,
            bias_pa: 0.0,
            fail_every: Some(FAILURE_PERIOD),
        }
    }

    /// Sensor that never fails.
    pub const fn reliable() -> Self {
        Self {
            fail_every: None,
            ..Self::new()
        }
    }

    /// Shift every following pressure by `delta_pa`.
    pub fn nudge(
        &mut self,
        delta_pa: f32,
    ) {
        self.bias_pa += delta_pa;
    }

    pub const fn bias_pa(&self) -> f32 { self.bias_pa }
}

fn wave(
    n: f32,
    (amplitude, period): (f32, f32),
) -> f32 {
    amplitude * (n * TAU / period).sin()
}

impl EnvironmentSensor for SyntheticSensor {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.sample += 1;
        if let Some(period) = self.fail_every
            && self.sample % period == 0
        {
            return Err(SensorError::Bus(BusFault::AddressNack));
        }

        let n = self.sample as f32;
        Ok(Reading {
            temperature_c: 18.0 + wave(n, (4.0, 360.0)),
            humidity_pct: Some(50.0 + wave(n, (25.0, 150.0))),
            pressure_pa: BASE_PRESSURE_PA + wave(n, SWELL) + wave(n, RIPPLE) + self.bias_pa,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_are_plausible_and_cross_range() {
        let mut sensor = SyntheticSensor::reliable();
        let mut lowest = f32::MAX;
        let mut highest = f32::MIN;
        for _ in 0..1_000 {
            let reading = sensor.read().unwrap();
            assert!(reading.is_plausible(), "{reading:?}");
            lowest = lowest.min(reading.pressure_pa);
            highest = highest.max(reading.pressure_pa);
        }
        assert!(lowest < 99_700.0);
        assert!(highest > 103_600.0);
    }

    #[test]
    fn test_failure_injected_periodically() {
        let mut sensor = SyntheticSensor::new();
        let failures = (0..FAILURE_PERIOD * 3).filter(|_| sensor.read().is_err()).count();
        assert_eq!(failures, 3);
    }

    #[test]
    fn test_nudge_offsets_pressure() {
        let mut plain = SyntheticSensor::reliable();
        let mut nudged = SyntheticSensor::reliable();
        nudged.nudge(100.0);

        let a = plain.read().unwrap().pressure_pa;
        let b = nudged.read().unwrap().pressure_pa;
        assert!((b - a - 100.0).abs() < 0.1);
        assert_eq!(nudged.bias_pa(), 100.0);
    }
}
