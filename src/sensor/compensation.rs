//! BME280/BMP280 calibration data and floating-point compensation.
//!
//! Formulas follow the Bosch datasheet "compensation formulas in double
//! precision floating point". The RP2350 has a double-precision coprocessor,
//! so `f64` costs little and avoids the rounding of the fixed-point variant.

// =============================================================================
// Calibration
// =============================================================================

/// Factory trimming parameters read from the sensor NVM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Calibration {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
    pub humidity: Option<HumidityCalibration>,
}

/// BME280-only humidity trimming parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HumidityCalibration {
    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    pub h4: i16,
    pub h5: i16,
    pub h6: i8,
}

/// Length of the temperature/pressure block starting at register 0x88 (0x88..=0xA1).
pub const TP_CALIBRATION_LEN: usize = 26;

/// Length of the humidity block starting at register 0xE1 (0xE1..=0xE7).
pub const H_CALIBRATION_LEN: usize = 7;

#[inline]
fn u16_le(
    bytes: &[u8],
    at: usize,
) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn i16_le(
    bytes: &[u8],
    at: usize,
) -> i16 {
    i16::from_le_bytes([bytes[at], bytes[at + 1]])
}

impl Calibration {
    /// Decode the 0x88 block and, for a BME280, the 0xE1 block.
    ///
    /// `H1` lives in the last byte of the 0x88 block (register 0xA1).
    #[must_use]
    pub fn from_registers(
        tp: &[u8; TP_CALIBRATION_LEN],
        h: Option<&[u8; H_CALIBRATION_LEN]>,
    ) -> Self {
        let humidity = h.map(|h| HumidityCalibration {
            h1: tp[25],
            h2: i16_le(h, 0),
            h3: h[2],
            // H4 and H5 are 12-bit values sharing register 0xE5
            h4: (i16::from(h[3] as i8) << 4) | i16::from(h[4] & 0x0F),
            h5: (i16::from(h[5] as i8) << 4) | i16::from(h[4] >> 4),
            h6: h[6] as i8,
        });

        Self {
            t1: u16_le(tp, 0),
            t2: i16_le(tp, 2),
            t3: i16_le(tp, 4),
            p1: u16_le(tp, 6),
            p2: i16_le(tp, 8),
            p3: i16_le(tp, 10),
            p4: i16_le(tp, 12),
            p5: i16_le(tp, 14),
            p6: i16_le(tp, 16),
            p7: i16_le(tp, 18),
            p8: i16_le(tp, 20),
            p9: i16_le(tp, 22),
            humidity,
        }
    }

    /// Fine temperature shared by all three compensations.
    #[must_use]
    pub fn t_fine(
        &self,
        adc_t: i32,
    ) -> f64 {
        let adc = f64::from(adc_t);
        let t1 = f64::from(self.t1);
        let var1 = (adc / 16_384.0 - t1 / 1_024.0) * f64::from(self.t2);
        let delta = adc / 131_072.0 - t1 / 8_192.0;
        let var2 = delta * delta * f64::from(self.t3);
        var1 + var2
    }

    /// Pressure in Pa, or `None` when the divisor vanishes (uncalibrated part).
    #[must_use]
    pub fn pressure_pa(
        &self,
        adc_p: i32,
        t_fine: f64,
    ) -> Option<f64> {
        let mut var1 = t_fine / 2.0 - 64_000.0;
        let mut var2 = var1 * var1 * f64::from(self.p6) / 32_768.0;
        var2 += var1 * f64::from(self.p5) * 2.0;
        var2 = var2 / 4.0 + f64::from(self.p4) * 65_536.0;
        var1 = (f64::from(self.p3) * var1 * var1 / 524_288.0 + f64::from(self.p2) * var1) / 524_288.0;
        var1 = (1.0 + var1 / 32_768.0) * f64::from(self.p1);
        if var1 == 0.0 {
            return None;
        }

        let mut p = 1_048_576.0 - f64::from(adc_p);
        p = (p - var2 / 4_096.0) * 6_250.0 / var1;
        let var1 = f64::from(self.p9) * p * p / 2_147_483_648.0;
        let var2 = p * f64::from(self.p8) / 32_768.0;
        Some(p + (var1 + var2 + f64::from(self.p7)) / 16.0)
    }

    /// Relative humidity in percent, clamped to `0..=100`.
    ///
    /// `None` for a BMP280 calibration set.
    #[must_use]
    pub fn humidity_pct(
        &self,
        adc_h: i32,
        t_fine: f64,
    ) -> Option<f64> {
        let h = self.humidity?;
        let var = t_fine - 76_800.0;
        let offset = f64::from(h.h4) * 64.0 + f64::from(h.h5) / 16_384.0 * var;
        let gain = f64::from(h.h2) / 65_536.0
            * (1.0 + f64::from(h.h6) / 67_108_864.0 * var * (1.0 + f64::from(h.h3) / 67_108_864.0 * var));
        let mut rh = (f64::from(adc_h) - offset) * gain;
        rh *= 1.0 - f64::from(h.h1) * rh / 524_288.0;
        Some(rh.clamp(0.0, 100.0))
    }
}

/// Temperature in degrees Celsius from `t_fine`.
#[inline]
#[must_use]
pub fn temperature_c(t_fine: f64) -> f64 {
    t_fine / 5_120.0
}

// =============================================================================
// Unit Tests
// =============================================================================
