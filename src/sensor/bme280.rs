//! Blocking I2C driver for the Bosch BME280 and BMP280.
//!
//! Both chips share the register map for temperature and pressure; the
//! BME280 adds a humidity channel. The driver detects the chip from its id
//! register and applies a matching acquisition profile:
//!
//! | Chip   | osrs_t | osrs_p | osrs_h | IIR | Standby |
//! |--------|--------|--------|--------|-----|---------|
//! | BME280 | 16x    | 16x    | 16x    | 16  | 1000 ms |
//! | BMP280 | 2x     | 16x    | -      | 16  | 500 ms  |
//!
//! Both run in normal mode, so a read simply fetches the latest conversion.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::compensation::{Calibration, H_CALIBRATION_LEN, TP_CALIBRATION_LEN, temperature_c};
use super::{EnvironmentSensor, Reading, SensorBackend, SensorError};

// =============================================================================
// Registers
// =============================================================================

/// Address with SDO tied low.
pub const ADDRESS_PRIMARY: u8 = 0x76;

/// Address with SDO tied high.
pub const ADDRESS_SECONDARY: u8 = 0x77;

const REG_CALIB_TP: u8 = 0x88;
const REG_CHIP_ID: u8 = 0xD0;
const REG_RESET: u8 = 0xE0;
const REG_CALIB_H: u8 = 0xE1;
const REG_CTRL_HUM: u8 = 0xF2;
const REG_STATUS: u8 = 0xF3;
const REG_CTRL_MEAS: u8 = 0xF4;
const REG_CONFIG: u8 = 0xF5;
const REG_DATA: u8 = 0xF7;

const CHIP_ID_BME280: u8 = 0x60;
const CHIP_ID_BMP280: [u8; 3] = [0x56, 0x57, 0x58];

const RESET_COMMAND: u8 = 0xB6;

/// `im_update`: NVM data is being copied to image registers.
const STATUS_IM_UPDATE: u8 = 0x01;

/// ADC value reported for a skipped measurement.
const ADC_SKIPPED_20BIT: i32 = 0x8_0000;
const ADC_SKIPPED_16BIT: i32 = 0x8000;

const NVM_POLL_ATTEMPTS: u8 = 10;

// =============================================================================
// Acquisition Profiles
// =============================================================================

/// Register values for one chip's acquisition profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Profile {
    ctrl_hum: Option<u8>,
    config: u8,
    ctrl_meas: u8,
}

const MODE_NORMAL: u8 = 0b11;
const OSRS_X2: u8 = 0b010;
const OSRS_X16: u8 = 0b101;
const FILTER_16: u8 = 0b100;
const STANDBY_500_MS: u8 = 0b100;
const STANDBY_1000_MS: u8 = 0b101;

const fn ctrl_meas(
    osrs_t: u8,
    osrs_p: u8,
) -> u8 {
    (osrs_t << 5) | (osrs_p << 2) | MODE_NORMAL
}

const fn config(
    standby: u8,
    filter: u8,
) -> u8 {
    (standby << 5) | (filter << 2)
}

impl SensorBackend {
    const fn profile(self) -> Profile {
        match self {
            Self::Bme280 => Profile {
                ctrl_hum: Some(OSRS_X16),
                config: config(STANDBY_1000_MS, FILTER_16),
                ctrl_meas: ctrl_meas(OSRS_X16, OSRS_X16),
            },
            Self::Bmp280 => Profile {
                ctrl_hum: None,
                config: config(STANDBY_500_MS, FILTER_16),
                ctrl_meas: ctrl_meas(OSRS_X2, OSRS_X16),
            },
        }
    }

    /// Map a chip id register value to a backend.
    pub fn from_chip_id(id: u8) -> Result<Self, SensorError> {
        match id {
            CHIP_ID_BME280 => Ok(Self::Bme280),
            id if CHIP_ID_BMP280.contains(&id) => Ok(Self::Bmp280),
            id => Err(SensorError::UnknownChip(id)),
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Raw 20-bit/16-bit conversion results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct RawSample {
    adc_p: i32,
    adc_t: i32,
    adc_h: Option<i32>,
}

impl RawSample {
    fn parse(data: &[u8]) -> Self {
        let adc20 = |msb: u8, lsb: u8, xlsb: u8| (i32::from(msb) << 12) | (i32::from(lsb) << 4) | (i32::from(xlsb) >> 4);
        Self {
            adc_p: adc20(data[0], data[1], data[2]),
            adc_t: adc20(data[3], data[4], data[5]),
            adc_h: (data.len() >= 8).then(|| (i32::from(data[6]) << 8) | i32::from(data[7])),
        }
    }
}

/// BME280/BMP280 on a blocking I2C bus.
pub struct Bme280<I2C> {
    i2c: I2C,
    address: u8,
    state: Option<(SensorBackend, Calibration)>,
}

impl<I2C: I2c> Bme280<I2C> {
    /// Take ownership of the bus. Call [`Self::init`] before reading.
    pub const fn new(
        i2c: I2C,
        address: u8,
    ) -> Self {
        Self {
            i2c,
            address,
            state: None,
        }
    }

    /// Identify the chip, reset it, load calibration and start normal mode.
    ///
    /// Safe to call again after a failure.
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<SensorBackend, SensorError> {
        self.state = None;

        let backend = SensorBackend::from_chip_id(self.read_register(REG_CHIP_ID)?)?;

        self.write_register(REG_RESET, RESET_COMMAND)?;
        delay.delay_ms(2);
        self.wait_for_nvm(delay)?;

        let calibration = self.read_calibration(backend)?;

        let profile = backend.profile();
        // ctrl_hum only takes effect after the following ctrl_meas write
        if let Some(ctrl_hum) = profile.ctrl_hum {
            self.write_register(REG_CTRL_HUM, ctrl_hum)?;
        }
        self.write_register(REG_CONFIG, profile.config)?;
        self.write_register(REG_CTRL_MEAS, profile.ctrl_meas)?;

        self.state = Some((backend, calibration));
        Ok(backend)
    }

    /// Detected chip, `None` until [`Self::init`] succeeded.
    pub fn backend(&self) -> Option<SensorBackend> {
        self.state.map(|(backend, _)| backend)
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn wait_for_nvm<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), SensorError> {
        for _ in 0..NVM_POLL_ATTEMPTS {
            if self.read_register(REG_STATUS)? & STATUS_IM_UPDATE == 0 {
                return Ok(());
            }
            delay.delay_ms(1);
        }
        Err(SensorError::NotReady)
    }

    fn read_calibration(
        &mut self,
        backend: SensorBackend,
    ) -> Result<Calibration, SensorError> {
        let mut tp = [0u8; TP_CALIBRATION_LEN];
        self.read_registers(REG_CALIB_TP, &mut tp)?;

        if backend.has_humidity() {
            let mut h = [0u8; H_CALIBRATION_LEN];
            self.read_registers(REG_CALIB_H, &mut h)?;
            Ok(Calibration::from_registers(&tp, Some(&h)))
        } else {
            Ok(Calibration::from_registers(&tp, None))
        }
    }

    fn read_register(
        &mut self,
        register: u8,
    ) -> Result<u8, SensorError> {
        let mut value = [0u8; 1];
        self.read_registers(register, &mut value)?;
        Ok(value[0])
    }

    fn read_registers(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), SensorError> {
        self.i2c.write_read(self.address, &[register], buffer).map_err(SensorError::bus)
    }

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), SensorError> {
        self.i2c.write(self.address, &[register, value]).map_err(SensorError::bus)
    }
}

impl<I2C: I2c> EnvironmentSensor for Bme280<I2C> {
    fn read(&mut self) -> Result<Reading, SensorError> {
        let (backend, calibration) = self.state.ok_or(SensorError::NotReady)?;

        // Burst read keeps all channels from the same conversion
        let mut data = [0u8; 8];
        let len = if backend.has_humidity() { 8 } else { 6 };
        self.read_registers(REG_DATA, &mut data[..len])?;
        let raw = RawSample::parse(&data[..len]);

        if raw.adc_t == ADC_SKIPPED_20BIT || raw.adc_p == ADC_SKIPPED_20BIT {
            return Err(SensorError::NotReady);
        }

        let t_fine = calibration.t_fine(raw.adc_t);
        let pressure = calibration.pressure_pa(raw.adc_p, t_fine).ok_or(SensorError::Implausible)?;
        let humidity = raw
            .adc_h
            .filter(|&adc| adc != ADC_SKIPPED_16BIT)
            .and_then(|adc| calibration.humidity_pct(adc, t_fine));

        Ok(Reading {
            temperature_c: temperature_c(t_fine) as f32,
            humidity_pct: humidity.map(|rh| rh as f32),
            pressure_pa: pressure as f32,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    use crate::sensor::BusFault;

    /// In-memory register map answering at one address.
    struct RegisterBus {
        address: u8,
        registers: [u8; 256],
        writes: Vec<(u8, u8)>,
    }

    impl RegisterBus {
        fn new(chip_id: u8) -> Self {
            let mut registers = [0u8; 256];
            registers[REG_CHIP_ID as usize] = chip_id;
            Self {
                address: ADDRESS_PRIMARY,
                registers,
                writes: Vec::new(),
            }
        }

        fn load(
            &mut self,
            register: u8,
            bytes: &[u8],
        ) {
            let start = register as usize;
            self.registers[start..start + bytes.len()].copy_from_slice(bytes);
        }

        /// Datasheet calibration plus a humidity block, and matching raw samples.
        fn datasheet(chip_id: u8) -> Self {
            let mut bus = Self::new(chip_id);
            let words: [u16; 12] = [
                27_504,
                26_435,
                -1_000i16 as u16,
                36_477,
                -10_685i16 as u16,
                3_024,
                2_855,
                140,
                -7i16 as u16,
                15_500,
                -14_600i16 as u16,
                6_000,
            ];
            for (i, word) in words.iter().enumerate() {
                bus.load(REG_CALIB_TP + 2 * i as u8, &word.to_le_bytes());
            }
            bus.load(0xA1, &[75]);
            bus.load(REG_CALIB_H, &[0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E]);
            // adc_P = 415148, adc_T = 519888, adc_H = 30000
            bus.load(REG_DATA, &[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x75, 0x30]);
            bus
        }

        fn written(
            &self,
            register: u8,
        ) -> Option<u8> {
            self.writes.iter().rev().find(|(r, _)| *r == register).map(|&(_, v)| v)
        }
    }

    impl ErrorType for RegisterBus {
        type Error = ErrorKind;
    }

    impl I2c for RegisterBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.address {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            let mut pointer = 0usize;
            for operation in operations {
                match operation {
                    Operation::Write(bytes) => {
                        if let Some((&register, values)) = bytes.split_first() {
                            pointer = register as usize;
                            for &value in values {
                                self.writes.push((pointer as u8, value));
                                self.registers[pointer] = value;
                                pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buffer) => {
                        for byte in buffer.iter_mut() {
                            *byte = self.registers[pointer];
                            pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(
            &mut self,
            _ns: u32,
        ) {
        }
    }

    #[test]
    fn test_init_bme280_profile() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x60), ADDRESS_PRIMARY);

        assert_eq!(sensor.init(&mut NoDelay), Ok(SensorBackend::Bme280));

        let bus = sensor.release();
        assert_eq!(bus.written(REG_RESET), Some(0xB6));
        assert_eq!(bus.written(REG_CTRL_HUM), Some(0b101));
        assert_eq!(bus.written(REG_CONFIG), Some(0b1011_0000));
        assert_eq!(bus.written(REG_CTRL_MEAS), Some(0b1011_0111));
    }

    #[test]
    fn test_init_bmp280_profile() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x58), ADDRESS_PRIMARY);

        assert_eq!(sensor.init(&mut NoDelay), Ok(SensorBackend::Bmp280));

        let bus = sensor.release();
        assert_eq!(bus.written(REG_CTRL_HUM), None);
        assert_eq!(bus.written(REG_CONFIG), Some(0b1001_0000));
        assert_eq!(bus.written(REG_CTRL_MEAS), Some(0b0101_0111));
    }

    #[test]
    fn test_read_bme280() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x60), ADDRESS_PRIMARY);
        sensor.init(&mut NoDelay).unwrap();

        let reading = sensor.read().unwrap();

        assert!((reading.temperature_c - 25.08).abs() < 0.01);
        assert!((reading.pressure_pa - 100_653.27).abs() < 0.5);
        let rh = reading.humidity_pct.unwrap();
        assert!((rh - 55.0).abs() < 0.1, "got {rh}");
    }

    #[test]
    fn test_read_bmp280_has_no_humidity() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x56), ADDRESS_PRIMARY);
        sensor.init(&mut NoDelay).unwrap();

        let reading = sensor.read().unwrap();

        assert_eq!(reading.humidity_pct, None);
        assert!((reading.pressure_pa - 100_653.27).abs() < 0.5);
    }

    #[test]
    fn test_unknown_chip() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x61), ADDRESS_PRIMARY);
        assert_eq!(sensor.init(&mut NoDelay), Err(SensorError::UnknownChip(0x61)));
        assert_eq!(sensor.backend(), None);
    }

    #[test]
    fn test_wrong_address_is_bus_error() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x60), ADDRESS_SECONDARY);
        assert_eq!(sensor.init(&mut NoDelay), Err(SensorError::Bus(BusFault::AddressNack)));
    }

    #[test]
    fn test_read_before_init() {
        let mut sensor = Bme280::new(RegisterBus::datasheet(0x60), ADDRESS_PRIMARY);
        assert_eq!(sensor.read(), Err(SensorError::NotReady));
    }

    #[test]
    fn test_skipped_measurement_not_ready() {
        let mut bus = RegisterBus::datasheet(0x60);
        bus.load(REG_DATA, &[0x80, 0x00, 0x00]);
        let mut sensor = Bme280::new(bus, ADDRESS_PRIMARY);
        sensor.init(&mut NoDelay).unwrap();
        assert_eq!(sensor.read(), Err(SensorError::NotReady));
    }

    #[test]
    fn test_nvm_copy_timeout() {
        let mut bus = RegisterBus::datasheet(0x60);
        bus.load(REG_STATUS, &[STATUS_IM_UPDATE]);
        let mut sensor = Bme280::new(bus, ADDRESS_PRIMARY);
        assert_eq!(sensor.init(&mut NoDelay), Err(SensorError::NotReady));
    }
}
