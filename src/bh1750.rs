use core::fmt;

use embedded_hal_1::{delay::DelayNs, i2c::I2c};

use crate::calibration::{Calibration, ACCURACY_DEFAULT, SENSITIVITY_DEFAULT};
use crate::mode::{Instruction, MeasurementMode};

/// Address(7bit) with ADDR pin low.
pub const ADDRESS_LOW: u8 = 0x23;
/// Address(7bit) with ADDR pin high.
pub const ADDRESS_HIGH: u8 = 0x5C;

/// BH1750FVI errors
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I²C bus error
    I2c(E),
    /// Address is neither 0x23 nor 0x5C
    InvalidAddress(u8),
    /// Resolution index outside 1..=6
    InvalidResolution(u8),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C bus error: {:?}", e),
            Error::InvalidAddress(addr) => write!(f, "invalid address 0x{:02x}, expected 0x23 or 0x5c", addr),
            Error::InvalidResolution(res) => write!(f, "invalid resolution {}, expected 1 to 6", res),
        }
    }
}

/// Outcome of the power down and MTreg sequence run at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitStatus<E> {
    Ready,
    /// The bus failed; the sensor can be brought up later with [`BH1750FVI::init`].
    BusUnavailable(E),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub address: u8,
    /// 0.45 to 3.68, typical 1.0
    pub sensitivity: f32,
    /// 0.96 to 1.44, typical 1.2
    pub accuracy: f32,
    pub resolution: MeasurementMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: ADDRESS_LOW,
            sensitivity: SENSITIVITY_DEFAULT,
            accuracy: ACCURACY_DEFAULT,
            resolution: MeasurementMode::OneTimeHighRes,
        }
    }
}

/// BH1750FVI Ambient Light Sensor(ALS)
///
/// - Output: lux(lx)
/// - Range: 1 to 65535 lx at high resolution
/// - Address(7bit): 0x23 or 0x5C
///
/// The bus clock is whatever the HAL configured on `I2C`, up to 400kHz.
pub struct BH1750FVI<I2C, D>
where
    I2C: I2c,
{
    i2c: I2C,
    delay: D,
    address: u8,
    calibration: Calibration,
    mode: Instruction,
    resolution: MeasurementMode,
    status: InitStatus<I2C::Error>,
}

impl<I2C, D> BH1750FVI<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver with datasheet defaults.
    pub fn new(i2c: I2C, delay: D, address: u8) -> Result<Self, Error<I2C::Error>> {
        Self::with_config(i2c, delay, Config { address, ..Config::default() })
    }

    /// Create a driver and bring the sensor to a known state.
    ///
    /// A bus failure while doing so does not fail construction, check
    /// [`init_status`](Self::init_status).
    pub fn with_config(i2c: I2C, delay: D, config: Config) -> Result<Self, Error<I2C::Error>> {
        if config.address != ADDRESS_LOW && config.address != ADDRESS_HIGH {
            return Err(Error::InvalidAddress(config.address));
        }

        let mut calibration = Calibration::default();
        calibration.set_sensitivity(config.sensitivity);
        calibration.set_accuracy(config.accuracy);

        let mut sensor = BH1750FVI {
            i2c,
            delay,
            address: config.address,
            calibration,
            mode: Instruction::PowerDown,
            resolution: config.resolution,
            status: InitStatus::Ready,
        };
        if let Err(Error::I2c(e)) = sensor.init() {
            warn!("BH1750FVI at {} did not respond, continuing uninitialized", sensor.address);
            sensor.status = InitStatus::BusUnavailable(e);
        }
        Ok(sensor)
    }

    /// Power down and program MTreg from the current sensitivity.
    pub fn init(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode(Instruction::PowerDown)?;
        self.write_mtreg()?;
        self.status = InitStatus::Ready;
        Ok(())
    }

    pub fn init_status(&self) -> &InitStatus<I2C::Error> {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, InitStatus::Ready)
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write a single instruction and remember it as the current mode.
    pub fn set_mode(&mut self, mode: Instruction) -> Result<(), Error<I2C::Error>> {
        self.mode = mode;
        self.write(mode.opcode())
    }

    /// Last instruction written with [`set_mode`](Self::set_mode).
    pub fn mode(&self) -> Instruction {
        self.mode
    }

    /// Clear the data register. Reset is not accepted in power down mode, so
    /// power on first.
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_mode(Instruction::PowerOn)?;
        self.set_mode(Instruction::Reset)
    }

    /// Sensitivity scale is 0.45-3.68, typical value is 1.
    pub fn set_sensitivity(&mut self, sensitivity: f32) -> Result<(), Error<I2C::Error>> {
        self.calibration.set_sensitivity(sensitivity);
        debug!(
            "sensitivity {} -> {}, mtreg {}",
            sensitivity,
            self.calibration.sensitivity(),
            self.calibration.mtreg()
        );
        self.write_mtreg()
    }

    pub fn sensitivity(&self) -> f32 {
        self.calibration.sensitivity()
    }

    pub fn mtreg(&self) -> u8 {
        self.calibration.mtreg()
    }

    /// Accuracy scale is 0.96-1.44, typical value is 1.2.
    pub fn set_accuracy(&mut self, accuracy: f32) {
        self.calibration.set_accuracy(accuracy);
        debug!("accuracy {} -> {}", accuracy, self.calibration.accuracy());
    }

    pub fn accuracy(&self) -> f32 {
        self.calibration.accuracy()
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Select the measurement mode by index:
    ///
    /// | res | mode |
    /// |-----|------|
    /// | 1 | One measurement, 1lx |
    /// | 2 | One measurement, 0.5lx |
    /// | 3 | One measurement, 4lx |
    /// | 4 | Continuous measurement, 1lx |
    /// | 5 | Continuous measurement, 0.5lx |
    /// | 6 | Continuous measurement, 4lx |
    pub fn set_resolution(&mut self, res: u8) -> Result<(), Error<I2C::Error>> {
        let mode = MeasurementMode::from_index(res).ok_or(Error::InvalidResolution(res))?;
        self.resolution = mode;
        Ok(())
    }

    pub fn resolution(&self) -> u8 {
        self.resolution.index()
    }

    pub fn set_measurement_mode(&mut self, mode: MeasurementMode) {
        self.resolution = mode;
    }

    pub fn measurement_mode(&self) -> MeasurementMode {
        self.resolution
    }

    /// Wait applied by [`wait_for_result`](Self::wait_for_result) for `mode`.
    pub fn measurement_time_ms(&self, mode: MeasurementMode) -> u32 {
        self.calibration.wait_time_ms(mode)
    }

    /// Block for the integration time of `mode` at the current sensitivity.
    pub fn wait_for_result(&mut self, mode: MeasurementMode) {
        let ms = self.calibration.wait_time_ms(mode);
        self.delay.delay_ms(ms);
    }

    /// Read the data register without starting a measurement.
    #[inline]
    pub fn read_raw(&mut self) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c.read(self.address, &mut buf).map_err(Error::I2c)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Reset, trigger `mode`, wait for it and read the raw count.
    pub fn do_measurement(&mut self, mode: MeasurementMode) -> Result<u16, Error<I2C::Error>> {
        self.reset()?;
        self.write(mode.opcode())?;
        self.wait_for_result(mode);
        let raw = self.read_raw()?;
        debug!("measured raw {} in mode {}", raw, mode.index());
        Ok(raw)
    }

    /// Run a full measurement in the selected mode and convert it to lux.
    pub fn read_lux(&mut self) -> Result<f32, Error<I2C::Error>> {
        let mode = self.resolution;
        let raw = self.do_measurement(mode)?;
        Ok(self.calibration.lux(raw, mode))
    }

    fn write_mtreg(&mut self) -> Result<(), Error<I2C::Error>> {
        // high bits must go first
        for instr in self.calibration.mtreg_instructions() {
            self.write(instr)?;
        }
        Ok(())
    }

    fn write(&mut self, opcode: u8) -> Result<(), Error<I2C::Error>> {
        trace!("write {}", opcode);
        self.i2c.write(self.address, &[opcode]).map_err(Error::I2c)
    }
}
