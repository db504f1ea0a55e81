//! Platform-agnostic driver for the ROHM BH1750FVI digital ambient light sensor.
//!
//! Built on the `embedded-hal` 1.0 `I2c` and `DelayNs` traits. Every call to
//! [`BH1750FVI::read_lux`] resets the data register, starts a measurement,
//! blocks for the integration time and converts the raw count to lux using
//! the configured sensitivity and accuracy.
//!
//! ```ignore
//! use bh1750fvi::{BH1750FVI, ADDRESS_LOW};
//!
//! let mut sensor = BH1750FVI::new(i2c, delay, ADDRESS_LOW)?;
//! if !sensor.is_ready() {
//!     sensor.init()?;
//! }
//! sensor.set_resolution(2)?; // one-time, 0.5lx
//! let lux = sensor.read_lux()?;
//! ```
//!
//! Enable the `log` or `defmt` feature to get driver logging.

#![no_std]

mod fmt;

pub mod bh1750;
pub mod calibration;
pub mod mode;

pub use bh1750::{Config, Error, InitStatus, ADDRESS_HIGH, ADDRESS_LOW, BH1750FVI};
pub use calibration::Calibration;
pub use mode::{Instruction, MeasurementMode};
