//! Sensitivity, measurement time register (MTreg) and accuracy.
//!
//! Sensitivity scales the MTreg around its default of 69, which in turn
//! stretches the integration time. Accuracy is the datasheet's "measurement
//! accuracy" divisor (typ. 1.2) and never reaches the device.

use num_traits::Float;

use crate::mode::{MeasurementMode, MEASUREMENT_TIME_H, MEASUREMENT_TIME_L};

pub const MTREG_DEFAULT: u8 = 69;
pub const MTREG_MIN: u8 = 31;
pub const MTREG_MAX: u8 = 254;

pub const SENSITIVITY_MIN: f32 = 0.45;
pub const SENSITIVITY_MAX: f32 = 3.68;
pub const SENSITIVITY_DEFAULT: f32 = 1.00;

pub const ACCURACY_MIN: f32 = 0.96;
pub const ACCURACY_MAX: f32 = 1.44;
pub const ACCURACY_DEFAULT: f32 = 1.2;

/// Calibration state of one sensor.
///
/// `sensitivity` and `mtreg` are only ever updated together.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    sensitivity: f32,
    mtreg: u8,
    accuracy: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            sensitivity: SENSITIVITY_DEFAULT,
            mtreg: MTREG_DEFAULT,
            accuracy: ACCURACY_DEFAULT,
        }
    }
}

impl Calibration {
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn mtreg(&self) -> u8 {
        self.mtreg
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    /// Derive MTreg from a sensitivity factor.
    ///
    /// Out of range factors snap to the sensitivity matching the MTreg limit,
    /// so `sensitivity` always describes what the device is programmed with.
    pub fn set_sensitivity(&mut self, factor: f32) {
        // NaN falls into the first arm
        let (mtreg, sensitivity) = if !(factor >= SENSITIVITY_MIN) {
            (MTREG_MIN, SENSITIVITY_MIN)
        } else if factor > SENSITIVITY_MAX {
            (MTREG_MAX, SENSITIVITY_MAX)
        } else {
            let value = Float::round(factor * MTREG_DEFAULT as f32);
            (value.max(MTREG_MIN as f32).min(MTREG_MAX as f32) as u8, factor)
        };

        self.mtreg = mtreg;
        self.sensitivity = sensitivity;
    }

    /// Values outside the datasheet range snap to the nearest limit.
    pub fn set_accuracy(&mut self, accuracy: f32) {
        self.accuracy = if !(accuracy >= ACCURACY_MIN) {
            ACCURACY_MIN
        } else if accuracy > ACCURACY_MAX {
            ACCURACY_MAX
        } else {
            accuracy
        };
    }

    /// The two instructions that program MTreg, high bits first.
    pub fn mtreg_instructions(&self) -> [u8; 2] {
        [
            (self.mtreg >> 5) | MEASUREMENT_TIME_H,
            (self.mtreg & 0x1F) | MEASUREMENT_TIME_L,
        ]
    }

    /// Time to wait for a result in `mode`, in ms.
    ///
    /// The product is taken to the nearest us before truncating, so that
    /// e.g. 120 * 1.05 waits 126ms and not 125.
    pub fn wait_time_ms(&self, mode: MeasurementMode) -> u32 {
        let us = Float::round(mode.base_time_ms() as f32 * 1000.0 * self.sensitivity) as u32;
        us / 1000
    }

    /// Convert a raw count taken in `mode` to lux.
    pub fn lux(&self, raw: u16, mode: MeasurementMode) -> f32 {
        let lux = raw as f32 / (self.accuracy * self.sensitivity);
        if mode.is_half_lux() {
            lux * 0.5
        } else {
            lux
        }
    }
}
