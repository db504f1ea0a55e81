//! BH1750FVI instruction set.

/// No active state.
pub const POWER_DOWN: u8 = 0x00;
/// Waiting for measurement command.
pub const POWER_ON: u8 = 0x01;
/// Reset data register value. Not accepted in power down mode.
pub const RESET: u8 = 0x07;

/// Start measurement at 1lx resolution. Time typically 120ms.
pub const CONTINUOUS_HIGH_RES_MODE: u8 = 0x10;
/// Start measurement at 0.5lx resolution. Time typically 120ms.
pub const CONTINUOUS_HIGH_RES_MODE_2: u8 = 0x11;
/// Start measurement at 4lx resolution. Time typically 16ms.
pub const CONTINUOUS_LOW_RES_MODE: u8 = 0x13;
/// Start measurement at 1lx resolution. Time typically 120ms.
/// Device is automatically set to power down after measurement.
pub const ONE_TIME_HIGH_RES_MODE: u8 = 0x20;
/// Start measurement at 0.5lx resolution. Time typically 120ms.
/// Device is automatically set to power down after measurement.
pub const ONE_TIME_HIGH_RES_MODE_2: u8 = 0x21;
/// Start measurement at 4lx resolution. Time typically 16ms.
/// Device is automatically set to power down after measurement.
pub const ONE_TIME_LOW_RES_MODE: u8 = 0x23;

/// Change measurement time, high bits: `0b01000_MT[7:5]`
pub const MEASUREMENT_TIME_H: u8 = 0x40;
/// Change measurement time, low bits: `0b011_MT[4:0]`
pub const MEASUREMENT_TIME_L: u8 = 0x60;

const LOW_RES_MASK: u8 = 0x03;

/// Measurement modes, in the order used by the 1-based resolution index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MeasurementMode {
    /// One measurement, 1lx resolution
    OneTimeHighRes = ONE_TIME_HIGH_RES_MODE,
    /// One measurement, 0.5lx resolution
    OneTimeHighRes2 = ONE_TIME_HIGH_RES_MODE_2,
    /// One measurement, 4lx resolution
    OneTimeLowRes = ONE_TIME_LOW_RES_MODE,
    /// Continuous measurement, 1lx resolution
    ContinuousHighRes = CONTINUOUS_HIGH_RES_MODE,
    /// Continuous measurement, 0.5lx resolution
    ContinuousHighRes2 = CONTINUOUS_HIGH_RES_MODE_2,
    /// Continuous measurement, 4lx resolution
    ContinuousLowRes = CONTINUOUS_LOW_RES_MODE,
}

impl Default for MeasurementMode {
    fn default() -> Self {
        MeasurementMode::OneTimeHighRes
    }
}

impl MeasurementMode {
    /// All modes, indexed by `resolution - 1`.
    pub const ALL: [MeasurementMode; 6] = [
        MeasurementMode::OneTimeHighRes,
        MeasurementMode::OneTimeHighRes2,
        MeasurementMode::OneTimeLowRes,
        MeasurementMode::ContinuousHighRes,
        MeasurementMode::ContinuousHighRes2,
        MeasurementMode::ContinuousLowRes,
    ];

    /// Look up a mode by its 1-based resolution index (1..=6).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1..=6 => Some(Self::ALL[index as usize - 1]),
            _ => None,
        }
    }

    /// 1-based resolution index of this mode.
    pub fn index(self) -> u8 {
        match self {
            MeasurementMode::OneTimeHighRes => 1,
            MeasurementMode::OneTimeHighRes2 => 2,
            MeasurementMode::OneTimeLowRes => 3,
            MeasurementMode::ContinuousHighRes => 4,
            MeasurementMode::ContinuousHighRes2 => 5,
            MeasurementMode::ContinuousLowRes => 6,
        }
    }

    #[inline]
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Both 4lx opcodes have the two lowest bits set. This only holds for the
    /// six opcodes above.
    #[inline]
    pub fn is_low_resolution(self) -> bool {
        self.opcode() & LOW_RES_MASK == LOW_RES_MASK
    }

    /// 0.5lx modes count twice per lux.
    #[inline]
    pub fn is_half_lux(self) -> bool {
        matches!(
            self,
            MeasurementMode::OneTimeHighRes2 | MeasurementMode::ContinuousHighRes2
        )
    }

    /// Typical measurement time at the default MTreg, from the datasheet.
    pub fn base_time_ms(self) -> u32 {
        if self.is_low_resolution() {
            16
        } else {
            120
        }
    }
}

/// A single-byte instruction written to the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    PowerDown,
    PowerOn,
    Reset,
    Measure(MeasurementMode),
}

impl Instruction {
    pub fn opcode(self) -> u8 {
        match self {
            Instruction::PowerDown => POWER_DOWN,
            Instruction::PowerOn => POWER_ON,
            Instruction::Reset => RESET,
            Instruction::Measure(mode) => mode.opcode(),
        }
    }
}

impl From<MeasurementMode> for Instruction {
    fn from(mode: MeasurementMode) -> Self {
        Instruction::Measure(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_index_round_trips_through_table() {
        for (i, mode) in MeasurementMode::ALL.iter().enumerate() {
            let index = i as u8 + 1;
            assert_eq!(MeasurementMode::from_index(index), Some(*mode));
            assert_eq!(mode.index(), index);
        }
        assert_eq!(MeasurementMode::from_index(0), None);
        assert_eq!(MeasurementMode::from_index(7), None);
    }

    #[test]
    fn opcodes_match_datasheet() {
        let opcodes: [u8; 6] = [0x20, 0x21, 0x23, 0x10, 0x11, 0x13];
        for (mode, opcode) in MeasurementMode::ALL.iter().zip(opcodes.iter()) {
            assert_eq!(mode.opcode(), *opcode);
        }
        assert_eq!(Instruction::PowerDown.opcode(), 0x00);
        assert_eq!(Instruction::PowerOn.opcode(), 0x01);
        assert_eq!(Instruction::Reset.opcode(), 0x07);
    }

    #[test]
    fn only_4lx_modes_are_low_resolution() {
        let low: [bool; 6] = [false, false, true, false, false, true];
        for (mode, expected) in MeasurementMode::ALL.iter().zip(low.iter()) {
            assert_eq!(mode.is_low_resolution(), *expected, "{:?}", mode);
        }
        assert_eq!(MeasurementMode::OneTimeLowRes.base_time_ms(), 16);
        assert_eq!(MeasurementMode::ContinuousHighRes2.base_time_ms(), 120);
    }

    #[test]
    fn half_lux_modes_are_index_2_and_5() {
        for mode in MeasurementMode::ALL.iter() {
            assert_eq!(mode.is_half_lux(), matches!(mode.index(), 2 | 5));
        }
    }
}
