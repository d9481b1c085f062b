//! ### CTRL_MEAS - Measurement control (`0xF4`, 1 byte, R/W)
//!
//! Writing a command starts a single conversion:
//! - bits 0..=4: measurement control (`0x0E` temperature, `0x14` pressure)
//! - bit 5: start of conversion (SCO), stays `1` while the conversion runs
//! - bits 6..=7: pressure oversampling setting (OSS)
//!
//! The result is valid in the OUT registers once the conversion time of the command has elapsed.
#![doc(alias = "CTRL_MEAS")]
use crate::register::{InvalidRegisterField, Readable, Reg, UnexpectedValue, Writable};

const MEASUREMENT_MASK: u8 = 0b0001_1111;
const SCO_BIT: u8 = 0b0010_0000;
const TEMPERATURE_MEASUREMENT: u8 = 0x0E;
const PRESSURE_MEASUREMENT: u8 = 0x14;

/// Marker struct for the CTRL_MEAS (0xF4) register
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

/// Pressure oversampling setting (OSS).
///
/// Higher settings average more internal samples. Resolution improves, and the conversion takes longer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// OSS 0, one internal sample.
    UltraLowPower,
    /// OSS 1, two internal samples.
    #[default]
    Standard,
    /// OSS 2, four internal samples.
    HighResolution,
    /// OSS 3, eight internal samples.
    UltraHighResolution,
}

impl Oversampling {
    /// The OSS value (0-3) as used in the compensation formula.
    pub fn value(self) -> u8 {
        self.into()
    }

    /// Maximum conversion time for a pressure measurement at this setting.
    pub fn conversion_time_ms(self) -> u32 {
        match self {
            Oversampling::UltraLowPower => 5,
            Oversampling::Standard => 8,
            Oversampling::HighResolution => 14,
            Oversampling::UltraHighResolution => 26,
        }
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = UnexpectedValue;
    fn try_from(field: u8) -> Result<Self, Self::Error> {
        match field {
            0 => Ok(Oversampling::UltraLowPower),
            1 => Ok(Oversampling::Standard),
            2 => Ok(Oversampling::HighResolution),
            3 => Ok(Oversampling::UltraHighResolution),
            other => Err(UnexpectedValue(other)),
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(oss: Oversampling) -> u8 {
        match oss {
            Oversampling::UltraLowPower => 0,
            Oversampling::Standard => 1,
            Oversampling::HighResolution => 2,
            Oversampling::UltraHighResolution => 3,
        }
    }
}

/// A conversion the device can be asked to perform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlCommand {
    /// Start a temperature conversion (0x2E).
    Temperature,
    /// Start a pressure conversion (0x34, 0x74, 0xB4 or 0xF4 depending on OSS).
    Pressure(Oversampling),
}

impl ControlCommand {
    /// How long to wait after issuing this command before the OUT registers hold the result.
    pub fn conversion_time_ms(self) -> u32 {
        match self {
            ControlCommand::Temperature => 5,
            ControlCommand::Pressure(oss) => oss.conversion_time_ms(),
        }
    }
}

impl From<ControlCommand> for u8 {
    fn from(command: ControlCommand) -> u8 {
        match command {
            ControlCommand::Temperature => SCO_BIT | TEMPERATURE_MEASUREMENT,
            ControlCommand::Pressure(oss) => (oss.value() << 6) | SCO_BIT | PRESSURE_MEASUREMENT,
        }
    }
}

/// Decoded content of CTRL_MEAS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRegister {
    /// The last command written, or `None` after reset.
    pub command: Option<ControlCommand>,
    /// SCO bit; `true` while a conversion is still running.
    pub conversion_in_progress: bool,
}

impl Readable for CtrlMeas {
    type Out = ControlRegister;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        let command = match b[0] & MEASUREMENT_MASK {
            0 => None,
            TEMPERATURE_MEASUREMENT => Some(ControlCommand::Temperature),
            PRESSURE_MEASUREMENT => {
                // Two bits can only hold 0-3, so this never fails.
                let oss = Oversampling::try_from(b[0] >> 6)
                    .map_err(|e| InvalidRegisterField::new(Self::ADDR, e.0, 6))?;
                Some(ControlCommand::Pressure(oss))
            }
            other => return Err(InvalidRegisterField::new(Self::ADDR, other, 0)),
        };

        Ok(ControlRegister {
            command,
            conversion_in_progress: b[0] & SCO_BIT != 0,
        })
    }
}

impl Writable for CtrlMeas {
    type In = ControlCommand;
    fn encode(v: &Self::In) -> u8 {
        (*v).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_meas_encode() {
        assert_eq!(0x2E, CtrlMeas::encode(&ControlCommand::Temperature));
        assert_eq!(0x34, CtrlMeas::encode(&ControlCommand::Pressure(Oversampling::UltraLowPower)));
        assert_eq!(0x74, CtrlMeas::encode(&ControlCommand::Pressure(Oversampling::Standard)));
        assert_eq!(0xB4, CtrlMeas::encode(&ControlCommand::Pressure(Oversampling::HighResolution)));
        assert_eq!(0xF4, CtrlMeas::encode(&ControlCommand::Pressure(Oversampling::UltraHighResolution)));
    }

    #[test]
    fn ctrl_meas_decode() {
        let reg = CtrlMeas::decode(&[0x2E]).unwrap();
        assert_eq!(Some(ControlCommand::Temperature), reg.command);
        assert!(reg.conversion_in_progress);

        let reg = CtrlMeas::decode(&[0x94]).unwrap();
        assert_eq!(Some(ControlCommand::Pressure(Oversampling::HighResolution)), reg.command);
        assert!(!reg.conversion_in_progress);

        let reg = CtrlMeas::decode(&[0x00]).unwrap();
        assert_eq!(None, reg.command);
        assert!(!reg.conversion_in_progress);
    }

    #[test]
    fn ctrl_meas_decode_unknown_measurement() {
        let err = CtrlMeas::decode(&[0x2A]).unwrap_err();
        assert_eq!(InvalidRegisterField::new(0xF4, 0x0A, 0), err);
    }

    #[test]
    fn oversampling_conversion_times() {
        assert_eq!(5, Oversampling::UltraLowPower.conversion_time_ms());
        assert_eq!(8, Oversampling::Standard.conversion_time_ms());
        assert_eq!(14, Oversampling::HighResolution.conversion_time_ms());
        assert_eq!(26, Oversampling::UltraHighResolution.conversion_time_ms());
        assert_eq!(5, ControlCommand::Temperature.conversion_time_ms());
    }

    #[test]
    fn oversampling_try_from() {
        assert_eq!(Ok(Oversampling::HighResolution), Oversampling::try_from(2));
        assert_eq!(Err(UnexpectedValue(4)), Oversampling::try_from(4));
    }
}
