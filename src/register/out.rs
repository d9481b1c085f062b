//! ### OUT_MSB, OUT_LSB, OUT_XLSB (`0xF6` - `0xF8`, R)
//!
//! Conversion result of the last command written to CTRL_MEAS. The device auto-increments the
//! register address, so the whole result is fetched in one burst starting at 0xF6.
//! These markers return **uncompensated** codes; [`Bmp180::read_temperature()`](crate::Bmp180::read_temperature)
//! and [`Bmp180::read_pressure()`](crate::Bmp180::read_pressure) take care of compensation.
#![doc(alias = "OUT_MSB")]
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for a 2 byte burst read of OUT_MSB and OUT_LSB, holding the raw temperature (UT).
///
/// - **Length:** 2 bytes
/// - **Access:** Read-only
pub struct TemperatureOut;
impl Reg for TemperatureOut { const ADDR: u8 = 0xF6; }

impl Readable for TemperatureOut {
    type Out = u16;
    const N: usize = 2;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }
}

/// Marker struct for a 3 byte burst read of OUT_MSB, OUT_LSB and OUT_XLSB.
///
/// Decodes to the full 24 bit value. Only the upper `16 + OSS` bits carry the raw pressure (UP);
/// the caller shifts right by `8 - OSS`.
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct PressureOut;
impl Reg for PressureOut { const ADDR: u8 = 0xF6; }

impl Readable for PressureOut {
    type Out = u32;
    const N: usize = 3;

    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(u32::from_be_bytes([0, b[0], b[1], b[2]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_out_decode() {
        assert_eq!(0x6CFA, TemperatureOut::decode(&[0x6C, 0xFA]).unwrap());
    }

    #[test]
    fn pressure_out_decode() {
        assert_eq!(0x5D23C0, PressureOut::decode(&[0x5D, 0x23, 0xC0]).unwrap());
    }
}
