//! Errors that can occur when using the BMP180 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with BMP180.
//! It is generic over the underlying bus error type.
//!
//! The driver never retries on its own. What to do after an error is up to the caller.

use core::fmt::{Debug, Display, Formatter};
use crate::register::InvalidRegisterField;

/// This represents all possible errors that can occur when using the BMP180 device.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp180Error<BusError> {
    /// A bus transaction did not complete.
    ///
    /// Retry the whole measurement cycle, or treat the device as unreachable.
    Bus(BusError),

    /// The device answered, but the identity register did not hold 0x55.
    ///
    /// Usually the wrong device or address, or a corrupted bus. Carries the byte that was read.
    UnexpectedIdentity(u8),

    /// The bus failed while reading the calibration block.
    ///
    /// The device is unusable until it has been initialized again.
    CalibrationRead(BusError),

    /// The calibration coefficients cannot be used for compensation.
    ///
    /// Either a word read back as 0x0000/0xFFFF, the coefficients lead to a division by zero, or
    /// pressure compensation produced a negative pressure.
    InvalidCalibration,

    /// Reading from a register returned unexpected data. This should not happen in normal circumstances.
    ///
    /// Could possibly indicate a bug in the driver, or less likely, a faulty chip or interference.
    UnexpectedRegisterData(InvalidRegisterField),
}

impl<BusError: Debug> Display for Bmp180Error<BusError> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Bmp180Error::Bus(e) => write!(f, "bus error: {:?}", e),
            Bmp180Error::UnexpectedIdentity(id) => {
                write!(f, "unexpected chip id 0x{:02x}, expected 0x55", id)
            }
            Bmp180Error::CalibrationRead(e) => {
                write!(f, "failed to read calibration data: {:?}", e)
            }
            Bmp180Error::InvalidCalibration => f.write_str("invalid calibration data"),
            Bmp180Error::UnexpectedRegisterData(field) => write!(
                f,
                "unexpected value 0x{:02x} in register 0x{:02x} at bit {}",
                field.value, field.register, field.bit_offset
            ),
        }
    }
}

impl<BusError> From<InvalidRegisterField> for Bmp180Error<BusError> {
    fn from(field: InvalidRegisterField) -> Self {
        Bmp180Error::UnexpectedRegisterData(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unexpected_identity() {
        let err: Bmp180Error<()> = Bmp180Error::UnexpectedIdentity(0x60);
        assert_eq!("unexpected chip id 0x60, expected 0x55", err.to_string());
    }

    #[test]
    fn display_register_data() {
        let err: Bmp180Error<()> = InvalidRegisterField::new(0xF4, 0x0A, 0).into();
        assert_eq!("unexpected value 0x0a in register 0xf4 at bit 0", err.to_string());
    }
}
