//! ### Calibration coefficients (`0xAA` - `0xBF`, 22 bytes, R)
//!
//! Eleven 16 bit words programmed into the EEPROM at the factory. Each word is stored MSB first.
//! The order of the words is fixed by the device.
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Marker struct for the calibration block starting at 0xAA
///
/// - **Length:** 22 bytes
/// - **Access:** Read-only
pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = 0xAA; }

/// Calibration coefficients exactly as stored in the EEPROM.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationNvm {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

impl CalibrationNvm {
    /// A word reading back as 0x0000 or 0xFFFF means the EEPROM was not read correctly.
    pub fn is_plausible(&self) -> bool {
        let words = [
            self.ac1 as u16,
            self.ac2 as u16,
            self.ac3 as u16,
            self.ac4,
            self.ac5,
            self.ac6,
            self.b1 as u16,
            self.b2 as u16,
            self.mb as u16,
            self.mc as u16,
            self.md as u16,
        ];

        words.iter().all(|w| *w != 0x0000 && *w != 0xFFFF)
    }
}

impl Readable for Calibration {
    type Out = CalibrationNvm;

    const N: usize = 22;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(CalibrationNvm {
            ac1: i16::from_be_bytes([b[0], b[1]]),
            ac2: i16::from_be_bytes([b[2], b[3]]),
            ac3: i16::from_be_bytes([b[4], b[5]]),
            ac4: u16::from_be_bytes([b[6], b[7]]),
            ac5: u16::from_be_bytes([b[8], b[9]]),
            ac6: u16::from_be_bytes([b[10], b[11]]),
            b1: i16::from_be_bytes([b[12], b[13]]),
            b2: i16::from_be_bytes([b[14], b[15]]),
            mb: i16::from_be_bytes([b[16], b[17]]),
            mc: i16::from_be_bytes([b[18], b[19]]),
            md: i16::from_be_bytes([b[20], b[21]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibration_decode() {
        let nvm = Calibration::decode(&[
            0x01, 0x98, 0xFF, 0xB8, 0xC7, 0xD1, 0x7F, 0xE5, 0x7F, 0xF5, 0x5A, 0x71, 0x18, 0x2E,
            0x00, 0x04, 0x80, 0x00, 0xDD, 0xF9, 0x0B, 0x34,
        ])
        .unwrap();

        assert_eq!(408, nvm.ac1);
        assert_eq!(-72, nvm.ac2);
        assert_eq!(-14383, nvm.ac3);
        assert_eq!(32741, nvm.ac4);
        assert_eq!(32757, nvm.ac5);
        assert_eq!(23153, nvm.ac6);
        assert_eq!(6190, nvm.b1);
        assert_eq!(4, nvm.b2);
        assert_eq!(-32768, nvm.mb);
        assert_eq!(-8711, nvm.mc);
        assert_eq!(2868, nvm.md);
        assert!(nvm.is_plausible());
    }

    #[test]
    fn calibration_decode_is_msb_first() {
        let mut bytes = [0x11u8; 22];
        bytes[6] = 0x80;
        bytes[7] = 0x01;
        let nvm = Calibration::decode(&bytes).unwrap();

        assert_eq!(0x8001, nvm.ac4);
        assert_eq!(0x1111, nvm.ac3);
        assert_eq!(0x1111, nvm.ac5);
    }

    #[test]
    fn calibration_with_erased_word_is_not_plausible() {
        let mut bytes = [0x11u8; 22];
        bytes[18] = 0xFF;
        bytes[19] = 0xFF;
        assert!(!Calibration::decode(&bytes).unwrap().is_plausible());

        bytes[18] = 0x00;
        bytes[19] = 0x00;
        assert!(!Calibration::decode(&bytes).unwrap().is_plausible());
    }
}
