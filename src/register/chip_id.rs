//! ### ID - Chip identification number (`0xD0`, 1 byte, R)
//!
//! Contains the chip identification code, which is always 0x55 for BMP180.
//!
//! ### Examples
//! ```rust,no_run
//! # use bmp180_rs::{Bmp180, Bmp180Result};
//! # use bmp180_rs::bus::Bus;
//! # use embedded_hal::delay::DelayNs;
//! # fn demo<B: Bus, D: DelayNs>(mut device: Bmp180<B, D>)
//! #     -> Bmp180Result<(), B::Error> {
//! use bmp180_rs::register::chip_id::ChipId;
//!
//! let id = device.read::<ChipId>()?;
//! assert_eq!(id, 0x55);
//! # Ok(()) }
//! ```
#![doc(alias = "ID")]
use crate::register::{InvalidRegisterField, Readable, Reg};

/// Identity byte every BMP180 answers with.
pub const BMP180_CHIP_ID: u8 = 0x55;

/// Marker struct for the ID (0xD0) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
pub struct ChipId;
impl Reg for ChipId { const ADDR: u8 = 0xD0; }

impl Readable for ChipId {
    type Out = u8;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField> {
        Ok(b[0])
    }
}
