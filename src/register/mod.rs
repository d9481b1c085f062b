//! Typed markers for the BMP180 register map.
//!
//! Every register (or fixed-size register block) is a zero-sized marker implementing [`Reg`] plus
//! [`Readable`] and/or [`Writable`]. The marker carries the address and transfer length, and knows
//! how to turn raw bytes into a typed value.

pub mod calibration;
pub mod chip_id;
pub mod ctrl_meas;
pub mod out;
pub mod soft_reset;

/// A register held a bit pattern the driver does not know how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidRegisterField {
    pub register: u8,
    pub value: u8,
    pub bit_offset: u8,
}

impl InvalidRegisterField {
    pub fn new(register: u8, value: u8, bit_offset: u8) -> Self {
        Self { register, value, bit_offset }
    }
}

/// Returned by `TryFrom<u8>` conversions when the value has no matching variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnexpectedValue(pub u8);

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Result<Self::Out, InvalidRegisterField>;
}

pub trait Writable: Reg {
    type In;
    fn encode(v: &Self::In) -> u8;
}
