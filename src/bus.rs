//! The transport capability the driver needs, and its I2C implementation.
//!
//! The driver only ever needs two primitives: read `N` contiguous bytes starting at a register
//! address (`N == 1` for single registers), and write one byte to a register address.
//! Typed access on top of those goes through the [`Readable`]/[`Writable`] register markers.

use crate::error::Bmp180Error;
use crate::register::{Readable, Writable};
use embedded_hal::i2c::SevenBitAddress;

/// Largest burst the driver reads (the calibration block).
pub const MAX_REG_BYTES: usize = 22;

/// Default 7-bit I2C address of the BMP180 (0xEE/0xEF in 8-bit notation).
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x77;

pub trait Bus {
    type Error;

    /// Reads `data.len()` bytes starting at register `reg`.
    fn read_register(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes a single byte to register `reg`.
    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Reads the register described by the marker `R` and decodes it.
    fn read<R: Readable>(&mut self) -> Result<R::Out, Bmp180Error<Self::Error>> {
        let mut buf = [0u8; MAX_REG_BYTES];
        let data = &mut buf[..R::N];
        self.read_register(R::ADDR, data).map_err(Bmp180Error::Bus)?;

        Ok(R::decode(data)?)
    }

    /// Encodes `v` and writes it to the register described by the marker `W`.
    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Bmp180Error<Self::Error>> {
        self.write_register(W::ADDR, W::encode(v)).map_err(Bmp180Error::Bus)
    }
}

impl<T: Bus + ?Sized> Bus for &mut T {
    type Error = T::Error;

    fn read_register(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        T::read_register(self, reg, data)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        T::write_register(self, reg, value)
    }
}

/// [`Bus`] over an `embedded-hal` I2C bus.
///
/// Pass `&mut i2c` instead of the bus itself to keep ownership outside the driver.
pub struct I2c<I2cType> {
    i2c: I2cType,
    address: SevenBitAddress,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Returns the wrapped I2C bus.
    pub fn release(self) -> I2cType {
        self.i2c
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal::i2c::I2c,
{
    type Error = <I2cType as embedded_hal::i2c::ErrorType>::Error;

    fn read_register(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[reg], data)
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[reg, value])
    }
}
