//! Blocking driver for the Bosch BMP180 digital pressure and temperature sensor.
//!
//! The driver verifies the chip identity, loads the factory calibration coefficients and turns raw
//! conversions into temperature (°C), pressure (Pa) and altitude (m) using the integer compensation
//! from the datasheet.
//!
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::I2c;
//! # use bmp180_rs::Bmp180Result;
//! use bmp180_rs::Bmp180;
//! use bmp180_rs::bus::DEFAULT_ADDRESS;
//! use bmp180_rs::config::Configuration;
//! use bmp180_rs::register::ctrl_meas::Oversampling;
//! # fn demo<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Bmp180Result<(), I::Error> {
//!
//! let mut device = Bmp180::new_i2c(i2c, DEFAULT_ADDRESS, delay, Configuration::default())?;
//! let sample = device.read_pressure(Oversampling::UltraHighResolution)?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

pub mod bus;
pub mod calibration;
pub mod config;
pub mod error;
pub mod register;
mod bmp180;

#[cfg(test)]
mod testing;

pub use bmp180::*;
pub use calibration::{altitude, SEA_LEVEL_PRESSURE_PA};
pub use error::Bmp180Error;
