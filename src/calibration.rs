use crate::bus::Bus;
use crate::register::calibration::{Calibration, CalibrationNvm};
use crate::register::ctrl_meas::Oversampling;
use crate::{Bmp180Error, Bmp180Result};
use log::debug;

/// Sea level reference pressure used for the altitude calculation.
pub const SEA_LEVEL_PRESSURE_PA: f32 = 101_325.0;

/// Converts a pressure into an altitude above sea level using the international barometric formula.
pub fn altitude(pressure_pa: u32) -> f32 {
    44_330.0 * (1.0 - libm::powf(pressure_pa as f32 / SEA_LEVEL_PRESSURE_PA, 0.190_294_96))
}

/// Result of the temperature compensation.
///
/// Besides the temperature itself it carries `B5`, which pressure compensation needs. Pressure can
/// only be compensated by handing over one of these, so the ordering is enforced by the types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureSample {
    raw: u16,
    b5: i32,
    tenths: i32,
}

impl TemperatureSample {
    /// The uncompensated temperature (UT) this sample was computed from.
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// The B5 intermediate, consumed by pressure compensation.
    pub fn b5(&self) -> i32 {
        self.b5
    }

    /// Temperature in 0.1 °C.
    pub fn tenths_celsius(&self) -> i32 {
        self.tenths
    }

    /// Temperature in °C.
    pub fn celsius(&self) -> f32 {
        self.tenths as f32 / 10.0
    }
}

/// An uncompensated pressure code along with the oversampling it was measured with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPressure {
    code: u32,
    oversampling: Oversampling,
}

impl RawPressure {
    /// `out` is the 24 bit value of OUT_MSB..OUT_XLSB.
    pub fn from_output(out: u32, oversampling: Oversampling) -> Self {
        Self {
            code: out >> (8 - oversampling.value()),
            oversampling,
        }
    }

    /// The raw pressure (UP), already shifted right by `8 - OSS`.
    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct PressureTerms {
    b4: u32,
    b7: u32,
}

/// Factory calibration coefficients and the compensation math that uses them.
///
/// All arithmetic follows the integer reference in the BMP180 datasheet (section 3.5): divisions
/// truncate towards zero and intermediates are 32 bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationData {
    nvm: CalibrationNvm,
}

impl CalibrationData {
    pub fn new<B: Bus>(bus: &mut B) -> Bmp180Result<Self, B::Error> {
        let nvm = bus.read::<Calibration>().map_err(|e| match e {
            Bmp180Error::Bus(e) => Bmp180Error::CalibrationRead(e),
            other => other,
        })?;

        debug!("bmp180: calibration {:?}", nvm);

        Self::from_nvm(nvm)
    }

    pub fn from_nvm<E>(nvm: CalibrationNvm) -> Bmp180Result<Self, E> {
        if !nvm.is_plausible() {
            return Err(Bmp180Error::InvalidCalibration);
        }

        Ok(Self { nvm })
    }

    /// The coefficients as read from the device.
    pub fn coefficients(&self) -> &CalibrationNvm {
        &self.nvm
    }

    fn temperature_terms(&self, ut: u16) -> Option<(i32, i32)> {
        let c = &self.nvm;
        let x1 = (ut as i32 - c.ac6 as i32).wrapping_mul(c.ac5 as i32) / 32768;
        let x2 = (c.mc as i32 * 2048).checked_div(x1 + c.md as i32)?;

        Some((x1, x2))
    }

    /// Compensates an uncompensated temperature (UT).
    ///
    /// Returns `None` when the coefficients lead to a division by zero.
    pub fn compensate_temperature(&self, ut: u16) -> Option<TemperatureSample> {
        let (x1, x2) = self.temperature_terms(ut)?;
        let b5 = x1 + x2;

        Some(TemperatureSample {
            raw: ut,
            b5,
            tenths: (b5 + 8) / 16,
        })
    }

    fn pressure_terms(&self, b5: i32, raw: RawPressure) -> PressureTerms {
        let c = &self.nvm;
        let oss = raw.oversampling.value() as u32;

        let b6 = b5 - 4000;
        let b6_squared = b6.wrapping_mul(b6) >> 12;
        let x1 = (c.b2 as i32).wrapping_mul(b6_squared) >> 11;
        let x2 = (c.ac2 as i32).wrapping_mul(b6) >> 11;
        let x3 = x1 + x2;
        let b3 = (((c.ac1 as i32 * 4 + x3) << oss) + 2) >> 2;

        let x1 = (c.ac3 as i32).wrapping_mul(b6) >> 13;
        let x2 = (c.b1 as i32).wrapping_mul(b6_squared) >> 16;
        let x3 = (x1 + x2 + 2) >> 2;
        let b4 = (c.ac4 as u32).wrapping_mul((x3 + 32768) as u32) >> 15;
        let b7 = raw.code.wrapping_sub(b3 as u32).wrapping_mul(50000 >> oss);

        PressureTerms { b4, b7 }
    }

    /// Compensates a raw pressure reading. Needs the temperature sample of the same measurement cycle.
    ///
    /// Returns the pressure in Pa, or `None` when the coefficients lead to a division by zero or the
    /// result is negative.
    pub fn compensate_pressure(
        &self,
        temperature: &TemperatureSample,
        raw: RawPressure,
    ) -> Option<u32> {
        let PressureTerms { b4, b7, .. } = self.pressure_terms(temperature.b5, raw);

        // B7 is unsigned. Doubling it first would overflow once bit 31 is set.
        let mut p = if b7 < 0x8000_0000 {
            (b7 << 1).checked_div(b4)? as i32
        } else {
            (b7.checked_div(b4)? << 1) as i32
        };

        let mut x1 = p >> 8;
        x1 = x1.wrapping_mul(x1);
        x1 = x1.wrapping_mul(3038) >> 16;
        let x2 = p.wrapping_mul(-7357) >> 16;
        p += (x1 + x2 + 3791) >> 4;

        u32::try_from(p).ok()
    }
}
