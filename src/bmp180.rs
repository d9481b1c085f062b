use crate::bus::{Bus, I2c};
use crate::calibration::{altitude, CalibrationData, RawPressure, TemperatureSample};
use crate::config::Configuration;
use crate::error::Bmp180Error;
use crate::register::chip_id::{ChipId, BMP180_CHIP_ID};
use crate::register::ctrl_meas::{ControlCommand, ControlRegister, CtrlMeas, Oversampling};
use crate::register::out::{PressureOut, TemperatureOut};
use crate::register::soft_reset::{ResetCommand, SoftReset};
use crate::register::{Readable, Writable};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;
use log::{debug, trace, warn};

/// Type alias for a Bmp180 chip communicating over I2C
pub type Bmp180I2c<T, D> = Bmp180<I2c<T>, D>;

/// Start-up time after power-on or soft reset (datasheet table 1).
const STARTUP_TIME_MS: u32 = 10;

/// Main Bmp180 driver struct
///
/// Owns the calibration data and the outcome of the last measurements. Every method blocks for the
/// duration of its bus transactions and the conversion time. The driver is not meant to be shared
/// between threads; wrap it in a mutex if you need to.
pub struct Bmp180<B, D> {
    bus: B,
    delay: D,
    calibration_data: CalibrationData,
    oversampling: Oversampling,
    raw_temperature: Option<u16>,
    raw_pressure: Option<RawPressure>,
    temperature: Option<TemperatureSample>,
    pressure: Option<PressureSample>,
}

/// Type alias used to simplify return types throughout the driver
pub type Bmp180Result<T, BusError> = Result<T, Bmp180Error<BusError>>;

impl<T, D> Bmp180I2c<T, D>
where
    T: embedded_hal::i2c::I2c,
    D: DelayNs,
{
    /// Constructs a new Bmp180 driver instance that communicates over I2C
    ///
    /// This function will:
    /// - Perform a soft reset if the configuration asks for [`ResetPolicy::Soft`]
    /// - Verify the chip identity (0x55)
    /// - Load calibration coefficients from EEPROM
    ///
    /// There are no retries. If this fails, the caller decides whether to try again.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::i2c::I2c;
    /// # use bmp180_rs::Bmp180Result;
    ///  use bmp180_rs::Bmp180;
    ///  use bmp180_rs::bus::DEFAULT_ADDRESS;
    ///  use bmp180_rs::config::Configuration;
    /// # fn demo<I: I2c, D: DelayNs>(mut i2c: I, delay: D) -> Bmp180Result<(), I::Error> {
    ///
    ///  let mut device = Bmp180::new_i2c(&mut i2c, DEFAULT_ADDRESS, delay, Configuration::default())?;
    ///  let celsius = device.read_temperature()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new_i2c(
        i2c: T,
        address: SevenBitAddress,
        delay: D,
        config: Configuration,
    ) -> Bmp180Result<Self, <I2c<T> as Bus>::Error> {
        Self::new(I2c::new(i2c, address), delay, config)
    }
}

impl<B, D> Bmp180<B, D>
where
    B: Bus,
    D: DelayNs,
{
    /// Creates a new instance of the Bmp180 driver struct with the given configuration.
    pub(crate) fn new(mut bus: B, mut delay: D, config: Configuration) -> Bmp180Result<Self, B::Error> {
        if config.reset == ResetPolicy::Soft {
            Self::reset(&mut bus, &mut delay)?;
        }

        let id = bus.read::<ChipId>()?;
        if id != BMP180_CHIP_ID {
            warn!("bmp180: unexpected chip id 0x{:02x}", id);
            return Err(Bmp180Error::UnexpectedIdentity(id));
        }

        let calibration_data = CalibrationData::new(&mut bus)?;
        debug!("bmp180: initialized");

        Ok(Bmp180 {
            bus,
            delay,
            calibration_data,
            oversampling: config.oversampling,
            raw_temperature: None,
            raw_pressure: None,
            temperature: None,
            pressure: None,
        })
    }

    fn reset(bus: &mut B, delay: &mut D) -> Bmp180Result<(), B::Error> {
        bus.write::<SoftReset>(&ResetCommand)?;
        delay.delay_ms(STARTUP_TIME_MS);

        Ok(())
    }

    /// Read a register (or fixed-size register block) using a **typed marker** from [`crate::register`].
    ///
    /// # Examples
    /// ```rust,no_run
    /// # use bmp180_rs::{register, Bmp180, Bmp180Result};
    /// # use bmp180_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Bmp180<B, D>) -> Bmp180Result<(), B::Error> {
    /// let control = device.read::<register::ctrl_meas::CtrlMeas>()?;
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Bmp180Result<R::Out, B::Error> {
        self.bus.read::<R>()
    }

    /// Write a register using a **typed marker** from [`crate::register`].
    ///
    /// Writing CTRL_MEAS this way starts a conversion but does not wait for it.
    pub fn write<W: Writable>(&mut self, v: &W::In) -> Bmp180Result<(), B::Error> {
        self.bus.write::<W>(v)
    }

    /// Determines if the BMP180 device is connected by reading the [`ChipId`] (0xD0) register.
    pub fn is_connected(&mut self) -> Bmp180Result<bool, B::Error> {
        let id = self.bus.read::<ChipId>()?;

        Ok(id == BMP180_CHIP_ID)
    }

    /// Triggers a soft reset and waits for the start-up time.
    ///
    /// The calibration coefficients live in EEPROM and stay valid, so no re-initialization is needed.
    pub fn soft_reset(&mut self) -> Bmp180Result<(), B::Error> {
        Self::reset(&mut self.bus, &mut self.delay)
    }

    /// Writes a command to the CTRL_MEAS (0xF4) register. This starts a conversion.
    pub fn set_control(&mut self, command: ControlCommand) -> Bmp180Result<(), B::Error> {
        self.bus.write::<CtrlMeas>(&command)
    }

    /// Reads back the CTRL_MEAS (0xF4) register.
    pub fn control(&mut self) -> Bmp180Result<ControlRegister, B::Error> {
        self.bus.read::<CtrlMeas>()
    }

    /// Runs a temperature conversion and returns the uncompensated temperature (UT).
    pub fn read_raw_temperature(&mut self) -> Bmp180Result<u16, B::Error> {
        let command = ControlCommand::Temperature;
        self.set_control(command)?;
        self.delay.delay_ms(command.conversion_time_ms());

        let ut = self.bus.read::<TemperatureOut>()?;
        trace!("bmp180: UT = {}", ut);
        self.raw_temperature = Some(ut);

        Ok(ut)
    }

    fn measure_raw_pressure(&mut self, oversampling: Oversampling) -> Bmp180Result<RawPressure, B::Error> {
        let command = ControlCommand::Pressure(oversampling);
        self.set_control(command)?;
        self.delay.delay_ms(command.conversion_time_ms());

        let raw = RawPressure::from_output(self.bus.read::<PressureOut>()?, oversampling);
        trace!("bmp180: UP = {} (oss {})", raw.code(), oversampling.value());
        self.raw_pressure = Some(raw);

        Ok(raw)
    }

    /// Runs a pressure conversion with the given oversampling and returns the uncompensated pressure (UP),
    /// already shifted right by `8 - OSS`.
    pub fn read_raw_pressure(&mut self, oversampling: Oversampling) -> Bmp180Result<u32, B::Error> {
        Ok(self.measure_raw_pressure(oversampling)?.code())
    }

    fn measure_temperature(&mut self) -> Bmp180Result<TemperatureSample, B::Error> {
        let ut = self.read_raw_temperature()?;
        let sample = self.calibration_data
            .compensate_temperature(ut)
            .ok_or(Bmp180Error::InvalidCalibration)?;

        debug!("bmp180: temperature {} (B5 = {})", sample.celsius(), sample.b5());
        self.temperature = Some(sample);

        Ok(sample)
    }

    /// Measures the temperature in °C.
    pub fn read_temperature(&mut self) -> Bmp180Result<f32, B::Error> {
        Ok(self.measure_temperature()?.celsius())
    }

    fn measure(&mut self, oversampling: Oversampling) -> Bmp180Result<(TemperatureSample, PressureSample), B::Error> {
        // Pressure compensation needs B5 from a temperature conversion of the same cycle
        let temperature = self.measure_temperature()?;
        let raw = self.measure_raw_pressure(oversampling)?;

        let pressure_pa = self.calibration_data
            .compensate_pressure(&temperature, raw)
            .ok_or(Bmp180Error::InvalidCalibration)?;

        let sample = PressureSample {
            pressure_pa,
            elevation_m: altitude(pressure_pa),
        };
        debug!("bmp180: pressure {} Pa, elevation {} m", sample.pressure_pa, sample.elevation_m);
        self.pressure = Some(sample);

        Ok((temperature, sample))
    }

    /// Measures pressure with the given oversampling.
    ///
    /// A temperature conversion always runs first, so one call takes two conversions.
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use bmp180_rs::{Bmp180, Bmp180Result};
    /// # use bmp180_rs::bus::Bus;
    /// # use embedded_hal::delay::DelayNs;
    /// # fn demo<B: Bus, D: DelayNs>(mut device: Bmp180<B, D>) -> Bmp180Result<(), B::Error> {
    /// use bmp180_rs::register::ctrl_meas::Oversampling;
    ///
    /// let sample = device.read_pressure(Oversampling::HighResolution)?;
    /// println!("{} Pa, {} m", sample.pressure_pa, sample.elevation_m);
    /// # Ok(()) }
    /// ```
    pub fn read_pressure(&mut self, oversampling: Oversampling) -> Bmp180Result<PressureSample, B::Error> {
        Ok(self.measure(oversampling)?.1)
    }

    /// Measures temperature and pressure using the oversampling from the [`Configuration`].
    pub fn read_sensor_data(&mut self) -> Bmp180Result<Measurement, B::Error> {
        let (temperature, pressure) = self.measure(self.oversampling)?;

        Ok(Measurement {
            temperature: temperature.celsius(),
            pressure: pressure.pressure_pa,
            elevation: pressure.elevation_m,
        })
    }

    /// The calibration coefficients loaded at construction.
    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration_data
    }

    /// Oversampling used by [`Bmp180::read_sensor_data()`].
    ///
    /// This is not necessarily the setting of the last pressure conversion; for that, see
    /// [`Bmp180::last_raw_pressure()`].
    pub fn default_oversampling(&self) -> Oversampling {
        self.oversampling
    }

    pub fn set_default_oversampling(&mut self, oversampling: Oversampling) {
        self.oversampling = oversampling;
    }

    /// The last uncompensated temperature, if any was read successfully.
    pub fn last_raw_temperature(&self) -> Option<u16> {
        self.raw_temperature
    }

    /// The last uncompensated pressure together with the oversampling it was measured with.
    pub fn last_raw_pressure(&self) -> Option<RawPressure> {
        self.raw_pressure
    }

    /// The last compensated temperature.
    pub fn last_temperature(&self) -> Option<TemperatureSample> {
        self.temperature
    }

    /// The last compensated pressure and elevation.
    pub fn last_pressure(&self) -> Option<PressureSample> {
        self.pressure
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

/// Compensated pressure and the altitude derived from it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureSample {
    pub pressure_pa: u32,
    pub elevation_m: f32,
}

/// Holds calibrated temperature and pressure samples.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// °C
    pub temperature: f32,
    /// Pa
    pub pressure: u32,
    /// Meters above sea level
    pub elevation: f32,
}

#[cfg(feature = "uom")]
impl PressureSample {
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::pascal>(self.pressure_pa as f32)
    }

    pub fn altitude_uom(&self) -> uom::si::f32::Length {
        uom::si::f32::Length::new::<uom::si::length::meter>(self.elevation_m)
    }
}

#[cfg(feature = "uom")]
impl Measurement {
    pub fn pressure_uom(&self) -> uom::si::f32::Pressure {
        uom::si::f32::Pressure::new::<uom::si::pressure::pascal>(self.pressure as f32)
    }

    pub fn temperature_uom(&self) -> uom::si::f32::ThermodynamicTemperature {
        uom::si::f32::ThermodynamicTemperature::new::<uom::si::thermodynamic_temperature::degree_celsius>(self.temperature)
    }

    pub fn altitude_uom(&self) -> uom::si::f32::Length {
        uom::si::f32::Length::new::<uom::si::length::meter>(self.elevation)
    }
}

/// What to do at startup before checking the chip identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolicy {
    /// Write 0xB6 to SOFT_RESET and wait the 10 ms start-up time.
    Soft,
    /// Don’t reset; leave the chip as-is.
    None,
}
