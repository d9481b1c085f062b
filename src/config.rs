use crate::register::ctrl_meas::Oversampling;
use crate::ResetPolicy;

/// Driver settings applied at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    pub(crate) oversampling: Oversampling,
    pub(crate) reset: ResetPolicy,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            oversampling: Oversampling::Standard,
            reset: ResetPolicy::None,
        }
    }
}

impl Configuration {
    /// Oversampling used by [`Bmp180::read_sensor_data()`](crate::Bmp180::read_sensor_data).
    /// The explicit `read_pressure(oss)` calls are not affected.
    pub fn oversampling(mut self, oversampling: Oversampling) -> Self {
        self.oversampling = oversampling;

        self
    }

    pub fn reset(mut self, reset: ResetPolicy) -> Self {
        self.reset = reset;

        self
    }

    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::UltraLowPower => Configuration::default()
                .oversampling(Oversampling::UltraLowPower),
            Preset::Standard => Configuration::default(),
            Preset::HighResolution => Configuration::default()
                .oversampling(Oversampling::HighResolution),
            Preset::UltraHighResolution => Configuration::default()
                .oversampling(Oversampling::UltraHighResolution),
        }
    }
}

/// The operating modes from datasheet table 3.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 1 internal sample, 4.5 ms conversion, 0.06 hPa RMS noise
    UltraLowPower,
    /// 2 internal samples, 7.5 ms conversion, 0.05 hPa RMS noise
    Standard,
    /// 4 internal samples, 13.5 ms conversion, 0.04 hPa RMS noise
    HighResolution,
    /// 8 internal samples, 25.5 ms conversion, 0.03 hPa RMS noise
    UltraHighResolution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration() {
        let config = Configuration::default();
        assert_eq!(Oversampling::Standard, config.oversampling);
        assert_eq!(ResetPolicy::None, config.reset);
    }

    #[test]
    fn presets_select_oversampling() {
        assert_eq!(
            Oversampling::HighResolution,
            Configuration::from_preset(Preset::HighResolution).oversampling
        );
        assert_eq!(
            Oversampling::UltraLowPower,
            Configuration::from_preset(Preset::UltraLowPower).oversampling
        );
    }
}
