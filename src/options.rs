//! Build-time clock options.

/// How hours are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 1–12 with a PM indicator; a leading zero is blanked.
    Twelve,
    #[default]
    TwentyFour,
}

/// The unit temperatures are converted to and labelled with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// The fixed set of options a firmware image is built with.
///
/// The mode table and the renderer consult this value instead of being compiled differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockOptions {
    pub hour_format: HourFormat,
    pub temperature_unit: TemperatureUnit,
    /// Whether the buttons can set the time and date.
    pub set_date_time: bool,
}

impl ClockOptions {
    /// The options selected by this build's cargo features
    /// (`hour-12`, `fahrenheit`, `set-date-time`).
    pub const FIRMWARE: Self = Self {
        hour_format: if cfg!(feature = "hour-12") {
            HourFormat::Twelve
        } else {
            HourFormat::TwentyFour
        },
        temperature_unit: if cfg!(feature = "fahrenheit") {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        },
        set_date_time: cfg!(feature = "set-date-time"),
    };
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self::FIRMWARE
    }
}
