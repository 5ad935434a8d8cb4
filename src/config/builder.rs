//! Field-by-field construction of a [`ConfigDescription`].

use crate::config::ConfigDescription;

/// Sets raw configuration fields directly, bypassing qualifier parsing.
///
/// No version compatibility is applied, so the built value holds exactly the fields that
/// were set.
///
/// # Examples
///
/// ```rust
/// use restable::config::{ConfigDescription, ConfigDescriptionBuilder};
///
/// let config = ConfigDescriptionBuilder::new()
///     .set_density(ConfigDescription::DENSITY_XHIGH)
///     .set_orientation(ConfigDescription::ORIENTATION_LAND)
///     .build();
/// assert_eq!(config.to_string(), "land-xhdpi");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigDescriptionBuilder {
    config: ConfigDescription,
}

macro_rules! raw_setters {
    ($($(#[$doc:meta])* $setter:ident => $field:ident : $ty:ty;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $setter(mut self, value: $ty) -> Self {
                self.config.$field = value;
                self
            }
        )*
    };
}

impl ConfigDescriptionBuilder {
    /// Creates a builder for the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    raw_setters! {
        /// Sets the mobile country code.
        set_mcc => mcc: u16;
        /// Sets the mobile network code.
        set_mnc => mnc: u16;
        /// Sets the screen orientation.
        set_orientation => orientation: u8;
        /// Sets the touchscreen kind.
        set_touchscreen => touchscreen: u8;
        /// Sets the density.
        set_density => density: u16;
        /// Sets the keyboard kind.
        set_keyboard => keyboard: u8;
        /// Sets the navigation kind.
        set_navigation => navigation: u8;
        /// Sets the keyboard and navigation visibility flags.
        set_input_flags => input_flags: u8;
        /// Sets the input pad byte.
        set_input_pad0 => input_pad0: u8;
        /// Sets the screen width in pixels.
        set_screen_width => screen_width: u16;
        /// Sets the screen height in pixels.
        set_screen_height => screen_height: u16;
        /// Sets the platform version.
        set_sdk_version => sdk_version: u16;
        /// Sets the minor platform version.
        set_minor_version => minor_version: u16;
        /// Sets the screen layout byte.
        set_screen_layout => screen_layout: u8;
        /// Sets the UI mode byte.
        set_ui_mode => ui_mode: u8;
        /// Sets the smallest screen width in dp.
        set_smallest_screen_width_dp => smallest_screen_width_dp: u16;
        /// Sets the available width in dp.
        set_screen_width_dp => screen_width_dp: u16;
        /// Sets the available height in dp.
        set_screen_height_dp => screen_height_dp: u16;
        /// Sets the round screen byte.
        set_screen_layout2 => screen_layout2: u8;
        /// Sets the color mode byte.
        set_color_mode => color_mode: u8;
        /// Sets the screen configuration pad.
        set_screen_config_pad2 => screen_config_pad2: u16;
        /// Sets the grammatical gender.
        set_grammatical_inflection => grammatical_inflection: u8;
    }

    /// Sets the language from its packed two-byte form, first letter in the low byte.
    #[must_use]
    pub fn set_language(mut self, language: u16) -> Self {
        let [lo, hi] = language.to_le_bytes();
        self.config.language = [lo, hi, 0];
        self
    }

    /// Sets the region from its packed two-byte form, first letter in the low byte.
    #[must_use]
    pub fn set_country(mut self, country: u16) -> Self {
        let [lo, hi] = country.to_le_bytes();
        self.config.region = [lo, hi, 0];
        self
    }

    /// Returns the configuration.
    pub fn build(self) -> ConfigDescription {
        self.config
    }
}
