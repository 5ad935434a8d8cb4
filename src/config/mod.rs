//! Device configuration qualifiers.
//!
//! A [`ConfigDescription`] describes the device characteristics a resource value applies to:
//! locale, density, screen size, UI mode, platform version and so on. The same resource name
//! can carry one value per configuration; the default configuration (no qualifiers) is the
//! fallback.
//!
//! Configurations are written as dash-separated qualifiers in a fixed order, for example
//! `en-rUS-sw600dp-land-xhdpi-v21`. [`ConfigDescription::parse`] reads that form and
//! [`std::fmt::Display`] writes it back in canonical order.
//!
//! # Examples
//!
//! ```rust
//! use restable::config::ConfigDescription;
//!
//! let config = ConfigDescription::parse("fr-rCA-hdpi")?;
//! assert_eq!(config.density, ConfigDescription::DENSITY_HIGH);
//!
//! // Density qualifiers need API 4, so the version is filled in.
//! assert_eq!(config.to_string(), "fr-rCA-hdpi-v4");
//! # Ok::<(), restable::Error>(())
//! ```

mod builder;
mod parser;

use std::fmt;

pub use builder::ConfigDescriptionBuilder;

use crate::Result;

/// A set of device configuration qualifiers.
///
/// All fields use the raw encodings of the platform's configuration structure; zero always
/// means "unspecified". Fields are declared in comparison order, so the derived ordering sorts
/// configurations the way the resource table stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ConfigDescription {
    /// Mobile country code
    pub mcc: u16,
    /// Mobile network code, [`ConfigDescription::MNC_ZERO`] for an explicit `mnc00`
    pub mnc: u16,
    /// ISO 639 language, lowercase ASCII, zero padded
    pub language: [u8; 3],
    /// ISO 3166 region (two letters) or UN M.49 area (three digits), zero padded
    pub region: [u8; 3],
    /// ISO 15924 script, zero padded
    pub script: [u8; 4],
    /// Screen orientation
    pub orientation: u8,
    /// Touchscreen kind
    pub touchscreen: u8,
    /// Screen density in dpi, or one of the special density values
    pub density: u16,
    /// Keyboard kind
    pub keyboard: u8,
    /// Navigation kind
    pub navigation: u8,
    /// Keyboard and navigation visibility flags
    pub input_flags: u8,
    /// Input pad byte
    pub input_pad0: u8,
    /// Screen width in pixels
    pub screen_width: u16,
    /// Screen height in pixels
    pub screen_height: u16,
    /// Minimum platform version
    pub sdk_version: u16,
    /// Minor platform version
    pub minor_version: u16,
    /// Screen size, long-ness and layout direction
    pub screen_layout: u8,
    /// UI mode type and night mode
    pub ui_mode: u8,
    /// Smallest screen width in dp
    pub smallest_screen_width_dp: u16,
    /// Available width in dp
    pub screen_width_dp: u16,
    /// Available height in dp
    pub screen_height_dp: u16,
    /// Round screen flags
    pub screen_layout2: u8,
    /// Wide color gamut and HDR flags
    pub color_mode: u8,
    /// Screen configuration pad
    pub screen_config_pad2: u16,
    /// Grammatical gender of the user
    pub grammatical_inflection: u8,
}

#[allow(missing_docs)]
impl ConfigDescription {
    pub const MNC_ZERO: u16 = 0xffff;

    pub const ORIENTATION_PORT: u8 = 1;
    pub const ORIENTATION_LAND: u8 = 2;
    pub const ORIENTATION_SQUARE: u8 = 3;

    pub const TOUCHSCREEN_NOTOUCH: u8 = 1;
    pub const TOUCHSCREEN_STYLUS: u8 = 2;
    pub const TOUCHSCREEN_FINGER: u8 = 3;

    pub const DENSITY_DEFAULT: u16 = 0;
    pub const DENSITY_LOW: u16 = 120;
    pub const DENSITY_MEDIUM: u16 = 160;
    pub const DENSITY_TV: u16 = 213;
    pub const DENSITY_HIGH: u16 = 240;
    pub const DENSITY_XHIGH: u16 = 320;
    pub const DENSITY_XXHIGH: u16 = 480;
    pub const DENSITY_XXXHIGH: u16 = 640;
    pub const DENSITY_ANY: u16 = 0xfffe;
    pub const DENSITY_NONE: u16 = 0xffff;

    pub const KEYBOARD_NOKEYS: u8 = 1;
    pub const KEYBOARD_QWERTY: u8 = 2;
    pub const KEYBOARD_12KEY: u8 = 3;

    pub const NAVIGATION_NONAV: u8 = 1;
    pub const NAVIGATION_DPAD: u8 = 2;
    pub const NAVIGATION_TRACKBALL: u8 = 3;
    pub const NAVIGATION_WHEEL: u8 = 4;

    pub const MASK_KEYSHIDDEN: u8 = 0x03;
    pub const KEYSHIDDEN_NO: u8 = 0x01;
    pub const KEYSHIDDEN_YES: u8 = 0x02;
    pub const KEYSHIDDEN_SOFT: u8 = 0x03;

    pub const MASK_NAVHIDDEN: u8 = 0x0c;
    pub const NAVHIDDEN_NO: u8 = 0x04;
    pub const NAVHIDDEN_YES: u8 = 0x08;

    pub const MASK_SCREENSIZE: u8 = 0x0f;
    pub const SCREENSIZE_SMALL: u8 = 0x01;
    pub const SCREENSIZE_NORMAL: u8 = 0x02;
    pub const SCREENSIZE_LARGE: u8 = 0x03;
    pub const SCREENSIZE_XLARGE: u8 = 0x04;

    pub const MASK_SCREENLONG: u8 = 0x30;
    pub const SCREENLONG_NO: u8 = 0x10;
    pub const SCREENLONG_YES: u8 = 0x20;

    pub const MASK_LAYOUTDIR: u8 = 0xc0;
    pub const LAYOUTDIR_LTR: u8 = 0x40;
    pub const LAYOUTDIR_RTL: u8 = 0x80;

    pub const MASK_UI_MODE_TYPE: u8 = 0x0f;
    pub const UI_MODE_TYPE_NORMAL: u8 = 0x01;
    pub const UI_MODE_TYPE_DESK: u8 = 0x02;
    pub const UI_MODE_TYPE_CAR: u8 = 0x03;
    pub const UI_MODE_TYPE_TELEVISION: u8 = 0x04;
    pub const UI_MODE_TYPE_APPLIANCE: u8 = 0x05;
    pub const UI_MODE_TYPE_WATCH: u8 = 0x06;
    pub const UI_MODE_TYPE_VR_HEADSET: u8 = 0x07;

    pub const MASK_UI_MODE_NIGHT: u8 = 0x30;
    pub const UI_MODE_NIGHT_NO: u8 = 0x10;
    pub const UI_MODE_NIGHT_YES: u8 = 0x20;

    pub const MASK_SCREENROUND: u8 = 0x03;
    pub const SCREENROUND_NO: u8 = 0x01;
    pub const SCREENROUND_YES: u8 = 0x02;

    pub const MASK_WIDE_COLOR_GAMUT: u8 = 0x03;
    pub const WIDE_COLOR_GAMUT_NO: u8 = 0x01;
    pub const WIDE_COLOR_GAMUT_YES: u8 = 0x02;

    pub const MASK_HDR: u8 = 0x0c;
    pub const HDR_NO: u8 = 0x04;
    pub const HDR_YES: u8 = 0x08;

    pub const GRAMMATICAL_GENDER_NEUTER: u8 = 1;
    pub const GRAMMATICAL_GENDER_FEMININE: u8 = 2;
    pub const GRAMMATICAL_GENDER_MASCULINE: u8 = 3;

    pub const SDK_DONUT: u16 = 4;
    pub const SDK_FROYO: u16 = 8;
    pub const SDK_HONEYCOMB_MR2: u16 = 13;
    pub const SDK_JELLY_BEAN_MR1: u16 = 17;
    pub const SDK_LOLLIPOP: u16 = 21;
    pub const SDK_MARSHMALLOW: u16 = 23;
    pub const SDK_O: u16 = 26;
    pub const SDK_U: u16 = 34;
}

impl ConfigDescription {
    /// Parses a dash-separated qualifier string. The empty string is the default
    /// configuration.
    ///
    /// Qualifiers must appear in canonical order. After parsing, the platform version is
    /// raised to the lowest version that understands every qualifier present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] for unknown, repeated or out-of-order
    /// qualifiers.
    pub fn parse(s: &str) -> Result<ConfigDescription> {
        let mut config = parser::parse(s)?;
        config.apply_version_for_compatibility();
        Ok(config)
    }

    /// Returns true if no qualifier is set.
    pub fn is_default(&self) -> bool {
        *self == ConfigDescription::default()
    }

    /// Returns a copy with the platform version cleared.
    #[must_use]
    pub fn copy_without_sdk_version(&self) -> ConfigDescription {
        ConfigDescription {
            sdk_version: 0,
            minor_version: 0,
            ..*self
        }
    }

    /// The language as a string, empty when unset.
    pub fn language_str(&self) -> &str {
        packed_str(&self.language)
    }

    /// The region as a string, empty when unset.
    pub fn region_str(&self) -> &str {
        packed_str(&self.region)
    }

    /// The script as a string, empty when unset.
    pub fn script_str(&self) -> &str {
        packed_str(&self.script)
    }

    /// The lowest platform version that understands every qualifier set on this config.
    pub fn min_sdk_for_qualifiers(&self) -> u16 {
        let ui_type = self.ui_mode & Self::MASK_UI_MODE_TYPE;
        if self.grammatical_inflection != 0 {
            Self::SDK_U
        } else if ui_type == Self::UI_MODE_TYPE_VR_HEADSET
            || self.color_mode & Self::MASK_WIDE_COLOR_GAMUT != 0
            || self.color_mode & Self::MASK_HDR != 0
        {
            Self::SDK_O
        } else if self.screen_layout2 & Self::MASK_SCREENROUND != 0 {
            Self::SDK_MARSHMALLOW
        } else if self.density == Self::DENSITY_ANY || self.script[0] != 0 {
            Self::SDK_LOLLIPOP
        } else if self.screen_layout & Self::MASK_LAYOUTDIR != 0 {
            Self::SDK_JELLY_BEAN_MR1
        } else if self.smallest_screen_width_dp != 0
            || self.screen_width_dp != 0
            || self.screen_height_dp != 0
        {
            Self::SDK_HONEYCOMB_MR2
        } else if ui_type != 0 || self.ui_mode & Self::MASK_UI_MODE_NIGHT != 0 {
            Self::SDK_FROYO
        } else if self.screen_layout & (Self::MASK_SCREENSIZE | Self::MASK_SCREENLONG) != 0
            || self.density != Self::DENSITY_DEFAULT
        {
            Self::SDK_DONUT
        } else {
            0
        }
    }

    /// Raises `sdk_version` to [`ConfigDescription::min_sdk_for_qualifiers`] if it is lower.
    pub fn apply_version_for_compatibility(&mut self) {
        let min_sdk = self.min_sdk_for_qualifiers();
        if min_sdk > self.sdk_version {
            self.sdk_version = min_sdk;
        }
    }
}

fn packed_str<const N: usize>(bytes: &[u8; N]) -> &str {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(N);
    std::str::from_utf8(&bytes[..len]).unwrap_or("")
}

fn density_name(density: u16) -> Option<&'static str> {
    Some(match density {
        ConfigDescription::DENSITY_LOW => "ldpi",
        ConfigDescription::DENSITY_MEDIUM => "mdpi",
        ConfigDescription::DENSITY_TV => "tvdpi",
        ConfigDescription::DENSITY_HIGH => "hdpi",
        ConfigDescription::DENSITY_XHIGH => "xhdpi",
        ConfigDescription::DENSITY_XXHIGH => "xxhdpi",
        ConfigDescription::DENSITY_XXXHIGH => "xxxhdpi",
        ConfigDescription::DENSITY_ANY => "anydpi",
        ConfigDescription::DENSITY_NONE => "nodpi",
        _ => return None,
    })
}

impl fmt::Display for ConfigDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let c = self;

        if c.mcc != 0 {
            parts.push(format!("mcc{:03}", c.mcc));
        }
        if c.mnc == Self::MNC_ZERO {
            parts.push("mnc00".to_string());
        } else if c.mnc != 0 {
            parts.push(format!("mnc{}", c.mnc));
        }

        if c.language[0] != 0 {
            if c.script[0] != 0 || c.region[2] != 0 {
                let mut bcp47 = format!("b+{}", c.language_str());
                if c.script[0] != 0 {
                    bcp47.push('+');
                    bcp47.push_str(c.script_str());
                }
                if c.region[0] != 0 {
                    bcp47.push('+');
                    bcp47.push_str(c.region_str());
                }
                parts.push(bcp47);
            } else {
                parts.push(c.language_str().to_string());
                if c.region[0] != 0 {
                    parts.push(format!("r{}", c.region_str()));
                }
            }
        }

        match c.grammatical_inflection {
            Self::GRAMMATICAL_GENDER_FEMININE => parts.push("feminine".into()),
            Self::GRAMMATICAL_GENDER_MASCULINE => parts.push("masculine".into()),
            Self::GRAMMATICAL_GENDER_NEUTER => parts.push("neuter".into()),
            _ => {}
        }

        match c.screen_layout & Self::MASK_LAYOUTDIR {
            Self::LAYOUTDIR_LTR => parts.push("ldltr".into()),
            Self::LAYOUTDIR_RTL => parts.push("ldrtl".into()),
            _ => {}
        }

        if c.smallest_screen_width_dp != 0 {
            parts.push(format!("sw{}dp", c.smallest_screen_width_dp));
        }
        if c.screen_width_dp != 0 {
            parts.push(format!("w{}dp", c.screen_width_dp));
        }
        if c.screen_height_dp != 0 {
            parts.push(format!("h{}dp", c.screen_height_dp));
        }

        match c.screen_layout & Self::MASK_SCREENSIZE {
            Self::SCREENSIZE_SMALL => parts.push("small".into()),
            Self::SCREENSIZE_NORMAL => parts.push("normal".into()),
            Self::SCREENSIZE_LARGE => parts.push("large".into()),
            Self::SCREENSIZE_XLARGE => parts.push("xlarge".into()),
            _ => {}
        }

        match c.screen_layout & Self::MASK_SCREENLONG {
            Self::SCREENLONG_NO => parts.push("notlong".into()),
            Self::SCREENLONG_YES => parts.push("long".into()),
            _ => {}
        }

        match c.screen_layout2 & Self::MASK_SCREENROUND {
            Self::SCREENROUND_NO => parts.push("notround".into()),
            Self::SCREENROUND_YES => parts.push("round".into()),
            _ => {}
        }

        match c.color_mode & Self::MASK_WIDE_COLOR_GAMUT {
            Self::WIDE_COLOR_GAMUT_NO => parts.push("nowidecg".into()),
            Self::WIDE_COLOR_GAMUT_YES => parts.push("widecg".into()),
            _ => {}
        }

        match c.color_mode & Self::MASK_HDR {
            Self::HDR_NO => parts.push("lowdr".into()),
            Self::HDR_YES => parts.push("highdr".into()),
            _ => {}
        }

        match c.orientation {
            Self::ORIENTATION_PORT => parts.push("port".into()),
            Self::ORIENTATION_LAND => parts.push("land".into()),
            Self::ORIENTATION_SQUARE => parts.push("square".into()),
            _ => {}
        }

        match c.ui_mode & Self::MASK_UI_MODE_TYPE {
            Self::UI_MODE_TYPE_DESK => parts.push("desk".into()),
            Self::UI_MODE_TYPE_CAR => parts.push("car".into()),
            Self::UI_MODE_TYPE_TELEVISION => parts.push("television".into()),
            Self::UI_MODE_TYPE_APPLIANCE => parts.push("appliance".into()),
            Self::UI_MODE_TYPE_WATCH => parts.push("watch".into()),
            Self::UI_MODE_TYPE_VR_HEADSET => parts.push("vrheadset".into()),
            _ => {}
        }

        match c.ui_mode & Self::MASK_UI_MODE_NIGHT {
            Self::UI_MODE_NIGHT_NO => parts.push("notnight".into()),
            Self::UI_MODE_NIGHT_YES => parts.push("night".into()),
            _ => {}
        }

        if c.density != Self::DENSITY_DEFAULT {
            match density_name(c.density) {
                Some(name) => parts.push(name.into()),
                None => parts.push(format!("{}dpi", c.density)),
            }
        }

        match c.touchscreen {
            Self::TOUCHSCREEN_NOTOUCH => parts.push("notouch".into()),
            Self::TOUCHSCREEN_STYLUS => parts.push("stylus".into()),
            Self::TOUCHSCREEN_FINGER => parts.push("finger".into()),
            _ => {}
        }

        match c.input_flags & Self::MASK_KEYSHIDDEN {
            Self::KEYSHIDDEN_NO => parts.push("keysexposed".into()),
            Self::KEYSHIDDEN_YES => parts.push("keyshidden".into()),
            Self::KEYSHIDDEN_SOFT => parts.push("keyssoft".into()),
            _ => {}
        }

        match c.keyboard {
            Self::KEYBOARD_NOKEYS => parts.push("nokeys".into()),
            Self::KEYBOARD_QWERTY => parts.push("qwerty".into()),
            Self::KEYBOARD_12KEY => parts.push("12key".into()),
            _ => {}
        }

        match c.input_flags & Self::MASK_NAVHIDDEN {
            Self::NAVHIDDEN_NO => parts.push("navexposed".into()),
            Self::NAVHIDDEN_YES => parts.push("navhidden".into()),
            _ => {}
        }

        match c.navigation {
            Self::NAVIGATION_NONAV => parts.push("nonav".into()),
            Self::NAVIGATION_DPAD => parts.push("dpad".into()),
            Self::NAVIGATION_TRACKBALL => parts.push("trackball".into()),
            Self::NAVIGATION_WHEEL => parts.push("wheel".into()),
            _ => {}
        }

        if c.screen_width != 0 && c.screen_height != 0 {
            parts.push(format!("{}x{}", c.screen_width, c.screen_height));
        }

        if c.sdk_version != 0 {
            parts.push(format!("v{}", c.sdk_version));
        }

        write!(f, "{}", parts.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(input: &str) -> String {
        ConfigDescription::parse(input).unwrap().to_string()
    }

    #[test]
    fn test_default_config() {
        let config = ConfigDescription::parse("").unwrap();
        assert!(config.is_default());
        assert_eq!(config.to_string(), "");
    }

    #[test]
    fn test_locale_forms() {
        let config = ConfigDescription::parse("en-rUS").unwrap();
        assert_eq!(config.language_str(), "en");
        assert_eq!(config.region_str(), "US");
        assert_eq!(config.to_string(), "en-rUS");

        let config = ConfigDescription::parse("b+sr+Latn").unwrap();
        assert_eq!(config.language_str(), "sr");
        assert_eq!(config.script_str(), "Latn");
        assert_eq!(config.to_string(), "b+sr+Latn-v21");

        assert_eq!(round_trip("b+es+419"), "b+es+419");
        assert_eq!(round_trip("fil"), "fil");
    }

    #[test]
    fn test_version_is_applied_for_newer_qualifiers() {
        assert_eq!(round_trip("hdpi"), "hdpi-v4");
        assert_eq!(round_trip("night"), "night-v8");
        assert_eq!(round_trip("sw600dp"), "sw600dp-v13");
        assert_eq!(round_trip("ldrtl"), "ldrtl-v17");
        assert_eq!(round_trip("anydpi"), "anydpi-v21");
        assert_eq!(round_trip("round"), "round-v23");
        assert_eq!(round_trip("widecg"), "widecg-v26");
        assert_eq!(round_trip("feminine"), "feminine-v34");
        assert_eq!(round_trip("land"), "land");
        assert_eq!(round_trip("xhdpi-v21"), "xhdpi-v21");
    }

    #[test]
    fn test_canonical_order_round_trip() {
        let full = "mcc310-mnc4-en-rUS-ldltr-sw600dp-w720dp-h1024dp-large-long-notround-port-car-night-xhdpi-finger-keysexposed-qwerty-navhidden-dpad-1920x1080-v26";
        assert_eq!(round_trip(full), full);
    }

    #[test]
    fn test_car_is_a_ui_mode_not_a_language() {
        let config = ConfigDescription::parse("car").unwrap();
        assert_eq!(
            config.ui_mode & ConfigDescription::MASK_UI_MODE_TYPE,
            ConfigDescription::UI_MODE_TYPE_CAR
        );
        assert_eq!(config.language_str(), "");
    }

    #[test]
    fn test_custom_density() {
        let config = ConfigDescription::parse("420dpi").unwrap();
        assert_eq!(config.density, 420);
        assert_eq!(config.to_string(), "420dpi-v4");
    }

    #[test]
    fn test_rejects_out_of_order_and_unknown() {
        assert!(ConfigDescription::parse("hdpi-en").is_err());
        assert!(ConfigDescription::parse("land-land").is_err());
        assert!(ConfigDescription::parse("v21-hdpi").is_err());
        assert!(ConfigDescription::parse("bogus").is_err());
        assert!(ConfigDescription::parse("en--hdpi").is_err());
        assert!(ConfigDescription::parse("mcc31").is_err());
    }

    #[test]
    fn test_mnc_zero() {
        let config = ConfigDescription::parse("mcc310-mnc00").unwrap();
        assert_eq!(config.mnc, ConfigDescription::MNC_ZERO);
        assert_eq!(config.to_string(), "mcc310-mnc00");
    }

    #[test]
    fn test_copy_without_sdk_version() {
        let config = ConfigDescription::parse("hdpi").unwrap();
        let stripped = config.copy_without_sdk_version();
        assert_eq!(stripped.sdk_version, 0);
        assert_eq!(stripped.density, ConfigDescription::DENSITY_HIGH);
    }

    #[test]
    fn test_default_sorts_first() {
        let mut configs = vec![
            ConfigDescription::parse("fr").unwrap(),
            ConfigDescription::default(),
            ConfigDescription::parse("de").unwrap(),
        ];
        configs.sort();
        assert!(configs[0].is_default());
        assert_eq!(configs[1].language_str(), "de");
    }
}
