//! Qualifier string parsing.
//!
//! Each qualifier kind is a stage. Stages run in canonical order and each one may consume
//! at most one qualifier (the locale stage may consume two for the `en-rUS` form), so a
//! qualifier that appears after a later kind, or twice, finds no stage left to accept it.

use crate::{config::ConfigDescription, Error, Result};

type Stage = fn(&[&str], &mut ConfigDescription) -> usize;

const STAGES: &[Stage] = &[
    parse_mcc,
    parse_mnc,
    parse_locale,
    parse_grammatical_gender,
    parse_layout_direction,
    parse_smallest_width,
    parse_width,
    parse_height,
    parse_screen_size,
    parse_screen_long,
    parse_screen_round,
    parse_wide_color_gamut,
    parse_hdr,
    parse_orientation,
    parse_ui_mode_type,
    parse_ui_mode_night,
    parse_density,
    parse_touchscreen,
    parse_keys_hidden,
    parse_keyboard,
    parse_nav_hidden,
    parse_navigation,
    parse_screen_dimensions,
    parse_version,
];

pub(super) fn parse(s: &str) -> Result<ConfigDescription> {
    let mut config = ConfigDescription::default();
    if s.is_empty() {
        return Ok(config);
    }

    let parts: Vec<&str> = s.split('-').collect();
    let mut index = 0;
    let mut stage = 0;

    while index < parts.len() {
        let mut consumed = 0;
        while stage < STAGES.len() && consumed == 0 {
            consumed = STAGES[stage](&parts[index..], &mut config);
            stage += 1;
        }

        if consumed == 0 {
            return Err(Error::InvalidConfig(format!(
                "{s}: unexpected qualifier '{}'",
                parts[index]
            )));
        }
        index += consumed;
    }

    Ok(config)
}

fn parse_number<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Strips a case-insensitive ASCII prefix.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Parses `<prefix><N><suffix>`.
fn parse_bracketed(part: &str, prefix: &str, suffix: &str) -> Option<u16> {
    let rest = strip_prefix_ci(part, prefix)?;
    if rest.len() < suffix.len() || !rest.is_char_boundary(rest.len() - suffix.len()) {
        return None;
    }
    let (digits, tail) = rest.split_at(rest.len() - suffix.len());
    if !tail.eq_ignore_ascii_case(suffix) {
        return None;
    }
    parse_number(digits)
}

/// Matches the first part against a table of keywords.
fn keyword<T: Copy>(parts: &[&str], table: &[(&str, T)]) -> Option<T> {
    let part = parts.first()?;
    table
        .iter()
        .find(|(name, _)| part.eq_ignore_ascii_case(name))
        .map(|&(_, value)| value)
}

fn parse_mcc(parts: &[&str], config: &mut ConfigDescription) -> usize {
    let Some(digits) = strip_prefix_ci(parts[0], "mcc") else {
        return 0;
    };
    if digits.len() != 3 {
        return 0;
    }
    match parse_number::<u16>(digits) {
        Some(mcc) if mcc != 0 => {
            config.mcc = mcc;
            1
        }
        _ => 0,
    }
}

fn parse_mnc(parts: &[&str], config: &mut ConfigDescription) -> usize {
    let Some(digits) = strip_prefix_ci(parts[0], "mnc") else {
        return 0;
    };
    if digits.is_empty() || digits.len() > 3 {
        return 0;
    }
    match parse_number::<u16>(digits) {
        Some(0) => config.mnc = ConfigDescription::MNC_ZERO,
        Some(mnc) => config.mnc = mnc,
        None => return 0,
    }
    1
}

fn is_alpha(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn set_language(config: &mut ConfigDescription, language: &str) {
    config.language = [0; 3];
    for (slot, b) in config.language.iter_mut().zip(language.bytes()) {
        *slot = b.to_ascii_lowercase();
    }
}

fn set_region(config: &mut ConfigDescription, region: &str) {
    config.region = [0; 3];
    for (slot, b) in config.region.iter_mut().zip(region.bytes()) {
        *slot = b.to_ascii_uppercase();
    }
}

fn set_script(config: &mut ConfigDescription, script: &str) {
    config.script = [0; 4];
    for (i, (slot, b)) in config.script.iter_mut().zip(script.bytes()).enumerate() {
        *slot = if i == 0 {
            b.to_ascii_uppercase()
        } else {
            b.to_ascii_lowercase()
        };
    }
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && is_alpha(s)) || (s.len() == 3 && is_digits(s))
}

fn parse_bcp47(tag: &str, config: &mut ConfigDescription) -> bool {
    let subtags: Vec<&str> = tag.split('+').collect();
    let Some((&language, rest)) = subtags.split_first() else {
        return false;
    };
    if !(2..=3).contains(&language.len()) || !is_alpha(language) {
        return false;
    }

    let (script, region) = match rest {
        [] => (None, None),
        [one] if one.len() == 4 && is_alpha(one) => (Some(*one), None),
        [one] if is_region(one) => (None, Some(*one)),
        [script, region] if script.len() == 4 && is_alpha(script) && is_region(region) => {
            (Some(*script), Some(*region))
        }
        _ => return false,
    };

    set_language(config, language);
    if let Some(script) = script {
        set_script(config, script);
    }
    if let Some(region) = region {
        set_region(config, region);
    }
    true
}

fn parse_locale(parts: &[&str], config: &mut ConfigDescription) -> usize {
    let part = parts[0];

    if let Some(tag) = strip_prefix_ci(part, "b+") {
        return usize::from(parse_bcp47(tag, config));
    }

    // "car" is a UI mode, not a language.
    if !(2..=3).contains(&part.len()) || !is_alpha(part) || part.eq_ignore_ascii_case("car") {
        return 0;
    }
    set_language(config, part);

    if let Some(region) = parts.get(1).and_then(|next| strip_prefix_ci(next, "r")) {
        if is_region(region) {
            set_region(config, region);
            return 2;
        }
    }
    1
}

fn parse_grammatical_gender(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("feminine", ConfigDescription::GRAMMATICAL_GENDER_FEMININE),
            ("masculine", ConfigDescription::GRAMMATICAL_GENDER_MASCULINE),
            ("neuter", ConfigDescription::GRAMMATICAL_GENDER_NEUTER),
        ],
    ) {
        Some(gender) => {
            config.grammatical_inflection = gender;
            1
        }
        None => 0,
    }
}

fn parse_layout_direction(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("ldltr", ConfigDescription::LAYOUTDIR_LTR),
            ("ldrtl", ConfigDescription::LAYOUTDIR_RTL),
        ],
    ) {
        Some(dir) => {
            config.screen_layout = (config.screen_layout & !ConfigDescription::MASK_LAYOUTDIR) | dir;
            1
        }
        None => 0,
    }
}

fn parse_smallest_width(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match parse_bracketed(parts[0], "sw", "dp") {
        Some(dp) => {
            config.smallest_screen_width_dp = dp;
            1
        }
        None => 0,
    }
}

fn parse_width(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match parse_bracketed(parts[0], "w", "dp") {
        Some(dp) => {
            config.screen_width_dp = dp;
            1
        }
        None => 0,
    }
}

fn parse_height(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match parse_bracketed(parts[0], "h", "dp") {
        Some(dp) => {
            config.screen_height_dp = dp;
            1
        }
        None => 0,
    }
}

fn parse_screen_size(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("small", ConfigDescription::SCREENSIZE_SMALL),
            ("normal", ConfigDescription::SCREENSIZE_NORMAL),
            ("large", ConfigDescription::SCREENSIZE_LARGE),
            ("xlarge", ConfigDescription::SCREENSIZE_XLARGE),
        ],
    ) {
        Some(size) => {
            config.screen_layout =
                (config.screen_layout & !ConfigDescription::MASK_SCREENSIZE) | size;
            1
        }
        None => 0,
    }
}

fn parse_screen_long(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("long", ConfigDescription::SCREENLONG_YES),
            ("notlong", ConfigDescription::SCREENLONG_NO),
        ],
    ) {
        Some(long) => {
            config.screen_layout =
                (config.screen_layout & !ConfigDescription::MASK_SCREENLONG) | long;
            1
        }
        None => 0,
    }
}

fn parse_screen_round(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("round", ConfigDescription::SCREENROUND_YES),
            ("notround", ConfigDescription::SCREENROUND_NO),
        ],
    ) {
        Some(round) => {
            config.screen_layout2 =
                (config.screen_layout2 & !ConfigDescription::MASK_SCREENROUND) | round;
            1
        }
        None => 0,
    }
}

fn parse_wide_color_gamut(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("widecg", ConfigDescription::WIDE_COLOR_GAMUT_YES),
            ("nowidecg", ConfigDescription::WIDE_COLOR_GAMUT_NO),
        ],
    ) {
        Some(gamut) => {
            config.color_mode =
                (config.color_mode & !ConfigDescription::MASK_WIDE_COLOR_GAMUT) | gamut;
            1
        }
        None => 0,
    }
}

fn parse_hdr(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("highdr", ConfigDescription::HDR_YES),
            ("lowdr", ConfigDescription::HDR_NO),
        ],
    ) {
        Some(hdr) => {
            config.color_mode = (config.color_mode & !ConfigDescription::MASK_HDR) | hdr;
            1
        }
        None => 0,
    }
}

fn parse_orientation(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("port", ConfigDescription::ORIENTATION_PORT),
            ("land", ConfigDescription::ORIENTATION_LAND),
            ("square", ConfigDescription::ORIENTATION_SQUARE),
        ],
    ) {
        Some(orientation) => {
            config.orientation = orientation;
            1
        }
        None => 0,
    }
}

fn parse_ui_mode_type(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("desk", ConfigDescription::UI_MODE_TYPE_DESK),
            ("car", ConfigDescription::UI_MODE_TYPE_CAR),
            ("television", ConfigDescription::UI_MODE_TYPE_TELEVISION),
            ("appliance", ConfigDescription::UI_MODE_TYPE_APPLIANCE),
            ("watch", ConfigDescription::UI_MODE_TYPE_WATCH),
            ("vrheadset", ConfigDescription::UI_MODE_TYPE_VR_HEADSET),
        ],
    ) {
        Some(mode) => {
            config.ui_mode = (config.ui_mode & !ConfigDescription::MASK_UI_MODE_TYPE) | mode;
            1
        }
        None => 0,
    }
}

fn parse_ui_mode_night(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("night", ConfigDescription::UI_MODE_NIGHT_YES),
            ("notnight", ConfigDescription::UI_MODE_NIGHT_NO),
        ],
    ) {
        Some(night) => {
            config.ui_mode = (config.ui_mode & !ConfigDescription::MASK_UI_MODE_NIGHT) | night;
            1
        }
        None => 0,
    }
}

fn parse_density(parts: &[&str], config: &mut ConfigDescription) -> usize {
    let named = keyword(
        parts,
        &[
            ("ldpi", ConfigDescription::DENSITY_LOW),
            ("mdpi", ConfigDescription::DENSITY_MEDIUM),
            ("tvdpi", ConfigDescription::DENSITY_TV),
            ("hdpi", ConfigDescription::DENSITY_HIGH),
            ("xhdpi", ConfigDescription::DENSITY_XHIGH),
            ("xxhdpi", ConfigDescription::DENSITY_XXHIGH),
            ("xxxhdpi", ConfigDescription::DENSITY_XXXHIGH),
            ("anydpi", ConfigDescription::DENSITY_ANY),
            ("nodpi", ConfigDescription::DENSITY_NONE),
        ],
    );

    let density = named.or_else(|| parse_bracketed(parts[0], "", "dpi").filter(|&d| d != 0));
    match density {
        Some(density) => {
            config.density = density;
            1
        }
        None => 0,
    }
}

fn parse_touchscreen(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("notouch", ConfigDescription::TOUCHSCREEN_NOTOUCH),
            ("stylus", ConfigDescription::TOUCHSCREEN_STYLUS),
            ("finger", ConfigDescription::TOUCHSCREEN_FINGER),
        ],
    ) {
        Some(touch) => {
            config.touchscreen = touch;
            1
        }
        None => 0,
    }
}

fn parse_keys_hidden(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("keysexposed", ConfigDescription::KEYSHIDDEN_NO),
            ("keyshidden", ConfigDescription::KEYSHIDDEN_YES),
            ("keyssoft", ConfigDescription::KEYSHIDDEN_SOFT),
        ],
    ) {
        Some(keys) => {
            config.input_flags =
                (config.input_flags & !ConfigDescription::MASK_KEYSHIDDEN) | keys;
            1
        }
        None => 0,
    }
}

fn parse_keyboard(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("nokeys", ConfigDescription::KEYBOARD_NOKEYS),
            ("qwerty", ConfigDescription::KEYBOARD_QWERTY),
            ("12key", ConfigDescription::KEYBOARD_12KEY),
        ],
    ) {
        Some(keyboard) => {
            config.keyboard = keyboard;
            1
        }
        None => 0,
    }
}

fn parse_nav_hidden(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("navexposed", ConfigDescription::NAVHIDDEN_NO),
            ("navhidden", ConfigDescription::NAVHIDDEN_YES),
        ],
    ) {
        Some(nav) => {
            config.input_flags = (config.input_flags & !ConfigDescription::MASK_NAVHIDDEN) | nav;
            1
        }
        None => 0,
    }
}

fn parse_navigation(parts: &[&str], config: &mut ConfigDescription) -> usize {
    match keyword(
        parts,
        &[
            ("nonav", ConfigDescription::NAVIGATION_NONAV),
            ("dpad", ConfigDescription::NAVIGATION_DPAD),
            ("trackball", ConfigDescription::NAVIGATION_TRACKBALL),
            ("wheel", ConfigDescription::NAVIGATION_WHEEL),
        ],
    ) {
        Some(nav) => {
            config.navigation = nav;
            1
        }
        None => 0,
    }
}

fn parse_screen_dimensions(parts: &[&str], config: &mut ConfigDescription) -> usize {
    let Some((width, height)) = parts[0].split_once(['x', 'X']) else {
        return 0;
    };
    match (parse_number::<u16>(width), parse_number::<u16>(height)) {
        (Some(w), Some(h)) if w != 0 && h != 0 => {
            // The larger dimension always comes first.
            config.screen_width = w.max(h);
            config.screen_height = w.min(h);
            1
        }
        _ => 0,
    }
}

fn parse_version(parts: &[&str], config: &mut ConfigDescription) -> usize {
    let Some(digits) = strip_prefix_ci(parts[0], "v") else {
        return 0;
    };
    match parse_number::<u16>(digits) {
        Some(sdk) => {
            config.sdk_version = sdk;
            config.minor_version = 0;
            1
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_numbers() {
        assert_eq!(parse_bracketed("sw600dp", "sw", "dp"), Some(600));
        assert_eq!(parse_bracketed("SW600DP", "sw", "dp"), Some(600));
        assert_eq!(parse_bracketed("swdp", "sw", "dp"), None);
        assert_eq!(parse_bracketed("hdpi", "h", "dp"), None);
        assert_eq!(parse_bracketed("420dpi", "", "dpi"), Some(420));
    }

    #[test]
    fn test_locale_normalizes_case() {
        let config = parse("EN-rus").unwrap();
        assert_eq!(&config.language, b"en\0");
        assert_eq!(&config.region, b"US\0");

        let config = parse("b+ZH+hANS+cn").unwrap();
        assert_eq!(&config.script, b"Hans");
        assert_eq!(&config.region, b"CN\0");
    }

    #[test]
    fn test_screen_dimensions_put_larger_first() {
        let config = parse("480x800").unwrap();
        assert_eq!(config.screen_width, 800);
        assert_eq!(config.screen_height, 480);
    }

    #[test]
    fn test_parse_does_not_apply_version() {
        let config = parse("hdpi").unwrap();
        assert_eq!(config.sdk_version, 0);
    }

    #[test]
    fn test_bad_bcp47() {
        assert!(parse("b+").is_err());
        assert!(parse("b+e").is_err());
        assert!(parse("b+en+US+extra").is_err());
    }
}
