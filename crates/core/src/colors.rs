//! Shared color table.
//!
//! Maps the hex color values stored in consumable attribute data to
//! the human-readable names rendered by the attribute projector. The
//! values match the color picker choices used by the network source of
//! truth this tracker sits next to.

/// (hex value without leading `#`, display name)
pub const COLOR_CHOICES: &[(&str, &str)] = &[
    ("aa1409", "Dark Red"),
    ("f44336", "Red"),
    ("e91e63", "Pink"),
    ("ffe4e1", "Rose"),
    ("ff66ff", "Fuchsia"),
    ("9c27b0", "Purple"),
    ("673ab7", "Dark Purple"),
    ("3f51b5", "Indigo"),
    ("2196f3", "Blue"),
    ("03a9f4", "Light Blue"),
    ("00bcd4", "Cyan"),
    ("009688", "Teal"),
    ("00ffff", "Aqua"),
    ("2f6a31", "Dark Green"),
    ("4caf50", "Green"),
    ("8bc34a", "Light Green"),
    ("cddc39", "Lime"),
    ("ffeb3b", "Yellow"),
    ("ffc107", "Amber"),
    ("ff9800", "Orange"),
    ("ff5722", "Dark Orange"),
    ("795548", "Brown"),
    ("c0c0c0", "Light Grey"),
    ("9e9e9e", "Grey"),
    ("616161", "Dark Grey"),
    ("111111", "Black"),
    ("ffffff", "White"),
];

/// Look up the display name for a hex color value.
///
/// Matching is case-insensitive and tolerates a leading `#`.
pub fn color_name(hex: &str) -> Option<&'static str> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    COLOR_CHOICES
        .iter()
        .find(|(value, _)| value.eq_ignore_ascii_case(hex))
        .map(|(_, name)| *name)
}
