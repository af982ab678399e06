use std::fmt;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Fixed widget palette
// ---------------------------------------------------------------------------

/// The colours a chart widget may be drawn in. Pie slices cycle through
/// the same list.
pub const PALETTE: [&str; 8] = [
    "#10B981", "#F59E0B", "#EF4444", "#3B82F6", "#8B5CF6", "#ec4899", "#6366f1", "#14b8a6",
];

/// A chart widget colour: always one of [`PALETTE`]. Serialized as its hex
/// code; any other string fails to deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WidgetColor(usize);

impl WidgetColor {
    pub const ALL: [WidgetColor; 8] = [
        WidgetColor(0),
        WidgetColor(1),
        WidgetColor(2),
        WidgetColor(3),
        WidgetColor(4),
        WidgetColor(5),
        WidgetColor(6),
        WidgetColor(7),
    ];

    /// Palette lookup, ignoring ASCII case.
    pub fn from_hex(hex: &str) -> Option<WidgetColor> {
        PALETTE
            .iter()
            .position(|p| p.eq_ignore_ascii_case(hex))
            .map(WidgetColor)
    }

    pub fn hex(self) -> &'static str {
        PALETTE[self.0]
    }

    pub fn color32(self) -> Color32 {
        hex_to_color32(self.hex())
    }
}

impl fmt::Display for WidgetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl TryFrom<String> for WidgetColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        WidgetColor::from_hex(&value).ok_or(ConfigError::UnknownColor(value))
    }
}

impl From<WidgetColor> for String {
    fn from(color: WidgetColor) -> Self {
        color.hex().to_string()
    }
}

/// Parse a `#rrggbb` hex code. Anything else draws grey.
pub fn hex_to_color32(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::debug!("Bad colour {hex:?}: {e}");
            Color32::GRAY
        }
    }
}

/// Colour for the `index`-th slice of a pie.
pub fn slice_color(index: usize) -> Color32 {
    hex_to_color32(PALETTE[index % PALETTE.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_entries_all_parse() {
        for hex in PALETTE {
            assert_ne!(hex_to_color32(hex), Color32::GRAY, "{hex}");
        }
        assert_eq!(hex_to_color32("#10B981"), Color32::from_rgb(0x10, 0xB9, 0x81));
    }

    #[test]
    fn slices_wrap_around() {
        assert_eq!(slice_color(0), slice_color(8));
        assert_eq!(slice_color(3), hex_to_color32("#3B82F6"));
    }

    #[test]
    fn widget_colours_cover_the_palette() {
        assert_eq!(WidgetColor::default().hex(), "#10B981");
        let hexes: Vec<&str> = WidgetColor::ALL.iter().map(|c| c.hex()).collect();
        assert_eq!(hexes, PALETTE.to_vec());
        assert_eq!(WidgetColor::from_hex("#EC4899"), Some(WidgetColor::ALL[5]));
    }

    #[test]
    fn off_palette_colour_is_rejected() {
        assert_eq!(
            WidgetColor::try_from("emerald".to_string()),
            Err(ConfigError::UnknownColor("emerald".into()))
        );
        assert_eq!(WidgetColor::from_hex("#000000"), None);
    }

    #[test]
    fn garbage_is_grey() {
        assert_eq!(hex_to_color32("emerald"), Color32::GRAY);
    }
}
