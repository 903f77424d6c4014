//! Color values used by the design configuration.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    #[error("palette index {index} out of range (palette has {len} colors)")]
    PaletteIndex { index: usize, len: usize },
}

/// An opaque sRGB color, written as `#rrggbb`.
///
/// Accepts `#rgb` and `#rrggbb` (the `#` is optional) when parsing, and always
/// displays and serializes as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Srgb<u8>);

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    /// End tone of the gradient frame.
    pub const NEAR_WHITE: Color = Color::rgb(0xf8, 0xfa, 0xfc);

    /// Background of the avatar placeholder.
    pub const PLACEHOLDER_FILL: Color = Color::rgb(0xf1, 0xf5, 0xf9);

    /// Stroke of the placeholder silhouette.
    pub const PLACEHOLDER_GLYPH: Color = Color::rgb(0xcb, 0xd5, 0xe1);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    /// Returns the components as an `(r, g, b, a)` tuple with full alpha.
    pub fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue, 255)
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self(srgb)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Srgb::<u8>::from_str(trimmed)
            .map(Self)
            .map_err(|_| ColorError::InvalidHex(trimmed.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

// ============================================================================
// Accent Palette
// ============================================================================

/// The fixed accent swatches offered next to the free-form picker.
pub const ACCENT_PALETTE: [Color; 8] = [
    Color::rgb(0x0f, 0x17, 0x2a), // slate
    Color::rgb(0x25, 0x63, 0xeb), // blue
    Color::rgb(0x16, 0xa3, 0x4a), // green
    Color::rgb(0xdc, 0x26, 0x26), // red
    Color::rgb(0x93, 0x33, 0xea), // purple
    Color::rgb(0xea, 0x58, 0x0c), // orange
    Color::rgb(0xdb, 0x27, 0x77), // pink
    Color::rgb(0x08, 0x91, 0xb2), // cyan
];

/// Looks up a swatch by its position in [`ACCENT_PALETTE`].
pub fn palette_color(index: usize) -> Result<Color, ColorError> {
    ACCENT_PALETTE
        .get(index)
        .copied()
        .ok_or(ColorError::PaletteIndex {
            index,
            len: ACCENT_PALETTE.len(),
        })
}
