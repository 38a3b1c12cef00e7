//! Solid colors used to fill regions and circles.
//!
//! Colors are 8-bit RGBA, matching what ends up in the PNG snapshot. They
//! serialize as hex strings: `"#rrggbb"` when opaque, `"#rrggbbaa"` otherwise.

use crate::error::MondrianError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Fully transparent white, the value of the classic `Transparent` named color.
    pub const TRANSPARENT: Color = Color {
        r: 0xff,
        g: 0xff,
        b: 0xff,
        a: 0x00,
    };

    /// Opaque color from its three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Returns true if the alpha channel is 255.
    pub fn is_opaque(self) -> bool {
        self.a == 0xff
    }

    /// Parses `"#rrggbb"` or `"#rrggbbaa"` (the `#` is optional, case insensitive).
    ///
    /// Returns `MondrianError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Color, MondrianError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(MondrianError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| MondrianError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            0xff
        };
        Ok(Color { r, g, b, a })
    }

    /// Hex string, omitting the alpha pair for opaque colors.
    pub fn to_hex(self) -> String {
        let Color { r, g, b, a } = self;
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Composites `self` over an opaque destination pixel and returns the result.
    ///
    /// Uses straight-alpha source-over with integer rounding, so an opaque
    /// source replaces the destination exactly and a transparent one leaves it
    /// untouched.
    pub fn over(self, dst: [u8; 3]) -> [u8; 3] {
        match self.a {
            0xff => [self.r, self.g, self.b],
            0x00 => dst,
            a => {
                let a = u32::from(a);
                let mix = |s: u8, d: u8| {
                    ((u32::from(s) * a + u32::from(d) * (255 - a) + 127) / 255) as u8
                };
                [mix(self.r, dst[0]), mix(self.g, dst[1]), mix(self.b, dst[2])]
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A color together with its well-known name, as listed in a [`Palette`](crate::Palette).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColor {
    pub name: Cow<'static, str>,
    pub color: Color,
}

impl NamedColor {
    pub fn new(name: Cow<'static, str>, color: Color) -> Self {
        Self { name, color }
    }
}
