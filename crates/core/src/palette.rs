//! Palettes of named solid colors.
//!
//! A [`Palette`] is a precomputed, non-empty list of [`NamedColor`]s. Picking
//! a color is a uniform index draw over that list; nothing is enumerated at
//! pick time. Built-in palettes are constructed once per process and shared.

use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use crate::color::{Color, NamedColor};
use crate::error::MondrianError;
use crate::prng::RandomSource;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &["named", "named-transparent", "mondrian", "grayscale"];

/// A non-empty list of named colors, sampled uniformly.
///
/// Cloning is cheap: entries live behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Arc<[NamedColor]>,
}

impl Palette {
    /// Creates a palette from explicit entries.
    ///
    /// Requires at least one entry.
    pub fn new(entries: Vec<NamedColor>) -> Result<Self, MondrianError> {
        if entries.is_empty() {
            return Err(MondrianError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Creates a palette from hex strings; each entry is named by its hex.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, MondrianError> {
        let entries: Result<Vec<NamedColor>, MondrianError> = hexes
            .iter()
            .map(|h| {
                let color = Color::from_hex(h)?;
                Ok(NamedColor::new(Cow::Owned(color.to_hex()), color))
            })
            .collect();
        Self::new(entries?)
    }

    /// Looks up a built-in palette by name (see [`Palette::list_names`]).
    pub fn from_name(name: &str) -> Result<Self, MondrianError> {
        match name {
            "named" => Ok(Self::named()),
            "named-transparent" => Ok(Self::named_with_transparent()),
            "mondrian" => Ok(Self::mondrian()),
            "grayscale" => Ok(Self::grayscale()),
            other => Err(MondrianError::InvalidPalette(format!(
                "unknown palette '{other}', expected one of: {}",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    /// Names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NamedColor] {
        &self.entries
    }

    /// Finds an entry by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&NamedColor> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Draws one entry uniformly at random.
    pub fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &NamedColor {
        &self.entries[rng.next_below(self.entries.len())]
    }

    /// Draws one color uniformly at random.
    pub fn random_color<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Color {
        self.pick(rng).color
    }

    // -- Built-in palettes --

    /// The 140 standard named colors in alphabetical order, without `Transparent`.
    pub fn named() -> Self {
        static NAMED: OnceLock<Palette> = OnceLock::new();
        NAMED
            .get_or_init(|| Self {
                entries: named_entries(false).into(),
            })
            .clone()
    }

    /// Like [`Palette::named`] but with `Transparent` in its alphabetical slot.
    ///
    /// A transparent fill leaves whatever was painted underneath visible.
    pub fn named_with_transparent() -> Self {
        static NAMED_TRANSPARENT: OnceLock<Palette> = OnceLock::new();
        NAMED_TRANSPARENT
            .get_or_init(|| Self {
                entries: named_entries(true).into(),
            })
            .clone()
    }

    /// Primary red, yellow and blue with white and black.
    pub fn mondrian() -> Self {
        Self {
            entries: Arc::new([
                NamedColor::new(Cow::Borrowed("Red"), Color::rgb(0xdd, 0x01, 0x00)),
                NamedColor::new(Cow::Borrowed("Yellow"), Color::rgb(0xfa, 0xc9, 0x01)),
                NamedColor::new(Cow::Borrowed("Blue"), Color::rgb(0x22, 0x50, 0x95)),
                NamedColor::new(Cow::Borrowed("White"), Color::rgb(0xf5, 0xf5, 0xf0)),
                NamedColor::new(Cow::Borrowed("Black"), Color::rgb(0x10, 0x10, 0x10)),
            ]),
        }
    }

    /// Black to white in five steps.
    pub fn grayscale() -> Self {
        Self {
            entries: Arc::new([
                NamedColor::new(Cow::Borrowed("Black"), Color::rgb(0x00, 0x00, 0x00)),
                NamedColor::new(Cow::Borrowed("DimGray"), Color::rgb(0x40, 0x40, 0x40)),
                NamedColor::new(Cow::Borrowed("Gray"), Color::rgb(0x80, 0x80, 0x80)),
                NamedColor::new(Cow::Borrowed("Silver"), Color::rgb(0xc0, 0xc0, 0xc0)),
                NamedColor::new(Cow::Borrowed("White"), Color::rgb(0xff, 0xff, 0xff)),
            ]),
        }
    }
}

/// Builds the named-color list, optionally slotting `Transparent` in by name.
fn named_entries(include_transparent: bool) -> Vec<NamedColor> {
    let mut entries: Vec<NamedColor> = NAMED_COLORS
        .iter()
        .map(|&(name, rgb)| NamedColor::new(Cow::Borrowed(name), Color::from_rgb_u32(rgb)))
        .collect();
    if include_transparent {
        let idx = entries
            .iter()
            .position(|e| e.name.as_ref() > "Transparent")
            .unwrap_or(entries.len());
        entries.insert(
            idx,
            NamedColor::new(Cow::Borrowed("Transparent"), Color::TRANSPARENT),
        );
    }
    entries
}

/// Standard named colors, alphabetical, as `0xRRGGBB`.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("AliceBlue", 0xf0f8ff),
    ("AntiqueWhite", 0xfaebd7),
    ("Aqua", 0x00ffff),
    ("Aquamarine", 0x7fffd4),
    ("Azure", 0xf0ffff),
    ("Beige", 0xf5f5dc),
    ("Bisque", 0xffe4c4),
    ("Black", 0x000000),
    ("BlanchedAlmond", 0xffebcd),
    ("Blue", 0x0000ff),
    ("BlueViolet", 0x8a2be2),
    ("Brown", 0xa52a2a),
    ("BurlyWood", 0xdeb887),
    ("CadetBlue", 0x5f9ea0),
    ("Chartreuse", 0x7fff00),
    ("Chocolate", 0xd2691e),
    ("Coral", 0xff7f50),
    ("CornflowerBlue", 0x6495ed),
    ("Cornsilk", 0xfff8dc),
    ("Crimson", 0xdc143c),
    ("Cyan", 0x00ffff),
    ("DarkBlue", 0x00008b),
    ("DarkCyan", 0x008b8b),
    ("DarkGoldenrod", 0xb8860b),
    ("DarkGray", 0xa9a9a9),
    ("DarkGreen", 0x006400),
    ("DarkKhaki", 0xbdb76b),
    ("DarkMagenta", 0x8b008b),
    ("DarkOliveGreen", 0x556b2f),
    ("DarkOrange", 0xff8c00),
    ("DarkOrchid", 0x9932cc),
    ("DarkRed", 0x8b0000),
    ("DarkSalmon", 0xe9967a),
    ("DarkSeaGreen", 0x8fbc8f),
    ("DarkSlateBlue", 0x483d8b),
    ("DarkSlateGray", 0x2f4f4f),
    ("DarkTurquoise", 0x00ced1),
    ("DarkViolet", 0x9400d3),
    ("DeepPink", 0xff1493),
    ("DeepSkyBlue", 0x00bfff),
    ("DimGray", 0x696969),
    ("DodgerBlue", 0x1e90ff),
    ("Firebrick", 0xb22222),
    ("FloralWhite", 0xfffaf0),
    ("ForestGreen", 0x228b22),
    ("Fuchsia", 0xff00ff),
    ("Gainsboro", 0xdcdcdc),
    ("GhostWhite", 0xf8f8ff),
    ("Gold", 0xffd700),
    ("Goldenrod", 0xdaa520),
    ("Gray", 0x808080),
    ("Green", 0x008000),
    ("GreenYellow", 0xadff2f),
    ("Honeydew", 0xf0fff0),
    ("HotPink", 0xff69b4),
    ("IndianRed", 0xcd5c5c),
    ("Indigo", 0x4b0082),
    ("Ivory", 0xfffff0),
    ("Khaki", 0xf0e68c),
    ("Lavender", 0xe6e6fa),
    ("LavenderBlush", 0xfff0f5),
    ("LawnGreen", 0x7cfc00),
    ("LemonChiffon", 0xfffacd),
    ("LightBlue", 0xadd8e6),
    ("LightCoral", 0xf08080),
    ("LightCyan", 0xe0ffff),
    ("LightGoldenrodYellow", 0xfafad2),
    ("LightGray", 0xd3d3d3),
    ("LightGreen", 0x90ee90),
    ("LightPink", 0xffb6c1),
    ("LightSalmon", 0xffa07a),
    ("LightSeaGreen", 0x20b2aa),
    ("LightSkyBlue", 0x87cefa),
    ("LightSlateGray", 0x778899),
    ("LightSteelBlue", 0xb0c4de),
    ("LightYellow", 0xffffe0),
    ("Lime", 0x00ff00),
    ("LimeGreen", 0x32cd32),
    ("Linen", 0xfaf0e6),
    ("Magenta", 0xff00ff),
    ("Maroon", 0x800000),
    ("MediumAquamarine", 0x66cdaa),
    ("MediumBlue", 0x0000cd),
    ("MediumOrchid", 0xba55d3),
    ("MediumPurple", 0x9370db),
    ("MediumSeaGreen", 0x3cb371),
    ("MediumSlateBlue", 0x7b68ee),
    ("MediumSpringGreen", 0x00fa9a),
    ("MediumTurquoise", 0x48d1cc),
    ("MediumVioletRed", 0xc71585),
    ("MidnightBlue", 0x191970),
    ("MintCream", 0xf5fffa),
    ("MistyRose", 0xffe4e1),
    ("Moccasin", 0xffe4b5),
    ("NavajoWhite", 0xffdead),
    ("Navy", 0x000080),
    ("OldLace", 0xfdf5e6),
    ("Olive", 0x808000),
    ("OliveDrab", 0x6b8e23),
    ("Orange", 0xffa500),
    ("OrangeRed", 0xff4500),
    ("Orchid", 0xda70d6),
    ("PaleGoldenrod", 0xeee8aa),
    ("PaleGreen", 0x98fb98),
    ("PaleTurquoise", 0xafeeee),
    ("PaleVioletRed", 0xdb7093),
    ("PapayaWhip", 0xffefd5),
    ("PeachPuff", 0xffdab9),
    ("Peru", 0xcd853f),
    ("Pink", 0xffc0cb),
    ("Plum", 0xdda0dd),
    ("PowderBlue", 0xb0e0e6),
    ("Purple", 0x800080),
    ("Red", 0xff0000),
    ("RosyBrown", 0xbc8f8f),
    ("RoyalBlue", 0x4169e1),
    ("SaddleBrown", 0x8b4513),
    ("Salmon", 0xfa8072),
    ("SandyBrown", 0xf4a460),
    ("SeaGreen", 0x2e8b57),
    ("SeaShell", 0xfff5ee),
    ("Sienna", 0xa0522d),
    ("Silver", 0xc0c0c0),
    ("SkyBlue", 0x87ceeb),
    ("SlateBlue", 0x6a5acd),
    ("SlateGray", 0x708090),
    ("Snow", 0xfffafa),
    ("SpringGreen", 0x00ff7f),
    ("SteelBlue", 0x4682b4),
    ("Tan", 0xd2b48c),
    ("Teal", 0x008080),
    ("Thistle", 0xd8bfd8),
    ("Tomato", 0xff6347),
    ("Turquoise", 0x40e0d0),
    ("Violet", 0xee82ee),
    ("Wheat", 0xf5deb3),
    ("White", 0xffffff),
    ("WhiteSmoke", 0xf5f5f5),
    ("Yellow", 0xffff00),
    ("YellowGreen", 0x9acd32),
];
