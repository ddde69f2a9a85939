//! The [`Cell`] type: one grid position's glyph and colours.

use crate::color::Color;

/// A glyph code: the index of a tile in the atlas.
///
/// Built from an integer code or from a `char`, in which case the code is
/// the character's ordinal value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph(pub u32);

impl Glyph {
    /// Tile 0, the blank glyph.
    pub const BLANK: Self = Self(0);

    /// The integer code.
    #[inline]
    pub const fn code(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// The glyph as a `char`, if its code is a valid scalar value.
    #[inline]
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl From<char> for Glyph {
    #[inline]
    fn from(c: char) -> Self {
        Self(c as u32)
    }
}

impl From<u32> for Glyph {
    #[inline]
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl From<u8> for Glyph {
    #[inline]
    fn from(code: u8) -> Self {
        Self(code as u32)
    }
}

impl PartialEq<u32> for Glyph {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl PartialEq<char> for Glyph {
    fn eq(&self, other: &char) -> bool {
        self.0 == *other as u32
    }
}

/// A cell record: glyph, foreground and background.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub glyph: Glyph,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    /// Build a cell, substituting the default colours for missing ones.
    #[inline]
    pub fn new(glyph: Glyph, fg: Option<Color>, bg: Option<Color>) -> Self {
        Self {
            glyph,
            fg: fg.unwrap_or(Color::DEFAULT_FG),
            bg: bg.unwrap_or(Color::DEFAULT_BG),
        }
    }

    /// Set the glyph (builder).
    #[inline]
    pub const fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.glyph = glyph;
        self
    }

    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background colour (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            glyph: Glyph::BLANK,
            fg: Color::DEFAULT_FG,
            bg: Color::DEFAULT_BG,
        }
    }
}
