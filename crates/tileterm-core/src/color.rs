//! The [`Color`] type.

use std::fmt;

/// An RGB colour packed into a `u32` (0x00RRGGBB).
///
/// Every value is a real colour: `Color::BLACK` is `0`, and "no colour
/// given" is expressed with `Option<Color>` rather than a sentinel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0x000000);
    pub const WHITE: Self = Self(0xFFFFFF);
    pub const RED: Self = Self(0xFF0000);
    pub const GREEN: Self = Self(0x00FF00);
    pub const BLUE: Self = Self(0x0000FF);
    pub const YELLOW: Self = Self(0xFFFF00);
    pub const CYAN: Self = Self(0x00FFFF);
    pub const MAGENTA: Self = Self(0xFF00FF);

    /// Default foreground colour of a cell.
    pub const DEFAULT_FG: Self = Self::WHITE;
    /// Default background colour of a cell.
    pub const DEFAULT_BG: Self = Self::BLACK;

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// `[r, g, b, a]` with the given alpha.
    #[inline]
    pub const fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r(), self.g(), self.b(), alpha]
    }

    /// Build from the RGB channels of an `[r, g, b, a]` quad; alpha is dropped.
    #[inline]
    pub const fn from_rgba(px: [u8; 4]) -> Self {
        Self::from_rgb(px[0], px[1], px[2])
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(v: u32) -> Self {
        Self(v & 0x00FF_FFFF)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(c, Color(0xABCDEF));
        assert_eq!((c.r(), c.g(), c.b()), (0xAB, 0xCD, 0xEF));
        assert_eq!(c.to_rgba(0x80), [0xAB, 0xCD, 0xEF, 0x80]);
    }

    #[test]
    fn from_u32_masks_high_byte() {
        assert_eq!(Color::from(0xFF12_3456), Color(0x123456));
    }

    #[test]
    fn black_is_a_real_colour() {
        assert_ne!(Some(Color::BLACK), None);
        assert_eq!(Some(Color::BLACK).unwrap_or(Color::WHITE), Color::BLACK);
    }

    #[test]
    fn display_is_css_hex() {
        assert_eq!(Color::from_rgb(255, 0, 16).to_string(), "#ff0010");
    }
}
