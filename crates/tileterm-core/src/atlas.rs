//! Tile atlas geometry.
//!
//! An atlas is a single image holding fixed-size tiles packed in row-major
//! order. [`TileGeometry`] maps a tile index to its sub-rectangle of that
//! image; it knows nothing about pixels, so it lives here rather than next
//! to the image decoding.

use crate::config::AtlasConfig;

/// The pixel rectangle of one tile inside the atlas image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Partition scheme of an atlas: image size and tile size, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGeometry {
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileGeometry {
    pub const fn new(atlas_width: u32, atlas_height: u32, tile_width: u32, tile_height: u32) -> Self {
        Self {
            atlas_width,
            atlas_height,
            tile_width,
            tile_height,
        }
    }

    /// Tiles in one row of the atlas (never less than one).
    #[inline]
    pub fn tiles_per_row(&self) -> u32 {
        (self.atlas_width / self.tile_width.max(1)).max(1)
    }

    /// Number of tile rows in the atlas.
    #[inline]
    pub fn tiles_per_column(&self) -> u32 {
        self.atlas_height / self.tile_height.max(1)
    }

    /// Total number of whole tiles the atlas holds.
    #[inline]
    pub fn tile_count(&self) -> u32 {
        if self.tile_width == 0 || self.tile_height == 0 || self.atlas_width < self.tile_width {
            return 0;
        }
        self.tiles_per_row() * self.tiles_per_column()
    }

    /// Whether `index` names a tile that exists in the atlas.
    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index < self.tile_count()
    }

    /// The rectangle of tile `index`.
    ///
    /// This is pure arithmetic and does not check `index` against
    /// [`tile_count`](Self::tile_count); indices past the end produce
    /// rectangles below the atlas image.
    #[inline]
    pub fn tile_rect(&self, index: u32) -> TileRect {
        let per_row = self.tiles_per_row();
        TileRect {
            x: (index % per_row) * self.tile_width,
            y: (index / per_row) * self.tile_height,
            width: self.tile_width,
            height: self.tile_height,
        }
    }
}

impl Default for TileGeometry {
    fn default() -> Self {
        AtlasConfig::default().geometry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_is_16_by_16_tiles() {
        let g = TileGeometry::default();
        assert_eq!(g.tiles_per_row(), 16);
        assert_eq!(g.tiles_per_column(), 16);
        assert_eq!(g.tile_count(), 256);
    }

    #[test]
    fn tile_zero_is_origin_regardless_of_atlas_size() {
        for g in [
            TileGeometry::new(128, 256, 8, 16),
            TileGeometry::new(8, 16, 8, 16),
            TileGeometry::new(4, 4, 8, 16),
            TileGeometry::new(1000, 10, 12, 12),
        ] {
            assert_eq!(
                g.tile_rect(0),
                TileRect { x: 0, y: 0, width: g.tile_width, height: g.tile_height }
            );
        }
    }

    #[test]
    fn tile_rect_is_row_major() {
        let g = TileGeometry::new(128, 256, 8, 16);
        assert_eq!(g.tile_rect(1), TileRect { x: 8, y: 0, width: 8, height: 16 });
        assert_eq!(g.tile_rect(15), TileRect { x: 120, y: 0, width: 8, height: 16 });
        assert_eq!(g.tile_rect(16), TileRect { x: 0, y: 16, width: 8, height: 16 });
        assert_eq!(g.tile_rect('A' as u32), TileRect { x: 8, y: 64, width: 8, height: 16 });
    }

    #[test]
    fn tile_rect_is_unchecked() {
        let g = TileGeometry::new(16, 16, 8, 8);
        assert!(!g.contains(4));
        assert_eq!(g.tile_rect(4), TileRect { x: 0, y: 16, width: 8, height: 8 });
    }

    #[test]
    fn partial_tiles_are_not_counted() {
        let g = TileGeometry::new(20, 20, 8, 8);
        assert_eq!(g.tile_count(), 4);
        assert_eq!(TileGeometry::new(4, 4, 8, 8).tile_count(), 0);
    }
}
