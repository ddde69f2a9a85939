//! Surface and atlas configuration.
//!
//! Both structs carry the stock defaults (a 640×480 surface showing an
//! 80×30 grid, drawn from a 128×256 `tileset.png` of 8×16 tiles). With the
//! `serde` feature enabled, missing fields deserialize to those defaults.

use crate::atlas::TileGeometry;

/// Size of the output surface and of the cell grid shown on it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Output width in pixels (default: `640`).
    pub output_width: u32,
    /// Output height in pixels (default: `480`).
    pub output_height: u32,
    /// Grid width in cells (default: `80`).
    pub grid_width: i32,
    /// Grid height in cells (default: `30`).
    pub grid_height: i32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            output_width: 640,
            output_height: 480,
            grid_width: 80,
            grid_height: 30,
        }
    }
}

impl SurfaceConfig {
    /// Set the output size in pixels (builder).
    pub fn with_output_size(mut self, width: u32, height: u32) -> Self {
        self.output_width = width;
        self.output_height = height;
        self
    }

    /// Set the grid size in cells (builder).
    pub fn with_grid_size(mut self, width: i32, height: i32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Pixel size of one cell. Fractional when the output size is not a
    /// multiple of the grid size; tile edges then blur.
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.output_width as f64 / self.grid_width.max(1) as f64,
            self.output_height as f64 / self.grid_height.max(1) as f64,
        )
    }
}

/// Where the tile atlas comes from and how it is partitioned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AtlasConfig {
    /// Image path or URL (default: `"tileset.png"`).
    pub path: String,
    /// Atlas image width in pixels (default: `128`).
    pub width: u32,
    /// Atlas image height in pixels (default: `256`).
    pub height: u32,
    /// Tile width in pixels (default: `8`).
    pub tile_width: u32,
    /// Tile height in pixels (default: `16`).
    pub tile_height: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            path: "tileset.png".into(),
            width: 128,
            height: 256,
            tile_width: 8,
            tile_height: 16,
        }
    }
}

impl AtlasConfig {
    /// Set the image path (builder).
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the tile size (builder).
    pub fn with_tile_size(mut self, width: u32, height: u32) -> Self {
        self.tile_width = width;
        self.tile_height = height;
        self
    }

    /// Set the declared atlas image size (builder).
    pub fn with_atlas_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The partition scheme described by this configuration.
    pub fn geometry(&self) -> TileGeometry {
        TileGeometry::new(self.width, self.height, self.tile_width, self.tile_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = SurfaceConfig::default();
        assert_eq!((s.output_width, s.output_height), (640, 480));
        assert_eq!((s.grid_width, s.grid_height), (80, 30));
        assert_eq!(s.cell_size(), (8.0, 16.0));

        let a = AtlasConfig::default();
        assert_eq!(a.path, "tileset.png");
        assert_eq!(a.geometry(), TileGeometry::new(128, 256, 8, 16));
    }

    #[test]
    fn fractional_cell_size_is_allowed() {
        let s = SurfaceConfig::default().with_output_size(100, 100).with_grid_size(3, 7);
        let (w, h) = s.cell_size();
        assert!((w - 33.333).abs() < 0.01);
        assert!((h - 14.285).abs() < 0.01);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_in_defaults() {
        let s: SurfaceConfig = serde_json::from_str(r#"{"grid_width": 40}"#).unwrap();
        assert_eq!(s, SurfaceConfig::default().with_grid_size(40, 30));

        let a: AtlasConfig =
            serde_json::from_str(r#"{"path": "cp437.png", "tile_width": 9}"#).unwrap();
        assert_eq!(a.path, "cp437.png");
        assert_eq!((a.tile_width, a.tile_height), (9, 16));
    }
}
