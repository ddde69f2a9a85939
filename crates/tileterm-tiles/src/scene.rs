//! Retained-mode backend: one scene node per cell plus a raster layer,
//! composed into a frame on demand.

use std::collections::BTreeMap;
use std::rc::Rc;

use image::{Rgba, RgbaImage};
use tileterm_core::{Cell, Color, PixelTarget, Range, SurfaceBackend};

use crate::RasterFrame;
use crate::atlas::TileAtlas;
use crate::blit;

/// A tile drawn from the atlas, scaled to `area` and multiplied by `tint`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub tile: u32,
    pub tint: Color,
    pub area: Range,
}

/// The retained display objects for one cell: a background rectangle and,
/// when the glyph maps to a tile, a sprite over it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellNode {
    pub area: Range,
    pub fill: Color,
    pub sprite: Option<Sprite>,
}

/// Keeps a node per painted cell and a transparent graphics layer for
/// raster plots. Nothing is rasterised until [`frame`](RasterFrame::frame)
/// is asked for, and then only when something changed.
///
/// Layer order, bottom to top: cell fills, sprites, graphics.
pub struct SceneBackend {
    atlas: Rc<TileAtlas>,
    nodes: BTreeMap<(i32, i32), CellNode>,
    graphics: RgbaImage,
    composed: RgbaImage,
    dirty: bool,
}

impl SceneBackend {
    pub fn new(atlas: Rc<TileAtlas>, width: u32, height: u32) -> Self {
        Self {
            atlas,
            nodes: BTreeMap::new(),
            graphics: RgbaImage::new(width, height),
            composed: RgbaImage::from_pixel(width, height, blit::opaque(Color::BLACK)),
            dirty: true,
        }
    }

    #[inline]
    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    /// The node for cell `(col, row)`, once it has been painted.
    pub fn node(&self, col: i32, row: i32) -> Option<&CellNode> {
        self.nodes.get(&(row, col))
    }

    /// Number of retained cell nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The raster layer on its own; unplotted pixels are transparent.
    pub fn graphics(&self) -> &RgbaImage {
        &self.graphics
    }

    fn compose(&mut self) {
        let Self {
            atlas,
            nodes,
            graphics,
            composed,
            ..
        } = self;
        for p in composed.pixels_mut() {
            *p = blit::opaque(Color::BLACK);
        }
        for node in nodes.values() {
            blit::fill_rect(composed, node.area, node.fill);
        }
        for sprite in nodes.values().filter_map(|n| n.sprite) {
            // Sprites are only retained for tiles that exist.
            if let Ok(tile) = atlas.tile(sprite.tile) {
                blit::blit_over(composed, &*tile, sprite.area, |px| blit::tint_multiply(px, sprite.tint));
            }
        }
        let full = Range::new(0, 0, graphics.width() as i32, graphics.height() as i32);
        blit::blit_over(composed, &*graphics, full, |px| px);
    }
}

impl PixelTarget for SceneBackend {
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.graphics.width() || y as u32 >= self.graphics.height() {
            return;
        }
        self.graphics.put_pixel(x as u32, y as u32, blit::opaque(color));
        self.dirty = true;
    }
}

impl SurfaceBackend for SceneBackend {
    fn paint_cell(&mut self, col: i32, row: i32, area: Range, cell: Cell) {
        let tile = cell.glyph.code();
        let sprite = if self.atlas.geometry().contains(tile) {
            Some(Sprite {
                tile,
                tint: cell.fg,
                area,
            })
        } else {
            log::warn!(
                "cell ({col}, {row}): tile {tile} is out of range (atlas has {} tiles)",
                self.atlas.tile_count()
            );
            None
        };
        let node = CellNode {
            area,
            fill: cell.bg,
            sprite,
        };
        self.nodes.insert((row, col), node);
        self.dirty = true;
    }

    fn clear_draw(&mut self) {
        for p in self.graphics.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
        self.dirty = true;
    }
}

impl RasterFrame for SceneBackend {
    fn frame(&mut self) -> &RgbaImage {
        if self.dirty {
            self.compose();
            self.dirty = false;
        }
        &self.composed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::tests::test_atlas;
    use tileterm_core::{Glyph, SurfaceConfig, TerminalSurface};

    fn surface() -> TerminalSurface<SceneBackend> {
        // 4x2 cells scaled 2x: each cell is 4x6 output pixels.
        let config = SurfaceConfig::default()
            .with_output_size(16, 12)
            .with_grid_size(4, 2);
        TerminalSurface::new(config, SceneBackend::new(Rc::new(test_atlas()), 16, 12))
    }

    #[test]
    fn every_cell_gets_a_node() {
        let term = surface();
        assert_eq!(term.backend().node_count(), 8);
        let node = term.backend().node(3, 1).unwrap();
        assert_eq!(node.area, Range::new(12, 6, 16, 12));
        assert_eq!(node.fill, Color::BLACK);
        assert_eq!(node.sprite.map(|s| s.tile), Some(0));
    }

    #[test]
    fn repaint_updates_the_node_in_place() {
        let mut term = surface();
        term.put_char(1, 0, 2u32, Some(Color::RED), Some(Color::GREEN));
        let node = *term.backend().node(1, 0).unwrap();
        assert_eq!(node.fill, Color::GREEN);
        assert_eq!(
            node.sprite,
            Some(Sprite {
                tile: 2,
                tint: Color::RED,
                area: Range::new(4, 0, 8, 6),
            })
        );
        assert_eq!(term.backend().node_count(), 8);
    }

    #[test]
    fn frame_layers_fill_sprite_graphics() {
        let mut term = surface();
        term.put_char(1, 0, 0u32, Some(Color::RED), Some(Color::BLUE));
        term.draw_pixel(6, 4, Some(Color::YELLOW));
        let frame = term.backend_mut().frame();
        // Tile 0's pixel covers the top-left 2x2 of the cell at 2x scale.
        assert_eq!(*frame.get_pixel(4, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*frame.get_pixel(5, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(*frame.get_pixel(6, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(*frame.get_pixel(6, 4), Rgba([255, 255, 0, 255]));
    }

    #[test]
    fn clear_draw_erases_plots_only() {
        let mut term = surface();
        assert!(term.backend().supports_draw_layer());
        term.put_char(0, 0, 0u32, Some(Color::GREEN), None);
        term.fill_rect(0, 0, 15, 11, Some(Color::MAGENTA));
        assert_eq!(*term.backend_mut().frame().get_pixel(0, 0), Rgba([255, 0, 255, 255]));
        term.clear_draw();
        assert!(term.backend().graphics().pixels().all(|p| p[3] == 0));
        let frame = term.backend_mut().frame();
        assert_eq!(*frame.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*frame.get_pixel(3, 3), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn out_of_range_tile_keeps_background() {
        let mut term = surface();
        term.put_char(2, 1, Glyph(99), None, Some(Color::CYAN));
        let node = *term.backend().node(2, 1).unwrap();
        assert_eq!(node.sprite, None);
        let frame = term.backend_mut().frame();
        assert_eq!(*frame.get_pixel(8, 6), Rgba([0, 255, 255, 255]));
    }
}
