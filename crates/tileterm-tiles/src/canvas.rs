//! Immediate-mode backend: cells and raster plots go straight into one
//! pixel buffer.

use std::rc::Rc;

use image::RgbaImage;
use tileterm_core::{Cell, Color, PixelTarget, Range, SurfaceBackend};

use crate::RasterFrame;
use crate::atlas::TileAtlas;
use crate::blit;

/// Draws every cell repaint and every plotted pixel directly into a single
/// RGBA buffer. There is no separate raster layer, so
/// [`clear_draw`](SurfaceBackend::clear_draw) cannot erase plots without
/// also erasing glyphs and is a no-op.
pub struct CanvasBackend {
    atlas: Rc<TileAtlas>,
    pixels: RgbaImage,
}

impl CanvasBackend {
    pub fn new(atlas: Rc<TileAtlas>, width: u32, height: u32) -> Self {
        Self {
            atlas,
            pixels: RgbaImage::from_pixel(width, height, blit::opaque(Color::BLACK)),
        }
    }

    #[inline]
    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl PixelTarget for CanvasBackend {
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.pixels.width() || y as u32 >= self.pixels.height() {
            return;
        }
        self.pixels.put_pixel(x as u32, y as u32, blit::opaque(color));
    }
}

impl SurfaceBackend for CanvasBackend {
    fn paint_cell(&mut self, col: i32, row: i32, area: Range, cell: Cell) {
        blit::fill_rect(&mut self.pixels, area, cell.bg);
        if let Err(e) = self
            .atlas
            .draw_tile(&mut self.pixels, cell.glyph.code(), Some(cell.fg), area)
        {
            log::warn!("cell ({col}, {row}): {e}");
        }
    }

    fn clear_draw(&mut self) {
        log::debug!("canvas backend has no raster layer; clear_draw ignored");
    }

    fn supports_draw_layer(&self) -> bool {
        false
    }
}

impl RasterFrame for CanvasBackend {
    fn frame(&mut self) -> &RgbaImage {
        &self.pixels
    }
}
