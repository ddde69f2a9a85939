//! Rendering seams: [`PixelTarget`] and [`SurfaceBackend`].
//!
//! The cell buffer never knows which backend is active. Everything it
//! needs from one is "paint this cell into this pixel rectangle", "set this
//! pixel" and "erase the raster layer".

use crate::cell::Cell;
use crate::color::Color;
use crate::geom::Range;

/// Anything that single pixels can be plotted onto.
///
/// The raster primitives in [`raster`](crate::raster) are written against
/// this trait only. Coordinates outside the target are ignored.
pub trait PixelTarget {
    fn plot(&mut self, x: i32, y: i32, color: Color);
}

impl<T: PixelTarget + ?Sized> PixelTarget for &mut T {
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        (**self).plot(x, y, color)
    }
}

impl<T: PixelTarget + ?Sized> PixelTarget for Box<T> {
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        (**self).plot(x, y, color)
    }
}

/// A visual representation kept in sync with a cell grid.
///
/// Implementations must reflect each call immediately: once a method
/// returns, the next presented frame shows its effect.
pub trait SurfaceBackend: PixelTarget {
    /// Repaint one cell: fill `area` with `cell.bg`, then draw the tile for
    /// `cell.glyph` tinted with `cell.fg` on top. `col`/`row` identify the
    /// cell; `area` is its pixel rectangle on the output.
    fn paint_cell(&mut self, col: i32, row: i32, area: Range, cell: Cell);

    /// Erase everything drawn through [`PixelTarget::plot`], leaving cells
    /// untouched. Backends without a separate raster layer leave this a
    /// no-op and report `false` from
    /// [`supports_draw_layer`](Self::supports_draw_layer).
    fn clear_draw(&mut self);

    /// Whether raster plots live on their own layer that
    /// [`clear_draw`](Self::clear_draw) can erase.
    fn supports_draw_layer(&self) -> bool {
        true
    }
}

impl<B: SurfaceBackend + ?Sized> SurfaceBackend for Box<B> {
    fn paint_cell(&mut self, col: i32, row: i32, area: Range, cell: Cell) {
        (**self).paint_cell(col, row, area, cell)
    }

    fn clear_draw(&mut self) {
        (**self).clear_draw()
    }

    fn supports_draw_layer(&self) -> bool {
        (**self).supports_draw_layer()
    }
}
