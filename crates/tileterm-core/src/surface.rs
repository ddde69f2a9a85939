//! The [`TerminalSurface`], a cell grid mirrored onto a [`SurfaceBackend`].

use crate::backend::SurfaceBackend;
use crate::buffer::CellBuffer;
use crate::cell::{Cell, Glyph};
use crate::color::Color;
use crate::config::SurfaceConfig;
use crate::error::SurfaceError;
use crate::geom::{Point, Range};
use crate::raster;

/// A `width × height` grid of cells kept in sync with a backend.
///
/// Every write goes to the [`CellBuffer`] and to the backend in the same
/// call, so the two never disagree. Writes outside the grid are ignored;
/// reads outside the grid are [`SurfaceError::OutOfBounds`].
///
/// The raster methods (`draw_*`, `fill_*`) address output pixels rather
/// than cells and do not touch the cell buffer.
pub struct TerminalSurface<B: SurfaceBackend> {
    config: SurfaceConfig,
    cells: CellBuffer,
    backend: B,
    cell_width: f64,
    cell_height: f64,
}

impl<B: SurfaceBackend> TerminalSurface<B> {
    /// Allocate a blank grid over `backend` and paint every cell once.
    pub fn new(config: SurfaceConfig, backend: B) -> Self {
        let (cell_width, cell_height) = config.cell_size();
        let cells = CellBuffer::new(config.grid_width, config.grid_height);
        let mut surface = Self {
            config,
            cells,
            backend,
            cell_width,
            cell_height,
        };
        for p in surface.cells.bounds() {
            surface.repaint(p);
        }
        log::debug!(
            "surface ready: {}x{} cells of {:.2}x{:.2} px",
            surface.width(),
            surface.height(),
            cell_width,
            cell_height
        );
        surface
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.cells.width()
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.cells.height()
    }

    #[inline]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Pixel size of one cell.
    #[inline]
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    /// Read-only view of the cells.
    #[inline]
    pub fn cells(&self) -> &CellBuffer {
        &self.cells
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, for presenting frames.
    ///
    /// Painting through this bypasses the cell buffer.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Output pixel rectangle of cell `(x, y)`. Edges are floored to whole
    /// pixels so neighbouring cells tile the output without gaps.
    pub fn cell_area(&self, x: i32, y: i32) -> Range {
        let ow = self.config.output_width as i64;
        let oh = self.config.output_height as i64;
        let gw = self.config.grid_width.max(1) as i64;
        let gh = self.config.grid_height.max(1) as i64;
        let edge = |i: i32, out: i64, cells: i64| (i as i64 * out).div_euclid(cells) as i32;
        Range::new(
            edge(x, ow, gw),
            edge(y, oh, gh),
            edge(x + 1, ow, gw),
            edge(y + 1, oh, gh),
        )
    }

    fn repaint(&mut self, p: Point) {
        if let Some(cell) = self.cells.get(p) {
            let area = self.cell_area(p.x, p.y);
            self.backend.paint_cell(p.x, p.y, area, cell);
        }
    }

    // -----------------------------------------------------------------------
    // Cell writes
    // -----------------------------------------------------------------------

    /// Write `glyph` at `(x, y)` in `fg` on `bg` (white on black when not
    /// given). Out-of-range positions are ignored.
    pub fn put_char(
        &mut self,
        x: i32,
        y: i32,
        glyph: impl Into<Glyph>,
        fg: Option<Color>,
        bg: Option<Color>,
    ) {
        self.put_cell(x, y, Cell::new(glyph.into(), fg, bg));
    }

    /// Store a whole cell record at `(x, y)`. Out-of-range positions are
    /// ignored.
    pub fn put_cell(&mut self, x: i32, y: i32, cell: Cell) {
        let p = Point::new(x, y);
        if self.cells.set(p, cell) {
            self.repaint(p);
        }
    }

    /// Write `text` left to right from `(x, y)`. A `'\n'` returns to
    /// column `x` on the next row. Nothing wraps at the grid edge; the
    /// overflow is dropped like any other out-of-range write.
    pub fn put_string(&mut self, x: i32, y: i32, text: &str, fg: Option<Color>, bg: Option<Color>) {
        let (mut cx, mut cy) = (x, y);
        for c in text.chars() {
            if c == '\n' {
                cx = x;
                cy += 1;
            } else {
                self.put_char(cx, cy, c, fg, bg);
                cx += 1;
            }
        }
    }

    /// Reset every cell to the blank glyph in the given colours.
    pub fn clear_text(&mut self, fg: Option<Color>, bg: Option<Color>) {
        let blank = Cell::new(Glyph::BLANK, fg, bg);
        self.cells.fill(blank);
        for p in self.cells.bounds() {
            self.repaint(p);
        }
    }

    /// Erase the raster layer, leaving cells as they are.
    ///
    /// On backends without a separate raster layer this does nothing.
    pub fn clear_draw(&mut self) {
        if !self.backend.supports_draw_layer() {
            log::debug!("clear_draw: backend has no separate raster layer, nothing erased");
        }
        self.backend.clear_draw();
    }

    /// [`clear_text`](Self::clear_text) then [`clear_draw`](Self::clear_draw).
    pub fn clear(&mut self, fg: Option<Color>, bg: Option<Color>) {
        self.clear_text(fg, bg);
        self.clear_draw();
    }

    /// Shift every row up by `lines`, filling the vacated bottom rows with
    /// blank cells in the given colours. `lines` at or past the grid height
    /// clears the text layer.
    pub fn scroll_up(&mut self, lines: i32, fg: Option<Color>, bg: Option<Color>) {
        if lines <= 0 {
            return;
        }
        let (w, h) = (self.width(), self.height());
        let lines = lines.min(h);
        for y in 0..(h - lines) {
            for x in 0..w {
                if let Some(cell) = self.cells.get(Point::new(x, y + lines)) {
                    self.put_cell(x, y, cell);
                }
            }
        }
        let blank = Cell::new(Glyph::BLANK, fg, bg);
        for y in (h - lines)..h {
            for x in 0..w {
                self.put_cell(x, y, blank);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Cell reads
    // -----------------------------------------------------------------------

    /// The whole cell record at `(x, y)`.
    pub fn get_char_attribs(&self, x: i32, y: i32) -> Result<Cell, SurfaceError> {
        self.cells.get(Point::new(x, y)).ok_or(SurfaceError::OutOfBounds {
            x,
            y,
            width: self.width(),
            height: self.height(),
        })
    }

    /// The glyph at `(x, y)`.
    pub fn get_char(&self, x: i32, y: i32) -> Result<Glyph, SurfaceError> {
        self.get_char_attribs(x, y).map(|c| c.glyph)
    }

    /// The foreground colour at `(x, y)`.
    pub fn get_char_fg(&self, x: i32, y: i32) -> Result<Color, SurfaceError> {
        self.get_char_attribs(x, y).map(|c| c.fg)
    }

    /// The background colour at `(x, y)`.
    pub fn get_char_bg(&self, x: i32, y: i32) -> Result<Color, SurfaceError> {
        self.get_char_attribs(x, y).map(|c| c.bg)
    }

    // -----------------------------------------------------------------------
    // Raster primitives (pixel coordinates, default colour white)
    // -----------------------------------------------------------------------

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Option<Color>) {
        raster::draw_pixel(&mut self.backend, x, y, color.unwrap_or(Color::WHITE));
    }

    pub fn draw_horiz_line(&mut self, x0: i32, x1: i32, y: i32, color: Option<Color>) {
        raster::draw_horiz_line(&mut self.backend, x0, x1, y, color.unwrap_or(Color::WHITE));
    }

    pub fn draw_vert_line(&mut self, x: i32, y0: i32, y1: i32, color: Option<Color>) {
        raster::draw_vert_line(&mut self.backend, x, y0, y1, color.unwrap_or(Color::WHITE));
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<Color>) {
        raster::draw_line(&mut self.backend, x0, y0, x1, y1, color.unwrap_or(Color::WHITE));
    }

    pub fn draw_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<Color>) {
        raster::draw_rect(&mut self.backend, x0, y0, x1, y1, color.unwrap_or(Color::WHITE));
    }

    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<Color>) {
        raster::fill_rect(&mut self.backend, x0, y0, x1, y1, color.unwrap_or(Color::WHITE));
    }

    pub fn draw_ellipse(&mut self, cx: i32, cy: i32, x_radius: i32, y_radius: i32, color: Option<Color>) {
        let color = color.unwrap_or(Color::WHITE);
        raster::draw_ellipse(&mut self.backend, cx, cy, x_radius, y_radius, color);
    }

    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, x_radius: i32, y_radius: i32, color: Option<Color>) {
        let color = color.unwrap_or(Color::WHITE);
        raster::fill_ellipse(&mut self.backend, cx, cy, x_radius, y_radius, color);
    }
}
