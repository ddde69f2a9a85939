//! The [`CellBuffer`], a fixed-size column/row array of [`Cell`]s.
//!
//! Storage is a flat row-major `Vec`; addressing is by `(column, row)`.

use crate::cell::Cell;
use crate::geom::{Point, Range};

/// A `width × height` array of cells, all starting as [`Cell::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellBuffer {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl CellBuffer {
    /// Allocate a buffer of blank cells. Negative sizes are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The grid as a range of cell coordinates.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// The cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Store `cell` at `p`. Returns `false` (and changes nothing) outside
    /// the grid.
    #[inline]
    pub fn set(&mut self, p: Point, cell: Cell) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Overwrite every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Glyph;

    #[test]
    fn new_buffer_is_blank() {
        let b = CellBuffer::new(4, 3);
        assert_eq!(b.bounds(), Range::new(0, 0, 4, 3));
        assert!(b.iter().all(|(_, c)| c == Cell::default()));
        assert_eq!(b.iter().count(), 12);
    }

    #[test]
    fn set_and_get() {
        let mut b = CellBuffer::new(4, 3);
        let c = Cell::default().with_glyph(Glyph::from('X'));
        assert!(b.set(Point::new(3, 2), c));
        assert_eq!(b.get(Point::new(3, 2)), Some(c));
        assert_eq!(b.get(Point::new(2, 1)), Some(Cell::default()));
        assert_eq!(b.get(Point::new(2, 3)), None);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut b = CellBuffer::new(2, 2);
        let before = b.clone();
        let c = Cell::default().with_glyph(Glyph(1));
        assert!(!b.set(Point::new(2, 0), c));
        assert!(!b.set(Point::new(0, -1), c));
        assert_eq!(b, before);
        assert_eq!(b.get(Point::new(-1, 0)), None);
    }

    #[test]
    fn iter_pairs_points_with_cells() {
        let mut b = CellBuffer::new(3, 2);
        b.set(Point::new(1, 1), Cell::default().with_glyph(Glyph(9)));
        let found: Vec<_> = b.iter().filter(|(_, c)| c.glyph == 9u32).map(|(p, _)| p).collect();
        assert_eq!(found, vec![Point::new(1, 1)]);
    }

    #[test]
    fn negative_size_clamps_to_empty() {
        let b = CellBuffer::new(-3, 2);
        assert_eq!(b.width(), 0);
        assert_eq!(b.iter().count(), 0);
    }
}
