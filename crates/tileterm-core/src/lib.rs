//! **tileterm-core**: a character-grid terminal surface rendered from a
//! tile atlas.
//!
//! This crate holds everything that does not depend on how pixels are
//! produced: colors and cells, the cell buffer, tile geometry, the raster
//! primitive library, the [`TerminalSurface`] that mirrors cells onto a
//! [`SurfaceBackend`], and the [`Runner`] that sequences atlas-ready,
//! surface-ready and per-frame ticks for a host.

pub mod atlas;
pub mod backend;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod input;
pub mod lifecycle;
pub mod raster;
pub mod surface;

pub use atlas::{TileGeometry, TileRect};
pub use backend::{PixelTarget, SurfaceBackend};
pub use buffer::CellBuffer;
pub use cell::{Cell, Glyph};
pub use color::Color;
pub use config::{AtlasConfig, SurfaceConfig};
pub use error::SurfaceError;
pub use geom::{Point, Range};
pub use input::Key;
pub use lifecycle::{Phase, Runner, TerminalApp};
pub use surface::TerminalSurface;
