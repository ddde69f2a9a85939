//! **tileterm-tiles**: image-backed tile atlas and pixel backends.
//!
//! This crate turns the abstract [`SurfaceBackend`] seam of
//! `tileterm-core` into RGBA pixels:
//!
//! - [`TileAtlas`] decodes a tileset image (PNG via [`image`]) and draws
//!   tinted, scaled tiles from it, caching each `(tile, tint)` pair.
//! - [`SceneBackend`] keeps a retained node per cell plus a separate
//!   raster layer and composes them into a frame when asked.
//! - [`CanvasBackend`] paints cells and plots directly into one buffer.
//! - [`Backend`] picks one of the two at runtime, for hosts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use tileterm_core::{AtlasConfig, SurfaceConfig, TerminalSurface};
//! use tileterm_tiles::{Backend, BackendKind, RasterFrame, TileAtlas};
//!
//! let atlas = Rc::new(TileAtlas::open(&AtlasConfig::default()).unwrap());
//! let config = SurfaceConfig::default();
//! let backend = Backend::new(BackendKind::Scene, atlas, &config);
//! let mut term = TerminalSurface::new(config, backend);
//! term.put_string(0, 0, "hello", None, None);
//! let frame = term.backend_mut().frame();
//! ```

pub mod atlas;
pub mod blit;
pub mod canvas;
pub mod error;
pub mod scene;
pub mod tint;

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use image::RgbaImage;
use tileterm_core::{Cell, Color, PixelTarget, Range, SurfaceBackend, SurfaceConfig};

pub use atlas::{PendingAtlas, TileAtlas};
pub use canvas::CanvasBackend;
pub use error::AtlasError;
pub use scene::SceneBackend;
pub use tint::{TintCache, TintStats};

/// A backend that can hand out its current output as an RGBA image of
/// `output_width × output_height` pixels.
pub trait RasterFrame {
    fn frame(&mut self) -> &RgbaImage;
}

// ---------------------------------------------------------------------------
// Backend selection
// ---------------------------------------------------------------------------

/// Which backend a host should build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Retained scene graph with a separate raster layer.
    #[default]
    Scene,
    /// Immediate-mode pixel buffer.
    Canvas,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Scene => f.write_str("scene"),
            BackendKind::Canvas => f.write_str("canvas"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scene" => Ok(BackendKind::Scene),
            "canvas" => Ok(BackendKind::Canvas),
            other => Err(format!("unknown backend {other:?} (expected scene or canvas)")),
        }
    }
}

/// Either backend, chosen at runtime.
pub enum Backend {
    Scene(SceneBackend),
    Canvas(CanvasBackend),
}

impl Backend {
    /// Build a backend of `kind` over `atlas`, sized to the config's output.
    pub fn new(kind: BackendKind, atlas: Rc<TileAtlas>, config: &SurfaceConfig) -> Self {
        let (w, h) = (config.output_width, config.output_height);
        log::debug!("{kind} backend, {w}x{h} px");
        match kind {
            BackendKind::Scene => Backend::Scene(SceneBackend::new(atlas, w, h)),
            BackendKind::Canvas => Backend::Canvas(CanvasBackend::new(atlas, w, h)),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Scene(_) => BackendKind::Scene,
            Backend::Canvas(_) => BackendKind::Canvas,
        }
    }

    pub fn atlas(&self) -> &TileAtlas {
        match self {
            Backend::Scene(b) => b.atlas(),
            Backend::Canvas(b) => b.atlas(),
        }
    }
}

impl PixelTarget for Backend {
    fn plot(&mut self, x: i32, y: i32, color: Color) {
        match self {
            Backend::Scene(b) => b.plot(x, y, color),
            Backend::Canvas(b) => b.plot(x, y, color),
        }
    }
}

impl SurfaceBackend for Backend {
    fn paint_cell(&mut self, col: i32, row: i32, area: Range, cell: Cell) {
        match self {
            Backend::Scene(b) => b.paint_cell(col, row, area, cell),
            Backend::Canvas(b) => b.paint_cell(col, row, area, cell),
        }
    }

    fn clear_draw(&mut self) {
        match self {
            Backend::Scene(b) => b.clear_draw(),
            Backend::Canvas(b) => b.clear_draw(),
        }
    }

    fn supports_draw_layer(&self) -> bool {
        match self {
            Backend::Scene(b) => b.supports_draw_layer(),
            Backend::Canvas(b) => b.supports_draw_layer(),
        }
    }
}

impl RasterFrame for Backend {
    fn frame(&mut self) -> &RgbaImage {
        match self {
            Backend::Scene(b) => b.frame(),
            Backend::Canvas(b) => b.frame(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::tests::test_atlas;
    use tileterm_core::TerminalSurface;

    fn run(kind: BackendKind) -> RgbaImage {
        let config = SurfaceConfig::default()
            .with_output_size(16, 12)
            .with_grid_size(4, 2);
        let backend = Backend::new(kind, Rc::new(test_atlas()), &config);
        assert_eq!(backend.kind(), kind);
        let mut term = TerminalSurface::new(config, backend);
        term.clear_text(None, None);
        term.put_string(0, 0, "\u{3}\u{5}", Some(Color::RED), Some(Color::BLUE));
        term.put_char(3, 1, 7u32, None, Some(Color::GREEN));
        term.backend_mut().frame().clone()
    }

    #[test]
    fn both_backends_render_cells_alike() {
        let scene = run(BackendKind::Scene);
        let canvas = run(BackendKind::Canvas);
        assert_eq!(scene.dimensions(), (16, 12));
        assert_eq!(scene, canvas);
    }

    #[test]
    fn only_scene_has_a_draw_layer() {
        let atlas = Rc::new(test_atlas());
        let config = SurfaceConfig::default().with_output_size(8, 6);
        assert!(Backend::new(BackendKind::Scene, atlas.clone(), &config).supports_draw_layer());
        assert!(!Backend::new(BackendKind::Canvas, atlas, &config).supports_draw_layer());
    }

    #[test]
    fn backend_kind_parses() {
        assert_eq!("Canvas".parse::<BackendKind>(), Ok(BackendKind::Canvas));
        assert_eq!("scene".parse::<BackendKind>(), Ok(BackendKind::Scene));
        assert!("opengl".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::default().to_string(), "scene");
    }
}
