//! Error type for surface reads and lifecycle transitions.

use std::fmt;

/// Errors reported by [`TerminalSurface`](crate::TerminalSurface) and the
/// lifecycle [`Runner`](crate::Runner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceError {
    /// A read addressed a cell outside the grid.
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },
    /// A backend was attached after the surface had already become ready
    /// (or after loading failed).
    AlreadyReady,
    /// The tile atlas could not be loaded; the surface never becomes ready.
    LoadFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::OutOfBounds { x, y, width, height } => {
                write!(f, "cell ({x}, {y}) is outside the {width}x{height} grid")
            }
            SurfaceError::AlreadyReady => write!(f, "surface is already initialised"),
            SurfaceError::LoadFailed(reason) => write!(f, "tile atlas failed to load: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}
