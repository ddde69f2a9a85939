use std::fmt;

/// Errors from loading a tile atlas or looking up its tiles.
#[derive(Debug)]
pub enum AtlasError {
    /// The atlas file could not be read.
    Io(std::io::Error),
    /// The atlas bytes are not a decodable image.
    Decode(image::ImageError),
    /// The decoded image is smaller than the declared atlas size.
    Geometry { declared: (u32, u32), actual: (u32, u32) },
    /// A tile index past the last tile of the atlas.
    TileOutOfRange { index: u32, count: u32 },
    /// The background decoder went away without reporting a result.
    Disconnected,
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::Io(e) => write!(f, "cannot read atlas: {e}"),
            AtlasError::Decode(e) => write!(f, "cannot decode atlas: {e}"),
            AtlasError::Geometry { declared, actual } => write!(
                f,
                "atlas image is {}x{}, smaller than the declared {}x{}",
                actual.0, actual.1, declared.0, declared.1
            ),
            AtlasError::TileOutOfRange { index, count } => {
                write!(f, "tile {index} is out of range (atlas has {count} tiles)")
            }
            AtlasError::Disconnected => write!(f, "atlas loader stopped without a result"),
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AtlasError::Io(e) => Some(e),
            AtlasError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AtlasError {
    fn from(e: std::io::Error) -> Self {
        AtlasError::Io(e)
    }
}

impl From<image::ImageError> for AtlasError {
    fn from(e: image::ImageError) -> Self {
        AtlasError::Decode(e)
    }
}
