//! Image-backed [`TileAtlas`] and its asynchronous loader.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::{GenericImageView, ImageReader, RgbaImage, SubImage};
use tileterm_core::{AtlasConfig, Color, Range, TileGeometry, TileRect};

use crate::blit;
use crate::error::AtlasError;
use crate::tint::{TintCache, TintStats};

/// A decoded atlas image partitioned into fixed-size tiles.
///
/// Tiles are looked up by index in row-major order. Tinted versions of
/// tiles are built on first use and cached per `(index, tint)`; the cache
/// lives behind a `RefCell` so surfaces sharing one `Rc<TileAtlas>` share
/// it too.
pub struct TileAtlas {
    image: RgbaImage,
    geometry: TileGeometry,
    tints: RefCell<TintCache>,
}

impl TileAtlas {
    /// Wrap an already decoded image. The image must be at least as large
    /// as the geometry declares; extra pixels are ignored.
    pub fn from_image(image: RgbaImage, geometry: TileGeometry) -> Result<Self, AtlasError> {
        let actual = image.dimensions();
        if actual.0 < geometry.atlas_width || actual.1 < geometry.atlas_height {
            return Err(AtlasError::Geometry {
                declared: (geometry.atlas_width, geometry.atlas_height),
                actual,
            });
        }
        if actual != (geometry.atlas_width, geometry.atlas_height) {
            log::debug!(
                "atlas image is {}x{}, using the declared {}x{}",
                actual.0,
                actual.1,
                geometry.atlas_width,
                geometry.atlas_height
            );
        }
        Ok(Self {
            image,
            geometry,
            tints: RefCell::new(TintCache::new()),
        })
    }

    /// Decode an encoded image (PNG) held in memory.
    pub fn from_bytes(bytes: &[u8], geometry: TileGeometry) -> Result<Self, AtlasError> {
        Self::from_image(decode(bytes)?, geometry)
    }

    /// Read and decode the atlas named by `config`, blocking.
    pub fn open(config: &AtlasConfig) -> Result<Self, AtlasError> {
        Self::from_image(read(&config.path)?, config.geometry())
    }

    /// Start decoding the atlas named by `config` on a background thread.
    ///
    /// The returned handle is polled from the host's loop; it yields the
    /// atlas, or the reason it could not be loaded, exactly once.
    pub fn load(config: AtlasConfig) -> PendingAtlas {
        let (tx, rx) = mpsc::channel();
        let path = config.path.clone();
        let geometry = config.geometry();
        log::debug!("loading atlas {path}");
        thread::spawn(move || {
            let _ = tx.send(read(&config.path));
        });
        PendingAtlas {
            rx,
            geometry,
            path,
            done: false,
        }
    }

    #[inline]
    pub fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    #[inline]
    pub fn tile_count(&self) -> u32 {
        self.geometry.tile_count()
    }

    /// Rectangle of tile `index`; not bounds-checked.
    #[inline]
    pub fn tile_rect(&self, index: u32) -> TileRect {
        self.geometry.tile_rect(index)
    }

    /// View of tile `index` inside the atlas image.
    pub fn tile(&self, index: u32) -> Result<SubImage<&RgbaImage>, AtlasError> {
        if !self.geometry.contains(index) {
            return Err(AtlasError::TileOutOfRange {
                index,
                count: self.tile_count(),
            });
        }
        let r = self.tile_rect(index);
        Ok(self.image.view(r.x, r.y, r.width, r.height))
    }

    /// Tile `index` recoloured to `tint`, from the cache when possible.
    pub fn tinted(&self, index: u32, tint: Color) -> Result<Rc<RgbaImage>, AtlasError> {
        let tile = self.tile(index)?;
        let img = self
            .tints
            .borrow_mut()
            .get_or_insert_with(index, tint, || blit::tint_atop(&*tile, tint));
        Ok(img)
    }

    /// Draw tile `index` scaled into `dest` on `target`. With a tint the
    /// glyph silhouette is drawn in that colour (see [`tinted`](Self::tinted));
    /// without one the tile's own pixels are used.
    pub fn draw_tile(
        &self,
        target: &mut RgbaImage,
        index: u32,
        tint: Option<Color>,
        dest: Range,
    ) -> Result<(), AtlasError> {
        let tinted = tint.map(|color| self.tinted(index, color)).transpose()?;
        let tile = match &tinted {
            Some(img) => img.view(0, 0, img.width(), img.height()),
            None => self.tile(index)?,
        };
        blit::blit_over(target, &*tile, dest, |px| px);
        Ok(())
    }

    /// Tint cache counters; `composites` counts compositing passes run.
    pub fn tint_stats(&self) -> TintStats {
        self.tints.borrow().stats()
    }

    /// The full atlas image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

fn decode(bytes: &[u8]) -> Result<RgbaImage, AtlasError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

fn read(path: &str) -> Result<RgbaImage, AtlasError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}

/// An atlas still being decoded. See [`TileAtlas::load`].
pub struct PendingAtlas {
    rx: Receiver<Result<RgbaImage, AtlasError>>,
    geometry: TileGeometry,
    path: String,
    done: bool,
}

impl PendingAtlas {
    /// The path being loaded.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Non-blocking check. `None` while decoding is still running and after
    /// the result has been handed out.
    pub fn poll(&mut self) -> Option<Result<TileAtlas, AtlasError>> {
        if self.done {
            return None;
        }
        let result = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AtlasError::Disconnected),
        };
        self.done = true;
        Some(self.finish(result))
    }

    /// Block until decoding finishes.
    pub fn wait(mut self) -> Result<TileAtlas, AtlasError> {
        if self.done {
            return Err(AtlasError::Disconnected);
        }
        self.done = true;
        let result = self.rx.recv().unwrap_or(Err(AtlasError::Disconnected));
        self.finish(result)
    }

    fn finish(&self, result: Result<RgbaImage, AtlasError>) -> Result<TileAtlas, AtlasError> {
        let atlas = result.and_then(|img| TileAtlas::from_image(img, self.geometry));
        match &atlas {
            Ok(a) => log::debug!("atlas {} ready: {} tiles", self.path, a.tile_count()),
            Err(e) => log::error!("atlas {}: {e}", self.path),
        }
        atlas
    }
}
