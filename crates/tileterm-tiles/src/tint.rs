//! Cache of pre-tinted tiles keyed by `(tile index, tint colour)`.

use std::collections::HashMap;
use std::rc::Rc;

use image::RgbaImage;
use tileterm_core::Color;

/// Counters describing cache behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TintStats {
    /// Times the tint compositing pass actually ran.
    pub composites: u64,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Distinct `(tile, tint)` pairs currently cached.
    pub entries: usize,
}

/// Lazily populated map from `(tile, tint)` to the tinted tile image.
#[derive(Default)]
pub struct TintCache {
    tiles: HashMap<(u32, Color), Rc<RgbaImage>>,
    composites: u64,
    hits: u64,
}

impl TintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached image for `(index, tint)`, running `composite` to build
    /// it on first use.
    pub fn get_or_insert_with<F>(&mut self, index: u32, tint: Color, composite: F) -> Rc<RgbaImage>
    where
        F: FnOnce() -> RgbaImage,
    {
        if let Some(img) = self.tiles.get(&(index, tint)) {
            self.hits += 1;
            return Rc::clone(img);
        }
        self.composites += 1;
        let img = Rc::new(composite());
        self.tiles.insert((index, tint), Rc::clone(&img));
        img
    }

    pub fn stats(&self) -> TintStats {
        TintStats {
            composites: self.composites,
            hits: self.hits,
            entries: self.tiles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_is_a_hit() {
        let mut cache = TintCache::new();
        let mut runs = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(65, Color::RED, || {
                runs += 1;
                RgbaImage::new(8, 16)
            });
        }
        assert_eq!(runs, 1);
        assert_eq!(cache.stats(), TintStats { composites: 1, hits: 2, entries: 1 });
    }

    #[test]
    fn key_is_the_pair() {
        // (1, 23) and (12, 3) both read "123" when concatenated.
        let mut cache = TintCache::new();
        cache.get_or_insert_with(1, Color(23), || RgbaImage::new(1, 1));
        cache.get_or_insert_with(12, Color(3), || RgbaImage::new(1, 1));
        cache.get_or_insert_with(1, Color(3), || RgbaImage::new(1, 1));
        assert_eq!(cache.stats().entries, 3);
        cache.get_or_insert_with(12, Color(3), || RgbaImage::new(1, 1));
        assert_eq!(cache.stats(), TintStats { composites: 3, hits: 1, entries: 3 });
    }
}
