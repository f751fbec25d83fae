//! Bounded RGB-to-HSV memoization
//!
//! Generated program images reuse a small palette heavily, so conversion
//! results are memoized per decoder. The cache is a pure optimization with
//! no semantic effect: a capacity-zero cache converts every pixel fresh and
//! produces identical results. Each decoder owns its cache, so concurrent
//! decoders never share state.

use std::collections::HashMap;

use chroma_spec::{Hsv, Rgb};

/// Default cache capacity, comfortably above any realistic program palette.
pub const DEFAULT_CAPACITY: usize = 4096;

#[derive(Debug, Clone)]
pub struct HsvCache {
    map: HashMap<Rgb, Hsv>,
    capacity: usize,
}

impl HsvCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A cache bounded to `capacity` distinct triples. Zero disables
    /// memoization entirely.
    pub fn with_capacity(capacity: usize) -> Self {
        HsvCache {
            map: HashMap::new(),
            capacity,
        }
    }

    /// Convert a triple, consulting the memo first. Once the cache is full,
    /// unseen triples are converted without being stored.
    pub fn convert(&mut self, rgb: Rgb) -> Hsv {
        if let Some(&hsv) = self.map.get(&rgb) {
            return hsv;
        }
        let hsv = Hsv::from(rgb);
        if self.map.len() < self.capacity {
            self.map.insert(rgb, hsv);
        }
        hsv
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl Default for HsvCache {
    fn default() -> Self {
        Self::new()
    }
}
