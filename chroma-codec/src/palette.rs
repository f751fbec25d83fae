//! Palette reduction
//!
//! Distinct pixel values in first-seen order, plus one palette index per
//! grid cell. Restoring is a plain lookup with index bounds enforced.

use std::collections::HashMap;

use chroma_spec::{Hsv, PixelGrid};

use crate::error::{CompressionError, Result};

/// Collect the distinct pixels of a grid in first-seen order and map every
/// cell to its palette index.
pub fn reduce(grid: &PixelGrid) -> (Vec<Hsv>, Vec<u32>) {
    let mut palette: Vec<Hsv> = Vec::new();
    let mut seen: HashMap<Hsv, u32> = HashMap::new();
    let mut indices = Vec::with_capacity(grid.len());

    for &px in grid.pixels() {
        let index = *seen.entry(px).or_insert_with(|| {
            palette.push(px);
            (palette.len() - 1) as u32
        });
        indices.push(index);
    }

    (palette, indices)
}

/// Restore pixel values from palette indices.
pub fn restore(palette: &[Hsv], indices: &[u32]) -> Result<Vec<Hsv>> {
    indices
        .iter()
        .map(|&index| {
            palette
                .get(index as usize)
                .copied()
                .ok_or(CompressionError::PaletteIndexOutOfRange {
                    index,
                    palette_len: palette.len(),
                })
        })
        .collect()
}
