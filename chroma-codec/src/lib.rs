//! # Chroma Codec
//!
//! Lossless compression for program images. Three methods: palette
//! reduction, row-wise run-length encoding, and their combination. The
//! defining invariant is exact rehydration: `decompress(compress(g, m))`
//! reproduces `g` byte for byte under every method. High-entropy grids may
//! compress negatively; that is acceptable output, not an error.

pub mod artifact;
pub mod error;
pub mod palette;
pub mod rle;

pub use artifact::{grid_checksum, Artifact, Method, Payload, MAGIC, VERSION};
pub use error::{CompressionError, Result};

use chroma_spec::PixelGrid;

/// Compress a grid with the chosen method.
pub fn compress(grid: &PixelGrid, method: Method) -> Artifact {
    let checksum = grid_checksum(grid);
    let (palette, payload) = match method {
        Method::Palette => {
            let (palette, indices) = palette::reduce(grid);
            (palette, Payload::Indices(indices))
        }
        Method::Rle => {
            let runs = rle::encode_rows(grid.pixels(), grid.width() as usize);
            (Vec::new(), Payload::PixelRuns(runs))
        }
        Method::Hybrid => {
            let (palette, indices) = palette::reduce(grid);
            let runs = rle::encode_rows(&indices, grid.width() as usize);
            (palette, Payload::IndexRuns(runs))
        }
    };

    Artifact {
        magic: MAGIC,
        version: VERSION,
        width: grid.width(),
        height: grid.height(),
        method,
        palette,
        payload,
        checksum,
    }
}

/// Decompress an artifact back into the exact original grid.
///
/// Every inconsistency is a hard error: structural problems, palette
/// indices out of range, run totals that disagree with the dimensions,
/// invalid pixel values, and a checksum that does not match the
/// reconstruction.
pub fn decompress(artifact: &Artifact) -> Result<PixelGrid> {
    artifact.validate()?;

    let cells = artifact.width as usize * artifact.height as usize;

    let pixels = match &artifact.payload {
        Payload::Indices(indices) => {
            if indices.len() != cells {
                return Err(CompressionError::PayloadSizeMismatch {
                    expected: cells,
                    actual: indices.len(),
                });
            }
            palette::restore(&artifact.palette, indices)?
        }
        Payload::PixelRuns(runs) => rle::decode_runs(runs, cells)?,
        Payload::IndexRuns(runs) => {
            let indices = rle::decode_runs(runs, cells)?;
            palette::restore(&artifact.palette, &indices)?
        }
    };

    for px in &pixels {
        px.validate()?;
    }

    let grid = PixelGrid::new(artifact.width, artifact.height, pixels)?;

    if grid_checksum(&grid) != artifact.checksum {
        return Err(CompressionError::ChecksumMismatch);
    }

    Ok(grid)
}

/// Compress straight to the binary wire form.
pub fn compress_to_bytes(grid: &PixelGrid, method: Method) -> Result<Vec<u8>> {
    compress(grid, method).to_bytes()
}

/// Decompress from the binary wire form.
pub fn decompress_from_bytes(bytes: &[u8]) -> Result<PixelGrid> {
    decompress(&Artifact::from_bytes(bytes)?)
}
