//! Compressed artifact structure
//!
//! The serialized form of a compressed program image: dimensions, method,
//! palette, payload, and a SHA-256 checksum over the canonical pixel bytes.
//! Binary wire form is bincode.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use chroma_spec::{Hsv, PixelGrid};

use crate::error::{CompressionError, Result};

/// Magic number for artifact files: "CHRM" = 0x4348524D
pub const MAGIC: u32 = 0x4348_524D;

/// Artifact format version: v1.0
pub const VERSION: u32 = 0x0001_0000;

/// Compression method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Palette plus one index per cell
    Palette,
    /// Raw pixel runs, no palette
    Rle,
    /// Palette plus index runs
    Hybrid,
}

/// Method-specific payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// One palette index per cell, row-major
    Indices(Vec<u32>),
    /// Row-wise runs of raw pixels
    PixelRuns(Vec<(Hsv, u32)>),
    /// Row-wise runs of palette indices
    IndexRuns(Vec<(u32, u32)>),
}

/// A compressed program image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub magic: u32,
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub method: Method,
    /// Distinct pixels in first-seen order; empty for the RLE method
    pub palette: Vec<Hsv>,
    pub payload: Payload,
    /// SHA-256 over the canonical bytes of the source grid
    pub checksum: [u8; 32],
}

/// Checksum of a grid's canonical byte form.
pub fn grid_checksum(grid: &PixelGrid) -> [u8; 32] {
    let digest = Sha256::digest(grid.to_canonical_bytes());
    digest.into()
}

impl Artifact {
    /// Structural validation: magic, version, and method/payload agreement.
    /// Content-level checks (index bounds, run totals, checksum) happen
    /// during decompression.
    pub fn validate(&self) -> Result<()> {
        if self.magic != MAGIC {
            return Err(CompressionError::BadMagic {
                expected: MAGIC,
                found: self.magic,
            });
        }
        if self.version != VERSION {
            return Err(CompressionError::UnsupportedVersion {
                expected: VERSION,
                found: self.version,
            });
        }

        let agrees = matches!(
            (self.method, &self.payload),
            (Method::Palette, Payload::Indices(_))
                | (Method::Rle, Payload::PixelRuns(_))
                | (Method::Hybrid, Payload::IndexRuns(_))
        );
        if !agrees {
            return Err(CompressionError::MethodMismatch {
                method: self.method,
            });
        }

        Ok(())
    }

    /// Serialize to the binary wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from the binary wire form and validate structure.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let artifact: Artifact = bincode::deserialize(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_artifact() -> Artifact {
        Artifact {
            magic: MAGIC,
            version: VERSION,
            width: 1,
            height: 1,
            method: Method::Rle,
            palette: vec![],
            payload: Payload::PixelRuns(vec![(Hsv::BLACK, 1)]),
            checksum: [0; 32],
        }
    }

    #[test]
    fn test_validate_magic_and_version() {
        assert!(empty_artifact().validate().is_ok());

        let mut artifact = empty_artifact();
        artifact.magic = 0x1234_5678;
        assert!(matches!(
            artifact.validate().unwrap_err(),
            CompressionError::BadMagic { .. }
        ));

        let mut artifact = empty_artifact();
        artifact.version = 0x0002_0000;
        assert!(matches!(
            artifact.validate().unwrap_err(),
            CompressionError::UnsupportedVersion { .. }
        ));
    }

    #[test]
    fn test_validate_method_payload_agreement() {
        let mut artifact = empty_artifact();
        artifact.method = Method::Palette;
        assert!(matches!(
            artifact.validate().unwrap_err(),
            CompressionError::MethodMismatch {
                method: Method::Palette
            }
        ));
    }

    #[test]
    fn test_bytes_round_trip() {
        let artifact = empty_artifact();
        let bytes = artifact.to_bytes().unwrap();
        let back = Artifact::from_bytes(&bytes).unwrap();
        assert_eq!(artifact, back);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let bytes = empty_artifact().to_bytes().unwrap();
        let err = Artifact::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, CompressionError::Malformed(_)));
    }

    #[test]
    fn test_grid_checksum_distinguishes_grids() {
        let a = PixelGrid::filled(2, 2, Hsv::BLACK).unwrap();
        let b = PixelGrid::filled(2, 2, Hsv::new(10, 1, 1).unwrap()).unwrap();
        assert_ne!(grid_checksum(&a), grid_checksum(&b));
        assert_eq!(grid_checksum(&a), grid_checksum(&a));
    }
}
