//! # Pixel Types
//!
//! HSV is the instruction encoding surface: hue selects the opcode, the
//! saturation and value channels carry the operands. Components are stored
//! as whole degrees / whole percent so that pixel equality, hashing, palette
//! reduction, and checksumming are exact.

use crate::error::ChromaError;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound for hue, in degrees.
pub const HUE_MAX: u16 = 360;

/// Inclusive upper bound for saturation and value, in percent.
pub const CHANNEL_MAX: u8 = 100;

/// An HSV pixel: hue 0-359, saturation 0-100, value 0-100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in whole degrees
    pub hue: u16,

    /// Saturation in whole percent
    pub sat: u8,

    /// Value in whole percent
    pub val: u8,
}

impl Hsv {
    /// The reserved no-op / padding pixel.
    pub const BLACK: Hsv = Hsv {
        hue: 0,
        sat: 0,
        val: 0,
    };

    /// Create a pixel, rejecting out-of-range components.
    pub fn new(hue: u16, sat: u8, val: u8) -> Result<Self, ChromaError> {
        let pixel = Hsv { hue, sat, val };
        pixel.validate()?;
        Ok(pixel)
    }

    /// Validate component ranges. Out-of-range components are an error, not
    /// something to clamp.
    pub fn validate(&self) -> Result<(), ChromaError> {
        if self.hue >= HUE_MAX {
            return Err(ChromaError::InvalidHue { hue: self.hue });
        }
        if self.sat > CHANNEL_MAX {
            return Err(ChromaError::InvalidSaturation { sat: self.sat });
        }
        if self.val > CHANNEL_MAX {
            return Err(ChromaError::InvalidValue { val: self.val });
        }
        Ok(())
    }

    /// Pure black, regardless of hue. Reserved for NOP and grid padding.
    #[inline]
    pub const fn is_black(self) -> bool {
        self.sat == 0 && self.val == 0
    }

    /// Canonical byte form used for artifact checksums.
    #[inline]
    pub fn to_canonical_bytes(self) -> [u8; 4] {
        let [h0, h1] = self.hue.to_le_bytes();
        [h0, h1, self.sat, self.val]
    }
}

/// An 8-bit RGB triple, the raw form pixels arrive in from raster images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Integer division rounding half away from zero. Divisor must be positive.
#[inline]
fn round_div(n: i32, d: i32) -> i32 {
    if n >= 0 {
        (n + d / 2) / d
    } else {
        -((-n + d / 2) / d)
    }
}

impl From<Rgb> for Hsv {
    /// Reference max/min sector conversion with round-half-up integer math.
    /// Grayscale input has undefined hue; it maps to hue 0, saturation 0.
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as i32;
        let g = rgb.g as i32;
        let b = rgb.b as i32;

        let maxc = r.max(g).max(b);
        let minc = r.min(g).min(b);
        let range = maxc - minc;

        let val = round_div(maxc * 100, 255) as u8;

        if range == 0 {
            return Hsv {
                hue: 0,
                sat: 0,
                val,
            };
        }

        let sat = round_div(range * 100, maxc) as u8;

        let (num, offset) = if maxc == r {
            ((g - b) * 60, 0)
        } else if maxc == g {
            ((b - r) * 60, 120)
        } else {
            ((r - g) * 60, 240)
        };

        let hue = (round_div(num, range) + offset).rem_euclid(360) as u16;

        Hsv { hue, sat, val }
    }
}
