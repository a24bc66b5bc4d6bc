//! Canvas and raster dimensions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalendarError, Result};

/// Drawing surface size in (possibly fractional) pixels.
///
/// The wallpaper path always uses whole pixels, but the live preview
/// reports container sizes straight from the browser layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Create a canvas, rejecting zero, negative and non-finite sizes.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(CalendarError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }

    /// Length of the shorter side
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Raster image dimensions in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelShape {
    pub width: u32,
    pub height: u32,
}

impl PixelShape {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `(width, height)`, the order pixmap and image constructors take.
    pub fn to_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Floating point canvas covering the whole image.
    pub fn to_canvas(&self) -> Result<CanvasSize> {
        CanvasSize::new(self.width as f64, self.height as f64)
    }
}

impl fmt::Display for PixelShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
