#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Frame Capture
//!
//! Turns the colour-map frames produced by the mission host into fixed-shape
//! observations. The reduction is a center crop, never a scale: the agent sees
//! the middle of the screen at native resolution.
//!
//! When no frame is available for a tick the observation is the all-zero
//! sentinel, which has exactly the same length as a real one.

use std::path::Path;

use thiserror::Error;

pub mod crop;

pub use crop::{crop_center, first_colour_frame, FrameResizer};

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("crop {target_w}x{target_h} does not fit a {native_w}x{native_h} frame")]
    InvalidDimension {
        native_w: usize,
        native_h: usize,
        target_w: usize,
        target_h: usize,
    },
    #[error("frame buffer shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("failed to write observation image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Flat row-major RGB observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    sentinel: bool,
}

impl Observation {
    /// All-zero stand-in for a tick without a frame.
    #[must_use]
    pub fn sentinel(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height * 3], sentinel: true }
    }

    pub(crate) fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 3);
        Self { width, height, pixels, sentinel: false }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.sentinel
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB triple at column `x`, row `y`.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y * self.width + x) * 3;
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }

    /// Write the observation as an RGB PNG.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Encode`] if the image cannot be written.
    pub fn save_png(&self, path: &Path) -> Result<(), VisionError> {
        let (w, h) = (dimension(self.width)?, dimension(self.height)?);
        image::save_buffer(path, &self.pixels, w, h, image::ColorType::Rgb8)?;
        Ok(())
    }
}

fn dimension(value: usize) -> Result<u32, VisionError> {
    u32::try_from(value)
        .map_err(|_| VisionError::ShapeMismatch(format!("dimension {value} exceeds u32")))
}
