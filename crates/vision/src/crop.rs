use mission::VideoFrame;
use tracing::trace;

use crate::{Observation, VisionError};

const RGB: usize = 3;

/// First frame tagged as the colour map, ignoring depth and other channels.
#[must_use]
pub fn first_colour_frame(frames: &[VideoFrame]) -> Option<&VideoFrame> {
    frames.iter().find(|frame| frame.is_colour_map())
}

/// Cut the centered `target_w` x `target_h` rectangle out of `frame`.
///
/// Margins are `(native - target) / 2` on the top and left; the result always
/// has exactly `target_h` rows of `target_w` RGB triples, so an odd difference
/// leaves the extra row or column on the bottom or right.
///
/// # Errors
///
/// [`VisionError::InvalidDimension`] if the target is empty or larger than the
/// frame, [`VisionError::ShapeMismatch`] if the frame is not a packed RGB
/// buffer of its declared size.
pub fn crop_center(
    frame: &VideoFrame,
    target_w: usize,
    target_h: usize,
) -> Result<Observation, VisionError> {
    let (native_w, native_h) = (frame.width, frame.height);
    if target_w == 0 || target_h == 0 || target_w > native_w || target_h > native_h {
        return Err(VisionError::InvalidDimension { native_w, native_h, target_w, target_h });
    }
    if frame.channels != RGB {
        return Err(VisionError::ShapeMismatch(format!(
            "expected {RGB} channels, frame has {}",
            frame.channels
        )));
    }
    let expected = native_w * native_h * RGB;
    if frame.pixels.len() != expected {
        return Err(VisionError::ShapeMismatch(format!(
            "{native_w}x{native_h} RGB frame needs {expected} bytes, got {}",
            frame.pixels.len()
        )));
    }

    let edge_h = (native_h - target_h) / 2;
    let edge_w = (native_w - target_w) / 2;
    let row_bytes = native_w * RGB;
    let (start, end) = (edge_w * RGB, (edge_w + target_w) * RGB);

    let mut pixels = Vec::with_capacity(target_w * target_h * RGB);
    for row in frame.pixels.chunks_exact(row_bytes).skip(edge_h).take(target_h) {
        pixels.extend_from_slice(&row[start..end]);
    }
    trace!("cropped {native_w}x{native_h} frame to {target_w}x{target_h} at ({edge_w}, {edge_h})");

    Ok(Observation::from_pixels(target_w, target_h, pixels))
}

/// Fixed-shape observation builder shared by reset and step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameResizer {
    pub width: usize,
    pub height: usize,
}

impl FrameResizer {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Length of every observation this resizer produces.
    #[must_use]
    pub fn observation_len(&self) -> usize {
        self.width * self.height * RGB
    }

    /// Crop `frame`, or produce the sentinel when there is none.
    ///
    /// # Errors
    ///
    /// Propagates [`crop_center`] errors for a frame that is present but malformed.
    pub fn resize(&self, frame: Option<&VideoFrame>) -> Result<Observation, VisionError> {
        match frame {
            Some(frame) => crop_center(frame, self.width, self.height),
            None => Ok(Observation::sentinel(self.width, self.height)),
        }
    }
}
