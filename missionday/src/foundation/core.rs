use crate::foundation::error::{MissionError, MissionResult};

/// 0-based index of a frame pulled from a [`crate::FrameSource`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> MissionResult<Self> {
        if den == 0 {
            return Err(MissionError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(MissionError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert elapsed seconds to a frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// A rectangular RGBA8 pixel grid.
///
/// Pixels are straight (non-premultiplied) alpha, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl PixelFrame {
    /// Fully transparent frame of the given size.
    pub fn new(width: u32, height: u32) -> MissionResult<Self> {
        let len = rgba8_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Wrap an existing RGBA8 buffer, checking its length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> MissionResult<Self> {
        let len = rgba8_len(width, height)?;
        if data.len() != len {
            return Err(MissionError::validation(format!(
                "rgba8 buffer has {} bytes, expected {len} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Frame filled with one color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> MissionResult<Self> {
        let len = rgba8_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: rgba.repeat(len / 4),
        })
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    /// Read one pixel, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Convert from a decoded `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert into an `image` buffer for encoding.
    pub fn into_image(self) -> MissionResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| MissionError::validation("pixel frame size does not match its buffer"))
    }
}

pub(crate) fn rgba8_len(width: u32, height: u32) -> MissionResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MissionError::validation("pixel frame size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
