use crate::foundation::core::PixelFrame;
use crate::foundation::error::{MissionError, MissionResult};

/// A 2D raster target with per-pixel RGBA8 read/write.
pub trait Surface {
    /// Current `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Resize the backing store. Contents after a resize are unspecified.
    fn resize(&mut self, width: u32, height: u32) -> MissionResult<()>;

    /// Copy a frame onto the surface unmodified.
    fn draw(&mut self, frame: &PixelFrame) -> MissionResult<()>;

    /// Read back the full pixel buffer.
    fn read_pixels(&self) -> MissionResult<PixelFrame>;

    /// Replace the full pixel buffer.
    fn write_pixels(&mut self, frame: PixelFrame) -> MissionResult<()>;

    /// Borrow the displayed pixels.
    fn pixels(&self) -> &PixelFrame;
}

/// In-memory [`Surface`].
///
/// A surface can be marked tainted, after which readback and write-back fail the same way a
/// canvas does once cross-origin media has been drawn on it. Drawing still works.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    frame: PixelFrame,
    tainted: bool,
}

impl RasterSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> MissionResult<Self> {
        Ok(Self {
            frame: PixelFrame::new(width, height)?,
            tainted: false,
        })
    }

    /// Mark the surface as (un)readable.
    pub fn set_tainted(&mut self, tainted: bool) {
        self.tainted = tainted;
    }

    /// Take the displayed frame out of the surface.
    pub fn into_frame(self) -> PixelFrame {
        self.frame
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> MissionResult<()> {
        self.frame = PixelFrame::new(width, height)?;
        Ok(())
    }

    fn draw(&mut self, frame: &PixelFrame) -> MissionResult<()> {
        if (frame.width, frame.height) != self.size() {
            return Err(MissionError::keying(format!(
                "cannot draw {}x{} frame onto {}x{} surface",
                frame.width, frame.height, self.frame.width, self.frame.height
            )));
        }
        self.frame.data.copy_from_slice(&frame.data);
        Ok(())
    }

    fn read_pixels(&self) -> MissionResult<PixelFrame> {
        if self.tainted {
            return Err(MissionError::keying(
                "surface is tainted by cross-origin data",
            ));
        }
        Ok(self.frame.clone())
    }

    fn write_pixels(&mut self, frame: PixelFrame) -> MissionResult<()> {
        if self.tainted {
            return Err(MissionError::keying(
                "surface is tainted by cross-origin data",
            ));
        }
        if (frame.width, frame.height) != self.size() {
            return Err(MissionError::keying("write-back size does not match surface"));
        }
        self.frame = frame;
        Ok(())
    }

    fn pixels(&self) -> &PixelFrame {
        &self.frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/surface.rs"]
mod tests;
