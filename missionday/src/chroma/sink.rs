use std::path::PathBuf;
use std::sync::mpsc::{SyncSender, TrySendError};

use crate::foundation::core::{Fps, FrameIndex, PixelFrame};
use crate::foundation::error::{MissionError, MissionResult};

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Native frame rate of the source.
    pub fps: Fps,
}

/// Consumer of composited frames.
///
/// `push_frame` is called with strictly increasing [`FrameIndex`] values.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> MissionResult<()>;
    /// Push one composited frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &PixelFrame) -> MissionResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> MissionResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, PixelFrame)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, PixelFrame)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MissionResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &PixelFrame) -> MissionResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MissionResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_00000.png` into a directory, keeping transparency.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of PNG files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> MissionResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            MissionError::media(format!("create output dir '{}': {e}", self.dir.display()))
        })?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &PixelFrame) -> MissionResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", self.written));
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| MissionError::media(format!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> MissionResult<()> {
        Ok(())
    }
}

/// Hands frames to a live consumer over a bounded channel.
///
/// A full channel drops the frame instead of blocking the animation loop.
#[derive(Debug)]
pub struct ChannelSink {
    tx: SyncSender<(FrameIndex, PixelFrame)>,
    dropped: u64,
}

impl ChannelSink {
    /// Wrap the sending half of a `sync_channel`.
    pub fn new(tx: SyncSender<(FrameIndex, PixelFrame)>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Frames dropped because the consumer fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl FrameSink for ChannelSink {
    fn begin(&mut self, _cfg: SinkConfig) -> MissionResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &PixelFrame) -> MissionResult<()> {
        match self.tx.try_send((idx, frame.clone())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => {
                Err(MissionError::media("frame consumer disconnected"))
            }
        }
    }

    fn end(&mut self) -> MissionResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/sink.rs"]
mod tests;
