use std::time::Duration;

use crate::foundation::core::{Fps, FrameIndex, PixelFrame};
use crate::foundation::error::{MissionError, MissionResult};

/// A playing clip that presents one frame at a time.
///
/// The presented [`FrameIndex`] counts frames since playback started and keeps increasing
/// across loop iterations, so consumers can tell a new frame from one they already saw.
pub trait FrameSource: Send {
    /// Native `(width, height)` of the clip.
    fn native_size(&self) -> (u32, u32);

    /// Native frame rate of the clip.
    fn fps(&self) -> Fps;

    /// `false` while paused or after a non-looping clip ended.
    fn is_playing(&self) -> bool;

    /// The frame currently presented, if any.
    fn presented(&self) -> Option<(FrameIndex, &PixelFrame)>;

    /// Step the playhead forward by one frame.
    fn advance(&mut self);

    /// Move the playhead to `elapsed` time since playback started.
    fn seek(&mut self, elapsed: Duration);
}

/// A decoded clip held in memory. Loops by default, like a muted autoplay video.
#[derive(Clone, Debug)]
pub struct LoopingFrames {
    frames: Vec<PixelFrame>,
    fps: Fps,
    presented: FrameIndex,
    looping: bool,
    paused: bool,
    ended: bool,
}

impl LoopingFrames {
    /// Build a clip; every frame must share the first frame's size.
    pub fn new(frames: Vec<PixelFrame>, fps: Fps) -> MissionResult<Self> {
        let Some(first) = frames.first() else {
            return Err(MissionError::media("clip has no frames"));
        };
        let size = (first.width, first.height);
        if let Some(bad) = frames.iter().position(|f| (f.width, f.height) != size) {
            return Err(MissionError::media(format!(
                "clip frame {bad} is {}x{}, expected {}x{}",
                frames[bad].width, frames[bad].height, size.0, size.1
            )));
        }
        Ok(Self {
            frames,
            fps,
            presented: FrameIndex(0),
            looping: true,
            paused: false,
            ended: false,
        })
    }

    /// Enable or disable wrap-around at the end of the clip.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Pause playback; the presented frame is kept.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume playback.
    pub fn play(&mut self) {
        self.paused = false;
    }

    /// Return `true` after a non-looping clip ran past its last frame.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    fn move_to(&mut self, idx: u64) {
        let len = self.frames.len() as u64;
        if !self.looping && idx >= len {
            self.presented = FrameIndex(len - 1);
            self.ended = true;
            return;
        }
        self.presented = FrameIndex(idx);
    }
}

impl FrameSource for LoopingFrames {
    fn native_size(&self) -> (u32, u32) {
        (self.frames[0].width, self.frames[0].height)
    }

    fn fps(&self) -> Fps {
        self.fps
    }

    fn is_playing(&self) -> bool {
        !self.paused && !self.ended
    }

    fn presented(&self) -> Option<(FrameIndex, &PixelFrame)> {
        let pos = (self.presented.0 % self.frames.len() as u64) as usize;
        self.frames.get(pos).map(|f| (self.presented, f))
    }

    fn advance(&mut self) {
        if self.ended {
            return;
        }
        self.move_to(self.presented.0.saturating_add(1));
    }

    fn seek(&mut self, elapsed: Duration) {
        if self.ended {
            return;
        }
        let idx = self.fps.secs_to_frames_floor(elapsed.as_secs_f64());
        self.move_to(idx);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/source.rs"]
mod tests;
