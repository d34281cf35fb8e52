use crate::chroma::key::ChromaKey;
use crate::chroma::sink::{FrameSink, SinkConfig};
use crate::chroma::source::FrameSource;
use crate::chroma::surface::Surface;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::MissionResult;

/// Frames at or above this pixel count are keyed on the rayon pool.
const PAR_MIN_PIXELS: usize = 256 * 256;

/// What one animation tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Source paused, ended, or still presenting an already processed frame.
    Idle,
    /// The frame was drawn and its background made transparent.
    Keyed {
        /// Source frame that was composited.
        index: FrameIndex,
        /// Number of pixels whose alpha was zeroed.
        keyed: usize,
    },
    /// The frame was drawn but readback failed; it stays opaque.
    Unkeyed {
        /// Source frame that was composited.
        index: FrameIndex,
    },
}

impl TickOutcome {
    /// Index of the composited frame, if this tick produced one.
    pub fn index(self) -> Option<FrameIndex> {
        match self {
            Self::Idle => None,
            Self::Keyed { index, .. } | Self::Unkeyed { index } => Some(index),
        }
    }
}

/// Counters accumulated across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositorStats {
    /// Ticks that produced no frame.
    pub idle_ticks: u64,
    /// Frames keyed successfully.
    pub keyed_frames: u64,
    /// Frames left opaque because pixel access failed.
    pub unkeyed_frames: u64,
    /// Surface resizes to follow the source size.
    pub resizes: u64,
}

/// Draws a playing [`FrameSource`] onto a [`Surface`] and keys out its green background.
pub struct Compositor<S, T> {
    source: S,
    surface: T,
    key: ChromaKey,
    last: Option<FrameIndex>,
    stats: CompositorStats,
}

impl<S: FrameSource, T: Surface> Compositor<S, T> {
    /// Create a compositor using `key` to classify background pixels.
    pub fn new(source: S, surface: T, key: ChromaKey) -> Self {
        Self {
            source,
            surface,
            key,
            last: None,
            stats: CompositorStats::default(),
        }
    }

    /// Borrow the source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the source (play/pause/seek).
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Borrow the surface holding the latest composited frame.
    pub fn surface(&self) -> &T {
        &self.surface
    }

    /// Counters so far.
    pub fn stats(&self) -> CompositorStats {
        self.stats
    }

    /// Release the source and surface.
    pub fn into_parts(self) -> (S, T) {
        (self.source, self.surface)
    }

    /// Run one animation tick.
    ///
    /// Pixel readback and write-back failures are swallowed: the raw frame stays on the surface
    /// and the next tick tries again. Only resize and draw failures are returned.
    pub fn process_frame(&mut self) -> MissionResult<TickOutcome> {
        if !self.source.is_playing() {
            self.stats.idle_ticks += 1;
            return Ok(TickOutcome::Idle);
        }
        let Some((index, frame)) = self.source.presented() else {
            self.stats.idle_ticks += 1;
            return Ok(TickOutcome::Idle);
        };
        if self.last == Some(index) {
            self.stats.idle_ticks += 1;
            return Ok(TickOutcome::Idle);
        }

        if self.surface.size() != (frame.width, frame.height) {
            tracing::debug!(
                width = frame.width,
                height = frame.height,
                "resizing surface to source"
            );
            self.surface.resize(frame.width, frame.height)?;
            self.stats.resizes += 1;
        }
        self.surface.draw(frame)?;
        self.last = Some(index);

        match key_surface(&mut self.surface, &self.key) {
            Ok(keyed) => {
                self.stats.keyed_frames += 1;
                tracing::trace!(frame = index.0, keyed, "keyed frame");
                Ok(TickOutcome::Keyed { index, keyed })
            }
            Err(err) => {
                self.stats.unkeyed_frames += 1;
                tracing::debug!(frame = index.0, %err, "chroma key skipped");
                Ok(TickOutcome::Unkeyed { index })
            }
        }
    }

    /// Composite up to `max_frames` frames, stepping the source one frame at a time.
    ///
    /// Stops early when the source stops playing. Used for offline keying of whole clips.
    #[tracing::instrument(skip(self, sink))]
    pub fn run(
        &mut self,
        max_frames: u64,
        sink: &mut dyn FrameSink,
    ) -> MissionResult<CompositorStats> {
        let (width, height) = self.source.native_size();
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.source.fps(),
        })?;

        let mut done = 0u64;
        while done < max_frames && self.source.is_playing() {
            if let Some(index) = self.process_frame()?.index() {
                sink.push_frame(index, self.surface.pixels())?;
                done += 1;
            }
            self.source.advance();
        }

        sink.end()?;
        Ok(self.stats)
    }
}

fn key_surface<T: Surface>(surface: &mut T, key: &ChromaKey) -> MissionResult<usize> {
    let mut frame = surface.read_pixels()?;
    let keyed = if frame.pixel_count() >= PAR_MIN_PIXELS {
        key.key_in_place_par(&mut frame.data)?
    } else {
        key.key_in_place(&mut frame.data)?
    };
    surface.write_pixels(frame)?;
    Ok(keyed)
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/compositor.rs"]
mod tests;
