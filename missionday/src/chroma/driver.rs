use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::chroma::compositor::{Compositor, CompositorStats};
use crate::chroma::sink::{FrameSink, SinkConfig};
use crate::chroma::source::FrameSource;
use crate::chroma::surface::Surface;
use crate::foundation::error::{MissionError, MissionResult};

/// Scoped animation-frame loop around a [`Compositor`].
///
/// Each tick seeks the source to its played time (wall-clock time spent playing, so a pause
/// resumes where it stopped), composites the presented frame and hands it to the sink. Ticks
/// never overlap: a slow tick simply delays the next one. Dropping the loop (or calling
/// [`CompositorLoop::stop`]) ends the chain and joins the worker thread.
pub struct CompositorLoop<K> {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<MissionResult<(K, CompositorStats)>>>,
}

impl<K: FrameSink + 'static> CompositorLoop<K> {
    /// Start ticking at `refresh_hz`.
    pub fn spawn<S, T>(
        mut compositor: Compositor<S, T>,
        mut sink: K,
        refresh_hz: u32,
    ) -> MissionResult<Self>
    where
        S: FrameSource + 'static,
        T: Surface + Send + 'static,
    {
        if refresh_hz == 0 {
            return Err(MissionError::validation("refresh rate must be > 0"));
        }
        let interval = Duration::from_secs(1) / refresh_hz;
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = std::thread::Builder::new()
            .name("missionday-compositor".to_owned())
            .spawn(move || -> MissionResult<(K, CompositorStats)> {
                let (width, height) = compositor.source().native_size();
                sink.begin(SinkConfig {
                    width,
                    height,
                    fps: compositor.source().fps(),
                })?;

                let mut playhead = Playhead::new(Instant::now());
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    let playing = compositor.source().is_playing();
                    if let Some(played) = playhead.tick(Instant::now(), playing) {
                        compositor.source_mut().seek(played);
                    }
                    let outcome = match compositor.process_frame() {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            tracing::warn!(%err, "compositor tick failed");
                            continue;
                        }
                    };
                    if let Some(index) = outcome.index() {
                        sink.push_frame(index, compositor.surface().pixels())?;
                    }
                }

                sink.end()?;
                Ok((sink, compositor.stats()))
            })
            .map_err(|e| MissionError::Other(anyhow::Error::new(e)))?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Stop ticking and return the sink plus final counters.
    pub fn stop(mut self) -> MissionResult<(K, CompositorStats)> {
        self.shutdown()
            .ok_or_else(|| MissionError::keying("compositor loop already stopped"))?
    }

    /// `true` until the worker exits (stopped, or the sink failed).
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn shutdown(&mut self) -> Option<MissionResult<(K, CompositorStats)>> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let handle = self.handle.take()?;
        Some(
            handle
                .join()
                .unwrap_or_else(|_| Err(MissionError::keying("compositor thread panicked"))),
        )
    }
}

/// Wall-clock playback position that stands still while the source is paused.
#[derive(Clone, Copy, Debug)]
struct Playhead {
    played: Duration,
    last: Instant,
}

impl Playhead {
    fn new(now: Instant) -> Self {
        Self {
            played: Duration::ZERO,
            last: now,
        }
    }

    /// Advance to `now`, returning the seek position, or `None` while paused.
    fn tick(&mut self, now: Instant, playing: bool) -> Option<Duration> {
        let step = now.saturating_duration_since(self.last);
        self.last = now;
        if !playing {
            return None;
        }
        self.played += step;
        Some(self.played)
    }
}

impl<K> Drop for CompositorLoop<K> {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chroma/driver.rs"]
mod tests;
