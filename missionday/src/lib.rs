//! Missionday turns a birthday into a themed countdown "mission".
//!
//! Two independent engines live here:
//!
//! - The countdown engine: [`compute_countdown`] to the next yearly occurrence of a day/month,
//!   [`resolve_phase`] and [`PhaseTable`] for the narrative phase, and a scoped [`Ticker`].
//! - The chroma-key compositor: a [`Compositor`] that draws a playing [`FrameSource`] onto a
//!   [`Surface`] and makes its green-screen background transparent, driven live by a
//!   [`CompositorLoop`] or offline through [`Compositor::run`].
//!
//! The [`MissionForm`]/[`MissionRequest`]/[`Briefing`] types tie a recipient, a character and a
//! countdown together for a share link.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chroma;
mod countdown;
mod foundation;
mod mission;

/// JSON configuration.
pub mod config;

pub use crate::foundation::core::{Fps, FrameIndex, PixelFrame};
pub use crate::foundation::error::{MissionError, MissionResult};

pub use crate::chroma::compositor::{Compositor, CompositorStats, TickOutcome};
pub use crate::chroma::driver::CompositorLoop;
pub use crate::chroma::key::ChromaKey;
pub use crate::chroma::media::{VideoSourceInfo, open_video, probe_video};
pub use crate::chroma::sink::{ChannelSink, FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::chroma::source::{FrameSource, LoopingFrames};
pub use crate::chroma::surface::{RasterSurface, Surface};

pub use crate::countdown::clock::{Clock, FixedClock, ManualClock, SystemClock};
pub use crate::countdown::display::{TimeBox, URGENT_DAYS};
pub use crate::countdown::engine::{Countdown, YearlyTarget, compute_countdown};
pub use crate::countdown::phase::{DialogTable, Phase, PhaseReading, PhaseTable, resolve_phase};
pub use crate::countdown::ticker::{CountdownTick, Ticker};

pub use crate::config::MissionConfig;
pub use crate::mission::briefing::{Briefing, birthday_message};
pub use crate::mission::character::{
    Character, DEFAULT_CHARACTER, ROSTER, Stats, find_character, resolve_character,
    search_characters,
};
pub use crate::mission::request::{MISSION_PREFIX, MissionForm, MissionRequest};
