use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::chroma::key::ChromaKey;
use crate::countdown::phase::PhaseTable;
use crate::foundation::error::{MissionError, MissionResult};

/// Tunables for the countdown page and its loading screen.
///
/// Every field has a default, so `{}` is a complete config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MissionConfig {
    /// Green-screen classification rule.
    pub chroma: ChromaKey,
    /// Phase thresholds and dialog.
    pub phases: PhaseTable,
    /// Countdown recompute interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Compositor animation-frame rate.
    pub refresh_hz: u32,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            chroma: ChromaKey::default(),
            phases: PhaseTable::default(),
            tick_interval_ms: 1000,
            refresh_hz: 60,
        }
    }
}

impl MissionConfig {
    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> MissionResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MissionError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> MissionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MissionError::config(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every section.
    pub fn validate(&self) -> MissionResult<()> {
        self.chroma.validate()?;
        self.phases.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(MissionError::validation("tick_interval_ms must be > 0"));
        }
        if self.refresh_hz == 0 {
            return Err(MissionError::validation("refresh_hz must be > 0"));
        }
        Ok(())
    }

    /// Countdown interval as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
