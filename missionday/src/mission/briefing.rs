use chrono::NaiveDateTime;

use crate::countdown::engine::Countdown;
use crate::countdown::phase::{Phase, PhaseReading, PhaseTable};
use crate::foundation::error::MissionResult;
use crate::mission::character::{Character, resolve_character};
use crate::mission::request::MissionRequest;

/// Everything the countdown page shows for one tick.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Briefing {
    /// Recipient name.
    pub name: String,
    /// Character delivering the dialog.
    pub character: &'static Character,
    /// Time remaining.
    pub countdown: Countdown,
    /// Phase, dialog and backdrop treatment.
    pub reading: PhaseReading,
    /// Birthday message, present only once the day has arrived.
    pub reveal: Option<String>,
}

impl Briefing {
    /// Build the page state from a countdown computed elsewhere (e.g. a ticker).
    pub fn from_countdown(req: &MissionRequest, countdown: Countdown, table: &PhaseTable) -> Self {
        let reading = table.read(&countdown);
        let reveal = (reading.phase == Phase::Arrived).then(|| birthday_message(&req.name));
        Self {
            name: req.name.clone(),
            character: resolve_character(&req.character),
            countdown,
            reading,
            reveal,
        }
    }

    /// Compute the page state at `now`.
    pub fn at(req: &MissionRequest, now: NaiveDateTime, table: &PhaseTable) -> MissionResult<Self> {
        let countdown = req.target.countdown(now)?;
        Ok(Self::from_countdown(req, countdown, table))
    }

    /// Dialog line prefixed with its speaker.
    pub fn incoming_message(&self) -> String {
        format!("{}: \"{}\"", self.character.speaker, self.reading.dialog)
    }
}

/// The reveal line shown on the day itself.
pub fn birthday_message(name: &str) -> String {
    format!("HAPPY BIRTHDAY, {name}!")
}

#[cfg(test)]
#[path = "../../tests/unit/mission/briefing.rs"]
mod tests;
