use crate::countdown::engine::Countdown;
use crate::foundation::error::{MissionError, MissionResult};

/// Urgency of a countdown, used to pick flavor text and visual treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// More than `far_after_days` left.
    Far,
    /// Within `far_after_days`, beyond `approaching_after_days`.
    Approaching,
    /// Within `approaching_after_days`, including the final hours.
    Imminent,
    /// Today is the day.
    Arrived,
}

impl Phase {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Far => "far",
            Phase::Approaching => "approaching",
            Phase::Imminent => "imminent",
            Phase::Arrived => "arrived",
        }
    }

    /// CSS filter applied to the character backdrop.
    pub fn backdrop_filter(self) -> &'static str {
        match self {
            Phase::Far => "grayscale(100%) brightness(0.4)",
            Phase::Approaching => "grayscale(100%) contrast(120%) brightness(0.5)",
            Phase::Imminent => "grayscale(100%) contrast(150%) sepia(40%) brightness(0.3)",
            Phase::Arrived => "grayscale(0%)",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialog line per phase.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialogTable {
    /// Line for [`Phase::Far`].
    pub far: String,
    /// Line for [`Phase::Approaching`].
    pub approaching: String,
    /// Line for [`Phase::Imminent`].
    pub imminent: String,
    /// Line for the last day before the target (0 whole days left).
    pub final_hours: String,
    /// Line for [`Phase::Arrived`].
    pub arrived: String,
}

impl Default for DialogTable {
    fn default() -> Self {
        Self {
            far: "The road is still long. Save your energy.".to_owned(),
            approaching: "The target is on the radar. Focus!".to_owned(),
            imminent: "Time is almost up! Maximum celebration!".to_owned(),
            final_hours: "Only hours left! Is everyone in position?!".to_owned(),
            arrived: "Mission accomplished.".to_owned(),
        }
    }
}

/// Day-count thresholds and dialog used to classify a [`Countdown`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhaseTable {
    /// Strictly more days than this is [`Phase::Far`].
    pub far_after_days: i64,
    /// Strictly more days than this (and not far) is [`Phase::Approaching`].
    pub approaching_after_days: i64,
    /// Dialog lines.
    pub dialog: DialogTable,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            far_after_days: 100,
            approaching_after_days: 30,
            dialog: DialogTable::default(),
        }
    }
}

/// Classification of one countdown tick.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseReading {
    /// Resolved phase.
    pub phase: Phase,
    /// 0 whole days left and not yet the target date.
    pub final_hours: bool,
    /// Dialog line for this tick.
    pub dialog: String,
    /// Backdrop treatment for this phase.
    pub backdrop_filter: &'static str,
}

impl PhaseTable {
    /// Reject thresholds that would make a phase unreachable.
    pub fn validate(&self) -> MissionResult<()> {
        if self.approaching_after_days < 0 {
            return Err(MissionError::validation(
                "approaching_after_days must be >= 0",
            ));
        }
        if self.far_after_days <= self.approaching_after_days {
            return Err(MissionError::validation(
                "far_after_days must be greater than approaching_after_days",
            ));
        }
        Ok(())
    }

    /// Map remaining days to a phase. The target date overrides any day count.
    pub fn phase(&self, total_days_remaining: i64, is_target_date: bool) -> Phase {
        if is_target_date {
            Phase::Arrived
        } else if total_days_remaining > self.far_after_days {
            Phase::Far
        } else if total_days_remaining > self.approaching_after_days {
            Phase::Approaching
        } else {
            Phase::Imminent
        }
    }

    /// Classify a countdown and pick its dialog line.
    pub fn read(&self, countdown: &Countdown) -> PhaseReading {
        let phase = self.phase(countdown.total_days_remaining, countdown.is_target_date);
        let final_hours = phase == Phase::Imminent && countdown.total_days_remaining <= 0;
        let dialog = match phase {
            Phase::Far => &self.dialog.far,
            Phase::Approaching => &self.dialog.approaching,
            Phase::Imminent if final_hours => &self.dialog.final_hours,
            Phase::Imminent => &self.dialog.imminent,
            Phase::Arrived => &self.dialog.arrived,
        };
        PhaseReading {
            phase,
            final_hours,
            dialog: dialog.clone(),
            backdrop_filter: phase.backdrop_filter(),
        }
    }
}

/// Map remaining days to a phase with the default thresholds (100 and 30 days).
pub fn resolve_phase(total_days_remaining: i64, is_target_date: bool) -> Phase {
    PhaseTable::default().phase(total_days_remaining, is_target_date)
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/phase.rs"]
mod tests;
