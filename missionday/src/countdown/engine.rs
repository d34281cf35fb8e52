use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::foundation::error::{MissionError, MissionResult};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A yearly recurring day/month, e.g. a birthday.
///
/// Always in range: construction and deserialization both go through [`YearlyTarget::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawYearlyTarget")]
pub struct YearlyTarget {
    day: u32,
    month: u32,
}

#[derive(serde::Deserialize)]
struct RawYearlyTarget {
    day: u32,
    month: u32,
}

impl TryFrom<RawYearlyTarget> for YearlyTarget {
    type Error = MissionError;

    fn try_from(raw: RawYearlyTarget) -> MissionResult<Self> {
        Self::new(raw.day, raw.month)
    }
}

impl YearlyTarget {
    /// Check the ranges the date arithmetic relies on.
    ///
    /// Days past the end of a shorter month are accepted and roll over into the next month.
    pub fn new(day: u32, month: u32) -> MissionResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(MissionError::validation(format!(
                "month must be 1-12, got {month}"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(MissionError::validation(format!(
                "day must be 1-31, got {day}"
            )));
        }
        Ok(Self { day, month })
    }

    /// Day of month, 1-31.
    pub fn day(self) -> u32 {
        self.day
    }

    /// Month, 1-12.
    pub fn month(self) -> u32 {
        self.month
    }

    /// Local midnight starting this target's day in `year`, after rollover.
    pub fn occurrence(self, year: i32) -> MissionResult<NaiveDateTime> {
        let first = NaiveDate::from_ymd_opt(year, self.month, 1)
            .ok_or_else(|| MissionError::validation(format!("year {year} is out of range")))?;
        let offset = self.day.checked_sub(1).ok_or_else(|| {
            MissionError::validation(format!("day must be 1-31, got {}", self.day))
        })?;
        first
            .checked_add_days(Days::new(u64::from(offset)))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| MissionError::validation(format!("year {year} is out of range")))
    }

    /// Return `true` when `now` falls on this day and month (year ignored).
    pub fn is_today(self, now: NaiveDateTime) -> bool {
        now.day() == self.day && now.month() == self.month
    }

    /// Time remaining from `now` until the next occurrence.
    pub fn countdown(self, now: NaiveDateTime) -> MissionResult<Countdown> {
        let mut target = self.occurrence(now.year())?;
        if now > target {
            target = self.occurrence(now.year() + 1)?;
        }

        let diff_ms = (target - now).num_milliseconds();
        Ok(Countdown {
            total_days_remaining: diff_ms / MS_PER_DAY,
            hours_remaining: ((diff_ms / MS_PER_HOUR) % 24) as u32,
            minutes_remaining: ((diff_ms / MS_PER_MINUTE) % 60) as u32,
            seconds_remaining: ((diff_ms / MS_PER_SECOND) % 60) as u32,
            is_target_date: self.is_today(now),
            target,
        })
    }
}

/// Time left until the next occurrence of a [`YearlyTarget`].
///
/// `is_target_date` compares calendar day and month only. On the day itself the next occurrence
/// has already rolled to the following year, so the numeric fields count toward next year while
/// `is_target_date` is `true`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Countdown {
    /// Whole days remaining.
    pub total_days_remaining: i64,
    /// Hours past the whole days, 0-23.
    pub hours_remaining: u32,
    /// Minutes past the whole hours, 0-59.
    pub minutes_remaining: u32,
    /// Seconds past the whole minutes, 0-59.
    pub seconds_remaining: u32,
    /// `true` when today's day and month match the target.
    pub is_target_date: bool,
    /// The occurrence being counted down to.
    pub target: NaiveDateTime,
}

/// Compute the countdown from `now` to the next `day`/`month`.
#[tracing::instrument(level = "trace")]
pub fn compute_countdown(now: NaiveDateTime, day: u32, month: u32) -> MissionResult<Countdown> {
    YearlyTarget::new(day, month)?.countdown(now)
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/engine.rs"]
mod tests;
