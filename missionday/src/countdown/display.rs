use crate::countdown::engine::Countdown;

/// Days below this count flag the day box as urgent.
pub const URGENT_DAYS: i64 = 7;

/// One cell of the countdown clock.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimeBox {
    /// Value padded to at least two digits.
    pub value: String,
    /// Short unit label.
    pub label: &'static str,
    /// Drawn with the urgent treatment.
    pub urgent: bool,
}

impl Countdown {
    /// Days, hours, minutes and seconds as clock cells. Seconds are always urgent.
    pub fn time_boxes(&self) -> [TimeBox; 4] {
        [
            TimeBox {
                value: pad2(self.total_days_remaining),
                label: "DAYS",
                urgent: self.total_days_remaining < URGENT_DAYS,
            },
            TimeBox {
                value: pad2(i64::from(self.hours_remaining)),
                label: "HRS",
                urgent: false,
            },
            TimeBox {
                value: pad2(i64::from(self.minutes_remaining)),
                label: "MIN",
                urgent: false,
            },
            TimeBox {
                value: pad2(i64::from(self.seconds_remaining)),
                label: "SEC",
                urgent: true,
            },
        ]
    }

    /// `DDD:HH:MM:SS` style one-liner.
    pub fn clock_line(&self) -> String {
        self.time_boxes()
            .iter()
            .map(|b| b.value.as_str())
            .collect::<Vec<_>>()
            .join(":")
    }
}

fn pad2(v: i64) -> String {
    format!("{v:02}")
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/display.rs"]
mod tests;
