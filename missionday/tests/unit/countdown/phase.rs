use super::*;
use crate::countdown::engine::compute_countdown;
use chrono::NaiveDate;

fn countdown(days: i64, is_target_date: bool) -> Countdown {
    Countdown {
        total_days_remaining: days,
        hours_remaining: 5,
        minutes_remaining: 0,
        seconds_remaining: 0,
        is_target_date,
        target: NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

#[test]
fn thresholds_match_default_table() {
    assert_eq!(resolve_phase(365, false), Phase::Far);
    assert_eq!(resolve_phase(101, false), Phase::Far);
    assert_eq!(resolve_phase(100, false), Phase::Approaching);
    assert_eq!(resolve_phase(31, false), Phase::Approaching);
    assert_eq!(resolve_phase(30, false), Phase::Imminent);
    assert_eq!(resolve_phase(1, false), Phase::Imminent);
    assert_eq!(resolve_phase(0, false), Phase::Imminent);
}

#[test]
fn target_date_overrides_day_count() {
    for days in [0, 1, 30, 100, 364, 365] {
        assert_eq!(resolve_phase(days, true), Phase::Arrived);
    }
}

#[test]
fn final_hours_get_their_own_line() {
    let table = PhaseTable::default();
    let r = table.read(&countdown(0, false));
    assert_eq!(r.phase, Phase::Imminent);
    assert!(r.final_hours);
    assert_eq!(r.dialog, table.dialog.final_hours);

    let r = table.read(&countdown(1, false));
    assert!(!r.final_hours);
    assert_eq!(r.dialog, table.dialog.imminent);
}

#[test]
fn arrived_is_never_final_hours() {
    let table = PhaseTable::default();
    let r = table.read(&countdown(0, true));
    assert_eq!(r.phase, Phase::Arrived);
    assert!(!r.final_hours);
    assert_eq!(r.dialog, table.dialog.arrived);
    assert_eq!(r.backdrop_filter, "grayscale(0%)");
}

#[test]
fn reading_from_real_countdowns() {
    let table = PhaseTable::default();
    let now = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        table.read(&compute_countdown(now, 1, 6).unwrap()).phase,
        Phase::Approaching
    );
    // 2025-03-01 + 101 days = 2025-06-10.
    assert_eq!(
        table.read(&compute_countdown(now, 10, 6).unwrap()).phase,
        Phase::Far
    );
    assert_eq!(
        table.read(&compute_countdown(now, 9, 6).unwrap()).phase,
        Phase::Approaching
    );
    assert_eq!(
        table.read(&compute_countdown(now, 1, 3).unwrap()).phase,
        Phase::Arrived
    );
}

#[test]
fn custom_thresholds_are_honored() {
    let table = PhaseTable {
        far_after_days: 10,
        approaching_after_days: 3,
        ..Default::default()
    };
    assert_eq!(table.phase(11, false), Phase::Far);
    assert_eq!(table.phase(10, false), Phase::Approaching);
    assert_eq!(table.phase(3, false), Phase::Imminent);
}

#[test]
fn validate_rejects_inverted_thresholds() {
    assert!(PhaseTable::default().validate().is_ok());
    let bad = PhaseTable {
        far_after_days: 30,
        approaching_after_days: 30,
        ..Default::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn phase_names_are_stable() {
    assert_eq!(Phase::Far.to_string(), "far");
    assert_eq!(
        serde_json::to_string(&Phase::Approaching).unwrap(),
        "\"approaching\""
    );
}
