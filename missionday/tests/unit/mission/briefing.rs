use super::*;
use crate::mission::request::MissionForm;
use chrono::NaiveDate;

fn request(character: &str) -> MissionRequest {
    MissionForm {
        name: "Ann".to_owned(),
        day: "1".to_owned(),
        month: "6".to_owned(),
        character: character.to_owned(),
    }
    .validate()
    .unwrap()
}

fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn before_the_day_there_is_no_reveal() {
    let b = Briefing::at(&request("levi"), midnight(2025, 3, 1), &PhaseTable::default()).unwrap();
    assert_eq!(b.reading.phase, Phase::Approaching);
    assert!(b.reveal.is_none());
    assert_eq!(b.character.speaker, "CAPTAIN LEVI");
    assert!(b.incoming_message().starts_with("CAPTAIN LEVI: \""));
}

#[test]
fn on_the_day_the_reveal_appears() {
    let b = Briefing::at(&request("leon"), midnight(2025, 6, 1), &PhaseTable::default()).unwrap();
    assert_eq!(b.reading.phase, Phase::Arrived);
    assert_eq!(b.reveal.as_deref(), Some("HAPPY BIRTHDAY, Ann!"));
}

#[test]
fn unknown_character_speaks_as_default() {
    let b = Briefing::at(&request("zed"), midnight(2025, 3, 1), &PhaseTable::default()).unwrap();
    assert_eq!(b.character.id, "gojo");
}
