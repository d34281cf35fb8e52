use super::*;

#[test]
fn roster_ids_are_unique() {
    let mut ids: Vec<&str> = ROSTER.iter().chain(LEGACY.iter()).map(|c| c.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), ROSTER.len() + LEGACY.len());
    assert_eq!(ROSTER[0].id, DEFAULT_CHARACTER);
}

#[test]
fn legacy_ids_still_resolve() {
    assert_eq!(resolve_character("chrono").speaker, "AGENT CHRONO");
    assert!(search_characters("chrono").is_empty());
}

#[test]
fn unknown_ids_fall_back_to_default() {
    assert_eq!(resolve_character("nobody").id, DEFAULT_CHARACTER);
    assert_eq!(resolve_character("").id, DEFAULT_CHARACTER);
    assert!(find_character("nobody").is_none());
}

#[test]
fn search_matches_name_or_tagline_ignoring_case() {
    let hits: Vec<&str> = search_characters("titan").iter().map(|c| c.id).collect();
    assert_eq!(hits, ["eren"]);
    let hits: Vec<&str> = search_characters("LeOn").iter().map(|c| c.id).collect();
    assert_eq!(hits, ["leon"]);
    let hits: Vec<&str> = search_characters("expert").iter().map(|c| c.id).collect();
    assert_eq!(hits, ["leon"]);
    assert_eq!(search_characters("  ").len(), ROSTER.len());
}
