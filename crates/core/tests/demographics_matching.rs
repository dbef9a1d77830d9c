use powermap_core::demographics::tabular::Cell;
use powermap_core::demographics::{
    derive_nonwhite, fuzzy_key, fuzzy_match, link_ministers, manual::manual_records,
    minister_index, normalize_name, round1, similarity, validate_against_roster,
    ConstituencyRecord, DEFAULT_FUZZY_THRESHOLD,
};
use powermap_core::model::{roster_from_value, Roster, RosterEntry};
use serde_json::json;

fn record(name: &str) -> ConstituencyRecord {
    ConstituencyRecord::from_percentages(name, Some(50.0), None, None, None, None)
}

#[test]
fn nonwhite_is_derived_from_white_share() {
    let r = ConstituencyRecord::from_percentages("A", Some(60.0), None, None, None, None);
    assert_eq!(r.nonwhite_pct, Some(40.0));
}

#[test]
fn nonwhite_falls_back_to_minority_sum() {
    let r = ConstituencyRecord::from_percentages(
        "B",
        None,
        Some(10.0),
        Some(5.0),
        Some(3.0),
        Some(2.0),
    );
    assert_eq!(r.nonwhite_pct, Some(20.0));

    let partial =
        ConstituencyRecord::from_percentages("C", None, Some(10.0), Some(5.0), None, Some(2.0));
    assert_eq!(partial.nonwhite_pct, None);
    assert_eq!(derive_nonwhite(&partial), None);
}

#[test]
fn nonwhite_is_rounded_to_one_decimal() {
    let r = ConstituencyRecord::from_percentages("D", Some(37.1), None, None, None, None);
    assert_eq!(r.nonwhite_pct, Some(62.9));
}

#[test]
fn rounding_breaks_exact_halves_to_even() {
    let r = ConstituencyRecord::from_percentages("E", Some(37.75), None, None, None, None);
    assert_eq!(r.nonwhite_pct, Some(62.2));
    assert_eq!(Cell::Number(12.25).as_percentage(), Some(12.2));
    assert_eq!(Cell::from("12.25").as_percentage(), Some(12.2));
    assert_eq!(round1(0.35), 0.3);
    assert_eq!(round1(0.36), 0.4);
}

#[test]
fn numeric_cells_render_with_decimal_point() {
    assert_eq!(Cell::Number(1.0).as_text().as_deref(), Some("1.0"));
    assert_eq!(Cell::Number(14.5).as_text().as_deref(), Some("14.5"));
    assert_eq!(Cell::Number(0.0).as_text(), None);
}

#[test]
fn normalization_folds_typographic_apostrophes() {
    assert_eq!(normalize_name("Queen's Park"), normalize_name("Queen\u{2019}s Park"));
    assert_eq!(normalize_name("Queen\u{2018}s Park"), "Queen's Park");
    assert_eq!(normalize_name("Ynys Môn"), "Ynys Môn");
}

#[test]
fn fuzzy_key_lowercases_and_spells_out_ampersand() {
    assert_eq!(fuzzy_key("  Brighton, Kemptown & Peacehaven "), "brighton kemptown and peacehaven");
}

#[test]
fn similarity_is_a_ratio() {
    assert_eq!(similarity("abc", "abc"), 1.0);
    assert_eq!(similarity("abc", "xyz"), 0.0);
    assert_eq!(similarity("", ""), 1.0);
}

#[test]
fn score_exactly_at_threshold_matches() {
    let (matched, score) = fuzzy_match("abcdefghij", ["abcdefgxyz"], 0.7);
    assert_eq!(score, 0.7);
    assert_eq!(matched, Some("abcdefgxyz"));

    let (matched, score) = fuzzy_match("abcdefghij", ["abcdefghiz"], 0.9);
    assert_eq!(score, 0.9);
    assert_eq!(matched, Some("abcdefghiz"));
}

#[test]
fn zero_score_candidate_is_never_returned() {
    let (matched, score) = fuzzy_match("abc", ["xyz", "qrs"], 0.0);
    assert_eq!(matched, None);
    assert_eq!(score, 0.0);
}

#[test]
fn fuzzy_match_cardiff_south_picks_cardiff_north() {
    let candidates = ["Cardiff South and Penarth", "Cardiff North"];
    let (matched, score) = fuzzy_match("Cardiff South", candidates, 0.80);

    // "cardiff south" shares 11 of 26 characters with "cardiff north" and
    // only reaches 26/38 against the longer name.
    assert_eq!(matched, Some("Cardiff North"));
    assert!(matched.is_some());
    assert_eq!(score, 22.0 / 26.0);
}

#[test]
fn fuzzy_match_reports_best_score_on_miss() {
    let (matched, score) = fuzzy_match("Cardiff South", ["Cardiff South and Penarth"], 0.80);
    assert_eq!(matched, None);
    assert_eq!(score, 26.0 / 38.0);
    assert!(score < DEFAULT_FUZZY_THRESHOLD);
}

#[test]
fn fuzzy_match_ties_keep_first_candidate() {
    let (matched, _) = fuzzy_match("abc", ["abd", "abe"], 0.5);
    assert_eq!(matched, Some("abd"));

    let (matched, score) = fuzzy_match("abc", std::iter::empty(), 0.5);
    assert_eq!(matched, None);
    assert_eq!(score, 0.0);
}

#[test]
fn link_ministers_is_exact_after_normalization() {
    let roster = roster_from_value(json!({"Alice": {"constituency": "Tottenham"}})).unwrap();
    let linked = link_ministers(vec![record("Tottenham"), record("Hackney")], &roster);

    assert_eq!(linked[0].ministers, vec!["Alice".to_string()]);
    assert!(linked[1].ministers.is_empty());
}

#[test]
fn link_ministers_keeps_roster_order_and_matches_smart_quotes() {
    let mut roster = Roster::new();
    roster.insert("Zed".into(), RosterEntry::default().with_constituency("Queen\u{2019}s Park"));
    roster.insert("Amy".into(), RosterEntry::default().with_constituency("Queen's Park"));
    roster.insert("Lord X".into(), RosterEntry::default());

    let index = minister_index(&roster);
    assert_eq!(index.len(), 1);

    let linked = link_ministers(vec![record("Queen's Park"), record("Queens Park")], &roster);
    assert_eq!(linked[0].ministers, vec!["Zed".to_string(), "Amy".to_string()]);
    // Near misses are never linked.
    assert!(linked[1].ministers.is_empty());
}

#[test]
fn validation_separates_exact_fuzzy_and_missing() {
    let roster = roster_from_value(json!({
        "Alice": {"con": "Tottenham"},
        "Bob": {"con": "Cardiff South"},
        "Carol": {"con": "Orkney and Shetland"},
        "Dan": {"con": "Tottenham"},
        "Eve": {}
    }))
    .unwrap();
    let records = vec![record("Tottenham"), record("Cardiff North"), record("Hackney")];

    let report = validate_against_roster(&records, &roster, 0.80);
    assert_eq!(report.roster_constituencies, 3);
    assert_eq!(report.demographics_entries, 3);
    assert_eq!(report.exact.iter().collect::<Vec<_>>(), ["Tottenham"]);
    assert_eq!(report.fuzzy.len(), 1);
    assert_eq!(report.fuzzy[0].roster_name, "Cardiff South");
    assert_eq!(report.fuzzy[0].candidate, "Cardiff North");
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].roster_name, "Orkney and Shetland");
    assert_eq!(report.unmatched(), 2);
}

#[test]
fn manual_table_derives_every_nonwhite_share() {
    let records = manual_records();
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.nonwhite_pct.is_some()));

    let tottenham = records.iter().find(|r| r.name == "Tottenham").expect("Tottenham");
    assert_eq!(tottenham.nonwhite_pct, Some(62.9));
}
