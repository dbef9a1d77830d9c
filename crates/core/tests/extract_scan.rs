use powermap_core::extract::{
    extract_literal, kebab_case, locate_literal, repair_to_json, script_body, ExtractError,
    LiteralTarget,
};
use serde_json::json;

#[test]
fn brackets_inside_strings_do_not_close_the_literal() {
    let source =
        r#"var DEPARTMENTS = [{"name": "a [nested] value"}, {"b": 'x]y'}]; var OTHER = [];"#;
    let span = locate_literal("DEPARTMENTS", source).expect("literal");
    assert_eq!(span, r#"[{"name": "a [nested] value"}, {"b": 'x]y'}]"#);
}

#[test]
fn escaped_quote_does_not_end_the_string() {
    let source = r#"const D = {"s": "a\"}b", "t": 1}; trailing();"#;
    let span = locate_literal("D", source).expect("literal");
    assert_eq!(span, r#"{"s": "a\"}b", "t": 1}"#);
}

#[test]
fn name_must_match_on_word_boundaries() {
    let source = "var MP_INFO_OLD = [1]; var XMP_INFO = [2]; var MP_INFO = [3];";
    assert_eq!(locate_literal("MP_INFO", source).expect("literal"), "[3]");
}

#[test]
fn declaration_keyword_is_optional() {
    assert_eq!(locate_literal("A", "A = {x: 1}").expect("literal"), "{x: 1}");
    assert_eq!(locate_literal("A", "let A={x: 1};").expect("literal"), "{x: 1}");
}

#[test]
fn missing_name_is_not_found() {
    let err = locate_literal("MISSING", "var X = [];").unwrap_err();
    assert!(matches!(err, ExtractError::NotFound { ref name } if name == "MISSING"));
}

#[test]
fn non_bracket_value_is_malformed() {
    let err = locate_literal("X", "var X = 42;").unwrap_err();
    assert!(matches!(err, ExtractError::MalformedLiteral { .. }));

    let err = locate_literal("X", "var X =").unwrap_err();
    assert!(matches!(err, ExtractError::MalformedLiteral { .. }));
}

#[test]
fn unterminated_literal_is_malformed() {
    let err = locate_literal("X", "var X = [1, [2, 3]").unwrap_err();
    match err {
        ExtractError::MalformedLiteral { name, reason } => {
            assert_eq!(name, "X");
            assert!(reason.contains("unterminated"), "reason: {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repair_quotes_bare_keys_and_drops_trailing_commas() {
    let repaired = repair_to_json("{a: 1, b: [1, 2,],\n  c_d: {e: true,},}");
    let value: serde_json::Value = serde_json::from_str(&repaired).expect("strict json");
    assert_eq!(value, json!({"a": 1, "b": [1, 2], "c_d": {"e": true}}));
}

#[test]
fn repair_is_idempotent() {
    let once = repair_to_json("{name: \"Alice\", roles: [\"a\", \"b\",],}");
    let twice = repair_to_json(&once);
    assert_eq!(once, twice);

    let strict = r#"{"a": [1, 2], "b": {"c": true}}"#;
    assert_eq!(repair_to_json(strict), strict);
}

#[test]
fn repair_leaves_single_quotes_for_the_parser_to_reject() {
    let (err, repaired) = extract_literal("BAD", "var BAD = {a: 'single'};").unwrap_err();
    assert!(matches!(err, ExtractError::Parse { .. }));
    assert_eq!(repaired.as_deref(), Some("{\"a\": 'single'}"));
}

#[test]
fn extract_literal_parses_repaired_roster() {
    let source = "var MP_INFO = {\n  \"Alice\": {con: \"Tottenham\", parlId: 123,},\n};";
    let value = extract_literal("MP_INFO", source).expect("parsed");
    assert_eq!(value, json!({"Alice": {"con": "Tottenham", "parlId": 123}}));
}

#[test]
fn extracted_documents_round_trip_with_order_and_unicode() {
    let source = "var CHANGELOG = {zeta: \"Sinn Féin\", alpha: [1, 2], mid: \"\u{2019}\"};";
    let value = extract_literal("CHANGELOG", source).expect("parsed");

    let keys: Vec<&str> = value.as_object().expect("object").keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);

    let text = serde_json::to_string_pretty(&value).expect("serialize");
    assert!(text.contains("Sinn Féin"));
    let back: serde_json::Value = serde_json::from_str(&text).expect("reparse");
    assert_eq!(back, value);
}

#[test]
fn script_body_returns_first_script_or_whole_text() {
    let html = "<html><head><script src=\"x.js\"></script></head></html>";
    assert_eq!(script_body(html), "");

    let html = "<html><SCRIPT type=\"text/javascript\">var A = [1];</SCRIPT></html>";
    assert_eq!(script_body(html), "var A = [1];");

    assert_eq!(script_body("var A = [1];"), "var A = [1];");
}

#[test]
fn kebab_case_handles_screaming_and_camel_names() {
    assert_eq!(kebab_case("MP_INFO"), "mp-info");
    assert_eq!(kebab_case("crossCutting"), "cross-cutting");
    assert_eq!(kebab_case("WPT"), "wpt");
}

#[test]
fn literal_target_file_names() {
    let target = LiteralTarget::new("LORDS_WHIPS");
    assert_eq!(target.file_name(), "lords-whips.json");
    assert_eq!(target.debug_file_name(), "_debug_lords-whips.json");

    let target = LiteralTarget::new("WEALTH_EST").with_file("wealth-estimates.json");
    assert_eq!(target.file_name(), "wealth-estimates.json");
}
