use std::env;

use powermap::{canonicalize_or_current, format_pct};

#[test]
fn canonicalize_or_current_handles_dot_and_missing_paths() {
    let cwd = env::current_dir().unwrap();
    assert_eq!(canonicalize_or_current(".").unwrap(), cwd);

    let missing = canonicalize_or_current("does-not-exist-yet").unwrap();
    assert_eq!(missing, cwd.join("does-not-exist-yet"));

    let dir = tempfile::tempdir().unwrap();
    let resolved = canonicalize_or_current(dir.path().to_str().unwrap()).unwrap();
    assert_eq!(resolved, dir.path().canonicalize().unwrap());
}

#[test]
fn percentages_print_with_one_decimal() {
    assert_eq!(format_pct(18.25), "18.2%");
    assert_eq!(format_pct(0.0), "0.0%");
    assert_eq!(format_pct(62.9), "62.9%");
}
