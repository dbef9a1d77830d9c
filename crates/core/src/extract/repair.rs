use std::sync::LazyLock;

use regex::Regex;

/// A bareword key directly after `{`, `,` or a line break.
static BARE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([{,\n])\s*(\w+)\s*:").expect("valid bare key regex"));

/// A comma followed (modulo whitespace) by a closing bracket.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("valid trailing comma regex"));

/// Rewrite a JS-style literal into strict JSON text.
///
/// Only two textual rewrites are applied: bareword keys are double-quoted and
/// trailing commas are dropped. Anything else (single-quoted strings, comments,
/// `undefined`) is left alone and surfaces as a parse failure, which the caller
/// records as a debug artifact.
///
/// The rewrites do not know about string literals, so a `, word:` sequence
/// inside a string value is rewritten too.
pub fn repair_to_json(raw: &str) -> String {
    let quoted = BARE_KEY.replace_all(raw, "$1\"$2\":");
    TRAILING_COMMA.replace_all(&quoted, "$1").into_owned()
}
