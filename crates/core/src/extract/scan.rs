use std::sync::LazyLock;

use regex::Regex;

use super::ExtractError;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>(.*?)</script>").expect("valid script regex"));

/// Return the text of the first `<script>` block in an HTML document.
///
/// Sources that are not HTML (or contain no script block) are returned whole,
/// so the extractor can also run against a plain `.js` data file.
pub fn script_body(document: &str) -> &str {
    match SCRIPT_BLOCK.captures(document).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str(),
        None => document,
    }
}

/// Find the first `name = [ ... ]` / `name = { ... }` assignment in `source` and
/// return the bracketed literal, inclusive of both outer brackets.
///
/// Brackets inside single- or double-quoted strings never affect depth. A
/// backslash inside a string skips the following character unconditionally.
pub fn locate_literal<'a>(name: &str, source: &'a str) -> Result<&'a str, ExtractError> {
    let pattern = format!(r"(?:\b(?:var|let|const)\s+)?\b{}\s*=\s*", regex::escape(name));
    let re = Regex::new(&pattern).map_err(|err| ExtractError::MalformedLiteral {
        name: name.to_string(),
        reason: format!("invalid literal name: {err}"),
    })?;
    let found = re.find(source).ok_or_else(|| ExtractError::NotFound { name: name.to_string() })?;

    let start = found.end();
    let bytes = source.as_bytes();
    let (open, close) = match bytes.get(start) {
        Some(b'[') => (b'[', b']'),
        Some(b'{') => (b'{', b'}'),
        other => {
            let reason = match other {
                Some(_) => {
                    let ch = source[start..].chars().next().unwrap_or_default();
                    format!("expected '[' or '{{' after assignment, found {ch:?}")
                }
                None => "expected '[' or '{' after assignment, found end of input".to_string(),
            };
            return Err(ExtractError::MalformedLiteral { name: name.to_string(), reason });
        }
    };

    let end = matching_close(bytes, start, open, close).ok_or_else(|| {
        ExtractError::MalformedLiteral {
            name: name.to_string(),
            reason: format!("unterminated literal starting at byte {start}"),
        }
    })?;
    Ok(&source[start..=end])
}

/// Scan from the opener at `start` and return the index of the bracket that
/// brings depth back to zero.
///
/// Works on bytes: every character that matters here is ASCII, and UTF-8
/// continuation bytes can never be mistaken for one of them.
fn matching_close(bytes: &[u8], start: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        let ch = bytes[i];
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        } else if ch == b'"' || ch == b'\'' {
            i += 1;
            while i < bytes.len() && bytes[i] != ch {
                if bytes[i] == b'\\' {
                    i += 1;
                }
                i += 1;
            }
        }
        i += 1;
    }
    None
}
