//! Annotation block parser
//!
//! Turns the body of a `/** ... */` block into a field → value mapping.
//! Only lines of the form `@field value` contribute; prose lines are
//! ignored and a repeated field keeps its last value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::Annotations;

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*))?$").expect("valid annotation pattern")
});

/// Parse an annotation block.
///
/// `block` may include or omit the comment delimiters; leading `*`
/// decorations are stripped from every line.
pub fn parse_annotations(block: &str) -> Annotations {
    let mut annotations = Annotations::new();

    for raw in block.lines() {
        let line = raw.trim_matches(|c: char| c == '*' || c == '/' || c.is_whitespace());
        if let Some(caps) = FIELD_RE.captures(line) {
            let field = &caps[1];
            let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            annotations.insert(field, value);
        }
    }

    annotations
}
