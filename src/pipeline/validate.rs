//! Structural validation of the rendered document.
//!
//! ## Why scan the rendered markup, not the raw input?
//!
//! The renderer is the last writer: only its output proves whether escaping
//! actually happened. The scan is limited to the substring between the body
//! heading and the auxiliary heading — the auxiliary block is assembled from
//! a controlled template and is trusted, while the body originates from an
//! upstream free-text generator and is where injection defects appear.
//!
//! This is a heuristic lexical pass, not a LaTeX parser. It targets the
//! failure modes actually observed from the upstream generator and exists to
//! reject malformed content before the comparatively expensive external
//! compile runs.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::pipeline::language::LanguageBundle;

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// One reason per detected defect, in detection order.
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Characters that must always carry the escape marker inside the body.
const RESERVED: &[char] = &['#', '$', '%', '&', '_', '{', '}', '~', '^'];

// Matches a decimal-comma percentage that survived escaping. The scanned
// text is post-escaping, so a percent sign normally appears as `\%`; the
// optional marker also lets the pattern catch a bare `%` from pre-escaped
// upstream input.
static RE_MALFORMED_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+,\d+,\d+\\?%").unwrap());

/// Scan the body section of `rendered` for structural defects.
///
/// All checks run and their reasons accumulate; only a missing section
/// marker short-circuits, since there is nothing left to scan.
pub fn validate(rendered: &str, bundle: &LanguageBundle) -> ValidationOutcome {
    let body = match body_section(rendered, bundle) {
        Some(body) => body,
        None => {
            return ValidationOutcome::Invalid(vec![
                "body section markers not found in rendered document".to_string(),
            ])
        }
    };

    let mut reasons = Vec::new();

    if RE_MALFORMED_PERCENT.is_match(body) {
        reasons.push("malformed percentage (e.g. 90,5,8%)".to_string());
    }

    if body.matches('"').count() % 2 != 0 {
        reasons.push("unterminated double-quoted span".to_string());
    }

    let mut prev: Option<char> = None;
    for (offset, ch) in body.chars().enumerate() {
        if RESERVED.contains(&ch) && prev != Some('\\') {
            reasons.push(format!(
                "unescaped special character '{ch}' at offset {offset}"
            ));
        }
        prev = Some(ch);
    }

    if reasons.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(reasons)
    }
}

/// Slice out the text between the body heading and the auxiliary heading.
fn body_section<'a>(rendered: &'a str, bundle: &LanguageBundle) -> Option<&'a str> {
    let open = format!("\\section*{{{}}}", bundle.heading_body);
    let close = format!("\\section*{{{}}}", bundle.heading_extra);

    let start = rendered.find(&open)? + open.len();
    let rest = &rendered[start..];
    let end = rest.find(&close)?;
    Some(rest[..end].trim())
}
