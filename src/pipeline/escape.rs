//! Escaping of caller-supplied text into LaTeX-safe form.
//!
//! ## Why a single pass?
//!
//! Sequential find-and-replace over a substitution table corrupts its own
//! output: replacing `\` with `\textbackslash{}` and *then* replacing `{`
//! would mangle the braces the first substitution introduced. Scanning the
//! input once, character by character, gives each reserved character exactly
//! one substitution and makes it impossible to re-escape anything the
//! escaper itself emitted. The backslash therefore holds top priority by
//! construction — an input backslash is consumed before it can ever be read
//! as an escape marker.
//!
//! Escaping is **not** idempotent: running `escape_markup` over an already
//! escaped string escapes the markers themselves. The pipeline escapes each
//! string exactly once, in the renderer.

use once_cell::sync::Lazy;
use regex::Regex;

/// Escape every LaTeX-reserved character in `text`.
///
/// Substitutions:
///
/// | input | output |
/// |-------|--------|
/// | `\`   | `\textbackslash{}` |
/// | `&` `%` `$` `#` `_` `{` `}` | backslash-prefixed |
/// | `~`   | `\textasciitilde{}` |
/// | `^`   | `\textasciicircum{}` |
///
/// After substitution the decimal-comma repair of [`repair_percentages`]
/// runs over the result.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            other => out.push(other),
        }
    }
    repair_percentages(&out)
}

static RE_COMMA_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+),(\d+),(\d+)%").unwrap());

/// Repair the upstream decimal-comma artifact: `90,5,8%` → `90.58%`.
///
/// The text generator occasionally emits percentages with comma decimal
/// separators split across groups; the typesetting toolchain expects a
/// decimal point. Only the exact three-group comma run directly followed by
/// a percent sign is rewritten.
pub fn repair_percentages(text: &str) -> String {
    RE_COMMA_PERCENT.replace_all(text, "$1.$2$3%").into_owned()
}

/// Escape a URL for embedding in a `\url{…}` argument.
///
/// URLs are not prose: only backslashes and spaces are rewritten. Running a
/// URL through [`escape_markup`] would break it (e.g. `%` in query strings).
pub fn escape_url(url: &str) -> String {
    url.replace('\\', r"\textbackslash{}").replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_reserved_character() {
        assert_eq!(escape_markup("a&b"), r"a\&b");
        assert_eq!(escape_markup("100%"), r"100\%");
        assert_eq!(escape_markup("$5"), r"\$5");
        assert_eq!(escape_markup("#1"), r"\#1");
        assert_eq!(escape_markup("a_b"), r"a\_b");
        assert_eq!(escape_markup("{x}"), r"\{x\}");
        assert_eq!(escape_markup("~"), r"\textasciitilde{}");
        assert_eq!(escape_markup("^"), r"\textasciicircum{}");
        assert_eq!(escape_markup(r"a\b"), r"a\textbackslash{}b");
    }

    #[test]
    fn introduced_sequences_are_not_reescaped() {
        // The braces and backslashes the escaper emits must survive intact.
        assert_eq!(escape_markup(r"\"), r"\textbackslash{}");
        assert_eq!(escape_markup(r"\&"), r"\textbackslash{}\&");
    }

    #[test]
    fn only_reserved_runs_change() {
        let clean = "Plain prose with números, 42 and spaces.";
        assert_eq!(escape_markup(clean), clean);
    }

    #[test]
    fn reserved_only_input_has_no_bare_occurrence() {
        // Property from the pipeline contract: for inputs made entirely of
        // reserved characters, no reserved character may appear outside its
        // own escape sequence.
        let escaped = escape_markup(r"#$%&_{}~^\");
        let expected = r"\#\$\%\&\_\{\}\textasciitilde{}\textasciicircum{}\textbackslash{}";
        assert_eq!(escaped, expected);
    }

    #[test]
    fn repair_rewrites_comma_percent_runs() {
        assert_eq!(repair_percentages("90,5,8%"), "90.58%");
        assert_eq!(repair_percentages("up 12,3,4% today"), "up 12.34% today");
    }

    #[test]
    fn repair_leaves_ordinary_commas_alone() {
        assert_eq!(repair_percentages("1,2,3"), "1,2,3");
        assert_eq!(repair_percentages("50,5%"), "50,5%");
    }

    #[test]
    fn url_escape_touches_only_backslash_and_space() {
        assert_eq!(
            escape_url("https://e.org/a b"),
            "https://e.org/a%20b"
        );
        assert_eq!(
            escape_url(r"https://e.org/x\y?q=50%"),
            r"https://e.org/x\textbackslash{}y?q=50%"
        );
    }
}
