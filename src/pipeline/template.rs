//! LaTeX document assembly.
//!
//! Pure text construction: the renderer escapes the caller-supplied title
//! and body, builds the auxiliary item block, and splices both into a fixed
//! preamble. It performs no validation and no I/O — defect detection belongs
//! to the validator, which runs on this function's output.
//!
//! The preamble is parameterized only by the bundle's babel locale and the
//! two section headings; everything else (document class, packages, margins)
//! is deliberately constant so every archived document shares one layout.

use crate::pipeline::escape::{escape_markup, escape_url};
use crate::pipeline::language::LanguageBundle;
use crate::request::{DocumentRequest, EnrichedContent};

/// Render a complete LaTeX document for `request`.
///
/// `title` and `body` pass through the general escaper exactly once here.
/// Recommendation targets are URLs, not prose, and only pass through the
/// URL escape.
pub fn render(request: &DocumentRequest, bundle: &LanguageBundle) -> String {
    let title = escape_markup(&request.title);
    let body = escape_markup(&request.body);
    let items = render_extra_items(request.extra.as_ref(), bundle);

    format!(
        "\\documentclass[12pt]{{article}}\n\
         \\usepackage[utf8]{{inputenc}}\n\
         \\usepackage[T1]{{fontenc}}\n\
         \\usepackage[{locale}]{{babel}}\n\
         \\usepackage{{lmodern}}\n\
         \\usepackage{{geometry}}\n\
         \\usepackage{{enumitem}}\n\
         \\usepackage{{url}}\n\
         \\usepackage[{locale}]{{hyperref}}\n\
         \\geometry{{margin=2.5cm}}\n\
         \n\
         \\title{{{title}}}\n\
         \\date{{}}\n\
         \n\
         \\begin{{document}}\n\
         \n\
         \\maketitle\n\
         \n\
         \\section*{{{heading_body}}}\n\
         {body}\n\
         \n\
         \\section*{{{heading_extra}}}\n\
         \\begin{{itemize}}[leftmargin=*]\n\
         {items}\n\
         \\end{{itemize}}\n\
         \n\
         \\end{{document}}\n",
        locale = bundle.locale_id,
        title = title,
        heading_body = bundle.heading_body,
        heading_extra = bundle.heading_extra,
        body = body,
        items = items,
    )
}

/// Build the auxiliary item block.
///
/// Absent or empty extra content renders the bundle's fallback text as the
/// single item, so the section is never empty.
fn render_extra_items(extra: Option<&EnrichedContent>, bundle: &LanguageBundle) -> String {
    match extra {
        Some(content) if !content.is_empty() => match content {
            EnrichedContent::Recommendations(entries) => entries
                .iter()
                .map(|entry| {
                    format!(
                        "\\item \\textbf{{{}}}: \\url{{{}}}",
                        escape_markup(&entry.label),
                        escape_url(&entry.target)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            EnrichedContent::Text(text) => format!("\\item {}", escape_markup(text.trim())),
        },
        _ => format!("\\item {}", bundle.empty_extra_text),
    }
}
