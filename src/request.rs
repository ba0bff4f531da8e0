//! The upstream request payload.
//!
//! A [`DocumentRequest`] is produced by the transcription/cleaning service
//! upstream of this crate: the text has already been cleaned, the title
//! already synthesised, the language already detected. The pipeline consumes
//! the request exactly once and never mutates it.

use serde::{Deserialize, Serialize};

/// One document to typeset and archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Document title, used for the LaTeX `\title` and the stored filename.
    pub title: String,
    /// Date string from the upstream flow (e.g. `2026-08-07_14-02-11`).
    /// Opaque to the pipeline; embedded verbatim in the filename.
    pub date: String,
    /// Cleaned body text. Arbitrary prose; the renderer escapes it.
    pub body: String,
    /// Two-letter language code as detected upstream. Unknown codes fall
    /// back to English.
    pub language: String,
    /// Optional enriched content rendered as the document's auxiliary block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<EnrichedContent>,
}

/// Auxiliary content attached to a request.
///
/// Untagged so the upstream JSON can send either a plain string or a list of
/// recommendation objects without a discriminator field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnrichedContent {
    /// An ordered list of recommended pages.
    Recommendations(Vec<Recommendation>),
    /// Free text produced by the upstream enrichment step.
    Text(String),
}

impl EnrichedContent {
    /// True when there is nothing to render (empty list or blank text).
    pub fn is_empty(&self) -> bool {
        match self {
            EnrichedContent::Recommendations(entries) => entries.is_empty(),
            EnrichedContent::Text(text) => text.trim().is_empty(),
        }
    }
}

/// One recommended page: a human-readable label plus a URL target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub label: String,
    pub target: String,
}
