//! Persistence of the compiled artifact.
//!
//! Derives a filesystem-safe filename from the request, assembles the flat
//! metadata map, writes through the injected [`ArtifactStore`], and then
//! verifies the write with a best-effort existence check. A negative check
//! is reported as [`StoreError::VerificationFailed`] and deliberately not
//! compensated — no delete, no retry — so the caller sees the inconsistency
//! instead of a silent partial success.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::StoreError;
use crate::request::{DocumentRequest, EnrichedContent};
use crate::store::{ArtifactStore, StoredRecord};

/// Write `bytes` plus metadata for `request` and verify the write.
pub async fn persist(
    bytes: &[u8],
    request: &DocumentRequest,
    store: &dyn ArtifactStore,
    config: &PipelineConfig,
) -> Result<StoredRecord, StoreError> {
    let filename = derive_filename(&request.title, &request.date, config.slug_max_chars);
    let metadata = build_metadata(request, &config.origin_tag);

    debug!(%filename, size = bytes.len(), "writing artifact to store");
    let id = store.put(bytes, &filename, &metadata).await?;

    if !store.exists(&id).await {
        warn!(%id, "post-write existence check failed");
        return Err(StoreError::VerificationFailed { id });
    }

    Ok(StoredRecord {
        id,
        filename,
        metadata,
    })
}

/// `<slug>_<date>.pdf` — slug is the title stripped to filename-safe
/// characters, whitespace collapsed to underscores, capped at `max_chars`.
pub fn derive_filename(title: &str, date: &str, max_chars: usize) -> String {
    let slug = slugify(title, max_chars);
    format!("{slug}_{date}.pdf")
}

fn slugify(title: &str, max_chars: usize) -> String {
    let mut slug = String::new();
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() || ch == '-' {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch);
        } else if ch.is_whitespace() {
            pending_separator = true;
        }
        // Anything else (punctuation, path separators) is stripped.
    }

    let truncated: String = slug.chars().take(max_chars).collect();
    if truncated.is_empty() {
        "untitled".to_string()
    } else {
        truncated
    }
}

/// Flat string map stored alongside the bytes: the fixed origin tag plus
/// the request fields. Recommendation lists are serialized compactly so the
/// map stays string-keyed and string-valued.
fn build_metadata(request: &DocumentRequest, origin_tag: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::from([
        ("origin".to_string(), origin_tag.to_string()),
        ("title".to_string(), request.title.clone()),
        ("date".to_string(), request.date.clone()),
        ("language".to_string(), request.language.clone()),
        ("body".to_string(), request.body.clone()),
    ]);

    match &request.extra {
        Some(EnrichedContent::Recommendations(entries)) if !entries.is_empty() => {
            // serde_json::to_string only fails on non-string map keys or
            // failing Serialize impls; neither applies to Recommendation.
            if let Ok(json) = serde_json::to_string(entries) {
                metadata.insert("recommendations".to_string(), json);
            }
        }
        Some(EnrichedContent::Text(text)) if !text.trim().is_empty() => {
            metadata.insert("extra".to_string(), text.clone());
        }
        _ => {}
    }

    metadata
}
