//! The pipeline orchestrator.
//!
//! One linear run per request: render → validate → compile → persist.
//! Transitions are strictly forward — no stage re-enters an earlier one, no
//! stage retries, and the first failing stage's typed result is mapped onto
//! the [`PipelineError`] taxonomy and returned. Rendering is a pure function
//! and cannot fail; everything downstream returns a `Result`.
//!
//! Runs share no mutable state. The only injected collaborator is the
//! artifact store handle, resolved once per run from the configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::{compile, language, persist, template, validate};
use crate::request::DocumentRequest;
use crate::store::{ArtifactStore, FsStore, StoredRecord};

/// Run the full generation/validation/compilation/persistence pipeline.
///
/// # Returns
/// `Ok(StoredRecord)` once the artifact is written and verified; callers
/// that only need the store handle use `record.id`.
///
/// # Errors
/// Exactly one [`PipelineError`] kind per failed run; see the crate-level
/// taxonomy. The compiler is never invoked when validation fails, and the
/// store is never touched when compilation fails.
pub async fn process(
    request: &DocumentRequest,
    config: &PipelineConfig,
) -> Result<StoredRecord, PipelineError> {
    let total_start = Instant::now();
    info!(title = %request.title, language = %request.language, "starting pipeline run");

    let store = resolve_store(config);

    // ── Step 1: Render ───────────────────────────────────────────────────
    let bundle = language::resolve(&request.language);
    let rendered = template::render(request, bundle);
    debug!(bytes = rendered.len(), locale = bundle.locale_id, "rendered LaTeX document");

    // ── Step 2: Validate ─────────────────────────────────────────────────
    match validate::validate(&rendered, bundle) {
        validate::ValidationOutcome::Valid => {}
        validate::ValidationOutcome::Invalid(reasons) => {
            warn!(count = reasons.len(), "rendered document failed validation");
            return Err(PipelineError::ContentInvalid { reasons });
        }
    }

    // ── Step 3: Compile ──────────────────────────────────────────────────
    let compile_start = Instant::now();
    let artifact = compile::compile(&rendered, config).await?;
    debug!(
        elapsed_ms = compile_start.elapsed().as_millis() as u64,
        size = artifact.len(),
        "compile stage complete"
    );

    // ── Step 4: Persist ──────────────────────────────────────────────────
    let record = persist::persist(&artifact, request, store.as_ref(), config).await?;

    info!(
        id = %record.id,
        filename = %record.filename,
        elapsed_ms = total_start.elapsed().as_millis() as u64,
        "pipeline run complete"
    );
    Ok(record)
}

/// Resolve the artifact store, from most-specific to least-specific:
///
/// 1. a pre-built handle on the config (tests, production object stores);
/// 2. the config's `store_dir` with the bundled [`FsStore`];
/// 3. `TEXTFLOW_STORE_DIR` from the environment;
/// 4. `./pdf-store`.
fn resolve_store(config: &PipelineConfig) -> Arc<dyn ArtifactStore> {
    if let Some(ref store) = config.store {
        return Arc::clone(store);
    }

    let root = config
        .store_dir
        .clone()
        .or_else(|| std::env::var_os("TEXTFLOW_STORE_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("pdf-store"));
    Arc::new(FsStore::open(root))
}
