//! Error types for the textflow-pdf library.
//!
//! Three error types reflect the three layers of the pipeline:
//!
//! * [`PipelineError`] — the closed, caller-visible taxonomy. Every run of
//!   [`crate::process::process`] ends in either a stored record or exactly
//!   one of these kinds. There is no automatic retry at any level.
//!
//! * [`CompileError`] — outcomes of a single toolchain invocation, returned
//!   by [`crate::pipeline::compile`]. The orchestrator maps each variant
//!   onto the taxonomy; callers of the adapter itself can match on the
//!   precise subprocess outcome.
//!
//! * [`StoreError`] — outcomes of the persistence stage and of
//!   [`crate::store::ArtifactStore`] implementations.
//!
//! Stage errors are values, never panics: a failed compile or store call
//! crosses the stage boundary as `Err(...)`, and the run's transient
//! resources (temp directory, subprocess handle) are released regardless of
//! which variant is produced.

use thiserror::Error;

/// All terminal failure kinds a pipeline run can surface to its caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Validation ────────────────────────────────────────────────────────
    /// The structural validator found at least one defect in the rendered
    /// body section. Reasons are in detection order.
    #[error("rendered document failed validation: {}", reasons.join("; "))]
    ContentInvalid { reasons: Vec<String> },

    // ── Compilation ───────────────────────────────────────────────────────
    /// The toolchain exited non-zero.
    #[error("LaTeX compilation failed:\n{stderr}")]
    CompilationFailed { stderr: String },

    /// The toolchain exceeded the configured wall-clock bound.
    #[error("LaTeX compilation timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The toolchain exited zero but produced no output file.
    #[error("compiler exited successfully but produced no PDF")]
    ArtifactMissing,

    /// The output file exists but is zero bytes long.
    #[error("compiler produced an empty PDF")]
    ArtifactEmpty,

    // ── Persistence ───────────────────────────────────────────────────────
    /// The store write call itself failed.
    #[error("store write failed: {detail}")]
    WriteError { detail: String },

    /// The write succeeded but the post-write existence check did not find
    /// the artifact. The inconsistency is reported, not auto-corrected.
    #[error("stored artifact '{id}' failed post-write verification")]
    VerificationFailed { id: String },

    // ── Config ────────────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal fault (I/O while staging the compile, task join
    /// failure, …).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Outcome of one external-compiler invocation.
///
/// Returned by [`crate::pipeline::compile::compile`]; the working directory
/// is removed before any of these variants is handed back.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Wall-clock timeout elapsed before the compiler finished.
    #[error("compiler exceeded the {elapsed_ms}ms bound")]
    Timeout { elapsed_ms: u64 },

    /// The compiler exited with a non-zero status.
    #[error("compiler exited non-zero:\n{stderr}")]
    Toolchain { stderr: String },

    /// Zero exit status, but the expected output file is absent.
    #[error("expected output file was not produced")]
    ArtifactMissing,

    /// The output file exists but has zero length.
    #[error("output file is empty")]
    ArtifactEmpty,

    /// File I/O around the subprocess failed (staging the source, reading
    /// the artifact).
    #[error("compile workspace I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CompileError> for PipelineError {
    fn from(e: CompileError) -> Self {
        match e {
            CompileError::Timeout { elapsed_ms } => PipelineError::Timeout { elapsed_ms },
            CompileError::Toolchain { stderr } => PipelineError::CompilationFailed { stderr },
            CompileError::ArtifactMissing => PipelineError::ArtifactMissing,
            CompileError::ArtifactEmpty => PipelineError::ArtifactEmpty,
            CompileError::Io(io) => PipelineError::Internal(format!("compile I/O: {io}")),
        }
    }
}

/// Outcome of the persistence stage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The `put` call failed; nothing was written.
    #[error("store write failed: {detail}")]
    Write { detail: String },

    /// `put` returned an id, but the best-effort existence check came back
    /// negative. No compensating delete or retry is attempted.
    #[error("artifact '{id}' not found by post-write check")]
    VerificationFailed { id: String },
}

impl From<StoreError> for PipelineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Write { detail } => PipelineError::WriteError { detail },
            StoreError::VerificationFailed { id } => PipelineError::VerificationFailed { id },
        }
    }
}
