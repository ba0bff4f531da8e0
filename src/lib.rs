//! # textflow-pdf
//!
//! Typeset cleaned transcription text into archived PDF documents.
//!
//! ## Why this crate?
//!
//! The upstream transcription flow produces cleaned prose, a synthesised
//! title, and a handful of metadata fields. Turning that into a durable
//! artifact is the part with real failure structure: arbitrary text must be
//! escaped into LaTeX without injection, the rendered markup checked before
//! an external toolchain is paid for, the toolchain run as a bounded
//! subprocess that cannot wedge the service, and the resulting binary
//! written to an object store with a verification step. This crate owns
//! exactly that pipeline; transcription, text cleaning, and the HTTP layer
//! stay upstream.
//!
//! ## Pipeline Overview
//!
//! ```text
//! DocumentRequest
//!  │
//!  ├─ 1. Render    escape title/body, assemble the LaTeX document
//!  ├─ 2. Validate  lexical scan of the body section (cheap, pre-compile)
//!  ├─ 3. Compile   pdflatex in an owned temp dir, 60 s wall-clock bound
//!  └─ 4. Persist   slugged filename + metadata → store, then verify
//! ```
//!
//! Every stage hands an immutable value forward or fails the run with one
//! kind from a closed error taxonomy; there is no retry and no backtracking.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use textflow_pdf::{process, DocumentRequest, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let request = DocumentRequest {
//!         title: "Graph Algorithms".into(),
//!         date: "2026-08-07_10-00-00".into(),
//!         body: "Cleaned lecture text.".into(),
//!         language: "en".into(),
//!         extra: None,
//!     };
//!     let config = PipelineConfig::default();
//!     let record = process(&request, &config).await?;
//!     println!("stored as {}", record.id);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `textflow` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! textflow-pdf = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod request;
pub mod store;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{CompileError, PipelineError, StoreError};
pub use pipeline::language::{resolve as resolve_language, LanguageBundle};
pub use pipeline::validate::ValidationOutcome;
pub use process::process;
pub use request::{DocumentRequest, EnrichedContent, Recommendation};
pub use store::{ArtifactStore, FsStore, StoredRecord};
