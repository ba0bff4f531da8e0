//! Configuration for the document pipeline.
//!
//! Every knob lives in one [`PipelineConfig`] built via its
//! [`PipelineConfigBuilder`], so configs are trivial to share across runs,
//! log, and diff. Callers set only what they care about and rely on the
//! documented defaults for the rest.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::PipelineError;
use crate::store::ArtifactStore;

/// Configuration for one or more pipeline runs.
///
/// Built via [`PipelineConfig::builder()`] or [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use textflow_pdf::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .compile_timeout_secs(120)
///     .store_dir("/var/lib/textflow/pdfs")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Compiler command name. Default: `pdflatex`.
    ///
    /// Resolved through `PATH` like any spawned command. Tests point this at
    /// `/bin/sh` with a scripted argument list to fake toolchain behaviour.
    pub compiler: String,

    /// Flags passed before the positional source filename.
    /// Default: `-interaction=nonstopmode -halt-on-error`.
    ///
    /// Non-interactive mode keeps a broken document from parking the
    /// subprocess on a TeX prompt until the timeout fires; halt-on-error
    /// makes the first error fatal instead of producing a mangled PDF.
    pub compiler_args: Vec<String>,

    /// Name of the source file staged into the working directory.
    /// Default: `document.tex`. The expected artifact swaps the extension
    /// for `.pdf`.
    pub source_filename: String,

    /// Wall-clock bound for one compiler invocation, in seconds. Default: 60.
    ///
    /// pdflatex on a one-page document finishes in well under a second; a
    /// minute of wall clock means the toolchain is wedged, not slow.
    pub compile_timeout_secs: u64,

    /// Maximum length of the filename slug derived from the title, in
    /// characters. Default: 40.
    pub slug_max_chars: usize,

    /// Origin marker written into every artifact's metadata. Default:
    /// `transcript-pipeline`.
    pub origin_tag: String,

    /// Pre-built store handle. Takes precedence over `store_dir`.
    pub store: Option<Arc<dyn ArtifactStore>>,

    /// Root directory for the bundled filesystem store, used when no
    /// pre-built handle is supplied. If also unset, the orchestrator falls
    /// back to `TEXTFLOW_STORE_DIR` and then `./pdf-store`.
    pub store_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            compiler: "pdflatex".to_string(),
            compiler_args: vec![
                "-interaction=nonstopmode".to_string(),
                "-halt-on-error".to_string(),
            ],
            source_filename: "document.tex".to_string(),
            compile_timeout_secs: 60,
            slug_max_chars: 40,
            origin_tag: "transcript-pipeline".to_string(),
            store: None,
            store_dir: None,
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("compiler", &self.compiler)
            .field("compiler_args", &self.compiler_args)
            .field("source_filename", &self.source_filename)
            .field("compile_timeout_secs", &self.compile_timeout_secs)
            .field("slug_max_chars", &self.slug_max_chars)
            .field("origin_tag", &self.origin_tag)
            .field("store", &self.store.as_ref().map(|_| "<dyn ArtifactStore>"))
            .field("store_dir", &self.store_dir)
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn compiler(mut self, command: impl Into<String>) -> Self {
        self.config.compiler = command.into();
        self
    }

    pub fn compiler_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.config.compiler_args = args.into_iter().collect();
        self
    }

    pub fn source_filename(mut self, name: impl Into<String>) -> Self {
        self.config.source_filename = name.into();
        self
    }

    pub fn compile_timeout_secs(mut self, secs: u64) -> Self {
        self.config.compile_timeout_secs = secs.max(1);
        self
    }

    pub fn slug_max_chars(mut self, chars: usize) -> Self {
        self.config.slug_max_chars = chars.max(1);
        self
    }

    pub fn origin_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.origin_tag = tag.into();
        self
    }

    pub fn store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.config.store = Some(store);
        self
    }

    pub fn store_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.store_dir = Some(dir.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, PipelineError> {
        let c = &self.config;
        if c.compiler.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "compiler command must not be empty".into(),
            ));
        }
        if c.source_filename.trim().is_empty()
            || c.source_filename.contains('/')
            || c.source_filename.contains('\\')
        {
            return Err(PipelineError::InvalidConfig(format!(
                "source filename must be a bare filename, got {:?}",
                c.source_filename
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_toolchain_contract() {
        let c = PipelineConfig::default();
        assert_eq!(c.compiler, "pdflatex");
        assert_eq!(
            c.compiler_args,
            vec!["-interaction=nonstopmode", "-halt-on-error"]
        );
        assert_eq!(c.source_filename, "document.tex");
        assert_eq!(c.compile_timeout_secs, 60);
    }

    #[test]
    fn builder_clamps_degenerate_values() {
        let c = PipelineConfig::builder()
            .compile_timeout_secs(0)
            .slug_max_chars(0)
            .build()
            .unwrap();
        assert_eq!(c.compile_timeout_secs, 1);
        assert_eq!(c.slug_max_chars, 1);
    }

    #[test]
    fn empty_compiler_is_rejected() {
        let err = PipelineConfig::builder().compiler("  ").build().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn source_filename_must_be_bare() {
        let err = PipelineConfig::builder()
            .source_filename("../evil.tex")
            .build()
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }
}
