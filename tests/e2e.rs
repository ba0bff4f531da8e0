//! End-to-end pipeline tests.
//!
//! No real LaTeX toolchain is required: the compiler command is configurable,
//! so these tests script `/bin/sh` to stand in for pdflatex (produce an
//! artifact, fail, hang, …), and an in-memory mock store with failure knobs
//! stands in for the object store. Every scenario drives the public
//! `process()` entry point.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use textflow_pdf::{
    process, ArtifactStore, DocumentRequest, EnrichedContent, PipelineConfig, PipelineError,
    Recommendation, StoreError,
};

// ── Test doubles ─────────────────────────────────────────────────────────────

#[derive(Debug)]
struct PutCall {
    bytes: Vec<u8>,
    filename: String,
    metadata: BTreeMap<String, String>,
}

/// In-memory store with knobs for every failure mode the pipeline maps.
struct MockStore {
    puts: Mutex<Vec<PutCall>>,
    fail_put: AtomicBool,
    exists_answer: AtomicBool,
}

impl MockStore {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            puts: Mutex::new(Vec::new()),
            fail_put: AtomicBool::new(false),
            exists_answer: AtomicBool::new(true),
        })
    }

    fn put_count(&self) -> usize {
        self.puts.lock().unwrap().len()
    }

    fn last_put<T>(&self, f: impl FnOnce(&PutCall) -> T) -> T {
        let puts = self.puts.lock().unwrap();
        f(puts.last().expect("no put recorded"))
    }
}

#[async_trait]
impl ArtifactStore for MockStore {
    async fn put(
        &self,
        bytes: &[u8],
        filename: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<String, StoreError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                detail: "connection reset by peer".into(),
            });
        }
        let mut puts = self.puts.lock().unwrap();
        puts.push(PutCall {
            bytes: bytes.to_vec(),
            filename: filename.to_string(),
            metadata: metadata.clone(),
        });
        Ok(format!("mock-{}", puts.len()))
    }

    async fn exists(&self, _id: &str) -> bool {
        self.exists_answer.load(Ordering::SeqCst)
    }
}

fn request(body: &str) -> DocumentRequest {
    DocumentRequest {
        title: "Test".into(),
        date: "2026-08-07_10-00-00".into(),
        body: body.into(),
        language: "en".into(),
        extra: None,
    }
}

/// Config whose "compiler" is a shell script run as `sh -c <script> sh <src>`.
fn config_with(script: &str, timeout_secs: u64, store: Arc<MockStore>) -> PipelineConfig {
    PipelineConfig::builder()
        .compiler("/bin/sh")
        .compiler_args(["-c".to_string(), script.to_string(), "sh".to_string()])
        .compile_timeout_secs(timeout_secs)
        .store(store)
        .build()
        .expect("valid config")
}

const OK_COMPILER: &str = "printf '%%PDF-1.4 fake body' > document.pdf";

// ── Scenario: clean request runs to completion ───────────────────────────────

#[tokio::test]
async fn clean_request_compiles_and_stores() {
    let store = MockStore::new();
    let config = config_with(OK_COMPILER, 10, Arc::clone(&store));

    let record = process(&request("Clean sentence."), &config)
        .await
        .expect("pipeline should succeed");

    assert_eq!(record.id, "mock-1");
    assert_eq!(record.filename, "Test_2026-08-07_10-00-00.pdf");
    assert_eq!(store.put_count(), 1);
    store.last_put(|put| {
        assert!(put.bytes.starts_with(b"%PDF-1.4"));
        assert_eq!(put.filename, record.filename);
        assert_eq!(put.metadata["origin"], "transcript-pipeline");
        assert_eq!(put.metadata["title"], "Test");
        assert_eq!(put.metadata["language"], "en");
    });
}

#[tokio::test]
async fn recommendations_flow_into_store_metadata() {
    let store = MockStore::new();
    let config = config_with(OK_COMPILER, 10, Arc::clone(&store));

    let mut req = request("Clean sentence.");
    req.extra = Some(EnrichedContent::Recommendations(vec![Recommendation {
        label: "Course page".into(),
        target: "https://e.org/course".into(),
    }]));

    process(&req, &config).await.expect("pipeline should succeed");
    store.last_put(|put| {
        assert!(put.metadata["recommendations"].contains("https://e.org/course"));
    });
}

// ── Scenario: malformed content never reaches the compiler ───────────────────

#[tokio::test]
async fn malformed_percentage_fails_validation_before_compile() {
    let marker_dir = tempfile::tempdir().unwrap();
    let marker = marker_dir.path().join("compiler-ran");
    let store = MockStore::new();
    // A compiler that would prove it ran by dropping a marker file.
    let script = format!("touch {} && {}", marker.display(), OK_COMPILER);
    let config = config_with(&script, 10, Arc::clone(&store));

    let err = process(&request("growth was 90,5,8% uncorrected"), &config)
        .await
        .expect_err("validation must fail");

    match err {
        PipelineError::ContentInvalid { reasons } => {
            assert!(
                reasons.iter().any(|r| r.contains("percentage")),
                "expected a malformed-percentage reason, got {reasons:?}"
            );
        }
        other => panic!("expected ContentInvalid, got {other:?}"),
    }
    assert!(!marker.exists(), "compiler must never be invoked");
    assert_eq!(store.put_count(), 0, "store must never be touched");
}

// ── Scenario: hung compiler times out and cleans up ──────────────────────────

#[tokio::test]
async fn hung_compiler_times_out_and_removes_workdir() {
    let probe_dir = tempfile::tempdir().unwrap();
    let probe = probe_dir.path().join("workdir");
    let store = MockStore::new();
    // Record the working directory, then hang past the timeout.
    let script = format!("pwd > {} && sleep 5", probe.display());
    let config = config_with(&script, 1, Arc::clone(&store));

    let err = process(&request("Clean sentence."), &config)
        .await
        .expect_err("compile must time out");

    match err {
        PipelineError::Timeout { elapsed_ms } => {
            assert!(elapsed_ms >= 1_000, "elapsed {elapsed_ms}ms under the bound");
        }
        other => panic!("expected Timeout, got {other:?}"),
    }

    let workdir = PathBuf::from(std::fs::read_to_string(&probe).unwrap().trim());
    assert!(
        !workdir.exists(),
        "compile working directory {} must be removed",
        workdir.display()
    );
    assert_eq!(store.put_count(), 0);
}

// ── Scenario: toolchain failures map onto the taxonomy ───────────────────────

#[tokio::test]
async fn compiler_error_surfaces_stderr() {
    let store = MockStore::new();
    let config = config_with(
        "echo '! Undefined control sequence.' >&2; exit 1",
        10,
        Arc::clone(&store),
    );

    let err = process(&request("Clean sentence."), &config).await.unwrap_err();
    match err {
        PipelineError::CompilationFailed { stderr } => {
            assert!(stderr.contains("Undefined control sequence"));
        }
        other => panic!("expected CompilationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_and_empty_artifacts_are_distinct_failures() {
    let store = MockStore::new();

    let config = config_with("exit 0", 10, Arc::clone(&store));
    let err = process(&request("Clean sentence."), &config).await.unwrap_err();
    assert!(matches!(err, PipelineError::ArtifactMissing));

    let config = config_with(": > document.pdf", 10, Arc::clone(&store));
    let err = process(&request("Clean sentence."), &config).await.unwrap_err();
    assert!(matches!(err, PipelineError::ArtifactEmpty));

    assert_eq!(store.put_count(), 0);
}

// ── Scenario: store failures ─────────────────────────────────────────────────

#[tokio::test]
async fn failed_write_is_a_write_error() {
    let store = MockStore::new();
    store.fail_put.store(true, Ordering::SeqCst);
    let config = config_with(OK_COMPILER, 10, Arc::clone(&store));

    let err = process(&request("Clean sentence."), &config).await.unwrap_err();
    match err {
        PipelineError::WriteError { detail } => {
            assert!(detail.contains("connection reset"));
        }
        other => panic!("expected WriteError, got {other:?}"),
    }
}

#[tokio::test]
async fn write_without_readback_is_verification_failure() {
    let store = MockStore::new();
    store.exists_answer.store(false, Ordering::SeqCst);
    let config = config_with(OK_COMPILER, 10, Arc::clone(&store));

    let err = process(&request("Clean sentence."), &config).await.unwrap_err();
    match err {
        PipelineError::VerificationFailed { id } => assert_eq!(id, "mock-1"),
        other => panic!("expected VerificationFailed, got {other:?}"),
    }
    // The write itself happened; nothing compensates for it.
    assert_eq!(store.put_count(), 1);
}

// ── Language handling through the full pipeline ──────────────────────────────

#[tokio::test]
async fn unknown_language_falls_back_to_english_template() {
    let store = MockStore::new();
    // Echo the source back as the artifact so the test can inspect the
    // rendered document that actually reached the compiler.
    let config = config_with("cp document.tex document.pdf", 10, Arc::clone(&store));

    let mut req = request("Clean sentence.");
    req.language = "xx".into();
    process(&req, &config).await.expect("pipeline should succeed");

    store.last_put(|put| {
        let rendered = String::from_utf8(put.bytes.clone()).unwrap();
        assert!(rendered.contains("\\usepackage[english]{babel}"));
        assert!(rendered.contains("\\section*{Content}"));
    });
}

#[tokio::test]
async fn spanish_request_renders_spanish_sections() {
    let store = MockStore::new();
    let config = config_with("cp document.tex document.pdf", 10, Arc::clone(&store));

    let mut req = request("Frase limpia.");
    req.language = "es".into();
    process(&req, &config).await.expect("pipeline should succeed");

    store.last_put(|put| {
        let rendered = String::from_utf8(put.bytes.clone()).unwrap();
        assert!(rendered.contains("\\section*{Contenido}"));
        assert!(rendered.contains("No se encontraron sugerencias relevantes."));
    });
}
