//! External-compiler invocation.
//!
//! ## Process and directory lifecycle
//!
//! Each compile owns a freshly created [`tempfile::TempDir`]; the source
//! file, the compiler's scratch files, and the output artifact all live
//! inside it. The directory guard is held across every exit path, so the
//! tree is removed whether the compile succeeds, fails, times out, or an
//! I/O error interrupts staging. `kill_on_drop` does the same for the child
//! process: when the timeout future wins, dropping the child reaps the
//! half-finished compiler instead of leaking it.
//!
//! The subprocess runs through `tokio::process`, so a slow or hung compiler
//! never blocks the async dispatch path — concurrent pipeline runs keep
//! making progress while one waits out its timeout.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::CompileError;

/// Compile `rendered` into PDF bytes with the configured toolchain.
///
/// The command line is `<compiler> <flags…> <source file>`, executed with
/// the temp directory as its working directory. The expected artifact is the
/// source filename with a `.pdf` extension, in that same directory.
///
/// Outcomes map one-to-one onto [`CompileError`]; a successful return is
/// guaranteed non-empty.
pub async fn compile(rendered: &str, config: &PipelineConfig) -> Result<Vec<u8>, CompileError> {
    let workdir = TempDir::new()?;
    let source_path = workdir.path().join(&config.source_filename);
    tokio::fs::write(&source_path, rendered).await?;

    debug!(
        source = %source_path.display(),
        compiler = %config.compiler,
        "staged LaTeX source"
    );

    let child = Command::new(&config.compiler)
        .args(&config.compiler_args)
        .arg(&config.source_filename)
        .current_dir(workdir.path())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let started = Instant::now();
    let bound = Duration::from_secs(config.compile_timeout_secs);

    let output = match tokio::time::timeout(bound, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            warn!(elapsed_ms, "compiler timed out; killing subprocess");
            return Err(CompileError::Timeout { elapsed_ms });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(
            stdout = %String::from_utf8_lossy(&output.stdout),
            "compiler diagnostics"
        );
        return Err(CompileError::Toolchain { stderr });
    }

    let artifact_path = workdir.path().join(artifact_filename(&config.source_filename));
    let bytes = match tokio::fs::read(&artifact_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CompileError::ArtifactMissing)
        }
        Err(e) => return Err(CompileError::Io(e)),
    };

    if bytes.is_empty() {
        return Err(CompileError::ArtifactEmpty);
    }

    info!(
        size = bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "compiled PDF"
    );
    Ok(bytes)
}

/// Output filename the toolchain derives from the source filename.
fn artifact_filename(source: &str) -> String {
    match source.rsplit_once('.') {
        Some((stem, _)) => format!("{stem}.pdf"),
        None => format!("{source}.pdf"),
    }
}
