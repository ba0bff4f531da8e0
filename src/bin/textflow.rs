//! CLI binary for textflow-pdf.
//!
//! A thin shim over the library crate: reads one `DocumentRequest` as JSON,
//! maps CLI flags to a `PipelineConfig`, runs the pipeline, and prints the
//! stored id.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use textflow_pdf::{process, DocumentRequest, PipelineConfig};
use tracing_subscriber::EnvFilter;

/// Typeset a cleaned transcription into an archived PDF.
#[derive(Parser, Debug)]
#[command(name = "textflow", version, about)]
struct Cli {
    /// Request JSON file; `-` reads from stdin.
    input: PathBuf,

    /// Root directory of the filesystem artifact store.
    #[arg(long, env = "TEXTFLOW_STORE_DIR")]
    store_dir: Option<PathBuf>,

    /// Compiler command to invoke.
    #[arg(long, default_value = "pdflatex")]
    compiler: String,

    /// Compile timeout in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Override the request's language code (e.g. `es`).
    #[arg(long)]
    language: Option<String>,

    /// Verbose logging (equivalent to RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let json = read_input(&cli.input)
        .with_context(|| format!("read request from {}", cli.input.display()))?;
    let mut request: DocumentRequest =
        serde_json::from_str(&json).context("parse request JSON")?;
    if let Some(language) = cli.language {
        request.language = language;
    }

    let mut builder = PipelineConfig::builder()
        .compiler(cli.compiler)
        .compile_timeout_secs(cli.timeout);
    if let Some(dir) = cli.store_dir {
        builder = builder.store_dir(dir);
    }
    let config = builder.build()?;

    let record = process(&request, &config).await?;
    println!("{}", record.id);
    Ok(())
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
