use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{HttpAnalyzeTransport, LocalFile, SubmitOutcome, UploadController};
use reqwest::Client;
use shared::domain::{AnalysisType, FileSelection, ANALYSIS_FAILED_TEXT};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use terminal::TerminalView;

/// Upload PDF files to an analyzer server and print the result fragment.
#[derive(Parser, Debug)]
#[command(name = "analyze")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    analysis_type: Option<AnalysisType>,
    files: Vec<PathBuf>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if let Some(v) = &self.endpoint {
            settings.endpoint = v.clone();
        }
        if let Some(v) = self.analysis_type {
            settings.analysis_type = v;
        }
    }
}

async fn read_file(path: &Path) -> Result<LocalFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = LocalFile::new(filename, bytes);
    Ok(match mime_guess::from_path(path).first_raw() {
        Some(mime_type) => file.with_mime_type(mime_type),
        None => file,
    })
}

/// Runs one upload through the controller and returns the printed fragment.
async fn run(settings: &Settings, files: Vec<LocalFile>, view: TerminalView) -> Result<String> {
    let transport =
        HttpAnalyzeTransport::with_client(Client::new(), &settings.server_url, &settings.endpoint);
    info!(endpoint = transport.endpoint(), "using analyzer endpoint");

    let controller = UploadController::new(view, transport);
    controller.sync_initial_state();
    controller.drop_files(FileSelection::new(files));

    let outcome = controller.submit().await;
    let result = controller.view().take_result();
    match (outcome, result) {
        (SubmitOutcome::Rendered, Some(result)) => Ok(result),
        (SubmitOutcome::NoFiles, _) => bail!("no input files given"),
        (SubmitOutcome::Failed, _) => bail!(ANALYSIS_FAILED_TEXT),
        (outcome, _) => bail!("analysis did not complete ({outcome:?})"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    cli.apply(&mut settings);

    let mut files = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        files.push(read_file(path).await?);
    }

    let view = TerminalView::new(settings.analysis_type);
    let fragment = run(&settings, files, view).await?;
    println!("{fragment}");
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
