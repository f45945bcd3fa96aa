//! Command-line entrypoints for sowkit.
//!
//! # Usage
//!
//! ```bash
//! # Index every document in ./input into ./output
//! sowkit build
//!
//! # Index only documents added since the last run
//! sowkit append --input docs --output index
//!
//! # Ask the library a question
//! sowkit query "How should we structure pipeline reviews?"
//!
//! # Serve the SOW generator
//! HOME_IP=203.0.113.7 sowkit serve --addr 0.0.0.0:8000
//! ```
//!
//! `OPENAI_API_KEY` is read from the environment or a `.env` file. Logs go to stderr and
//! honour `RUST_LOG` (default `info`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sowkit_cli::{Settings, log_filter};
use sowkit_rag::{FileOutcome, IngestReport, Ingestor, RagConfig, Retriever};
use sowkit_server::{AppState, router};
use sowkit_sow::{Answerer, SowDrafter};
use sowkit_websearch::DuckDuckGo;
use tracing_subscriber::EnvFilter;

/// Retrieval-augmented SOW drafting over an office-document library.
#[derive(Parser, Debug)]
#[command(name = "sowkit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index every supported document, replacing any previous index.
    Build(Dirs),
    /// Index documents not yet recorded in the manifest.
    Append(Dirs),
    /// Answer a question from the library.
    Query {
        /// The question to answer.
        question: String,
        /// Number of context chunks to retrieve.
        #[arg(short, default_value_t = 5)]
        k: usize,
        /// Directory holding the index.
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
    /// Serve the SOW generator.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
        /// Directory holding the index.
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct Dirs {
    /// Directory scanned for documents.
    #[arg(long, default_value = "input")]
    input: PathBuf,
    /// Directory receiving the index, chunk store and manifest.
    #[arg(long, default_value = "output")]
    output: PathBuf,
}

impl Dirs {
    fn config(&self) -> Result<RagConfig> {
        Ok(RagConfig::builder()
            .input_dir(&self.input)
            .output_dir(&self.output)
            .build()?)
    }
}

fn output_config(output: &Path, top_k: usize) -> Result<RagConfig> {
    Ok(RagConfig::builder()
        .output_dir(output)
        .top_k(top_k)
        .build()?)
}

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` may set RUST_LOG.
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(log_filter(|name| std::env::var(name).ok())))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Build(dirs) => {
            let ingestor = Ingestor::new(settings.assistant(), dirs.config()?)?;
            let report = ingestor.build().await.context("Build failed")?;
            summarize(&report);
        }
        Command::Append(dirs) => {
            let ingestor = Ingestor::new(settings.assistant(), dirs.config()?)?;
            let report = ingestor.append().await.context("Append failed")?;
            if report.noop {
                println!("No new files to process.");
            } else {
                summarize(&report);
            }
        }
        Command::Query {
            question,
            k,
            output,
        } => {
            let config = output_config(&output, k)?;
            let retriever = Retriever::open(settings.assistant(), &config)?;
            let answer = Answerer::new(retriever, settings.assistant())
                .answer(&question)
                .await?;
            println!("{answer}");
        }
        Command::Serve { addr, output } => {
            let config = output_config(&output, sowkit_sow::DRAFT_K)?;
            let retriever = Retriever::open(settings.assistant(), &config)?;
            let drafter = SowDrafter::new(retriever, settings.drafter(), DuckDuckGo::new());
            let app = router(AppState::new(drafter, settings.home_ip.clone()));

            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("Listening on http://{addr}");
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await?;
        }
    }
    Ok(())
}

fn summarize(report: &IngestReport) {
    let skipped = report
        .files
        .iter()
        .filter(|o| !matches!(o, FileOutcome::Loaded { .. }))
        .count();
    println!(
        "Indexed {} file(s): {} of {} chunks embedded, {} file(s) skipped, {} vectors total.",
        report.recorded.len(),
        report.chunks_embedded,
        report.chunks_total,
        skipped,
        report.vectors
    );
    for failure in &report.failures {
        println!(
            "  dropped {}#{}: {}",
            failure.source_file, failure.position, failure.reason
        );
    }
}
