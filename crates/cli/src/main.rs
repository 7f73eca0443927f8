//! `chunkstream` binary: detects entry components in a store, materializes
//! one fully expanded chunk artifact per entry, and optionally reports the
//! discovered call tree and summarizes each chunk via a remote model.

mod summarizer;

use anyhow::{Context, Result};
use chunkstream_resolver::{detect_entries, write_tree_report, ChunkWriter, Materializer};
use chunkstream_store::{clean_listing, ComponentStore};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use summarizer::{SummarizerClient, SummarizerConfig};

#[derive(Parser)]
#[command(
    name = "chunkstream",
    version,
    about = "Rebuild self-contained documents from a store of USE-linked components"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect entry components and write one expanded chunk per entry.
    Build(BuildArgs),
    /// Extract component text from a numbered COBOL compiler listing.
    CleanListing(CleanListingArgs),
}

#[derive(Args)]
struct BuildArgs {
    /// Directory holding one .txt file per component.
    #[arg(long, default_value = "components")]
    components: PathBuf,

    /// Directory chunk artifacts are written to.
    #[arg(long, default_value = "stream_chunks")]
    output: PathBuf,

    /// Also write an ASCII call-tree report to this path.
    #[arg(long)]
    tree_report: Option<PathBuf>,

    /// Send each chunk to the summarization endpoint and store the reply
    /// next to its artifact. Requires CHUNKSTREAM_API_KEY.
    #[arg(long)]
    summarize: bool,

    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Args)]
struct ModelArgs {
    /// Messages-style endpoint the summarizer posts to.
    #[arg(long, default_value = summarizer::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Model identifier sent with each request.
    #[arg(long, default_value = summarizer::DEFAULT_MODEL)]
    model: String,

    /// Optional system prompt for the summarizer.
    #[arg(long)]
    system_prompt: Option<String>,

    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    #[arg(long, default_value_t = 64_000)]
    max_tokens: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 600)]
    request_timeout: u64,
}

#[derive(Args)]
struct CleanListingArgs {
    /// Listing file to clean.
    input: PathBuf,

    /// Directory the cleaned component file is written to.
    #[arg(long, default_value = "components")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => run_build(args).await,
        Command::CleanListing(args) => run_clean_listing(&args),
    }
}

async fn run_build(args: BuildArgs) -> Result<()> {
    let store = ComponentStore::load(&args.components).with_context(|| {
        format!("loading components from {}", args.components.display())
    })?;

    let entries = detect_entries(&store);
    if entries.is_empty() {
        log::warn!("No entry components detected, nothing to materialize");
    } else {
        log::info!(
            "Detected {} entry component(s): {}",
            entries.len(),
            entries
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut materializer = Materializer::new(&store);
    let chunks = materializer.materialize_all(&entries);

    // A failed write loses that root only; remaining chunks still land.
    let writer = ChunkWriter::new(&args.output);
    let mut written = Vec::new();
    for chunk in &chunks {
        match writer.persist(chunk) {
            Ok(path) => written.push((chunk, path)),
            Err(err) => log::error!("Failed to write chunk for {}: {err}", chunk.root),
        }
    }
    log::info!("Wrote {}/{} chunk artifact(s)", written.len(), chunks.len());

    if let Some(report) = &args.tree_report {
        write_tree_report(materializer.graph(), report)
            .with_context(|| format!("writing call-tree report to {}", report.display()))?;
    }

    if args.summarize {
        summarize_chunks(&args.model, &written).await?;
    }

    Ok(())
}

async fn summarize_chunks(
    model: &ModelArgs,
    written: &[(&chunkstream_resolver::Chunk, PathBuf)],
) -> Result<()> {
    let api_key = std::env::var(summarizer::API_KEY_ENV)
        .with_context(|| format!("{} must be set for --summarize", summarizer::API_KEY_ENV))?;

    let client = SummarizerClient::new(SummarizerConfig {
        endpoint: model.endpoint.clone(),
        model: model.model.clone(),
        api_key,
        temperature: model.temperature,
        max_tokens: model.max_tokens,
        timeout: Duration::from_secs(model.request_timeout),
    })?;

    for (chunk, path) in written {
        log::info!("Summarizing chunk {}", chunk.root);
        match client
            .summarize(&chunk.text(), model.system_prompt.as_deref())
            .await
        {
            Ok(reply) => {
                let summary_path = path.with_extension("summary.md");
                std::fs::write(&summary_path, reply).with_context(|| {
                    format!("writing summary to {}", summary_path.display())
                })?;
                log::info!("Summary written to {}", summary_path.display());
            }
            Err(err) => log::error!("Summarization failed for {}: {err}", chunk.root),
        }
    }
    Ok(())
}

fn run_clean_listing(args: &CleanListingArgs) -> Result<()> {
    let path = clean_listing(&args.input, &args.output)
        .with_context(|| format!("cleaning listing {}", args.input.display()))?;
    println!("{}", path.display());
    Ok(())
}
