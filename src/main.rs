use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use preupver::config::Config;
use preupver::logging;
use preupver::page::bootstrap::load_all;
use preupver::page::descriptor::load_manifest;
use preupver::page::render::{DirectorySink, RenderSink, WriterSink};
use preupver::version::cache::TimedCache;
use preupver::version::fetcher::CachedFetcher;
use preupver::version::stores::SqliteStore;
use preupver::version::transports::HttpTransport;
use preupver::version::types::VersionQuery;

#[derive(Parser)]
#[command(name = "preupver")]
#[command(version, about = "Keeps library include snippets on the latest release")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Cache database location
    #[arg(long, global = true)]
    cache_db: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the latest version name for a single release endpoint
    Resolve { key: String, endpoint: String },
    /// Render include snippets for every element of a page manifest
    Render {
        manifest: PathBuf,
        /// Write `<id>.html` files here instead of printing
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn open_fetcher(cli: &Cli, config: &Config) -> anyhow::Result<CachedFetcher<SqliteStore>> {
    let db_path = cli.cache_db.clone().unwrap_or_else(|| config.db_path());
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }

    let store = SqliteStore::new(&db_path, config.cache.quota_bytes)?;
    Ok(CachedFetcher::new(
        TimedCache::new(store),
        Arc::new(HttpTransport::new(&config.http)),
    ))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let fetcher = open_fetcher(&cli, &config)?;

    match &cli.command {
        Command::Resolve { key, endpoint } => {
            let resolution = fetcher
                .resolve(&VersionQuery::new(key.as_str(), endpoint.as_str()))
                .await?;
            let name = resolution
                .payload
                .latest_name()
                .context("Release listing has no version name")?;
            println!("{name}");
        }
        Command::Render { manifest, out_dir } => {
            let elements = load_manifest(manifest)?;
            let sink: Box<dyn RenderSink> = match out_dir {
                Some(dir) => Box::new(DirectorySink::new(dir.clone())),
                None => Box::new(WriterSink::new(std::io::stdout())),
            };

            let report = load_all(&elements, &fetcher, sink.as_ref()).await;
            if report.failed > 0 {
                anyhow::bail!("{} of {} elements failed", report.failed, elements.len());
            }
            info!("Rendered {} elements", report.rendered);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file.as_deref());

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
