//! quarry-cli: Command-line interface for quarry.

mod output;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quarry_client::{Outcome, RenderPolicy, SearchClient, SearchSession, SearchTransport};
use quarry_core::build_info::{wants_version, BUILD_INFO};
use quarry_core::protocol::SearchRequest;
use quarry_core::Config;
use quarry_index::Model;
use quarry_scanner::Scanner;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::output::{print_status, TerminalOutput};

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Local document search with a TF-IDF index", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build or update the index for one or more directories
    Index {
        /// Directories to index
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// Index file to write (defaults to the configured index)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rebuild from scratch instead of updating changed files only
        #[arg(long)]
        full: bool,
    },

    /// Show how many documents an index file holds
    Check {
        /// Index file (defaults to the configured index)
        index: Option<PathBuf>,
    },

    /// Run the search server
    Serve {
        /// Index file to serve
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// Address to listen on
        #[arg(short, long)]
        address: Option<String>,

        /// Skip the background scan of the configured roots
        #[arg(long)]
        no_reindex: bool,
    },

    /// Search a running server
    Search {
        /// Search query
        query: String,

        /// Server URL
        #[arg(short, long)]
        server: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Ranked)]
        format: Format,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the status of a running server
    Status {
        /// Server URL
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Ranked list with links and score labels
    Ranked,
    /// One `<id> => <score>` line per hit
    Pairs,
    /// Raw response body
    Json,
}

fn main() -> Result<()> {
    if wants_version() {
        println!("{}", BUILD_INFO.version_line("quarry"));
        return Ok(());
    }

    let cli = Cli::parse();

    if cli.verbose {
        quarry_core::logging::init_with_level("debug");
    } else {
        quarry_core::logging::init();
    }

    let config = Config::load_or_default().context("loading configuration")?;

    match cli.command {
        Some(Commands::Index { dirs, output, full }) => index(config, dirs, output, full),
        Some(Commands::Check { index }) => check(&config, index),
        Some(Commands::Serve {
            index,
            address,
            no_reindex,
        }) => serve(config, index, address, no_reindex),
        Some(Commands::Search {
            query,
            server,
            format,
            limit,
        }) => search(&config, &query, server, format, limit),
        Some(Commands::Status { server }) => status(&config, server),
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => {
            println!("quarry v{}", BUILD_INFO.version);
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn index(mut config: Config, dirs: Vec<PathBuf>, output: Option<PathBuf>, full: bool) -> Result<()> {
    config.index_roots = dirs;
    if let Some(output) = output {
        config.index_path = output;
    }
    config.ensure_index_dir()?;

    let index_file = config.index_path.clone();
    let mut model = if full {
        Model::new()
    } else {
        Model::load_or_default(&index_file)?
    };

    info!("Indexing into {}", index_file.display());
    let report = Scanner::new(config).scan_into(&mut model)?;
    model.save(&index_file)?;

    println!(
        "Indexed {} files ({} unchanged, {} removed, {} skipped) => {}",
        report.indexed,
        report.unchanged,
        report.removed,
        report.skipped,
        index_file.display()
    );
    Ok(())
}

fn check(config: &Config, index: Option<PathBuf>) -> Result<()> {
    let index_file = index.unwrap_or_else(|| config.index_path.clone());
    let model = Model::load(&index_file)?;
    println!("{} => {} files", index_file.display(), model.len());
    Ok(())
}

fn serve(
    mut config: Config,
    index: Option<PathBuf>,
    address: Option<String>,
    no_reindex: bool,
) -> Result<()> {
    if let Some(index) = index {
        config.index_path = index;
    }
    if let Some(address) = address {
        config.server.bind = address;
    }
    if no_reindex {
        config.server.reindex_on_start = false;
    }
    config.ensure_index_dir()?;

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(quarry_server::serve(config))?;
    Ok(())
}

fn client_for(config: &Config, server: Option<String>) -> Result<SearchClient> {
    let url = server.unwrap_or_else(|| config.client.server_url.clone());
    let client = SearchClient::new(&url, Duration::from_millis(config.client.timeout_ms))?;
    Ok(client)
}

fn search(
    config: &Config,
    query: &str,
    server: Option<String>,
    format: Format,
    limit: Option<usize>,
) -> Result<()> {
    let client = client_for(config, server)?;

    if format == Format::Json {
        let mut request = SearchRequest::new(query);
        request.limit = limit;
        let response = client.search(&request)?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let policy = match format {
        Format::Pairs => RenderPolicy::KeyValue,
        _ => RenderPolicy::RankedList {
            limit: limit.unwrap_or(config.client.limit),
        },
    };
    let mut out = TerminalOutput::new(client.base_url(), std::io::stdout().is_terminal());
    let mut session = SearchSession::new(client, policy);
    if let Some(limit) = limit {
        session = session.with_limit(limit);
    }

    match session.submit(query, &mut out) {
        Outcome::Rendered { .. } | Outcome::Stale { .. } => Ok(()),
        Outcome::Failed { error, .. } => bail!(error),
    }
}

fn status(config: &Config, server: Option<String>) -> Result<()> {
    let client = client_for(config, server)?;
    let report = client.status()?;
    print_status(client.base_url(), &report);
    Ok(())
}
