//! solscope - Solana wallet analytics in the terminal

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use solscope_core::{
    data_dir, render_resume_json, render_resume_svg, render_resume_text, write_resume, RpcClient,
    RpcConfig, SortKey, WalletRegistry, WalletStore,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "solscope",
    version,
    about = "Solana wallet analytics in the terminal",
    long_about = "Wallet statistics, resume cards, a leaderboard and counterparty graphs\n\
                  for Solana addresses, from the terminal.\n\
                  \n\
                  Examples:\n\
                    solscope                                  # Run TUI (default)\n\
                    solscope analyze <ADDRESS>                # Print wallet stats\n\
                    solscope resume <ADDRESS> --format svg    # Render a resume card\n\
                    solscope leaderboard --sort nfts          # Rank seen wallets\n\
                    solscope graph <ADDRESS> --dot out.dot    # Counterparty graph\n\
                    solscope wallets list                     # Registered wallets\n\
                  \n\
                  Environment Variables:\n\
                    SOLSCOPE_DATA_DIR                         # Override data directory\n\
                    SOLSCOPE_RPC_URL                          # Override Solana RPC endpoint\n\
                    SOLSCOPE_INDEXER_URL                      # Override indexer endpoint\n\
                    SOLSCOPE_API_KEY                          # Indexer API key"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Path to data directory (default: platform data dir + solscope)
    #[arg(long, env = "SOLSCOPE_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Mode {
    /// Run TUI interface (default)
    Tui,
    /// Analyze a wallet and print its stats
    Analyze {
        /// Wallet address (base58)
        address: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a wallet resume card
    Resume {
        /// Wallet address (base58)
        address: String,
        /// Output format
        #[arg(long, default_value = "text", value_parser = ["text", "json", "svg"])]
        format: String,
        /// Write to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Rank every previously seen wallet
    Leaderboard {
        /// Sort key: score, nfts, txs, oldest
        #[arg(long, short = 's')]
        sort: Option<String>,
        /// Max entries to show
        #[arg(long, short = 'n', default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build the counterparty graph for a wallet
    Graph {
        /// Wallet address (base58)
        address: String,
        /// Write Graphviz DOT to file
        #[arg(long)]
        dot: Option<PathBuf>,
        /// Max counterparties to show
        #[arg(long, short = 'n', default_value = "10")]
        top: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the wallet registry
    Wallets {
        #[command(subcommand)]
        action: WalletsAction,
    },
    /// Clear saved preferences and in-memory caches
    ClearCache,
}

#[derive(Subcommand)]
enum WalletsAction {
    /// List registered wallets
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a wallet without analyzing it
    Add {
        /// Wallet address (base58)
        address: String,
    },
    /// Remove a wallet from the registry
    Remove {
        /// Wallet address (base58)
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => data_dir().context("Could not determine data directory")?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "Using data directory");

    match cli.mode.unwrap_or(Mode::Tui) {
        Mode::Tui => {
            let store = setup_store(&data_dir)?;
            solscope_tui::run(store, data_dir).await?;
        }
        Mode::Analyze { address, json } => {
            run_analyze(&data_dir, address, json).await?;
        }
        Mode::Resume {
            address,
            format,
            output,
        } => {
            run_resume(&data_dir, address, format, output).await?;
        }
        Mode::Leaderboard { sort, limit, json } => {
            run_leaderboard(&data_dir, sort, limit, json).await?;
        }
        Mode::Graph {
            address,
            dot,
            top,
            json,
        } => {
            run_graph(&data_dir, address, dot, top, json).await?;
        }
        Mode::Wallets { action } => {
            run_wallets(&data_dir, action)?;
        }
        Mode::ClearCache => {
            run_clear_cache(&data_dir)?;
        }
    }

    Ok(())
}

fn setup_store(data_dir: &PathBuf) -> Result<Arc<WalletStore>> {
    let config = RpcConfig::load(data_dir).context("Failed to load configuration")?;
    let client = RpcClient::new(config).context("Failed to build RPC client")?;
    let registry = WalletRegistry::load(data_dir).context("Failed to load wallet registry")?;
    Ok(Arc::new(WalletStore::new(client, registry)))
}

fn new_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(message.to_string());
    spinner
}

async fn run_analyze(data_dir: &PathBuf, address: String, json: bool) -> Result<()> {
    let store = setup_store(data_dir)?;

    let spinner = new_spinner("Fetching wallet activity...");
    let result = store.analyze_wallet(&address).await;
    spinner.finish_and_clear();

    let stats = result.with_context(|| format!("Failed to analyze {}", address))?;
    println!("{}", cli::format_stats(&stats, json));

    if let solscope_core::DegradedState::PartialData { reason, .. } = store.degraded_state() {
        eprintln!("warning: {}", reason);
    }

    Ok(())
}

async fn run_resume(
    data_dir: &PathBuf,
    address: String,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let store = setup_store(data_dir)?;

    let spinner = new_spinner("Fetching wallet activity...");
    let result = store.analyze_wallet(&address).await;
    spinner.finish_and_clear();

    let stats = result.with_context(|| format!("Failed to analyze {}", address))?;

    let rendered = match format.as_str() {
        "json" => render_resume_json(&stats)?,
        "svg" => render_resume_svg(&stats),
        _ => render_resume_text(&stats),
    };

    match output {
        Some(path) => {
            write_resume(&path, &rendered)?;
            println!("Resume written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn run_leaderboard(
    data_dir: &PathBuf,
    sort: Option<String>,
    limit: usize,
    json: bool,
) -> Result<()> {
    let store = setup_store(data_dir)?;

    if store.registry().is_empty() {
        println!("No wallets registered yet. Run 'solscope analyze <ADDRESS>' first.");
        return Ok(());
    }

    if let Some(raw) = sort {
        let key = SortKey::parse(&raw)
            .with_context(|| format!("Unknown sort key '{}' (score, nfts, txs, oldest)", raw))?;
        store.set_sort_key(key);
    }

    let spinner = new_spinner(&format!(
        "Analyzing {} registered wallets...",
        store.registry().len()
    ));
    let report = store.refresh_leaderboard().await?;
    spinner.finish_and_clear();

    cli::print_warnings(&report);

    let mut entries = store.leaderboard();
    entries.truncate(limit);
    println!("{}", cli::format_leaderboard(&entries, json));

    Ok(())
}

async fn run_graph(
    data_dir: &PathBuf,
    address: String,
    dot: Option<PathBuf>,
    top: usize,
    json: bool,
) -> Result<()> {
    let store = setup_store(data_dir)?;

    let spinner = new_spinner("Fetching enriched transactions...");
    let result = store.build_graph(&address).await;
    spinner.finish_and_clear();

    let graph = result.with_context(|| format!("Failed to build graph for {}", address))?;

    if let Some(path) = dot {
        std::fs::write(&path, graph.to_dot())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("DOT graph written to {}", path.display());
        return Ok(());
    }

    println!("{}", cli::format_graph(&graph, top, json));

    Ok(())
}

fn run_wallets(data_dir: &PathBuf, action: WalletsAction) -> Result<()> {
    let registry = WalletRegistry::load(data_dir).context("Failed to load wallet registry")?;

    match action {
        WalletsAction::List { json } => {
            let records = registry.list();
            if records.is_empty() && !json {
                println!("No wallets registered yet.");
            } else {
                println!("{}", cli::format_wallets(&records, json));
            }
        }
        WalletsAction::Add { address } => {
            if registry.record(&address)? {
                println!("Registered {}", address);
            } else {
                println!("{} is already registered", address);
            }
        }
        WalletsAction::Remove { address } => {
            if registry.remove(&address)? {
                println!("Removed {}", address);
            } else {
                println!("{} is not registered", address);
            }
        }
    }

    Ok(())
}

fn run_clear_cache(data_dir: &PathBuf) -> Result<()> {
    let prefs_path = data_dir.join("solscope-preferences.json");

    if !prefs_path.exists() {
        println!("Nothing to clear at {}", prefs_path.display());
        return Ok(());
    }

    std::fs::remove_file(&prefs_path)
        .with_context(|| format!("Failed to delete {}", prefs_path.display()))?;

    println!("Preferences cleared: {}", prefs_path.display());
    println!("Wallet registry and config left untouched.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_tui() {
        let cli = Cli::parse_from(["solscope"]);
        assert!(cli.mode.is_none());
    }

    #[test]
    fn test_leaderboard_args() {
        let cli = Cli::parse_from(["solscope", "leaderboard", "--sort", "nfts", "-n", "5"]);
        match cli.mode {
            Some(Mode::Leaderboard { sort, limit, json }) => {
                assert_eq!(sort.as_deref(), Some("nfts"));
                assert_eq!(limit, 5);
                assert!(!json);
            }
            _ => panic!("expected leaderboard mode"),
        }
    }

    #[test]
    fn test_clear_cache_on_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        run_clear_cache(&dir.path().to_path_buf()).unwrap();
    }
}
