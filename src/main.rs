//! `dfa-router` command line tool.
//!
//! ```text
//! dfa-router --config routes.toml check
//! dfa-router --config routes.toml match /users/7 /static/css/site.css
//! dfa-router --config routes.toml watch < paths.txt
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use dfa_router::config::{compile_config, load_config, ConfigWatcher, RouterConfig};
use dfa_router::observability::{logging, metrics};
use dfa_router::{Router, SharedRouter, Variables};

#[derive(Parser)]
#[command(name = "dfa-router")]
#[command(about = "Compile and query a DFA route table", long_about = None)]
struct Cli {
    /// Route table (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Overrides `observability.log_level`; RUST_LOG overrides both.
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and compile the route table, then print a summary
    Check,
    /// Route each path and print the result as JSON
    Match {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Route paths read from stdin, reloading the table when the file changes
    Watch,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli.config)?;
    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init_logging(level);

    // Compiled after the subscriber is installed so the build is logged.
    let router = compile_config(&config)?;

    match cli.command {
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&summary(&router))?);
        }
        Commands::Match { paths } => {
            for path in &paths {
                print_match(&router, path)?;
            }
        }
        Commands::Watch => watch(&cli.config, &config, router).await?,
    }

    Ok(())
}

/// Report printed by `check`.
fn summary(router: &Router<String>) -> Value {
    json!({
        "routes": router.route_count(),
        "states": router.state_count(),
        "engine": router.engine().kind(),
        "table_bytes": router.table_bytes(),
    })
}

/// One `match` answer: `route` is null when nothing matches.
fn match_result(router: &Router<String>, path: &str) -> Value {
    let mut variables = Variables::new();
    let route = router.route_with(path, &mut variables);
    json!({
        "path": path,
        "route": route,
        "variables": variables,
    })
}

fn print_match(router: &Router<String>, path: &str) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(&match_result(router, path))?);
    Ok(())
}

async fn watch(
    path: &Path,
    config: &RouterConfig,
    router: Router<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shared = SharedRouter::new(router);
    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        print_match(&shared.load(), line)?;
                    }
                }
                None => break,
            },
            Some(router) = updates.recv() => {
                tracing::info!(
                    route_count = router.route_count(),
                    state_count = router.state_count(),
                    "Router swapped"
                );
                shared.store(router);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
