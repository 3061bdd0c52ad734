/* src/cli/core/src/main.rs */

mod codegen;
mod config;
mod inspect;
mod route;
mod ui;
mod watch;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trellis_plugin::ConfigDataCache;

use config::{Project, find_trellis_config, load_trellis_config};

#[derive(Parser)]
#[command(name = "trellis", about = "Trellis page config CLI")]
struct Cli {
  /// Path to trellis.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List every page with its route and resolved config elements
  Inspect {
    /// Resolve as the dev server would
    #[arg(long)]
    dev: bool,
    /// Print the resolved config data as JSON
    #[arg(long)]
    json: bool,
  },
  /// Print the generated page-code module of a page
  Codegen {
    /// Page id, e.g. /pages/about
    #[arg(short, long)]
    page: String,
    /// Generate the server-side module instead of the client-side one
    #[arg(long)]
    server: bool,
    /// Generate as the dev server would (no server asset import)
    #[arg(long)]
    dev: bool,
  },
  /// Show which page a URL maps to
  Route {
    /// URL path, e.g. /star-wars/1
    url: String,
  },
  /// Re-resolve page configs whenever a file changes
  Watch,
}

/// Resolve config path (explicit or auto-detected) and load the project
fn resolve_project(explicit: Option<PathBuf>) -> Result<Project> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_trellis_config(&cwd)?
    }
  };
  let config = load_trellis_config(&path)?;
  Project::from_config(&path, &config)
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env("TRELLIS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();
  let project = resolve_project(cli.config)?;
  tracing::debug!(project = %project.name, root = %project.root_dir.display(), "loaded trellis.toml");
  let cache = ConfigDataCache::new();

  match cli.command {
    Command::Inspect { dev, json } => inspect::run_inspect(&project, &cache, dev, json).await?,
    Command::Codegen { page, server, dev } => {
      codegen::run_codegen(&project, &cache, &page, server, dev).await?;
    }
    Command::Route { url } => route::run_route(&project, &cache, &url).await?,
    Command::Watch => watch::run_watch(&project, &cache).await?,
  }

  Ok(())
}
