/* src/cli/core/src/main.rs */

mod config;
mod legacy;
mod probe;
mod render;
mod serve;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{VuessrConfig, find_vuessr_config, load_vuessr_config};

#[derive(Parser)]
#[command(name = "vuessr", about = "Server-side renderer for Vue single-file components")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve pages from every installed app over HTTP
  Serve {
    /// Path to vuessr.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Port to listen on (overrides [server].port)
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Render a single page to stdout
  Render {
    /// Request path, e.g. /about
    path: String,
    /// Path to vuessr.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Session user passed to the renderer (defaults to [site].default_user)
    #[arg(short, long)]
    user: Option<String>,
  },
  /// Probe runtime candidates and show which one would be selected
  Probe {
    /// Path to vuessr.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Run the legacy build script and print its HTML
  Legacy {
    /// Path to vuessr.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, VuessrConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_vuessr_config(&cwd)?
    }
  };
  let config = load_vuessr_config(&path)?;
  Ok((path, config))
}

fn base_dir(config_path: &Path) -> &Path {
  config_path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."))
}

/// Diagnostics go to stderr so `render` and `legacy` output stays clean.
fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing();

  match cli.command {
    Command::Serve { config, port } => {
      let (config_path, vuessr_config) = resolve_config(config)?;
      serve::run_serve(&vuessr_config, base_dir(&config_path), port).await?;
    }
    Command::Render { path, config, user } => {
      let (_, vuessr_config) = resolve_config(config)?;
      render::run_render(&vuessr_config, &path, user).await?;
    }
    Command::Probe { config } => {
      let (_, vuessr_config) = resolve_config(config)?;
      probe::run_probe(&vuessr_config).await?;
    }
    Command::Legacy { config } => {
      let (config_path, vuessr_config) = resolve_config(config)?;
      legacy::run_legacy(&vuessr_config, base_dir(&config_path)).await?;
    }
  }

  Ok(())
}
