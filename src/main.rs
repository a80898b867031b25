use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use yb_node_manager::config::loader::load_config_or_default;
use yb_node_manager::inventory::load_inventory_from_file;
use yb_node_manager::{
    DevopsConfig, DryRunExecutor, LogCollector, NodeManager, NodeTaskParams, ReleaseManager,
};

#[derive(Parser, Debug)]
#[command(name = "yb_node_manager", version, about = "Compose devops instance commands for cluster nodes")]
struct Cli {
    /// application.toml to read (defaults to the global settings file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose the command for a node task and print it without running it.
    Compose {
        /// JSON node task parameters; the action is read from its "action" tag
        #[arg(long)]
        request: PathBuf,

        /// JSON inventory of universes, access keys and node instances
        #[arg(long)]
        inventory: PathBuf,

        /// Releases directory (overrides yb.releases_path)
        #[arg(long)]
        releases: Option<PathBuf>,

        /// Print the invocation as JSON instead of a shell command line
        #[arg(long)]
        json: bool,
    },
    /// List the release versions discovered in a releases directory.
    Releases {
        /// Releases directory (overrides yb.releases_path)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn load_releases(dir: Option<&Path>, config: &DevopsConfig) -> yb_node_manager::Result<ReleaseManager> {
    match dir.or(config.yb.releases_path.as_deref()) {
        Some(path) => Ok(ReleaseManager::from_directory(path)?),
        None => {
            log::warn!("[Main] No releases directory configured, release lookups will fail");
            Ok(ReleaseManager::new())
        }
    }
}

fn main() -> yb_node_manager::Result<()> {
    let cli = Cli::parse();

    // =========================================================================
    // LOGGING INITIALIZATION - MUST BE FIRST
    // =========================================================================
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let mut collector = LogCollector::new(level);
    if let Some(path) = &cli.log_file {
        collector = collector.with_file(path)?;
    }
    if let Err(e) = collector.install() {
        eprintln!("[Main] WARNING: {}", e);
    }

    let config = load_config_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Compose {
            request,
            inventory,
            releases,
            json,
        } => {
            let content = std::fs::read_to_string(&request)
                .map_err(|e| format!("Failed to read request {}: {}", request.display(), e))?;
            let params: NodeTaskParams = serde_json::from_str(&content)?;
            let inventory = load_inventory_from_file(&inventory)?;
            let releases = load_releases(releases.as_deref(), &config)?;

            let executor = DryRunExecutor::new(config.ybcloud_script());
            log::debug!("[Main] Dry run against {}", executor.script().display());
            let manager = NodeManager::new(
                Arc::new(inventory),
                Arc::new(releases),
                config,
                Arc::new(executor),
            );

            let action = params.command_type();
            if json {
                let invocation = manager
                    .compose(action, &params)
                    .map_err(|e| e.user_message())?;
                println!("{}", serde_json::to_string_pretty(&invocation)?);
            } else {
                let response = manager
                    .node_command(action, &params)
                    .map_err(|e| e.user_message())?;
                println!("{}", response.message);
            }
        }
        Commands::Releases { dir } => {
            let releases = load_releases(dir.as_deref(), &config)?;
            for version in releases.versions() {
                println!("{}", version);
            }
        }
    }

    log::logger().flush();
    Ok(())
}
