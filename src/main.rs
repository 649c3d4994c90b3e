use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hooksync::logging::{debug, warn};
use hooksync::sync::{Outcome, SyncStatus};
use hooksync::{cfg, hash, logging, sync, ui, uninstall, vcs};

/// Hooksync - installs git hooks from a versioned hooks/ directory
#[derive(Parser)]
#[command(name = "hooksync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root containing the hooks directory (defaults to the current directory)
    #[arg(long, global = true, env = "HOOKSYNC_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Path to config file (defaults to <project>/hooksync.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default hooksync.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Install hooks if the hooks directory changed since the last install
    Install {
        /// Reinstall even if hooks are up to date
        #[arg(short, long)]
        force: bool,
    },

    /// Install hooks only inside a git repository with auto-install enabled
    Auto,

    /// Remove installed hooks, keeping preserved entries
    Uninstall,

    /// Show whether installed hooks match the hooks directory
    Status,

    /// Print the signature of the hooks directory
    Signature,

    /// Show the effective configuration
    Config {
        /// Print the configuration as TOML
        #[arg(long)]
        show: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::init_tracing(cli.verbose);
    ui::init();

    if let Err(e) = run(cli) {
        ui::error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let config_path = cli
        .config
        .unwrap_or_else(|| cfg::default_path(&project_dir));
    debug!(project = %project_dir.display(), config = %config_path.display(), "resolved paths");

    match cli.command {
        Commands::Init { force } => cmd_init(&config_path, force),
        Commands::Install { force } => cmd_install(&project_dir, &config_path, force),
        Commands::Auto => cmd_auto(&project_dir, &config_path),
        Commands::Uninstall => cmd_uninstall(&project_dir, &config_path),
        Commands::Status => cmd_status(&project_dir, &config_path),
        Commands::Signature => cmd_signature(&project_dir, &config_path),
        Commands::Config { show } => cmd_config(&config_path, show),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    cfg::init(config_path, force)?;
    ui::success(&format!("Wrote {}", config_path.display()));
    ui::hint("Put hook scripts in hooks/ and run 'hooksync install'");
    Ok(())
}

fn cmd_install(project_dir: &Path, config_path: &Path, force: bool) -> Result<()> {
    let config = cfg::load(config_path)?;
    let source = config.source_dir(project_dir);
    let target = config.target_dir(project_dir)?;
    debug!(source = %source.display(), target = %target.display(), force, "installing hooks");

    let report = sync::sync_with(&source, &target, &config.sync_options(force))
        .with_context(|| format!("Failed to install hooks into {}", target.display()))?;

    for step in &report.steps {
        ui::step(step);
    }

    match &report.outcome {
        Outcome::Skipped => warn!(source = %source.display(), "hooks directory missing"),
        Outcome::Unchanged { .. } => debug!("marker matches current signature"),
        Outcome::Changed { installed, .. } => {
            ui::success(&format!("Installed {} hook(s)", installed.len()));
            ui::print_list(installed);
        }
    }

    Ok(())
}

fn cmd_auto(project_dir: &Path, config_path: &Path) -> Result<()> {
    if !vcs::is_repository(project_dir) {
        ui::info("Not a git repository, skipping hooks installation");
        return Ok(());
    }

    let config = cfg::load(config_path)?;
    if !config.install.auto {
        ui::info("Automatic installation disabled in config, skipping");
        return Ok(());
    }

    ui::info("Installing git hooks");
    cmd_install(project_dir, config_path, false)
}

fn cmd_uninstall(project_dir: &Path, config_path: &Path) -> Result<()> {
    let config = cfg::load(config_path)?;
    let target = config.target_dir(project_dir)?;
    debug!(target = %target.display(), "uninstalling hooks");

    let report =
        uninstall::uninstall_with_marker(&target, &config.preserved(), &config.hooks.marker)
            .with_context(|| format!("Failed to uninstall hooks from {}", target.display()))?;

    if report.removed.is_empty() {
        ui::info("No installed hooks to remove");
    } else {
        ui::success(&format!("Removed {} file(s)", report.removed_count()));
        ui::print_list(&report.removed);
    }

    if !report.kept.is_empty() {
        ui::section("Kept:");
        ui::print_list(&report.kept);
    }

    Ok(())
}

fn cmd_status(project_dir: &Path, config_path: &Path) -> Result<()> {
    let config = cfg::load(config_path)?;
    let source = config.source_dir(project_dir);
    let target = config.target_dir(project_dir)?;

    match sync::status(&source, &target, &config.hooks.marker)? {
        SyncStatus::MissingSource => {
            ui::warn(&format!("{} not found", source.display()));
        }
        SyncStatus::NotInstalled { current } => {
            ui::warn(&format!(
                "Hooks not installed ({} hook(s) available)",
                current.entry_count()
            ));
            ui::hint("Run 'hooksync install' to install them");
        }
        SyncStatus::UpToDate { signature } => {
            ui::success(&format!(
                "Hooks up to date ({} hook(s))",
                signature.entry_count()
            ));
        }
        SyncStatus::Stale { installed, current } => {
            ui::warn("Installed hooks are out of date");
            ui::section("Installed:");
            print_signature(&installed);
            ui::section("Current:");
            print_signature(&current);
            ui::hint("Run 'hooksync install' to update them");
        }
    }

    Ok(())
}

fn cmd_signature(project_dir: &Path, config_path: &Path) -> Result<()> {
    let config = cfg::load(config_path)?;
    let signature = hash::compute_signature(&config.source_dir(project_dir))?;
    if !signature.is_empty() {
        println!("{}", signature);
    }
    Ok(())
}

fn cmd_config(config_path: &Path, show: bool) -> Result<()> {
    if show {
        let config = cfg::load(config_path)?;
        println!("{}", toml::to_string_pretty(&config)?);
    } else {
        ui::hint("Use --show to view the effective configuration");
    }
    Ok(())
}

fn print_signature(signature: &hash::Signature) {
    let lines: Vec<String> = signature.as_str().lines().map(str::to_string).collect();
    if lines.is_empty() {
        ui::print_list(&["(no hooks)".to_string()]);
    } else {
        ui::print_list(&lines);
    }
}
