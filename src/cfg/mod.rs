use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sync::marker::DEFAULT_MARKER_NAME;
use crate::sync::SyncOptions;
use crate::uninstall::DEFAULT_PRESERVED;

pub const CONFIG_FILE_NAME: &str = "hooksync.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hooks: HooksConfig,

    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Hook scripts, relative to the project directory
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Install location; defaults to `<git dir>/hooks`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,

    #[serde(default = "default_marker")]
    pub marker: String,

    /// Entries never removed by uninstall
    #[serde(default = "default_preserve")]
    pub preserve: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Whether `hooksync auto` installs hooks
    #[serde(default = "default_auto")]
    pub auto: bool,
}

impl Default for HooksConfig {
    fn default() -> Self {
        HooksConfig {
            source: default_source(),
            target: None,
            marker: default_marker(),
            preserve: default_preserve(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            auto: default_auto(),
        }
    }
}

impl Config {
    pub fn source_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.hooks.source)
    }

    /// Explicit target if configured, otherwise the repository's hooks directory.
    pub fn target_dir(&self, project_dir: &Path) -> Result<PathBuf> {
        match &self.hooks.target {
            Some(target) => Ok(project_dir.join(target)),
            None => crate::vcs::hooks_dir(project_dir),
        }
    }

    pub fn preserved(&self) -> BTreeSet<String> {
        self.hooks.preserve.iter().cloned().collect()
    }

    pub fn sync_options(&self, force: bool) -> SyncOptions {
        SyncOptions {
            marker_name: self.hooks.marker.clone(),
            force,
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("hooks")
}

fn default_marker() -> String {
    DEFAULT_MARKER_NAME.to_string()
}

fn default_preserve() -> Vec<String> {
    DEFAULT_PRESERVED.iter().map(|s| s.to_string()).collect()
}

fn default_auto() -> bool {
    true
}

pub fn default_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    save(config_path, &Config::default())
}

/// Loads the config, falling back to defaults when the file is absent.
pub fn load(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

    validate(&config)?;
    Ok(config)
}

pub fn save(config_path: &Path, config: &Config) -> Result<()> {
    let toml_string = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(config_path, toml_string).context("Failed to write config file")?;
    Ok(())
}

fn validate(config: &Config) -> Result<()> {
    let marker = &config.hooks.marker;
    if marker.is_empty()
        || marker == "."
        || marker == ".."
        || marker.contains('/')
        || marker.contains('\\')
    {
        anyhow::bail!("hooks.marker must be a plain file name, got {:?}", marker);
    }
    Ok(())
}
