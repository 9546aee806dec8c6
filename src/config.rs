/// Configuration for git-info
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
///
/// The reader never looks configuration up on its own; callers build a
/// `Config` once and pass its values in.
use crate::artifacts::objects::commit::{DEFAULT_TIMEZONE, TzOffset};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the repository's `.git` directory
    #[serde(default = "default_git_dir")]
    pub git_dir: PathBuf,

    /// Timezone override as `±HHMM`; empty uses the author's timezone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// JSON file holding previously recorded refreshes
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Hash loose objects and compare against their id
    #[serde(default)]
    pub verify_objects: bool,
}

fn default_git_dir() -> PathBuf {
    PathBuf::from("/mnt/extra-addons/.git")
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_history_path() -> PathBuf {
    PathBuf::from("git-info-history.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_dir: default_git_dir(),
            timezone: default_timezone(),
            history_path: default_history_path(),
            verify_objects: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid TOML in {}", path.display()))?;

        config.validate()?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                tracing::debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overlay values that were given on the command line or environment
    pub fn with_overrides(
        mut self,
        git_dir: Option<PathBuf>,
        timezone: Option<String>,
        history_path: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        if let Some(git_dir) = git_dir {
            self.git_dir = git_dir;
        }
        if let Some(timezone) = timezone {
            self.timezone = timezone;
        }
        if let Some(history_path) = history_path {
            self.history_path = history_path;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.git_dir.as_os_str().is_empty() {
            anyhow::bail!("git_dir must not be empty");
        }

        if !self.timezone.is_empty() {
            TzOffset::parse(&self.timezone)
                .with_context(|| "timezone must be empty or of the form ±HHMM")?;
        }

        Ok(())
    }
}
