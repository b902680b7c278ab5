use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::builders::patterns::DedupPattern;
use crate::builders::validator::{ConfigValidator, StandardValidator};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "fix-hooks.toml";

/// The generated component the tool was written for.
pub const DEFAULT_TARGET: &str = "components/assistant/SevenDaysBoardView.tsx";

/// The declaration that the generator emitted twice.
pub const DEFAULT_PATTERN: &str = "const [scrollProgress, setScrollProgress] = useState(0)";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Copy the original content to `<target>.bak` before rewriting.
    pub backup: bool,
    /// Write through a temporary file and rename it over the target.
    pub atomic_write: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backup: false,
            atomic_write: true,
            verbose: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FixConfig {
    pub version: String,
    /// Path of the file to repair, relative to the config root unless absolute.
    pub target: PathBuf,
    pub patterns: Vec<DedupPattern>,
    #[serde(default)]
    pub settings: Settings,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            target: PathBuf::from(DEFAULT_TARGET),
            patterns: vec![DedupPattern::substring(DEFAULT_PATTERN)],
            settings: Settings::default(),
        }
    }
}

impl FixConfig {
    pub fn with_target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_patterns(mut self, patterns: Vec<DedupPattern>) -> Self {
        self.patterns = patterns;
        self
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    root: PathBuf,
}

impl ConfigManager {
    /// Uses `fix-hooks.toml` in the current working directory.
    pub fn new() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self::new_at(root))
    }

    /// Uses `fix-hooks.toml` under `root`; relative targets resolve against `root`.
    pub fn new_at(root: PathBuf) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        Self { config_path, root }
    }

    /// Points the manager at an explicit config file. Relative targets then
    /// resolve against the directory containing that file.
    pub fn with_config_path(config_path: PathBuf) -> Self {
        let root = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self { config_path, root }
    }

    /// Writes a default config file unless one already exists.
    ///
    /// Returns `true` if a new file was written.
    pub fn initialize(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        let default_config = FixConfig::default();
        self.save_config(&default_config)?;
        Ok(true)
    }

    /// Runs the standard validator and fails if it reports anything.
    pub fn validate_config(&self, config: &FixConfig) -> Result<()> {
        let validator = StandardValidator::new();
        let issues = validator.validate_config(config)?;

        if issues.is_empty() {
            return Ok(());
        }

        println!("⚠️  Found issues in configuration:");
        for issue in issues {
            println!("  - {issue}");
        }
        anyhow::bail!("Configuration validation failed.");
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Resolves the configured target against the config root.
    pub fn resolve_target(&self, config: &FixConfig) -> PathBuf {
        if config.target.is_absolute() {
            config.target.clone()
        } else {
            self.root.join(&config.target)
        }
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<FixConfig>;
    fn save_config(&self, config: &FixConfig) -> Result<()>;
    fn get_config_path(&self) -> &Path;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<FixConfig> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(FixConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn save_config(&self, config: &FixConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}
