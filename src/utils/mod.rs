use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use crate::builders::patterns::DedupPattern;
use crate::builders::reporter::{ConsoleReporter, JsonReporter, StatusReporter};
use crate::core::config::{ConfigManager, ConfigProvider, FixConfig};
use crate::core::engine::DedupEngine;

/// Command-line overrides shared by every subcommand.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub patterns: Vec<String>,
    pub backup: bool,
    pub json: bool,
    pub verbose: bool,
}

pub fn initialize_config(options: &RunOptions) -> Result<()> {
    let config_manager = get_config_manager(options)?;
    let path = config_manager.get_config_path().display().to_string();
    if config_manager.initialize()? {
        println!("✓ Wrote default configuration to {path}");
    } else {
        println!("ℹ️  {path} already exists");
    }
    Ok(())
}

pub fn validate_config(options: &RunOptions) -> Result<()> {
    let (config_manager, config) = load(options)?;
    config_manager.validate_config(&config)?;
    println!("✓ Configuration is valid.");
    Ok(())
}

/// Removes repeated lines from the target, in place.
pub fn run_fix(options: &RunOptions) -> Result<()> {
    let (config_manager, config) = load(options)?;
    let verbose = config.settings.verbose;
    let mut engine = DedupEngine::new(&config_manager, config)?;
    let report = engine.process(false)?;
    reporter(options.json, verbose).report(&report)
}

/// Reports repeated lines without writing; fails if there are any.
pub fn check(options: &RunOptions) -> Result<()> {
    let (config_manager, config) = load(options)?;
    let verbose = config.settings.verbose;
    let mut engine = DedupEngine::new(&config_manager, config)?;
    let report = engine.process(true)?;
    reporter(options.json, verbose).report(&report)?;

    if report.has_duplicates() {
        anyhow::bail!(
            "{} duplicate line(s) found in {}",
            report.removed.len(),
            report.target.display()
        );
    }
    Ok(())
}

pub fn restore(options: &RunOptions) -> Result<()> {
    let (config_manager, config) = load(options)?;
    let mut engine = DedupEngine::new(&config_manager, config)?;
    engine.restore()?;
    println!("✓ Restored {} from backup", engine.target().display());
    Ok(())
}

/// Loads the config file (or defaults) and applies command-line overrides.
fn load(options: &RunOptions) -> Result<(ConfigManager, FixConfig)> {
    let config_manager = get_config_manager(options)?;
    let config = apply_overrides(config_manager.load_config()?, options);
    debug!(?config, "effective configuration");
    Ok((config_manager, config))
}

fn apply_overrides(mut config: FixConfig, options: &RunOptions) -> FixConfig {
    if let Some(file) = &options.file {
        config = config.with_target(file.clone());
    }
    if !options.patterns.is_empty() {
        let patterns = options.patterns.iter().map(|p| DedupPattern::parse(p)).collect();
        config = config.with_patterns(patterns);
    }
    config.settings.backup |= options.backup;
    config.settings.verbose |= options.verbose;
    config
}

fn reporter(json: bool, verbose: bool) -> Box<dyn StatusReporter> {
    if json {
        Box::new(JsonReporter)
    } else {
        Box::new(ConsoleReporter::new(verbose))
    }
}

// Helper function to create ConfigManager instance
fn get_config_manager(options: &RunOptions) -> Result<ConfigManager> {
    match &options.config {
        Some(path) => Ok(ConfigManager::with_config_path(path.clone())),
        None => ConfigManager::new(),
    }
}
