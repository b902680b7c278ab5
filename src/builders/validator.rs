use anyhow::Result;
use std::collections::HashSet;

use crate::builders::patterns;
use crate::core::config;

/// The `ConfigValidator` trait defines the public interface for validating
/// a `FixConfig` before the engine touches the target file.
pub trait ConfigValidator {
    /// Performs a full validation of the `FixConfig` and returns a list of
    /// issues found.
    ///
    /// # Arguments
    /// * `config`: The `FixConfig` to be validated.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` where each string describes one validation issue.
    /// An empty vector means the configuration is usable.
    fn validate_config(&self, config: &config::FixConfig) -> Result<Vec<String>>;

    /// Validates a single `DedupPattern` and returns a list of issues.
    ///
    /// # Arguments
    /// * `pattern`: The `DedupPattern` to be validated.
    ///
    /// # Returns
    /// A `Result<Vec<String>>` containing one string per problem with the
    /// pattern's syntax or semantics.
    fn validate_pattern(&self, pattern: &patterns::DedupPattern) -> Result<Vec<String>>;
}

/// The `StandardValidator` performs the checks every run goes through.
pub struct StandardValidator;

impl StandardValidator {
    pub fn new() -> Self {
        Self
    }

    /// Flags patterns that appear more than once with the same kind and text.
    fn check_duplicate_patterns(&self, patterns: &[patterns::DedupPattern]) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for pattern in patterns {
            if !seen.insert((pattern.pattern_type, pattern.specification.as_str())) {
                warnings.push(format!("Duplicate pattern: {pattern}"));
            }
        }
        warnings
    }
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for StandardValidator {
    /// Checks, in order:
    /// - Version compatibility.
    /// - That a target path and at least one pattern are configured.
    /// - Duplicate patterns.
    /// - The validity of each individual pattern.
    fn validate_config(&self, config: &config::FixConfig) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if config.version != "1.0" {
            issues.push(format!("Unsupported config version: {}", config.version));
        }

        if config.target.as_os_str().is_empty() {
            issues.push("Target file path is empty".to_string());
        }

        if config.patterns.is_empty() {
            issues.push("No dedup patterns configured".to_string());
        }

        issues.extend(self.check_duplicate_patterns(&config.patterns));

        for pattern in &config.patterns {
            issues.extend(self.validate_pattern(pattern)?);
        }

        Ok(issues)
    }

    /// Runs the pattern's own `validate()` for syntax, then flags regexes that
    /// are valid but select every line.
    fn validate_pattern(&self, pattern: &patterns::DedupPattern) -> Result<Vec<String>> {
        let mut issues = Vec::new();

        if let Err(e) = pattern.validate() {
            issues.push(e.to_string());
        }

        if pattern.pattern_type == patterns::PatternType::LineRegex
            && matches!(pattern.specification.as_str(), ".*" | "^" | "$" | "^.*$")
        {
            issues.push(format!(
                "Pattern '{pattern}' matches every line and would keep only the first"
            ));
        }

        Ok(issues)
    }
}
