use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FixError, FixResult};

/// An enum that defines how a pattern's specification selects lines.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternType {
    /// The line contains the specification verbatim. This is the default and
    /// the form the repeated hook declarations are matched with.
    Substring,
    /// The line matches a regular expression. On the command line this is
    /// written enclosed in `/` delimiters, e.g. `/useState\(0\)/`.
    LineRegex,
}

/// A single dedup pattern from the configuration or the command line.
///
/// Every line after the first one matching the pattern is removed from the
/// target file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DedupPattern {
    /// How `specification` is interpreted.
    pub pattern_type: PatternType,
    /// The raw text of the pattern: a literal substring or a regex body.
    pub specification: String,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::Substring => write!(f, "substring"),
            PatternType::LineRegex => write!(f, "line-regex"),
        }
    }
}

impl fmt::Display for DedupPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern_type {
            PatternType::Substring => write!(f, "{}", self.specification),
            PatternType::LineRegex => write!(f, "/{}/", self.specification),
        }
    }
}

/// The `PatternMatcher` trait lets the engine test a line without caring
/// which kind of pattern produced the matcher.
pub trait PatternMatcher {
    /// Checks if a single line of content is selected by the pattern.
    ///
    /// # Arguments
    /// * `line`: The line to check, without its terminator.
    ///
    /// # Returns
    /// `true` if the line matches, `false` otherwise.
    fn matches_line(&self, line: &str) -> bool;
}

/// A pattern made ready for matching. Regexes are compiled once here rather
/// than once per line.
#[derive(Debug)]
pub enum LineMatcher {
    Substring(String),
    Regex(Regex),
}

impl PatternMatcher for LineMatcher {
    fn matches_line(&self, line: &str) -> bool {
        match self {
            LineMatcher::Substring(needle) => line.contains(needle.as_str()),
            LineMatcher::Regex(regex) => regex.is_match(line),
        }
    }
}

impl DedupPattern {
    /// Creates a literal substring pattern.
    pub fn substring(specification: impl Into<String>) -> Self {
        Self {
            pattern_type: PatternType::Substring,
            specification: specification.into(),
        }
    }

    /// Parses a pattern as typed on the command line.
    ///
    /// Text enclosed in slashes (`/pattern/`) becomes a `LineRegex` pattern with
    /// the slashes stripped; anything else is taken as a literal substring.
    pub fn parse(raw: &str) -> Self {
        if raw.len() > 2 && raw.starts_with('/') && raw.ends_with('/') {
            Self {
                pattern_type: PatternType::LineRegex,
                specification: raw[1..raw.len() - 1].to_string(),
            }
        } else {
            Self::substring(raw)
        }
    }

    /// Checks that the specification is usable before any file is touched.
    ///
    /// An empty specification would match every line, which would collapse the
    /// whole file down to its first line.
    pub fn validate(&self) -> FixResult<()> {
        if self.specification.is_empty() {
            return Err(FixError::InvalidPattern(
                "pattern specification cannot be empty".to_string(),
            ));
        }
        if self.pattern_type == PatternType::LineRegex {
            Regex::new(&self.specification)
                .map_err(|e| FixError::InvalidPattern(format!("{}: {e}", self.specification)))?;
        }
        Ok(())
    }

    /// Builds the matcher used by the engine.
    pub fn matcher(&self) -> FixResult<LineMatcher> {
        self.validate()?;
        match self.pattern_type {
            PatternType::Substring => Ok(LineMatcher::Substring(self.specification.clone())),
            PatternType::LineRegex => Regex::new(&self.specification)
                .map(LineMatcher::Regex)
                .map_err(|e| FixError::InvalidPattern(format!("{}: {e}", self.specification))),
        }
    }
}
