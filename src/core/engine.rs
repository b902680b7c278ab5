use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::builders::backup::{BackupProvider, FileBackup};
use crate::builders::patterns::{DedupPattern, PatternMatcher};
use crate::builders::reporter::DedupReport;
use crate::core::config::{ConfigManager, FixConfig};
use crate::core::document::{Document, line_body};
use crate::error::FixResult;

/// A line dropped by a dedup pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedLine {
    /// 1-based position of the line in the file as it was read.
    pub line_number: usize,
    /// The pattern that made this line a repeat.
    pub pattern: String,
    /// The line without its terminator.
    pub content: String,
}

/// Result of deduplicating a sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DedupOutcome {
    pub lines: Vec<String>,
    pub removed: Vec<RemovedLine>,
}

/// Keeps the first line selected by `pattern` and drops every later one.
///
/// Lines the pattern does not select pass through untouched and in order, so
/// the output is always a subsequence of `lines`. Fails only if the pattern
/// itself is invalid.
pub fn dedup_lines(lines: &[String], pattern: &DedupPattern) -> FixResult<DedupOutcome> {
    let matcher = pattern.matcher()?;
    let numbered = lines.iter().cloned().enumerate().map(|(i, l)| (i + 1, l));
    let (kept, dropped) = dedup_numbered(numbered.collect(), &matcher);

    Ok(DedupOutcome {
        lines: kept.into_iter().map(|(_, line)| line).collect(),
        removed: removed_lines(dropped, pattern),
    })
}

fn removed_lines(dropped: Vec<(usize, String)>, pattern: &DedupPattern) -> Vec<RemovedLine> {
    dropped
        .into_iter()
        .map(|(line_number, line)| RemovedLine {
            line_number,
            pattern: pattern.to_string(),
            content: line_body(&line).to_string(),
        })
        .collect()
}

/// The single pass itself. Lines carry their original numbers so several
/// passes can run back to back and still report input positions.
fn dedup_numbered<M: PatternMatcher + ?Sized>(
    lines: Vec<(usize, String)>,
    matcher: &M,
) -> (Vec<(usize, String)>, Vec<(usize, String)>) {
    let mut seen = false;
    let mut kept = Vec::with_capacity(lines.len());
    let mut dropped = Vec::new();

    for (number, line) in lines {
        if matcher.matches_line(line_body(&line)) {
            if seen {
                dropped.push((number, line));
                continue;
            }
            seen = true;
        }
        kept.push((number, line));
    }

    (kept, dropped)
}

/// Runs one pass per pattern, in order, each with its own seen flag.
///
/// A later pass only sees the lines earlier passes kept, so a line matching
/// two patterns that was dropped as a repeat of the first does not count as
/// the first match of the second.
pub fn apply_patterns(
    document: &Document,
    patterns: &[DedupPattern],
) -> FixResult<(Document, Vec<RemovedLine>)> {
    let mut lines: Vec<(usize, String)> = document
        .lines()
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .collect();
    let mut removed = Vec::new();

    for pattern in patterns {
        let matcher = pattern.matcher()?;
        let (kept, dropped) = dedup_numbered(lines, &matcher);
        debug!(%pattern, removed = dropped.len(), "dedup pass");

        removed.extend(removed_lines(dropped, pattern));
        lines = kept;
    }

    removed.sort_by_key(|r| r.line_number);
    let document = Document::from_lines(lines.into_iter().map(|(_, line)| line).collect());
    Ok((document, removed))
}

/// Reads the configured target, removes repeated lines and writes it back.
pub struct DedupEngine {
    config: FixConfig,
    target: PathBuf,
    backup: Option<Box<dyn BackupProvider>>,
}

impl DedupEngine {
    /// Validates `config` and prepares an engine for its target.
    ///
    /// Nothing is read from or written to the target until `process` runs.
    pub fn new(config_manager: &ConfigManager, config: FixConfig) -> Result<Self> {
        config_manager.validate_config(&config)?;

        let target = config_manager.resolve_target(&config);
        let backup: Option<Box<dyn BackupProvider>> = if config.settings.backup {
            Some(Box::new(FileBackup::new()))
        } else {
            None
        };

        Ok(Self {
            config,
            target,
            backup,
        })
    }

    /// Replaces the backup provider chosen from the settings.
    pub fn with_backup(mut self, backup: Box<dyn BackupProvider>) -> Self {
        self.backup = Some(backup);
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Reads, deduplicates and, unless `dry_run`, rewrites the target.
    ///
    /// The target is rewritten even when nothing was removed.
    pub fn process(&mut self, dry_run: bool) -> Result<DedupReport> {
        let original = Document::read(&self.target)?;
        let (fixed, removed) = apply_patterns(&original, &self.config.patterns)?;

        let mut report = DedupReport {
            target: self.target.clone(),
            total_lines: original.len(),
            kept_lines: fixed.len(),
            removed,
            dry_run,
            written: false,
        };

        if dry_run {
            debug!(removed = report.removed.len(), "dry run, target left untouched");
            return Ok(report);
        }

        if let Some(backup) = self.backup.as_mut() {
            backup
                .store_backup(&self.target, &original.to_content())
                .context("Failed to back up target before rewriting")?;
        }

        fixed.write(&self.target, self.config.settings.atomic_write)?;
        report.written = true;
        info!(
            target = %self.target.display(),
            removed = report.removed.len(),
            "rewrote target"
        );

        Ok(report)
    }

    /// Takes a backup back out of the provider, if any, and restores it.
    pub fn restore(&mut self) -> Result<()> {
        let mut provider: Box<dyn BackupProvider> = match self.backup.take() {
            Some(provider) => provider,
            None => Box::new(FileBackup::new()),
        };
        let result = crate::builders::backup::restore(provider.as_mut(), &self.target);
        self.backup = Some(provider);
        result.map_err(anyhow::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn target(text: &str) -> DedupPattern {
        DedupPattern::substring(text)
    }

    #[test]
    fn test_keeps_first_occurrence_only() {
        let input = lines(&["a\n", "X\n", "b\n", "X\n", "c\n"]);
        let outcome = dedup_lines(&input, &target("X")).unwrap();
        assert_eq!(outcome.lines, lines(&["a\n", "X\n", "b\n", "c\n"]));
        assert_eq!(outcome.removed.len(), 1);
        assert_eq!(outcome.removed[0].line_number, 4);
        assert_eq!(outcome.removed[0].content, "X");
        assert_eq!(outcome.removed[0].pattern, "X");
    }

    #[test]
    fn test_three_occurrences_interspersed() {
        let input = lines(&["X1\n", "p\n", "X2\n", "q\n", "r\n", "X3\n", "s\n"]);
        let outcome = dedup_lines(&input, &target("X")).unwrap();
        assert_eq!(outcome.lines, lines(&["X1\n", "p\n", "q\n", "r\n", "s\n"]));
    }

    #[test]
    fn test_no_match_passes_through() {
        let input = lines(&["a\n", "b\n", "c"]);
        let outcome = dedup_lines(&input, &target("X")).unwrap();
        assert_eq!(outcome.lines, input);
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let outcome = dedup_lines(&[], &target("X")).unwrap();
        assert!(outcome.lines.is_empty());
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = lines(&["X\n", "X\n", "a\n", "xX\n", "X"]);
        let once = dedup_lines(&input, &target("X")).unwrap();
        let twice = dedup_lines(&once.lines, &target("X")).unwrap();
        assert_eq!(once.lines, twice.lines);
        assert!(twice.removed.is_empty());
    }

    #[test]
    fn test_output_is_subsequence_of_input() {
        let input = lines(&["a\n", "X\n", "b\r\n", "X\r\n", "X", "c\n"]);
        let outcome = dedup_lines(&input, &target("X")).unwrap();

        let mut rest = input.iter();
        for line in &outcome.lines {
            assert!(rest.any(|candidate| candidate == line), "{line:?} out of order");
        }
    }

    #[test]
    fn test_terminator_does_not_affect_matching() {
        let input = lines(&["X\r\n", "X\n", "X"]);
        let outcome = dedup_lines(&input, &target("X")).unwrap();
        assert_eq!(outcome.lines, lines(&["X\r\n"]));
    }

    #[test]
    fn test_apply_patterns_reports_original_line_numbers() {
        let document = Document::from_content("A\nB\nA\nB\nA\n");
        let patterns = vec![DedupPattern::substring("A"), DedupPattern::substring("B")];
        let (fixed, removed) = apply_patterns(&document, &patterns).unwrap();

        assert_eq!(fixed.to_content(), "A\nB\n");
        let numbers: Vec<usize> = removed.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![3, 4, 5]);
        assert_eq!(removed[1].pattern, "B");
    }

    #[test]
    fn test_overlapping_patterns_see_only_retained_lines() {
        let document = Document::from_content("A\nA B\nB\n");
        let patterns = vec![DedupPattern::substring("A"), DedupPattern::substring("B")];
        let (fixed, removed) = apply_patterns(&document, &patterns).unwrap();

        // "A B" goes in the A pass, so "B" is the first B the B pass sees.
        assert_eq!(fixed.to_content(), "A\nB\n");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].line_number, 2);
        assert_eq!(removed[0].pattern, "A");
    }

    #[test]
    fn test_dedup_lines_rejects_invalid_pattern() {
        assert!(dedup_lines(&lines(&["a\n"]), &target("")).is_err());
    }

    #[test]
    fn test_apply_patterns_rejects_invalid_pattern() {
        let document = Document::from_content("a\n");
        assert!(apply_patterns(&document, &[DedupPattern::substring("")]).is_err());
    }
}
