use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use crate::core::engine::RemovedLine;

/// What a run did (or, for a dry run, would do) to the target.
#[derive(Debug, Clone, Serialize)]
pub struct DedupReport {
    pub target: PathBuf,
    /// Number of lines read from the target.
    pub total_lines: usize,
    /// Number of lines left after deduplication.
    pub kept_lines: usize,
    pub removed: Vec<RemovedLine>,
    pub dry_run: bool,
    /// Whether the target was rewritten.
    pub written: bool,
}

impl DedupReport {
    pub fn has_duplicates(&self) -> bool {
        !self.removed.is_empty()
    }
}

pub trait StatusReporter {
    fn report(&self, report: &DedupReport) -> Result<()>;
}

/// Prints a human-readable summary to the console.
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Formats the one-line summary for the target.
    ///
    /// 🟢: no repeated lines. 🟡: repeated lines found, nothing written.
    /// ✂️: repeated lines removed from the file.
    fn format_summary(&self, report: &DedupReport) -> String {
        let removed = report.removed.len();
        let status_icon = match (removed, report.written) {
            (0, _) => "🟢",
            (_, false) => "🟡",
            (_, true) => "✂️",
        };
        let verb = if report.written { "removed" } else { "duplicate" };

        format!(
            "{} {} ({} {} lines, {}/{} lines kept)",
            status_icon,
            report.target.display(),
            removed,
            verb,
            report.kept_lines,
            report.total_lines
        )
    }
}

impl StatusReporter for ConsoleReporter {
    fn report(&self, report: &DedupReport) -> Result<()> {
        println!("{}", self.format_summary(report));

        let show_lines = self.verbose || report.dry_run;
        if show_lines {
            for removed in &report.removed {
                println!(
                    "  └─ {}: {}",
                    format!("line {}", removed.line_number).yellow(),
                    removed.content.trim()
                );
            }
        }

        if report.dry_run && report.has_duplicates() {
            println!(
                "\n{}",
                "Run `fix-hooks run` to remove the duplicate lines.".bright_blue()
            );
        } else if report.written {
            println!("{}", "✓ Target rewritten".green().bold());
        }

        Ok(())
    }
}

/// Prints the report as pretty JSON on stdout.
pub struct JsonReporter;

impl StatusReporter for JsonReporter {
    fn report(&self, report: &DedupReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{json}");
        Ok(())
    }
}
