//! Presentation of run outcomes: text and json formatters.
//!
//! Reporters only write; they never decide the exit status.

use crate::diff::DiffSummary;
use crate::monitor::{CheckOutcome, CreateOutcome};
use crate::tree::walker::WalkIssue;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

/// Renders outcomes to a writer
pub trait Reporter {
    fn report_created(&self, outcome: &CreateOutcome, out: &mut dyn Write) -> io::Result<()>;
    fn report_check(&self, outcome: &CheckOutcome, out: &mut dyn Write) -> io::Result<()>;
}

/// Human-readable lines plus a summary table
#[derive(Debug, Clone, Copy)]
pub struct TextReporter {
    color: bool,
}

impl TextReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn tag_new(&self) -> String {
        if self.color {
            "[NEW]".green().bold().to_string()
        } else {
            "[NEW]".to_string()
        }
    }

    fn tag_changed(&self) -> String {
        if self.color {
            "[CHANGED]".yellow().bold().to_string()
        } else {
            "[CHANGED]".to_string()
        }
    }

    fn tag_deleted(&self) -> String {
        if self.color {
            "[DELETED]".red().bold().to_string()
        } else {
            "[DELETED]".to_string()
        }
    }

    fn tag_ok(&self) -> String {
        if self.color {
            "[OK]".green().to_string()
        } else {
            "[OK]".to_string()
        }
    }

    fn tag_created(&self) -> String {
        if self.color {
            "[+]".cyan().to_string()
        } else {
            "[+]".to_string()
        }
    }

    fn tag_warn(&self) -> String {
        if self.color {
            "[!]".magenta().to_string()
        } else {
            "[!]".to_string()
        }
    }

    fn write_issues(
        &self,
        unreadable: &[&str],
        walk_issues: &[WalkIssue],
        out: &mut dyn Write,
    ) -> io::Result<()> {
        for path in unreadable {
            writeln!(out, "{} Unreadable: {}", self.tag_warn(), path)?;
        }
        for issue in walk_issues {
            match &issue.path {
                Some(path) => writeln!(
                    out,
                    "{} Skipped: {} ({})",
                    self.tag_warn(),
                    path.display(),
                    issue.message
                )?,
                None => writeln!(out, "{} Skipped: {}", self.tag_warn(), issue.message)?,
            }
        }
        Ok(())
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Category counts as a bordered table
pub fn summary_table(summary: &DiffSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["New", "Changed", "Deleted", "Unchanged"]);
    table.add_row(vec![
        summary.new.to_string(),
        summary.changed.to_string(),
        summary.deleted.to_string(),
        summary.unchanged.to_string(),
    ]);
    table
}

impl Reporter for TextReporter {
    fn report_created(&self, outcome: &CreateOutcome, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{} Baseline created and saved to {}",
            self.tag_created(),
            outcome.baseline_path.display()
        )?;
        writeln!(out, "    Files recorded: {}", outcome.snapshot.len())?;
        self.write_issues(&outcome.unreadable(), &outcome.walk_issues, out)
    }

    fn report_check(&self, outcome: &CheckOutcome, out: &mut dyn Write) -> io::Result<()> {
        let diff = &outcome.diff;
        for path in &diff.new {
            writeln!(out, "{} File added: {}", self.tag_new(), path)?;
        }
        for path in &diff.changed {
            writeln!(out, "{} File modified: {}", self.tag_changed(), path)?;
        }
        for path in &diff.deleted {
            writeln!(out, "{} File missing: {}", self.tag_deleted(), path)?;
        }
        if diff.is_clean() {
            writeln!(out, "{} No changes detected. Files are intact.", self.tag_ok())?;
        }

        let unreadable: Vec<&str> = outcome.unreadable.iter().map(String::as_str).collect();
        self.write_issues(&unreadable, &outcome.walk_issues, out)?;

        writeln!(out)?;
        writeln!(out, "{}", summary_table(&diff.summary()))
    }
}

#[derive(Serialize)]
struct CreatedDocument<'a> {
    status: &'static str,
    baseline: String,
    files: usize,
    unreadable: Vec<&'a str>,
}

#[derive(Serialize)]
struct CheckDocument<'a> {
    status: &'static str,
    new: &'a [String],
    changed: &'a [String],
    deleted: &'a [String],
    unchanged_count: usize,
    unreadable: &'a [String],
}

/// One pretty-printed JSON document per run
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl JsonReporter {
    fn write_document<T: Serialize>(doc: &T, out: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, doc)?;
        writeln!(out)
    }
}

impl Reporter for JsonReporter {
    fn report_created(&self, outcome: &CreateOutcome, out: &mut dyn Write) -> io::Result<()> {
        let doc = CreatedDocument {
            status: "created",
            baseline: outcome.baseline_path.display().to_string(),
            files: outcome.snapshot.len(),
            unreadable: outcome.unreadable(),
        };
        Self::write_document(&doc, out)
    }

    fn report_check(&self, outcome: &CheckOutcome, out: &mut dyn Write) -> io::Result<()> {
        let diff = &outcome.diff;
        let doc = CheckDocument {
            status: if diff.has_changes() {
                "changes_detected"
            } else {
                "clean"
            },
            new: &diff.new,
            changed: &diff.changed,
            deleted: &diff.deleted,
            unchanged_count: diff.unchanged.len(),
            unreadable: &outcome.unreadable,
        };
        Self::write_document(&doc, out)
    }
}

/// Writes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report_created(&self, _outcome: &CreateOutcome, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn report_check(&self, _outcome: &CheckOutcome, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}
