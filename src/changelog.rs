//! Dated release sections in a markdown changelog.
//!
//! The entry goes right after the first `---` separator found near the top of
//! the file, which is where the changelog header ends.

use chrono::NaiveDate;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::BumpKind;
use crate::error::{BumpError, Result};

/// Only this many leading lines are searched for the `---` separator
pub const SEPARATOR_SCAN_LINES: usize = 20;

/// Result of inserting a section into changelog text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogUpdate {
    /// New file content with the section inserted
    Inserted(String),
    /// A `## [version]` heading is already present
    AlreadyPresent,
    /// No separator within the first [`SEPARATOR_SCAN_LINES`] lines
    NoInsertionPoint,
}

/// What happened to the changelog file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogOutcome {
    Updated,
    Missing,
    AlreadyPresent,
    NoInsertionPoint,
}

/// Render the release section for `version`.
pub fn render_entry(version: &impl fmt::Display, kind: BumpKind, date: NaiveDate) -> String {
    format!(
        "## [{version}] - {date}\n\
         \n\
         ### Added\n\
         - Automated version bump ({kind})\n\
         \n\
         ### Changed\n\
         - See commit history for detailed changes\n\
         \n\
         ---\n\n",
        version = version,
        date = date.format("%Y-%m-%d"),
        kind = kind,
    )
}

/// Insert a release section into changelog text.
///
/// The section lands two lines below the first line that trims to `---`
/// (the separator and the blank line after it), or at the end when the file
/// is shorter than that.
pub fn insert_release_section(
    content: &str,
    version: &impl fmt::Display,
    kind: BumpKind,
    date: NaiveDate,
) -> ChangelogUpdate {
    if content.contains(&format!("## [{}]", version)) {
        return ChangelogUpdate::AlreadyPresent;
    }

    let mut lines: Vec<&str> = content.split('\n').collect();

    let separator = lines
        .iter()
        .take(SEPARATOR_SCAN_LINES)
        .position(|line| line.trim() == "---");

    let Some(separator) = separator else {
        return ChangelogUpdate::NoInsertionPoint;
    };

    let entry = render_entry(version, kind, date);
    let insert_at = (separator + 2).min(lines.len());
    lines.insert(insert_at, entry.as_str());

    ChangelogUpdate::Inserted(lines.join("\n"))
}

/// Apply [`insert_release_section`] to the changelog at `path`.
///
/// A missing file is not an error; the caller decides how to report it.
pub fn update_changelog(
    path: &Path,
    version: &impl fmt::Display,
    kind: BumpKind,
    date: NaiveDate,
) -> Result<ChangelogOutcome> {
    if !path.exists() {
        return Ok(ChangelogOutcome::Missing);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        BumpError::changelog(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    match insert_release_section(&content, version, kind, date) {
        ChangelogUpdate::Inserted(updated) => {
            fs::write(path, updated).map_err(|e| {
                BumpError::changelog(format!("Cannot write '{}': {}", path.display(), e))
            })?;
            tracing::debug!(path = %path.display(), %version, "changelog section inserted");
            Ok(ChangelogOutcome::Updated)
        }
        ChangelogUpdate::AlreadyPresent => Ok(ChangelogOutcome::AlreadyPresent),
        ChangelogUpdate::NoInsertionPoint => Ok(ChangelogOutcome::NoInsertionPoint),
    }
}
