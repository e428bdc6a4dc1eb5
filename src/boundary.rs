use std::fmt;
use std::path::PathBuf;

use crate::changelog::SEPARATOR_SCAN_LINES;

/// Non-fatal conditions met at the I/O boundary.
/// They are reported to the user and the run continues with a safe default.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits since the latest tag (or in the whole history)
    NoNewCommits { latest_tag: Option<String> },
    /// Commit history could not be read, treated as no commits
    UnreadableHistory { reason: String },
    /// Changelog file does not exist
    ChangelogMissing { path: PathBuf },
    /// Changelog has no `---` separator near the top
    ChangelogNoInsertionPoint { path: PathBuf },
    /// Changelog already has a section for the version
    ChangelogEntryExists { version: String },
    /// Sync step skipped because no command is configured
    SyncNotConfigured,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { latest_tag } => match latest_tag {
                Some(tag) => write!(
                    f,
                    "No commits found since tag '{}', no version bump needed",
                    tag
                ),
                None => write!(f, "No commits found, no version bump needed"),
            },
            BoundaryWarning::UnreadableHistory { reason } => {
                write!(f, "Could not read git commits: {}", reason)
            }
            BoundaryWarning::ChangelogMissing { path } => {
                write!(f, "{} not found, skipping update", path.display())
            }
            BoundaryWarning::ChangelogNoInsertionPoint { path } => write!(
                f,
                "Could not find insertion point in {} (no '---' within the first {} lines)",
                path.display(),
                SEPARATOR_SCAN_LINES
            ),
            BoundaryWarning::ChangelogEntryExists { version } => {
                write!(f, "Version {} already in changelog", version)
            }
            BoundaryWarning::SyncNotConfigured => {
                write!(f, "No sync command configured, skipping sync")
            }
        }
    }
}
