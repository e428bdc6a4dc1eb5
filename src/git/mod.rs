//! Git history access
//!
//! The [Repository] trait is the narrow read-only view of git that the bump and
//! validation workflows need. Implementations:
//!
//! - [repository::Git2Repository]: real repository access through the `git2` crate
//! - [mock::MockRepository]: in-memory linear history for tests
//!
//! Workflows depend on the trait so classification can be exercised without a
//! repository on disk.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Length of the abbreviated hash shown in validation reports
pub const SHORT_HASH_LEN: usize = 8;

/// A commit as shown in validation reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Abbreviated commit hash
    pub short_hash: String,
    /// First line of the commit message
    pub subject: String,
}

impl CommitSummary {
    pub fn new(hash: &str, subject: impl Into<String>) -> Self {
        CommitSummary {
            short_hash: hash.chars().take(SHORT_HASH_LEN).collect(),
            subject: subject.into(),
        }
    }
}

/// Read-only git operations used by the workflows
pub trait Repository {
    /// Name of the nearest tag reachable from HEAD.
    ///
    /// Mirrors `git describe --tags --abbrev=0`; `Ok(None)` when no tag exists.
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Subjects of commits reachable from HEAD but not from `tag`, newest first.
    ///
    /// With `tag == None` the whole history of HEAD is returned.
    fn subjects_since(&self, tag: Option<&str>) -> Result<Vec<String>>;

    /// Commits on HEAD since its merge base with `{remote}/{base_branch}`, newest first.
    fn commits_since_base(&self, remote: &str, base_branch: &str) -> Result<Vec<CommitSummary>>;
}

/// Subjects of every commit since the latest tag.
///
/// Returns the tag that bounded the range together with the subjects.
pub fn subjects_since_latest_tag<R: Repository>(repo: &R) -> Result<(Option<String>, Vec<String>)> {
    let tag = repo.latest_tag()?;
    let subjects = repo.subjects_since(tag.as_deref())?;
    tracing::debug!(tag = ?tag, count = subjects.len(), "collected commit subjects");
    Ok((tag, subjects))
}
