use crate::error::{BumpError, Result};
use crate::git::{CommitSummary, Repository};
use std::collections::HashMap;

/// Mock repository with a linear history, for testing without git on disk
///
/// Commits are appended oldest first. Tags and remote branches point at
/// positions in that history.
#[derive(Debug, Clone, Default)]
pub struct MockRepository {
    commits: Vec<CommitSummary>,
    tags: Vec<(String, usize)>,
    remote_branches: HashMap<String, usize>,
    unreadable: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit on top of HEAD
    pub fn add_commit(&mut self, subject: impl Into<String>) -> &mut Self {
        let hash = format!("{:08x}{:032x}", self.commits.len() + 1, 0);
        self.commits.push(CommitSummary::new(&hash, subject));
        self
    }

    /// Tag the current HEAD commit
    pub fn tag_head(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(head) = self.commits.len().checked_sub(1) {
            self.tags.push((name.into(), head));
        }
        self
    }

    /// Point `{remote}/{branch}` at the current HEAD commit
    pub fn set_remote_branch_at_head(&mut self, remote: &str, branch: &str) -> &mut Self {
        if let Some(head) = self.commits.len().checked_sub(1) {
            self.remote_branches
                .insert(format!("{}/{}", remote, branch), head);
        }
        self
    }

    /// Make every history query fail
    pub fn make_unreadable(&mut self) -> &mut Self {
        self.unreadable = true;
        self
    }

    fn check_readable(&self) -> Result<()> {
        if self.unreadable {
            return Err(BumpError::Git(git2::Error::from_str(
                "mock repository is unreadable",
            )));
        }
        Ok(())
    }

    /// Commits after position `after` (exclusive), newest first
    fn newer_than(&self, after: Option<usize>) -> Vec<CommitSummary> {
        let start = after.map_or(0, |index| index + 1);
        self.commits[start.min(self.commits.len())..]
            .iter()
            .rev()
            .cloned()
            .collect()
    }
}

impl Repository for MockRepository {
    fn latest_tag(&self) -> Result<Option<String>> {
        self.check_readable()?;
        Ok(self
            .tags
            .iter()
            .max_by_key(|(_, index)| *index)
            .map(|(name, _)| name.clone()))
    }

    fn subjects_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        self.check_readable()?;

        let after = match tag {
            Some(tag) => Some(
                self.tags
                    .iter()
                    .find(|(name, _)| name == tag)
                    .map(|(_, index)| *index)
                    .ok_or_else(|| {
                        BumpError::Git(git2::Error::from_str(&format!("tag not found: {}", tag)))
                    })?,
            ),
            None => None,
        };

        Ok(self
            .newer_than(after)
            .into_iter()
            .map(|commit| commit.subject)
            .collect())
    }

    fn commits_since_base(&self, remote: &str, base_branch: &str) -> Result<Vec<CommitSummary>> {
        self.check_readable()?;

        let key = format!("{}/{}", remote, base_branch);
        let base = self.remote_branches.get(&key).copied().ok_or_else(|| {
            BumpError::Git(git2::Error::from_str(&format!("remote branch not found: {}", key)))
        })?;

        Ok(self.newer_than(Some(base)))
    }
}
