use crate::error::Result;
use crate::git::CommitSummary;
use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    /// Walk from `head`, stopping at anything reachable from `hide`.
    fn walk(&self, head: Oid, hide: Option<Oid>) -> Result<Vec<(Oid, String)>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(head)?;

        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let subject = commit.summary().unwrap_or_default().to_string();
            commits.push((oid, subject));
        }

        Ok(commits)
    }
}

impl super::Repository for Git2Repository {
    fn latest_tag(&self) -> Result<Option<String>> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let description = match self.repo.describe(&options) {
            Ok(description) => description,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        Ok(Some(description.format(Some(&format))?))
    }

    fn subjects_since(&self, tag: Option<&str>) -> Result<Vec<String>> {
        let head = self.head_oid()?;
        let hide = match tag {
            Some(tag) => Some(self.repo.revparse_single(tag)?.peel_to_commit()?.id()),
            None => None,
        };

        Ok(self
            .walk(head, hide)?
            .into_iter()
            .map(|(_, subject)| subject)
            .collect())
    }

    fn commits_since_base(&self, remote: &str, base_branch: &str) -> Result<Vec<CommitSummary>> {
        let head = self.head_oid()?;
        let base_ref = format!("refs/remotes/{}/{}", remote, base_branch);
        let base_tip = self.repo.revparse_single(&base_ref)?.peel_to_commit()?.id();
        let merge_base = self.repo.merge_base(head, base_tip)?;

        tracing::debug!(%base_ref, %merge_base, "resolved merge base");

        Ok(self
            .walk(head, Some(merge_base))?
            .into_iter()
            .map(|(oid, subject)| CommitSummary::new(&oid.to_string(), subject))
            .collect())
    }
}
