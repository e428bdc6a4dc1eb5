use crate::error::{BumpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("version pattern is valid"));

/// Two-component project version (`MAJOR.MINOR`), there is no patch component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64) -> Self {
        Version { major, minor }
    }

    /// Parse a version string of exactly `digits.digits` (e.g. "3.7").
    ///
    /// No surrounding whitespace, prefix or patch component is accepted;
    /// callers reading from files trim the content first.
    pub fn parse(input: &str) -> Result<Self> {
        if !VERSION_REGEX.is_match(input) {
            return Err(BumpError::version(format!(
                "Invalid version format '{}' - expected X.Y (e.g., 3.8)",
                input
            )));
        }

        let (major, minor) = input
            .split_once('.')
            .ok_or_else(|| BumpError::version(format!("Invalid version format '{}'", input)))?;

        let major = major
            .parse::<u64>()
            .map_err(|_| BumpError::version(format!("Invalid major version: {}", major)))?;
        let minor = minor
            .parse::<u64>()
            .map_err(|_| BumpError::version(format!("Invalid minor version: {}", minor)))?;

        Ok(Version { major, minor })
    }

    /// Bump version according to bump type
    pub fn bump(&self, bump: VersionBump) -> Self {
        match bump {
            VersionBump::Major => Version {
                major: self.major.saturating_add(1),
                minor: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.saturating_add(1),
            },
            VersionBump::None => *self,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// A validated version together with the exact text it came from
///
/// Leading zeros are legal (`03.7`), so the text is what gets compared,
/// printed and written back. Only a real bump renders new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionText {
    text: String,
    version: Version,
}

impl VersionText {
    /// Validate `input` as `digits.digits` and keep it verbatim
    pub fn parse(input: &str) -> Result<Self> {
        let version = Version::parse(input)?;
        Ok(VersionText {
            text: input.to_string(),
            version,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Apply `bump`; `VersionBump::None` keeps the original text
    pub fn bump(&self, bump: VersionBump) -> Self {
        match bump {
            VersionBump::None => self.clone(),
            _ => VersionText::from(self.version.bump(bump)),
        }
    }
}

impl From<Version> for VersionText {
    fn from(version: Version) -> Self {
        VersionText {
            text: version.to_string(),
            version,
        }
    }
}

impl fmt::Display for VersionText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Outcome of commit classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    None,
}

/// How the next version was decided
///
/// `Manual` means the caller supplied the target version verbatim and no
/// arithmetic is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    None,
    Manual,
}

impl BumpKind {
    /// The arithmetic bump for this kind, `None` for manual versions
    pub fn version_bump(&self) -> Option<VersionBump> {
        match self {
            BumpKind::Major => Some(VersionBump::Major),
            BumpKind::Minor => Some(VersionBump::Minor),
            BumpKind::None => Some(VersionBump::None),
            BumpKind::Manual => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::None => "none",
            BumpKind::Manual => "manual",
        }
    }
}

impl From<VersionBump> for BumpKind {
    fn from(bump: VersionBump) -> Self {
        match bump {
            VersionBump::Major => BumpKind::Major,
            VersionBump::Minor => BumpKind::Minor,
            VersionBump::None => BumpKind::None,
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bumps a version according to the specified bump type.
///
/// - **Major**: major += 1, minor = 0
/// - **Minor**: minor += 1
/// - **None**: unchanged
pub fn bump_version(version: Version, bump: VersionBump) -> Version {
    version.bump(bump)
}
