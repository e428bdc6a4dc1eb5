pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod git;
pub mod sync;
pub mod ui;

pub use conventional::{classify, is_conventional, Validation, ValidationReason};
pub use domain::{bump_version, BumpKind, Version, VersionBump, VersionText};
pub use error::{BumpError, Result};
