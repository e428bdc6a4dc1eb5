//! Command-line workflows
//!
//! Each binary parses its arguments with clap and hands them to a workflow
//! function here. Workflows take their git and process collaborators as
//! parameters, so they run unchanged against mocks in tests.

pub mod bump;
pub mod validate;

use tracing_subscriber::EnvFilter;

pub use bump::{run_bump, BumpArgs, BumpOutcome, BumpStatus, RequestedBump};
pub use validate::{run_validate, ValidateArgs, ValidationSummary};

/// Install the tracing subscriber on stderr.
///
/// `RUST_LOG` is honoured unless `verbose` forces debug output for this crate.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("conventional_bump=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
