//! User interface module - diagnostics and reports.
//!
//! Separates concerns:
//! - `formatter` - progress and error output of `bump-version` (stderr)
//! - `report` - the validation report of `validate-commits` (stdout)

pub mod formatter;
pub mod report;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_relayed_output, display_status,
    display_success, display_summary, display_version_change,
};
