//! Output formatters for strata results.
//!
//! - **Human** (default): headed plain-text report, sections chosen by [`Verbosity`]
//! - **JSON** (`--json`): the same data, machine-readable

pub mod human;
pub mod json;
pub mod verbosity;

pub use human::HumanFormatter;
pub use json::JsonFormatter;
pub use verbosity::{Verbosity, VerbosityError};

use strata_enforce::{ImportListing, LintReport};

pub trait ReportFormatter {
    fn format_report(&self, report: &LintReport) -> String;
    fn format_imports(&self, listing: &ImportListing) -> String;
}
