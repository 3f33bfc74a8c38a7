use crate::ReportFormatter;
use strata_enforce::{ImportListing, LintReport};

pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &LintReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
    fn format_imports(&self, listing: &ImportListing) -> String {
        serde_json::to_string_pretty(listing).unwrap_or_default()
    }
}
