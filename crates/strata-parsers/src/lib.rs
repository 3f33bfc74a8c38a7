//! Static analysis of Python packages: scanning, import extraction, graph building.
//!
//! - [`locate`]: find a package directory on the search path
//! - [`scanner`]: walk a package and name every module in it
//! - [`python`]: tree-sitter parsing of Python import statements
//! - [`analysis`]: resolve import statements to known modules
//! - [`pipeline`]: scan + analyze + build a [`DependencyGraph`](strata_core::graph::DependencyGraph)

pub mod analysis;
pub mod locate;
pub mod pipeline;
pub mod python;
pub mod scanner;

pub use analysis::{AnalysisOutput, Diagnostic, ImportAnalyzer};
pub use locate::{locate_package, search_roots, ScanError};
pub use pipeline::{build_graph, GraphBuild};
pub use scanner::{PackageScanner, ScanOutput};
