use std::path::PathBuf;

use strata_core::graph::DependencyGraph;
use strata_core::types::Module;
use tracing::debug;

use crate::analysis::{Diagnostic, ImportAnalyzer};
use crate::locate::ScanError;
use crate::scanner::PackageScanner;

/// A built graph together with everything noticed on the way.
#[derive(Debug)]
pub struct GraphBuild {
    pub graph: DependencyGraph,
    pub illegal_filenames: Vec<PathBuf>,
    /// Paths the scan could not read; modules beneath them are missing.
    pub unreadable: Vec<(PathBuf, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan `package`, analyze every module found and build the import graph.
pub fn build_graph(package: &Module) -> Result<GraphBuild, ScanError> {
    let scan = PackageScanner::new(package.clone()).scan()?;
    let analysis = ImportAnalyzer::new(package, &scan.modules).analyze(&scan.modules);
    let graph = DependencyGraph::new(scan.modules, analysis.import_paths);
    debug!(
        "built graph for {}: {} modules, {} dependencies",
        package,
        graph.module_count(),
        graph.dependency_count()
    );

    Ok(GraphBuild {
        graph,
        illegal_filenames: scan.illegal_filenames,
        unreadable: scan.unreadable,
        diagnostics: analysis.diagnostics,
    })
}
