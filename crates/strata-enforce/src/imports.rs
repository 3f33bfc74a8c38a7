use std::collections::BTreeMap;

use serde::Serialize;
use strata_core::graph::DependencyGraph;
use strata_core::types::Module;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedModule {
    pub imported: Module,
    pub importers: Vec<Module>,
}

/// Modules outside `module` that it, or anything beneath it, imports directly.
#[derive(Debug, Clone, Serialize)]
pub struct ImportListing {
    pub module: Module,
    pub imports: Vec<ImportedModule>,
}

/// `None` if neither `module` nor any descendant is in the graph.
pub fn list_imports(graph: &DependencyGraph, module: &Module) -> Option<ImportListing> {
    let mut importing = graph.descendants(module);
    if graph.contains(module) {
        importing.insert(0, module.clone());
    }
    if importing.is_empty() {
        return None;
    }

    let mut grouped: BTreeMap<Module, Vec<Module>> = BTreeMap::new();
    for importer in &importing {
        for imported in graph.successors(importer) {
            if imported.is_in(module) {
                continue;
            }
            grouped.entry(imported).or_default().push(importer.clone());
        }
    }

    Some(ImportListing {
        module: module.clone(),
        imports: grouped
            .into_iter()
            .map(|(imported, importers)| ImportedModule { imported, importers })
            .collect(),
    })
}
