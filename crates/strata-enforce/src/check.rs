//! Checking a contract against a dependency graph.

use std::collections::HashSet;

use rayon::prelude::*;
use strata_core::graph::DependencyGraph;
use strata_core::types::Module;
use tracing::debug;

use crate::contract::{Contract, ContractError, Layer};
use crate::types::IllegalDependency;

impl Contract {
    /// Find every illegal dependency in `graph`, replacing any earlier result.
    ///
    /// Every container and layer is validated before any path is searched.
    pub fn check(&mut self, graph: &DependencyGraph) -> Result<(), ContractError> {
        if self.layers().is_empty() || self.containers().is_empty() {
            self.illegal_dependencies = Some(Vec::new());
            return Ok(());
        }
        self.validate(graph)?;

        debug!("checking contract {}", self);
        let mut found = Vec::new();
        for container in self.containers() {
            let layer_modules: Vec<Vec<Module>> = self
                .layers()
                .iter()
                .map(|layer| modules_in_layer(graph, layer, container))
                .collect();

            for index in (0..self.layers().len()).rev() {
                debug!("layer '{}' in container '{}'", self.layers()[index], container);
                let violations = self.layer_violations(graph, &layer_modules, index);
                for dependency in violations.into_iter().filter_map(IllegalDependency::new) {
                    debug!("illegal dependency found: {:?}", dependency.path());
                    consolidate(&mut found, dependency);
                }
            }
        }
        self.illegal_dependencies = Some(found);
        Ok(())
    }

    fn validate(&self, graph: &DependencyGraph) -> Result<(), ContractError> {
        for container in self.containers() {
            if !graph.contains(container) {
                return Err(ContractError::UnknownContainer {
                    container: container.clone(),
                });
            }
        }
        for container in self.containers() {
            for layer in self.layers().iter().filter(|l| !l.is_optional) {
                let module = layer.module_in(container);
                if !graph.contains(&module) && graph.descendants(&module).is_empty() {
                    return Err(ContractError::MissingLayer {
                        container: container.clone(),
                        module,
                    });
                }
            }
        }
        Ok(())
    }

    /// Paths by which layer `index` reaches any layer listed before it,
    /// minus those running entirely through other layers.
    fn layer_violations(
        &self,
        graph: &DependencyGraph,
        layer_modules: &[Vec<Module>],
        index: usize,
    ) -> Vec<Vec<Module>> {
        let importers = &layer_modules[index];
        let forbidden: Vec<&Module> = layer_modules[..index].iter().rev().flatten().collect();
        let other_layers: HashSet<&Module> = layer_modules
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .flat_map(|(_, modules)| modules)
            .collect();

        let pairs: Vec<(&Module, &Module)> = importers
            .iter()
            .flat_map(|importer| forbidden.iter().map(move |target| (importer, *target)))
            // Nested layer names can put one module in two layers.
            .filter(|(importer, target)| importer != target)
            .collect();
        let whitelist = self.whitelisted_paths();

        pairs
            .par_iter()
            .filter_map(|(importer, target)| graph.find_path(importer, target, whitelist))
            .filter(|path| !is_via_other_layer(path, &other_layers))
            .collect()
    }
}

/// `{Container.L}` plus every module beneath it. Empty for an absent layer.
fn modules_in_layer(graph: &DependencyGraph, layer: &Layer, container: &Module) -> Vec<Module> {
    let module = layer.module_in(container);
    let mut modules = Vec::new();
    if graph.contains(&module) {
        modules.push(module.clone());
    }
    modules.extend(graph.descendants(&module));
    modules
}

/// True if the path has intermediate modules and each one belongs to another
/// layer of the contract. Such a path is reported through those layers'
/// own, more direct, violations.
fn is_via_other_layer(path: &[Module], other_layers: &HashSet<&Module>) -> bool {
    let via = match path {
        [_, via @ .., _] => via,
        _ => return false,
    };
    !via.is_empty() && via.iter().all(|m| other_layers.contains(m))
}

/// Add `new` unless a path already recorded is a subset of it; drop any
/// recorded path that `new` is a subset of.
fn consolidate(found: &mut Vec<IllegalDependency>, new: IllegalDependency) {
    let new_set: HashSet<&Module> = new.path().iter().collect();
    let implied = found.iter().any(|existing| {
        existing.path().iter().all(|m| new_set.contains(m))
    });
    if implied {
        debug!("skipping {:?}, implied by a shorter path", new.path());
        return;
    }
    found.retain(|existing| {
        let existing_set: HashSet<&Module> = existing.path().iter().collect();
        let superseded = new_set.is_subset(&existing_set);
        if superseded {
            debug!("removing {:?}, superseded", existing.path());
        }
        !superseded
    });
    found.push(new);
}
