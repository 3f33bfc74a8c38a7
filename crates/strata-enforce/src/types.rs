use std::path::PathBuf;

use serde::Serialize;
use strata_core::graph::DependencyGraph;
use strata_core::types::Module;

use crate::contract::{Contract, ContractError};

/// A chain of imports proving a layer violation, from the importing module
/// to the module it must not depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IllegalDependency(Vec<Module>);

impl IllegalDependency {
    /// `None` unless `path` holds at least two modules.
    pub fn new(path: Vec<Module>) -> Option<Self> {
        (path.len() >= 2).then_some(Self(path))
    }

    pub fn path(&self) -> &[Module] {
        &self.0
    }

    pub fn importer(&self) -> &Module {
        &self.0[0]
    }

    pub fn imported(&self) -> &Module {
        &self.0[self.0.len() - 1]
    }

    /// Modules strictly between the endpoints.
    pub fn via(&self) -> &[Module] {
        &self.0[1..self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractSummary {
    pub name: String,
    pub kept: bool,
    pub whitelisted_paths: usize,
    pub illegal_dependencies: Vec<IllegalDependency>,
}

impl ContractSummary {
    /// Fails if `contract` has not been checked.
    pub fn from_contract(contract: &Contract) -> Result<Self, ContractError> {
        Ok(Self {
            name: contract.name().to_string(),
            kept: contract.is_kept()?,
            whitelisted_paths: contract.whitelisted_paths().len(),
            illegal_dependencies: contract.illegal_dependencies()?.to_vec(),
        })
    }
}

/// Direct imports of one module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleImports {
    pub module: Module,
    pub imports: Vec<Module>,
}

/// Everything a formatter needs to render the outcome of a lint run.
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
    pub module_count: usize,
    pub dependency_count: usize,
    pub contracts: Vec<ContractSummary>,
    pub dependencies: Vec<ModuleImports>,
    pub illegal_filenames: Vec<PathBuf>,
}

impl LintReport {
    pub fn new(
        graph: &DependencyGraph,
        contracts: &[Contract],
        illegal_filenames: Vec<PathBuf>,
    ) -> Result<Self, ContractError> {
        let contracts = contracts
            .iter()
            .map(ContractSummary::from_contract)
            .collect::<Result<Vec<_>, _>>()?;
        let dependencies = graph
            .modules()
            .map(|module| ModuleImports {
                module: module.clone(),
                imports: graph.successors(module),
            })
            .collect();
        Ok(Self {
            module_count: graph.module_count(),
            dependency_count: graph.dependency_count(),
            contracts,
            dependencies,
            illegal_filenames,
        })
    }

    pub fn kept_count(&self) -> usize {
        self.contracts.iter().filter(|c| c.kept).count()
    }

    pub fn broken_count(&self) -> usize {
        self.contracts.len() - self.kept_count()
    }

    pub fn all_kept(&self) -> bool {
        self.contracts.iter().all(|c| c.kept)
    }
}
