use std::fmt;
use std::path::Path;

use strata_core::config::{ContractsFile, RawContract};
use strata_core::types::{is_within_package, ConfigError, ImportPath, Module};
use tracing::debug;

use crate::types::IllegalDependency;

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Missing layer in container '{container}': module {module} does not exist.")]
    MissingLayer { container: Module, module: Module },

    #[error("Invalid container '{container}': no such package.")]
    UnknownContainer { container: Module },

    #[error("Cannot check whether contract '{contract}' is kept until it has been checked.")]
    NotChecked { contract: String },
}

/// A layer name, relative to each container of its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    /// Optional layers may be absent from a container.
    pub is_optional: bool,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: false,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_optional: true,
        }
    }

    /// `"(name)"` declares an optional layer.
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            Some(inner) => Self::optional(inner),
            None => Self::new(spec),
        }
    }

    /// The module this layer names inside `container`.
    pub fn module_in(&self, container: &Module) -> Module {
        container.child(&self.name)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Layers listed first sit highest: each layer may import those listed
/// after it, never those listed before it.
#[derive(Debug, Clone)]
pub struct Contract {
    name: String,
    containers: Vec<Module>,
    layers: Vec<Layer>,
    whitelisted_paths: Vec<ImportPath>,
    /// `None` until checked.
    pub(crate) illegal_dependencies: Option<Vec<IllegalDependency>>,
}

impl Contract {
    pub fn new(
        name: impl Into<String>,
        containers: Vec<Module>,
        layers: Vec<Layer>,
        whitelisted_paths: Vec<ImportPath>,
    ) -> Self {
        Self {
            name: name.into(),
            containers,
            layers,
            whitelisted_paths,
            illegal_dependencies: None,
        }
    }

    /// Validate a contract file entry for the package named `package`.
    pub fn from_raw(name: &str, raw: &RawContract, package: &str) -> Result<Self, ConfigError> {
        let layers = raw
            .layers
            .as_ref()
            .ok_or_else(|| ConfigError::MissingLayers {
                contract: name.to_string(),
            })?
            .iter()
            .map(|spec| Layer::parse(spec))
            .collect();

        let containers = raw
            .containers
            .as_ref()
            .ok_or_else(|| ConfigError::MissingContainers {
                contract: name.to_string(),
                has_packages_key: raw.packages.is_some(),
            })?
            .iter()
            .map(|container| {
                if is_within_package(container, package) {
                    Ok(Module::new(container.as_str()))
                } else {
                    Err(ConfigError::InvalidContainer {
                        container: container.clone(),
                        package: package.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let whitelisted_paths = raw
            .whitelisted_paths
            .iter()
            .map(|entry| entry.parse::<ImportPath>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(name, containers, layers, whitelisted_paths))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn containers(&self) -> &[Module] {
        &self.containers
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn whitelisted_paths(&self) -> &[ImportPath] {
        &self.whitelisted_paths
    }

    pub fn is_checked(&self) -> bool {
        self.illegal_dependencies.is_some()
    }

    pub fn is_kept(&self) -> Result<bool, ContractError> {
        Ok(self.illegal_dependencies()?.is_empty())
    }

    /// Minimal violation paths found by the last check.
    pub fn illegal_dependencies(&self) -> Result<&[IllegalDependency], ContractError> {
        self.illegal_dependencies
            .as_deref()
            .ok_or_else(|| ContractError::NotChecked {
                contract: self.name.clone(),
            })
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Read every contract in the file at `path`, in file order.
pub fn load_contracts(path: &Path, package: &str) -> Result<Vec<Contract>, ConfigError> {
    let file = ContractsFile::load(path)?;
    debug!("read {} contracts from {}", file.contracts.len(), path.display());
    file.contracts
        .iter()
        .map(|(name, raw)| Contract::from_raw(name, raw, package))
        .collect()
}
