//! Contract file loading for strata.
//!
//! Reads `layers.yml` (or any YAML/JSON file passed with `--config`) into
//! raw, unvalidated contract records. Turning a record into a checked
//! contract happens in `strata-enforce`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::types::ConfigError;

/// Contract file looked up in the working directory when none is given.
pub const DEFAULT_CONTRACTS_FILE: &str = "layers.yml";

/// One contract as written in the contract file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContract {
    #[serde(default)]
    pub containers: Option<Vec<String>>,
    #[serde(default)]
    pub layers: Option<Vec<String>>,
    /// Pre-`containers` spelling, only kept to produce a helpful error.
    #[serde(default, skip_serializing)]
    pub packages: Option<Value>,
    #[serde(default)]
    pub whitelisted_paths: Vec<String>,
}

/// All contracts of a contract file, in file order.
#[derive(Debug, Clone)]
pub struct ContractsFile {
    pub path: PathBuf,
    pub contracts: Vec<(String, RawContract)>,
}

impl ContractsFile {
    /// Read and parse the contract file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            reason: io_reason(&e),
        })?;
        Self::parse(&content, path)
    }

    /// Parse contract file content. `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let syntax = |e: serde_yaml::Error| ConfigError::Syntax {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        };
        let value: Value = serde_yaml::from_str(content).map_err(syntax)?;

        let mapping = match value {
            Value::Null => {
                return Ok(Self {
                    path: origin.to_path_buf(),
                    contracts: Vec::new(),
                })
            }
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigError::NotAMapping {
                    path: origin.to_path_buf(),
                })
            }
        };

        let mut contracts = Vec::with_capacity(mapping.len());
        for (key, data) in mapping {
            let name = match key {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(ConfigError::NotAMapping {
                        path: origin.to_path_buf(),
                    })
                }
            };
            let raw = match data {
                Value::Null => RawContract::default(),
                Value::Mapping(_) => serde_yaml::from_value(data).map_err(syntax)?,
                _ => {
                    return Err(ConfigError::NotAMapping {
                        path: origin.to_path_buf(),
                    })
                }
            };
            contracts.push((name, raw));
        }

        Ok(Self {
            path: origin.to_path_buf(),
            contracts,
        })
    }
}

fn io_reason(e: &std::io::Error) -> String {
    match e.kind() {
        std::io::ErrorKind::NotFound => "No such file or directory".to_string(),
        std::io::ErrorKind::PermissionDenied => "Permission denied".to_string(),
        _ => e.to_string(),
    }
}
