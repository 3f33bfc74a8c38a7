//! Layer contracts for strata.
//!
//! A contract names an ordered list of layers and the containers they live
//! in. Checking a contract against a dependency graph finds every chain of
//! imports by which a layer reaches a layer listed before it:
//! - [`contract`]: layers, contracts and their construction from config
//! - [`check`]: the path search and consolidation of violations
//! - [`imports`]: what a module imports from outside itself
//! - [`types`]: report data handed to the formatters

pub mod check;
pub mod contract;
pub mod imports;
pub mod types;

pub use contract::{load_contracts, Contract, ContractError, Layer};
pub use imports::{list_imports, ImportListing, ImportedModule};
pub use types::{ContractSummary, IllegalDependency, LintReport, ModuleImports};
