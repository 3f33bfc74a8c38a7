use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// File name that marks a directory as a Python package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// A Python module, identified by its fully qualified dotted name.
///
/// Equality, ordering and hashing only look at the name. The source file
/// location is carried along when the module came from a scan, and is
/// absent for modules named in contracts or whitelists.
#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    path: Option<PathBuf>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn with_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the module's source is a package marker file (`__init__.py`).
    pub fn is_package(&self) -> bool {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map_or(false, |f| f == PACKAGE_MARKER)
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }

    /// The first component, i.e. the top level package this module lives in.
    pub fn root_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    pub fn parent(&self) -> Option<Module> {
        self.name
            .rfind('.')
            .map(|idx| Module::new(&self.name[..idx]))
    }

    /// The module `self.<name>`, e.g. a layer resolved inside a container.
    pub fn child(&self, name: &str) -> Module {
        Module::new(format!("{}.{}", self.name, name))
    }

    /// True if `self` is nested under `ancestor` at any depth (never itself).
    pub fn is_descendant_of(&self, ancestor: &Module) -> bool {
        is_descendant_name(&self.name, &ancestor.name)
    }

    /// True if `self` is `other` or one of its descendants.
    pub fn is_in(&self, other: &Module) -> bool {
        self.name == other.name || self.is_descendant_of(other)
    }
}

/// Dotted-prefix test on raw names: `a.b.c` is a descendant of `a.b`, `a.bc` is not.
pub fn is_descendant_name(name: &str, ancestor: &str) -> bool {
    name.len() > ancestor.len() + 1
        && name.starts_with(ancestor)
        && name.as_bytes()[ancestor.len()] == b'.'
}

/// True if `name` equals `package` or is dotted beneath it.
pub fn is_within_package(name: &str, package: &str) -> bool {
    name == package || is_descendant_name(name, package)
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Module {}

impl Hash for Module {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Module {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Module {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Borrow<str> for Module {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Module {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

/// One direct import: `importer` contains an import statement for `imported`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImportPath {
    pub importer: Module,
    pub imported: Module,
}

/// Separator used by whitelist entries: `"importer.module <- imported.module"`.
pub const WHITELIST_SEPARATOR: &str = " <- ";

impl ImportPath {
    pub fn new(importer: Module, imported: Module) -> Self {
        Self { importer, imported }
    }
}

impl FromStr for ImportPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::MalformedWhitelist {
            entry: s.to_string(),
        };
        let mut parts = s.split(WHITELIST_SEPARATOR);
        let importer = parts.next().map(str::trim).filter(|p| !p.is_empty());
        let imported = parts.next().map(str::trim).filter(|p| !p.is_empty());
        match (importer, imported, parts.next()) {
            (Some(importer), Some(imported), None)
                if !importer.contains(char::is_whitespace)
                    && !imported.contains(char::is_whitespace) =>
            {
                Ok(ImportPath::new(Module::new(importer), Module::new(imported)))
            }
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for ImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.importer, WHITELIST_SEPARATOR, self.imported)
    }
}

/// Errors raised while reading or interpreting a contract file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{reason}: {}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Could not parse {}: {reason}", .path.display())]
    Syntax { path: PathBuf, reason: String },

    #[error("Could not parse {}: expected a mapping of contract names to contracts.", .path.display())]
    NotAMapping { path: PathBuf },

    #[error("'{contract}' is missing a list of layers.")]
    MissingLayers { contract: String },

    #[error("'{contract}' is missing a list of containers.{}", packages_tip(.has_packages_key))]
    MissingContainers {
        contract: String,
        has_packages_key: bool,
    },

    #[error("Whitelisted paths must be in the format \"importer.module <- imported.module\" (got \"{entry}\").")]
    MalformedWhitelist { entry: String },

    #[error("Invalid container '{container}': containers must be either a subpackage of '{package}', or '{package}' itself.")]
    InvalidContainer { container: String, package: String },
}

fn packages_tip(has_packages_key: &bool) -> &'static str {
    if *has_packages_key {
        " (Tip: try renaming 'packages' to 'containers'.)"
    } else {
        ""
    }
}
