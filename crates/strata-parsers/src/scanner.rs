use std::path::{Path, PathBuf};

use strata_core::types::{Module, PACKAGE_MARKER};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::locate::ScanError;

/// Directory names never descended into, besides hidden ones.
const IGNORED_DIRECTORIES: &[&str] = &["migrations"];

const SOURCE_EXTENSION: &str = "py";

/// Python hard keywords; a module path segment may not be one of these.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Result of scanning one package.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Every valid module, each carrying its source file path.
    pub modules: Vec<Module>,
    /// Source files whose derived module name is not importable.
    pub illegal_filenames: Vec<PathBuf>,
    /// Entries the walk could not read or follow, with the reason. Nothing
    /// beneath them was scanned.
    pub unreadable: Vec<(PathBuf, String)>,
}

pub struct PackageScanner {
    package: Module,
}

impl PackageScanner {
    /// `package` must carry the path of its `__init__.py`.
    pub fn new(package: Module) -> Self {
        Self { package }
    }

    pub fn scan(&self) -> Result<ScanOutput, ScanError> {
        let package_dir = self
            .package
            .path()
            .and_then(Path::parent)
            .ok_or_else(|| ScanError::NoLocation {
                name: self.package.name().to_string(),
            })?;
        if !package_dir.is_dir() {
            return Err(ScanError::Unreadable {
                path: package_dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut output = ScanOutput::default();
        let walker = WalkDir::new(package_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !e.file_type().is_dir() || is_package_dir(e));

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(package_dir).to_path_buf();
                    debug!("could not read {}: {}", path.display(), e);
                    output.unreadable.push((path, walk_error_reason(&e)));
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_source_file(entry.file_name().to_str()) {
                continue;
            }
            let path = entry.into_path();
            match module_name_for(self.package.name(), package_dir, &path) {
                Some(name) => output.modules.push(Module::with_path(name, path)),
                None => {
                    debug!("skipped illegal module {}", path.display());
                    output.illegal_filenames.push(path);
                }
            }
        }

        Ok(output)
    }
}

fn walk_error_reason(e: &walkdir::Error) -> String {
    if let Some(ancestor) = e.loop_ancestor() {
        return format!("symlink loop back to {}", ancestor.display());
    }
    match e.io_error().map(std::io::Error::kind) {
        Some(std::io::ErrorKind::NotFound) => "No such file or directory".to_string(),
        Some(std::io::ErrorKind::PermissionDenied) => "Permission denied".to_string(),
        _ => e.to_string(),
    }
}

fn is_package_dir(entry: &DirEntry) -> bool {
    if entry.depth() > 0 {
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        if name.starts_with('.') || IGNORED_DIRECTORIES.contains(&name) {
            return false;
        }
    }
    entry.path().join(PACKAGE_MARKER).is_file()
}

fn is_source_file(file_name: Option<&str>) -> bool {
    match file_name {
        Some(name) => {
            !name.starts_with('.')
                && Path::new(name).extension().map_or(false, |ext| ext == SOURCE_EXTENSION)
        }
        None => false,
    }
}

/// Derive the dotted module name for `file` inside `package_dir`.
///
/// `pkg/one/__init__.py` maps to `pkg.one`, `pkg/one/two.py` to `pkg.one.two`.
/// Returns `None` if any segment is not a valid, non-keyword identifier.
pub fn module_name_for(package: &str, package_dir: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(package_dir).ok()?.with_extension("");
    let mut components = vec![package.to_string()];
    for part in relative.components() {
        components.push(part.as_os_str().to_str()?.to_string());
    }
    if components.last().map(String::as_str) == Some("__init__") {
        components.pop();
    }
    if components.iter().all(|c| is_valid_segment(c)) {
        Some(components.join("."))
    } else {
        None
    }
}

/// A Python identifier that is not a keyword.
pub fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !PYTHON_KEYWORDS.contains(&segment)
}
