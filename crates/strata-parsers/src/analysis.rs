//! Resolve the import statements of every scanned module to known modules.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use strata_core::types::{is_within_package, ImportPath, Module};
use tracing::debug;

use crate::python::{ImportStatement, ImportedNames, PythonParser};

/// Something the analyzer noticed but could not turn into an import path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No prefix of `candidate` is a known module.
    UnresolvedImport {
        importer: Module,
        candidate: String,
        line: usize,
    },
    /// A relative import climbs above the top level package.
    RelativeImportBeyondRoot {
        importer: Module,
        level: usize,
        line: usize,
    },
    /// The file does not parse cleanly; imports were still extracted from
    /// the parts that do.
    SyntaxError {
        module: Module,
        path: PathBuf,
        line: usize,
    },
    Unreadable {
        module: Module,
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedImport {
                importer,
                candidate,
                line,
            } => write!(f, "{importer}:{line}: could not resolve import of {candidate}"),
            Diagnostic::RelativeImportBeyondRoot {
                importer,
                level,
                line,
            } => write!(
                f,
                "{importer}:{line}: relative import of level {level} goes beyond the top level package"
            ),
            Diagnostic::SyntaxError { path, line, .. } => {
                write!(f, "{}:{line}: syntax error", path.display())
            }
            Diagnostic::Unreadable { path, reason, .. } => {
                write!(f, "could not read {}: {reason}", path.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisOutput {
    /// Intra-package imports in module order. Duplicates are kept.
    pub import_paths: Vec<ImportPath>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolves import statements against the set of scanned modules.
pub struct ImportAnalyzer {
    package: Module,
    known: HashSet<String>,
}

impl ImportAnalyzer {
    pub fn new(package: &Module, modules: &[Module]) -> Self {
        Self {
            package: package.clone(),
            known: modules.iter().map(|m| m.name().to_string()).collect(),
        }
    }

    /// Read and analyze every module, parsing files in parallel.
    pub fn analyze(&self, modules: &[Module]) -> AnalysisOutput {
        let per_module: Vec<AnalysisOutput> = modules
            .par_iter()
            .map_init(PythonParser::new, |parser, module| self.analyze_file(parser, module))
            .collect();

        let mut output = AnalysisOutput::default();
        for part in per_module {
            output.import_paths.extend(part.import_paths);
            output.diagnostics.extend(part.diagnostics);
        }
        debug!(
            "analyzed {} modules: {} import paths, {} diagnostics",
            modules.len(),
            output.import_paths.len(),
            output.diagnostics.len()
        );
        output
    }

    fn analyze_file(&self, parser: &mut PythonParser, module: &Module) -> AnalysisOutput {
        let Some(path) = module.path() else {
            debug!("{} has no source file, skipping", module);
            return AnalysisOutput::default();
        };
        match std::fs::read_to_string(path) {
            Ok(source) => self.analyze_source(parser, module, &source),
            Err(e) => {
                debug!("could not read {}: {}", path.display(), e);
                AnalysisOutput {
                    import_paths: Vec::new(),
                    diagnostics: vec![Diagnostic::Unreadable {
                        module: module.clone(),
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    }],
                }
            }
        }
    }

    /// Analyze `source` as the text of `module`.
    pub fn analyze_source(
        &self,
        parser: &mut PythonParser,
        module: &Module,
        source: &str,
    ) -> AnalysisOutput {
        let mut output = AnalysisOutput::default();
        let parsed = match parser.parse_imports(source) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("could not parse {}: {}", module, e);
                output.diagnostics.push(Diagnostic::SyntaxError {
                    module: module.clone(),
                    path: module.path().map(PathBuf::from).unwrap_or_default(),
                    line: 1,
                });
                return output;
            }
        };
        if let Some(line) = parsed.syntax_error_line {
            debug!("{} has a syntax error at line {}", module, line);
            output.diagnostics.push(Diagnostic::SyntaxError {
                module: module.clone(),
                path: module.path().map(PathBuf::from).unwrap_or_default(),
                line,
            });
        }

        for statement in &parsed.statements {
            let line = statement.line();
            let candidates = match self.candidates(module, statement) {
                Ok(candidates) => candidates,
                Err(diagnostic) => {
                    debug!("{}", diagnostic);
                    output.diagnostics.push(diagnostic);
                    continue;
                }
            };
            for candidate in candidates {
                match self.trim_to_known(&candidate) {
                    Some(imported) if imported != module.name() => {
                        output
                            .import_paths
                            .push(ImportPath::new(module.clone(), Module::new(imported)));
                    }
                    Some(_) => {}
                    None => {
                        debug!("{}:{}: could not resolve {}", module, line, candidate);
                        output.diagnostics.push(Diagnostic::UnresolvedImport {
                            importer: module.clone(),
                            candidate,
                            line,
                        });
                    }
                }
            }
        }
        output
    }

    /// Fully qualified candidate names for one statement. External imports
    /// yield no candidates.
    fn candidates(
        &self,
        importer: &Module,
        statement: &ImportStatement,
    ) -> Result<Vec<String>, Diagnostic> {
        let package = self.package.name();
        match statement {
            ImportStatement::Import { names, .. } => Ok(names
                .iter()
                .filter(|name| is_within_package(name, package))
                .cloned()
                .collect()),
            ImportStatement::ImportFrom {
                level: 0,
                module: Some(base),
                names,
                ..
            } => {
                if !is_within_package(base, package) {
                    return Ok(Vec::new());
                }
                Ok(expand(base, names))
            }
            ImportStatement::ImportFrom { level: 0, .. } => Ok(Vec::new()),
            ImportStatement::ImportFrom {
                level,
                module,
                names,
                line,
            } => {
                let components: Vec<&str> = importer.components().collect();
                // A package's own marker file sits at the level of its children.
                let trim = if importer.is_package() { level - 1 } else { *level };
                if trim >= components.len() {
                    return Err(Diagnostic::RelativeImportBeyondRoot {
                        importer: importer.clone(),
                        level: *level,
                        line: *line,
                    });
                }
                let mut base = components[..components.len() - trim].join(".");
                if let Some(sub) = module {
                    base.push('.');
                    base.push_str(sub);
                }
                Ok(expand(&base, names))
            }
        }
    }

    /// Strip trailing components from `candidate` until it names a known
    /// module. Imports of functions or classes land on their module this way.
    fn trim_to_known(&self, candidate: &str) -> Option<String> {
        let mut current = candidate;
        loop {
            if self.known.contains(current) {
                return Some(current.to_string());
            }
            current = current.rsplit_once('.')?.0;
        }
    }
}

fn expand(base: &str, names: &ImportedNames) -> Vec<String> {
    match names {
        ImportedNames::Wildcard => vec![base.to_string()],
        ImportedNames::Names(names) => names.iter().map(|n| format!("{base}.{n}")).collect(),
    }
}
