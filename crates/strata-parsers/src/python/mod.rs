//! Tree-sitter extraction of Python import statements.
//!
//! Only the syntax tree is inspected; analyzed code is never executed.

use tree_sitter::{Node, Parser, Tree};

/// One import statement found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatement {
    /// `import a.b, c as d` carries `["a.b", "c"]`.
    Import { names: Vec<String>, line: usize },
    /// `from ..a.b import c, d`. `level` is the number of leading dots,
    /// zero for an absolute import.
    ImportFrom {
        level: usize,
        module: Option<String>,
        names: ImportedNames,
        line: usize,
    },
}

impl ImportStatement {
    pub fn line(&self) -> usize {
        match self {
            ImportStatement::Import { line, .. } | ImportStatement::ImportFrom { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedNames {
    Names(Vec<String>),
    /// `from x import *`
    Wildcard,
}

/// Imports of one parsed file, plus where the parser first hit invalid syntax.
#[derive(Debug, Clone, Default)]
pub struct ParsedImports {
    pub statements: Vec<ImportStatement>,
    pub syntax_error_line: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&mut self, source: &[u8]) -> Result<Tree, ParseError> {
        self.parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        self.parser.parse(source, None).ok_or(ParseError::ParseFailed)
    }

    /// Parse `source` and collect every import statement at any nesting depth,
    /// in source order.
    pub fn parse_imports(&mut self, source: &str) -> Result<ParsedImports, ParseError> {
        let tree = self.parse(source.as_bytes())?;
        let root = tree.root_node();
        Ok(ParsedImports {
            statements: extract_imports(root, source.as_bytes()),
            syntax_error_line: first_error_line(root),
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn extract_imports(root: Node<'_>, source: &[u8]) -> Vec<ImportStatement> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_statement" => {
                if let Some(stmt) = plain_import(node, source) {
                    out.push(stmt);
                }
                continue;
            }
            "import_from_statement" => {
                if let Some(stmt) = from_import(node, source) {
                    out.push(stmt);
                }
                continue;
            }
            // `from __future__ import ...` never names a package module.
            "future_import_statement" => continue,
            _ => {}
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    out
}

fn plain_import(node: Node<'_>, source: &[u8]) -> Option<ImportStatement> {
    let names = imported_names(node, source);
    if names.is_empty() {
        return None;
    }
    Some(ImportStatement::Import {
        names,
        line: line_of(node),
    })
}

fn from_import(node: Node<'_>, source: &[u8]) -> Option<ImportStatement> {
    let module_node = node.child_by_field_name("module_name")?;
    let (level, module) = match module_node.kind() {
        "relative_import" => {
            let mut level = 0;
            let mut module = None;
            for i in 0..module_node.child_count() {
                let Some(child) = module_node.child(i) else {
                    continue;
                };
                match child.kind() {
                    "import_prefix" => {
                        level = text(child, source)?.chars().filter(|&c| c == '.').count();
                    }
                    "dotted_name" => module = Some(dotted(child, source)?),
                    _ => {}
                }
            }
            (level, module)
        }
        _ => (0, Some(dotted(module_node, source)?)),
    };

    let mut wildcard = false;
    for i in 0..node.child_count() {
        if node.child(i).map_or(false, |c| c.kind() == "wildcard_import") {
            wildcard = true;
        }
    }
    let names = if wildcard {
        ImportedNames::Wildcard
    } else {
        ImportedNames::Names(imported_names(node, source))
    };

    Some(ImportStatement::ImportFrom {
        level,
        module,
        names,
        line: line_of(node),
    })
}

/// The `name` fields of an import node, with `as` aliases unwrapped.
fn imported_names(node: Node<'_>, source: &[u8]) -> Vec<String> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|child| match child.kind() {
            "aliased_import" => child
                .child_by_field_name("name")
                .and_then(|n| dotted(n, source)),
            _ => dotted(child, source),
        })
        .collect()
}

/// Dotted name text with any interior whitespace or comments removed.
fn dotted(node: Node<'_>, source: &[u8]) -> Option<String> {
    if node.kind() != "dotted_name" {
        return text(node, source).map(str::to_string);
    }
    let mut parts = Vec::new();
    for i in 0..node.named_child_count() {
        let child = node.named_child(i)?;
        if child.kind() == "identifier" {
            parts.push(text(child, source)?);
        }
    }
    Some(parts.join("."))
}

fn text<'a>(node: Node<'_>, source: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source).ok()
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// 1-based line of the first error or missing node, if the tree has any.
fn first_error_line(root: Node<'_>) -> Option<usize> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(line_of(node));
        }
        if !node.has_error() {
            continue;
        }
        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }
    Some(line_of(root))
}
