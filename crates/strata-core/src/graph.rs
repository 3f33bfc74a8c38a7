//! The directed import graph of a package.
//!
//! Nodes are every module found in the package; an edge `a -> b` means `a`
//! imports `b`. The graph is immutable once built. Ignored edges are
//! filtered per query, so concurrent [`DependencyGraph::find_path`] calls
//! never observe each other's exclusions.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::visit::{EdgeFiltered, EdgeRef, IntoNeighbors};
use petgraph::Direction;
use tracing::debug;

use crate::types::{ImportPath, Module};

pub struct DependencyGraph {
    graph: DiGraph<Module, ()>,
    /// Name-ordered index, so descendant lookups are range scans.
    index: BTreeMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build a graph over `modules`, adding one edge per distinct import path.
    ///
    /// Import paths whose endpoints are not among `modules`, and imports of a
    /// module by itself, are dropped.
    pub fn new(
        modules: impl IntoIterator<Item = Module>,
        import_paths: impl IntoIterator<Item = ImportPath>,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut index = BTreeMap::new();

        let mut modules: Vec<Module> = modules.into_iter().collect();
        modules.sort();
        modules.dedup();
        for module in modules {
            let name = module.name().to_string();
            let idx = graph.add_node(module);
            index.insert(name, idx);
        }

        for path in import_paths {
            if path.importer == path.imported {
                continue;
            }
            let (Some(&from), Some(&to)) = (
                index.get(path.importer.name()),
                index.get(path.imported.name()),
            ) else {
                debug!("dropping import path {} with unknown endpoint", path);
                continue;
            };
            graph.update_edge(from, to, ());
        }

        Self { graph, index }
    }

    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct import edges.
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, module: &Module) -> bool {
        self.index.contains_key(module.name())
    }

    /// The graph's own copy of a module (carrying its file path, if scanned).
    pub fn get(&self, name: &str) -> Option<&Module> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    /// All modules in name order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> + '_ {
        self.index.values().map(move |&idx| &self.graph[idx])
    }

    /// Every import edge, ordered by importer then imported.
    pub fn import_paths(&self) -> Vec<ImportPath> {
        let mut paths: Vec<ImportPath> = self
            .graph
            .edge_references()
            .map(|e| {
                ImportPath::new(
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                )
            })
            .collect();
        paths.sort();
        paths
    }

    /// Every module nested under `module` at any depth. Never includes `module` itself.
    pub fn descendants(&self, module: &Module) -> Vec<Module> {
        let prefix = format!("{}.", module.name());
        self.index
            .range(prefix.clone()..)
            .take_while(|(name, _)| name.starts_with(&prefix))
            .map(|(_, &idx)| self.graph[idx].clone())
            .collect()
    }

    /// Modules directly imported by `module`, in name order. Empty if unknown.
    pub fn successors(&self, module: &Module) -> Vec<Module> {
        let Some(&idx) = self.index.get(module.name()) else {
            return Vec::new();
        };
        let mut out: Vec<Module> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].clone())
            .collect();
        out.sort();
        out
    }

    pub fn has_edge(&self, importer: &Module, imported: &Module) -> bool {
        match (self.index.get(importer.name()), self.index.get(imported.name())) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Shortest import chain from `downstream` to `upstream`, by edge count.
    ///
    /// The returned path starts at `downstream` and ends at `upstream`. Edges
    /// listed in `ignore_paths` are skipped for this query only. Returns `None`
    /// if either module is absent or `upstream` is unreachable.
    ///
    /// Among equally short paths, successors are explored in name order, so the
    /// choice is stable for a given graph.
    pub fn find_path(
        &self,
        downstream: &Module,
        upstream: &Module,
        ignore_paths: &[ImportPath],
    ) -> Option<Vec<Module>> {
        let &start = self.index.get(downstream.name())?;
        let &goal = self.index.get(upstream.name())?;
        if start == goal {
            return Some(vec![self.graph[start].clone()]);
        }

        let ignored: HashSet<(NodeIndex, NodeIndex)> = ignore_paths
            .iter()
            .filter_map(|p| {
                Some((
                    *self.index.get(p.importer.name())?,
                    *self.index.get(p.imported.name())?,
                ))
            })
            .collect();
        let view = EdgeFiltered::from_fn(&self.graph, |e: EdgeReference<'_, ()>| {
            !ignored.contains(&(e.source(), e.target()))
        });

        let mut came_from: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        came_from.insert(start, start);

        while let Some(node) = queue.pop_front() {
            let mut next: Vec<NodeIndex> = IntoNeighbors::neighbors(&view, node).collect();
            next.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
            for succ in next {
                if came_from.contains_key(&succ) {
                    continue;
                }
                came_from.insert(succ, node);
                if succ == goal {
                    return Some(self.walk_back(&came_from, start, goal));
                }
                queue.push_back(succ);
            }
        }
        None
    }

    fn walk_back(
        &self,
        came_from: &HashMap<NodeIndex, NodeIndex>,
        start: NodeIndex,
        goal: NodeIndex,
    ) -> Vec<Module> {
        let mut chain = vec![goal];
        let mut current = goal;
        while current != start {
            current = came_from[&current];
            chain.push(current);
        }
        chain
            .into_iter()
            .rev()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("module_count", &self.module_count())
            .field("dependency_count", &self.dependency_count())
            .finish()
    }
}
