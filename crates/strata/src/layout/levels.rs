//! Level assignment.
//!
//! A node's level is its longest-path distance from a node without
//! predecessors: `0` for roots, otherwise one more than the highest level
//! among its predecessors.
//!
//! Levels are resolved by a memoized depth-first walk over the predecessor
//! relation, driven by an explicit stack of frames. A predecessor that is
//! still being resolved further down the stack is a
//! back-edge of a cycle and contributes nothing. Levels of nodes on a cycle
//! are therefore an approximation that depends on input order, but they are
//! deterministic and every call terminates.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace};

use strata_core::identifier::Id;

use crate::structure::DiagramGraph;

struct LevelResolver<'g, 'a> {
    graph: &'g DiagramGraph<'a>,
    levels: HashMap<Id, usize>,
    resolving: HashSet<Id>,
}

/// A node whose predecessors are being visited.
struct Frame {
    id: Id,
    next: usize,
    highest: Option<usize>,
}

impl Frame {
    fn new(id: Id) -> Self {
        Self {
            id,
            next: 0,
            highest: None,
        }
    }

    fn raise(&mut self, level: usize) {
        self.highest = Some(self.highest.map_or(level, |current| current.max(level)));
    }

    fn level(&self) -> usize {
        self.highest.map_or(0, |level| level + 1)
    }
}

impl LevelResolver<'_, '_> {
    /// Resolves `root` and every unresolved node it depends on.
    ///
    /// Frames on `stack` mirror the nodes in `resolving`, so chain length is
    /// bounded by memory rather than by the thread stack.
    fn resolve(&mut self, root: Id) -> usize {
        if let Some(&level) = self.levels.get(&root) {
            return level;
        }

        self.resolving.insert(root);
        let mut stack = vec![Frame::new(root)];
        let mut resolved = 0;

        while let Some(frame) = stack.last_mut() {
            let id = frame.id;
            match self.graph.predecessor_at(id, frame.next) {
                Some(predecessor) => {
                    frame.next += 1;
                    if let Some(&level) = self.levels.get(&predecessor) {
                        frame.raise(level);
                    } else if self.resolving.contains(&predecessor) {
                        debug!(
                            node_id = id.to_string(),
                            predecessor = predecessor.to_string();
                            "Skipping back-edge of a cycle"
                        );
                    } else {
                        self.resolving.insert(predecessor);
                        stack.push(Frame::new(predecessor));
                    }
                }
                None => {
                    resolved = frame.level();
                    stack.pop();
                    self.resolving.remove(&id);
                    self.levels.insert(id, resolved);
                    if let Some(parent) = stack.last_mut() {
                        parent.raise(resolved);
                    }
                }
            }
        }

        resolved
    }
}

/// Computes the level of every node in `graph`, keyed in node input order.
pub fn assign_levels(graph: &DiagramGraph<'_>) -> IndexMap<Id, usize> {
    let mut resolver = LevelResolver {
        graph,
        levels: HashMap::with_capacity(graph.nodes_count()),
        resolving: HashSet::new(),
    };

    let levels: IndexMap<Id, usize> = graph
        .nodes()
        .map(|node| (node.id(), resolver.resolve(node.id())))
        .collect();

    trace!(levels:? = &levels; "Assigned levels");
    levels
}
