//! Validated diagram structure.
//!
//! [`DiagramGraph`] turns a raw node list and edge list into the form the
//! layout engine works on:
//!
//! - nodes keyed by id, in input order, with empty ids left out
//! - every usable edge kept with its input index, duplicates included
//! - a deduplicated predecessor relation used for level assignment
//!
//! Edges that reference unknown nodes and self-loops are dropped here. They
//! are logged at `debug` level and never reported as errors.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use strata_core::{
    identifier::Id,
    semantic::{Edge, IdSource, Node},
};

use crate::layout::LayoutError;

/// An edge that survived validation, together with its input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedEdge {
    index: usize,
    edge: Edge,
}

impl IndexedEdge {
    /// Position of the edge in the caller's edge list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }
}

/// Validated nodes and edges of one diagram.
#[derive(Debug)]
pub struct DiagramGraph<'a> {
    nodes: IndexMap<Id, &'a Node>,
    edges: Vec<IndexedEdge>,
    predecessors: IndexMap<Id, IndexSet<Id>>,
}

impl<'a> DiagramGraph<'a> {
    /// Validates `nodes` and `edges` into a graph.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateId`] when two nodes share an explicit
    /// id, and [`LayoutError::DerivedIdCollision`] when at least one of the
    /// clashing ids was derived from a display name.
    pub fn new(nodes: &'a [Node], edges: &[Edge]) -> Result<Self, LayoutError> {
        let mut by_id: IndexMap<Id, &'a Node> = IndexMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id();
            if id.is_empty() {
                debug!(full_name = node.full_name(); "Skipping node without an id");
                continue;
            }

            if let Some(existing) = by_id.get(&id) {
                let derived = existing.id_source() == IdSource::Derived
                    || node.id_source() == IdSource::Derived;
                return Err(if derived {
                    LayoutError::DerivedIdCollision {
                        id,
                        first: existing.full_name().to_string(),
                        second: node.full_name().to_string(),
                    }
                } else {
                    LayoutError::DuplicateId { id }
                });
            }

            by_id.insert(id, node);
        }

        let mut kept = Vec::with_capacity(edges.len());
        let mut predecessors: IndexMap<Id, IndexSet<Id>> = IndexMap::new();

        for (index, edge) in edges.iter().copied().enumerate() {
            let (source, target) = (edge.source(), edge.target());

            if !by_id.contains_key(&source) || !by_id.contains_key(&target) {
                debug!(
                    index,
                    source = source.to_string(),
                    target = target.to_string();
                    "Dropping edge with unknown endpoint"
                );
                continue;
            }

            if edge.is_self_loop() {
                debug!(index, node_id = source.to_string(); "Dropping self-loop");
                continue;
            }

            predecessors.entry(target).or_default().insert(source);
            kept.push(IndexedEdge { index, edge });
        }

        Ok(Self {
            nodes: by_id,
            edges: kept,
            predecessors,
        })
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: Id) -> Option<&'a Node> {
        self.nodes.get(&id).copied()
    }

    /// Returns all nodes in input order.
    pub fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.values().copied()
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the retained edges, in input order.
    pub fn edges(&self) -> &[IndexedEdge] {
        &self.edges
    }

    /// Returns the `index`-th distinct predecessor of `id`, in first-seen
    /// order.
    pub fn predecessor_at(&self, id: Id, index: usize) -> Option<Id> {
        self.predecessors
            .get(&id)
            .and_then(|predecessors| predecessors.get_index(index))
            .copied()
    }
}
