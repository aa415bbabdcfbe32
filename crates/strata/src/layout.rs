//! Layered layout engine.
//!
//! [`compute_layout`] places every node of a diagram into a column chosen by
//! its level (longest-path depth from a node without predecessors) and stacks
//! the nodes of each column top to bottom in input order.
//!
//! The engine is a pure function of its inputs. Every call builds its own
//! [`DiagramGraph`] and level cache; nothing is shared between calls.

mod levels;
mod positioning;

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use thiserror::Error;

use strata_core::{
    geometry::{Point, Size},
    identifier::Id,
    semantic::{Edge, Node},
};

use crate::{config::LayoutConfig, structure::DiagramGraph};

pub use levels::assign_levels;

/// Input that cannot be laid out.
///
/// Every variant is an invalid-input condition: the caller should present
/// the diagram in an unpositioned form instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("duplicate node id `{id}`")]
    DuplicateId { id: Id },

    #[error("`{first}` and `{second}` both derive the node id `{id}`")]
    DerivedIdCollision { id: Id, first: String, second: String },

    #[error("invalid layout geometry: `{field}` is {value}")]
    InvalidGeometry { field: &'static str, value: f32 },
}

/// A node with its computed level and position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: Id,
    display_label: String,
    full_name: String,
    level: usize,
    position: Point,
}

impl PositionedNode {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Top-left corner of the node box.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// An edge to draw between two positioned nodes.
///
/// Repeated edges between the same pair are kept as separate entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    id: String,
    source: Id,
    target: Id,
}

impl LayoutEdge {
    /// Renderer-facing identifier, `e{n}` for the `n`-th input edge.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }
}

/// Result of a layout call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    nodes: IndexMap<Id, PositionedNode>,
    columns: Vec<Vec<Id>>,
    edges: Vec<LayoutEdge>,
    size: Size,
}

impl Layout {
    /// Returns the position of `id`, or `None` if it was not laid out.
    pub fn position(&self, id: Id) -> Option<Point> {
        self.nodes.get(&id).map(PositionedNode::position)
    }

    /// Returns the level of `id`, or `None` if it was not laid out.
    pub fn level(&self, id: Id) -> Option<usize> {
        self.nodes.get(&id).map(PositionedNode::level)
    }

    /// Returns the id to position mapping in node input order.
    pub fn positions(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.nodes.values().map(|node| (node.id, node.position))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.values()
    }

    /// Node ids grouped by level, one column per level.
    pub fn columns(&self) -> &[Vec<Id>] {
        &self.columns
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    /// Bounding size of the drawing, margins included.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Computes the layered layout of a diagram.
///
/// Edges referencing unknown ids and self-loops are dropped; repeated edges
/// count once for level assignment. Nodes with an empty id are left out of
/// the result.
///
/// # Errors
///
/// Returns a [`LayoutError`] if two nodes share an id or if `config` has a
/// non-positive size or gap.
///
/// # Examples
///
/// ```
/// use strata::{config::LayoutConfig, layout::compute_layout};
/// use strata_core::{geometry::Point, identifier::Id, semantic::{Edge, Node}};
///
/// let nodes = vec![
///     Node::new("PU", "PU", "Perceived Usefulness"),
///     Node::new("BI", "BI", "Behavioral Intention"),
/// ];
/// let edges = vec![Edge::new("PU", "BI")];
///
/// let layout = compute_layout(&nodes, &edges, &LayoutConfig::default()).unwrap();
/// assert_eq!(layout.level(Id::new("BI")), Some(1));
/// assert_eq!(layout.position(Id::new("BI")), Some(Point::new(280.0, 20.0)));
/// ```
pub fn compute_layout(
    nodes: &[Node],
    edges: &[Edge],
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    if let Some((field, value)) = config.invalid_field() {
        return Err(LayoutError::InvalidGeometry { field, value });
    }

    let graph = DiagramGraph::new(nodes, edges)?;
    debug!(
        nodes_count = graph.nodes_count(),
        edges_count = graph.edges().len();
        "Diagram graph built"
    );

    let levels = assign_levels(&graph);
    let columns = positioning::group_by_level(&levels);

    let rows: HashMap<Id, usize> = columns
        .iter()
        .flat_map(|column| column.iter().enumerate().map(|(row, &id)| (id, row)))
        .collect();

    let mut positioned = IndexMap::with_capacity(levels.len());
    for (&id, &level) in &levels {
        let (Some(node), Some(&row)) = (graph.node(id), rows.get(&id)) else {
            continue;
        };
        positioned.insert(
            id,
            PositionedNode {
                id,
                display_label: node.display_label().to_string(),
                full_name: node.full_name().to_string(),
                level,
                position: positioning::node_position(level, row, config),
            },
        );
    }

    let edges = graph
        .edges()
        .iter()
        .map(|indexed| LayoutEdge {
            id: format!("e{}", indexed.index()),
            source: indexed.edge().source(),
            target: indexed.edge().target(),
        })
        .collect();

    let size = positioning::layout_size(&columns, config);
    debug!(
        nodes_count = positioned.len(),
        levels_count = columns.len();
        "Layout computed"
    );

    Ok(Layout {
        nodes: positioned,
        columns,
        edges,
        size,
    })
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    const POOL: usize = 8;

    fn node_name(index: usize) -> String {
        format!("n{index}")
    }

    fn nodes_strategy() -> impl Strategy<Value = Vec<Node>> {
        (1..=POOL).prop_map(|count| {
            (0..count)
                .map(|index| {
                    let name = node_name(index);
                    Node::new(name.as_str(), name.as_str(), name.as_str())
                })
                .collect()
        })
    }

    /// Arbitrary edges over the node pool, including unknown ids and cycles.
    fn edges_strategy() -> impl Strategy<Value = Vec<Edge>> {
        prop::collection::vec((0..POOL + 2, 0..POOL + 2), 0..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(s, t)| Edge::new(node_name(s).as_str(), node_name(t).as_str()))
                .collect()
        })
    }

    /// Edges that only point from a lower index to a higher one.
    fn dag_edges_strategy() -> impl Strategy<Value = Vec<Edge>> {
        prop::collection::vec((0..POOL, 0..POOL), 0..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(s, t)| s != t)
                .map(|(s, t)| {
                    let (low, high) = (s.min(t), s.max(t));
                    Edge::new(node_name(low).as_str(), node_name(high).as_str())
                })
                .collect()
        })
    }

    fn layout(nodes: &[Node], edges: &[Edge]) -> Layout {
        compute_layout(nodes, edges, &LayoutConfig::default()).expect("valid input")
    }

    fn snapshot(layout: &Layout) -> Vec<(Id, usize, u32, u32)> {
        layout
            .nodes()
            .map(|node| {
                (
                    node.id(),
                    node.level(),
                    node.position().x().to_bits(),
                    node.position().y().to_bits(),
                )
            })
            .collect()
    }

    /// Nodes with no incoming edge from another known node sit on level 0.
    fn check_roots_on_level_zero(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let layout = layout(nodes, edges);
        for node in nodes {
            let has_incoming = edges.iter().any(|edge| {
                edge.target() == node.id()
                    && !edge.is_self_loop()
                    && nodes.iter().any(|other| other.id() == edge.source())
            });
            if !has_incoming {
                prop_assert_eq!(layout.level(node.id()), Some(0));
            }
        }
        Ok(())
    }

    /// On acyclic input every edge points to a strictly higher level.
    fn check_edges_are_monotonic(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let layout = layout(nodes, edges);
        for edge in edges {
            if let (Some(source), Some(target)) =
                (layout.level(edge.source()), layout.level(edge.target()))
            {
                prop_assert!(target > source, "{:?} -> {:?}", edge.source(), edge.target());
            }
        }
        Ok(())
    }

    /// Self-loops do not change levels or positions.
    fn check_self_loop_invariance(
        nodes: &[Node],
        edges: &[Edge],
        pick: usize,
    ) -> Result<(), TestCaseError> {
        let loop_id = nodes[pick % nodes.len()].id();
        let mut with_loop = edges.to_vec();
        with_loop.insert(pick % (edges.len() + 1), Edge::new(loop_id, loop_id));

        prop_assert_eq!(snapshot(&layout(nodes, edges)), snapshot(&layout(nodes, &with_loop)));
        Ok(())
    }

    /// Edges to ids outside the node set do not change levels or positions.
    fn check_unknown_endpoint_invariance(
        nodes: &[Node],
        edges: &[Edge],
        pick: usize,
    ) -> Result<(), TestCaseError> {
        let known = nodes[pick % nodes.len()].id();
        let mut with_unknown = edges.to_vec();
        with_unknown.push(Edge::new(known, Id::new("missing")));
        with_unknown.insert(0, Edge::new(Id::new("missing"), known));

        prop_assert_eq!(snapshot(&layout(nodes, edges)), snapshot(&layout(nodes, &with_unknown)));
        Ok(())
    }

    /// Two calls with equal inputs give bit-identical positions.
    fn check_deterministic(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let first = snapshot(&layout(nodes, edges));
        let second = snapshot(&layout(&nodes.to_vec(), &edges.to_vec()));
        prop_assert_eq!(first, second);
        Ok(())
    }

    /// Every node gets a level even when edges form cycles.
    fn check_cycles_terminate(nodes: &[Node], edges: &[Edge]) -> Result<(), TestCaseError> {
        let layout = layout(nodes, edges);
        prop_assert_eq!(layout.len(), nodes.len());
        for node in nodes {
            prop_assert!(layout.level(node.id()).is_some());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn roots_on_level_zero(nodes in nodes_strategy(), edges in edges_strategy()) {
            check_roots_on_level_zero(&nodes, &edges)?;
        }

        #[test]
        fn edges_are_monotonic(nodes in nodes_strategy(), edges in dag_edges_strategy()) {
            check_edges_are_monotonic(&nodes, &edges)?;
        }

        #[test]
        fn self_loop_invariance(
            nodes in nodes_strategy(),
            edges in edges_strategy(),
            pick in 0usize..64,
        ) {
            check_self_loop_invariance(&nodes, &edges, pick)?;
        }

        #[test]
        fn unknown_endpoint_invariance(
            nodes in nodes_strategy(),
            edges in edges_strategy(),
            pick in 0usize..64,
        ) {
            check_unknown_endpoint_invariance(&nodes, &edges, pick)?;
        }

        #[test]
        fn deterministic(nodes in nodes_strategy(), edges in edges_strategy()) {
            check_deterministic(&nodes, &edges)?;
        }

        #[test]
        fn cycles_terminate(nodes in nodes_strategy(), edges in edges_strategy()) {
            check_cycles_terminate(&nodes, &edges)?;
        }
    }
}
