//! Layout report export.
//!
//! A report is the TOML form of a [`Layout`] handed to a render surface:
//! the drawing size, every positioned node, and every edge to draw.
//!
//! ```toml
//! width = 740.0
//! height = 176.0
//!
//! [[nodes]]
//! id = "A"
//! label = "A"
//! full_name = "A"
//! level = 0
//! x = 20.0
//! y = 20.0
//!
//! [[edges]]
//! id = "e0"
//! source = "A"
//! target = "B"
//! ```
//!
//! When a diagram cannot be laid out, [`list_report`] gives the unpositioned
//! form instead: the nodes without levels or coordinates, and the
//! relationships as plain `from`/`to` pairs.

use serde::Serialize;
use thiserror::Error;

use strata_core::{
    identifier::Id,
    semantic::{Edge, Node},
};

use crate::layout::{Layout, LayoutEdge};

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize layout report: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Serialize)]
struct Report<'a> {
    width: f32,
    height: f32,
    nodes: Vec<NodeEntry<'a>>,
    edges: &'a [LayoutEdge],
}

#[derive(Serialize)]
struct NodeEntry<'a> {
    id: Id,
    label: &'a str,
    full_name: &'a str,
    level: usize,
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct ListReport<'a> {
    nodes: Vec<ListEntry<'a>>,
    relationships: Vec<RelationshipEntry>,
}

#[derive(Serialize)]
struct ListEntry<'a> {
    id: Id,
    label: &'a str,
    full_name: &'a str,
}

#[derive(Serialize)]
struct RelationshipEntry {
    from: Id,
    to: Id,
}

/// Serializes `layout` as a TOML report.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if the report cannot be encoded.
pub fn toml_report(layout: &Layout) -> Result<String, Error> {
    let report = Report {
        width: layout.size().width(),
        height: layout.size().height(),
        nodes: layout
            .nodes()
            .map(|node| NodeEntry {
                id: node.id(),
                label: node.display_label(),
                full_name: node.full_name(),
                level: node.level(),
                x: node.position().x(),
                y: node.position().y(),
            })
            .collect(),
        edges: layout.edges(),
    };

    Ok(toml::to_string(&report)?)
}

/// Serializes `nodes` and `edges` as an unpositioned TOML report.
///
/// Nodes and relationships are listed as given, in input order, including
/// the ones the layout engine would reject or drop.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if the report cannot be encoded.
pub fn list_report(nodes: &[Node], edges: &[Edge]) -> Result<String, Error> {
    let report = ListReport {
        nodes: nodes
            .iter()
            .map(|node| ListEntry {
                id: node.id(),
                label: node.display_label(),
                full_name: node.full_name(),
            })
            .collect(),
        relationships: edges
            .iter()
            .map(|edge| RelationshipEntry {
                from: edge.source(),
                to: edge.target(),
            })
            .collect(),
    };

    Ok(toml::to_string(&report)?)
}
