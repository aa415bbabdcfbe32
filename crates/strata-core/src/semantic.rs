//! Semantic input types for layered diagrams.
//!
//! A diagram is an ordered list of [`Node`]s and an ordered list of
//! [`Edge`]s. Order matters: it decides the vertical order of nodes that
//! share a level.

use crate::identifier::Id;

/// How a node obtained its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// The id was supplied by the caller, e.g. a construct abbreviation.
    Explicit,
    /// The id was derived from the node's full name.
    Derived,
}

/// A construct or model drawn as one box.
///
/// # Examples
///
/// ```
/// use strata_core::semantic::{IdSource, Node};
///
/// let pu = Node::with_optional_id("Perceived Usefulness", Some("PU"));
/// assert_eq!(pu.id(), "PU");
/// assert_eq!(pu.display_label(), "PU");
/// assert_eq!(pu.full_name(), "Perceived Usefulness");
///
/// let sat = Node::with_optional_id("Satisfaction", None);
/// assert_eq!(sat.id_source(), IdSource::Derived);
/// assert_eq!(sat.display_label(), "Satisfaction");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    id_source: IdSource,
    display_label: String,
    full_name: String,
}

impl Node {
    /// Creates a node with an explicit id.
    pub fn new(
        id: impl Into<Id>,
        display_label: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            id_source: IdSource::Explicit,
            display_label: display_label.into(),
            full_name: full_name.into(),
        }
    }

    /// Creates a node whose id is derived from `full_name`.
    ///
    /// See [`crate::identifier::derive_id`] for the derivation rule.
    pub fn from_name(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        Self {
            id: Id::derive(&full_name),
            id_source: IdSource::Derived,
            display_label: full_name.clone(),
            full_name,
        }
    }

    /// Creates a node from a full name and an optional explicit id.
    ///
    /// When an id is given it also serves as the display label, mirroring
    /// how abbreviations are shown in construct diagrams.
    pub fn with_optional_id(full_name: &str, explicit_id: Option<&str>) -> Self {
        match explicit_id {
            Some(id) => Self::new(id, id, full_name),
            None => Self::from_name(full_name),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn id_source(&self) -> IdSource {
        self.id_source
    }

    pub fn display_label(&self) -> &str {
        &self.display_label
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// A directed relationship between two nodes.
///
/// Edges to unknown ids and self-loops are valid values; the layout engine
/// filters them rather than rejecting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    source: Id,
    target: Id,
}

impl Edge {
    pub fn new(source: impl Into<Id>, target: impl Into<Id>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns `true` if the edge starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_node_keeps_label() {
        let node = Node::new("BI", "BI", "Behavioral Intention");
        assert_eq!(node.id(), "BI");
        assert_eq!(node.id_source(), IdSource::Explicit);
        assert_eq!(node.full_name(), "Behavioral Intention");
    }

    #[test]
    fn test_from_name_derives_id() {
        let node = Node::from_name("Behavioral Intention");
        assert_eq!(node.id(), "Behavioral-Inte");
        assert_eq!(node.id_source(), IdSource::Derived);
        assert_eq!(node.display_label(), "Behavioral Intention");
    }

    #[test]
    fn test_edge_self_loop() {
        assert!(Edge::new("A", "A").is_self_loop());
        assert!(!Edge::new("A", "B").is_self_loop());
        assert_eq!(Edge::new("A", "B").target(), "B");
    }
}
