//! Theory map: models linked to the constructs they share.
//!
//! The map has one node per model and one node per construct that appears in
//! more than one model. Every model points to each shared construct it uses,
//! so a layered layout puts the models in the first column and the shared
//! constructs in the second.

use indexmap::IndexMap;
use log::debug;

use strata_core::semantic::{Edge, Node};

use crate::document::ModelDocument;

/// Prefix of construct node ids, keeping them apart from model ids.
pub const CONSTRUCT_ID_PREFIX: &str = "construct-";

/// A construct used by several models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedConstruct {
    name: String,
    models: Vec<String>,
}

impl SharedConstruct {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the models using this construct, in model order.
    pub fn models(&self) -> &[String] {
        &self.models
    }
}

/// Nodes and edges of a theory map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TheoryMap {
    shared: Vec<SharedConstruct>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TheoryMap {
    /// Builds the map for `models`.
    ///
    /// A model listing the same construct twice counts once for it.
    pub fn from_models(models: &[ModelDocument]) -> Self {
        let mut usage: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for model in models {
            for construct in model.constructs() {
                let users = usage.entry(construct.as_str()).or_default();
                if !users.contains(&model.id()) {
                    users.push(model.id());
                }
            }
        }

        let shared: Vec<SharedConstruct> = usage
            .into_iter()
            .filter(|(_, users)| users.len() > 1)
            .map(|(name, users)| SharedConstruct {
                name: name.to_string(),
                models: users.into_iter().map(str::to_string).collect(),
            })
            .collect();

        let mut nodes: Vec<Node> = models
            .iter()
            .map(|model| Node::new(model.id(), model.label(), model.name()))
            .collect();
        let mut edges = Vec::new();

        for construct in &shared {
            let id = construct_node_id(&construct.name);
            let name = construct.name.as_str();
            nodes.push(Node::new(id.as_str(), name, name));
            edges.extend(
                construct
                    .models
                    .iter()
                    .map(|model_id| Edge::new(model_id.as_str(), id.as_str())),
            );
        }

        debug!(
            models_count = models.len(),
            shared_count = shared.len();
            "Theory map built"
        );

        Self {
            shared,
            nodes,
            edges,
        }
    }

    pub fn shared_constructs(&self) -> &[SharedConstruct] {
        &self.shared
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Node id of a shared construct: the prefix followed by the name with
/// whitespace runs replaced by `-`. Unlike derived ids it is not truncated.
pub fn construct_node_id(name: &str) -> String {
    let slug = name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{CONSTRUCT_ID_PREFIX}{slug}")
}
