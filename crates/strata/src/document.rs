//! Model documents.
//!
//! A model document is a TOML description of one theoretical model: its
//! constructs, optional construct abbreviations, and the relationships
//! between constructs. A collection document holds several models under
//! `[[models]]` and feeds the theory map.
//!
//! Relationship endpoints may name a construct by its full name as well as by
//! its id, so `to = "Actual Use"` draws an edge where plain id matching would
//! drop it.
//!
//! ```toml
//! id = "tam"
//! name = "Technology Acceptance Model"
//! abbreviation = "TAM"
//! constructs = ["Perceived Usefulness", "Behavioral Intention"]
//!
//! [construct_abbreviations]
//! "Perceived Usefulness" = "PU"
//! "Behavioral Intention" = "BI"
//!
//! [[relationships]]
//! from = "PU"
//! to = "BI"
//! ```

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Deserialize;

use strata_core::{
    identifier::Id,
    semantic::{Edge, Node},
};

use crate::error::StrataError;

/// A directed relationship between two constructs of a model.
///
/// Endpoints name construct ids. An endpoint equal to a construct's full
/// name is accepted as well and resolved to that construct's id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Relationship {
    from: String,
    to: String,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Endpoint the relationship starts from.
    pub fn source(&self) -> &str {
        &self.from
    }

    /// Endpoint the relationship points to.
    pub fn target(&self) -> &str {
        &self.to
    }
}

/// A key publication for a model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Citation {
    authors: String,
    title: String,
    #[serde(default)]
    doi: Option<String>,
}

impl Citation {
    pub fn authors(&self) -> &str {
        &self.authors
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref()
    }
}

/// One theoretical model and its construct diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    id: String,
    name: String,
    #[serde(default)]
    abbreviation: Option<String>,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    constructs: Vec<String>,
    #[serde(default)]
    construct_abbreviations: IndexMap<String, String>,
    #[serde(default)]
    relationships: Vec<Relationship>,
    #[serde(default)]
    key_citations: Vec<Citation>,
}

impl ModelDocument {
    /// Creates a model with constructs and relationships only.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        constructs: Vec<String>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            abbreviation: None,
            year: None,
            authors: Vec::new(),
            description: None,
            notes: None,
            constructs,
            construct_abbreviations: IndexMap::new(),
            relationships,
            key_citations: Vec::new(),
        }
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    /// Adds an abbreviation for one construct; it becomes that construct's id.
    pub fn with_construct_abbreviation(
        mut self,
        construct: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> Self {
        self.construct_abbreviations
            .insert(construct.into(), abbreviation.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Short label for the model: its abbreviation, or its name.
    pub fn label(&self) -> &str {
        self.abbreviation().unwrap_or(&self.name)
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn constructs(&self) -> &[String] {
        &self.constructs
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn key_citations(&self) -> &[Citation] {
        &self.key_citations
    }

    /// Returns the explicit abbreviation of a construct, ignoring blank ones.
    pub fn construct_abbreviation(&self, construct: &str) -> Option<&str> {
        self.construct_abbreviations
            .get(construct)
            .map(String::as_str)
            .filter(|abbreviation| !abbreviation.trim().is_empty())
    }

    /// One node per construct, in declaration order.
    pub fn nodes(&self) -> Vec<Node> {
        self.constructs
            .iter()
            .map(|construct| {
                Node::with_optional_id(construct, self.construct_abbreviation(construct))
            })
            .collect()
    }

    /// One edge per relationship, in declaration order.
    ///
    /// Endpoints are matched against construct ids first, then against
    /// construct full names. Unmatched endpoints are kept as-is; the layout
    /// engine drops edges that reference them.
    pub fn edges(&self) -> Vec<Edge> {
        let nodes = self.nodes();
        let ids: HashSet<Id> = nodes.iter().map(Node::id).collect();
        let by_name: HashMap<&str, Id> = nodes
            .iter()
            .map(|node| (node.full_name(), node.id()))
            .collect();

        let resolve = |endpoint: &str| {
            let id = Id::new(endpoint);
            if ids.contains(&id) {
                id
            } else {
                by_name.get(endpoint).copied().unwrap_or(id)
            }
        };

        self.relationships
            .iter()
            .map(|rel| Edge::new(resolve(rel.source()), resolve(rel.target())))
            .collect()
    }
}

/// Several models read from one document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelCollection {
    #[serde(default)]
    models: Vec<ModelDocument>,
}

impl ModelCollection {
    pub fn new(models: Vec<ModelDocument>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[ModelDocument] {
        &self.models
    }

    pub fn into_models(self) -> Vec<ModelDocument> {
        self.models
    }
}

/// Either kind of document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Model(ModelDocument),
    Collection(ModelCollection),
}

/// Parses a single model document.
///
/// # Errors
///
/// Returns [`StrataError::Document`] if the TOML is malformed or does not
/// describe a model.
pub fn parse_model(source: &str) -> Result<ModelDocument, StrataError> {
    toml::from_str(source).map_err(|err| StrataError::new_document_error(err, source))
}

/// Parses a collection document with a `[[models]]` array.
///
/// # Errors
///
/// Returns [`StrataError::Document`] if the TOML is malformed or does not
/// describe a collection.
pub fn parse_collection(source: &str) -> Result<ModelCollection, StrataError> {
    toml::from_str(source).map_err(|err| StrataError::new_document_error(err, source))
}

/// Parses a document, treating it as a collection if it has a `models` key.
///
/// # Errors
///
/// Returns [`StrataError::Document`] if the TOML is malformed or matches
/// neither shape.
pub fn parse_document(source: &str) -> Result<Document, StrataError> {
    let table: toml::Table =
        toml::from_str(source).map_err(|err| StrataError::new_document_error(err, source))?;

    if table.contains_key("models") {
        parse_collection(source).map(Document::Collection)
    } else {
        parse_model(source).map(Document::Model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAM: &str = r#"
        id = "tam"
        name = "Technology Acceptance Model"
        abbreviation = "TAM"
        year = 1989
        authors = ["Fred D. Davis"]
        constructs = [
            "Perceived Usefulness",
            "Perceived Ease of Use",
            "Behavioral Intention",
            "Actual Use",
        ]

        [construct_abbreviations]
        "Perceived Usefulness" = "PU"
        "Perceived Ease of Use" = "PEOU"
        "Behavioral Intention" = "BI"

        [[relationships]]
        from = "PEOU"
        to = "PU"

        [[relationships]]
        from = "PU"
        to = "BI"

        [[relationships]]
        from = "BI"
        to = "Actual Use"

        [[key_citations]]
        authors = "Davis, F. D."
        title = "Perceived usefulness, perceived ease of use, and user acceptance of information technology"
        doi = "10.2307/249008"
    "#;

    #[test]
    fn test_parse_model_fields() {
        let model = parse_model(TAM).unwrap();

        assert_eq!(model.id(), "tam");
        assert_eq!(model.label(), "TAM");
        assert_eq!(model.year(), Some(1989));
        assert_eq!(model.authors(), ["Fred D. Davis".to_string()]);
        assert_eq!(model.constructs().len(), 4);
        assert_eq!(model.key_citations()[0].doi(), Some("10.2307/249008"));
    }

    #[test]
    fn test_nodes_use_abbreviations_then_derived_ids() {
        let model = parse_model(TAM).unwrap();
        let nodes = model.nodes();

        let ids: Vec<String> = nodes.iter().map(|node| node.id().to_string()).collect();
        assert_eq!(ids, vec!["PU", "PEOU", "BI", "Actual-Use"]);
        assert_eq!(nodes[0].display_label(), "PU");
        assert_eq!(nodes[3].display_label(), "Actual Use");
        assert_eq!(nodes[3].full_name(), "Actual Use");
    }

    #[test]
    fn test_edges_resolve_full_names() {
        let model = parse_model(TAM).unwrap();
        let edges = model.edges();

        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0], Edge::new("PEOU", "PU"));
        assert_eq!(edges[2], Edge::new("BI", "Actual-Use"));
    }

    #[test]
    fn test_unknown_endpoint_kept_verbatim() {
        let model = ModelDocument::new(
            "m",
            "Model",
            vec!["Trust".to_string()],
            vec![Relationship::new("Trust", "Loyalty")],
        );

        assert_eq!(model.edges(), vec![Edge::new("Trust", "Loyalty")]);
    }

    #[test]
    fn test_blank_abbreviation_falls_back_to_derived_id() {
        let model = ModelDocument::new("m", "Model", vec!["Social Influence".to_string()], vec![])
            .with_construct_abbreviation("Social Influence", "  ");

        assert_eq!(model.nodes()[0].id(), "Social-Influenc");
    }

    #[test]
    fn test_model_without_constructs() {
        let model = parse_model("id = \"empty\"\nname = \"Empty\"").unwrap();
        assert!(model.nodes().is_empty());
        assert!(model.edges().is_empty());
        assert_eq!(model.label(), "Empty");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse_model("id = \"m\"\nname = \"M\"\nrelationship = []").unwrap_err();
        assert!(matches!(err, StrataError::Document { .. }));
    }

    #[test]
    fn test_parse_document_detects_collection() {
        let source = r#"
            [[models]]
            id = "a"
            name = "A"

            [[models]]
            id = "b"
            name = "B"
        "#;

        match parse_document(source).unwrap() {
            Document::Collection(collection) => assert_eq!(collection.models().len(), 2),
            other => panic!("expected a collection, got {other:?}"),
        }
        assert!(matches!(parse_document(TAM).unwrap(), Document::Model(_)));
    }

    #[test]
    fn test_malformed_toml_keeps_source() {
        let source = "id = \"broken";
        match parse_document(source).unwrap_err() {
            StrataError::Document { src, .. } => assert_eq!(src, source),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
