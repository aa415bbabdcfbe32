//! Strata - layered layouts for theory construct diagrams.
//!
//! Strata places the constructs of a theoretical model (or the models of a
//! theory map) into columns by topological depth, so relationship arrows
//! flow left to right. Input is a list of nodes and edges, or a TOML model
//! document; output is a [`layout::Layout`] holding a position per node.

pub mod config;
pub mod document;
pub mod export;
pub mod layout;
pub mod structure;
pub mod theory_map;

mod error;

pub use strata_core::{geometry, identifier, semantic};

pub use error::StrataError;

use log::{debug, info, trace, warn};

use config::AppConfig;
use document::{ModelCollection, ModelDocument};
use layout::Layout;
use semantic::{Edge, Node};
use theory_map::TheoryMap;

/// Builder for parsing model documents and laying them out.
///
/// # Examples
///
/// ```rust
/// use strata::{LayoutBuilder, config::AppConfig, identifier::Id};
///
/// let source = r#"
///     id = "ecm"
///     name = "Expectation-Confirmation Model"
///     constructs = ["Confirmation", "Satisfaction"]
///
///     [[relationships]]
///     from = "Confirmation"
///     to = "Satisfaction"
/// "#;
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let model = builder.parse_model(source).expect("Failed to parse");
/// let layout = builder.layout_model(&model).expect("Failed to lay out");
///
/// assert_eq!(layout.level(Id::new("Satisfaction")), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a single model document.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Document`] for malformed TOML or unknown fields.
    pub fn parse_model(&self, source: &str) -> Result<ModelDocument, StrataError> {
        info!("Parsing model document");
        let model = document::parse_model(source)?;
        debug!(
            model_id = model.id(),
            constructs_count = model.constructs().len();
            "Model parsed"
        );
        trace!(model:?; "Parsed model");
        Ok(model)
    }

    /// Parse a collection document holding `[[models]]`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Document`] for malformed TOML or unknown fields.
    pub fn parse_collection(&self, source: &str) -> Result<ModelCollection, StrataError> {
        info!("Parsing model collection");
        let collection = document::parse_collection(source)?;
        debug!(models_count = collection.models().len(); "Collection parsed");
        Ok(collection)
    }

    /// Lay out arbitrary nodes and edges with the configured geometry.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Layout`] for duplicate or colliding ids and for
    /// invalid geometry.
    pub fn layout(&self, nodes: &[Node], edges: &[Edge]) -> Result<Layout, StrataError> {
        let layout = layout::compute_layout(nodes, edges, self.config.layout())?;
        info!(
            nodes_count = layout.len(),
            levels_count = layout.columns().len();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Lay out the construct diagram of one model.
    ///
    /// A model without constructs yields an empty layout.
    ///
    /// # Errors
    ///
    /// See [`LayoutBuilder::layout`].
    pub fn layout_model(&self, model: &ModelDocument) -> Result<Layout, StrataError> {
        info!(model_id = model.id(); "Laying out model");
        let nodes = model.nodes();
        if nodes.is_empty() {
            warn!(model_id = model.id(); "No constructs to display");
        }
        self.layout(&nodes, &model.edges())
    }

    /// Lay out the theory map linking `models` through their shared constructs.
    ///
    /// # Errors
    ///
    /// See [`LayoutBuilder::layout`]; two models with the same id fail here.
    pub fn layout_theory_map(&self, models: &[ModelDocument]) -> Result<Layout, StrataError> {
        info!(models_count = models.len(); "Laying out theory map");
        let map = TheoryMap::from_models(models);
        self.layout(map.nodes(), map.edges())
    }

    /// Render a layout as a TOML report.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Export`] if serialization fails.
    pub fn render_report(&self, layout: &Layout) -> Result<String, StrataError> {
        let report = export::toml_report(layout)?;
        debug!(bytes = report.len(); "Report rendered");
        Ok(report)
    }

    /// Render nodes and edges as an unpositioned TOML report, for input that
    /// [`LayoutBuilder::layout`] rejects.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Export`] if serialization fails.
    pub fn render_list_report(
        &self,
        nodes: &[Node],
        edges: &[Edge],
    ) -> Result<String, StrataError> {
        let report = export::list_report(nodes, edges)?;
        debug!(
            nodes_count = nodes.len(),
            relationships_count = edges.len();
            "Unpositioned report rendered"
        );
        Ok(report)
    }
}
