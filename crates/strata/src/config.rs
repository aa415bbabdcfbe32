//! Configuration types for Strata layouts.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`LayoutConfig`] - Box sizes and spacing of the layered layout.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config: AppConfig = toml::from_str("[layout]\nnode_width = 200.0").unwrap();
//! assert_eq!(config.layout().node_width(), 200.0);
//! assert_eq!(config.layout().node_height(), 56.0);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout geometry section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from a layout section.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Geometry of a layered layout.
///
/// Levels become columns `node_width + level_gap` apart; nodes within a
/// level are stacked `node_height + node_gap` apart. The whole drawing is
/// inset by `margin` from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    level_gap: f32,
    node_gap: f32,
    margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 56.0,
            level_gap: 80.0,
            node_gap: 24.0,
            margin: 20.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a layout configuration with the default margin of 20 units.
    ///
    /// # Arguments
    ///
    /// * `node_width` - Width of every node box.
    /// * `node_height` - Height of every node box.
    /// * `level_gap` - Horizontal gap between adjacent level columns.
    /// * `node_gap` - Vertical gap between nodes in one column.
    pub fn new(node_width: f32, node_height: f32, level_gap: f32, node_gap: f32) -> Self {
        Self {
            node_width,
            node_height,
            level_gap,
            node_gap,
            ..Self::default()
        }
    }

    /// Returns a copy with a different margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn level_gap(&self) -> f32 {
        self.level_gap
    }

    pub fn node_gap(&self) -> f32 {
        self.node_gap
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Distance between the left edges of two adjacent columns.
    pub fn column_pitch(&self) -> f32 {
        self.node_width + self.level_gap
    }

    /// Distance between the top edges of two adjacent nodes in a column.
    pub fn row_pitch(&self) -> f32 {
        self.node_height + self.node_gap
    }

    /// Returns the name of the first field that is not usable for layout.
    ///
    /// Sizes and gaps must be finite and positive; the margin must be finite
    /// and non-negative.
    pub(crate) fn invalid_field(&self) -> Option<(&'static str, f32)> {
        let positive = [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("level_gap", self.level_gap),
            ("node_gap", self.node_gap),
        ];
        positive
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
            .or_else(|| {
                (!self.margin.is_finite() || self.margin < 0.0).then_some(("margin", self.margin))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_construct_diagrams() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_width(), 180.0);
        assert_eq!(config.node_height(), 56.0);
        assert_eq!(config.level_gap(), 80.0);
        assert_eq!(config.node_gap(), 24.0);
        assert_eq!(config.margin(), 20.0);
        assert_eq!(config.column_pitch(), 260.0);
        assert_eq!(config.row_pitch(), 80.0);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(*config.layout(), LayoutConfig::default());
    }

    #[test]
    fn test_partial_layout_section() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            level_gap = 120.0
            margin = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().level_gap(), 120.0);
        assert_eq!(config.layout().margin(), 0.0);
        assert_eq!(config.layout().node_width(), 180.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[layout]\nnode_depth = 3.0");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_field_detection() {
        assert_eq!(LayoutConfig::default().invalid_field(), None);
        assert_eq!(
            LayoutConfig::new(0.0, 56.0, 80.0, 24.0).invalid_field(),
            Some(("node_width", 0.0))
        );
        assert_eq!(
            LayoutConfig::default().with_margin(-1.0).invalid_field(),
            Some(("margin", -1.0))
        );

        let nan = LayoutConfig::new(180.0, f32::NAN, 80.0, 24.0).invalid_field();
        assert_eq!(nan.map(|(name, _)| name), Some("node_height"));
    }
}
