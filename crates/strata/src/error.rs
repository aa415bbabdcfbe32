//! Error types for Strata operations.
//!
//! [`StrataError`] wraps every failure a [`crate::LayoutBuilder`] call can
//! report: reading input, decoding documents, laying out, and exporting.

use std::io;

use thiserror::Error;

use crate::{export, layout::LayoutError};

/// The main error type for Strata operations.
///
/// # Diagnostic Variants
///
/// The `Document` variant keeps the TOML source next to the decoding error so
/// front ends can point at the offending span.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid document: {}", .err.message())]
    Document { err: toml::de::Error, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl StrataError {
    /// Create a new `Document` error with the associated source text.
    pub fn new_document_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Document {
            err,
            src: src.into(),
        }
    }

    /// Returns `true` for layout input that violates an engine precondition.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Layout(_))
    }
}
