//! Error adapter for converting StrataError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's rich diagnostic formatting used in the CLI. Document errors keep
//! their TOML source so the offending span is shown as a labelled snippet.

use std::fmt;

use miette::{Diagnostic, LabeledSpan, SourceSpan};

use strata::{StrataError, layout::LayoutError};

/// Adapter wrapping a [`StrataError`] as a [`Diagnostic`].
pub struct ErrorAdapter<'a>(pub &'a StrataError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl Diagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            StrataError::Io(_) => "strata::io",
            StrataError::Document { .. } => "strata::document",
            StrataError::Layout(_) => "strata::layout",
            StrataError::Config(_) => "strata::config",
            StrataError::Export(_) => "strata::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            StrataError::Layout(LayoutError::DuplicateId { .. }) => {
                "every construct in a diagram needs its own id"
            }
            StrataError::Layout(LayoutError::DerivedIdCollision { .. }) => {
                "add a construct abbreviation to tell the constructs apart"
            }
            StrataError::Layout(LayoutError::InvalidGeometry { .. }) => {
                "node sizes and gaps must be positive, the margin non-negative"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self.0 {
            StrataError::Document { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let StrataError::Document { err, .. } = self.0 else {
            return None;
        };
        let span = err.span()?;
        let span = SourceSpan::new(span.start.into(), span.end - span.start);
        let label = LabeledSpan::new_primary_with_span(Some(err.message().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Converts an error into the diagnostic rendered by the CLI.
pub fn to_reportable(err: &StrataError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
