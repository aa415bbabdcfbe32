//! CLI logic for the Strata layout tool.
//!
//! Reads a model document, lays it out, and writes the layout report. Input
//! the engine rejects still gets an unpositioned report before the error is
//! returned.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use strata::{
    LayoutBuilder, StrataError,
    document::{self, Document},
    theory_map::TheoryMap,
};

/// Run the Strata CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document parsing errors
/// - Layout errors, after writing the unpositioned report
/// - Report export errors
pub fn run(args: &Args) -> Result<(), StrataError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let document = if args.theory_map {
        Document::Collection(builder.parse_collection(&source)?)
    } else {
        document::parse_document(&source)?
    };

    let result = match &document {
        Document::Model(model) => builder.layout_model(model),
        Document::Collection(collection) => {
            if collection.models().is_empty() {
                warn!(input_path = args.input; "Collection has no models");
            }
            builder.layout_theory_map(collection.models())
        }
    };

    let layout = match result {
        Ok(layout) => layout,
        Err(err) if err.is_invalid_input() => {
            warn!(
                error = err.to_string();
                "Cannot lay out document, writing unpositioned report"
            );
            write_list_report(&builder, &document, &args.output)?;
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    let report = builder.render_report(&layout)?;
    fs::write(&args.output, report)?;

    info!(output_file = args.output; "Layout report written");

    Ok(())
}

fn write_list_report(
    builder: &LayoutBuilder,
    document: &Document,
    output: &str,
) -> Result<(), StrataError> {
    let report = match document {
        Document::Model(model) => builder.render_list_report(&model.nodes(), &model.edges())?,
        Document::Collection(collection) => {
            let map = TheoryMap::from_models(collection.models());
            builder.render_list_report(map.nodes(), map.edges())?
        }
    };
    fs::write(output, report)?;

    info!(output_file = output; "Unpositioned report written");
    Ok(())
}
