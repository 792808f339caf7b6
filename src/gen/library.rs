//! Whole-library assembly: document trees into printed output units
//!
//! Stitches the document assembler together with the text printer
//! collaborator: build the unit trees, print each one, and hand back the
//! finished byte map. The printer, the concrete target-language serializer,
//! stays outside this crate behind the [`Printer`] trait.

use crate::gen::catalog::{ApiField, ApiResource, Catalog, Metadata};
use crate::gen::document::{Document, DocumentError};
use crate::gen::render::NodeBuilder;
use crate::nodes::Node;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

/// Error raised by a printer collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    /// Generic print failure with message.
    Error(String),
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintError::Error(msg) => write!(f, "print error: {msg}"),
        }
    }
}

impl std::error::Error for PrintError {}

impl From<std::io::Error> for PrintError {
    fn from(err: std::io::Error) -> Self {
        PrintError::Error(err.to_string())
    }
}

/// External serializer turning one root node into target-language text.
pub trait Printer {
    /// Print one root node to `out`.
    fn print(&self, node: &Node, out: &mut dyn Write) -> Result<(), PrintError>;
}

/// Options for one library generation run.
#[derive(Debug, Clone, Default)]
pub struct GenOpts {
    /// Optional filter: generate only groups whose name matches.
    pub target: Option<Regex>,
    /// Generator provenance embedded into the output; `None` uses this
    /// crate's own identity.
    pub metadata: Option<Metadata>,
}

/// A generated module library: printed units keyed by unit name, plus the
/// catalog version they were generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub units: BTreeMap<String, Vec<u8>>,
    pub version: String,
}

/// Error raised during library generation.
#[derive(Debug)]
pub enum LibraryError {
    /// Document assembly failed.
    Document(DocumentError),
    /// Printing one unit failed.
    Print { unit: String, message: String },
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Document(source) => write!(f, "build document nodes: {source}"),
            LibraryError::Print { unit, message } => write!(f, "print unit '{unit}': {message}"),
        }
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LibraryError::Document(source) => Some(source),
            LibraryError::Print { .. } => None,
        }
    }
}

/// Generate a complete module library from a catalog.
///
/// Runs the document assembler over the catalog, prints every resulting
/// unit with `printer`, and returns the byte map. All-or-nothing, like the
/// assembler itself.
pub fn generate_library(
    catalog: &dyn Catalog,
    resource_builder: impl NodeBuilder<ApiResource> + 'static,
    field_builder: impl NodeBuilder<ApiField> + 'static,
    printer: &dyn Printer,
    opts: GenOpts,
) -> Result<Library, LibraryError> {
    let mut document = Document::new(catalog, resource_builder, field_builder);
    if let Some(target) = opts.target {
        document = document.with_target(target);
    }

    let meta = opts.metadata.unwrap_or_default();
    let nodes = document.nodes(&meta).map_err(LibraryError::Document)?;

    log::debug!("printing {} output units", nodes.len());

    let mut units = BTreeMap::new();
    for (name, node) in &nodes {
        let mut buf = Vec::new();
        printer
            .print(node, &mut buf)
            .map_err(|err| LibraryError::Print {
                unit: name.clone(),
                message: err.to_string(),
            })?;
        units.insert(name.clone(), buf);
    }

    Ok(Library {
        units,
        version: catalog.version().to_string(),
    })
}
