//! Main module for module-library generation
//!
//! The pipeline, leaves first: [`catalog`] defines the record variants and
//! the catalog collaborator seam, [`grouping`] turns flat records into
//! deterministic Group → Version → Kind trees, [`render`] turns one group
//! into one output tree, [`document`] assembles the full output-unit map,
//! and [`library`] prints it into a finished library.

pub mod catalog;
pub mod document;
pub mod grouping;
pub mod library;
pub mod render;

pub use catalog::{ApiField, ApiResource, Catalog, CatalogError, CatalogRecord, Metadata};
pub use document::{
    Document, DocumentError, HIDDEN_LOCAL_KEY, HIDDEN_UNIT, METADATA_KEY, UNIT_EXT,
};
pub use grouping::{Group, GroupError, Grouper, KindGrouper, VersionRecords};
pub use library::{generate_library, GenOpts, Library, LibraryError, PrintError, Printer};
pub use render::{BuildError, NodeBuilder, RenderError, Renderer, TreeRenderer};
