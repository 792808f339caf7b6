//! Catalog records and the catalog collaborator seam
//!
//! The generation pipeline consumes a flat catalog of typed resource records
//! addressed by group → version → kind. Two record variants exist: the
//! full-schema [`ApiResource`] and the field-only [`ApiField`]. They share
//! the [`CatalogRecord`] capability used for grouping and node naming, but
//! stay distinct types so the visible and hidden pipelines can never be fed
//! each other's records.
//!
//! The catalog itself, which imports a machine-readable API specification
//! and turns it into records, lives outside this crate behind the
//! [`Catalog`] trait.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared capability of catalog record variants.
///
/// This is the smallest surface the grouping and rendering stages need:
/// three-level addressing plus the documentation string attached to the kind.
pub trait CatalogRecord {
    /// API group name. Empty denotes the core/ungrouped group.
    fn group(&self) -> &str;
    /// API version name within the group.
    fn version(&self) -> &str;
    /// Resource kind name within the version.
    fn kind(&self) -> &str;
    /// Documentation for the kind. May be empty.
    fn description(&self) -> &str;
}

/// A full-schema resource definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiResource {
    pub kind: String,
    #[serde(default)]
    pub group: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl CatalogRecord for ApiResource {
    fn group(&self) -> &str {
        &self.group
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// A field-only (minimal-schema) resource definition.
///
/// Rendered into the consolidated hidden unit rather than a per-group
/// visible unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiField {
    pub kind: String,
    #[serde(default)]
    pub group: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl CatalogRecord for ApiField {
    fn group(&self) -> &str {
        &self.group
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Error raised by a catalog collaborator during record retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Retrieval failure with message.
    Retrieval(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Retrieval(msg) => write!(f, "catalog retrieval: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// External provider of catalog records and provenance.
///
/// One implementation per source specification format; test doubles
/// implement this directly.
pub trait Catalog {
    /// All full-schema resource definitions.
    fn types(&self) -> Result<Vec<ApiResource>, CatalogError>;

    /// All field-only resource definitions.
    fn fields(&self) -> Result<Vec<ApiField>, CatalogError>;

    /// Version string of the source specification.
    fn version(&self) -> &str;

    /// Content checksum of the source specification.
    fn checksum(&self) -> &str;

    /// Library title; also names the aggregate output unit.
    fn title(&self) -> &str;

    /// Maintainer string embedded into the provenance block.
    fn maintainer(&self) -> &str;
}

/// Generator provenance embedded into every generated library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Generator vendor name.
    pub vendor: String,
    /// Generator version.
    pub version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            vendor: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_capability_on_both_variants() {
        let resource = ApiResource {
            kind: "Deployment".to_string(),
            group: "apps".to_string(),
            version: "v1".to_string(),
            description: "A deployment.".to_string(),
        };
        let field = ApiField {
            kind: "DeploymentSpec".to_string(),
            group: "apps".to_string(),
            version: "v1".to_string(),
            description: String::new(),
        };

        assert_eq!(resource.group(), "apps");
        assert_eq!(resource.kind(), "Deployment");
        assert_eq!(field.version(), "v1");
        assert_eq!(field.description(), "");
    }

    #[test]
    fn test_resource_deserializes_with_defaults() {
        let resource: ApiResource =
            serde_json::from_str(r#"{"kind":"Namespace","version":"v1"}"#)
                .expect("valid record json");

        assert_eq!(resource.kind, "Namespace");
        assert_eq!(resource.group, "");
        assert_eq!(resource.description, "");
    }

    #[test]
    fn test_default_metadata_names_this_generator() {
        let meta = Metadata::default();
        assert_eq!(meta.vendor, "modgen");
        assert!(!meta.version.is_empty());
    }
}
