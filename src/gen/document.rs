//! Document Assembler: a full catalog into a named-output-unit map
//!
//! One [`Document`] run turns the catalog into a map of unit name → root
//! tree: one visible unit per API group, the consolidated `_hidden` unit
//! holding every field-only record, and the aggregate unit (named after the
//! catalog title) that imports all of the above and carries the provenance
//! block.
//!
//! The run is all-or-nothing: any retrieval, grouping, or rendering failure
//! aborts the call and no partial map is returned. Output must be
//! byte-for-byte reproducible for a given catalog and metadata (downstream
//! consumers checksum and diff it), so every observable iteration happens
//! over sorted keys.

use crate::gen::catalog::{ApiField, ApiResource, Catalog, CatalogError, CatalogRecord, Metadata};
use crate::gen::grouping::{Group, GroupError, Grouper, KindGrouper};
use crate::gen::render::{NodeBuilder, RenderError, Renderer, TreeRenderer};
use crate::nodes::{ImportNode, Key, Node, ObjectNode};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the consolidated field-only output unit.
pub const HIDDEN_UNIT: &str = "_hidden";

/// Local binding through which every visible unit reaches the hidden unit.
pub const HIDDEN_LOCAL_KEY: &str = "hidden";

/// Reserved key of the provenance block on the aggregate root.
pub const METADATA_KEY: &str = "__metadata";

/// File extension of generated output units.
pub const UNIT_EXT: &str = ".libsonnet";

/// Error raised while assembling a document.
#[derive(Debug)]
pub enum DocumentError {
    /// Catalog retrieval failed at the given stage.
    Retrieve {
        stage: &'static str,
        source: CatalogError,
    },
    /// Grouping failed.
    Grouping(GroupError),
    /// Rendering failed at the given stage.
    Render {
        stage: &'static str,
        source: RenderError,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Retrieve { stage, source } => write!(f, "{stage}: {source}"),
            DocumentError::Grouping(source) => write!(f, "group resources: {source}"),
            DocumentError::Render { stage, source } => write!(f, "{stage}: {source}"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Retrieve { source, .. } => Some(source),
            DocumentError::Grouping(source) => Some(source),
            DocumentError::Render { source, .. } => Some(source),
        }
    }
}

/// The three pluggable stages of one record variant's pipeline.
struct Pipeline<R: CatalogRecord> {
    grouper: Box<dyn Grouper<R>>,
    renderer: Box<dyn Renderer<R>>,
    builder: Box<dyn NodeBuilder<R>>,
}

/// Orchestrates one generation run over a catalog.
///
/// Holds read access to the catalog plus the injected pipeline stages, and
/// no other state: calling [`Document::nodes`] repeatedly with fresh
/// [`Metadata`] builds fresh trees every time.
pub struct Document<'a> {
    catalog: &'a dyn Catalog,
    resources: Pipeline<ApiResource>,
    fields: Pipeline<ApiField>,
    target: Option<Regex>,
}

impl<'a> Document<'a> {
    /// Create a document over a catalog with the canonical grouping and
    /// rendering stages.
    ///
    /// The per-kind node builders are external collaborators and must be
    /// supplied; one per record variant.
    pub fn new(
        catalog: &'a dyn Catalog,
        resource_builder: impl NodeBuilder<ApiResource> + 'static,
        field_builder: impl NodeBuilder<ApiField> + 'static,
    ) -> Self {
        Document {
            catalog,
            resources: Pipeline {
                grouper: Box::new(KindGrouper),
                renderer: Box::new(TreeRenderer),
                builder: Box::new(resource_builder),
            },
            fields: Pipeline {
                grouper: Box::new(KindGrouper),
                renderer: Box::new(TreeRenderer),
                builder: Box::new(field_builder),
            },
            target: None,
        }
    }

    /// Restrict generation to groups whose name matches `target`.
    pub fn with_target(mut self, target: Regex) -> Self {
        self.target = Some(target);
        self
    }

    /// Substitute the visible pipeline's grouping stage.
    pub fn with_resource_grouper(mut self, grouper: impl Grouper<ApiResource> + 'static) -> Self {
        self.resources.grouper = Box::new(grouper);
        self
    }

    /// Substitute the visible pipeline's rendering stage.
    pub fn with_resource_renderer(mut self, renderer: impl Renderer<ApiResource> + 'static) -> Self {
        self.resources.renderer = Box::new(renderer);
        self
    }

    /// Substitute the hidden pipeline's grouping stage.
    pub fn with_field_grouper(mut self, grouper: impl Grouper<ApiField> + 'static) -> Self {
        self.fields.grouper = Box::new(grouper);
        self
    }

    /// Substitute the hidden pipeline's rendering stage.
    pub fn with_field_renderer(mut self, renderer: impl Renderer<ApiField> + 'static) -> Self {
        self.fields.renderer = Box::new(renderer);
        self
    }

    /// The catalog's full-schema groups, sorted by name.
    pub fn groups(&self) -> Result<Vec<Group<ApiResource>>, DocumentError> {
        let resources = self
            .catalog
            .types()
            .map_err(|source| DocumentError::Retrieve {
                stage: "retrieve resources",
                source,
            })?;

        self.resources
            .grouper
            .group(self.filtered(resources))
            .map_err(DocumentError::Grouping)
    }

    /// The catalog's field-only groups, sorted by name.
    pub fn hidden_groups(&self) -> Result<Vec<Group<ApiField>>, DocumentError> {
        let fields = self
            .catalog
            .fields()
            .map_err(|source| DocumentError::Retrieve {
                stage: "retrieve types",
                source,
            })?;

        self.fields
            .grouper
            .group(self.filtered(fields))
            .map_err(DocumentError::Grouping)
    }

    fn filtered<R: CatalogRecord>(&self, records: Vec<R>) -> Vec<R> {
        match &self.target {
            Some(target) => records
                .into_iter()
                .filter(|record| target.is_match(record.group()))
                .collect(),
            None => records,
        }
    }

    /// Assemble the complete output unit map.
    ///
    /// Keys are exactly: one per visible group, [`HIDDEN_UNIT`], and the
    /// aggregate unit named after the catalog title.
    pub fn nodes(&self, meta: &Metadata) -> Result<BTreeMap<String, Node>, DocumentError> {
        let mut main = ObjectNode::new();
        main.set(Key::inherited(METADATA_KEY), self.metadata_node(meta));

        let mut units = self.render_groups()?;
        let hidden = self.render_hidden_groups()?;

        // Visible units reach the hidden unit through one local binding,
        // placed ahead of the version fields that use it.
        for node in units.values_mut() {
            if let Node::Object(unit) = node {
                unit.set_front(
                    Key::local(HIDDEN_LOCAL_KEY),
                    Node::Import(ImportNode::new(format!("{HIDDEN_UNIT}{UNIT_EXT}"))),
                );
            }
        }
        units.insert(HIDDEN_UNIT.to_string(), hidden);

        // BTreeMap iteration is sorted by unit name, which fixes the import
        // emission order on the aggregate root.
        for name in units.keys() {
            main.set(
                Key::field(name.as_str()),
                Node::Import(ImportNode::new(format!("{name}{UNIT_EXT}"))),
            );
        }
        units.insert(self.catalog.title().to_string(), Node::Object(main));

        Ok(units)
    }

    fn metadata_node(&self, meta: &Metadata) -> Node {
        let mut generator = ObjectNode::new();
        generator.set(Key::field("vendor"), Node::literal(meta.vendor.as_str()));
        generator.set(Key::field("version"), Node::literal(meta.version.as_str()));

        let mut provenance = ObjectNode::new();
        provenance.set(Key::field("version"), Node::literal(self.catalog.version()));
        provenance.set(
            Key::field("checksum"),
            Node::literal(self.catalog.checksum()),
        );
        provenance.set(
            Key::field("maintainer"),
            Node::literal(self.catalog.maintainer()),
        );
        provenance.set(Key::field("generator"), Node::Object(generator));

        let mut block = ObjectNode::new();
        block.set(Key::field(self.catalog.title()), Node::Object(provenance));
        Node::Object(block)
    }

    fn render_groups(&self) -> Result<BTreeMap<String, Node>, DocumentError> {
        let mut out = BTreeMap::new();

        for group in self.groups()? {
            let mut root = ObjectNode::new();
            self.resources
                .renderer
                .render(self.resources.builder.as_ref(), &group, &mut root)
                .map_err(|source| DocumentError::Render {
                    stage: "render groups",
                    source,
                })?;
            out.insert(group.name().to_string(), Node::Object(root));
        }

        Ok(out)
    }

    fn render_hidden_groups(&self) -> Result<Node, DocumentError> {
        let mut consolidated = ObjectNode::new();

        for group in self.hidden_groups()? {
            let mut root = ObjectNode::new();
            self.fields
                .renderer
                .render(self.fields.builder.as_ref(), &group, &mut root)
                .map_err(|source| DocumentError::Render {
                    stage: "render hidden groups",
                    source,
                })?;
            consolidated.set(Key::field(group.name()), Node::Object(root));
        }

        Ok(Node::Object(consolidated))
    }
}
