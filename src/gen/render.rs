//! Node Renderer: one Group tree into one output tree
//!
//! Walks a [`Group`]'s versions (already sorted by the grouping stage),
//! builds a node for every record through the external [`NodeBuilder`]
//! collaborator, and attaches the result under the group root keyed
//! version → kind. Record descriptions travel as key comments.
//!
//! Version nodes are staged and attached to the root only after every record
//! in the group rendered, so a caller never observes a half-populated root
//! on failure.

use crate::gen::catalog::CatalogRecord;
use crate::gen::grouping::Group;
use crate::nodes::{Key, Node, ObjectNode};
use std::fmt;

/// Error raised by a node-building collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Generic build failure with message.
    Error(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Error(msg) => write!(f, "node build error: {msg}"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Error raised while rendering a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Node building failed for one kind.
    BuildNode { kind: String, message: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::BuildNode { kind, message } => {
                write!(f, "create node {kind}: {message}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// External per-kind node-building collaborator.
///
/// One call per record; a pure function of the record. The visible and
/// hidden pipelines carry separate builders instantiated for their record
/// variant, so the two can never be interchanged.
pub trait NodeBuilder<R: CatalogRecord> {
    /// Build the tree fragment for one record.
    fn build_node(&self, record: &R) -> Result<ObjectNode, BuildError>;
}

/// Strategy seam for the rendering stage.
pub trait Renderer<R: CatalogRecord> {
    /// Render one group into `root`.
    ///
    /// On failure `root` is left untouched.
    fn render(
        &self,
        builder: &dyn NodeBuilder<R>,
        group: &Group<R>,
        root: &mut ObjectNode,
    ) -> Result<(), RenderError>;
}

/// Canonical rendering implementation.
pub struct TreeRenderer;

impl<R: CatalogRecord> Renderer<R> for TreeRenderer {
    fn render(
        &self,
        builder: &dyn NodeBuilder<R>,
        group: &Group<R>,
        root: &mut ObjectNode,
    ) -> Result<(), RenderError> {
        log::debug!("rendering group '{}'", group.name());

        let mut staged = Vec::with_capacity(group.versions().len());
        for version in group.versions() {
            log::debug!("  version '{}'", version.name());

            let mut version_node = ObjectNode::new();
            for record in version.records() {
                log::debug!("    kind '{}'", record.kind());

                let node = builder.build_node(record).map_err(|err| {
                    RenderError::BuildNode {
                        kind: record.kind().to_string(),
                        message: err.to_string(),
                    }
                })?;

                version_node.set(
                    Key::field_with_comment(record.kind(), record.description()),
                    Node::Object(node),
                );
            }

            staged.push((version.name().to_string(), version_node));
        }

        // Commit only after the whole group rendered.
        for (name, node) in staged {
            root.set(Key::field(name), Node::Object(node));
        }

        Ok(())
    }
}
