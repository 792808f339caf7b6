//! Syntax-tree node primitives for generated module libraries
//!
//! This module provides the small set of node types the generation pipeline
//! assembles: keyed object nodes, import references, and literal values.
//! Nodes only model structure. Turning a tree into concrete target-language
//! text is the job of a [`Printer`](crate::gen::library::Printer)
//! implementation outside this crate.
//!
//! # Design
//!
//! An [`ObjectNode`] is an insertion-ordered list of `(Key, Node)` entries.
//! Order is part of the produced artifact (output is checksummed downstream),
//! so there is no hash-map anywhere in the tree: what you set is what gets
//! emitted, in that order.
//!
//! # Examples
//!
//! ```ignore
//! let mut root = ObjectNode::new();
//! root.set(Key::field("v1"), Node::Object(version_node));
//! root.set_front(Key::local("hidden"), Node::Import(ImportNode::new("_hidden.libsonnet")));
//! ```

use serde::Serialize;

/// How a key binds inside an object node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyKind {
    /// A plain visible field.
    Field,
    /// A local binding, visible only inside the enclosing object.
    Local,
    /// A field merged into the object via inheritance.
    Inherited,
}

/// A key naming one entry of an [`ObjectNode`].
///
/// Keys optionally carry a documentation comment that printers emit next to
/// the entry. An empty comment is normalized away at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    name: String,
    kind: KeyKind,
    comment: Option<String>,
}

impl Key {
    /// Create a plain field key.
    pub fn field(name: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            kind: KeyKind::Field,
            comment: None,
        }
    }

    /// Create a field key carrying a documentation comment.
    ///
    /// An empty comment collapses to no comment, so callers can pass a
    /// record's description through unconditionally.
    pub fn field_with_comment(name: impl Into<String>, comment: &str) -> Self {
        Key {
            name: name.into(),
            kind: KeyKind::Field,
            comment: if comment.is_empty() {
                None
            } else {
                Some(comment.to_string())
            },
        }
    }

    /// Create a local binding key.
    pub fn local(name: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            kind: KeyKind::Local,
            comment: None,
        }
    }

    /// Create an inherited field key.
    pub fn inherited(name: impl Into<String>) -> Self {
        Key {
            name: name.into(),
            kind: KeyKind::Inherited,
            comment: None,
        }
    }

    /// The key name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How this key binds.
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// The documentation comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// A reference to another named output unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportNode {
    target: String,
}

impl ImportNode {
    /// Create an import reference to the given unit file name.
    pub fn new(target: impl Into<String>) -> Self {
        ImportNode {
            target: target.into(),
        }
    }

    /// The referenced unit file name.
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// A node in a generated tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// A nested object with ordered keyed entries.
    Object(ObjectNode),
    /// An import reference to another unit.
    Import(ImportNode),
    /// A literal string value.
    Literal(String),
}

impl Node {
    /// Create a literal string node.
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(value.into())
    }

    /// Borrow the inner object node, if this is an object.
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            Node::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the inner import node, if this is an import.
    pub fn as_import(&self) -> Option<&ImportNode> {
        match self {
            Node::Import(import) => Some(import),
            _ => None,
        }
    }
}

/// An object node: an insertion-ordered sequence of keyed child nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectNode {
    entries: Vec<(Key, Node)>,
}

impl ObjectNode {
    /// Create an empty object node.
    pub fn new() -> Self {
        ObjectNode {
            entries: Vec::new(),
        }
    }

    /// Set a keyed child node.
    ///
    /// If an entry with the same key name already exists it is replaced in
    /// place, keeping its position; otherwise the entry is appended.
    pub fn set(&mut self, key: Key, node: Node) {
        match self.entries.iter_mut().find(|(k, _)| k.name() == key.name()) {
            Some(entry) => *entry = (key, node),
            None => self.entries.push((key, node)),
        }
    }

    /// Set a keyed child node at the front of the entry list.
    ///
    /// Used for local bindings that must precede the fields referring to
    /// them. Replaces in place if the key name already exists.
    pub fn set_front(&mut self, key: Key, node: Node) {
        match self.entries.iter_mut().find(|(k, _)| k.name() == key.name()) {
            Some(entry) => *entry = (key, node),
            None => self.entries.insert(0, (key, node)),
        }
    }

    /// Get the child node under the given key name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.name() == name)
            .map(|(_, node)| node)
    }

    /// Get the key with the given name.
    pub fn get_key(&self, name: &str) -> Option<&Key> {
        self.entries
            .iter()
            .map(|(k, _)| k)
            .find(|k| k.name() == name)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(Key, Node)] {
        &self.entries
    }

    /// All keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Targets of all direct import children, in insertion order.
    pub fn imports(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|(_, node)| node.as_import())
            .map(|import| import.target())
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_appends_in_order() {
        let mut obj = ObjectNode::new();
        obj.set(Key::field("b"), Node::literal("1"));
        obj.set(Key::field("a"), Node::literal("2"));

        let names: Vec<_> = obj.keys().map(|k| k.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut obj = ObjectNode::new();
        obj.set(Key::field("a"), Node::literal("old"));
        obj.set(Key::field("b"), Node::literal("other"));
        obj.set(Key::field("a"), Node::literal("new"));

        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a"), Some(&Node::literal("new")));
        let names: Vec<_> = obj.keys().map(|k| k.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_set_front_prepends() {
        let mut obj = ObjectNode::new();
        obj.set(Key::field("v1"), Node::Object(ObjectNode::new()));
        obj.set_front(Key::local("hidden"), Node::Import(ImportNode::new("_hidden.libsonnet")));

        let first = obj.entries().first().map(|(k, _)| k.name().to_string());
        assert_eq!(first, Some("hidden".to_string()));
        assert_eq!(obj.entries()[0].0.kind(), KeyKind::Local);
    }

    #[test]
    fn test_field_with_comment_drops_empty() {
        let with = Key::field_with_comment("Deployment", "A deployment.");
        let without = Key::field_with_comment("Scale", "");

        assert_eq!(with.comment(), Some("A deployment."));
        assert_eq!(without.comment(), None);
    }

    #[test]
    fn test_imports_lists_direct_import_children() {
        let mut obj = ObjectNode::new();
        obj.set(Key::field("apps"), Node::Import(ImportNode::new("apps.libsonnet")));
        obj.set(Key::field("meta"), Node::literal("x"));
        obj.set(Key::field("core"), Node::Import(ImportNode::new("core.libsonnet")));

        assert_eq!(obj.imports(), vec!["apps.libsonnet", "core.libsonnet"]);
    }

    #[test]
    fn test_get_missing_is_none() {
        let obj = ObjectNode::new();
        assert!(obj.get("nothing").is_none());
        assert!(obj.is_empty());
    }
}
