//! Arena-backed parse tree for TwinDL documents.
//!
//! Nodes are stored flat and addressed by [`NodeId`]; children and parents
//! are id links, so the tree is cheap to clone and trivially `Send + Sync`.

use std::sync::Arc;

use crate::base::TextRange;

/// The kind of a parse-tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    /// A name/value pair inside an object. Its first child is the name node
    /// (a `String`), its second child the value node.
    Property,
}

impl NodeKind {
    /// Get a display label for this node kind.
    pub fn display(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Property => "property",
        }
    }
}

/// Index of a node within its [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(raw: usize) -> Self {
        Self(raw as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    String(Arc<str>),
    Number(f64),
    Boolean(bool),
}

/// A single node: kind, byte range, optional leaf value, and id links.
#[derive(Clone, Debug)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub range: TextRange,
    pub value: Option<ScalarValue>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

/// An immutable parse tree.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    /// The document root node, if the tree is non-empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn string_value(&self, id: NodeId) -> Option<&str> {
        match self.node(id).value {
            Some(ScalarValue::String(ref s)) => Some(s),
            _ => None,
        }
    }

    pub fn number_value(&self, id: NodeId) -> Option<f64> {
        match self.node(id).value {
            Some(ScalarValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn bool_value(&self, id: NodeId) -> Option<bool> {
        match self.node(id).value {
            Some(ScalarValue::Boolean(b)) => Some(b),
            _ => None,
        }
    }

    /// Iterate the property pairs of an object node.
    pub fn properties(&self, object: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(object)
            .iter()
            .copied()
            .filter(|&c| self.kind(c) == NodeKind::Property)
    }

    /// The name node of a property pair.
    pub fn property_name_node(&self, pair: NodeId) -> Option<NodeId> {
        match self.kind(pair) {
            NodeKind::Property => self.children(pair).first().copied(),
            _ => None,
        }
    }

    /// The name of a property pair.
    pub fn property_name(&self, pair: NodeId) -> Option<&str> {
        self.property_name_node(pair)
            .and_then(|n| self.string_value(n))
    }

    /// The value node of a property pair.
    pub fn property_value(&self, pair: NodeId) -> Option<NodeId> {
        match self.kind(pair) {
            NodeKind::Property => self.children(pair).get(1).copied(),
            _ => None,
        }
    }

    /// Find the property pair with the given name on an object.
    pub fn find_property(&self, object: NodeId, name: &str) -> Option<NodeId> {
        self.properties(object)
            .find(|&p| self.property_name(p) == Some(name))
    }

    /// The outer property of a node: the property pair whose value is this
    /// node, or whose array value contains this node as an element.
    pub fn outer_property(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        match self.kind(parent) {
            NodeKind::Property => Some(parent),
            NodeKind::Array => {
                let grandparent = self.parent(parent)?;
                (self.kind(grandparent) == NodeKind::Property).then_some(grandparent)
            }
            _ => None,
        }
    }
}

// ============================================================================
// TREE BUILDER
// ============================================================================

/// Assembles a [`SyntaxTree`]. The host editor's parser adapter (or a test
/// fixture) drives this; ranges are supplied by the caller.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind, range: TextRange, value: Option<ScalarValue>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(SyntaxNode {
            kind,
            range,
            value,
            children: Vec::new(),
            parent: None,
        });
        id
    }

    pub fn object(&mut self, range: TextRange) -> NodeId {
        self.push(NodeKind::Object, range, None)
    }

    pub fn array(&mut self, range: TextRange) -> NodeId {
        self.push(NodeKind::Array, range, None)
    }

    pub fn string(&mut self, range: TextRange, value: impl Into<Arc<str>>) -> NodeId {
        self.push(NodeKind::String, range, Some(ScalarValue::String(value.into())))
    }

    pub fn number(&mut self, range: TextRange, value: f64) -> NodeId {
        self.push(NodeKind::Number, range, Some(ScalarValue::Number(value)))
    }

    pub fn boolean(&mut self, range: TextRange, value: bool) -> NodeId {
        self.push(NodeKind::Boolean, range, Some(ScalarValue::Boolean(value)))
    }

    /// Attach a child to a parent (array element or property pair member).
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Create a property pair on an object from an existing name node and
    /// value node.
    pub fn property(
        &mut self,
        object: NodeId,
        range: TextRange,
        name: NodeId,
        value: NodeId,
    ) -> NodeId {
        let pair = self.push(NodeKind::Property, range, None);
        self.attach(pair, name);
        self.attach(pair, value);
        self.attach(object, pair);
        pair
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            root: Some(root),
        }
    }
}
