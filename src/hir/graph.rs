//! The ontology graph — the immutable semantic model of the vocabulary.
//!
//! Built once from definition data, then shared read-only. A failed build
//! yields an uninitialized graph on which every lookup fails closed, so
//! consumers degrade gracefully instead of seeing errors.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::warn;

use super::builder::GraphBuilder;
use super::nodes::{ClassNode, PropertyNode};
use crate::project::DefinitionSet;

/// The immutable ontology graph.
#[derive(Debug, Default)]
pub struct OntologyGraph {
    pub(crate) classes: IndexMap<Arc<str>, ClassNode>,
    pub(crate) properties: IndexMap<Arc<str>, PropertyNode>,
    /// Display name → id. `None` marks a name shared by unrelated nodes:
    /// ambiguity is explicit, and callers must resolve via the containing
    /// property instead.
    pub(crate) name_index: FxHashMap<Arc<str>, Option<Arc<str>>>,
    /// Synthetic entry property whose allow-list is the partition classes.
    pub(crate) entry: Option<PropertyNode>,
    /// Reserved `@id` property (literal string with identifier constraint).
    pub(crate) id_property: Option<PropertyNode>,
    /// Reserved `@type` discriminator property.
    pub(crate) type_property: Option<PropertyNode>,
    pub(crate) initialized: bool,
}

impl OntologyGraph {
    /// A graph in the "failed to load" state: every lookup returns nothing.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    /// Build a graph from definition data. Never fails: defective edges are
    /// skipped, and an empty vocabulary leaves the graph uninitialized.
    pub fn build(definitions: &DefinitionSet) -> Self {
        GraphBuilder::new(definitions).build()
    }

    /// Build from the definition data shipped with the library, falling back
    /// to the uninitialized state if the embedded resources fail to parse.
    pub fn load() -> Self {
        match DefinitionSet::embedded() {
            Ok(definitions) => Self::build(&definitions),
            Err(error) => {
                warn!("failed to load embedded definitions: {error}");
                Self::uninitialized()
            }
        }
    }

    /// Process-wide graph built from the embedded definitions on first use.
    /// Tests construct independent instances with [`OntologyGraph::build`].
    pub fn shared() -> &'static OntologyGraph {
        static SHARED: OnceLock<OntologyGraph> = OnceLock::new();
        SHARED.get_or_init(OntologyGraph::load)
    }

    /// True once a non-empty vocabulary has been built.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn class(&self, id: &str) -> Option<&ClassNode> {
        self.classes.get(id)
    }

    pub fn property(&self, id: &str) -> Option<&PropertyNode> {
        self.properties.get(id)
    }

    /// Resolve a display name to its id. Returns `None` both for unknown
    /// names and for ambiguous ones.
    pub fn id_for_name(&self, name: &str) -> Option<&Arc<str>> {
        self.name_index.get(name).and_then(|id| id.as_ref())
    }

    /// True if the name is shared by more than one node.
    pub fn is_ambiguous(&self, name: &str) -> bool {
        matches!(self.name_index.get(name), Some(None))
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassNode> {
        self.id_for_name(name).and_then(|id| self.classes.get(id))
    }

    pub fn property_by_name(&self, name: &str) -> Option<&PropertyNode> {
        self.id_for_name(name)
            .and_then(|id| self.properties.get(id))
    }

    /// The synthetic entry property, if both partition classes exist.
    pub fn entry_node(&self) -> Option<&PropertyNode> {
        self.entry.as_ref()
    }

    pub fn id_property(&self) -> Option<&PropertyNode> {
        self.id_property.as_ref()
    }

    pub fn type_property(&self) -> Option<&PropertyNode> {
        self.type_property.as_ref()
    }

    /// True if the class is a permitted document root type.
    pub fn is_partition_class(&self, id: &str) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| entry.constraint.in_values.iter().any(|v| v.as_ref() == id))
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.classes.values()
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyNode> {
        self.properties.values()
    }
}
