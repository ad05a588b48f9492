//! Graph builder — turns raw definition data into the [`OntologyGraph`].
//!
//! Five passes: vocabulary context, edges, adjustments, inheritance
//! expansion, entry construction. Node creation is lazy "ensure-or-create",
//! so edges may reference a node before its defining edge is seen and the
//! result is independent of edge order.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::graph::OntologyGraph;
use super::nodes::{ClassNode, Constraint, PropertyKind, PropertyNode};
use super::traverse::breadth_first_edges;
use crate::base::constants::{
    self, ABSTRACT_CLASSES, BASE_CLASS, EDGE_DOMAIN, EDGE_LABEL, EDGE_RANGE, EDGE_SUBCLASS_OF,
    EDGE_TYPE, ENTRY_NODE, KEY_ID, KEY_TYPE, MARKER_CLASS, MARKER_PROPERTY, PARTITION_CLASSES,
    RDF_LANG_STRING, SHORTHAND_PROPERTY, XSD_STRING,
};
use crate::project::DefinitionSet;

pub(crate) struct GraphBuilder<'d> {
    definitions: &'d DefinitionSet,
    classes: IndexMap<Arc<str>, ClassNode>,
    properties: IndexMap<Arc<str>, PropertyNode>,
    name_index: FxHashMap<Arc<str>, Option<Arc<str>>>,
    /// id → vocabulary term name, from the context pass.
    term_names: FxHashMap<Arc<str>, Arc<str>>,
    /// ids of terms declared as list/set containers.
    plural_ids: FxHashSet<Arc<str>>,
    /// ids whose display name was already set by a label edge.
    labeled: FxHashSet<Arc<str>>,
}

impl<'d> GraphBuilder<'d> {
    pub(crate) fn new(definitions: &'d DefinitionSet) -> Self {
        Self {
            definitions,
            classes: IndexMap::new(),
            properties: IndexMap::new(),
            name_index: FxHashMap::default(),
            term_names: FxHashMap::default(),
            plural_ids: FxHashSet::default(),
            labeled: FxHashSet::default(),
        }
    }

    pub(crate) fn build(mut self) -> OntologyGraph {
        self.context_pass();
        self.edge_pass();
        self.adjustment_pass();
        self.expand_inheritance();
        let entry = self.build_entry();

        let initialized = !self.classes.is_empty();
        let id_property = initialized.then(|| self.make_id_property());
        let type_property = initialized.then(Self::make_type_property);

        for property in self.properties.values_mut() {
            property.kind = derive_kind(&property.range);
        }

        OntologyGraph {
            classes: self.classes,
            properties: self.properties,
            name_index: self.name_index,
            entry,
            id_property,
            type_property,
            initialized,
        }
    }

    // ========================================================================
    // PASS 1: VOCABULARY CONTEXT
    // ========================================================================

    /// Map every non-reserved term to its namespaced id, record container
    /// flags, and seed the name index.
    fn context_pass(&mut self) {
        for (term, value) in &self.definitions.context.terms {
            if term.starts_with('@') {
                continue;
            }
            let id: Arc<str> = Arc::from(value.id());
            let name: Arc<str> = Arc::from(term.as_str());
            self.register_name(name.clone(), id.clone());
            self.term_names.insert(id.clone(), name);
            if value.is_array() {
                self.plural_ids.insert(id);
            }
        }
    }

    /// Record `name → id`, clearing the entry on collision so that ambiguous
    /// names fail lookup instead of resolving arbitrarily.
    fn register_name(&mut self, name: Arc<str>, id: Arc<str>) {
        match self.name_index.get(&name) {
            Some(Some(existing)) if existing.as_ref() != id.as_ref() => {
                trace!("name collision on '{name}': {existing} vs {id}");
                self.name_index.insert(name, None);
            }
            Some(_) => {}
            None => {
                self.name_index.insert(name, Some(id));
            }
        }
    }

    // ========================================================================
    // PASS 2: EDGES
    // ========================================================================

    fn edge_pass(&mut self) {
        // Label edges dispatch on whether the source is a class or a
        // property, so they are held back until every type edge has run.
        let mut labels: Vec<(Arc<str>, Arc<str>)> = Vec::new();
        for edge in &self.definitions.edges.edges {
            let source: Arc<str> = Arc::from(edge.source.as_str());
            let target: Arc<str> = Arc::from(edge.target.as_str());
            match edge.label.as_str() {
                EDGE_TYPE => self.add_type_edge(source, target),
                EDGE_LABEL => labels.push((source, target)),
                EDGE_DOMAIN => {
                    self.ensure_property(source.clone());
                    let class = self.ensure_class(target);
                    if !class.properties.contains(&source) {
                        class.properties.push(source);
                    }
                }
                EDGE_RANGE => {
                    if !constants::is_value_schema(&target) && target.as_ref() != RDF_LANG_STRING {
                        self.ensure_class(target.clone());
                    }
                    let property = self.ensure_property(source);
                    if !property.range.contains(&target) {
                        property.range.push(target);
                    }
                }
                EDGE_SUBCLASS_OF => {
                    self.ensure_class(source.clone());
                    let base = self.ensure_class(target);
                    if !base.children.contains(&source) {
                        base.children.push(source);
                    }
                }
                other => trace!("skipping edge with unknown label '{other}'"),
            }
        }
        for (source, label) in labels {
            self.add_label_edge(source, label);
        }
    }

    fn add_type_edge(&mut self, source: Arc<str>, target: Arc<str>) {
        match target.as_ref() {
            MARKER_CLASS => {
                self.ensure_class(source);
            }
            MARKER_PROPERTY => {
                self.ensure_property(source);
            }
            // Any other target denotes an enum value: `source` is an
            // instance of the enum class `target`.
            _ => {
                let instance = self.display_name_for(&source);
                let class = self.ensure_class(target);
                if !class.instances.contains(&instance) {
                    class.instances.push(instance);
                }
            }
        }
    }

    /// A label names a node (first label wins) and attaches any constraint
    /// definition registered under that name. Runs after the other edges,
    /// so the class-or-property decision is already settled.
    fn add_label_edge(&mut self, source: Arc<str>, label: Arc<str>) {
        let constraint = self.constraint_for(&label);
        let first_label = self.labeled.insert(source.clone());

        if self.properties.contains_key(&source) {
            let property = self.ensure_property(source.clone());
            if first_label {
                property.name = label.clone();
            }
            if property.constraint.is_empty() {
                if let Some(c) = constraint {
                    property.constraint = c;
                }
            }
        } else {
            let class = self.ensure_class(source.clone());
            if first_label {
                class.name = label.clone();
            }
            if class.constraint.is_empty() {
                if let Some(c) = constraint {
                    class.constraint = c;
                }
            }
        }
        self.register_name(label, source);
    }

    fn ensure_class(&mut self, id: Arc<str>) -> &mut ClassNode {
        if !self.classes.contains_key(&id) {
            let name = self.display_name_for(&id);
            self.classes.insert(id.clone(), ClassNode::new(id.clone(), name));
        }
        self.classes.get_mut(&id).unwrap()
    }

    fn ensure_property(&mut self, id: Arc<str>) -> &mut PropertyNode {
        if !self.properties.contains_key(&id) {
            let name = self.display_name_for(&id);
            let mut property = PropertyNode::new(id.clone(), name.clone());
            property.is_plural = self.plural_ids.contains(&id);
            if let Some(spec) = self.definitions.constraints.constraints.get(name.as_ref()) {
                property.constraint = Constraint::from_spec(spec);
                property.is_required = spec.is_required.unwrap_or(false);
                property.is_type_inferable = spec.type_inferable.unwrap_or(true);
            }
            self.properties.insert(id.clone(), property);
        }
        self.properties.get_mut(&id).unwrap()
    }

    /// Vocabulary term name for an id, falling back to the IRI local name.
    fn display_name_for(&self, id: &str) -> Arc<str> {
        self.term_names
            .get(id)
            .cloned()
            .unwrap_or_else(|| Arc::from(constants::local_name(id)))
    }

    fn constraint_for(&self, name: &str) -> Option<Constraint> {
        self.definitions
            .constraints
            .constraints
            .get(name)
            .map(Constraint::from_spec)
    }

    // ========================================================================
    // PASS 3: ADJUSTMENTS
    // ========================================================================

    fn adjustment_pass(&mut self) {
        // Designated roots are never instantiated directly.
        for id in ABSTRACT_CLASSES {
            if let Some(class) = self.classes.get_mut(id) {
                class.is_abstract = true;
            }
        }

        // Materialize the multilingual-string class if any property ranges
        // over it, so type resolution can land on it.
        let uses_lang_string = self
            .properties
            .values()
            .any(|p| p.has_range(RDF_LANG_STRING));
        if uses_lang_string && !self.classes.contains_key(RDF_LANG_STRING) {
            let id: Arc<str> = Arc::from(RDF_LANG_STRING);
            self.classes
                .insert(id.clone(), ClassNode::new(id, Arc::from("langString")));
        }

        // The object-or-string shorthand also accepts an identifier string.
        let identifier_constraint = self.constraint_for(KEY_ID);
        if let Some(property) = self.properties.get_mut(SHORTHAND_PROPERTY) {
            let string_range: Arc<str> = Arc::from(XSD_STRING);
            if !property.range.contains(&string_range) {
                property.range.push(string_range);
            }
            if let Some(c) = identifier_constraint {
                property.constraint = c;
            }
        }
    }

    fn make_id_property(&self) -> PropertyNode {
        let mut property = PropertyNode::new(Arc::from(KEY_ID), Arc::from(KEY_ID));
        property.kind = PropertyKind::Literal;
        property.range.push(Arc::from(XSD_STRING));
        if let Some(c) = self.constraint_for(KEY_ID) {
            property.constraint = c;
        }
        property
    }

    fn make_type_property() -> PropertyNode {
        let mut property = PropertyNode::new(Arc::from(KEY_TYPE), Arc::from(KEY_TYPE));
        property.kind = PropertyKind::Literal;
        property.is_required = true;
        property
    }

    // ========================================================================
    // PASS 4: INHERITANCE EXPANSION
    // ========================================================================

    /// Push property lists down the subclass tree, root to leaves. Enum
    /// children keep their own (empty) lists. After this pass every class's
    /// `properties` is "own ∪ all ancestors".
    fn expand_inheritance(&mut self) {
        // Snapshot the child edges so the traversal doesn't borrow `classes`
        // while the edge callback mutates it.
        let child_map: FxHashMap<Arc<str>, Vec<Arc<str>>> = self
            .classes
            .iter()
            .map(|(id, class)| {
                let children = class
                    .children
                    .iter()
                    .filter(|c| {
                        self.classes
                            .get(c.as_ref())
                            .is_some_and(|child| !child.is_enum())
                    })
                    .cloned()
                    .collect();
                (id.clone(), children)
            })
            .collect();

        let classes = &mut self.classes;
        breadth_first_edges(
            Arc::from(BASE_CLASS),
            |id| child_map.get(id).cloned().unwrap_or_default(),
            |parent, child| {
                let Some(parent_properties) = classes.get(parent).map(|c| c.properties.clone())
                else {
                    return;
                };
                let Some(child_class) = classes.get_mut(child) else {
                    return;
                };
                for property in parent_properties {
                    if !child_class.properties.contains(&property) {
                        child_class.properties.push(property);
                    }
                }
            },
        );
    }

    // ========================================================================
    // PASS 5: ENTRY CONSTRUCTION
    // ========================================================================

    /// The synthetic entry property validation and completion start from.
    /// If either partition class is missing, the document has no valid root
    /// type and no entry node is created.
    fn build_entry(&self) -> Option<PropertyNode> {
        if !PARTITION_CLASSES.iter().all(|id| self.classes.contains_key(*id)) {
            return None;
        }
        let mut entry = PropertyNode::new(Arc::from(ENTRY_NODE), Arc::from(""));
        entry.is_required = true;
        entry.is_type_inferable = false;
        for id in PARTITION_CLASSES {
            entry.range.push(Arc::from(id));
            entry.constraint.in_values.push(Arc::from(id));
        }
        Some(entry)
    }
}

fn derive_kind(range: &[Arc<str>]) -> PropertyKind {
    let literal = !range.is_empty()
        && range
            .iter()
            .all(|id| constants::is_value_schema(id) || id.as_ref() == RDF_LANG_STRING);
    if literal {
        PropertyKind::Literal
    } else {
        PropertyKind::Reference
    }
}
