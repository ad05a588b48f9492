//! The suggestion engine — context-sensitive key and value completion.
//!
//! Given a parse tree position, [`suggest_keys`] offers the property names
//! an object may still take and [`suggest_values`] the admissible values for
//! a property. Both are pure lookups against the shared ontology graph and
//! return an empty list rather than erroring when the graph is uninitialized.

use std::sync::Arc;

use tracing::trace;

use crate::base::constants::{
    KEY_CONTEXT, KEY_ID, KEY_TYPE, LANGUAGE_CODES, RDF_LANG_STRING, XSD_BOOLEAN, XSD_INTEGER,
    XSD_STRING,
};
use crate::hir::graph::OntologyGraph;
use crate::hir::nodes::{ClassNode, PropertyNode};
use crate::hir::resolve::{
    applicable_classes, enum_values, outer_property_node, property_for, resolve_type,
    TypeResolution,
};
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// A single completion item.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    /// What the completion list shows.
    pub label: Arc<str>,
    /// What gets inserted, including any value scaffold.
    pub insert_text: Arc<str>,
    /// Key completion (`true`) or value completion (`false`).
    pub is_property: bool,
    /// Whether the editor should append a separator after inserting.
    pub include_separator: bool,
    /// Whether the suggested property is required on its class.
    pub required: bool,
}

impl Suggestion {
    fn key(label: &str, insert_text: String, required: bool) -> Self {
        Self {
            label: Arc::from(label),
            insert_text: Arc::from(insert_text.as_str()),
            is_property: true,
            include_separator: true,
            required,
        }
    }

    fn value(label: &str) -> Self {
        Self {
            label: Arc::from(label),
            insert_text: Arc::from(format!("\"{label}\"").as_str()),
            is_property: false,
            include_separator: false,
            required: false,
        }
    }
}

/// Suggest property names for an object node.
///
/// `active_pair` is the pair being typed into, if any; its (partial) name is
/// not counted as already present.
pub fn suggest_keys(
    graph: &OntologyGraph,
    tree: &SyntaxTree,
    object: NodeId,
    active_pair: Option<NodeId>,
) -> Vec<Suggestion> {
    if !graph.initialized() || tree.kind(object) != NodeKind::Object {
        return Vec::new();
    }

    let present: Vec<&str> = tree
        .properties(object)
        .filter(|&p| Some(p) != active_pair)
        .filter_map(|p| tree.property_name(p))
        .collect();
    let has = |name: &str| present.iter().any(|&p| p == name);

    let chosen = match resolve_type(graph, tree, object) {
        TypeResolution::Resolved(class) => class,
        TypeResolution::Conflict(..) | TypeResolution::Unresolved => {
            // Only the discriminator can make progress here.
            if has(KEY_TYPE) {
                return Vec::new();
            }
            return vec![Suggestion::key(KEY_TYPE, format!("\"{KEY_TYPE}\": \"\""), true)];
        }
    };
    trace!("suggesting keys for {}", chosen.name);

    // A type resolved by inference still needs the discriminator spelled
    // out when the containing property forbids silent inference; nothing
    // else is offered until it is written.
    if !has(KEY_TYPE)
        && outer_property_node(graph, tree, object).is_some_and(|p| !p.is_type_inferable)
    {
        return vec![Suggestion::key(KEY_TYPE, format!("\"{KEY_TYPE}\": \"\""), true)];
    }

    if chosen.id.as_ref() == RDF_LANG_STRING {
        return LANGUAGE_CODES
            .iter()
            .filter(|code| !has(code))
            .map(|code| Suggestion::key(code, format!("\"{code}\": \"\""), false))
            .collect();
    }

    let mut out = Vec::new();
    if !has(KEY_ID) {
        out.push(Suggestion::key(
            KEY_ID,
            format!("\"{KEY_ID}\": \"\""),
            graph.is_partition_class(&chosen.id),
        ));
    }
    if is_required_on(chosen, KEY_CONTEXT) && !has(KEY_CONTEXT) {
        out.push(Suggestion::key(
            KEY_CONTEXT,
            format!("\"{KEY_CONTEXT}\": \"\""),
            true,
        ));
    }

    for property in chosen
        .properties
        .iter()
        .filter_map(|id| graph.property(id))
        .filter(|p| !has(&p.name))
    {
        let required = property.is_required || is_required_on(chosen, &property.name);
        out.push(Suggestion::key(
            &property.name,
            format!("\"{}\": {}", property.name, value_scaffold(graph, property)),
            required,
        ));
    }
    out
}

/// The value scaffold inserted alongside a suggested key.
fn value_scaffold(graph: &OntologyGraph, property: &PropertyNode) -> &'static str {
    if property.is_plural {
        return "[]";
    }
    if property.has_range(XSD_BOOLEAN) {
        return "false";
    }
    if property.has_range(XSD_INTEGER) {
        return "0";
    }
    if property.has_range(XSD_STRING) || property.has_range(RDF_LANG_STRING) {
        return "\"\"";
    }
    // Enum-only ranges take a quoted value name, everything else an object.
    if applicable_classes(graph, property).is_empty() && !enum_values(graph, property).is_empty() {
        return "\"\"";
    }
    "{}"
}

fn is_required_on(class: &ClassNode, name: &str) -> bool {
    class.constraint.required.iter().any(|r| r.as_ref() == name)
}

/// Suggest values for the named property of an object node.
///
/// `@type` completes to the class names admissible at this position; other
/// properties complete to their allow-list or enumerated instances. Free-text
/// and structured values yield nothing.
pub fn suggest_values(
    graph: &OntologyGraph,
    tree: &SyntaxTree,
    property_name: &str,
    object: NodeId,
) -> Vec<Suggestion> {
    if !graph.initialized() {
        return Vec::new();
    }

    if property_name == KEY_TYPE {
        let Some(outer) = outer_property_node(graph, tree, object) else {
            return Vec::new();
        };
        return applicable_classes(graph, outer)
            .iter()
            .map(|class| Suggestion::value(&class.name))
            .collect();
    }

    let property = match tree.find_property(object, property_name) {
        Some(pair) => property_for(graph, tree, pair),
        None => graph.property_by_name(property_name),
    };
    let Some(property) = property else {
        return Vec::new();
    };

    if !property.constraint.in_values.is_empty() {
        return property
            .constraint
            .in_values
            .iter()
            .filter_map(|id| graph.class(id))
            .map(|class| Suggestion::value(&class.name))
            .collect();
    }
    enum_values(graph, property)
        .iter()
        .map(|name| Suggestion::value(name))
        .collect()
}
