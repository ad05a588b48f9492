//! Type resolution — mapping document positions to ontology classes.
//!
//! Two entry points: [`applicable_classes`] expands a property's range into
//! the set of concrete classes its value may take (union types via abstract
//! descendants, allow/deny lists), and [`resolve_type`] determines the class
//! of an object node from its discriminator or, failing that, from the
//! property that contains it.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::trace;

use super::graph::OntologyGraph;
use super::nodes::{ClassNode, PropertyNode};
use super::traverse::breadth_first_edges;
use crate::base::constants::{self, KEY_ID, KEY_TYPE, SEMANTIC_TYPE_CLASS};
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Outcome of resolving an object node's type.
#[derive(Clone, Copy, Debug)]
pub enum TypeResolution<'g> {
    /// Exactly one class applies.
    Resolved(&'g ClassNode),
    /// A semantic-type array named two different classes.
    Conflict(&'g ClassNode, &'g ClassNode),
    /// No class, or more than one candidate without a discriminator.
    Unresolved,
}

impl<'g> TypeResolution<'g> {
    pub fn class(&self) -> Option<&'g ClassNode> {
        match self {
            TypeResolution::Resolved(class) => Some(class),
            _ => None,
        }
    }
}

/// The concrete classes a property's value may take.
///
/// An explicit `constraint.in` allow-list takes precedence (this is how the
/// synthetic entry property enumerates the partition classes). Otherwise the
/// declared range is expanded: abstract classes contribute their non-abstract,
/// non-enum descendants, concrete classes contribute themselves. Classes on
/// the `constraint.exclude` deny-list are removed.
pub fn applicable_classes<'g>(
    graph: &'g OntologyGraph,
    property: &PropertyNode,
) -> Vec<&'g ClassNode> {
    if !graph.initialized() {
        return Vec::new();
    }

    let mut out: Vec<&ClassNode> = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut push = |class: &'g ClassNode, out: &mut Vec<&'g ClassNode>| {
        if seen.insert(class.id.as_ref()) {
            out.push(class);
        }
    };

    if !property.constraint.in_values.is_empty() {
        for id in &property.constraint.in_values {
            if let Some(class) = graph.class(id) {
                push(class, &mut out);
            }
        }
    } else {
        for range_id in &property.range {
            if constants::is_value_schema(range_id) {
                continue;
            }
            let Some(class) = graph.class(range_id) else {
                continue;
            };
            if class.is_abstract {
                for descendant in descendants(graph, class, |c| c.is_composite()) {
                    push(descendant, &mut out);
                }
            } else if !class.is_enum() {
                push(class, &mut out);
            }
        }
    }

    if !property.constraint.exclude.is_empty() {
        out.retain(|class| {
            !property
                .constraint
                .exclude
                .iter()
                .any(|e| e.as_ref() == class.id.as_ref())
        });
    }
    out
}

/// Collect the descendants of a class (excluding the class itself unless it
/// matches) accepted by the predicate, breadth-first.
pub fn descendants<'g>(
    graph: &'g OntologyGraph,
    class: &ClassNode,
    accept: impl Fn(&ClassNode) -> bool,
) -> Vec<&'g ClassNode> {
    let mut out = Vec::new();
    breadth_first_edges(
        class.id.clone(),
        |id| {
            graph
                .class(id)
                .map(|c| c.children.clone())
                .unwrap_or_default()
        },
        |_, child| {
            if let Some(child_class) = graph.class(child) {
                if accept(child_class) {
                    out.push(child_class);
                }
            }
        },
    );
    out
}

/// All enumerated instance names a property's value may take, gathered
/// recursively through abstract ancestors.
pub fn enum_values(graph: &OntologyGraph, property: &PropertyNode) -> Vec<Arc<str>> {
    let mut out: Vec<Arc<str>> = Vec::new();
    let mut push = |name: &Arc<str>| {
        if !out.contains(name) {
            out.push(name.clone());
        }
    };
    for range_id in &property.range {
        let Some(class) = graph.class(range_id) else {
            continue;
        };
        for instance in &class.instances {
            push(instance);
        }
        for descendant in descendants(graph, class, |c| c.is_enum()) {
            for instance in &descendant.instances {
                push(instance);
            }
        }
    }
    out
}

/// Resolve the property node governing a property pair, by display name with
/// a fall-back through the owning object's class when the name is globally
/// ambiguous.
pub fn property_for<'g>(
    graph: &'g OntologyGraph,
    tree: &SyntaxTree,
    pair: NodeId,
) -> Option<&'g PropertyNode> {
    let name = tree.property_name(pair)?;
    if name == KEY_ID {
        return graph.id_property();
    }
    if let Some(property) = graph.property_by_name(name) {
        return Some(property);
    }
    if graph.is_ambiguous(name) {
        trace!("'{name}' is ambiguous; resolving via owning class");
        let owner = tree.parent(pair)?;
        let owner_class = resolve_type(graph, tree, owner).class()?;
        return owner_class
            .properties
            .iter()
            .filter_map(|id| graph.property(id))
            .find(|p| p.name.as_ref() == name);
    }
    None
}

/// The property whose value is (or whose array element is) the given object,
/// or the synthetic entry property at document root.
pub fn outer_property_node<'g>(
    graph: &'g OntologyGraph,
    tree: &SyntaxTree,
    node: NodeId,
) -> Option<&'g PropertyNode> {
    match tree.outer_property(node) {
        Some(pair) => property_for(graph, tree, pair),
        None => graph.entry_node(),
    }
}

/// Determine the class of an object node.
///
/// An explicit discriminator wins: a string names the class directly; a
/// semantic-type array may carry one class name plus adornments — two
/// distinct class names are a [`TypeResolution::Conflict`]. Without a
/// discriminator the type is inferred from the containing property when its
/// applicable set is a singleton; anything else is unresolved and the caller
/// must treat the discriminator as required.
pub fn resolve_type<'g>(
    graph: &'g OntologyGraph,
    tree: &SyntaxTree,
    object: NodeId,
) -> TypeResolution<'g> {
    if !graph.initialized() || tree.kind(object) != NodeKind::Object {
        return TypeResolution::Unresolved;
    }

    if let Some(pair) = tree.find_property(object, KEY_TYPE) {
        let Some(value) = tree.property_value(pair) else {
            return TypeResolution::Unresolved;
        };
        return match tree.kind(value) {
            NodeKind::String => match tree.string_value(value).and_then(|n| graph.class_by_name(n)) {
                Some(class) => TypeResolution::Resolved(class),
                None => TypeResolution::Unresolved,
            },
            NodeKind::Array => resolve_semantic_array(graph, tree, value),
            _ => TypeResolution::Unresolved,
        };
    }

    let Some(property) = outer_property_node(graph, tree, object) else {
        return TypeResolution::Unresolved;
    };
    let candidates = applicable_classes(graph, property);
    match candidates.as_slice() {
        [single] => TypeResolution::Resolved(*single),
        _ => TypeResolution::Unresolved,
    }
}

/// Resolve a semantic-type array (`"@type": ["Telemetry", "Temperature"]`).
///
/// Adornments — instances of the designated semantic-type class — are
/// skipped; among the remaining entries the first resolved class wins and a
/// second distinct one is a conflict. Shapes beyond two string entries are
/// treated as unresolvable rather than guessed at.
fn resolve_semantic_array<'g>(
    graph: &'g OntologyGraph,
    tree: &SyntaxTree,
    array: NodeId,
) -> TypeResolution<'g> {
    let elements = tree.children(array);
    if elements.is_empty() || elements.len() > 2 {
        return TypeResolution::Unresolved;
    }

    let mut resolved: Option<&ClassNode> = None;
    for &element in elements {
        let Some(name) = tree.string_value(element) else {
            return TypeResolution::Unresolved;
        };
        if is_semantic_adornment(graph, name) {
            continue;
        }
        let Some(class) = graph.class_by_name(name) else {
            return TypeResolution::Unresolved;
        };
        match resolved {
            Some(first) if first.id != class.id => {
                return TypeResolution::Conflict(first, class);
            }
            _ => resolved = Some(class),
        }
    }
    match resolved {
        Some(class) => TypeResolution::Resolved(class),
        None => TypeResolution::Unresolved,
    }
}

/// True if the name is an instance of the designated semantic-type class.
pub fn is_semantic_adornment(graph: &OntologyGraph, name: &str) -> bool {
    graph
        .class(SEMANTIC_TYPE_CLASS)
        .is_some_and(|class| class.instances.iter().any(|i| i.as_ref() == name))
}
