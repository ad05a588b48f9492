//! Ontology node types — classes, properties, constraints.
//!
//! All nodes are created during the graph build and never mutated afterwards.
//! Ids and names are `Arc<str>` so the graph can be shared across threads
//! without copying.

use std::sync::Arc;

use crate::project::ConstraintSpec;

/// How a property's values relate to the graph.
///
/// `Literal` properties range only over value schemas (string, integer,
/// boolean, multilingual string); `Reference` properties range over classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Literal,
    Reference,
}

impl PropertyKind {
    pub fn display(&self) -> &'static str {
        match self {
            PropertyKind::Literal => "literal",
            PropertyKind::Reference => "reference",
        }
    }
}

/// Bounds attached to a class or property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constraint {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub pattern: Option<Arc<str>>,
    pub min_items: Option<u32>,
    pub max_items: Option<u32>,
    /// Property names that must appear on instances of the owning class.
    pub required: Vec<Arc<str>>,
    /// Allow-list of value/class ids; takes precedence over range expansion.
    pub in_values: Vec<Arc<str>>,
    /// Class ids removed from the applicable set.
    pub exclude: Vec<Arc<str>>,
}

impl Constraint {
    pub fn is_empty(&self) -> bool {
        self.min_value.is_none()
            && self.max_value.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.min_items.is_none()
            && self.max_items.is_none()
            && self.required.is_empty()
            && self.in_values.is_empty()
            && self.exclude.is_empty()
    }

    pub(crate) fn from_spec(spec: &ConstraintSpec) -> Self {
        let arcs = |v: &[String]| v.iter().map(|s| Arc::from(s.as_str())).collect();
        Self {
            min_value: spec.min_value,
            max_value: spec.max_value,
            min_length: spec.min_length,
            max_length: spec.max_length,
            pattern: spec.pattern.as_deref().map(Arc::from),
            min_items: spec.min_items,
            max_items: spec.max_items,
            required: arcs(&spec.required),
            in_values: arcs(&spec.in_values),
            exclude: arcs(&spec.exclude),
        }
    }
}

/// A class in the ontology.
///
/// Invariant: a class is exactly one of abstract, composite (object-valued),
/// or enum-with-instances.
#[derive(Clone, Debug)]
pub struct ClassNode {
    /// Globally unique IRI-like id.
    pub id: Arc<str>,
    /// Display name, as written in documents.
    pub name: Arc<str>,
    pub is_abstract: bool,
    /// Ids of direct subclasses.
    pub children: Vec<Arc<str>>,
    /// Ids of properties declared on or inherited by this class.
    pub properties: Vec<Arc<str>>,
    /// Fixed enumerated value names; non-empty only for enum classes.
    pub instances: Vec<Arc<str>>,
    pub constraint: Constraint,
}

impl ClassNode {
    pub(crate) fn new(id: Arc<str>, name: Arc<str>) -> Self {
        Self {
            id,
            name,
            is_abstract: false,
            children: Vec::new(),
            properties: Vec::new(),
            instances: Vec::new(),
            constraint: Constraint::default(),
        }
    }

    /// True for enum/value classes with fixed instances.
    pub fn is_enum(&self) -> bool {
        !self.instances.is_empty()
    }

    /// True for a normal composite object type.
    pub fn is_composite(&self) -> bool {
        !self.is_abstract && !self.is_enum()
    }
}

/// A property in the ontology.
#[derive(Clone, Debug)]
pub struct PropertyNode {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub kind: PropertyKind,
    /// Allowed range: class ids and/or value-schema ids. Multi-valued to
    /// support union types.
    pub range: Vec<Arc<str>>,
    /// Array-valued.
    pub is_plural: bool,
    pub is_required: bool,
    /// Whether a single-candidate range may be inferred without an explicit
    /// discriminator.
    pub is_type_inferable: bool,
    pub constraint: Constraint,
}

impl PropertyNode {
    pub(crate) fn new(id: Arc<str>, name: Arc<str>) -> Self {
        Self {
            id,
            name,
            kind: PropertyKind::Reference,
            range: Vec::new(),
            is_plural: false,
            is_required: false,
            is_type_inferable: true,
            constraint: Constraint::default(),
        }
    }

    /// True if the property's range includes the given id.
    pub fn has_range(&self, id: &str) -> bool {
        self.range.iter().any(|r| r.as_ref() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_from_spec() {
        let spec: ConstraintSpec = serde_json::from_str(
            r#"{ "minItems": 1, "required": ["name"], "pattern": "^a+$" }"#,
        )
        .unwrap();
        let constraint = Constraint::from_spec(&spec);
        assert_eq!(constraint.min_items, Some(1));
        assert_eq!(constraint.required, vec![Arc::from("name")]);
        assert_eq!(constraint.pattern.as_deref(), Some("^a+$"));
        assert!(!constraint.is_empty());
        assert!(Constraint::default().is_empty());
    }

    #[test]
    fn test_class_shape_predicates() {
        let mut class = ClassNode::new(Arc::from("http://x/classes/A"), Arc::from("A"));
        assert!(class.is_composite());
        class.instances.push(Arc::from("one"));
        assert!(class.is_enum());
        assert!(!class.is_composite());
    }
}
