//! Document validation — structural checking against the ontology graph.
//!
//! [`validate`] walks a parsed document from the synthetic entry property
//! and collects positioned [`Problem`]s. It is a pure function of the tree
//! and the graph: it never panics, never returns an error, and yields an
//! empty list when the graph is uninitialized or no root type exists.

use std::sync::Arc;

use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::trace;

use super::graph::OntologyGraph;
use super::nodes::{ClassNode, PropertyNode};
use super::resolve::{applicable_classes, enum_values, is_semantic_adornment};
use crate::base::constants::{
    KEY_CONTEXT, KEY_ID, KEY_TYPE, LANGUAGE_CODES, RDF_LANG_STRING, XSD_BOOLEAN, XSD_INTEGER,
    XSD_STRING,
};
use crate::base::TextRange;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// A positioned validation problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub range: TextRange,
    pub message: Arc<str>,
}

impl Problem {
    pub fn new(range: TextRange, message: impl Into<Arc<str>>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    /// Byte offset of the problem's start.
    pub fn offset(&self) -> u32 {
        self.range.start().into()
    }

    /// Byte length of the problem span.
    pub fn length(&self) -> u32 {
        self.range.len().into()
    }
}

/// Problem message constants and formatters.
pub mod messages {
    pub const OBJECT_NOT_ALLOWED: &str = "object is not allowed here";
    pub const ARRAY_NOT_ALLOWED: &str = "array is not allowed here";
    pub const STRING_NOT_ALLOWED: &str = "string is not allowed here";
    pub const NUMBER_NOT_ALLOWED: &str = "number is not allowed here";
    pub const BOOLEAN_NOT_ALLOWED: &str = "boolean is not allowed here";
    pub const MISSING_TYPE: &str = "@type is required";
    pub const EMPTY_ARRAY: &str = "array must not be empty";
    pub const EMPTY_STRING: &str = "string must not be empty";
    pub const NOT_INTEGER: &str = "value must be an integer";
    pub const STRING_EXPECTED: &str = "string value expected";

    pub fn invalid_type(valid: &[&str]) -> String {
        format!("invalid type; valid types: {}", valid.join(", "))
    }

    pub fn conflict_type(first: &str, second: &str) -> String {
        format!("conflicting types: {first} and {second}")
    }

    pub fn unexpected_property(name: &str) -> String {
        format!("{name} is unexpected here")
    }

    pub fn missing_required(names: &[&str]) -> String {
        format!("missing required properties: {}", names.join(", "))
    }

    pub fn too_few_items(min: u32) -> String {
        format!("array has too few items; expected at least {min}")
    }

    pub fn too_many_items(max: u32) -> String {
        format!("array has too many items; expected at most {max}")
    }

    pub fn duplicate_value(name: &str) -> String {
        format!("duplicate value: {name}")
    }

    pub fn shorter_than(min: u32) -> String {
        format!("string is shorter than the minimum length of {min}")
    }

    pub fn longer_than(max: u32) -> String {
        format!("string exceeds the maximum length of {max}")
    }

    pub fn not_match_pattern(pattern: &str) -> String {
        format!("string does not match pattern {pattern}")
    }

    pub fn invalid_enum(valid: &[&str]) -> String {
        format!("invalid value; valid values: {}", valid.join(", "))
    }

    pub fn less_than_min(min: f64) -> String {
        format!("value is less than the minimum of {min}")
    }

    pub fn greater_than_max(max: f64) -> String {
        format!("value is greater than the maximum of {max}")
    }
}

/// Validate a full document against the graph.
pub fn validate(graph: &OntologyGraph, tree: &SyntaxTree) -> Vec<Problem> {
    let mut problems = Vec::new();
    if !graph.initialized() {
        return problems;
    }
    let (Some(entry), Some(root)) = (graph.entry_node(), tree.root()) else {
        return problems;
    };
    let mut validator = Validator {
        graph,
        tree,
        problems: &mut problems,
    };
    validator.validate_node(root, entry, true);
    problems
}

struct Validator<'a> {
    graph: &'a OntologyGraph,
    tree: &'a SyntaxTree,
    problems: &'a mut Vec<Problem>,
}

impl<'a> Validator<'a> {
    fn report(&mut self, range: TextRange, message: impl Into<Arc<str>>) {
        self.problems.push(Problem::new(range, message));
    }

    /// Dispatch on node kind. `allow_plural` is cleared when recursing into
    /// array elements so a nested array is rejected.
    fn validate_node(&mut self, node: NodeId, property: &PropertyNode, allow_plural: bool) {
        match self.tree.kind(node) {
            NodeKind::Object => self.validate_object(node, property),
            NodeKind::Array => self.validate_array(node, property, allow_plural),
            NodeKind::String => self.validate_string(node, property),
            NodeKind::Number => self.validate_number(node, property),
            NodeKind::Boolean => self.validate_boolean(node, property),
            NodeKind::Property => {}
        }
    }

    // ========================================================================
    // OBJECTS
    // ========================================================================

    fn validate_object(&mut self, node: NodeId, property: &PropertyNode) {
        let classes = applicable_classes(self.graph, property);
        if classes.is_empty() {
            self.report(self.tree.range(node), messages::OBJECT_NOT_ALLOWED);
            return;
        }

        let type_pair = self.tree.find_property(node, KEY_TYPE);
        let chosen: &ClassNode = match type_pair {
            Some(pair) => match self.resolve_discriminator(pair, &classes) {
                Some(class) => class,
                None => return,
            },
            None => {
                if let [single] = classes.as_slice() {
                    *single
                } else {
                    self.report(self.tree.range(node), messages::MISSING_TYPE);
                    return;
                }
            }
        };
        trace!("validating object as {}", chosen.name);

        if chosen.id.as_ref() == RDF_LANG_STRING {
            self.validate_language_object(node, property);
            return;
        }

        let expected: Vec<&PropertyNode> = chosen
            .properties
            .iter()
            .filter_map(|id| self.graph.property(id))
            .collect();

        let mut observed: Vec<Arc<str>> = Vec::new();
        for pair in self.tree.properties(node).collect::<Vec<_>>() {
            let Some(name) = self.tree.property_name(pair).map(Arc::<str>::from) else {
                continue;
            };
            observed.push(name.clone());
            let Some(value) = self.tree.property_value(pair) else {
                continue;
            };
            match name.as_ref() {
                KEY_TYPE => {}
                KEY_ID => {
                    if let Some(id_property) = self.graph.id_property() {
                        self.validate_node(value, id_property, false);
                    }
                }
                KEY_CONTEXT => {
                    let required = chosen
                        .constraint
                        .required
                        .iter()
                        .any(|r| r.as_ref() == KEY_CONTEXT);
                    if !required {
                        self.report(
                            self.name_range(pair),
                            messages::unexpected_property(KEY_CONTEXT),
                        );
                    } else if self.tree.kind(value) != NodeKind::String {
                        self.report(self.tree.range(value), messages::STRING_EXPECTED);
                    }
                }
                _ => match expected.iter().find(|p| p.name == name) {
                    Some(expected_property) => self.validate_node(value, expected_property, true),
                    None => {
                        self.report(self.name_range(pair), messages::unexpected_property(&name));
                    }
                },
            }
        }

        let missing: Vec<&str> = chosen
            .constraint
            .required
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| !observed.iter().any(|o| o.as_ref() == *r))
            .collect();
        if !missing.is_empty() {
            self.report(self.tree.range(node), messages::missing_required(&missing));
        }
    }

    /// Resolve an explicit discriminator against the applicable set, or
    /// report why it doesn't name exactly one class.
    fn resolve_discriminator(
        &mut self,
        pair: NodeId,
        classes: &[&'a ClassNode],
    ) -> Option<&'a ClassNode> {
        let valid_names: Vec<&str> = classes.iter().map(|c| c.name.as_ref()).collect();
        let Some(value) = self.tree.property_value(pair) else {
            self.report(self.tree.range(pair), messages::MISSING_TYPE);
            return None;
        };
        match self.tree.kind(value) {
            NodeKind::String => {
                let name = self.tree.string_value(value).unwrap_or_default();
                match classes.iter().find(|c| c.name.as_ref() == name) {
                    Some(class) => Some(class),
                    None => {
                        self.report(
                            self.tree.range(value),
                            messages::invalid_type(&valid_names),
                        );
                        None
                    }
                }
            }
            NodeKind::Array => self.resolve_semantic_discriminator(value, classes, &valid_names),
            _ => {
                self.report(
                    self.tree.range(value),
                    messages::invalid_type(&valid_names),
                );
                None
            }
        }
    }

    /// A semantic-type array holds at most two strings: one class name and
    /// optionally one adornment. Two distinct class names conflict; shapes
    /// beyond that are rejected conservatively.
    fn resolve_semantic_discriminator(
        &mut self,
        array: NodeId,
        classes: &[&'a ClassNode],
        valid_names: &[&str],
    ) -> Option<&'a ClassNode> {
        let elements: Vec<NodeId> = self.tree.children(array).to_vec();
        if elements.is_empty() || elements.len() > 2 {
            self.report(self.tree.range(array), messages::invalid_type(valid_names));
            return None;
        }

        let mut resolved: Option<&ClassNode> = None;
        for element in elements {
            let Some(name) = self.tree.string_value(element) else {
                self.report(
                    self.tree.range(element),
                    messages::invalid_type(valid_names),
                );
                return None;
            };
            if is_semantic_adornment(self.graph, name) {
                continue;
            }
            let class = match classes.iter().find(|c| c.name.as_ref() == name) {
                Some(class) => *class,
                None => match self.graph.class_by_name(name) {
                    // A name that resolves outside the applicable set still
                    // counts toward the conflict check.
                    Some(class) => class,
                    None => {
                        self.report(
                            self.tree.range(element),
                            messages::invalid_type(valid_names),
                        );
                        return None;
                    }
                },
            };
            match resolved {
                Some(first) if first.id != class.id => {
                    self.report(
                        self.tree.range(array),
                        messages::conflict_type(&first.name, &class.name),
                    );
                    return None;
                }
                _ => resolved = Some(class),
            }
        }

        match resolved {
            Some(class) if classes.iter().any(|c| c.id == class.id) => Some(class),
            _ => {
                self.report(self.tree.range(array), messages::invalid_type(valid_names));
                None
            }
        }
    }

    /// A multilingual-string object: keys are language codes, values are
    /// non-empty strings checked against the owning property's constraint.
    fn validate_language_object(&mut self, node: NodeId, property: &PropertyNode) {
        for pair in self.tree.properties(node).collect::<Vec<_>>() {
            let Some(name) = self.tree.property_name(pair).map(String::from) else {
                continue;
            };
            if !LANGUAGE_CODES.contains(&name.as_str()) {
                self.report(self.name_range(pair), messages::unexpected_property(&name));
                continue;
            }
            let Some(value) = self.tree.property_value(pair) else {
                continue;
            };
            if self.tree.kind(value) != NodeKind::String {
                self.report(self.tree.range(value), messages::STRING_EXPECTED);
                continue;
            }
            self.validate_free_text(value, property);
        }
    }

    // ========================================================================
    // ARRAYS
    // ========================================================================

    fn validate_array(&mut self, node: NodeId, property: &PropertyNode, allow_plural: bool) {
        if !property.is_plural || !allow_plural {
            self.report(self.tree.range(node), messages::ARRAY_NOT_ALLOWED);
            return;
        }
        let elements: Vec<NodeId> = self.tree.children(node).to_vec();
        if elements.is_empty() {
            self.report(self.tree.range(node), messages::EMPTY_ARRAY);
            return;
        }
        let count = elements.len() as u32;
        if let Some(min) = property.constraint.min_items {
            if count < min {
                self.report(self.tree.range(node), messages::too_few_items(min));
            }
        }
        if let Some(max) = property.constraint.max_items {
            if count > max {
                self.report(self.tree.range(node), messages::too_many_items(max));
            }
        }

        // Items carrying a "name" property must be unique within the array.
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for &element in &elements {
            if self.tree.kind(element) != NodeKind::Object {
                continue;
            }
            let Some(name_value) = self
                .tree
                .find_property(element, "name")
                .and_then(|p| self.tree.property_value(p))
            else {
                continue;
            };
            if let Some(name) = self.tree.string_value(name_value) {
                if !seen.insert(name.to_string()) {
                    self.report(
                        self.tree.range(name_value),
                        messages::duplicate_value(name),
                    );
                }
            }
        }

        for element in elements {
            self.validate_node(element, property, false);
        }
    }

    // ========================================================================
    // LEAVES
    // ========================================================================

    fn validate_string(&mut self, node: NodeId, property: &PropertyNode) {
        if property.has_range(XSD_STRING) || property.has_range(RDF_LANG_STRING) {
            self.validate_free_text(node, property);
            return;
        }

        // Not free text: the value must be one of the enumerated instances.
        let valid = enum_values(self.graph, property);
        if valid.is_empty() {
            self.report(self.tree.range(node), messages::STRING_NOT_ALLOWED);
            return;
        }
        let value = self.tree.string_value(node).unwrap_or_default();
        if !valid.iter().any(|v| v.as_ref() == value) {
            let names: Vec<&str> = valid.iter().map(|v| v.as_ref()).collect();
            self.report(self.tree.range(node), messages::invalid_enum(&names));
        }
    }

    fn validate_free_text(&mut self, node: NodeId, property: &PropertyNode) {
        let value = self.tree.string_value(node).unwrap_or_default();
        if value.is_empty() {
            self.report(self.tree.range(node), messages::EMPTY_STRING);
            return;
        }
        let constraint = &property.constraint;
        let length = value.chars().count() as u32;
        if let Some(min) = constraint.min_length {
            if length < min {
                self.report(self.tree.range(node), messages::shorter_than(min));
                return;
            }
        }
        if let Some(max) = constraint.max_length {
            if length > max {
                self.report(self.tree.range(node), messages::longer_than(max));
                return;
            }
        }
        if let Some(pattern) = &constraint.pattern {
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(value) {
                        self.report(
                            self.tree.range(node),
                            messages::not_match_pattern(pattern),
                        );
                    }
                }
                Err(error) => trace!("skipping unparsable pattern '{pattern}': {error}"),
            }
        }
    }

    fn validate_number(&mut self, node: NodeId, property: &PropertyNode) {
        if !property.has_range(XSD_INTEGER) {
            self.report(self.tree.range(node), messages::NUMBER_NOT_ALLOWED);
            return;
        }
        let Some(value) = self.tree.number_value(node) else {
            return;
        };
        if value.fract() != 0.0 {
            self.report(self.tree.range(node), messages::NOT_INTEGER);
            return;
        }
        let constraint = &property.constraint;
        if let Some(min) = constraint.min_value {
            if value < min {
                self.report(self.tree.range(node), messages::less_than_min(min));
                return;
            }
        }
        if let Some(max) = constraint.max_value {
            if value > max {
                self.report(self.tree.range(node), messages::greater_than_max(max));
            }
        }
    }

    fn validate_boolean(&mut self, node: NodeId, property: &PropertyNode) {
        if !property.has_range(XSD_BOOLEAN) {
            self.report(self.tree.range(node), messages::BOOLEAN_NOT_ALLOWED);
        }
    }

    /// Range of a pair's name node, falling back to the pair itself.
    fn name_range(&self, pair: NodeId) -> TextRange {
        self.tree
            .property_name_node(pair)
            .map(|n| self.tree.range(n))
            .unwrap_or_else(|| self.tree.range(pair))
    }
}
