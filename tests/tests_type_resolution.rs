//! Tests for type resolution: discriminators, union-range expansion,
//! inference from the containing property, and the ambiguous-name fallback.

mod helpers;

use helpers::fixtures::{graph, parse_document};
use twindl::hir::resolve::{
    applicable_classes, enum_values, property_for, resolve_type, TypeResolution,
};
use twindl::syntax::{NodeId, SyntaxTree};

fn class_names(classes: &[&twindl::hir::ClassNode]) -> Vec<String> {
    let mut names: Vec<String> = classes.iter().map(|c| c.name.to_string()).collect();
    names.sort();
    names
}

fn value_of(tree: &SyntaxTree, object: NodeId, name: &str) -> NodeId {
    let pair = tree.find_property(object, name).unwrap();
    tree.property_value(pair).unwrap()
}

#[test]
fn test_discriminator_names_the_class() {
    let tree = parse_document(r#"{ "@type": "Telemetry" }"#);
    let resolution = resolve_type(graph(), &tree, tree.root().unwrap());
    assert_eq!(resolution.class().unwrap().name.as_ref(), "Telemetry");
}

#[test]
fn test_unknown_discriminator_is_unresolved() {
    let tree = parse_document(r#"{ "@type": "Nonsense" }"#);
    let resolution = resolve_type(graph(), &tree, tree.root().unwrap());
    assert!(resolution.class().is_none());
}

#[test]
fn test_abstract_range_expands_to_concrete_descendants() {
    let graph = graph();
    let contents = graph.property_by_name("contents").unwrap();
    let classes = applicable_classes(graph, contents);
    assert_eq!(class_names(&classes), ["Command", "Property", "Telemetry"]);
}

#[test]
fn test_exclude_narrows_the_applicable_set() {
    let graph = graph();
    let element_schema = graph.property_by_name("elementSchema").unwrap();
    let classes = applicable_classes(graph, element_schema);
    // Schema's composite descendants, minus the excluded Array.
    assert_eq!(class_names(&classes), ["Enum", "Map", "Object"]);
}

#[test]
fn test_entry_applicable_set_uses_allow_list() {
    let graph = graph();
    let entry = graph.entry_node().unwrap();
    let classes = applicable_classes(graph, entry);
    assert_eq!(class_names(&classes), ["CapabilityModel", "Interface"]);
}

#[test]
fn test_singleton_range_is_inferred_without_discriminator() {
    let tree = parse_document(r#"{ "@type": "Map", "mapKey": { "name": "k" } }"#);
    let inner = value_of(&tree, tree.root().unwrap(), "mapKey");
    let resolution = resolve_type(graph(), &tree, inner);
    assert_eq!(resolution.class().unwrap().name.as_ref(), "MapKey");
}

#[test]
fn test_multi_candidate_range_stays_unresolved() {
    let tree = parse_document(r#"{ "@type": "Interface", "contents": [ { "name": "t" } ] }"#);
    let contents = value_of(&tree, tree.root().unwrap(), "contents");
    let element = tree.children(contents)[0];
    assert!(matches!(
        resolve_type(graph(), &tree, element),
        TypeResolution::Unresolved
    ));
}

#[test]
fn test_semantic_array_with_adornment_resolves() {
    let tree = parse_document(r#"{ "@type": ["Telemetry", "Temperature"] }"#);
    let resolution = resolve_type(graph(), &tree, tree.root().unwrap());
    assert_eq!(resolution.class().unwrap().name.as_ref(), "Telemetry");
    // adornment order must not matter
    let tree = parse_document(r#"{ "@type": ["Temperature", "Telemetry"] }"#);
    let resolution = resolve_type(graph(), &tree, tree.root().unwrap());
    assert_eq!(resolution.class().unwrap().name.as_ref(), "Telemetry");
}

#[test]
fn test_semantic_array_with_two_classes_conflicts() {
    let tree = parse_document(r#"{ "@type": ["Telemetry", "Property"] }"#);
    assert!(matches!(
        resolve_type(graph(), &tree, tree.root().unwrap()),
        TypeResolution::Conflict(..)
    ));
}

#[test]
fn test_semantic_array_of_only_adornments_is_unresolved() {
    let tree = parse_document(r#"{ "@type": ["Temperature"] }"#);
    assert!(matches!(
        resolve_type(graph(), &tree, tree.root().unwrap()),
        TypeResolution::Unresolved
    ));
}

#[test]
fn test_ambiguous_property_name_resolves_through_owner() {
    let tree = parse_document(
        r#"{ "@type": "InterfaceInstance", "name": "thermo", "schema": "urn:x:y" }"#,
    );
    let pair = tree.find_property(tree.root().unwrap(), "schema").unwrap();
    let property = property_for(graph(), &tree, pair).unwrap();
    // the owning class disambiguates to the object-or-identifier shorthand
    assert!(property.id.ends_with("interfaceSchema"));
    assert!(property.has_range("http://twindl.org/v1/classes/Interface"));
    assert!(property.has_range("http://www.w3.org/2001/XMLSchema#string"));
}

#[test]
fn test_ambiguous_name_on_telemetry_picks_plain_schema() {
    let tree = parse_document(r#"{ "@type": "Telemetry", "name": "t", "schema": "double" }"#);
    let pair = tree.find_property(tree.root().unwrap(), "schema").unwrap();
    let property = property_for(graph(), &tree, pair).unwrap();
    assert!(property.id.ends_with("properties/schema"));
}

#[test]
fn test_enum_values_gather_through_abstract_class() {
    let graph = graph();
    let unit = graph.property_by_name("unit").unwrap();
    let values = enum_values(graph, unit);
    for expected in ["celsius", "fahrenheit", "kelvin", "metre"] {
        assert!(values.iter().any(|v| v.as_ref() == expected), "{expected}");
    }
    // object completion is impossible here: all descendants are enums
    assert!(applicable_classes(graph, unit).is_empty());
}
