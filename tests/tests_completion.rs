//! Tests for the suggestion engine: key completion, value completion, and
//! the scaffolds attached to inserted keys.

mod helpers;

use helpers::fixtures::{graph, parse_document};
use rstest::rstest;
use twindl::ide::{suggest_keys, suggest_values, Suggestion};
use twindl::syntax::{NodeId, SyntaxTree};

fn value_of(tree: &SyntaxTree, object: NodeId, name: &str) -> NodeId {
    let pair = tree.find_property(object, name).unwrap();
    tree.property_value(pair).unwrap()
}

fn labels(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.label.as_ref()).collect()
}

fn find<'s>(suggestions: &'s [Suggestion], label: &str) -> &'s Suggestion {
    suggestions
        .iter()
        .find(|s| s.label.as_ref() == label)
        .unwrap_or_else(|| panic!("no suggestion '{label}'"))
}

#[test]
fn test_unresolved_object_suggests_only_the_discriminator() {
    let tree = parse_document("{ }");
    let suggestions = suggest_keys(graph(), &tree, tree.root().unwrap(), None);
    assert_eq!(labels(&suggestions), ["@type"]);
    assert!(suggestions[0].required);
    assert_eq!(suggestions[0].insert_text.as_ref(), "\"@type\": \"\"");
}

#[test]
fn test_interface_keys() {
    let tree = parse_document(r#"{ "@type": "Interface" }"#);
    let suggestions = suggest_keys(graph(), &tree, tree.root().unwrap(), None);
    let names = labels(&suggestions);

    assert!(!names.contains(&"@type"), "@type is already present");
    assert!(find(&suggestions, "@id").required);
    assert!(find(&suggestions, "@context").required);
    assert!(!find(&suggestions, "contents").required);
    assert_eq!(
        find(&suggestions, "contents").insert_text.as_ref(),
        "\"contents\": []"
    );
    // name lives on content types, not on the interface itself
    assert!(!names.contains(&"name"));
}

#[test]
fn test_present_keys_are_not_suggested_again() {
    let tree = parse_document(r#"{ "@type": "Interface", "displayName": "x" }"#);
    let suggestions = suggest_keys(graph(), &tree, tree.root().unwrap(), None);
    assert!(!labels(&suggestions).contains(&"displayName"));
}

#[test]
fn test_active_pair_name_does_not_count_as_present() {
    let tree = parse_document(r#"{ "@type": "Interface", "displ": "" }"#);
    let root = tree.root().unwrap();
    let active = tree.find_property(root, "displ").unwrap();
    let suggestions = suggest_keys(graph(), &tree, root, Some(active));
    assert!(labels(&suggestions).contains(&"displayName"));
}

#[test]
fn test_inferable_singleton_omits_the_discriminator() {
    let tree = parse_document(r#"{ "@type": "Map", "mapKey": { } }"#);
    let inner = value_of(&tree, tree.root().unwrap(), "mapKey");
    let suggestions = suggest_keys(graph(), &tree, inner, None);
    let names = labels(&suggestions);
    assert!(!names.contains(&"@type"));
    assert!(find(&suggestions, "name").required);
}

#[test]
fn test_non_inferable_singleton_suggests_only_the_discriminator() {
    let tree = parse_document(r#"{ "@type": "CapabilityModel", "implements": [ { } ] }"#);
    let implements = value_of(&tree, tree.root().unwrap(), "implements");
    let element = tree.children(implements)[0];
    let suggestions = suggest_keys(graph(), &tree, element, None);
    assert_eq!(labels(&suggestions), ["@type"]);
    assert!(suggestions[0].required);
}

#[test]
fn test_written_discriminator_unlocks_the_full_key_set() {
    let tree = parse_document(
        r#"{ "@type": "CapabilityModel", "implements": [ { "@type": "InterfaceInstance" } ] }"#,
    );
    let implements = value_of(&tree, tree.root().unwrap(), "implements");
    let element = tree.children(implements)[0];
    let suggestions = suggest_keys(graph(), &tree, element, None);
    let names = labels(&suggestions);
    assert!(!names.contains(&"@type"));
    assert!(names.contains(&"name"));
    assert!(names.contains(&"schema"));
}

#[test]
fn test_language_object_suggests_missing_codes() {
    let tree = parse_document(r#"{ "@type": "Interface", "displayName": { "en": "hi" } }"#);
    let inner = value_of(&tree, tree.root().unwrap(), "displayName");
    let suggestions = suggest_keys(graph(), &tree, inner, None);
    let names = labels(&suggestions);
    assert_eq!(names.len(), 11);
    assert!(!names.contains(&"en"));
    assert!(names.contains(&"de"));
    assert_eq!(find(&suggestions, "de").insert_text.as_ref(), "\"de\": \"\"");
}

#[rstest]
#[case("writable", "\"writable\": false")]
#[case("name", "\"name\": \"\"")]
#[case("schema", "\"schema\": {}")]
#[case("unit", "\"unit\": \"\"")]
fn test_value_scaffolds(#[case] label: &str, #[case] insert_text: &str) {
    let tree = parse_document(r#"{ "@type": "Property" }"#);
    let suggestions = suggest_keys(graph(), &tree, tree.root().unwrap(), None);
    assert_eq!(find(&suggestions, label).insert_text.as_ref(), insert_text);
}

#[test]
fn test_root_type_values_are_the_partitions() {
    let tree = parse_document("{ }");
    let suggestions = suggest_values(graph(), &tree, "@type", tree.root().unwrap());
    let mut names = labels(&suggestions);
    names.sort_unstable();
    assert_eq!(names, ["CapabilityModel", "Interface"]);
    assert!(!suggestions[0].is_property);
    assert!(suggestions.iter().any(|s| s.insert_text.as_ref() == "\"Interface\""));
}

#[test]
fn test_nested_type_values_follow_the_containing_property() {
    let tree = parse_document(r#"{ "@type": "Interface", "contents": [ { } ] }"#);
    let contents = value_of(&tree, tree.root().unwrap(), "contents");
    let element = tree.children(contents)[0];
    let suggestions = suggest_values(graph(), &tree, "@type", element);
    let mut names = labels(&suggestions);
    names.sort_unstable();
    assert_eq!(names, ["Command", "Property", "Telemetry"]);
}

#[test]
fn test_enum_property_values() {
    let tree = parse_document(r#"{ "@type": "Command", "name": "reboot" }"#);
    let suggestions = suggest_values(graph(), &tree, "commandType", tree.root().unwrap());
    let mut names = labels(&suggestions);
    names.sort_unstable();
    assert_eq!(names, ["asynchronous", "synchronous"]);
}

#[test]
fn test_unit_values_come_from_every_unit_enum() {
    let tree = parse_document(r#"{ "@type": "Telemetry", "name": "t" }"#);
    let suggestions = suggest_values(graph(), &tree, "unit", tree.root().unwrap());
    let names = labels(&suggestions);
    assert!(names.contains(&"celsius"));
    assert!(names.contains(&"kilometre"));
}

#[test]
fn test_free_text_property_has_no_value_suggestions() {
    let tree = parse_document(r#"{ "@type": "Interface" }"#);
    let suggestions = suggest_values(graph(), &tree, "comment", tree.root().unwrap());
    assert!(suggestions.is_empty());
}
