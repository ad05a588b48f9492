//! Domain constants for the TwinDL vocabulary.
//!
//! Reserved document keys, RDF edge labels, value-schema IRIs, and the
//! designated class ids the graph builder and validator depend on.

/// Reserved identifier key on document objects.
pub const KEY_ID: &str = "@id";
/// Reserved discriminator key naming an object's concrete class.
pub const KEY_TYPE: &str = "@type";
/// Reserved context-marker key on top-level objects.
pub const KEY_CONTEXT: &str = "@context";

// ============================================================================
// EDGE LABELS AND MARKERS (definition data)
// ============================================================================

/// Edge declaring a node's kind (class, property, or enum membership).
pub const EDGE_TYPE: &str = "rdf:type";
/// Edge attaching a human-readable name.
pub const EDGE_LABEL: &str = "rdfs:label";
/// Edge attaching a property to its owning class.
pub const EDGE_DOMAIN: &str = "rdfs:domain";
/// Edge attaching an allowed value class to a property.
pub const EDGE_RANGE: &str = "rdfs:range";
/// Edge declaring a direct subclass relationship.
pub const EDGE_SUBCLASS_OF: &str = "rdfs:subClassOf";

/// Type-edge target marking the source as a class.
pub const MARKER_CLASS: &str = "rdfs:Class";
/// Type-edge target marking the source as a property.
pub const MARKER_PROPERTY: &str = "rdf:Property";

// ============================================================================
// VALUE SCHEMAS
// ============================================================================

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

/// The multilingual-string class: values are either a plain string or an
/// object keyed by language code.
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Returns true for the primitive literal value schemas (not `langString`,
/// which is materialized as a class node).
pub fn is_value_schema(id: &str) -> bool {
    matches!(id, XSD_STRING | XSD_INTEGER | XSD_BOOLEAN)
}

// ============================================================================
// VOCABULARY NAMESPACES AND DESIGNATED NODES
// ============================================================================

pub const CLASS_NAMESPACE: &str = "http://twindl.org/v1/classes/";
pub const PROPERTY_NAMESPACE: &str = "http://twindl.org/v1/properties/";
pub const INSTANCE_NAMESPACE: &str = "http://twindl.org/v1/instances/";

/// Root of the class hierarchy; inheritance expansion starts here.
pub const BASE_CLASS: &str = "http://twindl.org/v1/classes/Entity";

/// The top-level partition classes: valid root types of a document.
pub const PARTITION_CLASSES: [&str; 2] = [
    "http://twindl.org/v1/classes/Interface",
    "http://twindl.org/v1/classes/CapabilityModel",
];

/// Generic roots that are never instantiated directly; marked abstract
/// during the adjustment pass.
pub const ABSTRACT_CLASSES: [&str; 3] = [
    "http://twindl.org/v1/classes/Schema",
    "http://twindl.org/v1/classes/Unit",
    "http://twindl.org/v1/classes/Content",
];

/// Enum class whose instances may adorn a discriminator array
/// (e.g. `"@type": ["Telemetry", "Temperature"]`).
pub const SEMANTIC_TYPE_CLASS: &str = "http://twindl.org/v1/classes/SemanticType";

/// Property accepting either a full object or an identifier string; the
/// adjustment pass adds the string range and the identifier constraint.
pub const SHORTHAND_PROPERTY: &str = "http://twindl.org/v1/properties/interfaceSchema";

/// Id of the synthetic entry property validation starts from.
pub const ENTRY_NODE: &str = "http://twindl.org/v1/entryNode";

/// Language codes offered when completing a multilingual-string object.
pub const LANGUAGE_CODES: [&str; 12] = [
    "de", "en", "es", "fr", "it", "ja", "ko", "pl", "pt", "ru", "tr", "zh",
];

/// Extract the local name from an IRI-like id (segment after the last
/// `/`, `#`, or `:`).
pub fn local_name(id: &str) -> &str {
    id.rfind(['/', '#', ':'])
        .map(|idx| &id[idx + 1..])
        .unwrap_or(id)
}
