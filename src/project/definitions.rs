//! Raw definition-data models and the Definition Loader.
//!
//! The graph builder consumes a [`DefinitionSet`]: a vocabulary context
//! (term → id, with container flags), a list of `(source, label, target)`
//! edges, and a table of constraints keyed by display name. The shapes here
//! mirror the JSON resources under `definitions/`; they carry no semantics —
//! that is the graph builder's job.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// File name of the vocabulary context resource.
pub const CONTEXT_FILE: &str = "context.json";
/// File name of the edge-list resource.
pub const GRAPH_FILE: &str = "graph.json";
/// File name of the constraint-table resource.
pub const CONSTRAINTS_FILE: &str = "constraints.json";

static EMBEDDED_CONTEXT: &str = include_str!("../../definitions/context.json");
static EMBEDDED_GRAPH: &str = include_str!("../../definitions/graph.json");
static EMBEDDED_CONSTRAINTS: &str = include_str!("../../definitions/constraints.json");

/// Errors that can occur while loading definition data.
///
/// Callers of the graph builder never see these: a failed load produces an
/// uninitialized graph. They surface only when the loader is used directly.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading a definition resource.
    #[error("failed to read {file}: {source}")]
    Io {
        file: String,
        source: std::io::Error,
    },

    /// A definition resource is not valid JSON (or has the wrong shape).
    #[error("invalid definition data in {file}: {source}")]
    Json {
        file: String,
        source: serde_json::Error,
    },
}

/// A vocabulary term value: either a bare id, or an expanded form carrying a
/// container flag for array-valued terms.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum TermValue {
    Iri(String),
    Expanded {
        #[serde(rename = "@id")]
        id: String,
        #[serde(rename = "@container", default)]
        container: Option<String>,
    },
}

impl TermValue {
    /// The namespaced id this term maps to.
    pub fn id(&self) -> &str {
        match self {
            TermValue::Iri(id) => id,
            TermValue::Expanded { id, .. } => id,
        }
    }

    /// True if the term is declared as a list/set container (array-valued).
    pub fn is_array(&self) -> bool {
        matches!(
            self,
            TermValue::Expanded {
                container: Some(c), ..
            } if c == "@list" || c == "@set"
        )
    }
}

/// The vocabulary context: term name → id mapping.
#[derive(Clone, Debug, Deserialize)]
pub struct ContextDocument {
    #[serde(rename = "@context")]
    pub terms: IndexMap<String, TermValue>,
}

/// A single `(source, label, target)` edge.
#[derive(Clone, Debug, Deserialize)]
pub struct Edge {
    pub source: String,
    pub label: String,
    pub target: String,
}

/// The edge list describing classes, properties, domains, ranges and
/// inheritance.
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeDocument {
    #[serde(rename = "@graph")]
    pub edges: Vec<Edge>,
}

/// Bounds attached to a class or property, keyed by display name in the
/// constraint table.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConstraintSpec {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub pattern: Option<String>,
    pub min_items: Option<u32>,
    pub max_items: Option<u32>,
    /// Property names that must appear on instances of this class.
    pub required: Vec<String>,
    /// Allow-list of value/class ids.
    #[serde(rename = "in")]
    pub in_values: Vec<String>,
    /// Deny-list of class ids removed from a property's applicable set.
    pub exclude: Vec<String>,
    /// Marks a property as required wherever it appears.
    pub is_required: Option<bool>,
    /// Whether a single-candidate range may be inferred without an explicit
    /// discriminator. Defaults to true.
    pub type_inferable: Option<bool>,
}

/// The constraint table: display name → constraint.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct ConstraintDocument {
    pub constraints: IndexMap<String, ConstraintSpec>,
}

/// A complete set of definition data, ready for the graph builder.
#[derive(Clone, Debug)]
pub struct DefinitionSet {
    pub context: ContextDocument,
    pub edges: EdgeDocument,
    pub constraints: ConstraintDocument,
}

impl DefinitionSet {
    /// Parse a definition set from JSON strings.
    pub fn from_strs(
        context: &str,
        edges: &str,
        constraints: &str,
    ) -> Result<Self, LoadError> {
        let context: ContextDocument =
            serde_json::from_str(context).map_err(|source| LoadError::Json {
                file: CONTEXT_FILE.to_string(),
                source,
            })?;
        let edges: EdgeDocument =
            serde_json::from_str(edges).map_err(|source| LoadError::Json {
                file: GRAPH_FILE.to_string(),
                source,
            })?;
        let constraints: ConstraintDocument =
            serde_json::from_str(constraints).map_err(|source| LoadError::Json {
                file: CONSTRAINTS_FILE.to_string(),
                source,
            })?;
        Ok(Self {
            context,
            edges,
            constraints,
        })
    }

    /// Load the definition set shipped with the library.
    pub fn embedded() -> Result<Self, LoadError> {
        Self::from_strs(EMBEDDED_CONTEXT, EMBEDDED_GRAPH, EMBEDDED_CONSTRAINTS)
    }

    /// Load a definition set from a directory containing `context.json`,
    /// `graph.json` and `constraints.json`.
    pub fn from_dir(dir: &Path) -> Result<Self, LoadError> {
        let read = |name: &str| -> Result<String, LoadError> {
            fs::read_to_string(dir.join(name)).map_err(|source| LoadError::Io {
                file: dir.join(name).display().to_string(),
                source,
            })
        };
        let context = read(CONTEXT_FILE)?;
        let edges = read(GRAPH_FILE)?;
        let constraints = read(CONSTRAINTS_FILE)?;
        debug!("loaded definition data from {}", dir.display());
        Self::from_strs(&context, &edges, &constraints)
    }
}
