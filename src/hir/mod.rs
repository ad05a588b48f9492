//! The semantic layer: the ontology graph, type resolution, and validation.
//!
//! [`graph::OntologyGraph`] is built once from the definition documents and
//! shared read-only. [`resolve`] answers "what class can live here" questions
//! against a parse tree, and [`diagnostics`] turns the answers into
//! positioned problems.

mod builder;
pub mod diagnostics;
pub mod graph;
pub mod nodes;
pub mod resolve;
mod traverse;

pub use diagnostics::{validate, Problem};
pub use graph::OntologyGraph;
pub use nodes::{ClassNode, Constraint, PropertyKind, PropertyNode};
pub use resolve::TypeResolution;
