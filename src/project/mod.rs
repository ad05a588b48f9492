//! Project layer — loading the static TwinDL definition data.
//!
//! The metamodel (vocabulary context, RDF edges, constraints) ships with the
//! library as embedded JSON resources; hosts may also load a replacement set
//! from disk. This is the only module that performs I/O.

mod definitions;

pub use definitions::{
    ConstraintDocument, ConstraintSpec, ContextDocument, DefinitionSet, Edge, EdgeDocument,
    LoadError, TermValue, CONSTRAINTS_FILE, CONTEXT_FILE, GRAPH_FILE,
};
