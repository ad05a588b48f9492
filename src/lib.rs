//! # twindl-base
//!
//! Core library for TwinDL digital-twin model analysis: the ontology graph,
//! type resolution, validation, and completion.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → editor features (key/value completion)
//!   ↓
//! hir       → semantic model: ontology graph, resolution, diagnostics
//!   ↓
//! project   → definition documents (embedded or on-disk)
//!   ↓
//! syntax    → arena parse tree over JSON documents
//!   ↓
//! base      → primitives (TextRange, vocabulary constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → project → hir → ide)
// ============================================================================

/// Foundation: TextRange re-exports, vocabulary constants
pub mod base;

/// Syntax: arena parse tree, TreeBuilder
pub mod syntax;

/// Project: definition document loading
pub mod project;

/// High-level IR: the ontology graph and everything built on it
pub mod hir;

/// IDE features: key and value completion
pub mod ide;

// Re-export foundation types
pub use base::{TextRange, TextSize};

// Re-export the common working set
pub use hir::{validate, ClassNode, OntologyGraph, Problem, PropertyNode, TypeResolution};
pub use ide::{suggest_keys, suggest_values, Suggestion};
pub use syntax::{NodeId, NodeKind, SyntaxTree, TreeBuilder};
