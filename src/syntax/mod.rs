//! Syntax layer — the parsed-tree interface the semantic core consumes.
//!
//! The core never parses raw text. An external parser (or a test fixture)
//! produces a [`SyntaxTree`] of typed nodes with byte offsets; everything in
//! `hir` and `ide` reads that tree through the navigation methods here.

mod tree;

pub use tree::{NodeId, NodeKind, ScalarValue, SyntaxNode, SyntaxTree, TreeBuilder};
