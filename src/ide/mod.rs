//! Editor-facing features built on the semantic layer.

pub mod completion;

pub use completion::{suggest_keys, suggest_values, Suggestion};
