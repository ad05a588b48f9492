//! Foundation types for the TwinDL toolchain.
//!
//! This module provides fundamental types used throughout the library:
//! - [`TextRange`], [`TextSize`] — source positions (byte offsets)
//! - Domain constants (reserved keys, edge labels, vocabulary IRIs)
//!
//! This module has NO dependencies on other twindl modules.

pub mod constants;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
