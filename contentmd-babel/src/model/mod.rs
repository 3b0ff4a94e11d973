//! The Content Model: a structured, serializable document tree.
//!
//! This module defines the format-agnostic representation shared by every format in this
//! crate. Markdown parses into it, the serializers walk it, and the JSON format stores it as is.

pub mod format;
pub mod nodes;

pub use format::*;
pub use nodes::*;
