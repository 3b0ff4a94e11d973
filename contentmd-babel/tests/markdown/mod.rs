//! Markdown format tests
//!
//! Tests for bidirectional Markdown ↔ content model conversion.

mod export;
mod import;
mod roundtrip;
mod table;
