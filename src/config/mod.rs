//! Command definition documents
//!
//! This module handles parsing of YAML command definitions, resolution of
//! `FILE[:KEY.PATH]` specifiers and validation of definition structure.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
