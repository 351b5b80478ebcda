//! CLI interface and argument parsing
//!
//! This module handles command-line parsing and logging setup for the
//! `rcomplete` binary.

pub mod app;

// Re-export main types
pub use app::*;
