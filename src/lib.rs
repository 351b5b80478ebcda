//! rcomplete - static shell completion scripts for command-line programs
//!
//! rcomplete reads the command structure of a CLI, either a `clap::Command`
//! or a YAML command definition, and renders a completion script for bash,
//! zsh, fish or PowerShell from it.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod getters;
pub mod render;
pub mod tree;

// Re-export commonly used types
pub use error::{CompleteError, Result};
pub use getters::{build_tree, extract, CommandSource};
pub use render::{Completer, Shell};
pub use tree::{CommandNode, OptionSpec};

/// Current version of rcomplete
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
