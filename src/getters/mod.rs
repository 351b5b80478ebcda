//! Command-tree extraction
//!
//! A getter adapts one CLI object model to [`CommandSource`]. [`extract`]
//! picks the getter for a value through an explicit registry of type checks
//! and builds the normalized [`CommandNode`] tree from it.

pub mod clap;
pub mod definition;

use crate::error::{CompleteError, Result};
use crate::tree::{CommandNode, OptionSpec};
use indexmap::IndexMap;
use std::any::{type_name, Any};
use tracing::{debug, trace};

pub use self::clap::ClapGetter;
pub use self::definition::DefinitionGetter;

/// Read access to the commands of a CLI object model
pub trait CommandSource {
    /// Name of the command
    fn name(&self) -> String;

    /// Short description, if the model has one
    fn help(&self) -> Option<String>;

    /// Declared options, in declaration order
    fn options(&self) -> Vec<OptionSpec>;

    /// Child commands keyed by name; empty for leaf commands
    fn subcommands(&self) -> IndexMap<String, Box<dyn CommandSource + '_>>;
}

/// A registry entry: returns a getter when the value is of its type
pub type Getter = for<'a> fn(&'a dyn Any) -> Option<Box<dyn CommandSource + 'a>>;

/// Registered getters, tried in order
pub const GETTERS: &[Getter] = &[clap::getter, definition::getter];

/// Find the getter for a CLI object
pub fn getter_for<'a>(
    cli: &'a dyn Any,
    type_label: &str,
) -> Result<Box<dyn CommandSource + 'a>> {
    GETTERS
        .iter()
        .find_map(|getter| getter(cli))
        .ok_or_else(|| CompleteError::UnsupportedType(type_label.to_string()))
}

/// Build the command tree for any supported CLI object
pub fn extract<T: Any>(cli: &T) -> Result<CommandNode> {
    let source = getter_for(cli, type_name::<T>())?;
    Ok(build_tree(source.as_ref()))
}

/// Recursively convert a command source into a tree
pub fn build_tree(source: &dyn CommandSource) -> CommandNode {
    let mut node = CommandNode::new(source.name());
    node.help = source.help();
    node.options = source.options();

    trace!(
        command = %node.name,
        options = node.options.len(),
        "extracted command"
    );

    for (name, child) in source.subcommands() {
        let child_node = build_tree(child.as_ref());
        node.subcommands.insert(name, child_node);
    }

    if !node.subcommands.is_empty() {
        debug!(
            command = %node.name,
            subcommands = node.subcommands.len(),
            "extracted subcommands"
        );
    }

    node
}
