//! Definition validation
//!
//! This module provides validation logic for command definition documents.

use crate::config::types::{CommandDef, OptionDef};
use crate::error::{DefinitionError, DefinitionResult};
use std::collections::HashSet;

/// Validate a complete definition, recursing into subcommands
pub fn validate_definition(def: &CommandDef) -> DefinitionResult<()> {
    let name = def.name.clone().unwrap_or_default();
    // an unnamed root takes the file name or the executable name later
    if !name.is_empty() {
        validate_command_name(&name)?;
    }
    validate_command(&name, def)
}

/// Validate a single command and its children
pub fn validate_command(path: &str, command: &CommandDef) -> DefinitionResult<()> {
    let mut seen = HashSet::new();

    for option in &command.options {
        validate_option(path, option)?;

        for flag in &option.flags {
            if !seen.insert(flag.as_str()) {
                return Err(DefinitionError::DuplicateFlag {
                    command: path.to_string(),
                    flag: flag.clone(),
                });
            }
        }
    }

    let mut siblings = HashSet::new();
    for (key, child) in &command.commands {
        validate_command_name(key)?;
        let name = child.name.as_deref().unwrap_or(key);
        validate_command_name(name)?;
        if !siblings.insert(name) {
            return Err(DefinitionError::DuplicateCommand {
                command: path.to_string(),
                name: name.to_string(),
            });
        }

        let child_path = if path.is_empty() {
            name.to_string()
        } else {
            format!("{} {}", path, name)
        };
        validate_command(&child_path, child)?;
    }

    Ok(())
}

fn validate_option(path: &str, option: &OptionDef) -> DefinitionResult<()> {
    if option.flags.is_empty() {
        return Err(DefinitionError::EmptyFlags(path.to_string()));
    }

    for flag in &option.flags {
        validate_flag(path, flag)?;
    }

    if !option.choices.is_empty() && option.takes_value == Some(false) {
        return Err(DefinitionError::ChoicesWithoutValue {
            command: path.to_string(),
            flag: option.flags[0].clone(),
        });
    }

    Ok(())
}

/// A flag is one or two dashes followed by a name without whitespace
fn validate_flag(path: &str, flag: &str) -> DefinitionResult<()> {
    let body = flag.trim_start_matches('-');
    let dashes = flag.len() - body.len();

    if !(1..=2).contains(&dashes) || body.is_empty() || body.chars().any(char::is_whitespace) {
        return Err(DefinitionError::InvalidFlag {
            command: path.to_string(),
            flag: flag.to_string(),
        });
    }

    Ok(())
}

/// Characters bash splits words on (`COMP_WORDBREAKS`) besides whitespace
const WORD_BREAKS: &[char] = &['"', '\'', '@', '>', '<', '=', ';', '|', '&', '(', ':'];

/// A command name must survive as a single shell word
pub fn validate_command_name(name: &str) -> DefinitionResult<()> {
    if name.is_empty()
        || name.starts_with('-')
        || name.chars().any(|c| c.is_whitespace() || WORD_BREAKS.contains(&c))
    {
        return Err(DefinitionError::Invalid(format!(
            "Invalid command name: '{}'. Command names must be non-empty, \
             not start with '-' and contain no whitespace or any of \"'@><=;|&(:",
            name
        )));
    }
    Ok(())
}
