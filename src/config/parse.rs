//! Definition file parsing and specifier resolution

use crate::config::schema::validate_definition;
use crate::config::types::CommandDef;
use crate::error::{CompleteError, DefinitionError, ResolutionError, ResolutionResult};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A parsed `FILE[:KEY.PATH]` specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    /// Definition document
    pub path: PathBuf,
    /// Dot-separated key path inside the document
    pub attribute: Option<String>,
}

/// Split a specifier into file and key path.
///
/// Only the text after the last `:` counts as a key path, and only when it
/// holds no path separator, so Windows drive letters survive.
pub fn parse_specifier(spec: &str) -> ResolutionResult<Specifier> {
    let (file, attribute) = match spec.rsplit_once(':') {
        Some((file, attr)) if !attr.contains(['/', '\\']) => (file, Some(attr)),
        _ => (spec, None),
    };

    if file.is_empty() {
        return Err(ResolutionError::InvalidSpecifier(spec.to_string()));
    }
    if let Some(attr) = attribute {
        if attr.split('.').any(str::is_empty) {
            return Err(ResolutionError::InvalidSpecifier(spec.to_string()));
        }
    }

    Ok(Specifier {
        path: PathBuf::from(file),
        attribute: attribute.map(str::to_string),
    })
}

/// Parse a definition from a string
pub fn parse_definition(yaml: &str, definition_path: Option<&Path>) -> Result<CommandDef, CompleteError> {
    let value: Value = serde_yaml::from_str(yaml)?;
    definition_from_value(value, definition_path)
}

/// Parse a definition file from a path
pub fn parse_definition_file(path: &Path) -> Result<CommandDef, CompleteError> {
    let contents = read_definition(path)?;
    parse_definition(&contents, Some(path))
}

/// Resolve a specifier to a validated, fully included definition
pub fn load_cli(spec: &str) -> Result<CommandDef, CompleteError> {
    let specifier = parse_specifier(spec)?;
    debug!(path = %specifier.path.display(), attribute = ?specifier.attribute, "resolving CLI definition");

    let contents = read_definition(&specifier.path)?;
    let document: Value = serde_yaml::from_str(&contents)?;

    let selected = match &specifier.attribute {
        Some(attribute) => select_attribute(document, attribute, &specifier.path)?,
        None => document,
    };

    let mut def = definition_from_value(selected, Some(&specifier.path))?;
    if def.name.is_none() {
        def.name = specifier
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }

    validate_definition(&def)?;
    Ok(def)
}

fn read_definition(path: &Path) -> ResolutionResult<String> {
    fs::read_to_string(path).map_err(|e| ResolutionError::NotFound {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Walk a dotted key path through nested mappings
fn select_attribute(document: Value, attribute: &str, path: &Path) -> ResolutionResult<Value> {
    let not_found = || ResolutionError::AttributeNotFound {
        attribute: attribute.to_string(),
        path: path.to_path_buf(),
    };

    let mut current = document;
    for key in attribute.split('.') {
        current = match current {
            Value::Mapping(mut map) => map.remove(key).ok_or_else(not_found)?,
            _ => return Err(not_found()),
        };
    }

    match current {
        Value::Mapping(_) => Ok(current),
        _ => Err(not_found()),
    }
}

fn definition_from_value(value: Value, definition_path: Option<&Path>) -> Result<CommandDef, CompleteError> {
    // An empty document is an empty CLI
    let mut def = match value {
        Value::Null => CommandDef::default(),
        other => CommandDef::deserialize(other)?,
    };

    match definition_path {
        Some(base_path) => {
            let mut stack = vec![include_key(base_path)];
            process_includes(&mut def, base_path, &mut stack)?;
        }
        None => reject_includes(&def)?,
    }

    Ok(def)
}

/// Includes are relative to a file, so a document without one cannot have any
fn reject_includes(def: &CommandDef) -> Result<(), CompleteError> {
    for command in def.commands.values() {
        if let Some(include_path) = &command.include {
            return Err(DefinitionError::IncludeFile {
                path: PathBuf::from(include_path),
                error: "includes need the path of the including definition file".to_string(),
            }
            .into());
        }
        reject_includes(command)?;
    }
    Ok(())
}

/// Replace `include:` commands with the content of the referenced files
fn process_includes(
    def: &mut CommandDef,
    definition_path: &Path,
    stack: &mut Vec<PathBuf>,
) -> Result<(), CompleteError> {
    let base_dir = definition_path.parent().unwrap_or_else(|| Path::new("."));

    for (name, command) in def.commands.iter_mut() {
        match command.include.take() {
            Some(include_path) => {
                let full_include_path = base_dir.join(&include_path);
                let key = include_key(&full_include_path);

                if stack.contains(&key) {
                    let mut chain: Vec<String> =
                        stack.iter().map(|p| p.display().to_string()).collect();
                    chain.push(key.display().to_string());
                    return Err(DefinitionError::CircularInclude(chain.join(" -> ")).into());
                }

                debug!(command = %name, path = %full_include_path.display(), "including command definition");
                let mut included = load_included_command(&full_include_path)?;
                included.hidden |= command.hidden;

                stack.push(key);
                process_includes(&mut included, &full_include_path, stack)?;
                stack.pop();

                *command = included;
            }
            None => process_includes(command, definition_path, stack)?,
        }
    }

    Ok(())
}

/// Load a command from an included file
fn load_included_command(path: &Path) -> Result<CommandDef, CompleteError> {
    let contents = fs::read_to_string(path).map_err(|e| DefinitionError::IncludeFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let command: CommandDef = serde_yaml::from_str(&contents).map_err(|e| {
        DefinitionError::IncludeFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        }
    })?;

    Ok(command)
}

fn include_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
