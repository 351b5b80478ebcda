//! Command definition document types
//!
//! This module defines the data structures that represent a command
//! definition file, the declarative description of a CLI.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A command definition; the document root is one too
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommandDef {
    /// Command name (defaults to the map key, or the file stem for the root)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Short description
    #[serde(default, alias = "about", skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Whether this command is hidden from completion
    #[serde(default)]
    pub hidden: bool,

    /// Options accepted by the command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDef>,

    /// Subcommands, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub commands: IndexMap<String, CommandDef>,

    /// Load this command's body from another file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
}

/// An option (flag) definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OptionDef {
    /// Spellings, e.g. `[-v, --verbose]` or just `--verbose`
    #[serde(default, deserialize_with = "deserialize_flags")]
    pub flags: Vec<String>,

    /// Usage description for help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Allowed values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,

    /// Whether the option consumes an argument (defaults to having choices)
    #[serde(
        rename = "takes-value",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub takes_value: Option<bool>,

    /// Hidden option
    #[serde(default)]
    pub hidden: bool,
}

impl OptionDef {
    /// Effective value arity
    pub fn takes_value(&self) -> bool {
        self.takes_value.unwrap_or(!self.choices.is_empty())
    }
}

/// Custom deserializer for flags that handles both a single value and an array
fn deserialize_flags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        // Single flag
        Value::String(s) => Ok(vec![s]),
        // Array of flags
        Value::Sequence(seq) => {
            let mut flags = Vec::new();
            for item in seq {
                let flag = String::deserialize(item).map_err(D::Error::custom)?;
                flags.push(flag);
            }
            Ok(flags)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("flags must be a string or array")),
    }
}
