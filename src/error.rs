//! Error types for rcomplete

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rcomplete operations
pub type Result<T> = std::result::Result<T, CompleteError>;

/// Main error type for rcomplete
#[derive(Error, Debug)]
pub enum CompleteError {
    /// The object handed to the extractor matches no registered getter
    #[error(
        "CLI object type {0} is not supported yet. \
         It must be one of (`clap::Command`, `rcomplete::config::CommandDef`)"
    )]
    UnsupportedType(String),

    /// The requested shell is not one we can render
    #[error("[shell] argument must be one of bash, zsh, fish, powershell (got '{0}')")]
    UnsupportedShell(String),

    /// No shell given and none could be guessed
    #[error(
        "Could not read SHELL environment variable. \
         Please specify your shell type by passing it as an argument"
    )]
    ShellNotDetected,

    /// Specifier resolution errors
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Definition document errors
    #[error("Definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors turning a `FILE[:KEY.PATH]` specifier into a command definition
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error(
        "The CLI specifier '{0}' is invalid, a file and an optional key path must be supplied. \
         Examples:\n\tcli.yml\n\ttools.yml:apps.server"
    )]
    InvalidSpecifier(String),

    #[error("Failed to read definition file '{path}': {error}")]
    NotFound { path: PathBuf, error: String },

    #[error("Failed to find attribute '{attribute}' in '{path}'")]
    AttributeNotFound { attribute: String, path: PathBuf },
}

/// Definition document validation and loading errors
#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Invalid definition: {0}")]
    Invalid(String),

    #[error("An option of command '{0}' declares no flags")]
    EmptyFlags(String),

    #[error("Flag '{flag}' of command '{command}' must start with '-' and contain no whitespace")]
    InvalidFlag { command: String, flag: String },

    #[error("Flag '{flag}' is declared more than once in command '{command}'")]
    DuplicateFlag { command: String, flag: String },

    #[error("Command '{name}' is declared more than once in command '{command}'")]
    DuplicateCommand { command: String, name: String },

    #[error("Option '{flag}' of command '{command}' has choices but takes no value")]
    ChoicesWithoutValue { command: String, flag: String },

    #[error("Failed to include file '{path}': {error}")]
    IncludeFile { path: PathBuf, error: String },

    #[error("Circular include detected: {0}")]
    CircularInclude(String),
}

/// Specialized result type for specifier resolution
pub type ResolutionResult<T> = std::result::Result<T, ResolutionError>;

/// Specialized result type for definition validation
pub type DefinitionResult<T> = std::result::Result<T, DefinitionError>;

/// Whether the error comes from the user's input rather than the environment
pub fn is_input_error(err: &CompleteError) -> bool {
    matches!(
        err,
        CompleteError::UnsupportedShell(_)
            | CompleteError::Resolution(_)
            | CompleteError::Definition(_)
            | CompleteError::Yaml(_)
    )
}
