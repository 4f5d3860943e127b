//! Error types for Modelbox

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelboxError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid model name: {0}")]
    InvalidName(String),

    #[error("Duplicate key '{key}' at line {line}")]
    DuplicateKey { key: String, line: usize },

    #[error("Duplicate model name: '{0}' is defined more than once across the loaded config files")]
    DuplicateModelName(String),

    #[error("Invalid container definition: {0}")]
    InvalidReference(String),

    #[error("Invalid image file: {0} (image file names must end in .sif)")]
    InvalidImageSuffix(String),

    #[error("'{0}' is not a valid operation. Did you add a subcommand and forget to update format_command?")]
    CommandFormat(String),

    #[error("No model named '{name}' was found in a config file. Model must be one of: {known:?}")]
    UnknownModel { name: String, known: Vec<String> },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelboxError>;
