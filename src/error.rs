use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

use crate::types::{DocumentKey, KeyList, StatementKey};

/// Violations of the first level of the document and of the `PolicyName` field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PolicyNameError {
    #[error("Unexpected key(s) on first level: {0}")]
    UnexpectedKeys(KeyList),

    #[error("Expected a JSON object on first level!")]
    NotAnObject,

    #[error("Missing required key 'PolicyName'!")]
    Missing,

    #[error("Value for required key 'PolicyName' has to be a string!")]
    NotAString,

    #[error("Length of value for required key 'PolicyName' has to be between 1 and 128!")]
    Length { length: usize },

    #[error("Value for required key 'PolicyName' does not match the {pattern} pattern!")]
    Pattern { pattern: String },
}

/// Violations of the `PolicyDocument` field and of the second level of the document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PolicyDocumentError {
    #[error("Unexpected key(s) on second level: {0}")]
    UnexpectedKeys(KeyList),

    #[error("Missing required key 'PolicyDocument'!")]
    Missing,

    #[error("Value for required key 'PolicyDocument' has to be an object!")]
    NotAnObject,

    #[error("Missing key '{0}' in PolicyDocument!")]
    MissingKey(DocumentKey),

    #[error("Value for key 'Statement' in PolicyDocument has to be a list!")]
    StatementNotAList,
}

/// Violations inside a single statement. Every variant carries the zero-based
/// position of the statement in the `Statement` list.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StatementError {
    #[error("Unexpected key(s) {keys} in statement with index {index}!")]
    UnexpectedKeys { keys: KeyList, index: usize },

    #[error("Statement with index {index} has to be an object!")]
    NotAnObject { index: usize },

    #[error("Missing key '{key}' in statement with index {index}!")]
    MissingKey { key: StatementKey, index: usize },

    #[error(
        "Invalid value '{value}' for key 'Effect' in statement with index {index}! Value for 'Effect' has to be 'Allow' or 'Deny'."
    )]
    InvalidEffect { value: String, index: usize },
}

impl StatementError {
    /// Position of the offending statement.
    pub fn index(&self) -> usize {
        match self {
            StatementError::UnexpectedKeys { index, .. }
            | StatementError::NotAnObject { index }
            | StatementError::MissingKey { index, .. }
            | StatementError::InvalidEffect { index, .. } => *index,
        }
    }
}

/// Coarse classification of a [`PolicyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize)]
pub enum ErrorKind {
    PolicyNameError,
    PolicyDocumentError,
    StatementError,
    LoadError,
    ConfigError,
}

#[derive(Debug, Error, Serialize, Deserialize)]
pub enum PolicyError {
    #[error(transparent)]
    PolicyName(#[from] PolicyNameError),

    #[error(transparent)]
    PolicyDocument(#[from] PolicyDocumentError),

    #[error(transparent)]
    Statement(#[from] StatementError),

    /// The document could not be opened or decoded. Holds the cause's message as-is.
    #[error("{0}")]
    Load(String),

    #[error("invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid validator configuration: {0}")]
    InvalidConfig(String),
}

impl PolicyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PolicyError::PolicyName(_) => ErrorKind::PolicyNameError,
            PolicyError::PolicyDocument(_) => ErrorKind::PolicyDocumentError,
            PolicyError::Statement(_) => ErrorKind::StatementError,
            PolicyError::Load(_) => ErrorKind::LoadError,
            PolicyError::InvalidPattern { .. } | PolicyError::InvalidConfig(_) => {
                ErrorKind::ConfigError
            }
        }
    }
}

impl From<std::io::Error> for PolicyError {
    fn from(err: std::io::Error) -> Self {
        PolicyError::Load(err.to_string())
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::Load(err.to_string())
    }
}
