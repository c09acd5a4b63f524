use thiserror::Error;

use crate::datatype::DeclaredType;

#[derive(Error, Debug)]
pub enum ProjfieldsError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("No presentation rule for {0} values")]
    UnsupportedPresentationType(DeclaredType),
    #[error("Type mismatch for {field}: expected {expected}, found {found}")]
    TypeMismatch { field: String, expected: DeclaredType, found: DeclaredType },
    #[error("Unreadable format: {message}")]
    UnreadableFormat { message: String },
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),
    #[error("Write failure: {0}")]
    WriteFailure(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ProjfieldsError>;

// Helper conversions
impl From<config::ConfigError> for ProjfieldsError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for ProjfieldsError {
    fn from(e: serde_json::Error) -> Self { Self::UnreadableFormat { message: e.to_string() } }
}
