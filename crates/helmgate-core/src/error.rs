use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Identifier errors
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Identifier set is empty")]
    EmptyIdentifierSet,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
