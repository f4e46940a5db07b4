//! Error types for MS-DRG grouping

use thiserror::Error;

/// Result type alias for msdrg operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the msdrg library
///
/// Only reference-data loading can fail; grouping an encounter always
/// produces a result (ungroupable encounters get the `"999"` sentinel).
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing reference file: {0}")]
    MissingReferenceFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a missing-reference-file error
    pub fn missing_reference_file<S: Into<String>>(msg: S) -> Self {
        Error::MissingReferenceFile(msg.into())
    }
}
