use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for hostmon
#[derive(Error, Debug)]
pub enum HostmonError {
    #[error("Source unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for hostmon
pub type Result<T> = std::result::Result<T, HostmonError>;

impl HostmonError {
    /// Create a source unavailable error for the given path
    pub fn source_unavailable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        HostmonError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        HostmonError::Parse(msg.into())
    }
}
