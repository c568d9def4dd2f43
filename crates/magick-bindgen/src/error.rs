//! Error types for the generator

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations
pub type Result<T, E = BindgenError> = std::result::Result<T, E>;

/// Errors raised while loading configuration or generating bindings
#[derive(Debug, Error)]
pub enum BindgenError {
    /// Failed to read or write a file
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration
    #[error("Failed to parse bindgen config: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but is inconsistent
    #[error("Invalid bindgen config: {0}")]
    InvalidConfig(String),

    /// A declaration file failed to parse or validate
    #[error("{file}:{line}:{column}: {message}")]
    Declaration {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },
}

impl BindgenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BindgenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach a file location to a syn error using its span start.
    pub fn declaration(file: impl Into<String>, error: syn::Error) -> Self {
        let start = error.span().start();
        BindgenError::Declaration {
            file: file.into(),
            line: start.line,
            // proc-macro2 columns are zero based
            column: start.column + 1,
            message: error.to_string(),
        }
    }
}
