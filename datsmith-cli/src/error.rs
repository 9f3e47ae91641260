use thiserror::Error;

use datsmith_dat::DatError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog write failure
    #[error("DAT error: {0}")]
    Dat(#[from] DatError),

    /// An input catalog could not be read
    #[error("{path}: {source}")]
    Load {
        path: String,
        #[source]
        source: DatError,
    },

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Config(String),

    /// Arguments that parse but cannot be used together
    #[error("Usage error: {0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
