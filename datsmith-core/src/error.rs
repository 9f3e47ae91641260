use thiserror::Error;

/// Errors raised while turning catalog text into digest values.
///
/// The reconciliation engine itself never fails; these only surface from
/// the adapter-facing parsing helpers.
#[derive(Debug, Error)]
pub enum DigestError {
    /// Text contained non-hex characters
    #[error("Invalid {kind} digest: '{text}'")]
    InvalidHex { kind: &'static str, text: String },

    /// Text is longer than the algorithm's digest width
    #[error("{kind} digest too long: expected at most {expected} hex digits, got {actual}")]
    TooLong {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Unrecognized algorithm name
    #[error("Unknown digest algorithm: {0}")]
    UnknownKind(String),

    /// Unrecognized dump status or item kind keyword
    #[error("Unknown keyword: {0}")]
    UnknownKeyword(String),
}

impl DigestError {
    pub fn unknown_keyword(msg: impl Into<String>) -> Self {
        Self::UnknownKeyword(msg.into())
    }
}
