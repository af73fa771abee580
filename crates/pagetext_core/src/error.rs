use thiserror::Error;

use crate::format::FormatError;

/// A site override record could not be turned into a usable template.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config must be a JSON array of override records")]
    NotAList,
    #[error("override record {index} is malformed: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("override record {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("override record {index} has invalid `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: String,
        reason: String,
    },
    #[error("override record {index} has a bad format string in `{field}`: {source}")]
    Format {
        index: usize,
        field: String,
        #[source]
        source: FormatError,
    },
}
