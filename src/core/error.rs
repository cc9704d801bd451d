use thiserror::Error;

/// Caller-input errors, raised before the document index is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid value {value:?} for filter `{field}`")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Unsupported sort key: {0}")]
    InvalidSortKey(String),

    #[error("Missing required input: {0}")]
    MissingRequiredInput(&'static str),

    #[error("Unknown interaction type: {0}")]
    InvalidInteractionType(String),
}
