//! Error types for adapter registration and resolution

use crate::api::openai::Role;
use thiserror::Error;

/// Errors raised by the prompt adapter core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// No registered adapter matched the model. Only possible when the
    /// registry has no catch-all adapter, so this is a configuration defect.
    #[error("no valid prompt adapter for model `{model}`")]
    NoAdapterFound { model: String },

    #[error("model name must not be empty")]
    EmptyModelName,

    /// A template did not contain exactly one `{content}` placeholder
    #[error("adapter `{adapter}`: {role} template must contain exactly one `{{content}}` placeholder, found {found}")]
    InvalidTemplate {
        adapter: String,
        role: Role,
        found: usize,
    },

    #[error("adapter `{name}` is already registered")]
    DuplicateAdapter { name: String },
}

impl AdapterError {
    /// HTTP status the API layer should surface for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AdapterError::EmptyModelName => 400,
            _ => 500,
        }
    }
}
