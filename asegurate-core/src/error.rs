use thiserror::Error;

use crate::navigator::Page;

/// Errors produced by the advisor core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Missing credential: {0} is not set or empty")]
    MissingCredential(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("No user profile stored for this session")]
    MissingProfile,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Action '{action}' is not available on page '{page}'")]
    InvalidTransition { page: Page, action: String },

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl AdvisorError {
    /// The underlying message, without the variant prefix, for embedding in user-facing text.
    pub fn detail(&self) -> String {
        match self {
            AdvisorError::Generation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
