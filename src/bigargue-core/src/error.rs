//! Error types for the argument system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArgueError {
    #[error("Please provide a topic to argue about.")]
    MissingTopic,

    #[error("Please select at least one tone.")]
    MissingTone,

    #[error("Please select at least one discipline.")]
    MissingDiscipline,

    #[error("A debate request is already in flight")]
    RequestInFlight,

    #[error("OpenAI API error: {0}")]
    OpenAIError(#[from] async_openai::error::OpenAIError),

    #[error("Generation service error: {0}")]
    GenerationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown tone: {0}")]
    UnknownTone(String),

    #[error("Unknown discipline: {0}")]
    UnknownDiscipline(String),
}

impl ArgueError {
    /// Whether this error came from the validation gate rather than the
    /// generation service. Validation errors carry their own user-facing
    /// message; service errors are summarized generically for the user.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ArgueError::MissingTopic | ArgueError::MissingTone | ArgueError::MissingDiscipline
        )
    }
}
