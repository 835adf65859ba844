use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] fxpad_core::ValidationError),

    #[error(transparent)]
    Core(#[from] fxpad_core::CoreError),

    #[error("rates unavailable: {0}")]
    Fetch(#[from] fxpad_core::FetchFailure),

    #[error("{what} not found: '{value}'")]
    NotFound { what: &'static str, value: String },

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Logging(#[from] crate::logging::LoggingError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Core(_) => 2,
            Self::Command(_) => 2,
            Self::NotFound { .. } => 3,
            Self::Fetch(_) => 4,
            Self::Serialization(_) => 5,
            Self::Logging(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
