use thiserror::Error;

/// Core error type for dashboard data access.
#[derive(Error, Debug)]
pub enum FlowdashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("n8n API error: {status} {status_text}")]
    Remote { status: u16, status_text: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FlowdashError {
    /// Whether the error came from talking to the remote n8n instance.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            FlowdashError::Transport(_)
                | FlowdashError::Remote { .. }
                | FlowdashError::Deserialization(_)
        )
    }
}

impl From<serde_json::Error> for FlowdashError {
    fn from(e: serde_json::Error) -> Self {
        FlowdashError::Serialization(e.to_string())
    }
}

/// Result type alias using FlowdashError.
pub type Result<T> = std::result::Result<T, FlowdashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = FlowdashError::Remote {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "n8n API error: 500 Internal Server Error");
        assert!(err.is_remote_failure());
    }

    #[test]
    fn test_config_error_is_not_remote() {
        assert!(!FlowdashError::Config("missing api key".into()).is_remote_failure());
    }
}
