use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to start agent program '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Agent task aborted: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Process,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LaunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LaunchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LaunchError::SpawnError { .. } | LaunchError::IoError(_) => ErrorCategory::Process,
            LaunchError::JoinError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LaunchError::SpawnError { .. } => ErrorSeverity::Medium,
            LaunchError::InvalidConfigValueError { .. } | LaunchError::IoError(_) => {
                ErrorSeverity::High
            }
            LaunchError::JoinError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LaunchError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid {}: '{}' ({})", field, value, reason),
            LaunchError::SpawnError { program, .. } => {
                format!("Could not start the agent program '{}'", program)
            }
            LaunchError::IoError(e) => format!("IO failure while running the team: {}", e),
            LaunchError::JoinError(_) => "An agent task was lost before it finished".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LaunchError::InvalidConfigValueError { field, .. } => {
                format!("Check the {} argument and try again", field)
            }
            LaunchError::SpawnError { program, .. } => {
                format!("Make sure '{}' is installed and on PATH", program)
            }
            LaunchError::IoError(_) => "Check filesystem permissions and try again".to_string(),
            LaunchError::JoinError(_) => {
                "Re-run the launcher; if it keeps happening, file a bug".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
