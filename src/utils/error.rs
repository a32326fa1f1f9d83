use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Entity not found: {id}")]
    NotFound { id: String },

    #[error("Invalid entity identifier '{value}': {reason}")]
    InvalidEntityId { value: String, reason: String },

    #[error("Backend request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("Token signing failed: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("Backend returned {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Backend,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PageError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PageError::NotFound { .. } | PageError::InvalidEntityId { .. } => {
                ErrorCategory::Request
            }
            PageError::ApiError(_) | PageError::BackendError { .. } => ErrorCategory::Backend,
            PageError::ConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. }
            | PageError::CredentialError { .. }
            | PageError::TokenError(_) => ErrorCategory::Configuration,
            PageError::IoError(_) | PageError::RenderError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Backend => ErrorSeverity::Medium,
            ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PageError::NotFound { .. } => "Check the entity identifier in the URL",
            PageError::InvalidEntityId { .. } => {
                "Entity identifiers must be non-empty and must not contain '/'"
            }
            PageError::ApiError(_) | PageError::BackendError { .. } => {
                "Check network connectivity and the backend project settings"
            }
            PageError::CredentialError { .. } | PageError::TokenError(_) => {
                "Point --credentials (or GOOGLE_APPLICATION_CREDENTIALS) at a valid service-account key"
            }
            PageError::ConfigError { .. }
            | PageError::InvalidConfigValueError { .. }
            | PageError::MissingConfigError { .. } => {
                "Review the configuration file and command-line flags"
            }
            PageError::IoError(_) => "Check file paths and permissions",
            PageError::RenderError { .. } => {
                "This is likely a bug; re-run with --verbose and report the log"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PageError::NotFound { id } => format!("No entity with id '{}'", id),
            PageError::InvalidEntityId { value, .. } => {
                format!("'{}' is not a valid entity identifier", value)
            }
            PageError::ApiError(_) | PageError::BackendError { .. } => {
                "The data backend could not be reached".to_string()
            }
            PageError::CredentialError { message } => {
                format!("Backend credentials could not be loaded: {}", message)
            }
            PageError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            PageError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
