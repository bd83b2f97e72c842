use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Session expired or missing")]
    Unauthorized,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Prediction failed: {message}")]
    PredictionError { message: String },

    #[error("Could not resolve a city for {lat}, {lon}")]
    LocationNotFound { lat: f64, lon: f64 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Authentication,
    Configuration,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::HttpError(_) | AppError::ApiError { .. } => ErrorCategory::Network,
            AppError::Unauthorized | AppError::NotAuthenticated => ErrorCategory::Authentication,
            AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            AppError::IoError(_) => ErrorCategory::Storage,
            AppError::SerializationError(_)
            | AppError::PredictionError { .. }
            | AppError::LocationNotFound { .. }
            | AppError::ValidationError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::LocationNotFound { .. } => ErrorSeverity::Low,
            AppError::HttpError(_) | AppError::ApiError { .. } => ErrorSeverity::Medium,
            AppError::Unauthorized
            | AppError::NotAuthenticated
            | AppError::PredictionError { .. }
            | AppError::SerializationError(_)
            | AppError::ValidationError { .. } => ErrorSeverity::High,
            AppError::IoError(_)
            | AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    /// One-line message shown to the user in place of a toast.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::HttpError(e) if e.is_timeout() => {
                "The backend took too long to respond.".to_string()
            }
            AppError::HttpError(_) => {
                "Could not reach the backend. Check your connection.".to_string()
            }
            AppError::ApiError { message, .. } => message.clone(),
            AppError::Unauthorized => "Session expired. Please login again.".to_string(),
            AppError::NotAuthenticated => "Please login to use your wardrobe.".to_string(),
            AppError::PredictionError { message } => message.clone(),
            AppError::LocationNotFound { .. } => {
                "Could not detect city name. Please enter manually.".to_string()
            }
            AppError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Retry in a moment; the backend may be waking up.",
            ErrorCategory::Authentication => "Run `outfit-weather login` and try again.",
            ErrorCategory::Configuration => "Check the config file and command-line flags.",
            ErrorCategory::Storage => "Check that the storage directory is writable.",
            ErrorCategory::Data => "Check the input values and try again.",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_session_message() {
        let err = AppError::Unauthorized;
        assert_eq!(err.category(), ErrorCategory::Authentication);
        assert_eq!(err.user_friendly_message(), "Session expired. Please login again.");
    }

    #[test]
    fn test_api_error_surfaces_backend_detail() {
        let err = AppError::ApiError {
            status: 400,
            message: "Email already registered".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Email already registered");
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = AppError::MissingConfigError {
            field: "api.base_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
