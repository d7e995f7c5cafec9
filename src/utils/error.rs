use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Catalogue returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Nothing found: {what}")]
    NotFound { what: String },

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Background task failed: {message}")]
    TaskFailed { message: String },
}

pub type Result<T> = std::result::Result<T, CatalogueError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Output,
    Configuration,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogueError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogueError::NetworkFailure(_) => ErrorCategory::Network,
            CatalogueError::HttpStatus { .. } => ErrorCategory::Upstream,
            CatalogueError::Decode(_) | CatalogueError::NotFound { .. } => ErrorCategory::Data,
            CatalogueError::CsvError(_) | CatalogueError::IoError(_) => ErrorCategory::Output,
            CatalogueError::TaskFailed { .. } => ErrorCategory::Runtime,
            CatalogueError::ConfigValidationError { .. }
            | CatalogueError::InvalidConfigValueError { .. }
            | CatalogueError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogueError::NotFound { .. } => ErrorSeverity::Low,
            // 服務暫時不可用，稍後重試可能成功
            CatalogueError::NetworkFailure(_) => ErrorSeverity::Medium,
            CatalogueError::HttpStatus { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            CatalogueError::HttpStatus { .. } | CatalogueError::Decode(_) => ErrorSeverity::High,
            CatalogueError::CsvError(_)
            | CatalogueError::IoError(_)
            | CatalogueError::TaskFailed { .. } => ErrorSeverity::Critical,
            CatalogueError::ConfigValidationError { .. }
            | CatalogueError::InvalidConfigValueError { .. }
            | CatalogueError::MissingConfigError { .. } => ErrorSeverity::High,
        }
    }

    /// Transport or status failures talking to the catalogue service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Network | ErrorCategory::Upstream
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogueError::NetworkFailure(e) if e.is_timeout() => {
                "The catalogue service did not answer in time".to_string()
            }
            CatalogueError::NetworkFailure(_) => {
                "Could not reach the catalogue service".to_string()
            }
            CatalogueError::HttpStatus { status, .. } => {
                format!("The catalogue service answered with status {}", status)
            }
            CatalogueError::Decode(_) => {
                "The catalogue service sent data this client does not understand".to_string()
            }
            CatalogueError::NotFound { what } => format!("No {} found", what),
            CatalogueError::CsvError(_) | CatalogueError::IoError(_) => {
                "Could not write the output".to_string()
            }
            CatalogueError::TaskFailed { .. } => {
                "An internal task stopped unexpectedly".to_string()
            }
            CatalogueError::ConfigValidationError { field, .. }
            | CatalogueError::InvalidConfigValueError { field, .. }
            | CatalogueError::MissingConfigError { field } => {
                format!("Configuration problem with '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the catalogue API is running and that --base-url points to it"
                    .to_string()
            }
            ErrorCategory::Upstream => {
                "Check the catalogue service logs; the request reached it but failed".to_string()
            }
            ErrorCategory::Data => match self {
                CatalogueError::NotFound { .. } => {
                    "Try another genre, id or search term".to_string()
                }
                _ => "Make sure --base-url points to a /api/v1/titles/ endpoint".to_string(),
            },
            ErrorCategory::Output => "Check that stdout is writable".to_string(),
            ErrorCategory::Configuration => {
                "Fix the configuration file or command line flag and retry".to_string()
            }
            ErrorCategory::Runtime => "Run again with --verbose and report the log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_severity_depends_on_status_class() {
        let server_side = CatalogueError::HttpStatus {
            status: 503,
            url: "http://localhost/".to_string(),
        };
        let client_side = CatalogueError::HttpStatus {
            status: 404,
            url: "http://localhost/".to_string(),
        };

        assert_eq!(server_side.severity(), ErrorSeverity::Medium);
        assert_eq!(client_side.severity(), ErrorSeverity::High);
        assert!(server_side.is_upstream());
    }

    #[test]
    fn test_config_errors_are_not_upstream() {
        let err = CatalogueError::MissingConfigError {
            field: "api.base_url".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(!err.is_upstream());
        assert!(err.user_friendly_message().contains("api.base_url"));
    }

    #[test]
    fn test_not_found_is_low_severity() {
        let err = CatalogueError::NotFound {
            what: "best movie".to_string(),
        };

        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "No best movie found");
    }
}
