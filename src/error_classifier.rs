use crate::api::error::ApiError;
use crate::logging::LogLevel;

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_api_error(&self, error: &ApiError) -> LogLevel {
        match error {
            // Critical: the credential is no longer accepted
            ApiError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ApiError::Http { status, .. } if *status == 403 => LogLevel::Error,

            // Nothing stored yet for this user
            ApiError::Http { status, .. } if *status == 404 => LogLevel::Info,

            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Rejected input, malformed responses
            ApiError::Http { .. } => LogLevel::Warn,
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues, and the free-tier backend waking up
            ApiError::Reqwest(_) => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn auth_failures_are_errors() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_api_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_api_error(&http(403)), LogLevel::Error);
    }

    #[test]
    fn server_and_missing_resources_are_not_errors() {
        let classifier = ErrorClassifier::default();
        assert_eq!(classifier.classify_api_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_api_error(&http(404)), LogLevel::Info);
    }
}
