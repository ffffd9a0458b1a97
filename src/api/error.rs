//! Error handling for the API module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        ApiError::Http { status, message }
    }

    /// Short description suitable for a status line.
    ///
    /// FastAPI wraps error text as `{"detail": "..."}`; that detail is shown
    /// when present instead of the raw body.
    pub fn to_pretty(&self) -> String {
        match self {
            ApiError::Http { status, message } => {
                let detail = serde_json::from_str::<serde_json::Value>(message)
                    .ok()
                    .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
                    .unwrap_or_else(|| message.trim().to_string());
                if detail.is_empty() {
                    format!("Server returned {}", status)
                } else {
                    format!("Server returned {}: {}", status, detail)
                }
            }
            ApiError::Reqwest(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Reqwest(e) if e.is_connect() => "Could not reach the server".to_string(),
            ApiError::Reqwest(_) => "Network error".to_string(),
            ApiError::Decode(e) => format!("Unexpected response from server: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_http_error_prefers_detail() {
        let err = ApiError::Http {
            status: 500,
            message: r#"{"detail":"database unavailable"}"#.to_string(),
        };
        assert_eq!(err.to_pretty(), "Server returned 500: database unavailable");
    }

    #[test]
    fn pretty_http_error_falls_back_to_body() {
        let err = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_pretty(), "Server returned 404: Not Found");

        let empty = ApiError::Http {
            status: 502,
            message: String::new(),
        };
        assert_eq!(empty.to_pretty(), "Server returned 502");
    }
}
