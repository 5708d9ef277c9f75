//! Error types for rentboard-core
//!
//! Service failures are caught at the view boundary and flattened into a
//! single display string; nothing below the view ever panics on bad input.

use thiserror::Error;

/// Core error type for rentboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Service Errors
    // ===================
    /// Non-success HTTP status returned by the prediction/analytics service
    #[error("Service returned {status} {status_text} for {endpoint}")]
    Service {
        endpoint: String,
        status: u16,
        status_text: String,
        /// Optional `{ "message": ... }` carried in the error body
        message: Option<String>,
    },

    /// Body was not the JSON envelope we expected
    #[error("Malformed payload from {endpoint}: {message}")]
    MalformedPayload {
        endpoint: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Transport Errors
    // ===================
    /// Anything that is not an HTTP-shaped failure (connection refused, timeout, ...)
    #[error("Request to {endpoint} failed: {message}")]
    Unknown { endpoint: String, message: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// Build a `Service` error from a raw status and an optional error body
    pub fn service(
        endpoint: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        body: &str,
    ) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());

        CoreError::Service {
            endpoint: endpoint.into(),
            status,
            status_text: status_text.into(),
            message,
        }
    }

    /// Classify a reqwest failure that never produced a response
    pub fn transport(endpoint: impl Into<String>, error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            "service unreachable".to_string()
        } else {
            error.to_string()
        };

        CoreError::Unknown {
            endpoint: endpoint.into(),
            message,
        }
    }

    /// HTTP status if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The single string a view stores and renders inline
    ///
    /// Service errors prefer the body's `message`, falling back to
    /// `"Error {status}: {statusText}"`.
    pub fn display_message(&self) -> String {
        match self {
            CoreError::Service {
                status,
                status_text,
                message,
                ..
            } => match message {
                Some(m) => m.clone(),
                None => format!("Error {}: {}", status, status_text),
            },
            CoreError::MalformedPayload { message, .. } => {
                format!("Malformed response from service: {}", message)
            }
            CoreError::Unknown { message, .. } => {
                format!("An unknown error occurred: {}", message)
            }
            CoreError::InvalidConfig { message } => format!("Invalid configuration: {}", message),
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_prefers_body_message() {
        let err = CoreError::service("predict", 422, "Unprocessable Entity", r#"{"message":"city not supported"}"#);
        assert_eq!(err.display_message(), "city not supported");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_service_error_falls_back_to_status_line() {
        let err = CoreError::service("predict", 500, "Internal Server Error", "<html>oops</html>");
        assert_eq!(err.display_message(), "Error 500: Internal Server Error");

        let blank = CoreError::service("predict", 503, "Service Unavailable", r#"{"message":"  "}"#);
        assert_eq!(blank.display_message(), "Error 503: Service Unavailable");
    }

    #[test]
    fn test_malformed_payload_message_not_empty() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CoreError::MalformedPayload {
            endpoint: "rental_trends".into(),
            message: source.to_string(),
            source,
        };
        assert!(err.display_message().starts_with("Malformed response"));
        assert_eq!(err.status(), None);
    }
}
