use std::fmt;

/// Errors that can arise when calling the `OpenAI` API.
#[derive(Debug)]
pub enum OpenAIError {
    /// Transport errors (connection, TLS, timeout).
    Http(reqwest::Error),
    /// JSON serialization/deserialization errors.
    Json(serde_json::Error),
    /// The API answered with a non-success status.
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message reported by the API, or the raw body.
        message: String,
    },
    /// The response parsed but carried no usable payload.
    EmptyResponse(&'static str),
}

impl fmt::Display for OpenAIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "HTTP error: {err}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
            Self::Api { status, message } => write!(f, "API error ({status}): {message}"),
            Self::EmptyResponse(what) => write!(f, "response missing {what}"),
        }
    }
}

impl std::error::Error for OpenAIError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Api { .. } | Self::EmptyResponse(_) => None,
        }
    }
}

impl From<reqwest::Error> for OpenAIError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl From<serde_json::Error> for OpenAIError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
