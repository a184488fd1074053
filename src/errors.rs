use std::fmt;

/// Errors raised while talking to the authentication endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Serialization(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Maximum number of error body characters kept in an [`AppError::Http`].
pub const MAX_ERROR_CHARS: usize = 200;

/// Trims and truncates an HTTP error body before it is stored or rendered.
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
