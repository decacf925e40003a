#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("request failed"))]
    Api {
        status: u16,
        /// The server's own `error`/`message`/`detail` text, if it sent one.
        message: Option<String>,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ClientError {
    /// Build a [`ClientError::Api`] from a failed response.
    pub fn from_response(resp: &crate::transport::ApiResponse) -> Self {
        ClientError::Api {
            status: resp.status,
            message: resp.error_message(),
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server attached to an API error.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
