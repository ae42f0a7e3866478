use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to the backend, object storage or the browser
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}")]
    Server { status: u16, message: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Browser storage unavailable: {0}")]
    Storage(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}

impl ApiError {
    pub fn network(err: impl ToString) -> Self {
        ApiError::Network(err.to_string())
    }

    /// Text for a toast; the server's own `message` wins when present
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message), ..
            } => message.clone(),
            ApiError::Server { status: 401, .. } => "Your session has expired. Please log in again.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Branch already exists".into()),
        };
        assert_eq!(err.user_message(), "Branch already exists");

        let err = ApiError::Server { status: 500, message: None };
        assert_eq!(err.user_message(), "Request failed with status 500");

        let err = ApiError::Server { status: 401, message: None };
        assert!(err.is_unauthorized());
        assert!(err.user_message().contains("log in"));

        assert_eq!(ApiError::network("offline").user_message(), "Network error: offline");
    }
}
