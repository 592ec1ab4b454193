use thiserror::Error;

/// Which branch of the request lifecycle a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Required input missing; nothing was sent.
    Validation,
    /// The backend answered and reported `success: false`.
    Application,
    /// Network, timeout, malformed body or unexpected content type.
    Transport,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .message.as_deref().unwrap_or("Unknown error."))]
    Application { message: Option<String> },

    #[error("Unexpected response from server: {status} {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn application(message: Option<String>) -> Self {
        Self::Application { message }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Validation(_) => FailureKind::Validation,
            ApiError::Application { .. } => FailureKind::Application,
            ApiError::UnexpectedResponse { .. } | ApiError::Transport(_) => FailureKind::Transport,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.kind() == FailureKind::Transport
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("Request timed out: {err}"))
        } else if err.is_decode() {
            ApiError::Transport(format!("Malformed response: {err}"))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Transport(format!("Malformed response: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_error_falls_back_to_unknown() {
        assert_eq!(ApiError::application(None).to_string(), "Unknown error.");
        assert_eq!(
            ApiError::application(Some("Disease model not loaded on server.".into())).to_string(),
            "Disease model not loaded on server."
        );
    }

    #[test]
    fn unexpected_response_counts_as_transport() {
        let err = ApiError::UnexpectedResponse { status: 502, body: "<html>Bad Gateway</html>".into() };
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "Unexpected response from server: 502 <html>Bad Gateway</html>");
    }
}
