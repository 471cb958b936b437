use reqwest::StatusCode;
use thiserror::Error;

pub const NETWORK_MESSAGE: &str = "Network error. Please try again.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Every failure a console or RSVP page action can end in. The payload is the
/// one message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Authorization(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Unexpected(String),
}

impl ClientError {
    /// Maps an error response. `message` is the server's `message` field if the
    /// body had one; otherwise the operation's `fallback` is used.
    pub fn from_status(status: StatusCode, message: Option<String>, fallback: &str) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Authorization(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Unexpected(message),
        }
    }

    pub fn network() -> Self {
        ClientError::Network(NETWORK_MESSAGE.to_string())
    }

    pub fn unexpected() -> Self {
        ClientError::Unexpected(UNEXPECTED_MESSAGE.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(m)
            | ClientError::Authorization(m)
            | ClientError::NotFound(m)
            | ClientError::Conflict(m)
            | ClientError::Network(m)
            | ClientError::Unexpected(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_categories() {
        let cases = [
            (StatusCode::BAD_REQUEST, "Validation"),
            (StatusCode::UNPROCESSABLE_ENTITY, "Validation"),
            (StatusCode::UNAUTHORIZED, "Authorization"),
            (StatusCode::FORBIDDEN, "Authorization"),
            (StatusCode::NOT_FOUND, "NotFound"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Unexpected"),
            (StatusCode::BAD_GATEWAY, "Unexpected"),
        ];

        for (status, expected) in cases {
            let err = ClientError::from_status(status, None, "x");
            let kind = format!("{:?}", err);
            assert!(kind.starts_with(expected), "{} mapped to {}", status, kind);
        }
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ClientError::from_status(StatusCode::CONFLICT, Some("Already recorded".into()), "Failed to update RSVP status");
        assert_eq!(err.message(), "Already recorded");
    }

    #[test]
    fn missing_or_blank_message_uses_fallback() {
        let err = ClientError::from_status(StatusCode::NOT_FOUND, None, "Failed to fetch guests");
        assert_eq!(err.message(), "Failed to fetch guests");

        let err = ClientError::from_status(StatusCode::NOT_FOUND, Some("  ".into()), "Failed to fetch guests");
        assert_eq!(err.message(), "Failed to fetch guests");
    }

    #[test]
    fn display_is_the_user_message() {
        assert_eq!(ClientError::network().to_string(), NETWORK_MESSAGE);
        assert_eq!(ClientError::unexpected().to_string(), UNEXPECTED_MESSAGE);
    }
}
