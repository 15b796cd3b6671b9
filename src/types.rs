//! Shared error type and result alias for hearth.
//!
//! Every domain error carries the message that ends up in the HTTP envelope,
//! so variants stay bare strings and the variant itself selects the status.

use hyper::StatusCode;
use thiserror::Error;

/// Application-wide error type.
///
/// Persistence errors never reach an HTTP response: snapshot failures are
/// logged and swallowed because the in-memory mutation has already succeeded.
#[derive(Error, Debug)]
pub enum HearthError {
    /// Missing or malformed input field (400)
    #[error("{0}")]
    Validation(String),

    /// Duplicate check-in, taken username, already-joined challenge (400)
    #[error("{0}")]
    Conflict(String),

    /// Unknown habit/post/challenge id (404)
    #[error("{0}")]
    NotFound(String),

    /// Missing/invalid/expired token or bad credentials (401)
    #[error("{0}")]
    Auth(String),

    /// Snapshot write failure - logged, never surfaced to callers
    #[error("{0}")]
    Persistence(String),

    /// Malformed request at the HTTP layer (400)
    #[error("{0}")]
    Http(String),

    /// Anything unexpected (500, detail not leaked)
    #[error("{0}")]
    Internal(String),
}

impl HearthError {
    /// HTTP status this error maps to in the response envelope.
    pub fn status(&self) -> StatusCode {
        match self {
            HearthError::Validation(_) | HearthError::Conflict(_) | HearthError::Http(_) => {
                StatusCode::BAD_REQUEST
            }
            HearthError::NotFound(_) => StatusCode::NOT_FOUND,
            HearthError::Auth(_) => StatusCode::UNAUTHORIZED,
            HearthError::Persistence(_) | HearthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HearthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            HearthError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HearthError::Conflict("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HearthError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HearthError::Auth("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            HearthError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_is_bare_message() {
        let e = HearthError::Conflict("Already checked in today".into());
        assert_eq!(e.to_string(), "Already checked in today");
    }
}
