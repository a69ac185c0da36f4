//! Common error types for Vidpass components.

use thiserror::Error;

/// Errors surfaced by the registration flow.
///
/// Display output is the user-facing message sent to clients verbatim,
/// so variants carry the full text rather than a prefixed fragment.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Malformed or missing request input
    #[error("{0}")]
    Validation(String),

    /// Unknown registration identifier
    #[error("{0}")]
    NotFound(String),

    /// Registration record outlived its TTL
    #[error("{0}")]
    Expired(String),

    /// Simulated biometric match rejection
    #[error("{0}")]
    Verification(String),

    /// Unexpected server-side failure
    #[error("{0}")]
    Internal(String),
}

impl RegistrationError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Expired(_) => 400,
            Self::Verification(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Returns true if the caller can fix the request and retry
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(RegistrationError::Validation("x".into()).status_code(), 400);
        assert_eq!(RegistrationError::NotFound("x".into()).status_code(), 404);
        assert_eq!(RegistrationError::Expired("x".into()).status_code(), 400);
        assert_eq!(RegistrationError::Verification("x".into()).status_code(), 400);
        assert_eq!(RegistrationError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn display_is_the_message_verbatim() {
        let err = RegistrationError::Validation("No image data provided".into());
        assert_eq!(err.to_string(), "No image data provided");
    }
}
