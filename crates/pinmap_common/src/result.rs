//! Common result and error types for the pinmap engine.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an internal-consistency failure (a bug in pinmap or a
/// caller that let the registry and store drift apart), not a user-facing
/// error. User errors are reported through the diagnostic sink and the
/// operation still returns `Ok`.
pub type PinmapResult<T> = Result<T, InternalError>;

/// An internal-consistency error indicating a state-sync bug, not a user
/// input problem.
///
/// These errors should never occur during normal operation. Public mutators
/// log them and degrade to a no-op instead of crashing the editing session.
#[derive(Debug, thiserror::Error)]
#[error("internal consistency error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("map name miss");
        assert_eq!(
            format!("{err}"),
            "internal consistency error: map name miss"
        );
    }

    #[test]
    fn ok_path() {
        let r: PinmapResult<u32> = Ok(7);
        assert_eq!(r.ok(), Some(7));
    }

    #[test]
    fn from_string() {
        let err: InternalError = "stale key".to_string().into();
        assert_eq!(err.message, "stale key");
    }
}
