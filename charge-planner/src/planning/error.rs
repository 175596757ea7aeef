//! Trip planning error types.

use crate::domain::ParseError;

/// Errors from planning a trip.
///
/// Neither variant is fatal: the caller keeps its previous plan and the user
/// may simply retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    /// The request failed local validation and was never sent.
    #[error("invalid trip request: {0}")]
    InvalidInput(String),

    /// The planning service was unreachable, returned a non-success status,
    /// or sent a body that could not be understood.
    #[error("planning service failed: {message}")]
    ServiceFailure {
        status: Option<u16>,
        message: String,
    },
}

impl PlanningError {
    pub(crate) fn service(message: impl Into<String>) -> Self {
        PlanningError::ServiceFailure {
            status: None,
            message: message.into(),
        }
    }
}

impl From<ParseError> for PlanningError {
    fn from(err: ParseError) -> Self {
        PlanningError::InvalidInput(err.to_string())
    }
}

impl From<reqwest::Error> for PlanningError {
    fn from(err: reqwest::Error) -> Self {
        PlanningError::ServiceFailure {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanningError::InvalidInput("current charge must be 0-100%, got 120".into());
        assert_eq!(
            err.to_string(),
            "invalid trip request: current charge must be 0-100%, got 120"
        );

        let err = PlanningError::ServiceFailure {
            status: Some(502),
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "planning service failed: Bad Gateway");
    }

    #[test]
    fn parse_errors_are_invalid_input() {
        let err: PlanningError = ParseError::WrongArity { found: 3 }.into();
        assert!(matches!(err, PlanningError::InvalidInput(msg) if msg.contains("3 part")));
    }
}
