//! Error handling for GeoHod
//!
//! This module defines the error types used throughout the client core
//! and the single place where backend failure messages are translated
//! into domain errors.

use std::sync::OnceLock;
use regex::Regex;
use thiserror::Error;

/// Main error type for the GeoHod client
#[derive(Error, Debug)]
pub enum GeoHodError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Domain conflict: {0}")]
    DomainConflict(DomainConflict),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Business rule conflicts reported by the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainConflict {
    #[error("event is full")]
    EventFull,

    #[error("{0}")]
    Other(String),
}

/// Result type alias for GeoHod operations
pub type Result<T> = std::result::Result<T, GeoHodError>;

impl From<reqwest::Error> for GeoHodError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeoHodError::Network("request timed out".to_string())
        } else if e.is_decode() {
            GeoHodError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            GeoHodError::Server {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            GeoHodError::Network(e.to_string())
        }
    }
}

impl From<config::ConfigError> for GeoHodError {
    fn from(e: config::ConfigError) -> Self {
        GeoHodError::Config(e.to_string())
    }
}

fn event_full_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(full|group|maximum|max participants|заполн|максим|групп)")
            .expect("event full pattern is a valid regex")
    })
}

/// Which kind of call a failed reply belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureContext {
    /// Joining or leaving an event, where a 4xx can mean the group is full
    Membership,
    General,
}

/// Translate a non-2xx backend reply into an error.
///
/// The backend has no structured error code for capacity conflicts, so on
/// membership calls a 4xx message that mentions a full group or a maximum
/// is read as [`DomainConflict::EventFull`]. Other 409/422 replies become
/// [`DomainConflict::Other`]. Everything else stays a server error.
pub fn classify_failure(status: u16, message: &str, context: FailureContext) -> GeoHodError {
    let membership = context == FailureContext::Membership;
    match status {
        404 => GeoHodError::NotFound { resource: message.to_string() },
        401 | 403 => GeoHodError::Authentication(message.to_string()),
        400..=499 if membership && event_full_pattern().is_match(message) => {
            GeoHodError::DomainConflict(DomainConflict::EventFull)
        }
        409 | 422 => GeoHodError::DomainConflict(DomainConflict::Other(message.to_string())),
        _ => GeoHodError::Server { status, message: message.to_string() },
    }
}

impl GeoHodError {
    /// Check if re-issuing the same action may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            GeoHodError::Network(_) => true,
            GeoHodError::Server { status, .. } => *status >= 500,
            GeoHodError::NotFound { .. } => false,
            GeoHodError::InvalidResponse(_) => false,
            GeoHodError::Validation(_) => false,
            GeoHodError::DomainConflict(_) => false,
            GeoHodError::Config(_) => false,
            GeoHodError::PermissionDenied(_) => false,
            GeoHodError::InvalidStateTransition { .. } => false,
            GeoHodError::Authentication(_) => false,
            GeoHodError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GeoHodError::Config(_) => ErrorSeverity::Critical,
            GeoHodError::Validation(_) => ErrorSeverity::Info,
            GeoHodError::DomainConflict(_) => ErrorSeverity::Info,
            GeoHodError::PermissionDenied(_) => ErrorSeverity::Warning,
            GeoHodError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            GeoHodError::Authentication(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Text shown to the user in a toast or in place of the content
    pub fn user_message(&self) -> String {
        match self {
            GeoHodError::Network(_) => "No connection. Please try again.".to_string(),
            GeoHodError::NotFound { .. } => "Event not found".to_string(),
            GeoHodError::DomainConflict(DomainConflict::EventFull) => {
                "Unfortunately, the group is already full".to_string()
            }
            GeoHodError::DomainConflict(DomainConflict::Other(message)) => message.clone(),
            GeoHodError::Validation(message) => message.clone(),
            GeoHodError::Server { message, .. } if !message.is_empty() => message.clone(),
            GeoHodError::PermissionDenied(_) | GeoHodError::InvalidStateTransition { .. } => {
                "This action is not available".to_string()
            }
            _ => "Something went wrong".to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_full_group_message_is_event_full() {
        let err = classify_failure(400, "The group is already full", FailureContext::Membership);
        assert_matches!(err, GeoHodError::DomainConflict(DomainConflict::EventFull));

        let err = classify_failure(
            409,
            "Достигнуто максимальное количество участников",
            FailureContext::Membership,
        );
        assert_matches!(err, GeoHodError::DomainConflict(DomainConflict::EventFull));
    }

    #[test]
    fn test_capacity_words_outside_membership_calls() {
        assert_matches!(
            classify_failure(400, "maximum participants is 100", FailureContext::General),
            GeoHodError::Server { status: 400, .. }
        );
        assert_matches!(
            classify_failure(409, "group name taken", FailureContext::General),
            GeoHodError::DomainConflict(DomainConflict::Other(_))
        );
    }

    #[test]
    fn test_other_statuses_are_not_conflicts() {
        let ctx = FailureContext::Membership;
        assert_matches!(classify_failure(404, "no such event", ctx), GeoHodError::NotFound { .. });
        assert_matches!(classify_failure(401, "bad init data", ctx), GeoHodError::Authentication(_));
        assert_matches!(
            classify_failure(500, "maximum recursion", ctx),
            GeoHodError::Server { status: 500, .. }
        );
        assert_matches!(
            classify_failure(409, "already registered", ctx),
            GeoHodError::DomainConflict(DomainConflict::Other(_))
        );
    }

    #[test]
    fn test_user_message() {
        let err = GeoHodError::DomainConflict(DomainConflict::EventFull);
        assert_eq!(err.user_message(), "Unfortunately, the group is already full");
        assert!(!err.is_recoverable());
        assert_eq!(err.severity(), ErrorSeverity::Info);

        let err = GeoHodError::Network("connection refused".to_string());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_recoverable_failures() {
        let ctx = FailureContext::General;
        assert!(classify_failure(503, "Backend unavailable", ctx).is_recoverable());
        assert!(!classify_failure(400, "bad date", ctx).is_recoverable());
        assert!(!classify_failure(404, "no such event", ctx).is_recoverable());
        assert!(!GeoHodError::InvalidResponse("missing name".to_string()).is_recoverable());
    }
}
