use serde::{Deserialize, Serialize};

/// Geographic coordinates produced by the location service.
///
/// Consumed once per refresh cycle; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Permission state machine driven by [`crate::LocationGateway`].
///
/// Illegal combinations (e.g. "requesting while already granted") are
/// unrepresentable; the gateway owns all transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Startup state before the initial OS check has run.
    #[default]
    Unknown,
    /// A permission prompt is in flight; further requests are ignored.
    Requesting,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub fn is_requesting(&self) -> bool {
        matches!(self, Self::Requesting)
    }
}

/// Raw permission status as reported by the OS service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    /// The user explicitly refused the prompt.
    Denied,
    /// Never asked, or the platform could not determine an answer.
    Undetermined,
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Permission request failed: {0}")]
    RequestFailed(String),
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

impl LocationError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Location permission denied. Please enable location access in settings to get weather updates."
            }
            Self::RequestFailed(_) => "Failed to request location permission. Please try again.",
            Self::ServiceUnavailable => {
                "Location services are unavailable. Please ensure location services are enabled."
            }
            Self::Timeout => "Location request timed out. Please check your GPS settings.",
            Self::Other(_) => {
                "Failed to get current location. Please ensure location services are enabled."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_unknown() {
        assert_eq!(PermissionState::default(), PermissionState::Unknown);
        assert!(!PermissionState::default().is_granted());
    }

    #[test]
    fn test_state_predicates() {
        assert!(PermissionState::Granted.is_granted());
        assert!(PermissionState::Requesting.is_requesting());
        assert!(!PermissionState::Denied.is_granted());
    }

    #[test]
    fn test_error_user_messages() {
        assert!(LocationError::Timeout.user_message().contains("timed out"));
        assert!(LocationError::PermissionDenied
            .user_message()
            .contains("enable location access"));
    }
}
