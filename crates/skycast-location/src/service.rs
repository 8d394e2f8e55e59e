//! OS location service boundary.

use async_trait::async_trait;

use crate::types::{Coordinates, LocationError, PermissionStatus};

/// Opaque interface to the platform location service.
///
/// Three operations, matching what mobile platforms expose: a silent
/// permission check, a prompting permission request, and a position fetch.
/// Implementations do not enforce timeouts or caching; the gateway does.
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Report the current permission status without prompting the user.
    async fn check_permission(&self) -> Result<PermissionStatus, LocationError>;

    /// Ask the user for permission. May show a system prompt.
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError>;

    /// Acquire the current position. Only valid once permission is granted.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Location service backed by fixed coordinates.
///
/// Desktop hosts have no permission prompt or GPS; the CLI configures this
/// service with coordinates from the config file and it always grants.
#[derive(Debug, Clone)]
pub struct StaticLocationService {
    coordinates: Coordinates,
}

impl StaticLocationService {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationService for StaticLocationService {
    async fn check_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(PermissionStatus::Granted)
    }

    async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}
