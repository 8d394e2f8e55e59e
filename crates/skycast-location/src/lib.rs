//! Location access for Skycast.
//!
//! The OS position/permission service is an opaque boundary behind the
//! [`LocationService`] trait; [`LocationGateway`] layers the permission
//! state machine, the acquisition timeout and the cached-fix tolerance
//! on top of it.

pub mod gateway;
pub mod service;
pub mod types;

pub use gateway::LocationGateway;
pub use service::{LocationService, StaticLocationService};
pub use types::{Coordinates, LocationError, PermissionState, PermissionStatus};
