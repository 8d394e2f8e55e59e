//! Permission state machine and coordinate acquisition.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::service::LocationService;
use crate::types::{Coordinates, LocationError, PermissionState, PermissionStatus};

/// How long a position fetch may take before it is abandoned.
const FIX_TIMEOUT: Duration = Duration::from_secs(15);

/// A fix younger than this is served from cache instead of the OS.
const FIX_MAX_AGE: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, Copy)]
struct CachedFix {
    coordinates: Coordinates,
    acquired_at: Instant,
}

#[derive(Debug, Default)]
struct GatewayState {
    permission: PermissionState,
    last_error: Option<String>,
    last_fix: Option<CachedFix>,
}

/// Gateway over the OS location service.
///
/// Owns the [`PermissionState`] machine: the initial silent check, the
/// prompting request with its re-entrancy guard, and coordinate fetches
/// with a 15-second timeout and 5-minute cached-fix tolerance. Position
/// failures never change the permission state.
pub struct LocationGateway {
    service: Arc<dyn LocationService>,
    state: Mutex<GatewayState>,
}

impl LocationGateway {
    pub fn new(service: Arc<dyn LocationService>) -> Self {
        Self {
            service,
            state: Mutex::new(GatewayState::default()),
        }
    }

    /// Current permission state.
    pub fn permission(&self) -> PermissionState {
        self.state.lock().permission
    }

    /// Message describing the most recent failure, if any.
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// Last known coordinates, regardless of age.
    pub fn last_known_coordinates(&self) -> Option<Coordinates> {
        self.state.lock().last_fix.map(|fix| fix.coordinates)
    }

    /// Silent startup check; never prompts the user.
    ///
    /// Transitions `Unknown` to `Granted` or `Denied` from the OS-reported
    /// status. Calling it again after the state has settled is a no-op.
    pub async fn check_initial_permission(&self) -> PermissionState {
        {
            let state = self.state.lock();
            if state.permission != PermissionState::Unknown {
                return state.permission;
            }
        }

        let next = match self.service.check_permission().await {
            Ok(PermissionStatus::Granted) => {
                tracing::info!("Location permission already granted");
                (PermissionState::Granted, None)
            }
            Ok(_) => (PermissionState::Denied, None),
            Err(e) => {
                tracing::warn!("Initial permission check failed: {}", e);
                (
                    PermissionState::Denied,
                    Some("Failed to check location permission status.".to_string()),
                )
            }
        };

        let mut state = self.state.lock();
        state.permission = next.0;
        state.last_error = next.1;
        state.permission
    }

    /// Prompt the user for location permission.
    ///
    /// Idempotent while a request is in flight: a concurrent call returns
    /// immediately without a second prompt. Callers drive any retry loop;
    /// the gateway never re-prompts on its own.
    pub async fn request_permission(&self) -> PermissionState {
        {
            let mut state = self.state.lock();
            match state.permission {
                PermissionState::Requesting => {
                    tracing::debug!("Permission request already in flight, ignoring");
                    return PermissionState::Requesting;
                }
                PermissionState::Granted => return PermissionState::Granted,
                _ => {
                    state.permission = PermissionState::Requesting;
                    state.last_error = None;
                }
            }
        }

        let outcome = self.prompt_for_permission().await;

        let mut state = self.state.lock();
        match outcome {
            Ok(()) => {
                state.permission = PermissionState::Granted;
                state.last_error = None;
            }
            Err(e) => {
                tracing::warn!("Location permission not granted: {}", e);
                state.permission = PermissionState::Denied;
                state.last_error = Some(e.user_message().to_string());
            }
        }
        state.permission
    }

    async fn prompt_for_permission(&self) -> Result<(), LocationError> {
        // The OS may have granted permission since the last check (e.g. via
        // system settings); prefer that over showing another prompt.
        if let Ok(PermissionStatus::Granted) = self.service.check_permission().await {
            return Ok(());
        }

        match self.service.request_permission().await {
            Ok(PermissionStatus::Granted) => Ok(()),
            Ok(PermissionStatus::Denied) => Err(LocationError::PermissionDenied),
            Ok(PermissionStatus::Undetermined) => Err(LocationError::Other(
                "Location permission not granted. Weather data requires location access."
                    .to_string(),
            )),
            Err(e) => Err(LocationError::RequestFailed(e.to_string())),
        }
    }

    /// Fetch current coordinates.
    ///
    /// Serves a cached fix younger than five minutes without touching the
    /// OS; otherwise requests a fresh position under a 15-second timeout.
    /// Failures are reported to the caller but leave the permission state
    /// untouched.
    pub async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        {
            let mut state = self.state.lock();
            if !state.permission.is_granted() {
                tracing::debug!("No location permission, cannot get location");
                return Err(LocationError::PermissionDenied);
            }
            state.last_error = None;

            if let Some(fix) = state.last_fix {
                if fix.acquired_at.elapsed() < FIX_MAX_AGE {
                    tracing::debug!("Serving cached location fix");
                    return Ok(fix.coordinates);
                }
            }
        }

        let result = match tokio::time::timeout(FIX_TIMEOUT, self.service.current_position()).await
        {
            Ok(Ok(coordinates)) => Ok(coordinates),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(LocationError::Timeout),
        };

        let mut state = self.state.lock();
        match result {
            Ok(coordinates) => {
                state.last_fix = Some(CachedFix {
                    coordinates,
                    acquired_at: Instant::now(),
                });
                tracing::debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Acquired location fix"
                );
                Ok(coordinates)
            }
            Err(e) => {
                tracing::warn!("Failed to get current location: {}", e);
                state.last_error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Scripted<T> = Mutex<VecDeque<Result<T, LocationError>>>;

    /// Location service that plays back scripted responses.
    #[derive(Default)]
    struct ScriptedService {
        check: Scripted<PermissionStatus>,
        request: Scripted<PermissionStatus>,
        position: Scripted<Coordinates>,
        position_calls: AtomicUsize,
        request_calls: AtomicUsize,
        hang_position: bool,
        hang_request: bool,
    }

    impl ScriptedService {
        fn push_check(self, status: PermissionStatus) -> Self {
            self.check.lock().push_back(Ok(status));
            self
        }

        fn push_request(self, status: PermissionStatus) -> Self {
            self.request.lock().push_back(Ok(status));
            self
        }

        fn push_position(self, lat: f64, lon: f64) -> Self {
            self.position.lock().push_back(Ok(Coordinates {
                latitude: lat,
                longitude: lon,
            }));
            self
        }

        fn push_position_err(self, err: LocationError) -> Self {
            self.position.lock().push_back(Err(err));
            self
        }
    }

    #[async_trait]
    impl LocationService for ScriptedService {
        async fn check_permission(&self) -> Result<PermissionStatus, LocationError> {
            self.check
                .lock()
                .pop_front()
                .unwrap_or(Ok(PermissionStatus::Undetermined))
        }

        async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
            self.request_calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_request {
                std::future::pending::<()>().await;
            }
            self.request
                .lock()
                .pop_front()
                .unwrap_or(Ok(PermissionStatus::Undetermined))
        }

        async fn current_position(&self) -> Result<Coordinates, LocationError> {
            self.position_calls.fetch_add(1, Ordering::SeqCst);
            if self.hang_position {
                std::future::pending::<()>().await;
            }
            self.position
                .lock()
                .pop_front()
                .unwrap_or(Err(LocationError::ServiceUnavailable))
        }
    }

    fn gateway(service: ScriptedService) -> (LocationGateway, Arc<ScriptedService>) {
        let service = Arc::new(service);
        (LocationGateway::new(service.clone()), service)
    }

    #[tokio::test]
    async fn test_initial_check_grants() {
        let (gateway, _) = gateway(ScriptedService::default().push_check(PermissionStatus::Granted));
        assert_eq!(
            gateway.check_initial_permission().await,
            PermissionState::Granted
        );
    }

    #[tokio::test]
    async fn test_initial_check_denies_on_undetermined() {
        let (gateway, _) =
            gateway(ScriptedService::default().push_check(PermissionStatus::Undetermined));
        assert_eq!(
            gateway.check_initial_permission().await,
            PermissionState::Denied
        );
        assert!(gateway.last_error().is_none());
    }

    #[tokio::test]
    async fn test_initial_check_runs_once() {
        let (gateway, _) = gateway(ScriptedService::default().push_check(PermissionStatus::Granted));
        gateway.check_initial_permission().await;
        // The script is exhausted; a second call must not touch the service.
        assert_eq!(
            gateway.check_initial_permission().await,
            PermissionState::Granted
        );
    }

    #[tokio::test]
    async fn test_request_granted_after_denial() {
        let (gateway, _) = gateway(
            ScriptedService::default()
                .push_check(PermissionStatus::Denied)
                .push_check(PermissionStatus::Denied)
                .push_request(PermissionStatus::Granted),
        );
        gateway.check_initial_permission().await;
        assert_eq!(gateway.permission(), PermissionState::Denied);

        assert_eq!(gateway.request_permission().await, PermissionState::Granted);
        assert!(gateway.last_error().is_none());
    }

    #[tokio::test]
    async fn test_request_denied_records_cause() {
        let (gateway, _) = gateway(
            ScriptedService::default()
                .push_check(PermissionStatus::Denied)
                .push_check(PermissionStatus::Denied)
                .push_request(PermissionStatus::Denied),
        );
        gateway.check_initial_permission().await;

        assert_eq!(gateway.request_permission().await, PermissionState::Denied);
        let error = gateway.last_error().unwrap();
        assert!(error.contains("enable location access"));
    }

    #[tokio::test]
    async fn test_concurrent_request_is_ignored_while_prompting() {
        let service = ScriptedService {
            hang_request: true,
            ..ScriptedService::default()
        }
        .push_check(PermissionStatus::Denied)
        .push_check(PermissionStatus::Denied);
        let (gateway, service) = gateway(service);
        let gateway = Arc::new(gateway);
        gateway.check_initial_permission().await;

        let first = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.request_permission().await }
        });
        // Let the first request reach the hanging OS prompt.
        tokio::task::yield_now().await;
        assert_eq!(gateway.permission(), PermissionState::Requesting);

        // The concurrent call must return immediately without prompting.
        assert_eq!(
            gateway.request_permission().await,
            PermissionState::Requesting
        );
        assert_eq!(service.request_calls.load(Ordering::SeqCst), 1);
        first.abort();
    }

    #[tokio::test]
    async fn test_request_short_circuits_when_os_already_granted() {
        // No prompt scripted: a request_permission() call would fall through
        // to Undetermined. The preceding silent check must win.
        let (gateway, _) = gateway(
            ScriptedService::default()
                .push_check(PermissionStatus::Denied)
                .push_check(PermissionStatus::Granted),
        );
        gateway.check_initial_permission().await;
        assert_eq!(gateway.request_permission().await, PermissionState::Granted);
    }

    #[tokio::test]
    async fn test_request_is_noop_when_granted() {
        let (gateway, _) = gateway(ScriptedService::default().push_check(PermissionStatus::Granted));
        gateway.check_initial_permission().await;
        // Script exhausted; this must not prompt.
        assert_eq!(gateway.request_permission().await, PermissionState::Granted);
    }

    #[tokio::test]
    async fn test_coordinates_require_permission() {
        let (gateway, service) = gateway(ScriptedService::default());
        let err = gateway.current_coordinates().await.unwrap_err();
        assert!(matches!(err, LocationError::PermissionDenied));
        assert_eq!(service.position_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_coordinates_success_updates_last_known() {
        let (gateway, _) = gateway(
            ScriptedService::default()
                .push_check(PermissionStatus::Granted)
                .push_position(47.6062, -122.3321),
        );
        gateway.check_initial_permission().await;

        let coords = gateway.current_coordinates().await.unwrap();
        assert_eq!(coords.latitude, 47.6062);
        assert_eq!(
            gateway.last_known_coordinates().unwrap().longitude,
            -122.3321
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_fix_served_within_five_minutes() {
        let (gateway, service) = gateway(
            ScriptedService::default()
                .push_check(PermissionStatus::Granted)
                .push_position(10.0, 20.0)
                .push_position(30.0, 40.0),
        );
        gateway.check_initial_permission().await;

        gateway.current_coordinates().await.unwrap();
        tokio::time::advance(Duration::from_secs(4 * 60)).await;
        let cached = gateway.current_coordinates().await.unwrap();
        assert_eq!(cached.latitude, 10.0);
        assert_eq!(service.position_calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(2 * 60)).await;
        let fresh = gateway.current_coordinates().await.unwrap();
        assert_eq!(fresh.latitude, 30.0);
        assert_eq!(service.position_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_position_timeout_keeps_permission() {
        let service = ScriptedService {
            hang_position: true,
            ..ScriptedService::default()
        }
        .push_check(PermissionStatus::Granted);
        let (gateway, _) = gateway(service);
        gateway.check_initial_permission().await;

        let err = gateway.current_coordinates().await.unwrap_err();
        assert!(matches!(err, LocationError::Timeout));
        assert_eq!(gateway.permission(), PermissionState::Granted);
        assert!(gateway.last_error().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_position_failure_keeps_permission() {
        let (gateway, _) = gateway(
            ScriptedService::default()
                .push_check(PermissionStatus::Granted)
                .push_position_err(LocationError::ServiceUnavailable),
        );
        gateway.check_initial_permission().await;

        let err = gateway.current_coordinates().await.unwrap_err();
        assert!(matches!(err, LocationError::ServiceUnavailable));
        assert_eq!(gateway.permission(), PermissionState::Granted);
    }
}
