//! Refresh sequencing and state ownership.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use skycast_core::{Settings, SettingsPatch};
use skycast_location::LocationGateway;
use skycast_news::NewsClient;
use skycast_weather::{classify, WeatherClient};

use crate::state::{DashboardState, Notice};

/// Why a refresh cycle stopped early.
enum CycleAbort {
    /// Coordinates were unavailable; the gateway recorded the cause and
    /// the cycle ends without a user notification.
    Silent,
    /// A fetch failed; the message becomes one consolidated notice.
    Failed(String),
}

/// Sequences location → weather → news and owns all derived state.
///
/// The presentation layer holds an `Arc` of this and a watch receiver;
/// it never mutates state directly. A single-flight flag keeps two
/// overlapping refresh cycles from racing on shared state.
pub struct DataOrchestrator {
    gateway: Arc<LocationGateway>,
    weather: WeatherClient,
    news: NewsClient,
    page_size: u32,
    state: Mutex<DashboardState>,
    publisher: watch::Sender<DashboardState>,
    refresh_in_flight: AtomicBool,
}

impl DataOrchestrator {
    pub fn new(
        gateway: Arc<LocationGateway>,
        weather: WeatherClient,
        news: NewsClient,
        page_size: u32,
    ) -> Self {
        let initial = DashboardState::default();
        let (publisher, _) = watch::channel(initial.clone());
        Self {
            gateway,
            weather,
            news,
            page_size,
            state: Mutex::new(initial),
            publisher,
            refresh_in_flight: AtomicBool::new(false),
        }
    }

    /// Subscribe to state snapshots. Every mutation publishes one.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.publisher.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> DashboardState {
        self.state.lock().clone()
    }

    /// Mutate state and publish the result, mirroring the gateway's
    /// permission state and last error message into the snapshot.
    fn mutate(&self, f: impl FnOnce(&mut DashboardState)) {
        let permission = self.gateway.permission();
        let location_error = self.gateway.last_error();
        let snapshot = {
            let mut state = self.state.lock();
            f(&mut state);
            state.permission = permission;
            state.location_error = location_error;
            state.clone()
        };
        let _ = self.publisher.send(snapshot);
    }

    /// Run the silent startup permission check. Fetches nothing.
    pub async fn initialize(&self) {
        self.gateway.check_initial_permission().await;
        self.mutate(|_| {});
    }

    /// Run one full refresh cycle.
    ///
    /// No-op unless permission is granted and no request or refresh is in
    /// flight. `loading` is cleared on every exit path; any fetch failure
    /// becomes a single notice with a retry affordance.
    pub async fn refresh(&self, force: bool) {
        let permission = self.gateway.permission();
        if permission.is_requesting() {
            tracing::debug!("Permission request in flight, skipping refresh");
            return;
        }
        if !permission.is_granted() {
            tracing::debug!("No location permission, skipping refresh");
            return;
        }
        if self.refresh_in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("Refresh already in flight, skipping");
            return;
        }

        tracing::info!(force, "Starting refresh cycle");
        self.mutate(|state| {
            state.loading = true;
            state.notice = None;
        });

        let outcome = self.run_cycle().await;
        match outcome {
            Ok(()) => {
                tracing::info!("Refresh cycle completed");
                self.mutate(|state| state.loading = false);
            }
            Err(CycleAbort::Silent) => {
                self.mutate(|state| state.loading = false);
            }
            Err(CycleAbort::Failed(message)) => {
                self.mutate(|state| {
                    state.loading = false;
                    state.notice = Some(Notice {
                        message,
                        can_retry: true,
                    });
                });
            }
        }

        self.refresh_in_flight.store(false, Ordering::SeqCst);
    }

    async fn run_cycle(&self) -> Result<(), CycleAbort> {
        let coordinates = match self.gateway.current_coordinates().await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::warn!("No coordinates available, aborting refresh: {}", e);
                return Err(CycleAbort::Silent);
            }
        };

        let weather = self
            .weather
            .fetch_weather(coordinates.latitude, coordinates.longitude)
            .await
            .map_err(|e| {
                tracing::warn!("Weather fetch failed: {}", e);
                CycleAbort::Failed(e.user_message().to_string())
            })?;

        let temperature_c = weather.current.temperature_c;
        self.mutate(|state| state.weather = Some(weather));

        let category = {
            let state = self.state.lock();
            effective_category(&state.settings, temperature_c)
        };
        let news = self.news.fetch_news(&category, self.page_size).await;
        self.mutate(|state| state.news = news);

        Ok(())
    }

    /// Merge a settings patch.
    ///
    /// When a weather snapshot already exists and permission is granted,
    /// re-fetches news only, reusing the stored temperature; location and
    /// weather are not touched. Without a snapshot the new settings simply
    /// wait for the next full refresh.
    pub async fn update_settings(&self, patch: SettingsPatch) {
        let temperature_c = {
            let mut state = self.state.lock();
            state.settings.apply(patch);
            state.weather.as_ref().map(|w| w.current.temperature_c)
        };
        self.mutate(|_| {});

        let Some(temperature_c) = temperature_c else {
            tracing::debug!("No weather snapshot yet, settings apply on next refresh");
            return;
        };
        if !self.gateway.permission().is_granted() {
            return;
        }

        tracing::info!("Settings changed, re-fetching news only");
        self.mutate(|state| state.loading = true);
        let category = {
            let state = self.state.lock();
            effective_category(&state.settings, temperature_c)
        };
        let news = self.news.fetch_news(&category, self.page_size).await;
        self.mutate(|state| {
            state.news = news;
            state.loading = false;
        });
    }

    /// Retry after a failure or a permission denial.
    ///
    /// Drives the permission prompt when permission is missing, then runs
    /// a forced refresh once granted.
    pub async fn retry(&self) {
        if !self.gateway.permission().is_granted() {
            let granted = self.gateway.request_permission().await.is_granted();
            self.mutate(|_| {});
            if !granted {
                return;
            }
        }
        self.refresh(true).await;
    }
}

/// Resolve the category actually used for a news fetch.
///
/// The weather-derived category wins when the user has selected it;
/// otherwise the first user-selected category; otherwise `general`.
fn effective_category(settings: &Settings, temperature_c: f64) -> String {
    let mood = classify(temperature_c);
    if settings.is_selected(mood.as_str()) {
        mood.as_str().to_string()
    } else {
        settings
            .news_categories
            .first()
            .cloned()
            .unwrap_or_else(|| "general".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(categories: &[&str]) -> Settings {
        Settings {
            news_categories: categories.iter().map(|c| c.to_string()).collect(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_weather_category_wins_when_selected() {
        // 30 °C classifies as "fear"
        let settings = settings_with(&["fear", "general"]);
        assert_eq!(effective_category(&settings, 30.0), "fear");
    }

    #[test]
    fn test_first_preference_when_weather_category_unselected() {
        let settings = settings_with(&["general", "technology"]);
        assert_eq!(effective_category(&settings, 30.0), "general");
    }

    #[test]
    fn test_general_when_nothing_selected() {
        let settings = settings_with(&[]);
        assert_eq!(effective_category(&settings, 15.0), "general");
    }

    #[test]
    fn test_cold_weather_selects_depressing() {
        let settings = settings_with(&["technology", "depressing"]);
        assert_eq!(effective_category(&settings, 3.0), "depressing");
    }
}
