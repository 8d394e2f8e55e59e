//! Dashboard state snapshots published to the presentation layer.

use skycast_core::Settings;
use skycast_location::PermissionState;
use skycast_news::NewsArticle;
use skycast_weather::WeatherSnapshot;

/// A user-facing error notification with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    /// Whether the UI should offer a retry action for this notice.
    pub can_retry: bool,
}

/// Everything the display layer needs, as one cloneable snapshot.
///
/// The orchestrator is the only writer; subscribers receive clones and
/// never mutate shared state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub weather: Option<WeatherSnapshot>,
    pub news: Vec<NewsArticle>,
    pub settings: Settings,
    pub loading: bool,
    pub permission: PermissionState,
    /// Message explaining the most recent location failure or denial.
    pub location_error: Option<String>,
    pub notice: Option<Notice>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            weather: None,
            news: Vec::new(),
            settings: Settings::default(),
            loading: false,
            permission: PermissionState::Unknown,
            location_error: None,
            notice: None,
        }
    }
}
