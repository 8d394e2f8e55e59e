//! User-facing settings: temperature unit and selected news categories.
//!
//! Settings are owned by the orchestrator and mutated only through an
//! explicit update; the presentation layer never holds a mutable handle.

use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Short unit label for display ("C" / "F").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

/// Convert a Celsius reading to Fahrenheit.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Mood category labels offered on the settings surface.
///
/// The classifier only ever produces the first three; "happiness" is
/// selectable but never weather-derived.
pub const MOOD_CATEGORY_LABELS: [&str; 4] = ["depressing", "fear", "winning", "happiness"];

/// User settings owned by the orchestrator.
///
/// `news_categories` keeps selection order; the toggle operation is what
/// prevents duplicates, the model itself does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub temperature_unit: TemperatureUnit,
    pub news_categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            news_categories: vec![
                "general".to_string(),
                "technology".to_string(),
                "business".to_string(),
                "health".to_string(),
            ],
        }
    }
}

impl Settings {
    /// Apply a partial update, replacing only the fields the patch carries.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(unit) = patch.temperature_unit {
            self.temperature_unit = unit;
        }
        if let Some(categories) = patch.news_categories {
            self.news_categories = categories;
        }
    }

    /// Select or deselect a category, preserving selection order.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.news_categories.iter().position(|c| c == category) {
            self.news_categories.remove(pos);
        } else {
            self.news_categories.push(category.to_string());
        }
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.news_categories.iter().any(|c| c == category)
    }
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    pub temperature_unit: Option<TemperatureUnit>,
    pub news_categories: Option<Vec<String>>,
}

impl SettingsPatch {
    pub fn unit(unit: TemperatureUnit) -> Self {
        Self {
            temperature_unit: Some(unit),
            ..Self::default()
        }
    }

    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            news_categories: Some(categories.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}
