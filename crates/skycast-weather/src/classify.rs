//! Temperature-to-mood-category mapping.

/// News category implied by the current temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodCategory {
    /// Cold (10 °C and below).
    Depressing,
    /// Hot (25 °C and above).
    Fear,
    /// Everything in between.
    Winning,
}

impl MoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Depressing => "depressing",
            Self::Fear => "fear",
            Self::Winning => "winning",
        }
    }
}

impl std::fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a Celsius reading to a mood category.
///
/// Both thresholds are inclusive: 10 °C is cold, 25 °C is hot.
pub fn classify(temp_c: f64) -> MoodCategory {
    if temp_c <= 10.0 {
        MoodCategory::Depressing
    } else if temp_c >= 25.0 {
        MoodCategory::Fear
    } else {
        MoodCategory::Winning
    }
}
