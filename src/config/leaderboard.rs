//! Leaderboard layout configuration

use crate::types::Discipline;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// First sort key and first column group
    pub primary: Discipline,
    /// Second sort key and second column group
    pub secondary: Discipline,
    /// Shown for an absent game count or rating change
    pub missing_value: String,
    /// Shown for an absent rating; unset means the default rating followed by `?`
    pub missing_rating: Option<String>,
    /// Rating used only for ordering unrated players
    pub sort_sentinel: f64,
    /// Decimal places for ratings and changes
    pub rating_precision: usize,
    /// Keep baseline ratings on the board for players who sat out a discipline
    pub show_baseline_ratings: bool,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            primary: Discipline::Rapid,
            secondary: Discipline::Blitz,
            missing_value: "-".to_string(),
            missing_rating: None,
            sort_sentinel: 0.0,
            rating_precision: 1,
            show_baseline_ratings: false,
        }
    }
}

impl LeaderboardConfig {
    /// Placeholder for an absent rating, given the rating new players start from
    pub fn missing_rating_text(&self, default_rating: f64) -> String {
        self.missing_rating
            .clone()
            .unwrap_or_else(|| format!("{}?", default_rating))
    }
}
