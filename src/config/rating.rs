//! Rating engine configuration

use crate::rating::DEFAULT_RATING;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating assumed for players with no baseline record
    pub default_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
        }
    }
}
