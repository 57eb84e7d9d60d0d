//! Configuration management for the rating run
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod leaderboard;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use leaderboard::LeaderboardConfig;
pub use rating::RatingConfig;
