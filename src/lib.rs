//! Elo Changes - batch Elo rating updates for chess clubs
//!
//! This crate computes per-discipline rating changes from a batch of games,
//! derives new ratings, and builds a sorted, localized leaderboard.

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod rating;
pub mod service;
pub mod storage;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, RatingResult, Result};
pub use types::*;

// Re-export key components
pub use leaderboard::{EloRatingTable, LabelResolver, LeaderboardView};
pub use rating::{KFactorResolver, RatingEngine};
pub use service::{ReportService, RunReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
