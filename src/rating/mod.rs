//! Elo rating primitives and the batch update engine
//!
//! The expected-score formula comes from the skillratings crate; K-factors are
//! per player and per discipline, and updates are applied game by game.

pub mod engine;
pub mod expected;
pub mod k_factor;
pub mod value;

// Re-export commonly used types
pub use engine::{BaselineRatings, RatingEngine, RatingRun, DEFAULT_RATING};
pub use expected::expected_score;
pub use k_factor::{KFactorResolver, KValueTable, UniformKFactor};
pub use value::EloRating;
