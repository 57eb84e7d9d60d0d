//! Error types for the rating service
//!
//! Core computations return [`RatingError`] directly so callers can match on the
//! failure; the I/O and CLI layers wrap everything in `anyhow` for context.

use crate::types::{Discipline, PlayerId};

/// Result type alias for the I/O and CLI layers
pub type Result<T> = anyhow::Result<T>;

/// Result type for the rating engine and leaderboard builders
pub type RatingResult<T> = std::result::Result<T, RatingError>;

/// Fatal conditions that abort a rating run
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("No K-factor for player {player_id} in {discipline}")]
    MissingKFactor {
        player_id: PlayerId,
        discipline: Discipline,
    },

    #[error("Invalid K-factor {value} for player {player_id} in {discipline}")]
    InvalidKFactor {
        player_id: PlayerId,
        discipline: Discipline,
        value: f64,
    },

    #[error("Unknown player {player_id} referenced by game {game}")]
    UnknownPlayer { player_id: PlayerId, game: String },

    #[error("Malformed game {game}: {reason}")]
    MalformedGame { game: String, reason: String },

    #[error("Duplicate {kind} record for {key}")]
    DuplicateRecord { kind: String, key: String },

    #[error("Missing label: {key}")]
    MissingLabel { key: String },
}
