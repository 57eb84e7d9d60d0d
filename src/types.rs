//! Common types used throughout the rating service

use crate::rating::EloRating;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Opaque identifier for players
pub type PlayerId = String;

/// Game format with its own independent rating pool
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Classical,
    Rapid,
    Blitz,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Classical => "classical",
            Discipline::Rapid => "rapid",
            Discipline::Blitz => "blitz",
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classical" => Ok(Discipline::Classical),
            "rapid" => Ok(Discipline::Rapid),
            "blitz" => Ok(Discipline::Blitz),
            other => Err(format!("Unknown discipline: {}", other)),
        }
    }
}

/// Player information, owned by the caller and read-only here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub first_name: String,
    pub last_name: String,
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Name as shown on the leaderboard ("Last First")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// A completed game between two players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Optional external identifier, only used in error reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub white: PlayerId,
    pub black: PlayerId,
    pub discipline: Discipline,
    /// Score share for `white`: 1.0, 0.5 or 0.0
    pub score: f64,
}

impl Game {
    pub fn new(
        white: impl Into<PlayerId>,
        black: impl Into<PlayerId>,
        discipline: Discipline,
        score: f64,
    ) -> Self {
        Self {
            id: None,
            white: white.into(),
            black: black.into(),
            discipline,
            score,
        }
    }

    /// Human-readable context for error messages
    pub fn describe(&self, index: usize) -> String {
        match &self.id {
            Some(id) => format!(
                "{} ({} vs {}, {})",
                id, self.white, self.black, self.discipline
            ),
            None => format!(
                "#{} ({} vs {}, {})",
                index + 1,
                self.white,
                self.black,
                self.discipline
            ),
        }
    }
}

/// Per-player K-factors, one entry per discipline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KValueSet {
    pub player_id: PlayerId,
    pub values: BTreeMap<Discipline, f64>,
}

impl KValueSet {
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, discipline: Discipline, k: f64) -> Self {
        self.values.insert(discipline, k);
        self
    }
}

/// A player's rating in one discipline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub player_id: PlayerId,
    pub discipline: Discipline,
    pub rating: EloRating,
}

impl RatingRecord {
    pub fn new(player_id: impl Into<PlayerId>, discipline: Discipline, rating: f64) -> Self {
        Self {
            player_id: player_id.into(),
            discipline,
            rating: EloRating::new(rating),
        }
    }
}

/// Accumulated rating change for a player in one discipline over a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChangeRecord {
    pub player_id: PlayerId,
    pub discipline: Discipline,
    pub delta: f64,
    /// Number of games that contributed to `delta`
    pub games: u32,
}
