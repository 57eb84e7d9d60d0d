//! Read-only join of players, rating changes and new ratings
//!
//! Every accessor returns `Option`: a player with no games in a discipline has
//! no change and no count, and an unrated player has no rating. None of these
//! are the same as zero.

use crate::rating::EloRating;
use crate::types::{Discipline, Player, PlayerId, RatingChangeRecord, RatingRecord};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
struct ChangeEntry {
    delta: f64,
    games: u32,
}

/// Leaderboard data keyed by player id
#[derive(Debug, Clone)]
pub struct EloRatingTable {
    players: Vec<Player>,
    changes: HashMap<(PlayerId, Discipline), ChangeEntry>,
    ratings: HashMap<(PlayerId, Discipline), EloRating>,
}

impl EloRatingTable {
    /// Build the table from an engine run and the known players
    ///
    /// `ratings` may be the run's new ratings merged with untouched baseline
    /// ratings; see [`merge_ratings`].
    pub fn new(
        players: Vec<Player>,
        changes: &[RatingChangeRecord],
        ratings: &[RatingRecord],
    ) -> Self {
        let known: std::collections::HashSet<&str> =
            players.iter().map(|p| p.id.as_str()).collect();

        let mut change_map = HashMap::with_capacity(changes.len());
        for change in changes {
            if !known.contains(change.player_id.as_str()) {
                warn!(
                    "Rating change for unlisted player {} ignored",
                    change.player_id
                );
                continue;
            }
            change_map.insert(
                (change.player_id.clone(), change.discipline),
                ChangeEntry {
                    delta: change.delta,
                    games: change.games,
                },
            );
        }

        let mut rating_map = HashMap::with_capacity(ratings.len());
        for record in ratings {
            if !known.contains(record.player_id.as_str()) {
                warn!("Rating for unlisted player {} ignored", record.player_id);
                continue;
            }
            rating_map.insert((record.player_id.clone(), record.discipline), record.rating);
        }

        Self {
            players,
            changes: change_map,
            ratings: rating_map,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn games_count(&self, player_id: &str, discipline: Discipline) -> Option<u32> {
        self.change_entry(player_id, discipline).map(|c| c.games)
    }

    pub fn rating_change(&self, player_id: &str, discipline: Discipline) -> Option<f64> {
        self.change_entry(player_id, discipline).map(|c| c.delta)
    }

    pub fn rating(&self, player_id: &str, discipline: Discipline) -> Option<EloRating> {
        self.ratings
            .get(&(player_id.to_string(), discipline))
            .copied()
    }

    fn change_entry(&self, player_id: &str, discipline: Discipline) -> Option<ChangeEntry> {
        self.changes
            .get(&(player_id.to_string(), discipline))
            .copied()
    }
}

/// New ratings plus every baseline rating the run did not replace
///
/// Players who sat out a discipline keep their baseline rating on the board
/// even though they have no new-rating record for it.
pub fn merge_ratings(baseline: &[RatingRecord], new_ratings: &[RatingRecord]) -> Vec<RatingRecord> {
    let mut merged: HashMap<(&str, Discipline), &RatingRecord> = baseline
        .iter()
        .map(|r| ((r.player_id.as_str(), r.discipline), r))
        .collect();
    for record in new_ratings {
        merged.insert((record.player_id.as_str(), record.discipline), record);
    }

    let mut records: Vec<RatingRecord> = merged.into_values().cloned().collect();
    records.sort_by(|a, b| {
        a.player_id
            .cmp(&b.player_id)
            .then(a.discipline.cmp(&b.discipline))
    });
    records
}
