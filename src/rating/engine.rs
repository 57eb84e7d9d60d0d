//! Rating update engine
//!
//! Turns an ordered batch of games into per-player, per-discipline rating
//! changes and new ratings. Games are applied sequentially: each game is
//! scored against the working ratings as they stand right before it, and both
//! working ratings move immediately afterwards. Disciplines never interact.
//!
//! A run either succeeds completely or fails on the first bad game; nothing
//! partial is returned.

use crate::error::{RatingError, RatingResult};
use crate::rating::expected::expected_score;
use crate::rating::k_factor::KFactorResolver;
use crate::rating::EloRating;
use crate::types::{Discipline, Game, Player, PlayerId, RatingChangeRecord, RatingRecord};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, error, info};

/// Rating assumed for players with no baseline record
pub const DEFAULT_RATING: f64 = 1500.0;

/// Baseline ratings indexed by (player, discipline)
#[derive(Debug, Clone, Default)]
pub struct BaselineRatings {
    ratings: HashMap<(PlayerId, Discipline), EloRating>,
}

impl BaselineRatings {
    /// Index baseline records, rejecting a second record for the same pair
    pub fn new(records: &[RatingRecord]) -> RatingResult<Self> {
        let mut ratings = HashMap::with_capacity(records.len());

        for record in records {
            let key = (record.player_id.clone(), record.discipline);
            if ratings.insert(key, record.rating).is_some() {
                return Err(RatingError::DuplicateRecord {
                    kind: "rating".to_string(),
                    key: format!("{}/{}", record.player_id, record.discipline),
                });
            }
        }

        Ok(Self { ratings })
    }

    pub fn get(&self, player_id: &str, discipline: Discipline) -> Option<EloRating> {
        self.ratings
            .get(&(player_id.to_string(), discipline))
            .copied()
    }
}

/// Output of one engine run
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRun {
    /// One record per (player, discipline) with at least one game
    pub changes: Vec<RatingChangeRecord>,
    /// New absolute ratings, same keys as `changes`
    pub new_ratings: Vec<RatingRecord>,
}

#[derive(Debug, Clone, Copy)]
struct Accumulator {
    working: EloRating,
    delta: f64,
    games: u32,
}

/// Sequential Elo update engine
#[derive(Debug, Clone)]
pub struct RatingEngine {
    default_rating: EloRating,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(DEFAULT_RATING)
    }
}

impl RatingEngine {
    pub fn new(default_rating: f64) -> Self {
        Self {
            default_rating: EloRating::new(default_rating),
        }
    }

    pub fn default_rating(&self) -> EloRating {
        self.default_rating
    }

    /// Apply `games` in order and return the accumulated rating changes
    pub fn evaluate_changes<K: KFactorResolver + ?Sized>(
        &self,
        players: &[Player],
        games: &[Game],
        k_factors: &K,
        baseline: &BaselineRatings,
    ) -> RatingResult<Vec<RatingChangeRecord>> {
        let known: HashSet<&str> = players.iter().map(|p| p.id.as_str()).collect();
        let mut state: BTreeMap<(PlayerId, Discipline), Accumulator> = BTreeMap::new();

        for (index, game) in games.iter().enumerate() {
            validate_game(game, index, &known)?;

            let discipline = game.discipline;
            let resolve = |player_id: &str| {
                k_factors
                    .resolve(player_id, discipline)
                    .inspect_err(|e| error!("Cannot rate game {}: {}", game.describe(index), e))
            };
            let white_k = resolve(&game.white)?;
            let black_k = resolve(&game.black)?;

            let white = self.accumulator(&state, baseline, &game.white, discipline);
            let black = self.accumulator(&state, baseline, &game.black, discipline);

            let expected = expected_score(white.working, black.working);
            let surprise = game.score - expected;
            let white_delta = white_k * surprise;
            let black_delta = black_k * -surprise;

            debug!(
                "Game {}: expected {:.4}, deltas {:+.3} / {:+.3}",
                game.describe(index),
                expected,
                white_delta,
                black_delta
            );

            state.insert(
                (game.white.clone(), discipline),
                Accumulator {
                    working: white.working + white_delta,
                    delta: white.delta + white_delta,
                    games: white.games + 1,
                },
            );
            state.insert(
                (game.black.clone(), discipline),
                Accumulator {
                    working: black.working + black_delta,
                    delta: black.delta + black_delta,
                    games: black.games + 1,
                },
            );
        }

        let changes: Vec<RatingChangeRecord> = state
            .into_iter()
            .map(|((player_id, discipline), acc)| RatingChangeRecord {
                player_id,
                discipline,
                delta: acc.delta,
                games: acc.games,
            })
            .collect();

        info!(
            "Evaluated {} games into {} rating changes",
            games.len(),
            changes.len()
        );

        Ok(changes)
    }

    /// New rating = baseline (or default) + accumulated delta, per change record
    pub fn evaluate_new_ratings(
        &self,
        baseline: &BaselineRatings,
        changes: &[RatingChangeRecord],
    ) -> Vec<RatingRecord> {
        changes
            .iter()
            .map(|change| {
                let start = baseline
                    .get(&change.player_id, change.discipline)
                    .unwrap_or(self.default_rating);
                RatingRecord {
                    player_id: change.player_id.clone(),
                    discipline: change.discipline,
                    rating: start + change.delta,
                }
            })
            .collect()
    }

    /// Full run: changes followed by new ratings
    pub fn run<K: KFactorResolver + ?Sized>(
        &self,
        players: &[Player],
        games: &[Game],
        k_factors: &K,
        baseline: &BaselineRatings,
    ) -> RatingResult<RatingRun> {
        let changes = self.evaluate_changes(players, games, k_factors, baseline)?;
        let new_ratings = self.evaluate_new_ratings(baseline, &changes);
        Ok(RatingRun {
            changes,
            new_ratings,
        })
    }

    fn accumulator(
        &self,
        state: &BTreeMap<(PlayerId, Discipline), Accumulator>,
        baseline: &BaselineRatings,
        player_id: &str,
        discipline: Discipline,
    ) -> Accumulator {
        state
            .get(&(player_id.to_string(), discipline))
            .copied()
            .unwrap_or_else(|| Accumulator {
                working: baseline
                    .get(player_id, discipline)
                    .unwrap_or(self.default_rating),
                delta: 0.0,
                games: 0,
            })
    }
}

fn validate_game(game: &Game, index: usize, known: &HashSet<&str>) -> RatingResult<()> {
    if game.white == game.black {
        return Err(RatingError::MalformedGame {
            game: game.describe(index),
            reason: "a player cannot play against themselves".to_string(),
        });
    }

    if ![0.0, 0.5, 1.0].contains(&game.score) {
        return Err(RatingError::MalformedGame {
            game: game.describe(index),
            reason: format!("score {} is not one of 0, 0.5, 1", game.score),
        });
    }

    for player_id in [&game.white, &game.black] {
        if !known.contains(player_id.as_str()) {
            return Err(RatingError::UnknownPlayer {
                player_id: player_id.clone(),
                game: game.describe(index),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::k_factor::{KValueTable, UniformKFactor};
    use crate::types::KValueSet;

    fn players() -> Vec<Player> {
        vec![
            Player::new("a", "Anna", "Alekhina"),
            Player::new("b", "Boris", "Botvinnik"),
            Player::new("c", "Clara", "Capablanca"),
        ]
    }

    fn change_for<'a>(
        changes: &'a [RatingChangeRecord],
        player_id: &str,
        discipline: Discipline,
    ) -> Option<&'a RatingChangeRecord> {
        changes
            .iter()
            .find(|c| c.player_id == player_id && c.discipline == discipline)
    }

    #[test]
    fn test_single_win_against_lower_rated() {
        let baseline = BaselineRatings::new(&[
            RatingRecord::new("a", Discipline::Rapid, 1600.0),
            RatingRecord::new("b", Discipline::Rapid, 1500.0),
        ])
        .unwrap();
        let games = vec![Game::new("a", "b", Discipline::Rapid, 1.0)];

        let run = RatingEngine::default()
            .run(&players(), &games, &UniformKFactor(20.0), &baseline)
            .unwrap();

        let a = change_for(&run.changes, "a", Discipline::Rapid).unwrap();
        let b = change_for(&run.changes, "b", Discipline::Rapid).unwrap();
        assert!((a.delta - 7.20).abs() < 0.01);
        assert!((b.delta + 7.20).abs() < 0.01);
        assert_eq!(a.games, 1);
        assert_eq!(b.games, 1);

        let new_a = run.new_ratings.iter().find(|r| r.player_id == "a").unwrap();
        let new_b = run.new_ratings.iter().find(|r| r.player_id == "b").unwrap();
        assert!((new_a.rating.value() - 1607.2).abs() < 0.01);
        assert!((new_b.rating.value() - 1492.8).abs() < 0.01);
    }

    #[test]
    fn test_equal_k_is_zero_sum() {
        let games = vec![
            Game::new("a", "b", Discipline::Blitz, 0.0),
            Game::new("b", "c", Discipline::Blitz, 0.5),
            Game::new("c", "a", Discipline::Blitz, 1.0),
        ];

        let changes = RatingEngine::default()
            .evaluate_changes(
                &players(),
                &games,
                &UniformKFactor(32.0),
                &BaselineRatings::default(),
            )
            .unwrap();

        let total: f64 = changes.iter().map(|c| c.delta).sum();
        assert!(total.abs() < 1e-9);
    }

    #[test]
    fn test_sequential_working_ratings() {
        // Second game uses a's rating after the first win, so it gains less.
        let games = vec![
            Game::new("a", "b", Discipline::Rapid, 1.0),
            Game::new("a", "c", Discipline::Rapid, 1.0),
        ];

        let changes = RatingEngine::default()
            .evaluate_changes(
                &players(),
                &games,
                &UniformKFactor(20.0),
                &BaselineRatings::default(),
            )
            .unwrap();

        let a = change_for(&changes, "a", Discipline::Rapid).unwrap();
        let c = change_for(&changes, "c", Discipline::Rapid).unwrap();
        assert_eq!(a.games, 2);
        assert!((a.delta - 10.0 - (-c.delta)).abs() < 1e-9);
        assert!(-c.delta < 10.0);
    }

    #[test]
    fn test_disciplines_are_independent() {
        let games = vec![
            Game::new("a", "b", Discipline::Rapid, 1.0),
            Game::new("a", "b", Discipline::Blitz, 0.5),
        ];

        let run = RatingEngine::default()
            .run(
                &players(),
                &games,
                &UniformKFactor(20.0),
                &BaselineRatings::default(),
            )
            .unwrap();

        let blitz = change_for(&run.changes, "a", Discipline::Blitz).unwrap();
        assert_eq!(blitz.delta, 0.0);
        assert_eq!(blitz.games, 1);
        assert!(change_for(&run.changes, "c", Discipline::Rapid).is_none());
        assert_eq!(run.changes.len(), 4);
        assert_eq!(run.new_ratings.len(), 4);
    }

    #[test]
    fn test_missing_k_factor() {
        let k_factors =
            KValueTable::new(&[KValueSet::new("a").with(Discipline::Rapid, 20.0)]).unwrap();
        let games = vec![Game::new("a", "b", Discipline::Rapid, 1.0)];

        let err = RatingEngine::default()
            .run(&players(), &games, &k_factors, &BaselineRatings::default())
            .unwrap_err();

        assert_eq!(
            err,
            RatingError::MissingKFactor {
                player_id: "b".to_string(),
                discipline: Discipline::Rapid,
            }
        );
    }

    #[test]
    fn test_unknown_player() {
        let games = vec![Game::new("a", "zed", Discipline::Rapid, 1.0)];

        let err = RatingEngine::default()
            .run(
                &players(),
                &games,
                &UniformKFactor(20.0),
                &BaselineRatings::default(),
            )
            .unwrap_err();

        assert!(matches!(err, RatingError::UnknownPlayer { ref player_id, .. } if player_id == "zed"));
    }

    #[test]
    fn test_malformed_games() {
        let engine = RatingEngine::default();
        let baseline = BaselineRatings::default();

        let self_play = vec![Game::new("a", "a", Discipline::Rapid, 1.0)];
        assert!(matches!(
            engine.run(&players(), &self_play, &UniformKFactor(20.0), &baseline),
            Err(RatingError::MalformedGame { .. })
        ));

        let odd_score = vec![Game::new("a", "b", Discipline::Rapid, 0.75)];
        assert!(matches!(
            engine.run(&players(), &odd_score, &UniformKFactor(20.0), &baseline),
            Err(RatingError::MalformedGame { .. })
        ));
    }

    #[test]
    fn test_duplicate_baseline_rejected() {
        let result = BaselineRatings::new(&[
            RatingRecord::new("a", Discipline::Rapid, 1600.0),
            RatingRecord::new("a", Discipline::Rapid, 1610.0),
        ]);
        assert!(matches!(result, Err(RatingError::DuplicateRecord { .. })));
    }

    #[test]
    fn test_custom_default_rating() {
        let engine = RatingEngine::new(1200.0);
        let changes = vec![RatingChangeRecord {
            player_id: "c".to_string(),
            discipline: Discipline::Blitz,
            delta: 5.0,
            games: 1,
        }];

        let ratings = engine.evaluate_new_ratings(&BaselineRatings::default(), &changes);
        assert_eq!(ratings[0].rating.value(), 1205.0);
    }
}
