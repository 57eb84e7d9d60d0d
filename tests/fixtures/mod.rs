//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use elo_changes::storage::RunInputs;
use elo_changes::{Discipline, Game, KValueSet, Player, RatingRecord};
use std::path::{Path, PathBuf};

/// A small club: two established players, one rapid-only newcomer, one idle member
pub fn club() -> RunInputs {
    RunInputs {
        players: vec![
            Player::new("alekhine", "Alexander", "Alekhine"),
            Player::new("botvinnik", "Mikhail", "Botvinnik"),
            Player::new("capablanca", "Jose Raul", "Capablanca"),
            Player::new("tal", "Mikhail", "Tal"),
        ],
        k_values: vec![
            uniform_k("alekhine", 20.0),
            uniform_k("botvinnik", 20.0),
            uniform_k("capablanca", 40.0),
            uniform_k("tal", 20.0),
        ],
        baseline: vec![
            RatingRecord::new("alekhine", Discipline::Rapid, 1600.0),
            RatingRecord::new("alekhine", Discipline::Blitz, 1550.0),
            RatingRecord::new("botvinnik", Discipline::Rapid, 1500.0),
            RatingRecord::new("botvinnik", Discipline::Blitz, 1650.0),
            RatingRecord::new("tal", Discipline::Blitz, 1700.0),
        ],
        games: vec![
            Game::new("alekhine", "botvinnik", Discipline::Rapid, 1.0),
            Game::new("botvinnik", "alekhine", Discipline::Blitz, 0.5),
            Game::new("capablanca", "botvinnik", Discipline::Rapid, 1.0),
        ],
    }
}

pub fn uniform_k(player_id: &str, k: f64) -> KValueSet {
    KValueSet::new(player_id)
        .with(Discipline::Classical, k)
        .with(Discipline::Rapid, k)
        .with(Discipline::Blitz, k)
}

/// Write the inputs as JSON files into `dir`, returning (players, k, baseline, games)
pub fn write_inputs(dir: &Path, inputs: &RunInputs) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let players = dir.join("players.json");
    let k_values = dir.join("k_values.json");
    let baseline = dir.join("ratings.json");
    let games = dir.join("games.json");

    elo_changes::storage::write_records(&players, &inputs.players).unwrap();
    elo_changes::storage::write_records(&k_values, &inputs.k_values).unwrap();
    elo_changes::storage::write_records(&baseline, &inputs.baseline).unwrap();
    elo_changes::storage::write_records(&games, &inputs.games).unwrap();

    (players, k_values, baseline, games)
}
