//! Expected score for a pairing under the logistic Elo model

use crate::rating::EloRating;

/// Expected score share for `player` against `opponent`
///
/// `1 / (1 + 10^((opponent - player) / 400))`, always in (0, 1) for finite
/// inputs. The opponent's share is exactly `1.0 - expected_score(player, opponent)`.
pub fn expected_score(player: EloRating, opponent: EloRating) -> f64 {
    let (expected, _) = skillratings::elo::expected_score(&player.into(), &opponent.into());
    expected
}
