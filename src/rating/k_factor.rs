//! K-factor resolution
//!
//! The K-factor controls how far a single result can move a player's rating.
//! There is deliberately no fallback value: an unknown pair is an error.

use crate::error::{RatingError, RatingResult};
use crate::types::{Discipline, KValueSet, PlayerId};
use std::collections::HashMap;

/// Trait for looking up a player's K-factor in a discipline
pub trait KFactorResolver {
    /// Resolve the K-factor, failing with `MissingKFactor` for unknown pairs
    fn resolve(&self, player_id: &str, discipline: Discipline) -> RatingResult<f64>;
}

/// K-factors indexed by (player, discipline), built from K-value sets
#[derive(Debug, Clone, Default)]
pub struct KValueTable {
    values: HashMap<(PlayerId, Discipline), f64>,
}

impl KValueTable {
    /// Build the table, rejecting duplicate players and non-positive factors
    pub fn new(sets: &[KValueSet]) -> RatingResult<Self> {
        let mut values = HashMap::new();
        let mut seen = std::collections::HashSet::new();

        for set in sets {
            if !seen.insert(set.player_id.as_str()) {
                return Err(RatingError::DuplicateRecord {
                    kind: "K-value set".to_string(),
                    key: set.player_id.clone(),
                });
            }

            for (&discipline, &k) in &set.values {
                if !k.is_finite() || k <= 0.0 {
                    return Err(RatingError::InvalidKFactor {
                        player_id: set.player_id.clone(),
                        discipline,
                        value: k,
                    });
                }
                values.insert((set.player_id.clone(), discipline), k);
            }
        }

        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KFactorResolver for KValueTable {
    fn resolve(&self, player_id: &str, discipline: Discipline) -> RatingResult<f64> {
        self.values
            .get(&(player_id.to_string(), discipline))
            .copied()
            .ok_or_else(|| RatingError::MissingKFactor {
                player_id: player_id.to_string(),
                discipline,
            })
    }
}

/// Same K-factor for everyone, handy for tests and benchmarks
#[derive(Debug, Clone, Copy)]
pub struct UniformKFactor(pub f64);

impl KFactorResolver for UniformKFactor {
    fn resolve(&self, _player_id: &str, _discipline: Discipline) -> RatingResult<f64> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_pair() {
        let table = KValueTable::new(&[KValueSet::new("alice")
            .with(Discipline::Rapid, 20.0)
            .with(Discipline::Blitz, 40.0)])
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("alice", Discipline::Rapid).unwrap(), 20.0);
        assert_eq!(table.resolve("alice", Discipline::Blitz).unwrap(), 40.0);
    }

    #[test]
    fn test_missing_discipline_fails() {
        let table =
            KValueTable::new(&[KValueSet::new("alice").with(Discipline::Rapid, 20.0)]).unwrap();

        let err = table.resolve("alice", Discipline::Blitz).unwrap_err();
        assert_eq!(
            err,
            RatingError::MissingKFactor {
                player_id: "alice".to_string(),
                discipline: Discipline::Blitz,
            }
        );
    }

    #[test]
    fn test_missing_player_fails() {
        let table = KValueTable::default();
        assert!(table.is_empty());
        assert!(matches!(
            table.resolve("bob", Discipline::Rapid),
            Err(RatingError::MissingKFactor { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for bad in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let result = KValueTable::new(&[KValueSet::new("alice").with(Discipline::Rapid, bad)]);
            assert!(matches!(result, Err(RatingError::InvalidKFactor { .. })));
        }
    }

    #[test]
    fn test_duplicate_sets_rejected() {
        let result = KValueTable::new(&[
            KValueSet::new("alice").with(Discipline::Rapid, 20.0),
            KValueSet::new("alice").with(Discipline::Blitz, 20.0),
        ]);
        assert!(matches!(result, Err(RatingError::DuplicateRecord { .. })));
    }

    #[test]
    fn test_uniform_resolver() {
        let resolver = UniformKFactor(16.0);
        assert_eq!(resolver.resolve("anyone", Discipline::Classical).unwrap(), 16.0);
    }
}
