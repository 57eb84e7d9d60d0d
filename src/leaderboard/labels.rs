//! Localized labels for the leaderboard
//!
//! Labels are looked up by key through [`LabelResolver`], which the view
//! builder receives explicitly. Built-in bundles cover English and Russian;
//! other bundles can be loaded from a TOML file of `"key" = "value"` pairs.

use crate::error::{RatingError, RatingResult, Result};
use crate::types::Discipline;
use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

pub const TITLE_KEY: &str = "elorating.table.view.title";
pub const PLAYER_HEADER_KEY: &str = "elorating.table.view.header.player";

/// Key for a per-discipline column header, e.g. `elorating.table.view.header.rapid.games`
pub fn discipline_header_key(discipline: Discipline, column: &str) -> String {
    format!("elorating.table.view.header.{}.{}", discipline, column)
}

/// Trait for resolving label keys to localized text
pub trait LabelResolver {
    fn label(&self, key: &str) -> RatingResult<String>;
}

/// A key-to-text map for one locale
#[derive(Debug, Clone, Default)]
pub struct LabelBundle {
    labels: HashMap<String, String>,
}

const EN_US: &[(&str, &str)] = &[
    ("elorating.table.view.title", "Elo rating changes"),
    ("elorating.table.view.header.player", "Player"),
    ("elorating.table.view.header.classical.games", "Classical games"),
    ("elorating.table.view.header.classical.change", "Classical change"),
    ("elorating.table.view.header.classical.rating", "Classical rating"),
    ("elorating.table.view.header.rapid.games", "Rapid games"),
    ("elorating.table.view.header.rapid.change", "Rapid change"),
    ("elorating.table.view.header.rapid.rating", "Rapid rating"),
    ("elorating.table.view.header.blitz.games", "Blitz games"),
    ("elorating.table.view.header.blitz.change", "Blitz change"),
    ("elorating.table.view.header.blitz.rating", "Blitz rating"),
];

const RU_RU: &[(&str, &str)] = &[
    ("elorating.table.view.title", "Изменения рейтинга Эло"),
    ("elorating.table.view.header.player", "Игрок"),
    ("elorating.table.view.header.classical.games", "Партии (классика)"),
    ("elorating.table.view.header.classical.change", "Изменение (классика)"),
    ("elorating.table.view.header.classical.rating", "Рейтинг (классика)"),
    ("elorating.table.view.header.rapid.games", "Партии (рапид)"),
    ("elorating.table.view.header.rapid.change", "Изменение (рапид)"),
    ("elorating.table.view.header.rapid.rating", "Рейтинг (рапид)"),
    ("elorating.table.view.header.blitz.games", "Партии (блиц)"),
    ("elorating.table.view.header.blitz.change", "Изменение (блиц)"),
    ("elorating.table.view.header.blitz.rating", "Рейтинг (блиц)"),
];

impl LabelBundle {
    pub fn new(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }

    /// Built-in bundle for a locale such as `ru_RU`
    ///
    /// Only the language part matters; empty or unknown languages get English.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale.split('_').next().unwrap_or("").to_lowercase();
        let entries = match language.as_str() {
            "ru" => RU_RU,
            _ => EN_US,
        };

        Self {
            labels: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Load a bundle from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read labels file {}", path.display()))?;
        let labels: HashMap<String, String> = toml::from_str(&content)
            .with_context(|| format!("Failed to parse labels file {}", path.display()))?;
        Ok(Self { labels })
    }

    /// Overlay `other` on top of this bundle
    pub fn merged_with(mut self, other: LabelBundle) -> Self {
        self.labels.extend(other.labels);
        self
    }
}

impl LabelResolver for LabelBundle {
    fn label(&self, key: &str) -> RatingResult<String> {
        self.labels
            .get(key)
            .cloned()
            .ok_or_else(|| RatingError::MissingLabel {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_locales() {
        let en = LabelBundle::for_locale("en_US");
        assert_eq!(en.label(PLAYER_HEADER_KEY).unwrap(), "Player");

        let ru = LabelBundle::for_locale("ru_RU");
        assert_eq!(ru.label(PLAYER_HEADER_KEY).unwrap(), "Игрок");

        let fallback = LabelBundle::for_locale("");
        assert_eq!(fallback.label(TITLE_KEY).unwrap(), "Elo rating changes");

        let unknown = LabelBundle::for_locale("de_DE");
        assert_eq!(unknown.label(PLAYER_HEADER_KEY).unwrap(), "Player");
    }

    #[test]
    fn test_every_discipline_has_headers() {
        for locale in ["en_US", "ru_RU"] {
            let bundle = LabelBundle::for_locale(locale);
            for discipline in [Discipline::Classical, Discipline::Rapid, Discipline::Blitz] {
                for column in ["games", "change", "rating"] {
                    let key = discipline_header_key(discipline, column);
                    assert!(bundle.label(&key).is_ok(), "{} missing {}", locale, key);
                }
            }
        }
    }

    #[test]
    fn test_missing_label() {
        let bundle = LabelBundle::default();
        assert_eq!(
            bundle.label("nope").unwrap_err(),
            RatingError::MissingLabel {
                key: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_from_file_and_merge() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\"elorating.table.view.title\" = \"Club ratings\"").unwrap();

        let custom = LabelBundle::from_file(file.path()).unwrap();
        let bundle = LabelBundle::for_locale("en_US").merged_with(custom);

        assert_eq!(bundle.label(TITLE_KEY).unwrap(), "Club ratings");
        assert_eq!(bundle.label(PLAYER_HEADER_KEY).unwrap(), "Player");
    }
}
