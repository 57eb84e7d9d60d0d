//! Display-ready leaderboard rows
//!
//! Players are ranked by primary-discipline rating, then secondary rating,
//! both descending, with unrated players sorted as if rated at the sentinel
//! value. Equal ratings fall back to last name and first name, ascending.

use crate::config::LeaderboardConfig;
use crate::error::RatingResult;
use crate::leaderboard::labels::{discipline_header_key, LabelResolver, PLAYER_HEADER_KEY, TITLE_KEY};
use crate::leaderboard::table::EloRatingTable;
use crate::rating::{EloRating, DEFAULT_RATING};
use crate::types::{Discipline, Player};
use serde::Serialize;
use std::cmp::Ordering;

/// Value carried by a cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Text(String),
    Integer(u32),
    Rating(f64),
}

/// One table cell with its span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: CellValue,
    pub colspan: u32,
    pub rowspan: u32,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::single(CellValue::Text(value.into()))
    }

    pub fn integer(value: u32) -> Self {
        Self::single(CellValue::Integer(value))
    }

    pub fn rating(value: f64) -> Self {
        Self::single(CellValue::Rating(value))
    }

    fn single(value: CellValue) -> Self {
        Self {
            value,
            colspan: 1,
            rowspan: 1,
        }
    }

    /// Text form of the cell, ratings rounded to `precision` decimals
    pub fn display(&self, precision: usize) -> String {
        match &self.value {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Rating(r) => format!("{:.*}", precision, r),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Header,
    Player,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

/// The complete leaderboard, ready for a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardView {
    pub title: String,
    pub header: Row,
    pub rows: Vec<Row>,
}

impl LeaderboardView {
    /// Build the ordered view from a table
    pub fn build(
        table: &EloRatingTable,
        labels: &dyn LabelResolver,
        config: &LeaderboardConfig,
    ) -> RatingResult<Self> {
        let disciplines = [config.primary, config.secondary];

        Ok(Self {
            title: labels.label(TITLE_KEY)?,
            header: header_row(labels, &disciplines)?,
            rows: ranked_players(table, config)
                .into_iter()
                .map(|player| player_row(table, player, &disciplines, config))
                .collect(),
        })
    }

    /// Header followed by player rows
    pub fn all_rows(&self) -> impl Iterator<Item = &Row> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}

fn header_row(labels: &dyn LabelResolver, disciplines: &[Discipline]) -> RatingResult<Row> {
    let mut cells = vec![Cell::text(labels.label(PLAYER_HEADER_KEY)?)];
    for &discipline in disciplines {
        for column in ["games", "change", "rating"] {
            cells.push(Cell::text(
                labels.label(&discipline_header_key(discipline, column))?,
            ));
        }
    }

    Ok(Row {
        kind: RowKind::Header,
        cells,
    })
}

/// Players in leaderboard order
pub fn ranked_players<'a>(table: &'a EloRatingTable, config: &LeaderboardConfig) -> Vec<&'a Player> {
    let sentinel = EloRating::new(config.sort_sentinel);
    let key = |player: &Player, discipline: Discipline| {
        table.rating(&player.id, discipline).unwrap_or(sentinel)
    };

    let mut players: Vec<&Player> = table.players().iter().collect();
    players.sort_by(|a, b| {
        key(b, config.primary)
            .cmp(&key(a, config.primary))
            .then_with(|| key(b, config.secondary).cmp(&key(a, config.secondary)))
            .then_with(|| compare_names(a, b))
    });
    players
}

fn compare_names(a: &Player, b: &Player) -> Ordering {
    a.last_name
        .cmp(&b.last_name)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.id.cmp(&b.id))
}

fn player_row(
    table: &EloRatingTable,
    player: &Player,
    disciplines: &[Discipline],
    config: &LeaderboardConfig,
) -> Row {
    let missing_rating = config.missing_rating_text(DEFAULT_RATING);
    let mut cells = vec![Cell::text(player.display_name())];
    for &discipline in disciplines {
        cells.push(
            table
                .games_count(&player.id, discipline)
                .map(Cell::integer)
                .unwrap_or_else(|| Cell::text(&config.missing_value)),
        );
        cells.push(
            table
                .rating_change(&player.id, discipline)
                .map(Cell::rating)
                .unwrap_or_else(|| Cell::text(&config.missing_value)),
        );
        cells.push(
            table
                .rating(&player.id, discipline)
                .map(|r| Cell::rating(r.value()))
                .unwrap_or_else(|| Cell::text(&missing_rating)),
        );
    }

    Row {
        kind: RowKind::Player,
        cells,
    }
}
