//! One full rating run, from loaded inputs to a display-ready leaderboard
//!
//! Every output is computed in memory before anything is returned, so the
//! caller can persist all of it or none of it.

use crate::config::AppConfig;
use crate::error::{RatingResult, Result};
use crate::leaderboard::{
    merge_ratings, render, EloRatingTable, LabelResolver, LeaderboardView, OutputFormat,
};
use crate::rating::{BaselineRatings, KValueTable, RatingEngine};
use crate::storage::{InputPaths, OutputPaths, RunInputs};
use crate::types::{RatingChangeRecord, RatingRecord};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct RunReport {
    pub changes: Vec<RatingChangeRecord>,
    pub new_ratings: Vec<RatingRecord>,
    pub view: LeaderboardView,
}

/// Runs the engine and builds the leaderboard according to configuration
#[derive(Debug, Clone)]
pub struct ReportService {
    config: AppConfig,
    engine: RatingEngine,
}

impl ReportService {
    pub fn new(mut config: AppConfig) -> Self {
        let engine = RatingEngine::new(config.rating.default_rating);
        let placeholder = config
            .leaderboard
            .missing_rating_text(config.rating.default_rating);
        config.leaderboard.missing_rating = Some(placeholder);
        Self { config, engine }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compute rating changes, new ratings and the leaderboard view
    pub fn run(&self, inputs: &RunInputs, labels: &dyn LabelResolver) -> RatingResult<RunReport> {
        let start_time = std::time::Instant::now();

        info!(
            "Starting rating run - players: {}, games: {}, baseline ratings: {}",
            inputs.players.len(),
            inputs.games.len(),
            inputs.baseline.len()
        );

        let result = self.evaluate(inputs, labels);
        let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        match &result {
            Ok(report) => info!(
                "Rating run completed - changes: {}, new ratings: {}, time: {:.2}ms",
                report.changes.len(),
                report.new_ratings.len(),
                elapsed_ms
            ),
            Err(e) => error!("Rating run failed after {:.2}ms: {}", elapsed_ms, e),
        }

        result
    }

    /// Load inputs from disk, run, and publish every output
    ///
    /// Returns the report and the path of the rendered page. Nothing is
    /// written when loading, rating or publishing fails.
    pub fn run_and_publish(
        &self,
        inputs: &InputPaths,
        outputs: &OutputPaths,
        labels: &dyn LabelResolver,
        format: OutputFormat,
    ) -> Result<(RunReport, PathBuf)> {
        let inputs = RunInputs::load(inputs)?;
        let report = self.run(&inputs, labels)?;

        let page = render(
            &report.view,
            format,
            self.config.leaderboard.rating_precision,
        );
        let page_path = outputs.publish(
            &report.changes,
            &report.new_ratings,
            format.file_name(),
            &page,
        )?;

        info!(
            "Wrote {} rating changes, {} new ratings and {}",
            report.changes.len(),
            report.new_ratings.len(),
            page_path.display()
        );
        Ok((report, page_path))
    }

    fn evaluate(&self, inputs: &RunInputs, labels: &dyn LabelResolver) -> RatingResult<RunReport> {
        let k_factors = KValueTable::new(&inputs.k_values)?;
        let baseline = BaselineRatings::new(&inputs.baseline)?;

        let known: HashSet<&str> = inputs.players.iter().map(|p| p.id.as_str()).collect();
        for record in &inputs.baseline {
            if !known.contains(record.player_id.as_str()) {
                warn!(
                    "Baseline rating for {} in {} has no matching player",
                    record.player_id, record.discipline
                );
            }
        }

        let run = self
            .engine
            .run(&inputs.players, &inputs.games, &k_factors, &baseline)?;

        let board_ratings = if self.config.leaderboard.show_baseline_ratings {
            merge_ratings(&inputs.baseline, &run.new_ratings)
        } else {
            run.new_ratings.clone()
        };

        let table = EloRatingTable::new(inputs.players.clone(), &run.changes, &board_ratings);
        let view = LeaderboardView::build(&table, labels, &self.config.leaderboard)?;

        Ok(RunReport {
            changes: run.changes,
            new_ratings: run.new_ratings,
            view,
        })
    }
}
