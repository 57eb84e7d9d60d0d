//! JSON record storage
//!
//! Every input and output file is a JSON array of records. Outputs are written
//! to a sibling temporary file and renamed into place. A run's outputs are all
//! staged before the first rename, so a failed write leaves none of them behind.

use crate::error::Result;
use crate::types::{Game, KValueSet, Player, RatingChangeRecord, RatingRecord};
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read a JSON array of records
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records: Vec<T> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Write records as a pretty-printed JSON array
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = to_json(path, records)?;
    write_atomic(path, json.as_bytes())?;

    debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write `content` to a temporary sibling and rename it over `path`
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    StagedFile::write(path, content)?.commit()
}

/// Content written next to its destination, not yet renamed into place
#[derive(Debug)]
struct StagedFile {
    tmp: PathBuf,
    path: PathBuf,
}

impl StagedFile {
    fn write(path: &Path, content: &[u8]) -> Result<Self> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
        Ok(Self {
            tmp,
            path: path.to_path_buf(),
        })
    }

    fn commit(&self) -> Result<()> {
        fs::rename(&self.tmp, &self.path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                self.tmp.display(),
                self.path.display()
            )
        })
    }

    fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.tmp) {
            warn!("Failed to remove {}: {}", self.tmp.display(), e);
        }
    }
}

fn to_json<T: Serialize>(path: &Path, records: &[T]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .with_context(|| format!("Failed to serialize records for {}", path.display()))
}

/// Input file locations for one run
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub players: PathBuf,
    pub k_values: PathBuf,
    pub baseline: PathBuf,
    pub games: PathBuf,
}

/// Everything a run reads, fully loaded before any computation starts
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub players: Vec<Player>,
    pub k_values: Vec<KValueSet>,
    pub baseline: Vec<RatingRecord>,
    pub games: Vec<Game>,
}

impl RunInputs {
    pub fn load(paths: &InputPaths) -> Result<Self> {
        Ok(Self {
            players: read_records(&paths.players)?,
            k_values: read_records(&paths.k_values)?,
            baseline: read_records(&paths.baseline)?,
            games: read_records(&paths.games)?,
        })
    }
}

/// Output file locations for one run
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub new_ratings: PathBuf,
    pub rating_changes: PathBuf,
    pub output_dir: PathBuf,
}

impl OutputPaths {
    /// Path of a rendered page inside the output directory
    pub fn page_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Write rating changes, new ratings and the rendered page
    ///
    /// All three are staged first and only renamed into place once every one
    /// of them has been written. If any write fails the staged files are
    /// removed and no output file is touched.
    pub fn publish(
        &self,
        changes: &[RatingChangeRecord],
        new_ratings: &[RatingRecord],
        file_name: &str,
        page: &str,
    ) -> Result<PathBuf> {
        let page_path = self.page_path(file_name);
        let mut staged = Vec::with_capacity(3);

        let result = self
            .stage(changes, new_ratings, &page_path, page, &mut staged)
            .and_then(|()| staged.iter().try_for_each(StagedFile::commit));

        if let Err(e) = result {
            staged
                .iter()
                .filter(|file| file.tmp.exists())
                .for_each(StagedFile::discard);
            return Err(e);
        }

        debug!(
            "Published {} changes, {} new ratings and {}",
            changes.len(),
            new_ratings.len(),
            page_path.display()
        );
        Ok(page_path)
    }

    fn stage(
        &self,
        changes: &[RatingChangeRecord],
        new_ratings: &[RatingRecord],
        page_path: &Path,
        page: &str,
        staged: &mut Vec<StagedFile>,
    ) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;

        let changes_json = to_json(&self.rating_changes, changes)?;
        let ratings_json = to_json(&self.new_ratings, new_ratings)?;

        staged.push(StagedFile::write(&self.rating_changes, changes_json.as_bytes())?);
        staged.push(StagedFile::write(&self.new_ratings, ratings_json.as_bytes())?);
        staged.push(StagedFile::write(page_path, page.as_bytes())?);
        Ok(())
    }
}
