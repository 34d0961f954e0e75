use std::fmt;
use std::path::PathBuf;

use log::{error, info};

use crate::data::filter::sample_generations;
use crate::data::loader::load_file;
use crate::data::paths::PathKey;
use crate::data::writer::{serialize, write_file};
use crate::error::Result;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// A run ends `Done` or `Failed`; there are no retries or partial states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Done(RunSummary),
    /// The logged error message.
    Failed(String),
}

impl RunOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, RunOutcome::Done(_))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Sample one gene pool's fitness log down to every `sampling_interval`-th
/// generation and write it to `<output_dir>/<key>_<id>.csv`.
///
/// Never returns an error: failures are logged and reported as
/// [`RunOutcome::Failed`]. Nothing is written unless the source was read and
/// filtered successfully.
pub fn run(
    experiment_key: &str,
    gene_pool_id: impl fmt::Display,
    settings: &Settings,
) -> RunOutcome {
    let gene_pool_id = gene_pool_id.to_string();
    match try_run(experiment_key, &gene_pool_id, settings) {
        Ok(summary) => {
            info!(
                "{experiment_key}/{gene_pool_id}: kept {} of {} rows, wrote {}",
                summary.rows_kept,
                summary.rows_read,
                summary.output.display()
            );
            RunOutcome::Done(summary)
        }
        Err(e) => {
            error!("Failed to process {experiment_key}/{gene_pool_id}: {e:#}");
            RunOutcome::Failed(e.to_string())
        }
    }
}

fn try_run(
    experiment_key: &str,
    gene_pool_id: &str,
    settings: &Settings,
) -> Result<RunSummary> {
    settings.validate()?;
    let key = PathKey::new(experiment_key, gene_pool_id)?;

    let source = key.source_path(&settings.data_root);
    let records = load_file(&source)?;

    let kept = sample_generations(
        &records,
        settings.sampling_interval,
        settings.on_unparsable,
    )?;
    let text = serialize(&kept)?;

    let output = key.output_path(&settings.output_dir);
    write_file(&output, &text)?;

    Ok(RunSummary {
        source,
        output,
        rows_read: records.len(),
        rows_kept: kept.len(),
    })
}
