use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::Deserialize;

use super::model::{Cell, Record, RecordSet};
use crate::error::{ProcessError, Result};

/// Generations kept when no interval is configured: 0, 100, 200, ...
pub const DEFAULT_SAMPLING_INTERVAL: i64 = 100;

// ---------------------------------------------------------------------------
// UnparsablePolicy – what to do when the generation index is not a number
// ---------------------------------------------------------------------------

/// Handling for rows whose first field has no leading digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnparsablePolicy {
    /// Remove the row without complaint.
    #[default]
    Drop,
    /// Abort the run with [`ProcessError::UnparsableGeneration`].
    Fail,
    /// Treat the index as generation 0 and keep the row.
    CoerceToZero,
}

impl FromStr for UnparsablePolicy {
    type Err = ProcessError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "drop" => Ok(UnparsablePolicy::Drop),
            "fail" => Ok(UnparsablePolicy::Fail),
            "coerce-to-zero" => Ok(UnparsablePolicy::CoerceToZero),
            other => Err(ProcessError::InvalidSetting(format!(
                "unknown unparsable-row policy '{other}' (expected drop, fail or coerce-to-zero)"
            ))),
        }
    }
}

impl fmt::Display for UnparsablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnparsablePolicy::Drop => "drop",
            UnparsablePolicy::Fail => "fail",
            UnparsablePolicy::CoerceToZero => "coerce-to-zero",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Generation sampling
// ---------------------------------------------------------------------------

/// Keep the records whose generation index is a multiple of `interval`.
///
/// Output is a subsequence of the input: order is preserved and duplicate
/// indices are all kept. `interval` must be positive.
pub fn sample_generations(
    set: &RecordSet,
    interval: i64,
    policy: UnparsablePolicy,
) -> Result<RecordSet> {
    if interval <= 0 {
        return Err(ProcessError::InvalidSetting(format!(
            "sampling interval must be positive, got {interval}"
        )));
    }

    let mut kept = Vec::new();
    for record in set.iter() {
        match record.generation() {
            Cell::Int(generation) => {
                if generation % interval == 0 {
                    kept.push(record.clone());
                }
            }
            Cell::Unparsable => match policy {
                UnparsablePolicy::Drop => {}
                UnparsablePolicy::Fail => {
                    return Err(ProcessError::UnparsableGeneration { line: record.line });
                }
                UnparsablePolicy::CoerceToZero => {
                    warn!("line {}: unparsable generation index read as 0", record.line);
                    kept.push(coerce_generation(record));
                }
            },
        }
    }

    Ok(RecordSet::from_records(kept))
}

fn coerce_generation(record: &Record) -> Record {
    let mut cells = record.cells.clone();
    match cells.first_mut() {
        Some(first) => *first = Cell::Int(0),
        None => cells.push(Cell::Int(0)),
    }
    Record::new(record.line, cells)
}
