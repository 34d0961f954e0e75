//! Samples per-gene-pool fitness logs written by the chemistry simulator.
//!
//! A simulation run leaves one `fitness.csv` per gene pool under
//! `data/experiments/<key>/gene_pools/gene_pool_<id>/`, one row per tick.
//! [`pipeline::run`] keeps every 100th generation and writes the rows to a
//! single flat `data/<key>_<id>.csv` for plotting.

pub mod data;
pub mod error;
pub mod pipeline;
pub mod settings;

pub use error::ProcessError;
pub use pipeline::{run, RunOutcome, RunSummary};
pub use settings::Settings;
