use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};

use fitness_sampler::data::filter::UnparsablePolicy;
use fitness_sampler::{run, Settings};

/// Keep every 100th generation of a gene pool's fitness log.
///
/// Reads `<data-root>/experiments/<KEY>/gene_pools/gene_pool_<ID>/fitness.csv`
/// and writes `<output-dir>/<KEY>_<ID>.csv`.
#[derive(Parser, Debug)]
#[command(name = "fitness-sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Experiment key (directory under `experiments/`)
    experiment_key: String,

    /// Gene pool id
    gene_pool_id: String,

    /// JSON settings file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing `experiments/` (default: ./data or ../data)
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Directory the sampled file is written to (default: ./data)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep generations that are a multiple of this (default: 100)
    #[arg(short, long)]
    interval: Option<i64>,

    /// What to do with rows whose generation index is not a number
    #[arg(long, value_parser = parse_policy)]
    on_unparsable: Option<UnparsablePolicy>,
}

fn parse_policy(s: &str) -> std::result::Result<UnparsablePolicy, String> {
    s.parse().map_err(|e: fitness_sampler::ProcessError| e.to_string())
}

fn build_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(root) = &cli.data_root {
        settings.data_root = root.clone();
    }
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = dir.clone();
    }
    if let Some(interval) = cli.interval {
        settings.sampling_interval = interval;
    }
    if let Some(policy) = cli.on_unparsable {
        settings.on_unparsable = policy;
    }

    settings.validate().context("validating settings")?;
    Ok(settings)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let cli = Cli::parse();

    let settings = match build_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("settings: {settings:?}");

    let outcome = run(&cli.experiment_key, &cli.gene_pool_id, &settings);
    if outcome.is_done() {
        println!("done");
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
