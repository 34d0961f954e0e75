use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use fitness_sampler::data::paths::PathKey;

/// Write synthetic `fitness.csv` logs shaped like the simulator's output.
///
/// Each row is `tick,p0,p25,p75,p100`: the 0th, 25th, 75th and 100th
/// percentile of the gene pool's genome fitness scores at that tick.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Experiment key to write under
    #[arg(default_value = "sample_experiment")]
    experiment_key: String,

    /// Directory containing `experiments/`
    #[arg(long, default_value = "data")]
    data_root: PathBuf,

    /// Number of gene pools
    #[arg(long, default_value = "3")]
    pools: u32,

    /// Ticks logged per gene pool
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Genomes per gene pool
    #[arg(long, default_value = "40")]
    genomes: usize,

    #[arg(long, default_value = "42")]
    seed: u64,
}

const PERCENTILES: [u8; 4] = [0, 25, 75, 100];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Fitness climbs roughly logarithmically with the tick, with per-genome
/// spread. Scores are non-negative integers like the simulator's.
fn genome_scores(tick: u64, pool_skill: f64, genomes: usize, rng: &mut SimpleRng) -> Vec<u64> {
    let mean = pool_skill * ((tick + 1) as f64).ln() * 100.0;
    (0..genomes)
        .map(|_| rng.gauss(mean, mean * 0.25 + 1.0).max(0.0).round() as u64)
        .collect()
}

/// Picks `values[((n - 1) * p) / 100]` from the sorted scores for each `p`.
fn percentiles(values: &mut [u64], percentiles: &[u8]) -> Vec<u64> {
    if values.is_empty() {
        return Vec::new();
    }
    values.sort_unstable();
    percentiles
        .iter()
        .map(|&p| values[((values.len() - 1) * p as usize) / 100])
        .collect()
}

fn render_log(ticks: u64, pool_skill: f64, genomes: usize, rng: &mut SimpleRng) -> String {
    let mut out = String::new();
    for tick in 0..ticks {
        let mut scores = genome_scores(tick, pool_skill, genomes, rng);
        let pcts = percentiles(&mut scores, &PERCENTILES);
        let cols: Vec<String> = pcts.iter().map(u64::to_string).collect();
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{tick},{}", cols.join(","));
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.genomes == 0 {
        bail!("--genomes must be at least 1");
    }

    let mut rng = SimpleRng::new(args.seed);

    for pool in 0..args.pools {
        let key = PathKey::new(&args.experiment_key, pool)?;
        let path = key.source_path(&args.data_root);
        let dir = path.parent().context("fitness path has no parent")?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;

        let pool_skill = 1.0 + 0.5 * pool as f64;
        let text = render_log(args.ticks, pool_skill, args.genomes, &mut rng);
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;

        println!("Wrote {} ticks for gene pool {pool} to {}", args.ticks, path.display());
    }

    Ok(())
}
