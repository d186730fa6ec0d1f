use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spiremap_core::vectors::{load_vectors, write_vectors, ExitVector};
use spiremap_core::Map;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the map for a seed and print its exit encoding
    Render {
        #[arg(short, long)]
        seed: u64,
        #[arg(short, long, default_value_t = 0)]
        ascension: i32,
        #[arg(long, default_value_t = 1)]
        act: i32,
        /// Tag one elite node as burning
        #[arg(long)]
        burning: bool,
    },
    /// Generate a JSONL corpus of exit encodings across a seed range
    GenVectors {
        #[arg(long, default_value_t = 1)]
        start: u64,
        #[arg(long, default_value_t = 100)]
        count: u64,
        #[arg(short, long, default_value_t = 0)]
        ascension: i32,
        #[arg(long, default_value_t = 1)]
        act: i32,
        /// Path of the corpus file to write
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Regenerate every corpus entry and compare encodings
    Verify {
        #[arg(short, long)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Render { seed, ascension, act, burning } => {
            let map = if act == 4 {
                Map::act4()
            } else {
                Map::from_seed(seed, ascension, act, burning)
            };
            println!("{map}");
            println!();
            println!("{}", map.write_exit_data());
        }
        Commands::GenVectors { start, count, ascension, act, out } => {
            if !(1..=3).contains(&act) {
                bail!("vector corpora cover acts 1 through 3; act 4 is constant");
            }
            let vectors: Vec<ExitVector> = (start..start + count)
                .map(|seed| ExitVector::capture(seed, ascension, act))
                .collect();
            write_vectors(&out, &vectors)
                .with_context(|| format!("failed to write corpus to {}", out.display()))?;
            println!("Wrote {} vectors to {}", vectors.len(), out.display());
        }
        Commands::Verify { path } => {
            let vectors = load_vectors(&path)
                .map_err(|e| anyhow::anyhow!("failed to load corpus {}: {e}", path.display()))?;
            let mismatches: Vec<u64> = vectors
                .iter()
                .filter(|vector| !vector.still_matches())
                .map(|vector| vector.seed)
                .collect();
            if !mismatches.is_empty() {
                bail!("{} of {} vectors diverged, seeds: {mismatches:?}", mismatches.len(), vectors.len());
            }
            println!("All {} vectors match.", vectors.len());
        }
    }
    Ok(())
}
