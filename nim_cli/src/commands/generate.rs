use crate::io::FileOrStdout;
use anyhow::{Context, Result};
use clap::{self, Parser};
use nim::{board::Board, config::GenerationConfig};
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::io::Write;

/// Generate random starting positions.
#[derive(Parser, Debug)]
pub struct Args {
    /// Number of heaps
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(3..=7))]
    heaps: u8,

    /// Number of boards to generate
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Seed of the random generator. Fresh entropy is used if absent
    #[arg(long)]
    seed: Option<u64>,

    /// Smallest initial heap size
    #[arg(long, default_value_t = GenerationConfig::default().min_value)]
    min_value: u32,

    /// Largest initial heap size
    #[arg(long, default_value_t = GenerationConfig::default().max_value)]
    max_value: u32,

    /// Minimal number of different heap sizes on a board
    #[arg(long, default_value_t = GenerationConfig::default().min_distinct)]
    min_distinct: usize,

    /// Path to output file, `-` for stdout
    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

#[derive(Debug, Serialize)]
struct Report {
    position: String,
    board: Board,
    nim_sum: String,
    losing: bool,
}

pub fn run(args: Args) -> Result<()> {
    let config = GenerationConfig {
        min_value: args.min_value,
        max_value: args.max_value,
        min_distinct: args.min_distinct,
    };
    config
        .validate(args.heaps as usize)
        .context("Invalid generation parameters")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut output = args.output.create().context("Could not open output file")?;
    for _ in 0..args.count {
        let board = Board::random_with(&config, args.heaps as usize, &mut rng)?;
        let report = Report {
            position: board.to_string(),
            nim_sum: board.nim_sum().to_string(),
            losing: board.is_losing(),
            board,
        };
        writeln!(output, "{}", serde_json::ser::to_string(&report)?)?;
    }

    Ok(())
}
