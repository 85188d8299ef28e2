use crate::io::FileOrStdout;
use anyhow::{Context, Result, bail};
use clap::{self, Parser};
use nim::{
    board::Board,
    bot::{Action, Bot},
};
use serde::Serialize;
use std::io::Write;

/// Compute the bot's move on a given position.
#[derive(Parser, Debug)]
pub struct Args {
    /// Comma separated list of heap sizes
    #[arg(long, num_args=1.., value_delimiter=',', allow_negative_numbers = true)]
    heaps: Vec<i64>,

    /// Path to output file, `-` for stdout
    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

#[derive(Debug, Serialize)]
struct Report {
    position: String,
    nim_sum: String,
    losing: bool,
    action: Action,
    removed: u32,
}

pub fn run(args: Args) -> Result<()> {
    if args.heaps.is_empty() {
        bail!("Position cannot be empty. Use --heaps a,b,... to specify it.");
    }

    let board = Board::try_from_signed(&args.heaps).context("Invalid position")?;
    let action = Bot::next_action(&board).context("Could not pick a move")?;
    let report = Report {
        position: board.to_string(),
        nim_sum: board.nim_sum().to_string(),
        losing: board.is_losing(),
        action,
        removed: action.removed(&board)?,
    };

    let mut output = args.output.create().context("Could not open output file")?;
    writeln!(output, "{}", serde_json::ser::to_string(&report)?)?;
    Ok(())
}
