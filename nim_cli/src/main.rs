use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;

#[cfg(not(windows))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

#[derive(Subcommand, Debug)]
enum Command {
    BestMove(best_move::Args),
    Generate(generate::Args),
    SelfPlay(self_play::Args),
}

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::BestMove(args) => best_move::run(args),
        Command::Generate(args) => generate::run(args),
        Command::SelfPlay(args) => self_play::run(args),
    }
}
