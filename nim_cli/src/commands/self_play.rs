use crate::io::{FileOrStderr, FileOrStdout};
use anyhow::{Context, Result};
use clap::{self, Parser, ValueEnum};
use nim::{
    board::Board,
    bot::{Action, Bot, RandomPlayer, Strategy},
    game::{Game, Player},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Opponent {
    Random,
    Optimal,
}

impl Strategy for Opponent {
    fn choose_action<R>(&self, board: &Board, rng: &mut R) -> nim::Result<Action>
    where
        R: Rng + ?Sized,
    {
        match self {
            Opponent::Random => RandomPlayer.choose_action(board, rng),
            Opponent::Optimal => Bot.choose_action(board, rng),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum First {
    Opponent,
    Bot,
}

/// Play the bot against an opponent on random boards and report how often it wins.
#[derive(Parser, Debug)]
pub struct Args {
    /// Number of heaps
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(3..=7))]
    heaps: u8,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Seed of the first game, game `i` is played with seed `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// Who makes the first move
    #[arg(long, value_enum, default_value_t = First::Opponent)]
    first: First,

    /// Number of worker threads, rayon default if absent
    #[arg(long)]
    threads: Option<u32>,

    /// Path to per-game logs, `-` for stderr. No logs if absent
    #[arg(long)]
    log_file: Option<FileOrStderr>,

    /// Path to output file, `-` for stdout
    #[arg(long, default_value = "-")]
    output: FileOrStdout,
}

#[derive(Debug, Serialize)]
struct Log {
    game: u64,
    seed: u64,
    finished_at: String,
    start: Board,
    bot_to_win: bool,
    moves: Vec<Action>,
    bot_won: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    games: u64,
    bot_wins: u64,
    opponent_wins: u64,
    bot_starts_to_win: u64,
    bot_lost_won_position: u64,
}

// Opponent always sits in the human seat
fn play_game(args: &Args, game: u64) -> Result<Log> {
    let seed = args.seed.wrapping_add(game);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Board::random(args.heaps as usize, &mut rng)?;
    let first = match args.first {
        First::Opponent => Player::Human,
        First::Bot => Player::Computer,
    };
    let bot_to_win = match first {
        Player::Human => start.is_losing(),
        Player::Computer => !start.is_losing(),
    };

    let mut session = Game::with_first(start.clone(), first);
    let winner = session
        .play_out(&args.opponent, &Bot, &mut rng)
        .with_context(|| format!("Game {game} on {start} failed"))?;

    Ok(Log {
        game,
        seed,
        finished_at: chrono::offset::Utc::now().to_rfc3339(),
        start,
        bot_to_win,
        moves: session.history().iter().map(|m| m.action).collect(),
        bot_won: winner == Player::Computer,
    })
}

pub fn run(args: Args) -> Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build_global()
            .context("Could not build the thread pool")?;
    }

    let logs = (0..args.games)
        .into_par_iter()
        .map(|game| play_game(&args, game))
        .collect::<Result<Vec<_>>>()?;

    if let Some(log_file) = &args.log_file {
        let mut log_writer = log_file.create().context("Could not open log file")?;
        for log in &logs {
            writeln!(log_writer, "{}", serde_json::ser::to_string(log)?)?;
        }
    }

    let bot_wins = logs.iter().filter(|log| log.bot_won).count() as u64;
    let summary = Summary {
        games: args.games,
        bot_wins,
        opponent_wins: args.games - bot_wins,
        bot_starts_to_win: logs.iter().filter(|log| log.bot_to_win).count() as u64,
        bot_lost_won_position: logs
            .iter()
            .filter(|log| log.bot_to_win && !log.bot_won)
            .count() as u64,
    };

    let mut output = args.output.create().context("Could not open output file")?;
    writeln!(output, "{}", serde_json::ser::to_string(&summary)?)?;
    Ok(())
}
