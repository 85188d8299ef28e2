//! Multi-heap Nim.
//!
//! The crate holds the [board](crate::board::Board) state model with its randomized
//! generation procedure, the [optimal opponent](crate::bot::Bot) that plays by the
//! Nim-sum rule, and a [game session](crate::game::Game) that sequences human and
//! computer moves.

#![warn(missing_docs)]

pub mod board;
pub mod bot;
pub mod config;
pub mod error;
pub mod game;
pub mod impartial;
pub mod numeric;

mod display;

pub use error::{Error, Result};
