//! Error types

use thiserror::Error;

/// Errors raised by board, bot and game operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Heap index does not point into the board
    #[error("heap index {heap} out of range, board has {heap_count} heaps")]
    IndexOutOfRange {
        /// Requested heap
        heap: usize,
        /// Number of heaps on the board
        heap_count: usize,
    },

    /// Heap value is negative
    #[error("invalid value {value} for heap {heap}, heap sizes cannot be negative")]
    InvalidValue {
        /// Heap the value was meant for
        heap: usize,
        /// Rejected value
        value: i64,
    },

    /// Move requested on a board without heaps
    #[error("board has no heaps")]
    EmptyBoard,

    /// Random generation can never reach the required number of distinct heap values
    #[error(
        "cannot generate {min_distinct} distinct heap values with {heap_count} heaps and {distinct_values} possible values"
    )]
    NonTerminatingGeneration {
        /// Requested number of heaps
        heap_count: usize,
        /// Number of different values a single heap can take
        distinct_values: u32,
        /// Required number of distinct values on the board
        min_distinct: usize,
    },

    /// Generation parameters are inconsistent
    #[error("invalid generation config: {message}")]
    InvalidConfig {
        /// What is wrong with the config
        message: String,
    },

    /// Every heap is already empty
    #[error("game already over")]
    GameOver,

    /// Move that does not remove at least one token from an existing heap
    #[error("illegal move: heap {heap} holds {current} tokens, cannot leave {amount}")]
    IllegalMove {
        /// Targeted heap
        heap: usize,
        /// Tokens currently on the heap
        current: u32,
        /// Tokens the move wanted to leave on the heap
        amount: u32,
    },

    /// Move submitted out of turn
    #[error("not your turn")]
    NotYourTurn,
}

/// Result alias for this crate
pub type Result<T> = std::result::Result<T, Error>;
