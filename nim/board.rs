//! Nim board: a fixed number of heaps holding tokens.
//!
//! Players alternately pick a single heap and remove at least one token from it. The player
//! who takes the last token wins.

use crate::{
    bot::Action,
    config::GenerationConfig,
    display,
    error::{Error, Result},
    impartial::ImpartialGame,
    numeric::nimber::Nimber,
};
use ahash::AHashSet;
use log::{debug, trace};
use rand::Rng;
use std::fmt::Display;

/// Nim position. Number of heaps is fixed for the lifetime of the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    heaps: Vec<u32>,
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nim")?;
        display::brackets(f, |f| display::commas(f, self.heaps()))
    }
}

impl Board {
    /// Create a board with given heap sizes. No randomization and no distinctness constraint.
    #[inline]
    pub const fn new(heaps: Vec<u32>) -> Self {
        Self { heaps }
    }

    /// Create a board from signed heap sizes.
    ///
    /// # Errors
    /// - Any value is negative
    pub fn try_from_signed(values: &[i64]) -> Result<Self> {
        let heaps = values
            .iter()
            .enumerate()
            .map(|(heap, &value)| {
                u32::try_from(value).map_err(|_| Error::InvalidValue { heap, value })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(heaps))
    }

    /// Create a random board with `heap_count` heaps using [`GenerationConfig::default`], i.e.
    /// heap sizes from 1 to 10 and at least 3 different sizes.
    ///
    /// # Errors
    /// - `heap_count` is smaller than 3, so 3 different sizes are unreachable
    pub fn random<R>(heap_count: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Self::random_with(&GenerationConfig::default(), heap_count, rng)
    }

    /// Create a random board with `heap_count` heaps.
    ///
    /// Every heap is drawn uniformly from the configured range and the whole board is drawn again
    /// until it has enough different heap sizes. The configuration is validated up front, so the
    /// loop ends with probability 1.
    ///
    /// # Errors
    /// - Config is invalid or cannot reach the required number of distinct values, see
    ///   [`GenerationConfig::validate`]
    pub fn random_with<R>(config: &GenerationConfig, heap_count: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        config.validate(heap_count)?;

        let mut heaps = vec![0; heap_count];
        let mut seen = AHashSet::with_capacity(heap_count);
        let mut attempts = 1usize;
        loop {
            seen.clear();
            for heap in &mut heaps {
                *heap = rng.random_range(config.min_value..=config.max_value);
                seen.insert(*heap);
            }

            if seen.len() >= config.min_distinct {
                break;
            }

            trace!(
                "Rejected {:?}: {} distinct values, need {}",
                heaps,
                seen.len(),
                config.min_distinct
            );
            attempts += 1;
        }

        let board = Self::new(heaps);
        debug!("Generated {} after {} attempt(s)", board, attempts);
        Ok(board)
    }

    fn check_index(&self, heap: usize) -> Result<()> {
        if heap >= self.heaps.len() {
            return Err(Error::IndexOutOfRange {
                heap,
                heap_count: self.heaps.len(),
            });
        }
        Ok(())
    }

    /// Overwrite the number of tokens on a heap. Any non-negative value is accepted, use
    /// [`Board::apply`] to enforce legal moves.
    ///
    /// # Errors
    /// - `heap` is out of range
    pub fn set(&mut self, heap: usize, value: u32) -> Result<()> {
        self.check_index(heap)?;
        self.heaps[heap] = value;
        Ok(())
    }

    /// Get the number of tokens on a heap
    ///
    /// # Errors
    /// - `heap` is out of range
    pub fn get(&self, heap: usize) -> Result<u32> {
        self.check_index(heap)?;
        Ok(self.heaps[heap])
    }

    /// Number of heaps, including empty ones
    #[inline]
    pub fn heap_count(&self) -> usize {
        self.heaps.len()
    }

    /// Get heap sizes in order
    #[inline]
    pub fn heaps(&self) -> &[u32] {
        &self.heaps
    }

    /// Check if every heap is empty
    pub fn is_game_over(&self) -> bool {
        self.heaps.iter().all(|&heap| heap == 0)
    }

    /// Nim sum of all heaps, i.e. the value of the position
    pub fn nim_sum(&self) -> Nimber {
        self.heaps.iter().copied().map(Nimber::from).sum()
    }

    /// Check if the player to move loses against perfect play
    pub fn is_losing(&self) -> bool {
        self.nim_sum().is_zero()
    }

    /// Get every legal move from the position, heap by heap
    pub fn legal_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.heaps
            .iter()
            .enumerate()
            .flat_map(|(heap, &value)| (0..value).map(move |amount| Action { heap, amount }))
    }

    /// Play a move: the targeted heap must exist and lose at least one token.
    ///
    /// # Errors
    /// - `action.heap` is out of range
    /// - `action.amount` is not smaller than the current heap size
    pub fn apply(&mut self, action: Action) -> Result<()> {
        let current = self.get(action.heap)?;
        if action.amount >= current {
            return Err(Error::IllegalMove {
                heap: action.heap,
                current,
                amount: action.amount,
            });
        }
        self.heaps[action.heap] = action.amount;
        Ok(())
    }
}

impl ImpartialGame for Board {
    fn moves(&self) -> Vec<Self> {
        self.legal_actions()
            .map(|action| {
                let mut next = self.clone();
                next.heaps[action.heap] = action.amount;
                next
            })
            .collect()
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Board {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let heap_count = usize::arbitrary(g) % 8;
        let heaps = (0..heap_count).map(|_| u32::arbitrary(g) % 21).collect();
        Board::new(heaps)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.heaps.shrink().map(Board::new))
    }
}
