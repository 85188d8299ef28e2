//! Computer opponent.
//!
//! [`Bot`] plays by the Nim-sum rule: a position is lost for the player to move iff the xor of
//! all heaps is zero, so a winning move is one that leaves the opponent with zero Nim sum.

use crate::{
    board::Board,
    error::{Error, Result},
    numeric::nimber::Nimber,
};
use itertools::Itertools;
use log::debug;
use rand::{Rng, seq::IteratorRandom};
use std::{cmp::Reverse, fmt::Display};

/// A move: heap `heap` is left holding `amount` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    /// Index of the heap to take from
    pub heap: usize,

    /// Tokens remaining on the heap after the move
    pub amount: u32,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "heap {} -> {}", self.heap, self.amount)
    }
}

impl Action {
    /// Construct new action
    #[inline]
    pub const fn new(heap: usize, amount: u32) -> Self {
        Self { heap, amount }
    }

    /// Number of tokens the action takes when played on `board`
    ///
    /// # Errors
    /// - Heap is out of range
    /// - Action would add tokens to the heap
    pub fn removed(&self, board: &Board) -> Result<u32> {
        let current = board.get(self.heap)?;
        current.checked_sub(self.amount).ok_or(Error::IllegalMove {
            heap: self.heap,
            current,
            amount: self.amount,
        })
    }
}

/// Heap value together with its position on the board
#[derive(Debug, Clone, Copy)]
struct IndexValue {
    index: usize,
    value: u32,
}

/// Move selection policy
pub trait Strategy {
    /// Pick a move for the player to move on `board`
    ///
    /// # Errors
    /// - Board has no heaps
    /// - Every heap is empty
    fn choose_action<R>(&self, board: &Board, rng: &mut R) -> Result<Action>
    where
        R: Rng + ?Sized;
}

/// Deterministic opponent playing optimal Nim
#[derive(Debug, Clone, Copy, Default)]
pub struct Bot;

impl Bot {
    /// Compute the move for the player to move.
    ///
    /// Heaps are tried from the largest one, ties in original order. The first heap that can be
    /// reduced to zero the Nim sum is picked. When no such heap exists the position is already
    /// lost and the bot takes a single token from the largest heap.
    ///
    /// # Errors
    /// - Board has no heaps
    /// - Every heap is empty
    pub fn next_action(board: &Board) -> Result<Action> {
        let sorted = board
            .heaps()
            .iter()
            .enumerate()
            .map(|(index, &value)| IndexValue { index, value })
            .sorted_by_key(|heap| Reverse(heap.value))
            .collect::<Vec<_>>();

        let largest = *sorted.first().ok_or(Error::EmptyBoard)?;
        if largest.value == 0 {
            return Err(Error::GameOver);
        }

        let total = board.nim_sum();
        for heap in sorted.iter().take_while(|heap| heap.value != 0) {
            // Only `rem == rest` satisfies `rem ^ rest == 0`, it is reachable iff it is smaller
            // than the heap
            let rest = total - Nimber::new(heap.value);
            if rest.value() < heap.value {
                let action = Action::new(heap.index, rest.value());
                debug!("Winning move on {}: {}", board, action);
                return Ok(action);
            }
        }

        let action = Action::new(largest.index, largest.value - 1);
        debug!("No winning move on {}, falling back to {}", board, action);
        Ok(action)
    }
}

impl Strategy for Bot {
    fn choose_action<R>(&self, board: &Board, _rng: &mut R) -> Result<Action>
    where
        R: Rng + ?Sized,
    {
        Bot::next_action(board)
    }
}

/// Opponent picking uniformly among all legal moves
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayer;

impl Strategy for RandomPlayer {
    fn choose_action<R>(&self, board: &Board, rng: &mut R) -> Result<Action>
    where
        R: Rng + ?Sized,
    {
        if board.heap_count() == 0 {
            return Err(Error::EmptyBoard);
        }
        board.legal_actions().choose(rng).ok_or(Error::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impartial::ImpartialGame;
    use quickcheck::QuickCheck;
    use rand::{SeedableRng, rngs::StdRng};

    fn play(board: &Board) -> Board {
        let action = Bot::next_action(board).unwrap();
        let mut next = board.clone();
        next.apply(action).unwrap();
        next
    }

    #[test]
    fn winning_position() {
        let action = Bot::next_action(&Board::new(vec![1, 2])).unwrap();
        assert_eq!(action, Action::new(1, 1));

        let action = Bot::next_action(&Board::new(vec![6, 3, 7])).unwrap();
        assert_eq!(action, Action::new(2, 5));
    }

    #[test]
    fn losing_position() {
        let action = Bot::next_action(&Board::new(vec![0, 4, 4])).unwrap();
        assert_eq!(action.amount, 3);
        assert!(action.heap == 1 || action.heap == 2);
    }

    #[test]
    fn fallback_takes_from_first_largest_heap() {
        let action = Bot::next_action(&Board::new(vec![1, 2, 3, 3, 2, 1])).unwrap();
        assert_eq!(action, Action::new(2, 2));
    }

    #[test]
    fn single_heap_is_emptied() {
        let action = Bot::next_action(&Board::new(vec![0, 0, 9, 0])).unwrap();
        assert_eq!(action, Action::new(2, 0));
    }

    #[test]
    fn ties_pick_lowest_index() {
        // Both heaps of 5 can be reduced to 4, first one in board order wins
        let action = Bot::next_action(&Board::new(vec![5, 5, 1])).unwrap();
        assert_eq!(action, Action::new(0, 4));
    }

    #[test]
    fn no_move_without_tokens() {
        assert_eq!(Bot::next_action(&Board::new(vec![])), Err(Error::EmptyBoard));
        assert_eq!(
            Bot::next_action(&Board::new(vec![0, 0, 0])),
            Err(Error::GameOver)
        );
    }

    #[test]
    fn action_removed() {
        let board = Board::new(vec![6, 3, 7]);
        assert_eq!(Action::new(2, 5).removed(&board), Ok(2));
        assert_eq!(
            Action::new(1, 4).removed(&board),
            Err(Error::IllegalMove {
                heap: 1,
                current: 3,
                amount: 4
            })
        );
        assert_eq!(Action::new(2, 5).to_string(), "heap 2 -> 5");
    }

    /// Cross check against exhaustive Sprague-Grundy evaluation
    #[test]
    fn winning_move_leads_to_zero_position() {
        for a in 0..=3 {
            for b in 0..=3 {
                for c in 0..=3 {
                    let board = Board::new(vec![a, b, c]);
                    if board.nim_value() == Nimber::ZERO {
                        continue;
                    }
                    assert_eq!(play(&board).nim_value(), Nimber::ZERO, "{board}");
                }
            }
        }
    }

    #[test]
    fn actions_are_legal() {
        let mut qc = QuickCheck::new();
        let test = |board: Board| {
            match Bot::next_action(&board) {
                Ok(action) => {
                    assert!(action.heap < board.heap_count());
                    assert!(action.amount < board.heaps()[action.heap]);
                }
                Err(Error::EmptyBoard) => assert_eq!(board.heap_count(), 0),
                Err(Error::GameOver) => assert!(board.is_game_over()),
                Err(err) => panic!("unexpected error: {err}"),
            }
        };
        qc.quickcheck(test as fn(Board));
    }

    #[test]
    fn optimal_from_winning_positions() {
        let mut qc = QuickCheck::new();
        let test = |board: Board| {
            if board.is_losing() {
                return;
            }
            assert!(play(&board).is_losing());
        };
        qc.quickcheck(test as fn(Board));
    }

    #[test]
    fn next_action_is_pure() {
        let mut qc = QuickCheck::new();
        let test = |board: Board| {
            let before = board.clone();
            assert_eq!(Bot::next_action(&board), Bot::next_action(&board));
            assert_eq!(board, before);
        };
        qc.quickcheck(test as fn(Board));
    }

    #[test]
    fn random_player_moves_are_legal() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new(vec![4, 0, 7, 2]);
        while !board.is_game_over() {
            let action = RandomPlayer.choose_action(&board, &mut rng).unwrap();
            assert!(action.removed(&board).unwrap() > 0);
            board.apply(action).unwrap();
        }
        assert_eq!(
            RandomPlayer.choose_action(&board, &mut rng),
            Err(Error::GameOver)
        );
        assert_eq!(
            RandomPlayer.choose_action(&Board::new(vec![]), &mut rng),
            Err(Error::EmptyBoard)
        );
    }

    #[test]
    fn bot_strategy_ignores_rng() {
        let board = Board::new(vec![6, 3, 7]);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Bot.choose_action(&board, &mut rng),
            Bot::next_action(&board)
        );
    }
}
