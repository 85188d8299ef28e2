//! Game session between a human and the computer.
//!
//! The session owns the board, tracks whose turn it is and records played moves. Whoever takes
//! the last token wins.

use crate::{
    board::Board,
    bot::{Action, Bot, Strategy},
    error::{Error, Result},
};
use log::debug;
use rand::Rng;
use std::fmt::Display;

/// Side of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Opposite player
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

/// Result of a finished game, from the human's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Outcome {
    Won,
    Lost,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won => write!(f, "WIN!"),
            Outcome::Lost => write!(f, "LOST!"),
        }
    }
}

/// Action together with the player who played it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Player who moved
    pub player: Player,

    /// Played action
    pub action: Action,
}

/// Single game. Start a new one to play again.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Player,
    history: Vec<Move>,
}

impl Game {
    /// Start a game on `board`, human moves first
    pub const fn new(board: Board) -> Self {
        Self::with_first(board, Player::Human)
    }

    /// Start a game on `board` with given player moving first
    pub const fn with_first(board: Board, first: Player) -> Self {
        Self {
            board,
            turn: first,
            history: Vec::new(),
        }
    }

    /// Start a game on a random board, see [`Board::random`]
    ///
    /// # Errors
    /// - `heap_count` is too small to generate a board
    pub fn random<R>(heap_count: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        Ok(Self::new(Board::random(heap_count, rng)?))
    }

    /// Current position
    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move
    #[inline]
    pub const fn turn(&self) -> Player {
        self.turn
    }

    /// Moves played so far, oldest first
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Check if no more moves are possible
    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    /// Player who took the last token. `None` while the game is running or if no move was made.
    pub fn winner(&self) -> Option<Player> {
        if !self.is_over() {
            return None;
        }
        self.history.last().map(|last| last.player)
    }

    /// Result of the game for the human
    pub fn outcome(&self) -> Option<Outcome> {
        self.winner().map(|winner| match winner {
            Player::Human => Outcome::Won,
            Player::Computer => Outcome::Lost,
        })
    }

    fn play(&mut self, player: Player, action: Action) -> Result<()> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if self.turn != player {
            return Err(Error::NotYourTurn);
        }

        self.board.apply(action)?;
        debug!("{:?} played {}, now {}", player, action, self.board);
        self.history.push(Move { player, action });
        self.turn = player.opposite();
        Ok(())
    }

    /// Play the human's move and, unless it ended the game, answer with the [`Bot`].
    ///
    /// Returns the computer's reply.
    ///
    /// # Errors
    /// - Game is over
    /// - It is the computer's turn
    /// - Action is not a legal move, the game is left untouched
    pub fn human_move(&mut self, action: Action) -> Result<Option<Action>> {
        self.play(Player::Human, action)?;
        if self.is_over() {
            debug!("Human took the last token");
            return Ok(None);
        }

        let reply = Bot::next_action(&self.board)?;
        self.play(Player::Computer, reply)?;
        if self.is_over() {
            debug!("Computer took the last token");
        }
        Ok(Some(reply))
    }

    /// Let `strategy` play for the computer
    ///
    /// # Errors
    /// - Game is over
    /// - It is the human's turn
    pub fn computer_move<S, R>(&mut self, strategy: &S, rng: &mut R) -> Result<Action>
    where
        S: Strategy,
        R: Rng + ?Sized,
    {
        if self.turn != Player::Computer {
            return Err(Error::NotYourTurn);
        }
        self.move_with(strategy, rng)
    }

    /// Let `strategy` play for whoever is to move
    ///
    /// # Errors
    /// - Game is over
    /// - Strategy picked an illegal move
    pub fn move_with<S, R>(&mut self, strategy: &S, rng: &mut R) -> Result<Action>
    where
        S: Strategy,
        R: Rng + ?Sized,
    {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let action = strategy.choose_action(&self.board, rng)?;
        self.play(self.turn, action)?;
        Ok(action)
    }

    /// Play until the board is empty, `human` and `computer` strategies moving alternately.
    /// Returns the winner.
    ///
    /// # Errors
    /// - Game is already over
    /// - A strategy picked an illegal move
    pub fn play_out<H, C, R>(&mut self, human: &H, computer: &C, rng: &mut R) -> Result<Player>
    where
        H: Strategy,
        C: Strategy,
        R: Rng + ?Sized,
    {
        if self.is_over() {
            return Err(Error::GameOver);
        }

        while !self.is_over() {
            match self.turn {
                Player::Human => self.move_with(human, rng)?,
                Player::Computer => self.move_with(computer, rng)?,
            };
        }

        self.winner().ok_or(Error::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::RandomPlayer;
    use quickcheck::QuickCheck;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn computer_answers_and_wins() {
        let mut game = Game::new(Board::new(vec![1, 2]));
        let reply = game.human_move(Action::new(0, 0)).unwrap();
        assert_eq!(reply, Some(Action::new(1, 0)));
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Player::Computer));
        assert_eq!(game.outcome(), Some(Outcome::Lost));
        assert_eq!(game.outcome().unwrap().to_string(), "LOST!");
    }

    #[test]
    fn human_takes_last_token() {
        let mut game = Game::new(Board::new(vec![0, 3, 0]));
        assert_eq!(game.human_move(Action::new(1, 0)), Ok(None));
        assert_eq!(game.outcome(), Some(Outcome::Won));
        assert_eq!(game.history().len(), 1);
        assert_eq!(
            game.human_move(Action::new(1, 0)),
            Err(Error::GameOver)
        );
    }

    #[test]
    fn illegal_move_keeps_state() {
        let mut game = Game::new(Board::new(vec![2, 5]));
        assert!(matches!(
            game.human_move(Action::new(0, 2)),
            Err(Error::IllegalMove { .. })
        ));
        assert!(matches!(
            game.human_move(Action::new(4, 0)),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert_eq!(game.board().heaps(), &[2, 5]);
        assert_eq!(game.turn(), Player::Human);
        assert!(game.history().is_empty());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn turns_are_enforced() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = Game::new(Board::new(vec![3, 4, 5]));
        assert_eq!(game.computer_move(&Bot, &mut rng), Err(Error::NotYourTurn));

        let mut game = Game::with_first(Board::new(vec![3, 4, 5]), Player::Computer);
        assert_eq!(
            game.human_move(Action::new(0, 0)),
            Err(Error::NotYourTurn)
        );
        let action = game.computer_move(&Bot, &mut rng).unwrap();
        assert_eq!(action, Bot::next_action(&Board::new(vec![3, 4, 5])).unwrap());
        assert_eq!(game.turn(), Player::Human);
        assert!(game.board().is_losing());
    }

    #[test]
    fn random_game_starts_unfinished() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = Game::random(7, &mut rng).unwrap();
        assert_eq!(game.board().heap_count(), 7);
        assert!(!game.is_over());
        assert_eq!(game.turn(), Player::Human);
        assert!(matches!(
            Game::random(2, &mut rng),
            Err(Error::NonTerminatingGeneration { .. })
        ));
    }

    #[test]
    fn play_out_on_finished_board() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::new(Board::new(vec![0, 0]));
        assert_eq!(
            game.play_out(&RandomPlayer, &Bot, &mut rng),
            Err(Error::GameOver)
        );
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn history_alternates() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::new(Board::new(vec![4, 6, 9, 1]));
        game.play_out(&RandomPlayer, &RandomPlayer, &mut rng).unwrap();

        let mut expected = Player::Human;
        for played in game.history() {
            assert_eq!(played.player, expected);
            expected = expected.opposite();
        }
        assert_eq!(game.winner(), game.history().last().map(|m| m.player));
    }

    /// Human starting from a zero Nim sum position cannot beat the bot
    #[test]
    fn bot_wins_from_winning_positions() {
        let mut qc = QuickCheck::new();
        let test = |board: Board, seed: u64| {
            let mut heaps = board.heaps().to_vec();
            heaps.push(board.nim_sum().value());
            let board = Board::new(heaps);
            if board.is_game_over() {
                return;
            }
            assert!(board.is_losing());

            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::new(board);
            assert_eq!(
                game.play_out(&RandomPlayer, &Bot, &mut rng),
                Ok(Player::Computer)
            );
        };
        qc.quickcheck(test as fn(Board, u64));
    }
}
