use super::board::{Board, initial_state, result};
use super::error::GameError;
use super::rules::{player, status, winning_line};
use super::types::{Action, GameStatus, Player, WinningLine};

/// A game in progress: the current board plus the moves that produced it.
#[derive(Debug, Clone, Default)]
pub struct TicTacToeGameState {
    board: Board,
    history: Vec<Action>,
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self {
            board: initial_state(),
            history: Vec::new(),
        }
    }

    /// Replays `moves` from the empty board.
    pub fn from_moves(moves: &[Action]) -> Result<Self, GameError> {
        let mut state = Self::new();
        for &action in moves {
            state.place_mark(action)?;
        }
        Ok(state)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Action> {
        self.history.last().copied()
    }

    pub fn current_player(&self) -> Option<Player> {
        player(&self.board)
    }

    pub fn status(&self) -> GameStatus {
        status(&self.board)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        winning_line(&self.board)
    }

    pub fn place_mark(&mut self, action: Action) -> Result<(), GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }

        self.board = result(&self.board, action)?;
        self.history.push(action);
        Ok(())
    }

    /// Takes back the last move. Returns the move, or `None` at the start.
    pub fn undo(&mut self) -> Option<Action> {
        let undone = self.history.pop()?;
        let mut board = initial_state();
        for &action in &self.history {
            // every prefix of a legal history is legal
            board = result(&board, action).ok()?;
        }
        self.board = board;
        Some(undone)
    }
}
