use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The coordinates do not name an empty cell of a non-terminal board.
    InvalidAction { row: usize, col: usize },
    GameOver,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidAction { row, col } => {
                write!(f, "Invalid action: ({}, {}) is not an available cell", row, col)
            }
            GameError::GameOver => write!(f, "Game is already over"),
        }
    }
}

impl std::error::Error for GameError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseBoardError {
    WrongCellCount(usize),
    InvalidCharacter(char),
}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::WrongCellCount(found) => {
                write!(f, "Expected 9 cells, found {}", found)
            }
            ParseBoardError::InvalidCharacter(c) => {
                write!(f, "Invalid cell character '{}', expected X, O or .", c)
            }
        }
    }
}

impl std::error::Error for ParseBoardError {}
