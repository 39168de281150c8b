use std::fmt;
use std::str::FromStr;

use super::error::{GameError, ParseBoardError};
use super::rules::{self, LINES};
use super::types::{Action, Cell, Player};

pub const BOARD_SIZE: usize = 3;

/// A 3x3 grid addressed by `(row, col)`. Boards are plain values: every
/// transition produces a new board and leaves its input untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// `None` for coordinates outside the grid.
    pub fn get(&self, action: Action) -> Option<Cell> {
        self.cells
            .get(action.row)
            .and_then(|row| row.get(action.col))
            .copied()
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count()
    }

    /// Empty cells in row-major order, whether or not the game has ended.
    pub fn empty_cells(&self) -> Vec<Action> {
        let mut cells = Vec::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if cell.is_empty() {
                    cells.push(Action::new(row, col));
                }
            }
        }
        cells
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| !cell.is_empty()))
    }

    /// Copy of this board with `cell` written at `action`. Callers guarantee the
    /// coordinates are in range.
    pub(crate) fn with_mark(&self, action: Action, cell: Cell) -> Board {
        let mut next = *self;
        next.cells[action.row][action.col] = cell;
        next
    }
}

pub fn initial_state() -> Board {
    Board::default()
}

/// Places the mark of the player to move at `action`.
///
/// The action must be a member of `actions(board)`; anything else (out of range,
/// occupied, or any move on a finished board) yields `GameError::InvalidAction`.
pub fn result(board: &Board, action: Action) -> Result<Board, GameError> {
    let mover = match rules::player(board) {
        Some(mover) if rules::actions(board).is_some_and(|legal| legal.contains(&action)) => {
            mover
        }
        _ => {
            return Err(GameError::InvalidAction {
                row: action.row,
                col: action.col,
            });
        }
    };

    Ok(board.with_mark(action, mover.mark()))
}

/// Whether `board` could arise from legal play starting at `initial_state()`.
pub fn is_reachable(board: &Board) -> bool {
    let x_count = board.count(Cell::X);
    let o_count = board.count(Cell::O);
    if x_count != o_count && x_count != o_count + 1 {
        return false;
    }

    let owns_line = |player: Player| {
        LINES
            .iter()
            .any(|line| line.iter().all(|&a| board.get(a) == Some(player.mark())))
    };

    match (owns_line(Player::X), owns_line(Player::O)) {
        (true, true) => false,
        (true, false) => x_count == o_count + 1,
        (false, true) => x_count == o_count,
        (false, false) => true,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Reads nine cells in row-major order. `X`/`O` in either case are marks,
    /// `.`, `_` and `-` are empty; whitespace, `/`, `|` and `,` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for c in s.chars() {
            let cell = match c {
                'X' | 'x' => Cell::X,
                'O' | 'o' => Cell::O,
                '.' | '_' | '-' => Cell::Empty,
                '/' | '|' | ',' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(ParseBoardError::InvalidCharacter(c)),
            };
            cells.push(cell);
        }

        if cells.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(ParseBoardError::WrongCellCount(cells.len()));
        }

        let mut board = Board::default();
        for (i, cell) in cells.into_iter().enumerate() {
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = cell;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::player;

    #[test]
    fn test_initial_state_is_empty() {
        let board = initial_state();
        assert_eq!(board.count(Cell::Empty), 9);
        assert_eq!(board.empty_cells().len(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn test_result_does_not_mutate_input() {
        let board = initial_state();
        let next = result(&board, Action::new(1, 2)).unwrap();

        assert_eq!(board, initial_state());
        assert_eq!(next.get(Action::new(1, 2)), Some(Cell::X));
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row, col) != (1, 2) {
                    assert_eq!(next.get(Action::new(row, col)), board.get(Action::new(row, col)));
                }
            }
        }
    }

    #[test]
    fn test_result_places_mark_of_player_to_move() {
        let board = result(&initial_state(), Action::new(0, 0)).unwrap();
        let board = result(&board, Action::new(1, 1)).unwrap();
        assert_eq!(board.get(Action::new(0, 0)), Some(Cell::X));
        assert_eq!(board.get(Action::new(1, 1)), Some(Cell::O));
        assert_eq!(player(&board), Some(Player::X));
    }

    #[test]
    fn test_result_rejects_occupied_cell() {
        let board = result(&initial_state(), Action::new(0, 0)).unwrap();
        assert_eq!(
            result(&board, Action::new(0, 0)),
            Err(GameError::InvalidAction { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_result_rejects_out_of_range() {
        let board = initial_state();
        assert!(matches!(
            result(&board, Action::new(3, 0)),
            Err(GameError::InvalidAction { row: 3, col: 0 })
        ));
        assert!(result(&board, Action::new(0, 7)).is_err());
    }

    #[test]
    fn test_result_rejects_move_on_finished_board() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        assert!(matches!(
            result(&board, Action::new(2, 2)),
            Err(GameError::InvalidAction { .. })
        ));
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "xo. | .X. | ..o".parse().unwrap();
        assert_eq!(board.get(Action::new(0, 0)), Some(Cell::X));
        assert_eq!(board.get(Action::new(0, 1)), Some(Cell::O));
        assert_eq!(board.get(Action::new(2, 2)), Some(Cell::O));
        assert_eq!(board.to_string(), "X O .\n. X .\n. . O");

        let reparsed: Board = board.to_string().parse().unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("XO".parse::<Board>(), Err(ParseBoardError::WrongCellCount(2)));
        assert_eq!(
            "XO.......Z".parse::<Board>(),
            Err(ParseBoardError::InvalidCharacter('Z'))
        );
        assert_eq!(
            "XO........".parse::<Board>(),
            Err(ParseBoardError::WrongCellCount(10))
        );
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        assert_eq!(initial_state().get(Action::new(0, 3)), None);
        assert_eq!(initial_state().get(Action::new(5, 0)), None);
    }

    #[test]
    fn test_is_reachable() {
        assert!(is_reachable(&initial_state()));
        assert!(is_reachable(&"XXX/OO./...".parse().unwrap()));
        // both sides own a line
        assert!(!is_reachable(&"XXX/OOO/X..".parse().unwrap()));
        assert!(!is_reachable(&"OO./.../...".parse().unwrap()));
        assert!(!is_reachable(&"XXX/OO./O..".parse().unwrap()));
        assert!(!is_reachable(&"XXX/.../...".parse().unwrap()));
    }
}
