use std::collections::BTreeSet;

use super::board::Board;
use super::types::{Action, Cell, DRAW, GameStatus, O_WINS, Player, Utility, WinningLine, X_WINS};

const fn a(row: usize, col: usize) -> Action {
    Action::new(row, col)
}

/// Every three-in-a-row, in the order they are checked: rows, columns, the main
/// diagonal, then the anti-diagonal.
pub(crate) const LINES: [[Action; 3]; 8] = [
    [a(0, 0), a(0, 1), a(0, 2)],
    [a(1, 0), a(1, 1), a(1, 2)],
    [a(2, 0), a(2, 1), a(2, 2)],
    [a(0, 0), a(1, 0), a(2, 0)],
    [a(0, 1), a(1, 1), a(2, 1)],
    [a(0, 2), a(1, 2), a(2, 2)],
    [a(0, 0), a(1, 1), a(2, 2)],
    [a(0, 2), a(1, 1), a(2, 0)],
];

/// The player to move, or `None` once the game is over. X moves whenever the
/// mark counts are equal.
pub fn player(board: &Board) -> Option<Player> {
    if terminal(board) {
        return None;
    }

    if board.count(Cell::X) == board.count(Cell::O) {
        Some(Player::X)
    } else {
        Some(Player::O)
    }
}

/// All empty cells of a live board, or `None` for a finished one.
pub fn actions(board: &Board) -> Option<BTreeSet<Action>> {
    if terminal(board) {
        return None;
    }
    Some(board.empty_cells().into_iter().collect())
}

pub fn winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|line| line.player)
}

/// First completed line in check order. A board with two completed lines for
/// different players cannot come from legal play; the earlier line wins.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&cells| {
        let owner = board.get(cells[0])?.player()?;
        cells[1..]
            .iter()
            .all(|&cell| board.get(cell) == Some(owner.mark()))
            .then(|| WinningLine::new(owner, cells))
    })
}

pub fn terminal(board: &Board) -> bool {
    winner(board).is_some() || board.is_full()
}

/// +1 when X has won, -1 when O has won, 0 otherwise. Only meaningful on a
/// terminal board; a game still in progress also scores 0.
pub fn utility(board: &Board) -> Utility {
    match winner(board) {
        Some(Player::X) => X_WINS,
        Some(Player::O) => O_WINS,
        None => DRAW,
    }
}

pub fn status(board: &Board) -> GameStatus {
    match winner(board) {
        Some(Player::X) => GameStatus::XWon,
        Some(Player::O) => GameStatus::OWon,
        None if board.is_full() => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}
