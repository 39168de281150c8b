use super::board::Board;
use super::rules::{actions, player, utility};
use super::types::{Action, Player, Utility};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub action: Action,
    /// Value of the position after `action` under perfect play.
    pub value: Utility,
    /// Boards visited, including the root.
    pub nodes: u64,
}

#[derive(Default)]
struct Searcher {
    nodes: u64,
}

impl Searcher {
    fn max_value(&mut self, board: &Board, mut alpha: Utility, beta: Utility) -> Utility {
        self.nodes += 1;
        let (Some(mover), Some(legal)) = (player(board), actions(board)) else {
            return utility(board);
        };

        let mut v = Utility::MIN;
        for action in legal {
            v = v.max(self.min_value(&board.with_mark(action, mover.mark()), alpha, beta));
            alpha = alpha.max(v);
            if alpha >= beta {
                break;
            }
        }
        v
    }

    fn min_value(&mut self, board: &Board, alpha: Utility, mut beta: Utility) -> Utility {
        self.nodes += 1;
        let (Some(mover), Some(legal)) = (player(board), actions(board)) else {
            return utility(board);
        };

        let mut v = Utility::MAX;
        for action in legal {
            v = v.min(self.max_value(&board.with_mark(action, mover.mark()), alpha, beta));
            beta = beta.min(v);
            if alpha >= beta {
                break;
            }
        }
        v
    }
}

/// Best value X can force from `board` within the `(alpha, beta)` window.
pub fn max_value(board: &Board, alpha: Utility, beta: Utility) -> Utility {
    Searcher::default().max_value(board, alpha, beta)
}

/// Best value O can force from `board` within the `(alpha, beta)` window.
pub fn min_value(board: &Board, alpha: Utility, beta: Utility) -> Utility {
    Searcher::default().min_value(board, alpha, beta)
}

/// Game-theoretic value of `board` with both sides playing perfectly.
pub fn minimax_value(board: &Board) -> Utility {
    match player(board) {
        Some(Player::O) => min_value(board, Utility::MIN, Utility::MAX),
        Some(Player::X) => max_value(board, Utility::MIN, Utility::MAX),
        None => utility(board),
    }
}

/// Optimal move for the side to move, or `None` on a finished board.
pub fn minimax(board: &Board) -> Option<Action> {
    search(board).map(|outcome| outcome.action)
}

/// Runs the alpha-beta search from `board`.
///
/// Siblings at the root are searched with the bound found so far rather than a
/// fresh window, and only a strictly better value replaces the current choice, so
/// the earliest optimal action in row-major order is returned.
pub fn search(board: &Board) -> Option<SearchOutcome> {
    let mover = player(board)?;
    let legal = actions(board)?;

    let mut searcher = Searcher { nodes: 1 };
    let mut best_value = Utility::MIN;
    let mut worst_value = Utility::MAX;
    let mut chosen = None;

    for action in legal {
        let child = board.with_mark(action, mover.mark());
        match mover {
            Player::X => {
                let value = searcher.min_value(&child, best_value, worst_value);
                if value > best_value {
                    best_value = value;
                    chosen = Some((action, value));
                }
            }
            Player::O => {
                let value = searcher.max_value(&child, best_value, worst_value);
                if value < worst_value {
                    worst_value = value;
                    chosen = Some((action, value));
                }
            }
        }
    }

    chosen.map(|(action, value)| SearchOutcome {
        action,
        value,
        nodes: searcher.nodes,
    })
}
