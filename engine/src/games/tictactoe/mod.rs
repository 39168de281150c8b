mod board;
mod bot_controller;
mod error;
mod game_state;
mod rules;
mod search;
mod types;

pub use board::{BOARD_SIZE, Board, initial_state, is_reachable, result};
pub use bot_controller::{BotType, calculate_move};
pub use error::{GameError, ParseBoardError};
pub use game_state::TicTacToeGameState;
pub use rules::{actions, player, status, terminal, utility, winner, winning_line};
pub use search::{SearchOutcome, max_value, min_value, minimax, minimax_value, search};
pub use types::{Action, Cell, DRAW, GameStatus, O_WINS, Player, Utility, WinningLine, X_WINS};
