use std::io::{self, BufRead, Write};

use rand::Rng;
use tictactoe_engine::log;
use tictactoe_engine::tictactoe::{
    Action, Board, BotType, GameStatus, Player, TicTacToeGameState, calculate_move, is_reachable,
    player, search, status,
};

#[derive(Debug, PartialEq, Eq)]
enum PlayerCommand {
    Place(Action),
    Undo,
    Quit,
}

fn parse_command(line: &str) -> Result<PlayerCommand, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Ok(PlayerCommand::Quit),
        "u" | "undo" => return Ok(PlayerCommand::Undo),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return Err("Enter a move as `row col`, e.g. `1 1`".to_string());
    };

    let row = row
        .parse::<usize>()
        .map_err(|_| format!("Invalid row: {}", row))?;
    let col = col
        .parse::<usize>()
        .map_err(|_| format!("Invalid column: {}", col))?;
    Ok(PlayerCommand::Place(Action::new(row, col)))
}

fn choose_bot_move<R: Rng + ?Sized>(
    bot_type: BotType,
    board: &Board,
    rng: &mut R,
    out: &mut impl Write,
    show_search_stats: bool,
) -> io::Result<Option<Action>> {
    let action = match bot_type {
        BotType::Minimax => {
            let Some(outcome) = search(board) else {
                return Ok(None);
            };
            log!(
                "Minimax chose {} with value {} after {} nodes",
                outcome.action,
                outcome.value,
                outcome.nodes
            );
            if show_search_stats {
                writeln!(out, "Search: value {}, {} nodes", outcome.value, outcome.nodes)?;
            }
            outcome.action
        }
        BotType::Random => {
            let Some(action) = calculate_move(bot_type, board, rng) else {
                return Ok(None);
            };
            log!("Random bot chose {}", action);
            action
        }
    };
    Ok(Some(action))
}

/// Takes back moves until the human is to move again with one fewer move of
/// their own on the board.
fn undo_round(state: &mut TicTacToeGameState, human: Player) -> bool {
    let needed = match human {
        Player::X => 1,
        Player::O => 2,
    };
    if state.history().len() < needed {
        return false;
    }

    while state.undo().is_some() {
        if state.current_player() == Some(human) {
            return true;
        }
    }
    false
}

fn write_result(out: &mut impl Write, state: &TicTacToeGameState) -> io::Result<()> {
    match state.winning_line() {
        Some(line) => writeln!(
            out,
            "{} wins with the line {} - {}",
            line.player,
            line.start(),
            line.end()
        ),
        None => writeln!(out, "Result: {}", state.status()),
    }
}

pub fn run_human_game<R: Rng + ?Sized>(
    input: impl BufRead,
    out: &mut impl Write,
    bot_type: BotType,
    human: Player,
    rng: &mut R,
    show_search_stats: bool,
) -> io::Result<GameStatus> {
    log!("Starting game: human plays {}, bot is {:?}", human, bot_type);

    let mut state = TicTacToeGameState::new();
    let mut lines = input.lines();

    while let Some(to_move) = state.current_player() {
        writeln!(out, "{}\n", state.board())?;

        if to_move != human {
            let Some(action) = choose_bot_move(bot_type, state.board(), rng, out, show_search_stats)?
            else {
                break;
            };
            state.place_mark(action).map_err(io::Error::other)?;
            writeln!(out, "Bot plays {}", action)?;
            continue;
        }

        write!(out, "Your move ({}): row col, `u` to undo, `q` to quit> ", human)?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            log!("Input closed, leaving game");
            return Ok(state.status());
        };

        match parse_command(&line?) {
            Ok(PlayerCommand::Quit) => {
                log!("Player quit after {} moves", state.history().len());
                return Ok(state.status());
            }
            Ok(PlayerCommand::Undo) => {
                if !undo_round(&mut state, human) {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            Ok(PlayerCommand::Place(action)) => {
                if let Err(e) = state.place_mark(action) {
                    writeln!(out, "{}", e)?;
                }
            }
            Err(message) => writeln!(out, "{}", message)?,
        }
    }

    writeln!(out, "{}\n", state.board())?;
    write_result(out, &state)?;
    log!("Game finished: {}", state.status());
    Ok(state.status())
}

pub fn run_self_play<R: Rng + ?Sized>(
    out: &mut impl Write,
    x_bot: BotType,
    o_bot: BotType,
    rng: &mut R,
    show_search_stats: bool,
) -> io::Result<GameStatus> {
    log!("Self-play: X is {:?}, O is {:?}", x_bot, o_bot);

    let mut state = TicTacToeGameState::new();
    while let Some(to_move) = state.current_player() {
        let bot_type = match to_move {
            Player::X => x_bot,
            Player::O => o_bot,
        };
        let Some(action) = choose_bot_move(bot_type, state.board(), rng, out, show_search_stats)?
        else {
            break;
        };
        state.place_mark(action).map_err(io::Error::other)?;
        writeln!(out, "{} plays {}\n{}\n", to_move, action, state.board())?;
    }

    write_result(out, &state)?;
    log!("Self-play finished: {}", state.status());
    Ok(state.status())
}

pub fn run_best_move(board: &Board, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}\n", board)?;
    if !is_reachable(board) {
        log!("Board cannot arise from legal play, analysing anyway");
        writeln!(out, "Warning: this position cannot arise from legal play")?;
    }

    match (player(board), search(board)) {
        (Some(to_move), Some(outcome)) => {
            writeln!(out, "To move: {}", to_move)?;
            writeln!(
                out,
                "Best move: {} (value {}, {} nodes searched)",
                outcome.action, outcome.value, outcome.nodes
            )?;
        }
        _ => writeln!(out, "Game over: {}", status(board))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use tictactoe_engine::logger;

    fn run_script(script: &str, bot_type: BotType, human: Player) -> (GameStatus, String) {
        logger::init_logger(Some("Test".to_string()));
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();
        let status = run_human_game(Cursor::new(script), &mut out, bot_type, human, &mut rng, true)
            .unwrap();
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(" 1 2 "), Ok(PlayerCommand::Place(Action::new(1, 2))));
        assert_eq!(parse_command("0,2"), Ok(PlayerCommand::Place(Action::new(0, 2))));
        assert_eq!(parse_command("Q"), Ok(PlayerCommand::Quit));
        assert_eq!(parse_command("undo"), Ok(PlayerCommand::Undo));
        assert!(parse_command("1").is_err());
        assert!(parse_command("a b").is_err());
        assert!(parse_command("1 2 3").is_err());
    }

    #[test]
    fn test_human_cannot_beat_minimax() {
        // occupied cells are rejected, so walking the grid always finishes the game
        let script = "0 0\n0 1\n0 2\n1 0\n1 1\n1 2\n2 0\n2 1\n2 2\n";
        let (status, output) = run_script(script, BotType::Minimax, Player::X);
        assert!(matches!(status, GameStatus::OWon | GameStatus::Draw));
        assert!(output.contains("Bot plays"));
        assert!(output.contains("Search: value"));
    }

    #[test]
    fn test_illegal_input_is_reported() {
        let (status, output) = run_script("1 1\n1 1\n9 9\nhello\nq\n", BotType::Minimax, Player::X);
        assert_eq!(status, GameStatus::InProgress);
        assert!(output.contains("Invalid action: (1, 1)"));
        assert!(output.contains("Invalid action: (9, 9)"));
        assert!(output.contains("Enter a move as"));
    }

    #[test]
    fn test_undo_with_nothing_to_undo() {
        let (_, output) = run_script("u\nq\n", BotType::Random, Player::O);
        assert!(output.contains("Nothing to undo"));
    }

    #[test]
    fn test_undo_round() {
        let mut state = TicTacToeGameState::from_moves(&[
            Action::new(0, 0),
            Action::new(1, 1),
            Action::new(2, 2),
        ])
        .unwrap();
        assert!(undo_round(&mut state, Player::O));
        assert_eq!(state.history(), &[Action::new(0, 0)]);
        assert_eq!(state.current_player(), Some(Player::O));

        assert!(!undo_round(&mut state, Player::O));
        assert!(undo_round(&mut state, Player::X));
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_closed_input_ends_game() {
        let (status, _) = run_script("", BotType::Minimax, Player::O);
        assert_eq!(status, GameStatus::InProgress);
    }

    #[test]
    fn test_minimax_self_play_draws() {
        logger::init_logger(None);
        let mut rng = StdRng::seed_from_u64(11);
        let mut out = Vec::new();
        let status =
            run_self_play(&mut out, BotType::Minimax, BotType::Minimax, &mut rng, false).unwrap();
        assert_eq!(status, GameStatus::Draw);
        assert!(String::from_utf8(out).unwrap().contains("Result: draw"));
    }

    #[test]
    fn test_best_move_output() {
        logger::init_logger(None);
        let board: Board = "XX./OO./...".parse().unwrap();
        let mut out = Vec::new();
        run_best_move(&board, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("To move: X"));
        assert!(output.contains("Best move: (0, 2) (value 1"));

        let finished: Board = "XXX/OO./...".parse().unwrap();
        let mut out = Vec::new();
        run_best_move(&finished, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Game over: X won"));
    }
}
