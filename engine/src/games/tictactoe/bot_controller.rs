use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::rules::actions;
use super::search::minimax;
use super::types::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotType {
    Minimax,
    Random,
}

pub fn calculate_move<R: Rng + ?Sized>(bot_type: BotType, board: &Board, rng: &mut R) -> Option<Action> {
    match bot_type {
        BotType::Minimax => minimax(board),
        BotType::Random => calculate_random_move(board, rng),
    }
}

fn calculate_random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Action> {
    actions(board)?.into_iter().choose(rng)
}
