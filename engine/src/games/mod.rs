//! Game resolvers.
//!
//! One pure resolver per variant, all mapping `(params, seeds)` to a
//! [`Resolution`]: the serialized outcome, the win flag, and the payout
//! multiplier in basis points. Resolvers perform no I/O and touch no state,
//! so a resolution can be replayed bit-for-bit from a settled wager record.
//!
//! Dispatch is a closed match over [`GameParams`]; adding a variant extends
//! the enum and the match, so a new game cannot silently fall through.
//!
//! Draw derivation is separated from evaluation inside each variant module:
//! `evaluate` functions take already-derived draws, which is what the unit
//! tests pin exact payouts against.

mod crash;
mod dice;
mod hilo;
mod mines;
mod plinko;
pub mod registry;
mod roulette;
mod slots;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use whalex_types::casino::{FairnessSeeds, GameType};

pub use hilo::HiLoGuess;
pub use roulette::RouletteBet;

/// Validation failures raised before any draw is made.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid game parameters: {0}")]
    InvalidParams(&'static str),
    #[error("multiplier overflow")]
    MultiplierOverflow,
}

/// Player-supplied parameters for one wager, tagged by variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameParams {
    Dice {
        /// Win threshold: the roll must land strictly below it.
        target: u8,
    },
    Slots,
    HiLo {
        /// Card carried forward from the previous round, if any.
        current_card: Option<u8>,
        guess: HiLoGuess,
        /// Consecutive correct guesses so far; scales the multiplier.
        streak: u32,
    },
    Mines {
        grid_size: u8,
        mine_count: u8,
        selected_cell: u8,
        /// Cells already revealed safely; compounds the multiplier.
        revealed_count: u8,
    },
    Plinko,
    Roulette {
        bet: RouletteBet,
    },
    Crash {
        /// Declared cash-out point in hundredths; 0 means the player rode
        /// the round down and never cashed out.
        cash_out_hundredths: u64,
    },
}

impl GameParams {
    pub fn game_type(&self) -> GameType {
        match self {
            GameParams::Dice { .. } => GameType::Dice,
            GameParams::Slots => GameType::Slots,
            GameParams::HiLo { .. } => GameType::HiLo,
            GameParams::Mines { .. } => GameType::Mines,
            GameParams::Plinko => GameType::Plinko,
            GameParams::Roulette { .. } => GameType::Roulette,
            GameParams::Crash { .. } => GameType::Crash,
        }
    }
}

/// The resolved outcome payload persisted (as JSON) in the wager record.
///
/// Each variant carries every parameter needed to rebuild the originating
/// [`GameParams`] and replay the resolution from the disclosed seeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Outcome {
    Dice {
        roll: u8,
        target: u8,
    },
    Slots {
        reels: [u8; 5],
        matches: u8,
    },
    HiLo {
        current_card: u8,
        next_card: u8,
        guess: HiLoGuess,
        streak: u32,
    },
    Mines {
        grid_size: u8,
        mine_count: u8,
        selected_cell: u8,
        mines: Vec<u8>,
        revealed_count: u8,
        is_mine: bool,
    },
    Plinko {
        /// Left/right draw per row (0 = left, 1 = right).
        path: Vec<u8>,
        bucket: u8,
    },
    Roulette {
        winning_number: u8,
        bet: RouletteBet,
    },
    Crash {
        crash_point_hundredths: u64,
        cash_out_hundredths: u64,
    },
}

impl Outcome {
    /// Rebuild the parameters that produced this outcome, for replay
    /// verification against the disclosed seeds.
    pub fn to_params(&self) -> GameParams {
        match self {
            Outcome::Dice { target, .. } => GameParams::Dice { target: *target },
            Outcome::Slots { .. } => GameParams::Slots,
            Outcome::HiLo {
                current_card,
                guess,
                streak,
                ..
            } => GameParams::HiLo {
                current_card: Some(*current_card),
                guess: *guess,
                streak: *streak,
            },
            Outcome::Mines {
                grid_size,
                mine_count,
                selected_cell,
                revealed_count,
                ..
            } => GameParams::Mines {
                grid_size: *grid_size,
                mine_count: *mine_count,
                selected_cell: *selected_cell,
                revealed_count: *revealed_count,
            },
            Outcome::Plinko { .. } => GameParams::Plinko,
            Outcome::Roulette { bet, .. } => GameParams::Roulette { bet: bet.clone() },
            Outcome::Crash {
                cash_out_hundredths,
                ..
            } => GameParams::Crash {
                cash_out_hundredths: *cash_out_hundredths,
            },
        }
    }
}

/// A resolved wager before settlement: no payout amount yet, only the
/// multiplier the ledger applies to the stake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub is_win: bool,
    /// Payout multiplier in basis points; always 0 on a loss.
    pub multiplier_bps: u64,
}

/// Resolve one wager from its fairness seeds.
pub fn resolve(params: &GameParams, seeds: &FairnessSeeds) -> Result<Resolution, GameError> {
    match params {
        GameParams::Dice { target } => dice::resolve(*target, seeds),
        GameParams::Slots => slots::resolve(seeds),
        GameParams::HiLo {
            current_card,
            guess,
            streak,
        } => hilo::resolve(*current_card, *guess, *streak, seeds),
        GameParams::Mines {
            grid_size,
            mine_count,
            selected_cell,
            revealed_count,
        } => mines::resolve(*grid_size, *mine_count, *selected_cell, *revealed_count, seeds),
        GameParams::Plinko => plinko::resolve(seeds),
        GameParams::Roulette { bet } => roulette::resolve(bet.clone(), seeds),
        GameParams::Crash {
            cash_out_hundredths,
        } => crash::resolve(*cash_out_hundredths, seeds),
    }
}
