//! Dice roll-under.
//!
//! One draw in [1, 100]; the player wins when the roll lands strictly below
//! the chosen target. The multiplier is the fair 99-line payout
//! `99 / (target - 1)`, so lower targets quote higher multipliers.

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

/// Valid targets. 1 could never win and 100 would always win below 1.0x;
/// both are rejected rather than quoted.
const MIN_TARGET: u8 = 2;
const MAX_TARGET: u8 = 99;

/// Payout multiplier in basis points for a winning roll under `target`.
pub(super) fn multiplier_bps(target: u8) -> u64 {
    990_000 / (target as u64 - 1)
}

/// Settle a roll against a target; pure so tests can force exact rolls.
pub(super) fn evaluate(roll: u8, target: u8) -> (bool, u64) {
    let is_win = roll < target;
    let multiplier = if is_win { multiplier_bps(target) } else { 0 };
    (is_win, multiplier)
}

pub(super) fn resolve(target: u8, seeds: &FairnessSeeds) -> Result<Resolution, GameError> {
    if !(MIN_TARGET..=MAX_TARGET).contains(&target) {
        return Err(GameError::InvalidParams("dice target out of range"));
    }

    let roll =
        fairness::derive_in_range(&seeds.server_seed, &seeds.client_seed, seeds.nonce, 1, 100)
            as u8;
    let (is_win, multiplier_bps) = evaluate(roll, target);

    Ok(Resolution {
        outcome: Outcome::Dice { roll, target },
        is_win,
        multiplier_bps,
    })
}
