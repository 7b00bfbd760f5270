//! Hi-Lo card prediction.
//!
//! The next card in [1, 13] is compared against a carried-forward current
//! card; a correct strict-order guess wins `(streak + 1) * 1.5x`. Ties lose,
//! and the caller resets the streak to zero whenever a round loses.

use serde::{Deserialize, Serialize};

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

const MIN_CARD: u8 = 1;
const MAX_CARD: u8 = 13;

/// Streaks beyond this would quote absurd multipliers; reject the wager
/// instead of letting the accumulator run away.
const MAX_STREAK: u32 = 100;

/// Per-step multiplier: 1.5x in basis points.
const STEP_BPS: u64 = 15_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiLoGuess {
    Higher,
    Lower,
}

/// Multiplier for a correct guess at the given streak depth.
pub(super) fn multiplier_bps(streak: u32) -> u64 {
    (streak as u64 + 1) * STEP_BPS
}

/// Compare the drawn card against the current one; pure for forced-draw
/// tests.
pub(super) fn evaluate(current: u8, next: u8, guess: HiLoGuess, streak: u32) -> (bool, u64) {
    let is_win = match guess {
        HiLoGuess::Higher => next > current,
        HiLoGuess::Lower => next < current,
    };
    let multiplier = if is_win { multiplier_bps(streak) } else { 0 };
    (is_win, multiplier)
}

pub(super) fn resolve(
    current_card: Option<u8>,
    guess: HiLoGuess,
    streak: u32,
    seeds: &FairnessSeeds,
) -> Result<Resolution, GameError> {
    if let Some(card) = current_card {
        if !(MIN_CARD..=MAX_CARD).contains(&card) {
            return Err(GameError::InvalidParams("hilo card out of range"));
        }
    }
    if streak > MAX_STREAK {
        return Err(GameError::InvalidParams("hilo streak out of range"));
    }

    // A fresh round deals the current card at the base nonce; the next card
    // always draws at nonce + 1 so the two never share a draw.
    let current = match current_card {
        Some(card) => card,
        None => fairness::derive_in_range(
            &seeds.server_seed,
            &seeds.client_seed,
            seeds.nonce,
            MIN_CARD as u32,
            MAX_CARD as u32,
        ) as u8,
    };
    let next = fairness::derive_in_range(
        &seeds.server_seed,
        &seeds.client_seed,
        seeds.nonce + 1,
        MIN_CARD as u32,
        MAX_CARD as u32,
    ) as u8;

    let (is_win, multiplier_bps) = evaluate(current, next, guess, streak);

    Ok(Resolution {
        outcome: Outcome::HiLo {
            current_card: current,
            next_card: next,
            guess,
            streak,
        },
        is_win,
        multiplier_bps,
    })
}
