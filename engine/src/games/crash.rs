//! Crash cash-out.
//!
//! The round's crash point derives from a single draw mapped into
//! [1.01x, 10.00x]. The player declares a cash-out point up front and wins
//! that multiplier when the rocket survives past it; a cash-out of zero
//! records a round the player rode into the crash.

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

/// Declared cash-outs must sit inside what the crash curve can reach.
const MIN_CASH_OUT: u64 = 100; // 1.00x
const MAX_CASH_OUT: u64 = 1_000; // 10.00x

/// Compare a declared cash-out against the crash point; pure for forced
/// crash-point tests.
pub(super) fn evaluate(crash_point: u64, cash_out: u64) -> (bool, u64) {
    let is_win = cash_out > 0 && cash_out <= crash_point;
    // Hundredths of a multiplier to basis points.
    let multiplier = if is_win { cash_out * 100 } else { 0 };
    (is_win, multiplier)
}

pub(super) fn resolve(
    cash_out_hundredths: u64,
    seeds: &FairnessSeeds,
) -> Result<Resolution, GameError> {
    if cash_out_hundredths != 0
        && !(MIN_CASH_OUT..=MAX_CASH_OUT).contains(&cash_out_hundredths)
    {
        return Err(GameError::InvalidParams("crash cash-out out of range"));
    }

    let crash_point_hundredths =
        fairness::crash_point_hundredths(&seeds.server_seed, &seeds.client_seed, seeds.nonce);
    let (is_win, multiplier_bps) = evaluate(crash_point_hundredths, cash_out_hundredths);

    Ok(Resolution {
        outcome: Outcome::Crash {
            crash_point_hundredths,
            cash_out_hundredths,
        },
        is_win,
        multiplier_bps,
    })
}
