//! Mines grid reveal.
//!
//! Mine positions derive from one draw per mine at consecutive nonces; the
//! wager wins when the selected cell misses every mine. The multiplier
//! compounds 1.2x for each safe reveal, including this one.

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

const MIN_GRID: u8 = 2;
const MAX_GRID: u8 = 25;

/// Compounding step per safe reveal: 1.2x in basis points.
const STEP_NUMERATOR: u64 = 12_000;
const STEP_DENOMINATOR: u64 = 10_000;

/// `1.2^(revealed + 1)` in basis points via a checked accumulator.
pub(super) fn multiplier_bps(revealed_count: u8) -> Result<u64, GameError> {
    let mut accumulator: u64 = STEP_DENOMINATOR;
    for _ in 0..=revealed_count {
        accumulator = accumulator
            .checked_mul(STEP_NUMERATOR)
            .map(|v| v / STEP_DENOMINATOR)
            .ok_or(GameError::MultiplierOverflow)?;
    }
    Ok(accumulator)
}

/// Check the selection against the mine set; pure for forced-mine tests.
pub(super) fn evaluate(
    mines: &[u8],
    selected_cell: u8,
    revealed_count: u8,
) -> Result<(bool, u64), GameError> {
    let is_mine = mines.contains(&selected_cell);
    let multiplier = if is_mine { 0 } else { multiplier_bps(revealed_count)? };
    Ok((!is_mine, multiplier))
}

pub(super) fn resolve(
    grid_size: u8,
    mine_count: u8,
    selected_cell: u8,
    revealed_count: u8,
    seeds: &FairnessSeeds,
) -> Result<Resolution, GameError> {
    if !(MIN_GRID..=MAX_GRID).contains(&grid_size) {
        return Err(GameError::InvalidParams("mines grid size out of range"));
    }
    if mine_count == 0 || mine_count >= grid_size {
        return Err(GameError::InvalidParams("mines count out of range"));
    }
    if selected_cell >= grid_size {
        return Err(GameError::InvalidParams("mines cell outside grid"));
    }
    if revealed_count >= grid_size {
        return Err(GameError::InvalidParams("mines reveal count out of range"));
    }

    // Mine i draws at nonce + i. Duplicate positions are possible and simply
    // overlap; the effective mine count is at most `mine_count`.
    let mines: Vec<u8> = (0..mine_count as u64)
        .map(|i| {
            fairness::derive_in_range(
                &seeds.server_seed,
                &seeds.client_seed,
                seeds.nonce + i,
                0,
                grid_size as u32 - 1,
            ) as u8
        })
        .collect();

    let (is_win, multiplier_bps) = evaluate(&mines, selected_cell, revealed_count)?;

    Ok(Resolution {
        outcome: Outcome::Mines {
            grid_size,
            mine_count,
            selected_cell,
            mines,
            revealed_count,
            is_mine: !is_win,
        },
        is_win,
        multiplier_bps,
    })
}
