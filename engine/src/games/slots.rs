//! Five-reel slots.
//!
//! Five independent symbol draws from a fixed alphabet; a win needs at least
//! three reels matching the first reel's symbol. The payout is per-symbol
//! and per-match-count, so lining up crowns pays far better than fish.

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

/// Reel alphabet; indices are stable and stored in outcomes.
pub(super) const SYMBOLS: [&str; 5] = ["fish", "crown", "gem", "ship", "anchor"];

const REELS: usize = 5;
const MIN_MATCHES: u8 = 3;

/// Payout table in basis points, indexed `[symbol][matches - 3]`.
const PAYTABLE_BPS: [[u64; 3]; 5] = [
    [7_500, 15_000, 25_000],    // fish
    [40_000, 75_000, 250_000],  // crown
    [25_000, 50_000, 150_000],  // gem
    [15_000, 30_000, 75_000],   // ship
    [10_000, 20_000, 50_000],   // anchor
];

/// Count reels matching the first reel and look up the line payout.
pub(super) fn evaluate(reels: &[u8; 5]) -> (u8, bool, u64) {
    let line_symbol = reels[0];
    let matches = reels.iter().filter(|&&s| s == line_symbol).count() as u8;
    let is_win = matches >= MIN_MATCHES;
    let multiplier = if is_win {
        PAYTABLE_BPS[line_symbol as usize][(matches - MIN_MATCHES) as usize]
    } else {
        0
    };
    (matches, is_win, multiplier)
}

pub(super) fn resolve(seeds: &FairnessSeeds) -> Result<Resolution, GameError> {
    let mut reels = [0u8; REELS];
    for (i, reel) in reels.iter_mut().enumerate() {
        // Reel i draws at nonce + i; draws are never reused across reels.
        *reel = fairness::derive_in_range(
            &seeds.server_seed,
            &seeds.client_seed,
            seeds.nonce + i as u64,
            0,
            (SYMBOLS.len() - 1) as u32,
        ) as u8;
    }

    let (matches, is_win, multiplier_bps) = evaluate(&reels);

    Ok(Resolution {
        outcome: Outcome::Slots { reels, matches },
        is_win,
        multiplier_bps,
    })
}
