//! Plinko drop.
//!
//! Sixteen binary left/right draws walk the ball down the board; the bucket
//! index equals the number of rightward bounces, so the landing distribution
//! is binomial and the edge buckets pay the table maximum.

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

/// Rows of pegs, and therefore draws per drop.
pub(super) const ROWS: usize = 16;

/// Bucket multipliers in basis points, symmetric around the center.
const BUCKET_BPS: [u64; ROWS + 1] = [
    10_000_000, // 1000x
    1_300_000,  // 130x
    260_000,    // 26x
    90_000,     // 9x
    40_000,     // 4x
    20_000,     // 2x
    15_000,     // 1.5x
    10_000,     // 1x
    5_000,      // 0.5x
    10_000,
    15_000,
    20_000,
    40_000,
    90_000,
    260_000,
    1_300_000,
    10_000_000,
];

/// Fold a path of left/right draws into its landing bucket.
///
/// The ball starts at the center offset `ROWS / 2` and moves half a slot per
/// bounce; flooring the final position makes the bucket exactly the count of
/// rightward bounces.
pub(super) fn bucket_for_path(path: &[u8]) -> u8 {
    path.iter().filter(|&&d| d == 1).count() as u8
}

/// Look up a bucket's payout; a drop "wins" when it at least returns the
/// stake.
pub(super) fn evaluate(bucket: u8) -> (bool, u64) {
    let multiplier = BUCKET_BPS[bucket as usize];
    (multiplier >= 10_000, multiplier)
}

pub(super) fn resolve(seeds: &FairnessSeeds) -> Result<Resolution, GameError> {
    let path: Vec<u8> = (0..ROWS as u64)
        .map(|i| {
            fairness::derive_in_range(
                &seeds.server_seed,
                &seeds.client_seed,
                seeds.nonce + i,
                0,
                1,
            ) as u8
        })
        .collect();

    let bucket = bucket_for_path(&path);
    let (is_win, table_multiplier) = evaluate(bucket);
    // The sub-evens center bucket forfeits the stake outright: a loss always
    // settles at multiplier 0, the table value only decides the win flag.
    let multiplier_bps = if is_win { table_multiplier } else { 0 };

    Ok(Resolution {
        outcome: Outcome::Plinko { path, bucket },
        is_win,
        multiplier_bps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_counts_rightward_bounces() {
        assert_eq!(bucket_for_path(&[0; ROWS]), 0);
        assert_eq!(bucket_for_path(&[1; ROWS]), 16);
        let mut mixed = [0u8; ROWS];
        mixed[..5].fill(1);
        assert_eq!(bucket_for_path(&mixed), 5);
    }

    #[test]
    fn table_is_symmetric_with_heaviest_edges() {
        for i in 0..=ROWS {
            assert_eq!(BUCKET_BPS[i], BUCKET_BPS[ROWS - i]);
        }
        assert_eq!(BUCKET_BPS[0], 10_000_000);
        assert_eq!(BUCKET_BPS[8], 5_000);
        // Payouts fall monotonically toward the center.
        for i in 0..ROWS / 2 {
            assert!(BUCKET_BPS[i] >= BUCKET_BPS[i + 1]);
        }
    }

    #[test]
    fn center_bucket_is_the_only_loss() {
        for bucket in 0..=ROWS as u8 {
            let (is_win, multiplier) = evaluate(bucket);
            if bucket == 8 {
                assert!(!is_win);
                assert_eq!(multiplier, 5_000);
            } else {
                assert!(is_win);
                assert!(multiplier >= 10_000);
            }
        }
    }

    #[test]
    fn resolved_path_matches_bucket() {
        for nonce in 0..100 {
            let seeds = FairnessSeeds {
                server_seed: "56".repeat(32),
                client_seed: "78".repeat(8),
                nonce: nonce * 20,
            };
            let resolution = resolve(&seeds).expect("resolution should succeed");
            match &resolution.outcome {
                Outcome::Plinko { path, bucket } => {
                    assert_eq!(path.len(), ROWS);
                    assert!(path.iter().all(|&d| d <= 1));
                    assert_eq!(*bucket, bucket_for_path(path));
                    if !resolution.is_win {
                        assert_eq!(resolution.multiplier_bps, 0);
                    }
                }
                _ => panic!("expected plinko outcome"),
            }
        }
    }
}
