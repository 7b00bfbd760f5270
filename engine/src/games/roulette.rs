//! Single-wheel roulette.
//!
//! One draw in [0, 36] against the player's bet predicate. A straight number
//! pays 35x; the even-money predicates (red/black/even/odd) pay 2x total
//! return. Zero wins nothing except a straight bet on zero.

use serde::{Deserialize, Serialize};

use super::{GameError, Outcome, Resolution};
use crate::fairness;
use whalex_types::casino::FairnessSeeds;

/// Red numbers on the wheel; everything else in [1, 36] is black.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

const STRAIGHT_BPS: u64 = 350_000;
const EVEN_MONEY_BPS: u64 = 20_000;

/// The supported bet predicates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouletteBet {
    Straight { number: u8 },
    Red,
    Black,
    Even,
    Odd,
}

pub(super) fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// Decide a bet against a winning number; pure for forced-spin tests.
pub(super) fn evaluate(bet: &RouletteBet, winning: u8) -> (bool, u64) {
    let is_win = match bet {
        RouletteBet::Straight { number } => *number == winning,
        // Zero is neither red nor black, even nor odd.
        RouletteBet::Red => winning != 0 && is_red(winning),
        RouletteBet::Black => winning != 0 && !is_red(winning),
        RouletteBet::Even => winning != 0 && winning % 2 == 0,
        RouletteBet::Odd => winning % 2 == 1,
    };
    let multiplier = match (is_win, bet) {
        (false, _) => 0,
        (true, RouletteBet::Straight { .. }) => STRAIGHT_BPS,
        (true, _) => EVEN_MONEY_BPS,
    };
    (is_win, multiplier)
}

pub(super) fn resolve(bet: RouletteBet, seeds: &FairnessSeeds) -> Result<Resolution, GameError> {
    if let RouletteBet::Straight { number } = bet {
        if number > 36 {
            return Err(GameError::InvalidParams("roulette number out of range"));
        }
    }

    let winning_number =
        fairness::derive_in_range(&seeds.server_seed, &seeds.client_seed, seeds.nonce, 0, 36)
            as u8;
    let (is_win, multiplier_bps) = evaluate(&bet, winning_number);

    Ok(Resolution {
        outcome: Outcome::Roulette {
            winning_number,
            bet,
        },
        is_win,
        multiplier_bps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_pays_thirty_five() {
        assert_eq!(
            evaluate(&RouletteBet::Straight { number: 17 }, 17),
            (true, 350_000)
        );
        assert_eq!(evaluate(&RouletteBet::Straight { number: 17 }, 18), (false, 0));
        // Straight on zero is the only bet zero pays.
        assert_eq!(
            evaluate(&RouletteBet::Straight { number: 0 }, 0),
            (true, 350_000)
        );
    }

    #[test]
    fn seventeen_is_black() {
        // A red bet against a spin of 17 loses: 17 is black.
        assert_eq!(evaluate(&RouletteBet::Red, 17), (false, 0));
        assert_eq!(evaluate(&RouletteBet::Black, 17), (true, 20_000));
    }

    #[test]
    fn zero_defeats_every_even_money_bet() {
        for bet in [
            RouletteBet::Red,
            RouletteBet::Black,
            RouletteBet::Even,
            RouletteBet::Odd,
        ] {
            assert_eq!(evaluate(&bet, 0), (false, 0));
        }
    }

    #[test]
    fn color_partition_covers_the_wheel() {
        let reds = (1..=36).filter(|&n| is_red(n)).count();
        assert_eq!(reds, 18);
        for n in 1..=36u8 {
            let (red_wins, _) = evaluate(&RouletteBet::Red, n);
            let (black_wins, _) = evaluate(&RouletteBet::Black, n);
            assert_ne!(red_wins, black_wins);
        }
    }

    #[test]
    fn parity_bets_split_the_wheel() {
        for n in 1..=36u8 {
            let (even_wins, _) = evaluate(&RouletteBet::Even, n);
            let (odd_wins, _) = evaluate(&RouletteBet::Odd, n);
            assert_eq!(even_wins, n % 2 == 0);
            assert_eq!(odd_wins, n % 2 == 1);
        }
    }

    #[test]
    fn rejects_numbers_off_the_wheel() {
        let seeds = FairnessSeeds {
            server_seed: "9a".repeat(32),
            client_seed: "bc".repeat(8),
            nonce: 0,
        };
        assert_eq!(
            resolve(RouletteBet::Straight { number: 37 }, &seeds),
            Err(GameError::InvalidParams("roulette number out of range"))
        );
    }

    #[test]
    fn spin_stays_on_the_wheel() {
        for nonce in 0..200 {
            let seeds = FairnessSeeds {
                server_seed: "9a".repeat(32),
                client_seed: "bc".repeat(8),
                nonce,
            };
            let resolution =
                resolve(RouletteBet::Odd, &seeds).expect("resolution should succeed");
            match resolution.outcome {
                Outcome::Roulette { winning_number, .. } => assert!(winning_number <= 36),
                _ => panic!("expected roulette outcome"),
            }
        }
    }
}
