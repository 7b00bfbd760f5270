//! Balance settlement.
//!
//! Every coin or MOBY mutation in the engine funnels through this module.
//! A settlement applies `balance - bet + payout` as one checked step, credits
//! any bonus, and funds the jackpot on a loss inside the same logical unit;
//! callers hold the account's lock across the whole call, so no other reader
//! ever observes a debited-but-not-credited wallet.
//!
//! Funds checks happen here, immediately before mutation, not at UI-gating
//! time: two back-to-back wagers race to this point and the second one sees
//! the first one's balance.

use thiserror::Error;
use whalex_types::casino::{
    mul_bps, JackpotPool, Wallet, JACKPOT_CONTRIBUTION_BPS, MOBY_TO_COINS_RATE,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("insufficient funds (required={required}, available={available})")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Receipt for one applied settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub bet: u64,
    pub payout: u64,
    pub moby_bonus: u64,
    /// Coins credited to the jackpot pool (0 on a win).
    pub jackpot_contribution: u64,
    pub coins_after: u64,
    pub moby_after: u64,
}

/// Settle one resolved wager against a wallet and the jackpot pool.
///
/// Preconditions are re-validated here: positive bet and sufficient coins.
/// On failure nothing is mutated.
pub fn settle_wager(
    wallet: &mut Wallet,
    jackpot: &mut JackpotPool,
    bet: u64,
    payout: u64,
    is_win: bool,
    moby_bonus: u64,
) -> Result<Settlement, LedgerError> {
    if bet == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    if wallet.coins < bet {
        return Err(LedgerError::InsufficientFunds {
            required: bet,
            available: wallet.coins,
        });
    }

    // One signed delta: -bet + payout. The subtraction cannot fail after the
    // funds check above.
    let coins_after = wallet
        .coins
        .checked_sub(bet)
        .and_then(|v| v.checked_add(payout))
        .ok_or(LedgerError::BalanceOverflow)?;
    let moby_after = wallet
        .moby
        .checked_add(moby_bonus)
        .ok_or(LedgerError::BalanceOverflow)?;

    let jackpot_contribution = if is_win {
        0
    } else {
        mul_bps(bet, JACKPOT_CONTRIBUTION_BPS).ok_or(LedgerError::BalanceOverflow)?
    };

    wallet.coins = coins_after;
    wallet.moby = moby_after;
    if jackpot_contribution > 0 {
        jackpot.credit(jackpot_contribution);
    }

    Ok(Settlement {
        bet,
        payout,
        moby_bonus,
        jackpot_contribution,
        coins_after,
        moby_after,
    })
}

/// Debit coins for a hire cost. No mutation on failure.
pub fn debit_coins(wallet: &mut Wallet, amount: u64) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    if wallet.coins < amount {
        return Err(LedgerError::InsufficientFunds {
            required: amount,
            available: wallet.coins,
        });
    }
    wallet.coins -= amount;
    Ok(())
}

/// Debit MOBY for a level-up cost. No mutation on failure.
pub fn debit_moby(wallet: &mut Wallet, amount: u64) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    if wallet.moby < amount {
        return Err(LedgerError::InsufficientFunds {
            required: amount,
            available: wallet.moby,
        });
    }
    wallet.moby -= amount;
    Ok(())
}

/// Conversion direction between the MOBY and MOBY-coin balances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertDirection {
    MobyToMobyCoins,
    MobyCoinsToMoby,
}

/// Convert between MOBY (4 decimals) and MOBY-coins (2 decimals) at
/// 1 MOBY = 5,000 MOBY-coins. `amount` is in MOBY units either way.
pub fn convert_moby(
    wallet: &mut Wallet,
    direction: ConvertDirection,
    amount: u64,
) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    // amount MOBY units (1e-4) * 5,000 coins/MOBY * 100 cents/coin / 1e4.
    let cents = amount
        .checked_mul(MOBY_TO_COINS_RATE / 100)
        .ok_or(LedgerError::BalanceOverflow)?;

    match direction {
        ConvertDirection::MobyToMobyCoins => {
            if wallet.moby < amount {
                return Err(LedgerError::InsufficientFunds {
                    required: amount,
                    available: wallet.moby,
                });
            }
            let moby_coins_after = wallet
                .moby_coins
                .checked_add(cents)
                .ok_or(LedgerError::BalanceOverflow)?;
            wallet.moby -= amount;
            wallet.moby_coins = moby_coins_after;
        }
        ConvertDirection::MobyCoinsToMoby => {
            if wallet.moby_coins < cents {
                return Err(LedgerError::InsufficientFunds {
                    required: cents,
                    available: wallet.moby_coins,
                });
            }
            let moby_after = wallet
                .moby
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow)?;
            wallet.moby_coins -= cents;
            wallet.moby = moby_after;
        }
    }
    Ok(())
}
