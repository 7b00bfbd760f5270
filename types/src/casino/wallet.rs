use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use thiserror::Error as ThisError;

use super::{COIN_SCALE, INITIAL_COINS, MOBY_SCALE, MULTIPLIER_SCALE};

/// Largest representable coin balance (decimal(10,2) in the persisted row).
pub const MAX_COIN_CENTS: u64 = 9_999_999_999;

/// Largest representable MOBY balance (decimal(10,4) in the persisted row).
pub const MAX_MOBY_UNITS: u64 = 9_999_999_999;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum WalletInvariantError {
    #[error("coin balance out of range (got={got}, max={max})")]
    CoinsOutOfRange { got: u64, max: u64 },
    #[error("MOBY balance out of range (got={got}, max={max})")]
    MobyOutOfRange { got: u64, max: u64 },
    #[error("MOBY-coin balance out of range (got={got}, max={max})")]
    MobyCoinsOutOfRange { got: u64, max: u64 },
}

/// Per-user balances.
///
/// Balances are unsigned fixed-point integers, so a negative balance is
/// unrepresentable; every mutation must go through the ledger, which checks
/// funds before writing. `nonce` counts resolved wagers and seeds the
/// fairness derivation for the next one.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Wallet {
    pub nonce: u64,
    /// Spendable balance in coin cents (2 decimals).
    pub coins: u64,
    /// Reward token balance in MOBY units (4 decimals).
    pub moby: u64,
    /// Converted MOBY-coin balance in cents (2 decimals).
    pub moby_coins: u64,
}

impl Wallet {
    pub fn new() -> Self {
        Self {
            nonce: 0,
            coins: INITIAL_COINS,
            moby: 0,
            moby_coins: 0,
        }
    }

    pub fn validate_invariants(&self) -> Result<(), WalletInvariantError> {
        if self.coins > MAX_COIN_CENTS {
            return Err(WalletInvariantError::CoinsOutOfRange {
                got: self.coins,
                max: MAX_COIN_CENTS,
            });
        }
        if self.moby > MAX_MOBY_UNITS {
            return Err(WalletInvariantError::MobyOutOfRange {
                got: self.moby,
                max: MAX_MOBY_UNITS,
            });
        }
        if self.moby_coins > MAX_COIN_CENTS {
            return Err(WalletInvariantError::MobyCoinsOutOfRange {
                got: self.moby_coins,
                max: MAX_COIN_CENTS,
            });
        }
        Ok(())
    }
}

impl Write for Wallet {
    fn write(&self, writer: &mut impl BufMut) {
        self.nonce.write(writer);
        self.coins.write(writer);
        self.moby.write(writer);
        self.moby_coins.write(writer);
    }
}

impl Read for Wallet {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            nonce: u64::read(reader)?,
            coins: u64::read(reader)?,
            moby: u64::read(reader)?,
            moby_coins: u64::read(reader)?,
        })
    }
}

impl EncodeSize for Wallet {
    fn encode_size(&self) -> usize {
        self.nonce.encode_size()
            + self.coins.encode_size()
            + self.moby.encode_size()
            + self.moby_coins.encode_size()
    }
}

/// Shared jackpot pool, funded by a fixed fraction of every losing bet.
///
/// The balance only grows here; payout events live outside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct JackpotPool {
    /// Accumulated balance in coin cents.
    pub balance: u64,
    /// Number of contributions applied, for reconciliation.
    pub contributions: u64,
}

impl JackpotPool {
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.contributions += 1;
    }
}

impl Write for JackpotPool {
    fn write(&self, writer: &mut impl BufMut) {
        self.balance.write(writer);
        self.contributions.write(writer);
    }
}

impl Read for JackpotPool {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            balance: u64::read(reader)?,
            contributions: u64::read(reader)?,
        })
    }
}

impl EncodeSize for JackpotPool {
    fn encode_size(&self) -> usize {
        self.balance.encode_size() + self.contributions.encode_size()
    }
}

/// Multiply an amount by a basis-point multiplier, truncating toward zero.
///
/// Returns `None` when the product does not fit in a `u64`.
pub fn mul_bps(amount: u64, bps: u64) -> Option<u64> {
    let wide = (amount as u128) * (bps as u128) / (MULTIPLIER_SCALE as u128);
    u64::try_from(wide).ok()
}

/// Render a coin-cent amount as the canonical "1234.56" decimal string.
pub fn format_coins(cents: u64) -> String {
    format!("{}.{:02}", cents / COIN_SCALE, cents % COIN_SCALE)
}

/// Render a MOBY-unit amount as the canonical "0.0002" decimal string.
pub fn format_moby(units: u64) -> String {
    format!("{}.{:04}", units / MOBY_SCALE, units % MOBY_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wallet_has_initial_grant() {
        let wallet = Wallet::new();
        assert_eq!(wallet.coins, INITIAL_COINS);
        assert_eq!(wallet.moby, 0);
        assert_eq!(wallet.moby_coins, 0);
        assert_eq!(wallet.nonce, 0);
        assert!(wallet.validate_invariants().is_ok());
    }

    #[test]
    fn invariants_reject_overwide_balances() {
        let wallet = Wallet {
            coins: MAX_COIN_CENTS + 1,
            ..Wallet::new()
        };
        assert_eq!(
            wallet.validate_invariants(),
            Err(WalletInvariantError::CoinsOutOfRange {
                got: MAX_COIN_CENTS + 1,
                max: MAX_COIN_CENTS,
            })
        );
    }

    #[test]
    fn mul_bps_truncates() {
        // 100.00 coins at 2.0204x pays 202.04.
        assert_eq!(mul_bps(10_000, 20_204), Some(20_204));
        // 0.03 coins at 0.5x truncates to 0.01.
        assert_eq!(mul_bps(3, 5_000), Some(1));
        // 1.0x is the identity.
        assert_eq!(mul_bps(123_456, 10_000), Some(123_456));
        assert_eq!(mul_bps(u64::MAX, 20_000), None);
    }

    #[test]
    fn jackpot_credit_accumulates() {
        let mut pool = JackpotPool::default();
        pool.credit(1_000);
        pool.credit(250);
        assert_eq!(pool.balance, 1_250);
        assert_eq!(pool.contributions, 2);
    }

    #[test]
    fn formatting_pads_fractions() {
        assert_eq!(format_coins(100_000), "1000.00");
        assert_eq!(format_coins(7), "0.07");
        assert_eq!(format_moby(2), "0.0002");
        assert_eq!(format_moby(12_345), "1.2345");
    }
}
