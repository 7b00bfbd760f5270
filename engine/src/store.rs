//! In-memory account store.
//!
//! Each account lives behind its own mutex, so every operation for a user is
//! one serialized critical section over "read balance, validate, write
//! balance". The jackpot pool has a separate lock, always acquired while the
//! account lock is already held — one fixed order, no lock cycles.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use whalex_types::casino::{CaughtFish, JackpotPool, WagerRecord, Wallet, Worker};

use crate::farm::FishingSession;

/// Everything the engine tracks for one user. A single lock covers all of it
/// because every flow (wager, hire, level, catch) touches the wallet.
#[derive(Clone, Debug, Default)]
pub struct Account {
    pub wallet: Wallet,
    pub workers: Vec<Worker>,
    pub inventory: Vec<CaughtFish>,
    pub fishing: Option<FishingSession>,
    /// Append-only wager audit log; records are pushed and never touched
    /// again.
    pub wagers: Vec<WagerRecord>,
}

impl Account {
    fn new() -> Self {
        Self {
            wallet: Wallet::new(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("account {0} not found")]
    NotFound(u64),
    #[error("account {0} already registered")]
    AlreadyRegistered(u64),
}

/// Account map plus the jackpot singleton.
#[derive(Default)]
pub struct Store {
    accounts: RwLock<HashMap<u64, Arc<Mutex<Account>>>>,
    jackpot: Mutex<JackpotPool>,
}

// A poisoned lock only means another thread panicked mid-operation; the data
// is still structurally valid, so recover the guard rather than cascade.
fn recover<'a, T>(
    result: Result<MutexGuard<'a, T>, PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    result.unwrap_or_else(PoisonError::into_inner)
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account with a fresh wallet. Exactly once per user.
    pub fn create_account(&self, user_id: u64) -> Result<Wallet, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&user_id) {
            return Err(StoreError::AlreadyRegistered(user_id));
        }
        let account = Account::new();
        let wallet = account.wallet.clone();
        accounts.insert(user_id, Arc::new(Mutex::new(account)));
        Ok(wallet)
    }

    fn account(&self, user_id: u64) -> Result<Arc<Mutex<Account>>, StoreError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts
            .get(&user_id)
            .cloned()
            .ok_or(StoreError::NotFound(user_id))
    }

    /// Run `f` inside the user's critical section.
    pub fn with_account<R>(
        &self,
        user_id: u64,
        f: impl FnOnce(&mut Account) -> R,
    ) -> Result<R, StoreError> {
        let account = self.account(user_id)?;
        let mut guard = recover(account.lock());
        Ok(f(&mut guard))
    }

    /// Run `f` with both the user's account and the jackpot pool locked.
    /// The account lock is taken first; every caller uses this same order.
    pub fn with_account_and_jackpot<R>(
        &self,
        user_id: u64,
        f: impl FnOnce(&mut Account, &mut JackpotPool) -> R,
    ) -> Result<R, StoreError> {
        let account = self.account(user_id)?;
        let mut guard = recover(account.lock());
        let mut jackpot = recover(self.jackpot.lock());
        Ok(f(&mut guard, &mut jackpot))
    }

    /// Snapshot of the jackpot pool.
    pub fn jackpot(&self) -> JackpotPool {
        recover(self.jackpot.lock()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whalex_types::casino::INITIAL_COINS;

    #[test]
    fn create_account_grants_initial_wallet_once() {
        let store = Store::new();
        let wallet = store.create_account(1).expect("registration should succeed");
        assert_eq!(wallet.coins, INITIAL_COINS);

        assert_eq!(
            store.create_account(1),
            Err(StoreError::AlreadyRegistered(1))
        );
    }

    #[test]
    fn with_account_requires_registration() {
        let store = Store::new();
        assert_eq!(
            store.with_account(9, |_| ()).unwrap_err(),
            StoreError::NotFound(9)
        );
    }

    #[test]
    fn mutations_inside_the_section_persist() {
        let store = Store::new();
        store.create_account(1).expect("registration should succeed");

        store
            .with_account(1, |account| {
                account.wallet.coins = 42;
            })
            .expect("account should exist");

        let coins = store
            .with_account(1, |account| account.wallet.coins)
            .expect("account should exist");
        assert_eq!(coins, 42);
    }

    #[test]
    fn jackpot_snapshot_reflects_credits() {
        let store = Store::new();
        store.create_account(1).expect("registration should succeed");
        store
            .with_account_and_jackpot(1, |_, jackpot| jackpot.credit(500))
            .expect("account should exist");
        assert_eq!(store.jackpot().balance, 500);
    }
}
