//! The operations facade.
//!
//! `House` is the single entrypoint the REST layer calls: wager resolution,
//! worker management, fishing ticks, and wallet operations. Every operation
//! is a short synchronous critical section over the caller's account; either
//! the whole unit commits or none of it does. Time is always caller-supplied
//! (`now_ms`) — the engine never reads a wall clock.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};
use whalex_types::casino::{
    mul_bps, CaughtFish, FairnessSeeds, JackpotPool, WagerRecord, Wallet, Worker, WorkerType,
    BONUS_NONCE_OFFSET, MAX_SEED_LENGTH, MOBY_BONUS_DIVISOR, MOBY_BONUS_RANGE,
};

use crate::fairness;
use crate::farm::{self, FarmError};
use crate::games::{self, registry::GameRegistry, GameError, GameParams, Outcome};
use crate::ledger::{self, ConvertDirection, LedgerError};
use crate::store::{Store, StoreError};

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum HouseError {
    #[error("account {0} not found")]
    NotFound(u64),
    #[error("account {0} already registered")]
    AlreadyRegistered(u64),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Ledger(LedgerError),
    #[error(transparent)]
    Farm(FarmError),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for HouseError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => HouseError::NotFound(id),
            StoreError::AlreadyRegistered(id) => HouseError::AlreadyRegistered(id),
        }
    }
}

impl From<LedgerError> for HouseError {
    fn from(err: LedgerError) -> Self {
        HouseError::Ledger(err)
    }
}

// Funds failures inside farm operations surface as ledger errors, so callers
// match `InsufficientFunds` in one place regardless of the flow.
impl From<FarmError> for HouseError {
    fn from(err: FarmError) -> Self {
        match err {
            FarmError::Ledger(inner) => HouseError::Ledger(inner),
            other => HouseError::Farm(other),
        }
    }
}

/// A settled wager: the immutable audit record plus the wallet it left
/// behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WagerReceipt {
    pub record: WagerRecord,
    pub wallet: Wallet,
}

/// The settlement and accrual engine.
pub struct House {
    store: Store,
    registry: GameRegistry,
    next_wager_id: AtomicU64,
}

impl Default for House {
    fn default() -> Self {
        Self::new()
    }
}

impl House {
    pub fn new() -> Self {
        Self::with_registry(GameRegistry::new())
    }

    pub fn with_registry(registry: GameRegistry) -> Self {
        Self {
            store: Store::new(),
            registry,
            next_wager_id: AtomicU64::new(1),
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    /// Create a wallet for a new user. Exactly once per user.
    pub fn register(&self, user_id: u64) -> Result<Wallet, HouseError> {
        let wallet = self.store.create_account(user_id)?;
        info!(user_id, "registered account");
        Ok(wallet)
    }

    /// Snapshot of a user's wallet.
    pub fn wallet(&self, user_id: u64) -> Result<Wallet, HouseError> {
        Ok(self.store.with_account(user_id, |a| a.wallet.clone())?)
    }

    /// Resolve and settle one wager.
    ///
    /// Derives the outcome from a fresh server seed, applies the payout and
    /// any bonus to the wallet, funds the jackpot on a loss, and appends the
    /// audit record — all inside the user's critical section.
    pub fn resolve_wager(
        &self,
        user_id: u64,
        bet: u64,
        params: GameParams,
        client_seed: Option<String>,
        now_ms: u64,
    ) -> Result<WagerReceipt, HouseError> {
        let game_type = params.game_type();
        self.registry.validate_bet(game_type, bet)?;
        if let Some(seed) = &client_seed {
            if seed.is_empty() || seed.len() > MAX_SEED_LENGTH {
                return Err(GameError::InvalidParams("client seed length").into());
            }
        }

        let receipt = self
            .store
            .with_account_and_jackpot(user_id, |account, jackpot| -> Result<WagerReceipt, HouseError> {
                let seeds = FairnessSeeds {
                    server_seed: fairness::generate_server_seed(),
                    client_seed: client_seed
                        .clone()
                        .unwrap_or_else(fairness::generate_client_seed),
                    nonce: account.wallet.nonce,
                };

                let resolution = games::resolve(&params, &seeds)?;
                let payout = if resolution.is_win {
                    mul_bps(bet, resolution.multiplier_bps)
                        .ok_or(LedgerError::BalanceOverflow)?
                } else {
                    0
                };
                let moby_bonus = if resolution.is_win && bonus_draw_hits(&seeds) {
                    bet / MOBY_BONUS_DIVISOR
                } else {
                    0
                };

                // Serialize before settling: every fallible step happens
                // ahead of the balance mutation, so the unit is all-or-nothing.
                let outcome = serde_json::to_string(&resolution.outcome)
                    .map_err(|e| HouseError::Internal(e.to_string()))?;

                let settlement = ledger::settle_wager(
                    &mut account.wallet,
                    jackpot,
                    bet,
                    payout,
                    resolution.is_win,
                    moby_bonus,
                )?;
                account.wallet.nonce += 1;
                let record = WagerRecord {
                    id: self.next_wager_id.fetch_add(1, Ordering::Relaxed),
                    user_id,
                    game_type,
                    bet,
                    payout,
                    multiplier_bps: resolution.multiplier_bps,
                    is_win: resolution.is_win,
                    moby_reward: moby_bonus,
                    seeds,
                    outcome,
                    created_at_ms: now_ms,
                };
                account.wagers.push(record.clone());

                info!(
                    user_id,
                    game = game_type.as_str(),
                    bet,
                    payout,
                    is_win = record.is_win,
                    jackpot_contribution = settlement.jackpot_contribution,
                    "wager settled"
                );
                Ok(WagerReceipt {
                    record,
                    wallet: account.wallet.clone(),
                })
            })??;
        Ok(receipt)
    }

    /// Most recent wager records, newest first.
    pub fn wager_history(&self, user_id: u64, limit: usize) -> Result<Vec<WagerRecord>, HouseError> {
        Ok(self.store.with_account(user_id, |account| {
            account.wagers.iter().rev().take(limit).cloned().collect()
        })?)
    }

    /// Replay a settled record from its disclosed seeds and confirm every
    /// derived field matches. A tampered outcome, payout, flag, or bonus
    /// fails verification.
    pub fn verify_wager(record: &WagerRecord) -> bool {
        let Ok(outcome) = serde_json::from_str::<Outcome>(&record.outcome) else {
            return false;
        };
        let params = outcome.to_params();
        if params.game_type() != record.game_type {
            return false;
        }
        let Ok(resolution) = games::resolve(&params, &record.seeds) else {
            return false;
        };
        if resolution.outcome != outcome
            || resolution.is_win != record.is_win
            || resolution.multiplier_bps != record.multiplier_bps
        {
            return false;
        }

        let expected_payout = if resolution.is_win {
            match mul_bps(record.bet, resolution.multiplier_bps) {
                Some(p) => p,
                None => return false,
            }
        } else {
            0
        };
        if record.payout != expected_payout {
            return false;
        }

        let expected_bonus = if resolution.is_win && bonus_draw_hits(&record.seeds) {
            record.bet / MOBY_BONUS_DIVISOR
        } else {
            0
        };
        record.moby_reward == expected_bonus
    }

    /// Hire the next worker; the cost tier follows the roster size.
    pub fn hire_worker(&self, user_id: u64, worker_type: WorkerType) -> Result<Worker, HouseError> {
        let worker = self
            .store
            .with_account(user_id, |account| farm::hire(account, worker_type))??;
        info!(user_id, worker = worker_type.as_str(), "hired worker");
        Ok(worker)
    }

    /// Level a worker up, debiting MOBY.
    pub fn level_up_worker(
        &self,
        user_id: u64,
        worker_type: WorkerType,
    ) -> Result<Worker, HouseError> {
        let worker = self
            .store
            .with_account(user_id, |account| farm::level_up(account, worker_type))??;
        info!(
            user_id,
            worker = worker_type.as_str(),
            level = worker.level,
            "leveled worker"
        );
        Ok(worker)
    }

    /// The hired roster.
    pub fn workers(&self, user_id: u64) -> Result<Vec<Worker>, HouseError> {
        Ok(self.store.with_account(user_id, |a| a.workers.clone())?)
    }

    /// Current inventory contents.
    pub fn inventory(&self, user_id: u64) -> Result<Vec<CaughtFish>, HouseError> {
        Ok(self.store.with_account(user_id, |a| a.inventory.clone())?)
    }

    /// Send every hired worker fishing.
    pub fn start_fishing(&self, user_id: u64, now_ms: u64) -> Result<(), HouseError> {
        self.store
            .with_account(user_id, |account| farm::start_fishing(account, now_ms))??;
        debug!(user_id, "fishing started");
        Ok(())
    }

    /// Idle every worker.
    pub fn stop_fishing(&self, user_id: u64) -> Result<(), HouseError> {
        self.store.with_account(user_id, |account| {
            farm::stop_fishing(account);
        })?;
        debug!(user_id, "fishing stopped");
        Ok(())
    }

    /// Apply every catch window elapsed up to `now_ms`; at most once each.
    pub fn process_catch_tick(
        &self,
        user_id: u64,
        now_ms: u64,
    ) -> Result<Vec<CaughtFish>, HouseError> {
        let caught = self
            .store
            .with_account(user_id, |account| {
                farm::process_windows(account, user_id, now_ms)
            })??;
        Ok(caught)
    }

    /// Convert between MOBY and MOBY-coins.
    pub fn convert_moby(
        &self,
        user_id: u64,
        direction: ConvertDirection,
        amount: u64,
    ) -> Result<Wallet, HouseError> {
        let wallet = self
            .store
            .with_account(user_id, |account| -> Result<Wallet, LedgerError> {
                ledger::convert_moby(&mut account.wallet, direction, amount)?;
                Ok(account.wallet.clone())
            })??;
        Ok(wallet)
    }

    /// Snapshot of the jackpot pool.
    pub fn jackpot(&self) -> JackpotPool {
        self.store.jackpot()
    }
}

/// The independent 1-in-10 bonus draw, reserved at its own nonce offset.
fn bonus_draw_hits(seeds: &FairnessSeeds) -> bool {
    fairness::derive_in_range(
        &seeds.server_seed,
        &seeds.client_seed,
        seeds.nonce + BONUS_NONCE_OFFSET,
        0,
        MOBY_BONUS_RANGE as u32 - 1,
    ) == 0
}
