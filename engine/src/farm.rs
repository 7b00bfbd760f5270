//! Idle fishing engine.
//!
//! Workers toggle between `Idle` and `Fishing` as a group. While a session is
//! active, every elapsed 60-second window awards each fishing worker its
//! level's catch count, bounded by the account's storage capacity. Windows
//! are processed at most once: the session records how many it has applied,
//! and catches derive from a per-session seed keyed by window and draw
//! index, so a duplicated or replayed tick call can never double-award.

use thiserror::Error;
use tracing::debug;
use whalex_types::casino::{
    hire_cost, level_up_cost, species_for_roll, CaughtFish, Worker, WorkerStatus, WorkerType,
    CATCH_DRAWS_PER_WINDOW, CATCH_TICK_MS, FISH_WEIGHT_TOTAL,
};

use crate::fairness;
use crate::ledger::{self, LedgerError};
use crate::store::Account;

/// State of one active fishing run.
#[derive(Clone, Debug)]
pub struct FishingSession {
    pub started_at_ms: u64,
    /// Session-local seed for catch derivation; generated at start, never
    /// reused across sessions.
    pub catch_seed: String,
    /// Windows already applied; the idempotency cursor.
    pub windows_processed: u64,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FarmError {
    #[error("no workers hired")]
    NoWorkersHired,
    #[error("all worker slots are hired")]
    AllSlotsHired,
    #[error("{0:?} is already hired")]
    AlreadyHired(WorkerType),
    #[error("{0:?} is not hired")]
    WorkerNotFound(WorkerType),
    #[error("worker is at max level")]
    MaxLevelReached,
    #[error("storage is full")]
    StorageFull,
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Total storage capacity across the hired roster.
pub fn total_capacity(workers: &[Worker]) -> u32 {
    workers.iter().map(|w| w.storage_slots()).sum()
}

/// Hire one more worker, debiting the tier cost for the current roster size.
pub fn hire(account: &mut Account, worker_type: WorkerType) -> Result<Worker, FarmError> {
    let cost = hire_cost(account.workers.len()).ok_or(FarmError::AllSlotsHired)?;
    if account
        .workers
        .iter()
        .any(|w| w.worker_type == worker_type)
    {
        return Err(FarmError::AlreadyHired(worker_type));
    }
    ledger::debit_coins(&mut account.wallet, cost)?;

    let worker = Worker::new(worker_type);
    account.workers.push(worker.clone());
    Ok(worker)
}

/// Raise a worker one level, debiting the MOBY cost for its current level.
pub fn level_up(account: &mut Account, worker_type: WorkerType) -> Result<Worker, FarmError> {
    let index = account
        .workers
        .iter()
        .position(|w| w.worker_type == worker_type)
        .ok_or(FarmError::WorkerNotFound(worker_type))?;

    let cost = level_up_cost(account.workers[index].level).ok_or(FarmError::MaxLevelReached)?;
    ledger::debit_moby(&mut account.wallet, cost)?;

    let worker = &mut account.workers[index];
    worker.level += 1;
    Ok(worker.clone())
}

/// Put every hired worker to work. A no-op when a session is already
/// running, so a repeated start cannot reset the window cursor.
pub fn start_fishing(account: &mut Account, now_ms: u64) -> Result<(), FarmError> {
    if account.workers.is_empty() {
        return Err(FarmError::NoWorkersHired);
    }
    if account.inventory.len() >= total_capacity(&account.workers) as usize {
        return Err(FarmError::StorageFull);
    }
    if account.fishing.is_some() {
        return Ok(());
    }

    for worker in &mut account.workers {
        worker.status = WorkerStatus::Fishing;
    }
    account.fishing = Some(FishingSession {
        started_at_ms: now_ms,
        catch_seed: fairness::generate_server_seed(),
        windows_processed: 0,
    });
    Ok(())
}

/// Idle every worker and end the session. Always allowed.
pub fn stop_fishing(account: &mut Account) {
    for worker in &mut account.workers {
        worker.status = WorkerStatus::Idle;
    }
    account.fishing = None;
}

/// Apply every catch window elapsed up to `now_ms`.
///
/// Returns the newly caught items (empty when idle or when no full window
/// has elapsed since the last call). Truncates mid-batch the moment capacity
/// runs out, and force-idles the roster once storage is exhausted.
pub fn process_windows(
    account: &mut Account,
    user_id: u64,
    now_ms: u64,
) -> Result<Vec<CaughtFish>, FarmError> {
    if account.workers.is_empty() {
        return Err(FarmError::NoWorkersHired);
    }

    let Account {
        fishing,
        workers,
        inventory,
        ..
    } = account;
    let Some(session) = fishing.as_mut() else {
        // Idle accounts accrue nothing; the call stays idempotent.
        return Ok(Vec::new());
    };

    let available = now_ms.saturating_sub(session.started_at_ms) / CATCH_TICK_MS;
    let capacity = total_capacity(workers) as usize;
    // Catches derive from the session seed and the caller's identity, never
    // from the wall clock, so a window replays identically.
    let client_key = user_id.to_string();

    let mut caught = Vec::new();
    let mut full = inventory.len() >= capacity;

    'windows: for window in session.windows_processed..available {
        let mut draw_index = 0u64;
        for worker in workers.iter_mut() {
            if worker.status != WorkerStatus::Fishing {
                continue;
            }
            for _ in 0..worker.catch_per_tick() {
                if inventory.len() >= capacity {
                    full = true;
                    break 'windows;
                }
                let nonce = window * CATCH_DRAWS_PER_WINDOW + draw_index;
                draw_index += 1;
                let roll = fairness::derive_in_range(
                    &session.catch_seed,
                    &client_key,
                    nonce,
                    0,
                    FISH_WEIGHT_TOTAL - 1,
                );
                let fish = CaughtFish {
                    species: species_for_roll(roll),
                    worker_type: worker.worker_type,
                    window,
                };
                inventory.push(fish.clone());
                caught.push(fish);
                worker.total_catch += 1;
            }
        }
    }
    // The cursor only ever advances; a tick carrying an earlier timestamp
    // must not re-open already-awarded windows.
    session.windows_processed = session.windows_processed.max(available);

    if !caught.is_empty() {
        debug!(
            user_id,
            windows = available,
            caught = caught.len(),
            occupancy = inventory.len(),
            capacity,
            "processed catch windows"
        );
    }

    if full || inventory.len() >= capacity {
        stop_fishing(account);
    }
    Ok(caught)
}
