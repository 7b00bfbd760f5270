//! WhaleX settlement and accrual engine.
//!
//! This crate contains the deterministic wager-resolution logic, the ledger,
//! and the idle fishing engine used by the API layer.
//!
//! ## Determinism requirements
//! - Do not read wall-clock time inside the engine; callers supply `now_ms`.
//! - Do not sample ambient randomness in a settlement path; every outcome
//!   derives from the wager's seeds, and OS randomness is used only to mint
//!   fresh secrets.
//! - A settled wager must be replayable bit-for-bit from its record.
//!
//! ## Consistency invariants
//! Every operation for a user runs inside that user's critical section; a
//! balance is read, validated, and written as one atomic step. The jackpot
//! pool is only ever touched while an account lock is held.
//!
//! The primary entrypoint is [`House`].

pub mod fairness;
pub mod farm;
pub mod games;
pub mod ledger;
pub mod store;

mod house;

pub use farm::{FarmError, FishingSession};
pub use games::{
    registry::{GameCategory, GameInfo, GameRegistry},
    GameError, GameParams, HiLoGuess, Outcome, Resolution, RouletteBet,
};
pub use house::{House, HouseError, WagerReceipt};
pub use ledger::{ConvertDirection, LedgerError, Settlement};
pub use store::{Account, Store, StoreError};
