//! Domain types for the WhaleX settlement and accrual engine.
//!
//! Everything here is pure data: balances, wager records, farm workers, and
//! the constants that govern them, together with their canonical binary
//! encodings. Logic that derives randomness or mutates state lives in
//! `whalex-engine`.

pub mod casino;

pub use casino::{
    CaughtFish, FairnessSeeds, FishRarity, FishSpecies, GameType, JackpotPool, Wallet,
    WalletInvariantError, Worker, WorkerStatus, WorkerType,
};
