//! Casino domain types.
//!
//! Defines wallet/wager/jackpot/farm state and constants used by the
//! settlement engine and its callers.

mod codec;
mod constants;
mod farm;
mod wager;
mod wallet;

pub use codec::{read_string, string_encode_size, write_string};
pub use constants::*;
pub use farm::*;
pub use wager::*;
pub use wallet::*;

#[cfg(test)]
mod tests;
