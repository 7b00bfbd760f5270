//! Game registry: per-variant metadata and table limits.
//!
//! The registry is the single place callers consult for what is playable and
//! at what stakes; `House::resolve_wager` validates every bet against it
//! before any draw is made.

use std::collections::HashMap;
use whalex_types::casino::{GameType, COIN_SCALE};

use super::GameError;

/// Game category for UI grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCategory {
    /// Single-draw table games (dice, roulette).
    Table,
    /// Reel and board games (slots, plinko, mines).
    Arcade,
    /// Session-style games with carried state (hi-lo, crash).
    Session,
}

/// Static metadata about a game variant.
#[derive(Clone, Debug)]
pub struct GameInfo {
    pub game_type: GameType,
    pub name: &'static str,
    pub description: &'static str,
    pub category: GameCategory,
    /// Minimum stake in coin cents.
    pub min_bet: u64,
    /// Maximum stake in coin cents.
    pub max_bet: u64,
    /// Typical house edge in basis points.
    pub house_edge_bps: u16,
    pub active: bool,
}

impl GameInfo {
    const fn new(
        game_type: GameType,
        name: &'static str,
        description: &'static str,
        category: GameCategory,
        min_bet: u64,
        max_bet: u64,
        house_edge_bps: u16,
    ) -> Self {
        Self {
            game_type,
            name,
            description,
            category,
            min_bet,
            max_bet,
            house_edge_bps,
            active: true,
        }
    }
}

/// Registry of playable games, their limits, and their active status.
#[derive(Clone, Debug)]
pub struct GameRegistry {
    active: HashMap<GameType, bool>,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRegistry {
    pub fn new() -> Self {
        let mut active = HashMap::new();
        for game_type in GameType::ALL {
            active.insert(game_type, true);
        }
        Self { active }
    }

    /// Static metadata for a game type.
    pub fn get_info(game_type: GameType) -> GameInfo {
        match game_type {
            GameType::Dice => GameInfo::new(
                GameType::Dice,
                "Dice",
                "Roll under your target for a fair-odds payout.",
                GameCategory::Table,
                10,
                10_000 * COIN_SCALE,
                100, // 1.00% (99-line payout)
            ),
            GameType::Slots => GameInfo::new(
                GameType::Slots,
                "Slots",
                "Five reels; line up three or more of the first reel's symbol.",
                GameCategory::Arcade,
                10,
                1_000 * COIN_SCALE,
                450,
            ),
            GameType::HiLo => GameInfo::new(
                GameType::HiLo,
                "Hi-Lo",
                "Call the next card higher or lower; streaks stack 1.5x each.",
                GameCategory::Session,
                10,
                1_000 * COIN_SCALE,
                300,
            ),
            GameType::Mines => GameInfo::new(
                GameType::Mines,
                "Mines",
                "Pick a safe cell; every reveal compounds 1.2x.",
                GameCategory::Arcade,
                10,
                5_000 * COIN_SCALE,
                350,
            ),
            GameType::Plinko => GameInfo::new(
                GameType::Plinko,
                "Plinko",
                "Drop through sixteen rows toward the 1000x edges.",
                GameCategory::Arcade,
                10,
                1_000 * COIN_SCALE,
                320,
            ),
            GameType::Roulette => GameInfo::new(
                GameType::Roulette,
                "Roulette",
                "Straight numbers pay 35x; colors and parity pay evens.",
                GameCategory::Table,
                10,
                10_000 * COIN_SCALE,
                270,
            ),
            GameType::Crash => GameInfo::new(
                GameType::Crash,
                "Crash",
                "Declare a cash-out and beat the curve up to 10x.",
                GameCategory::Session,
                10,
                5_000 * COIN_SCALE,
                300,
            ),
        }
    }

    pub fn is_active(&self, game_type: GameType) -> bool {
        self.active.get(&game_type).copied().unwrap_or(false)
    }

    pub fn set_active(&mut self, game_type: GameType, active: bool) {
        self.active.insert(game_type, active);
    }

    pub fn active_games(&self) -> Vec<GameType> {
        GameType::ALL
            .iter()
            .copied()
            .filter(|gt| self.is_active(*gt))
            .collect()
    }

    pub fn all_games_info(&self) -> Vec<GameInfo> {
        GameType::ALL
            .iter()
            .map(|&gt| {
                let mut info = Self::get_info(gt);
                info.active = self.is_active(gt);
                info
            })
            .collect()
    }

    /// Reject bets on inactive games or outside the table limits.
    pub fn validate_bet(&self, game_type: GameType, bet: u64) -> Result<(), GameError> {
        if !self.is_active(game_type) {
            return Err(GameError::InvalidParams("game is not active"));
        }
        let info = Self::get_info(game_type);
        if bet < info.min_bet {
            return Err(GameError::InvalidParams("bet below table minimum"));
        }
        if bet > info.max_bet {
            return Err(GameError::InvalidParams("bet above table maximum"));
        }
        Ok(())
    }
}
