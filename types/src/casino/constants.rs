/// Coins are stored as hundredths (two decimal places).
pub const COIN_SCALE: u64 = 100;

/// MOBY reward tokens are stored as ten-thousandths (four decimal places).
pub const MOBY_SCALE: u64 = 10_000;

/// Multipliers are stored in basis points (10_000 = 1.0x).
pub const MULTIPLIER_SCALE: u64 = 10_000;

/// Coins granted to a wallet at registration (1,000.00).
pub const INITIAL_COINS: u64 = 1_000 * COIN_SCALE;

/// Fraction of a losing bet credited to the jackpot pool, in basis points.
pub const JACKPOT_CONTRIBUTION_BPS: u64 = 1_000;

/// One winning wager in this many rolls a MOBY bonus.
pub const MOBY_BONUS_RANGE: u64 = 10;

/// MOBY bonus per coin cent: 0.0002 MOBY per coin, so one MOBY unit per 50
/// coin cents.
pub const MOBY_BONUS_DIVISOR: u64 = 50;

/// Conversion rate between the two wallet denominations:
/// 1 MOBY = 5,000 MOBY-coins.
pub const MOBY_TO_COINS_RATE: u64 = 5_000;

/// Nonce offset reserved for the bonus draw, above every in-game draw index.
pub const BONUS_NONCE_OFFSET: u64 = 64;

/// Maximum accepted seed length (hex-encoded 32 bytes).
pub const MAX_SEED_LENGTH: usize = 64;

/// Maximum serialized outcome payload length.
pub const MAX_OUTCOME_LENGTH: usize = 2_048;

/// Hire cost for the Nth worker, in coin cents. The table length is also the
/// account-wide worker cap.
pub const HIRE_COSTS: [u64; 4] = [
    1_000 * COIN_SCALE,
    5_000 * COIN_SCALE,
    20_000 * COIN_SCALE,
    50_000 * COIN_SCALE,
];

/// Level-up cost from level N to N+1, in MOBY units (0.0100 .. 0.7575).
/// Strictly increasing; the table length fixes the level cap at 25.
pub const LEVEL_UP_COSTS: [u64; 24] = [
    100, 150, 225, 325, 450, 600, 775, 975, 1_200, 1_450, 1_725, 2_025, 2_350, 2_700, 3_075,
    3_475, 3_900, 4_350, 4_825, 5_325, 5_850, 6_400, 6_975, 7_575,
];

/// Maximum worker level.
pub const MAX_WORKER_LEVEL: u8 = 25;

/// Storage slots every worker starts with at level 1.
pub const BASE_STORAGE_SLOTS: u32 = 30;

/// Additional slots granted every `STORAGE_STEP_LEVELS` levels.
pub const STORAGE_STEP_SLOTS: u32 = 5;
pub const STORAGE_STEP_LEVELS: u8 = 5;

/// Elapsed fishing time covered by one catch window.
pub const CATCH_TICK_MS: u64 = 60_000;

/// Nonce stride per catch window; bounds the draws a single window may make.
pub const CATCH_DRAWS_PER_WINDOW: u64 = 64;
