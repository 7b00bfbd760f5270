use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

use super::{read_string, string_encode_size, write_string, MAX_OUTCOME_LENGTH, MAX_SEED_LENGTH};

/// The closed set of game variants the resolver dispatches over.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    Dice = 0,
    Slots = 1,
    HiLo = 2,
    Mines = 3,
    Plinko = 4,
    Roulette = 5,
    Crash = 6,
}

impl GameType {
    pub const ALL: [GameType; 7] = [
        GameType::Dice,
        GameType::Slots,
        GameType::HiLo,
        GameType::Mines,
        GameType::Plinko,
        GameType::Roulette,
        GameType::Crash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Dice => "dice",
            GameType::Slots => "slots",
            GameType::HiLo => "hilo",
            GameType::Mines => "mines",
            GameType::Plinko => "plinko",
            GameType::Roulette => "roulette",
            GameType::Crash => "crash",
        }
    }
}

impl TryFrom<u8> for GameType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GameType::Dice),
            1 => Ok(GameType::Slots),
            2 => Ok(GameType::HiLo),
            3 => Ok(GameType::Mines),
            4 => Ok(GameType::Plinko),
            5 => Ok(GameType::Roulette),
            6 => Ok(GameType::Crash),
            _ => Err(()),
        }
    }
}

impl Write for GameType {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameType {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        GameType::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl EncodeSize for GameType {
    fn encode_size(&self) -> usize {
        u8::SIZE
    }
}

/// The inputs a player needs to verify a resolved wager.
///
/// The server seed is generated fresh for every wager and disclosed only in
/// the settled record; the client seed is player-supplied (or generated on
/// their behalf); the nonce is the wallet's wager counter at resolution time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessSeeds {
    pub server_seed: String,
    pub client_seed: String,
    pub nonce: u64,
}

impl Write for FairnessSeeds {
    fn write(&self, writer: &mut impl BufMut) {
        write_string(&self.server_seed, writer);
        write_string(&self.client_seed, writer);
        self.nonce.write(writer);
    }
}

impl Read for FairnessSeeds {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            server_seed: read_string(reader, MAX_SEED_LENGTH)?,
            client_seed: read_string(reader, MAX_SEED_LENGTH)?,
            nonce: u64::read(reader)?,
        })
    }
}

impl EncodeSize for FairnessSeeds {
    fn encode_size(&self) -> usize {
        string_encode_size(&self.server_seed)
            + string_encode_size(&self.client_seed)
            + self.nonce.encode_size()
    }
}

/// Immutable record of one resolved wager.
///
/// Appended exactly once at settlement, never mutated: together with the
/// disclosed seeds, `outcome` (a JSON payload carrying every game parameter)
/// lets anyone replay the resolution and audit the payout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerRecord {
    pub id: u64,
    pub user_id: u64,
    pub game_type: GameType,
    /// Stake in coin cents.
    pub bet: u64,
    /// Total returned to the wallet in coin cents (0 on a loss).
    pub payout: u64,
    /// Applied multiplier in basis points (0 on a loss).
    pub multiplier_bps: u64,
    pub is_win: bool,
    /// Bonus reward in MOBY units (0 unless the bonus draw hit).
    pub moby_reward: u64,
    pub seeds: FairnessSeeds,
    /// Serialized game outcome.
    pub outcome: String,
    pub created_at_ms: u64,
}

impl Write for WagerRecord {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.user_id.write(writer);
        self.game_type.write(writer);
        self.bet.write(writer);
        self.payout.write(writer);
        self.multiplier_bps.write(writer);
        self.is_win.write(writer);
        self.moby_reward.write(writer);
        self.seeds.write(writer);
        write_string(&self.outcome, writer);
        self.created_at_ms.write(writer);
    }
}

impl Read for WagerRecord {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: u64::read(reader)?,
            user_id: u64::read(reader)?,
            game_type: GameType::read(reader)?,
            bet: u64::read(reader)?,
            payout: u64::read(reader)?,
            multiplier_bps: u64::read(reader)?,
            is_win: bool::read(reader)?,
            moby_reward: u64::read(reader)?,
            seeds: FairnessSeeds::read(reader)?,
            outcome: read_string(reader, MAX_OUTCOME_LENGTH)?,
            created_at_ms: u64::read(reader)?,
        })
    }
}

impl EncodeSize for WagerRecord {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.user_id.encode_size()
            + self.game_type.encode_size()
            + self.bet.encode_size()
            + self.payout.encode_size()
            + self.multiplier_bps.encode_size()
            + self.is_win.encode_size()
            + self.moby_reward.encode_size()
            + self.seeds.encode_size()
            + string_encode_size(&self.outcome)
            + self.created_at_ms.encode_size()
    }
}
