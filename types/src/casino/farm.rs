use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

use super::{
    BASE_STORAGE_SLOTS, HIRE_COSTS, LEVEL_UP_COSTS, MAX_WORKER_LEVEL, STORAGE_STEP_LEVELS,
    STORAGE_STEP_SLOTS,
};

/// The fixed roster of hireable workers; at most one of each per account.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerType {
    Fisherman = 0,
    Graverobber = 1,
    Steamman = 2,
    Woodcutter = 3,
}

impl WorkerType {
    pub const ALL: [WorkerType; 4] = [
        WorkerType::Fisherman,
        WorkerType::Graverobber,
        WorkerType::Steamman,
        WorkerType::Woodcutter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerType::Fisherman => "Fisherman",
            WorkerType::Graverobber => "Graverobber",
            WorkerType::Steamman => "Steamman",
            WorkerType::Woodcutter => "Woodcutter",
        }
    }
}

impl TryFrom<u8> for WorkerType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WorkerType::Fisherman),
            1 => Ok(WorkerType::Graverobber),
            2 => Ok(WorkerType::Steamman),
            3 => Ok(WorkerType::Woodcutter),
            _ => Err(()),
        }
    }
}

impl Write for WorkerType {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for WorkerType {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        WorkerType::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl EncodeSize for WorkerType {
    fn encode_size(&self) -> usize {
        u8::SIZE
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkerStatus {
    #[default]
    Idle = 0,
    Fishing = 1,
}

impl TryFrom<u8> for WorkerStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WorkerStatus::Idle),
            1 => Ok(WorkerStatus::Fishing),
            _ => Err(()),
        }
    }
}

impl Write for WorkerStatus {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for WorkerStatus {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        WorkerStatus::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl EncodeSize for WorkerStatus {
    fn encode_size(&self) -> usize {
        u8::SIZE
    }
}

/// A hired farm worker. Created on hire, leveled with MOBY, never deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub worker_type: WorkerType,
    pub level: u8,
    pub status: WorkerStatus,
    /// Lifetime items this worker has personally caught.
    pub total_catch: u64,
}

impl Worker {
    pub fn new(worker_type: WorkerType) -> Self {
        Self {
            worker_type,
            level: 1,
            status: WorkerStatus::Idle,
            total_catch: 0,
        }
    }

    /// Storage slots this worker contributes to the account's capacity.
    pub fn storage_slots(&self) -> u32 {
        storage_slots_for_level(self.level)
    }

    /// Items this worker produces per catch window.
    pub fn catch_per_tick(&self) -> u32 {
        catch_per_tick_for_level(self.level)
    }
}

impl Write for Worker {
    fn write(&self, writer: &mut impl BufMut) {
        self.worker_type.write(writer);
        self.level.write(writer);
        self.status.write(writer);
        self.total_catch.write(writer);
    }
}

impl Read for Worker {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let worker_type = WorkerType::read(reader)?;
        let level = u8::read(reader)?;
        if level == 0 || level > MAX_WORKER_LEVEL {
            return Err(Error::Invalid("Worker", "level out of range"));
        }
        Ok(Self {
            worker_type,
            level,
            status: WorkerStatus::read(reader)?,
            total_catch: u64::read(reader)?,
        })
    }
}

impl EncodeSize for Worker {
    fn encode_size(&self) -> usize {
        self.worker_type.encode_size()
            + self.level.encode_size()
            + self.status.encode_size()
            + self.total_catch.encode_size()
    }
}

/// Storage slots by level: a step function adding `STORAGE_STEP_SLOTS` every
/// `STORAGE_STEP_LEVELS` levels above the base.
pub fn storage_slots_for_level(level: u8) -> u32 {
    let level = level.clamp(1, MAX_WORKER_LEVEL);
    BASE_STORAGE_SLOTS + ((level - 1) / STORAGE_STEP_LEVELS) as u32 * STORAGE_STEP_SLOTS
}

/// Catch rate by level: one item per window at level 1, stepping up on the
/// same 5-level cadence as storage.
pub fn catch_per_tick_for_level(level: u8) -> u32 {
    let level = level.clamp(1, MAX_WORKER_LEVEL);
    1 + ((level - 1) / STORAGE_STEP_LEVELS) as u32
}

/// Cost in coin cents to hire one more worker when `hired_count` are already
/// on the roster. `None` once every slot is filled.
pub fn hire_cost(hired_count: usize) -> Option<u64> {
    HIRE_COSTS.get(hired_count).copied()
}

/// Cost in MOBY units to level a worker from `level` to `level + 1`.
/// `None` at the level cap.
pub fn level_up_cost(level: u8) -> Option<u64> {
    if level == 0 {
        return None;
    }
    LEVEL_UP_COSTS.get(level as usize - 1).copied()
}

/// Rarity tiers for the fish catalog.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FishRarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

/// One entry in the fixed catch catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FishSpecies {
    pub name: &'static str,
    pub rarity: FishRarity,
    /// Draw weight out of [`FISH_WEIGHT_TOTAL`].
    pub weight: u32,
}

/// The fixed rarity-weighted catch catalog. Weights sum to
/// [`FISH_WEIGHT_TOTAL`]; indices are stable and stored in inventory slots.
pub const FISH_CATALOG: [FishSpecies; 9] = [
    FishSpecies { name: "Sardine", rarity: FishRarity::Common, weight: 320 },
    FishSpecies { name: "Herring", rarity: FishRarity::Common, weight: 240 },
    FishSpecies { name: "Mackerel", rarity: FishRarity::Uncommon, weight: 160 },
    FishSpecies { name: "Squid", rarity: FishRarity::Uncommon, weight: 110 },
    FishSpecies { name: "Tuna", rarity: FishRarity::Rare, weight: 80 },
    FishSpecies { name: "Swordfish", rarity: FishRarity::Rare, weight: 50 },
    FishSpecies { name: "Moonlit Ray", rarity: FishRarity::Epic, weight: 25 },
    FishSpecies { name: "Golden Koi", rarity: FishRarity::Epic, weight: 10 },
    FishSpecies { name: "Ancient Leviathan", rarity: FishRarity::Legendary, weight: 5 },
];

/// Sum of all catalog weights.
pub const FISH_WEIGHT_TOTAL: u32 = 1_000;

/// Map a uniform roll in `[0, FISH_WEIGHT_TOTAL)` to a catalog index by
/// walking the cumulative weights.
pub fn species_for_roll(roll: u32) -> u8 {
    let mut cumulative = 0u32;
    for (index, species) in FISH_CATALOG.iter().enumerate() {
        cumulative += species.weight;
        if roll < cumulative {
            return index as u8;
        }
    }
    // Unreachable for rolls in range; clamp to the rarest entry otherwise.
    (FISH_CATALOG.len() - 1) as u8
}

/// One physical caught item, occupying exactly one storage slot.
///
/// Catches are never merged; each one records the window that produced it and
/// the worker that made the draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaughtFish {
    /// Index into [`FISH_CATALOG`].
    pub species: u8,
    pub worker_type: WorkerType,
    /// Catch window that produced this item.
    pub window: u64,
}

impl CaughtFish {
    pub fn species_info(&self) -> &'static FishSpecies {
        &FISH_CATALOG[self.species as usize % FISH_CATALOG.len()]
    }
}

impl Write for CaughtFish {
    fn write(&self, writer: &mut impl BufMut) {
        self.species.write(writer);
        self.worker_type.write(writer);
        self.window.write(writer);
    }
}

impl Read for CaughtFish {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let species = u8::read(reader)?;
        if species as usize >= FISH_CATALOG.len() {
            return Err(Error::Invalid("CaughtFish", "species out of range"));
        }
        Ok(Self {
            species,
            worker_type: WorkerType::read(reader)?,
            window: u64::read(reader)?,
        })
    }
}

impl EncodeSize for CaughtFish {
    fn encode_size(&self) -> usize {
        self.species.encode_size() + self.worker_type.encode_size() + self.window.encode_size()
    }
}
