//! Track Entity Pool and Spawner
//!
//! The road ahead is a fixed-size pool of slots, each holding exactly one
//! obstacle and at most one coin. Slots advance toward the player every frame
//! and are recycled in place once they pass behind: new lane, new class, new
//! coin, respawned one full pool-span ahead. Entity count is constant for the
//! whole run; nothing is allocated after seeding.
//!
//! Risk and reward are coupled at spawn time: a low barrier's coin floats
//! above it (collect mid-jump), a high gate's coin hangs below it (collect
//! mid-slide). The evasive action that dodges the obstacle is the one that
//! earns the coin.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::game::config::GameConfig;

/// Obstacle class, named by the evasive action it demands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Knee-high barrier; jump over it
    LowBarrier,
    /// Overhead gate; slide under it
    HighGate,
}

impl ObstacleKind {
    /// Height of the coin paired with this class.
    #[inline]
    pub fn coin_height(self, config: &GameConfig) -> f32 {
        match self {
            ObstacleKind::LowBarrier => config.coin_over_height,
            ObstacleKind::HighGate => config.coin_under_height,
        }
    }
}

/// One obstacle, anchored to a lane at spawn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Obstacle {
    /// Lane the obstacle blocks
    pub lane: usize,
    /// Longitudinal position; negative = ahead of the player
    pub z: f32,
    /// Class deciding the required evasive action
    pub kind: ObstacleKind,
}

/// One collectible coin, paired with its slot's obstacle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coin {
    /// Lane the coin hangs in (same as its obstacle)
    pub lane: usize,
    /// Height above the ground plane
    pub y: f32,
    /// Longitudinal position, advances in lockstep with the obstacle
    pub z: f32,
}

/// A recycled spawn slot: one obstacle, zero or one coin.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackSlot {
    /// The slot's obstacle
    pub obstacle: Obstacle,
    /// The paired coin; `None` once collected, until the slot recycles
    pub coin: Option<Coin>,
}

/// The pool of slots making up the visible road.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    slots: Vec<TrackSlot>,
}

impl Track {
    /// Seed the initial population: `pool_size` slots at evenly spaced
    /// depths ahead of the player, so the road is never empty.
    pub fn seeded(config: &GameConfig, rng: &mut GameRng) -> Self {
        let mut slots = Vec::with_capacity(config.pool_size);
        for i in 0..config.pool_size {
            let z = -((i + 1) as f32 * config.spawn_spacing);
            slots.push(spawn_at(z, config, rng));
        }
        Self { slots }
    }

    /// All slots, index-addressed.
    #[inline]
    pub fn slots(&self) -> &[TrackSlot] {
        &self.slots
    }

    /// Number of slots (constant for the run).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the pool is empty (only true for a zero-size config).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Remove and return a slot's coin on collection.
    pub fn take_coin(&mut self, slot_index: usize) -> Option<Coin> {
        self.slots.get_mut(slot_index).and_then(|slot| slot.coin.take())
    }

    /// Advance every slot toward the player and recycle the ones that have
    /// passed. Returns the indices respawned this frame.
    pub fn advance(&mut self, config: &GameConfig, rng: &mut GameRng) -> Vec<usize> {
        let span = self.slots.len() as f32 * config.spawn_spacing;
        let mut recycled = Vec::new();

        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.obstacle.z += config.run_speed;
            if let Some(coin) = &mut slot.coin {
                coin.z += config.run_speed;
            }

            if slot.obstacle.z > config.recycle_behind {
                // Respawn one full pool-span ahead; spacing stays exact
                let z = slot.obstacle.z - span;
                *slot = spawn_at(z, config, rng);
                recycled.push(index);
            }
        }

        recycled
    }

    /// Throw away the current population and reseed (restart).
    pub fn reseed(&mut self, config: &GameConfig, rng: &mut GameRng) {
        *self = Self::seeded(config, rng);
    }

    /// Build a track from hand-placed slots for collision tests.
    #[cfg(test)]
    pub(crate) fn from_slots(slots: Vec<TrackSlot>) -> Self {
        Self { slots }
    }
}

/// Populate one slot at the given depth: uniform random lane, uniform random
/// class, and the class-matched coin.
fn spawn_at(z: f32, config: &GameConfig, rng: &mut GameRng) -> TrackSlot {
    let lane = rng.next_index(config.lane_count);
    let kind = if rng.next_bool(config.low_barrier_chance) {
        ObstacleKind::LowBarrier
    } else {
        ObstacleKind::HighGate
    };

    TrackSlot {
        obstacle: Obstacle { lane, z, kind },
        coin: Some(Coin {
            lane,
            y: kind.coin_height(config),
            z,
        }),
    }
}
