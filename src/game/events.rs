//! Game Events
//!
//! Discrete notifications emitted by the frame driver for the HUD and any
//! other observer (sound, haptics, session logs). Continuous values (score
//! ticking up, entity poses) travel in the per-frame snapshot instead; events
//! are only for things that *happen*.

use serde::{Deserialize, Serialize};

use crate::game::track::ObstacleKind;

/// Something that happened during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (first start or restart)
    RunStarted {
        /// Frame counter at the start of the run
        frame: u64,
    },

    /// A coin was picked up
    CoinCollected {
        /// Frame of the pickup
        frame: u64,
        /// Slot the coin came from
        slot: usize,
        /// Currency credited
        value: u32,
        /// Balance after crediting
        currency: u32,
    },

    /// Jump skill leveled up
    JumpLevelUp {
        /// Frame of the level-up
        frame: u64,
        /// The new level
        level: u8,
    },

    /// The run ended on an obstacle
    Crashed {
        /// Frame of the hit
        frame: u64,
        /// Slot of the obstacle
        slot: usize,
        /// Class of obstacle hit
        kind: ObstacleKind,
        /// Final distance score of the run
        score: u32,
    },

    /// A jump level was bought in the shop
    UpgradePurchased {
        /// Level after the purchase
        level: u8,
        /// Balance after paying
        currency: u32,
    },
}

impl GameEvent {
    /// Frame the event belongs to, where applicable (shop purchases happen
    /// between runs, outside the frame loop).
    pub fn frame(&self) -> Option<u64> {
        match self {
            GameEvent::RunStarted { frame }
            | GameEvent::CoinCollected { frame, .. }
            | GameEvent::JumpLevelUp { frame, .. }
            | GameEvent::Crashed { frame, .. } => Some(*frame),
            GameEvent::UpgradePurchased { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessor() {
        let crash = GameEvent::Crashed {
            frame: 42,
            slot: 1,
            kind: ObstacleKind::HighGate,
            score: 310,
        };
        assert_eq!(crash.frame(), Some(42));

        let buy = GameEvent::UpgradePurchased { level: 2, currency: 5 };
        assert_eq!(buy.frame(), None);
    }
}
