//! Collision Evaluator
//!
//! Pure proximity checks run once per frame, after movement integration and
//! before the render snapshot. Obstacles use a near-field window on depth
//! plus a lateral threshold against the player's *smoothed* x (the player can
//! dodge mid-lerp); coins use a genuine 3-D pickup radius.
//!
//! Both evaluators are independent: the frame driver runs the coin check even
//! on a frame that hits an obstacle, so a crash never swallows a pickup that
//! happened in the same instant.

use crate::game::config::GameConfig;
use crate::game::player::Player;
use crate::game::track::{ObstacleKind, Track};

/// A fatal obstacle contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObstacleHit {
    /// Index of the offending slot
    pub slot: usize,
    /// Class of obstacle that was hit
    pub kind: ObstacleKind,
}

/// Find the first obstacle the player fails to evade this frame.
///
/// An obstacle in range hits unless the class-matched evasion is active:
/// enough height for a low barrier, an active slide for a high gate. The
/// first hit wins; there is no damage model.
pub fn check_obstacles(player: &Player, track: &Track, config: &GameConfig) -> Option<ObstacleHit> {
    for (slot_index, slot) in track.slots().iter().enumerate() {
        let obstacle = &slot.obstacle;

        // Near-field window on depth (player is the longitudinal origin)
        if obstacle.z.abs() >= config.near_window {
            continue;
        }

        // Lateral distance between player and obstacle, not lane indices:
        // a half-finished lane change can still clear or still clip
        let lateral = (player.x - config.lane_offset(obstacle.lane)).abs();
        if lateral >= config.lateral_threshold {
            continue;
        }

        let evaded = match obstacle.kind {
            ObstacleKind::LowBarrier => player.height >= config.clearance_height,
            ObstacleKind::HighGate => player.is_sliding(),
        };

        if !evaded {
            return Some(ObstacleHit {
                slot: slot_index,
                kind: obstacle.kind,
            });
        }
    }

    None
}

/// Find every coin within pickup radius of the player this frame.
///
/// Distance is full 3-D Euclidean; stance is irrelevant (collecting while
/// jumping or sliding is fine, unlike obstacle evasion). Returns slot indices
/// for the frame driver to collect.
pub fn check_coins(player: &Player, track: &Track, config: &GameConfig) -> Vec<usize> {
    let player_pos = player.position();
    let radius_sq = config.pickup_radius * config.pickup_radius;

    let mut picked = Vec::new();
    for (slot_index, slot) in track.slots().iter().enumerate() {
        if let Some(coin) = &slot.coin {
            let coin_pos =
                crate::core::vec3::Vec3::new(config.lane_offset(coin.lane), coin.y, coin.z);
            if player_pos.distance_squared(coin_pos) < radius_sq {
                picked.push(slot_index);
            }
        }
    }

    picked
}
