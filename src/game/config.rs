//! Game Configuration
//!
//! Every tunable in one serde-loadable struct. Defaults are the values the
//! game is balanced around; `validate` catches configs that would wedge the
//! simulation (zero lanes, upward gravity, an empty pool).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error raised by [`GameConfig::validate`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its usable range.
    #[error("invalid config: {field} {reason}")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Why the value is unusable
        reason: &'static str,
    },
}

impl ConfigError {
    fn out_of_range(field: &'static str, reason: &'static str) -> Self {
        Self::OutOfRange { field, reason }
    }
}

/// All tunables of the runner simulation.
///
/// Distances are world units, velocities are world units per frame (the
/// simulation assumes a fixed timestep), durations are seconds of the
/// caller-supplied elapsed clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Lanes
    /// Number of lanes the road is split into
    pub lane_count: usize,
    /// World-space distance between adjacent lane centers
    pub lane_spacing: f32,
    /// Per-frame exponential smoothing factor toward the target lane
    pub lane_lerp: f32,

    // Scroll & physics
    /// World units every entity advances toward the player per frame
    pub run_speed: f32,
    /// Vertical acceleration while airborne (negative = down), per frame
    pub gravity: f32,
    /// Initial upward velocity of a jump
    pub jump_velocity: f32,
    /// Gravity divisor growth per jump level; higher = longer hang time
    pub hang_factor: f32,
    /// Seconds a slide lasts before auto-clearing
    pub slide_duration: f32,

    // Spawning
    /// Number of obstacle+coin slots kept alive for the whole run
    pub pool_size: usize,
    /// Longitudinal gap between consecutive slots
    pub spawn_spacing: f32,
    /// Depth behind the player at which a slot is recycled
    pub recycle_behind: f32,
    /// Probability that a spawn is a low barrier (rest are high gates)
    pub low_barrier_chance: f32,

    // Collision
    /// Half-depth of the obstacle near-field window around the player
    pub near_window: f32,
    /// Max lateral distance at which an obstacle still hits
    pub lateral_threshold: f32,
    /// Player height that clears a low barrier
    pub clearance_height: f32,
    /// Pickup radius for coins (full 3-D distance)
    pub pickup_radius: f32,

    // Coins
    /// Height of a coin paired with a low barrier (reachable mid-jump)
    pub coin_over_height: f32,
    /// Height of a coin paired with a high gate (reachable while sliding)
    pub coin_under_height: f32,
    /// Currency credited per collected coin
    pub coin_value: u32,

    // Progression & shop
    /// Jump XP needed per level is `level * xp_per_level`
    pub xp_per_level: u32,
    /// Highest reachable jump level
    pub max_jump_level: u8,
    /// Currency cost of one jump-level purchase in the shop
    pub upgrade_cost: u32,

    // Visual feedback (consumed by the renderer, never by game rules)
    /// Road hue increment per frame
    pub hue_step: f32,
    /// Angular rate of the star twinkle oscillation (rad/s of elapsed time)
    pub twinkle_rate: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lane_count: 3,
            lane_spacing: 5.0,
            lane_lerp: 0.1,

            run_speed: 0.6,
            gravity: -0.015,
            jump_velocity: 0.35,
            hang_factor: 0.25,
            slide_duration: 0.6,

            pool_size: 5,
            spawn_spacing: 35.0,
            recycle_behind: 10.0,
            low_barrier_chance: 0.5,

            near_window: 1.0,
            lateral_threshold: 2.5,
            clearance_height: 1.5,
            pickup_radius: 1.5,

            coin_over_height: 2.4,
            coin_under_height: 0.5,
            coin_value: 10,

            xp_per_level: 5,
            max_jump_level: 10,
            upgrade_cost: 50,

            hue_step: 0.002,
            twinkle_rate: 5.0,
        }
    }
}

impl GameConfig {
    /// World-space x offset of a lane's center.
    ///
    /// Lanes are centered around x = 0, so lane `lane_count / 2` of an odd
    /// lane count sits exactly on the road's centerline.
    #[inline]
    pub fn lane_offset(&self, lane: usize) -> f32 {
        let half = (self.lane_count as f32 - 1.0) / 2.0;
        (lane as f32 - half) * self.lane_spacing
    }

    /// Index of the center lane (where every run starts).
    #[inline]
    pub fn center_lane(&self) -> usize {
        self.lane_count / 2
    }

    /// Reject configs the simulation cannot run on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count == 0 {
            return Err(ConfigError::out_of_range("lane_count", "must be at least 1"));
        }
        if !(self.lane_lerp > 0.0 && self.lane_lerp <= 1.0) {
            return Err(ConfigError::out_of_range("lane_lerp", "must be in (0, 1]"));
        }
        if self.run_speed <= 0.0 {
            return Err(ConfigError::out_of_range("run_speed", "must be positive"));
        }
        if self.gravity >= 0.0 {
            return Err(ConfigError::out_of_range("gravity", "must be negative"));
        }
        if self.jump_velocity <= 0.0 {
            return Err(ConfigError::out_of_range("jump_velocity", "must be positive"));
        }
        if self.hang_factor < 0.0 {
            return Err(ConfigError::out_of_range("hang_factor", "must be non-negative"));
        }
        if self.slide_duration <= 0.0 {
            return Err(ConfigError::out_of_range("slide_duration", "must be positive"));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::out_of_range("pool_size", "must be at least 1"));
        }
        if self.spawn_spacing <= 0.0 {
            return Err(ConfigError::out_of_range("spawn_spacing", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.low_barrier_chance) {
            return Err(ConfigError::out_of_range("low_barrier_chance", "must be in [0, 1]"));
        }
        if self.near_window <= 0.0 {
            return Err(ConfigError::out_of_range("near_window", "must be positive"));
        }
        if self.lateral_threshold <= 0.0 {
            return Err(ConfigError::out_of_range("lateral_threshold", "must be positive"));
        }
        if self.clearance_height <= 0.0 {
            return Err(ConfigError::out_of_range("clearance_height", "must be positive"));
        }
        if self.pickup_radius <= 0.0 {
            return Err(ConfigError::out_of_range("pickup_radius", "must be positive"));
        }
        if self.xp_per_level == 0 {
            return Err(ConfigError::out_of_range("xp_per_level", "must be at least 1"));
        }
        if self.max_jump_level == 0 {
            return Err(ConfigError::out_of_range("max_jump_level", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_lane_offsets_centered() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.lane_offset(0), -5.0);
        assert_eq!(cfg.lane_offset(1), 0.0);
        assert_eq!(cfg.lane_offset(2), 5.0);
        assert_eq!(cfg.center_lane(), 1);
    }

    #[test]
    fn test_even_lane_count_offsets() {
        let cfg = GameConfig {
            lane_count: 4,
            ..Default::default()
        };
        assert_eq!(cfg.lane_offset(0), -7.5);
        assert_eq!(cfg.lane_offset(3), 7.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = GameConfig {
            lane_count: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        cfg.lane_count = 3;
        cfg.gravity = 0.01;
        assert!(cfg.validate().is_err());

        cfg.gravity = -0.015;
        cfg.lane_lerp = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_roundtrip_json() {
        let cfg = GameConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lane_count, cfg.lane_count);
        assert_eq!(back.upgrade_cost, cfg.upgrade_cost);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: GameConfig = serde_json::from_str(r#"{"lane_count": 5}"#).unwrap();
        assert_eq!(cfg.lane_count, 5);
        assert_eq!(cfg.pool_size, GameConfig::default().pool_size);
    }
}
