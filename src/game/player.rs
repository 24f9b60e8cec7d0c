//! Player State Machine
//!
//! Three stances: `Grounded`, `Jumping`, `Sliding`. Lane changes are allowed
//! while grounded or sliding; jump and slide requests are only honored from
//! `Grounded`, which makes the two mutually exclusive by construction.
//!
//! Sliding carries its own expiry as an elapsed-time deadline checked every
//! frame. There is deliberately no deferred callback: a restart replaces the
//! stance outright, so nothing stale can clear a slide in a fresh run.

use serde::{Deserialize, Serialize};

use crate::core::vec3::{lerp, Vec3};
use crate::game::config::GameConfig;

/// What the player's body is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Stance {
    /// On the ground, free to steer, jump or slide
    Grounded,
    /// Airborne; lane changes are still applied, new jumps/slides are not
    Jumping,
    /// Ducked under gate height until the deadline passes
    Sliding {
        /// Elapsed-time instant at which the slide auto-clears
        until: f32,
    },
}

/// The runner's physical state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Current lane index, always in `[0, lane_count)`
    pub lane: usize,
    /// Smoothed world x; trails the lane's offset by exponential smoothing
    pub x: f32,
    /// Height above the ground plane (0 = grounded)
    pub height: f32,
    /// Vertical velocity, only meaningful while jumping
    pub vertical_velocity: f32,
    /// Current stance
    pub stance: Stance,
}

impl Player {
    /// Spawn a player centered on the road.
    pub fn new(config: &GameConfig) -> Self {
        let lane = config.center_lane();
        Self {
            lane,
            x: config.lane_offset(lane),
            height: 0.0,
            vertical_velocity: 0.0,
            stance: Stance::Grounded,
        }
    }

    /// World position; the player is the longitudinal origin.
    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.height, 0.0)
    }

    /// Whether a slide is active.
    #[inline]
    pub fn is_sliding(&self) -> bool {
        matches!(self.stance, Stance::Sliding { .. })
    }

    /// Whether the player is airborne.
    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.stance == Stance::Jumping
    }

    /// Shift one lane left (`-1`) or right (`+1`), clamped to the road.
    ///
    /// A request at a boundary lane is silently ignored. Only the target
    /// index changes here; the visible x eases over in [`Player::integrate`].
    pub fn shift_lane(&mut self, dir: i8, lane_count: usize) {
        let target = self.lane as isize + dir as isize;
        if target >= 0 && (target as usize) < lane_count {
            self.lane = target as usize;
        }
    }

    /// Start a jump. Honored only from `Grounded`; returns whether it took.
    pub fn trigger_jump(&mut self, jump_velocity: f32) -> bool {
        if self.stance != Stance::Grounded {
            return false;
        }
        self.stance = Stance::Jumping;
        self.vertical_velocity = jump_velocity;
        true
    }

    /// Start a slide lasting `duration` seconds of elapsed time. Honored only
    /// from `Grounded`; returns whether it took.
    pub fn trigger_slide(&mut self, now: f32, duration: f32) -> bool {
        if self.stance != Stance::Grounded {
            return false;
        }
        self.stance = Stance::Sliding { until: now + duration };
        true
    }

    /// Per-frame movement integration.
    ///
    /// `effective_gravity` is the level-scaled airborne deceleration supplied
    /// by the progression tracker. Runs the slide-expiry check, the jump arc
    /// while airborne, and the lane-smoothing lerp.
    pub fn integrate(&mut self, now: f32, effective_gravity: f32, config: &GameConfig) {
        // Slide deadline
        if let Stance::Sliding { until } = self.stance {
            if now >= until {
                self.stance = Stance::Grounded;
            }
        }

        // Jump arc
        if self.stance == Stance::Jumping {
            self.height += self.vertical_velocity;
            self.vertical_velocity += effective_gravity;
            if self.height <= 0.0 {
                self.height = 0.0;
                self.vertical_velocity = 0.0;
                self.stance = Stance::Grounded;
            }
        }

        // Ease toward the target lane; fixed factor per frame (fixed timestep)
        self.x = lerp(self.x, config.lane_offset(self.lane), config.lane_lerp);
    }

    /// Reset for a fresh run: center lane, grounded, snapped into place.
    pub fn reset(&mut self, config: &GameConfig) {
        self.lane = config.center_lane();
        self.x = config.lane_offset(self.lane);
        self.height = 0.0;
        self.vertical_velocity = 0.0;
        self.stance = Stance::Grounded;
    }
}
