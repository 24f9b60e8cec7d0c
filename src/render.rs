//! Presentation Contracts
//!
//! The core does not render or touch the DOM. Each frame it hands the
//! presentation layer two value types: a [`SceneFrame`] with every pose and
//! visual-feedback channel the renderer needs, and a [`HudModel`] with the
//! plain numbers and overlay choice for the HUD. The [`Renderer`] and [`Hud`]
//! traits are the seams a real front end (or the headless demo driver) plugs
//! into.

use serde::{Deserialize, Serialize};

use crate::core::vec3::Vec3;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::state::{GameState, RunPhase};
use crate::game::track::ObstacleKind;

/// Length of the looping road mesh; the scroll phase wraps at this depth.
const ROAD_LOOP: f32 = 100.0;

/// Pose of one obstacle for the renderer.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ObstaclePose {
    /// World position (lane center, half-height, depth)
    pub position: Vec3,
    /// Class, so the renderer can pick barrier vs. gate geometry
    pub kind: ObstacleKind,
}

/// Everything the renderer needs for one draw call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneFrame {
    /// Frame counter of the run
    pub frame: u64,
    /// Player world position
    pub player: Vec3,
    /// Whether the player model should be posed ducking
    pub player_sliding: bool,
    /// Poses of all live obstacles
    pub obstacles: Vec<ObstaclePose>,
    /// Positions of all uncollected coins
    pub coins: Vec<Vec3>,
    /// Scroll phase of the looping road mesh, in `[0, ROAD_LOOP)`
    pub road_phase: f32,
    /// Road hue phase in `[0, 1)`, cycled per frame
    pub hue: f32,
    /// Star twinkle opacity, oscillating with elapsed time
    pub star_opacity: f32,
    /// Hit-flash intensity; 1.0 at the crash frame, decaying to 0
    pub flash: f32,
}

impl SceneFrame {
    /// Snapshot the fully updated world. Called once per frame, after the
    /// step; every value here derives from explicit state, never a clock.
    pub fn capture(state: &GameState, config: &GameConfig) -> Self {
        let obstacles = state
            .track
            .slots()
            .iter()
            .map(|slot| ObstaclePose {
                position: Vec3::new(
                    config.lane_offset(slot.obstacle.lane),
                    0.0,
                    slot.obstacle.z,
                ),
                kind: slot.obstacle.kind,
            })
            .collect();

        let coins = state
            .track
            .slots()
            .iter()
            .filter_map(|slot| slot.coin.as_ref())
            .map(|coin| Vec3::new(config.lane_offset(coin.lane), coin.y, coin.z))
            .collect();

        Self {
            frame: state.frame,
            player: state.player.position(),
            player_sliding: state.player.is_sliding(),
            obstacles,
            coins,
            road_phase: state.progression.distance % ROAD_LOOP,
            hue: state.hue,
            star_opacity: 0.4 + (state.elapsed * config.twinkle_rate).sin() * 0.3,
            flash: state.flash,
        }
    }
}

/// Which full-screen overlay the HUD should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    /// Pre-run start screen
    Start,
    /// None; gameplay HUD only
    None,
    /// Post-crash results and shop
    Shop,
}

/// Plain values for the HUD, refreshed after every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudModel {
    /// Distance score of the current (or just-ended) run
    pub score: u32,
    /// Currency balance
    pub currency: u32,
    /// Jump skill level
    pub jump_level: u8,
    /// Overlay to display
    pub overlay: Overlay,
}

impl HudModel {
    /// Snapshot the HUD values from current state.
    pub fn capture(state: &GameState) -> Self {
        Self {
            score: state.progression.score(),
            currency: state.progression.currency,
            jump_level: state.progression.jump_level,
            overlay: match state.phase {
                RunPhase::Ready => Overlay::Start,
                RunPhase::Running => Overlay::None,
                RunPhase::GameOver => Overlay::Shop,
            },
        }
    }
}

/// Scene consumer; receives exactly one frame per step.
pub trait Renderer {
    /// Draw the frame.
    fn draw(&mut self, frame: &SceneFrame);
}

/// HUD consumer; receives values after each frame and discrete events as
/// they happen.
pub trait Hud {
    /// Refresh displayed values and overlay.
    fn update(&mut self, model: &HudModel);
    /// React to a discrete event (coin chime, level-up toast, crash sting).
    fn notify(&mut self, event: &GameEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_reflects_state() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 123);

        let frame = SceneFrame::capture(&state, &config);
        assert_eq!(frame.obstacles.len(), config.pool_size);
        assert_eq!(frame.coins.len(), config.pool_size);
        assert_eq!(frame.flash, 0.0);

        let hud = HudModel::capture(&state);
        assert_eq!(hud.overlay, Overlay::Start);
        assert_eq!(hud.score, 0);

        state.start();
        assert_eq!(HudModel::capture(&state).overlay, Overlay::None);
    }

    #[test]
    fn test_collected_coin_leaves_scene() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 9);
        state.track.take_coin(2);

        let frame = SceneFrame::capture(&state, &config);
        assert_eq!(frame.coins.len(), config.pool_size - 1);
        assert_eq!(frame.obstacles.len(), config.pool_size);
    }

    #[test]
    fn test_star_opacity_in_bounds() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 1);

        for i in 0..200 {
            state.elapsed = i as f32 * 0.037;
            let frame = SceneFrame::capture(&state, &config);
            assert!((0.1..=0.7).contains(&frame.star_opacity));
        }
    }
}
