//! Game State
//!
//! One explicit struct owns everything the run mutates: player, track pool,
//! progression, RNG, phase and pending events. The frame driver is the only
//! writer during a run; overlay-side actions (start, restart, shop purchase)
//! go through methods here and are silently ignored from the wrong phase.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::game::collision::ObstacleHit;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::player::Player;
use crate::game::progression::Progression;
use crate::game::track::Track;

/// Phase of the session's run loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Start overlay is up; no frames execute yet
    #[default]
    Ready,
    /// Frame loop armed, simulation live
    Running,
    /// Crashed; shop overlay is up, frame loop cancelled until restart
    GameOver,
}

/// Complete state of a play session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Frames executed in the current run
    pub frame: u64,
    /// Elapsed time (seconds) as of the last frame, supplied by the caller
    pub elapsed: f32,
    /// Current phase
    pub phase: RunPhase,
    /// Seed this session's RNG was created from (for logs and replays)
    pub seed: u64,
    /// Session RNG; drives every spawn decision
    #[serde(skip)]
    pub rng: GameRng,
    /// The runner
    pub player: Player,
    /// Obstacle/coin pool
    pub track: Track,
    /// Score, currency, jump skill
    pub progression: Progression,

    /// Road hue phase, advanced per frame (visual feedback only)
    pub hue: f32,
    /// Hit-flash intensity, 1.0 at the crash frame, decaying after
    pub flash: f32,

    /// Events generated since the last drain
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in `Ready`, with the initial track already seeded so
    /// the first frame renders a populated road.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let track = Track::seeded(config, &mut rng);
        Self {
            frame: 0,
            elapsed: 0.0,
            phase: RunPhase::Ready,
            seed,
            rng,
            player: Player::new(config),
            track,
            progression: Progression::new(),
            hue: 0.0,
            flash: 0.0,
            pending_events: Vec::new(),
        }
    }

    /// Whether the frame loop should be executing.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Whether the run ended and the shop overlay is up.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == RunPhase::GameOver
    }

    /// Leave the start overlay and arm the first run. No-op unless `Ready`.
    pub fn start(&mut self) {
        if self.phase != RunPhase::Ready {
            return;
        }
        self.phase = RunPhase::Running;
        self.push_event(GameEvent::RunStarted { frame: self.frame });
    }

    /// Restart after a crash. No-op unless `GameOver`.
    ///
    /// Clears the pool and re-seeds it, resets distance and lane to center,
    /// and resumes. Jump level, jump XP and leftover currency persist; the
    /// stance reset also retires any in-flight slide deadline, so nothing
    /// from the previous run can fire into this one.
    pub fn restart(&mut self, config: &GameConfig) {
        if self.phase != RunPhase::GameOver {
            return;
        }
        self.frame = 0;
        self.player.reset(config);
        self.track.reseed(config, &mut self.rng);
        self.progression.reset_run();
        self.flash = 0.0;
        self.phase = RunPhase::Running;
        self.push_event(GameEvent::RunStarted { frame: self.frame });
    }

    /// End the run on an obstacle hit. Called by the frame driver.
    pub(crate) fn crash(&mut self, hit: ObstacleHit) {
        self.phase = RunPhase::GameOver;
        self.flash = 1.0;
        self.push_event(GameEvent::Crashed {
            frame: self.frame,
            slot: hit.slot,
            kind: hit.kind,
            score: self.progression.score(),
        });
    }

    /// Shop: buy one jump level. Accepted between runs (`Ready`/`GameOver`),
    /// silently ignored while running or when underfunded.
    pub fn try_buy_jump_level(&mut self, config: &GameConfig) -> bool {
        if self.phase == RunPhase::Running {
            return false;
        }
        if !self.progression.try_buy_jump_level(config) {
            return false;
        }
        self.push_event(GameEvent::UpgradePurchased {
            level: self.progression.jump_level,
            currency: self.progression.currency,
        });
        true
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    fn crashed_state(config: &GameConfig) -> GameState {
        let mut state = GameState::new(config, 7);
        state.start();
        state.crash(ObstacleHit {
            slot: 0,
            kind: crate::game::track::ObstacleKind::LowBarrier,
        });
        state
    }

    #[test]
    fn test_phase_transitions() {
        let config = cfg();
        let mut state = GameState::new(&config, 1);
        assert_eq!(state.phase, RunPhase::Ready);

        state.start();
        assert!(state.is_running());

        // start() again is a no-op
        state.start();
        assert!(state.is_running());

        // restart from Running is a no-op
        state.restart(&config);
        assert!(state.is_running());
    }

    #[test]
    fn test_crash_emits_single_game_over() {
        let config = cfg();
        let mut state = crashed_state(&config);
        assert!(state.is_game_over());
        assert_eq!(state.flash, 1.0);

        let crashes = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Crashed { .. }))
            .count();
        assert_eq!(crashes, 1);
    }

    #[test]
    fn test_restart_resets_run_scoped_state_only() {
        let config = cfg();
        let mut state = crashed_state(&config);

        // Simulate mid-session progress
        state.progression.distance = 420.0;
        state.progression.currency = 130;
        state.progression.jump_level = 3;
        state.progression.jump_xp = 2;
        state.player.lane = 0;
        state.frame = 900;

        state.restart(&config);

        assert!(state.is_running());
        assert_eq!(state.frame, 0);
        assert_eq!(state.progression.score(), 0);
        assert_eq!(state.player.lane, config.center_lane());
        assert_eq!(state.track.len(), config.pool_size);

        // Session-scoped state survives the crash
        assert_eq!(state.progression.currency, 130);
        assert_eq!(state.progression.jump_level, 3);
        assert_eq!(state.progression.jump_xp, 2);
    }

    #[test]
    fn test_purchase_phase_gating() {
        let config = cfg();
        let mut state = GameState::new(&config, 1);
        state.progression.currency = config.upgrade_cost * 2;

        // Allowed before the first run
        assert!(state.try_buy_jump_level(&config));

        state.start();
        // Ignored mid-run
        assert!(!state.try_buy_jump_level(&config));
        assert_eq!(state.progression.jump_level, 2);

        state.crash(ObstacleHit {
            slot: 0,
            kind: crate::game::track::ObstacleKind::HighGate,
        });
        // Allowed in the shop overlay
        assert!(state.try_buy_jump_level(&config));
        assert_eq!(state.progression.jump_level, 3);
        assert_eq!(state.progression.currency, 0);
    }
}
