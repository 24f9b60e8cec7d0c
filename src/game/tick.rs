//! Frame Driver
//!
//! One call per rendered frame. The pipeline is fixed:
//!
//! 1. Drain the input queue (single snapshot per frame)
//! 2. Apply input events in arrival order
//! 3. Integrate player movement
//! 4. Advance and recycle the track pool
//! 5. Evaluate obstacle hits, then coin pickups (both always run)
//! 6. Accrue distance, advance the visual phases
//! 7. Resolve a hit into game-over
//!
//! `step` is the pure core; [`run_frame`] wraps it and forwards the resulting
//! snapshot to the renderer and HUD exactly once. `now` is the caller's
//! monotonic elapsed time in seconds; the driver never consults a clock.

use tracing::debug;

use crate::game::collision::{check_coins, check_obstacles};
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;
use crate::game::input::{InputEvent, InputQueue};
use crate::game::state::{GameState, RunPhase};
use crate::render::{Hud, HudModel, Renderer, SceneFrame};

/// Result of one frame step.
#[derive(Debug, Default)]
pub struct StepResult {
    /// Events generated this frame
    pub events: Vec<GameEvent>,
    /// Whether the run ended this frame; the caller should cancel its frame
    /// schedule until a restart re-arms it
    pub crashed: bool,
}

/// Run one simulation frame.
///
/// Outside `Running` this is a frozen no-op, except that the input queue is
/// still drained: events buffered while an overlay is up must not leak into
/// the next run's first frame.
pub fn step(
    state: &mut GameState,
    inputs: &mut InputQueue,
    now: f32,
    config: &GameConfig,
) -> StepResult {
    let mut result = StepResult::default();

    let frame_inputs = inputs.drain_frame();
    if state.phase != RunPhase::Running {
        return result;
    }

    state.frame += 1;
    state.elapsed = now;

    // 1. Inputs, in arrival order
    apply_inputs(state, &frame_inputs, now, config);

    // 2. Player physics (slide expiry, jump arc, lane smoothing)
    let gravity = state.progression.effective_gravity(config);
    state.player.integrate(now, gravity, config);

    // 3. World scroll and pool recycling
    state.track.advance(config, &mut state.rng);

    // 4. Collisions. Obstacle and coin checks are independent; a hit this
    //    frame does not forfeit a coin grabbed this frame.
    let hit = check_obstacles(&state.player, &state.track, config);
    for slot in check_coins(&state.player, &state.track, config) {
        if state.track.take_coin(slot).is_some() {
            let currency = state.progression.collect_coin(config.coin_value);
            state.push_event(GameEvent::CoinCollected {
                frame: state.frame,
                slot,
                value: config.coin_value,
                currency,
            });
        }
    }

    // 5. Progression and visual phases
    state.progression.advance(config.run_speed);
    state.hue = (state.hue + config.hue_step) % 1.0;
    state.flash *= 0.9;

    // 6. Game over
    if let Some(hit) = hit {
        debug!(frame = state.frame, slot = hit.slot, kind = ?hit.kind, "run ended");
        state.crash(hit);
        result.crashed = true;
    }

    result.events = state.take_events();
    result
}

fn apply_inputs(state: &mut GameState, frame_inputs: &[InputEvent], now: f32, config: &GameConfig) {
    for event in frame_inputs {
        match event {
            InputEvent::LaneLeft => state.player.shift_lane(-1, config.lane_count),
            InputEvent::LaneRight => state.player.shift_lane(1, config.lane_count),
            InputEvent::Jump => {
                if state.player.trigger_jump(config.jump_velocity) {
                    if let Some(level) = state.progression.record_jump(config) {
                        state.push_event(GameEvent::JumpLevelUp {
                            frame: state.frame,
                            level,
                        });
                    }
                }
            }
            InputEvent::Slide => {
                state.player.trigger_slide(now, config.slide_duration);
            }
        }
    }
}

/// Step the simulation and forward the fully updated world to the
/// presentation layer: one [`SceneFrame`] to the renderer, one [`HudModel`]
/// plus this frame's events to the HUD.
pub fn run_frame<R: Renderer, H: Hud>(
    state: &mut GameState,
    inputs: &mut InputQueue,
    now: f32,
    config: &GameConfig,
    renderer: &mut R,
    hud: &mut H,
) -> StepResult {
    let result = step(state, inputs, now, config);

    renderer.draw(&SceneFrame::capture(state, config));
    hud.update(&HudModel::capture(state));
    for event in &result.events {
        hud.notify(event);
    }

    result
}

/// Replay a run from a per-frame input log at the nominal frame rate.
///
/// Frames without an entry in the log run input-less. Returns the state
/// after `frame_count` frames or the crash, whichever comes first. Two
/// replays of the same seed and log land on identical state.
pub fn replay_run(
    config: &GameConfig,
    seed: u64,
    input_log: &[(u64, InputEvent)],
    frame_count: u64,
) -> GameState {
    let mut state = GameState::new(config, seed);
    state.start();
    state.take_events();

    let mut queue = InputQueue::new();
    let mut log = input_log.iter().peekable();

    for frame in 0..frame_count {
        while let Some((_, event)) = log.next_if(|(f, _)| *f == frame) {
            queue.push(*event);
        }

        let now = (frame + 1) as f32 * crate::FRAME_DT;
        let result = step(&mut state, &mut queue, now, config);
        if result.crashed {
            break;
        }
    }

    state
}
