//! Starlane Session Driver
//!
//! Headless demo standing in for a real front end: runs a scripted session
//! (run, crash, shop, restart) against the game core, logging scene and HUD
//! traffic through `tracing`, then verifies the first run replays to the
//! same result from its recorded input log.
//!
//! Usage: `starlane-sim [config.json] [session-label]`

use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use starlane::core::rng::derive_seed;
use starlane::game::events::GameEvent;
use starlane::game::tick::{replay_run, run_frame};
use starlane::game::track::ObstacleKind;
use starlane::{
    GameConfig, GameState, Hud, HudModel, InputEvent, InputQueue, Renderer, SceneFrame,
    FRAME_DT, FRAME_RATE, VERSION,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        None => GameConfig::default(),
    };
    config.validate().context("validating config")?;

    let label = args.next().unwrap_or_else(|| "starlane-demo".to_string());
    let seed = derive_seed(&label);

    info!("Starlane Core v{}", VERSION);
    info!("Frame rate: {} Hz", FRAME_RATE);
    info!(label = %label, seed = %hex::encode(seed.to_le_bytes()), "session seed");

    let mut state = GameState::new(&config, seed);
    let mut queue = InputQueue::new();
    let mut renderer = LogRenderer::default();
    let mut hud = LogHud::default();

    // ===== Run 1: evade for a while, then stop dodging and crash =====
    state.start();
    let mut input_log: Vec<(u64, InputEvent)> = Vec::new();
    let run1 = drive_run(
        &mut state,
        &mut queue,
        &config,
        &mut renderer,
        &mut hud,
        Some(&mut input_log),
    );
    info!(
        frames = run1.frames,
        score = run1.score,
        currency = state.progression.currency,
        "run 1 over"
    );

    // ===== Shop =====
    let mut bought = 0;
    while state.try_buy_jump_level(&config) {
        bought += 1;
    }
    for event in state.take_events() {
        hud.notify(&event);
    }
    info!(
        bought,
        level = state.progression.jump_level,
        currency = state.progression.currency,
        "shop closed"
    );

    // ===== Run 2: skill and leftover currency carried over =====
    state.restart(&config);
    let run2 = drive_run(&mut state, &mut queue, &config, &mut renderer, &mut hud, None);
    info!(frames = run2.frames, score = run2.score, "run 2 over");

    // ===== Replay verification =====
    info!("replaying run 1 from its input log");
    let replayed = replay_run(&config, seed, &input_log, run1.frames);
    if replayed.progression.score() == run1.score && replayed.frame == run1.frames {
        info!("replay verified: identical frames and score");
    } else {
        info!(
            replay_frames = replayed.frame,
            replay_score = replayed.progression.score(),
            "replay mismatch"
        );
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&HudModel::capture(&state))
            .context("serializing final HUD state")?
    );
    Ok(())
}

/// Outcome of one scripted run.
struct RunSummary {
    frames: u64,
    score: u32,
}

/// Drive frames until the run crashes.
///
/// The script performs the matched evasion (jump for barriers, slide for
/// gates) for the first 3000 frames, then stops dodging so the run ends
/// deterministically. Inputs are recorded into `log` when given.
fn drive_run(
    state: &mut GameState,
    queue: &mut InputQueue,
    config: &GameConfig,
    renderer: &mut LogRenderer,
    hud: &mut LogHud,
    mut log: Option<&mut Vec<(u64, InputEvent)>>,
) -> RunSummary {
    loop {
        if state.frame < 3000 {
            if let Some(event) = pick_evasion(state, config) {
                queue.push(event);
                if let Some(log) = log.as_mut() {
                    log.push((state.frame, event));
                }
            }
        }

        let now = (state.frame + 1) as f32 * FRAME_DT;
        let result = run_frame(state, queue, now, config, renderer, hud);
        if result.crashed {
            return RunSummary {
                frames: state.frame,
                score: state.progression.score(),
            };
        }
    }
}

/// The matched evasive action for the nearest threat in the player's lane,
/// timed to just precede the collision window.
fn pick_evasion(state: &GameState, config: &GameConfig) -> Option<InputEvent> {
    let threat = state
        .track
        .slots()
        .iter()
        .filter(|s| s.obstacle.lane == state.player.lane && s.obstacle.z < 0.0)
        .max_by(|a, b| {
            a.obstacle
                .z
                .partial_cmp(&b.obstacle.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let frames_out = (-threat.obstacle.z - config.near_window) / config.run_speed;
    if !(6.0..=8.0).contains(&frames_out) {
        return None;
    }

    Some(match threat.obstacle.kind {
        ObstacleKind::LowBarrier => InputEvent::Jump,
        ObstacleKind::HighGate => InputEvent::Slide,
    })
}

/// Renderer that logs a scene digest at a low cadence.
#[derive(Default)]
struct LogRenderer {
    frames_drawn: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &SceneFrame) {
        self.frames_drawn += 1;
        if self.frames_drawn % 600 == 0 {
            debug!(
                frame = frame.frame,
                player = ?frame.player,
                coins = frame.coins.len(),
                hue = frame.hue,
                "scene"
            );
        }
    }
}

/// HUD that logs overlay changes and every discrete event.
#[derive(Default)]
struct LogHud {
    last: Option<HudModel>,
}

impl Hud for LogHud {
    fn update(&mut self, model: &HudModel) {
        let overlay_changed = self.last.map(|m| m.overlay != model.overlay).unwrap_or(true);
        if overlay_changed {
            info!(overlay = ?model.overlay, score = model.score, "overlay");
        }
        self.last = Some(*model);
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RunStarted { frame } => info!(frame, "run started"),
            GameEvent::CoinCollected { frame, currency, .. } => {
                debug!(frame, currency, "coin collected");
            }
            GameEvent::JumpLevelUp { frame, level } => info!(frame, level, "jump level up"),
            GameEvent::Crashed { frame, kind, score, .. } => {
                info!(frame, ?kind, score, "crashed");
            }
            GameEvent::UpgradePurchased { level, currency } => {
                info!(level, currency, "upgrade purchased");
            }
        }
    }
}
