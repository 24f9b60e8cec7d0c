//! # Starlane Core
//!
//! Deterministic game core for a lane-based neon endless runner.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      STARLANE CORE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │  └── vec3.rs     - 3D vector math                            │
//! │                                                              │
//! │  game/           - Game logic (pure, frame-driven)           │
//! │  ├── config.rs   - Tunables, validated                       │
//! │  ├── input.rs    - Input events and source mapping           │
//! │  ├── player.rs   - Grounded/Jumping/Sliding state machine    │
//! │  ├── progression.rs - Score, currency, jump skill, shop      │
//! │  ├── track.rs    - Obstacle/coin pool, spawning, recycling   │
//! │  ├── collision.rs- Near-field obstacle and coin checks       │
//! │  ├── events.rs   - Discrete events for the HUD               │
//! │  ├── state.rs    - GameState and run phase machine           │
//! │  └── tick.rs     - Frame driver                              │
//! │                                                              │
//! │  render.rs       - Presentation contracts (SceneFrame, HUD)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity Guarantee
//!
//! The simulation never touches the wall clock or ambient entropy:
//! - Elapsed time is an explicit parameter threaded into every step
//! - All randomness comes from a seeded Xorshift128+ PRNG
//! - Input arrives as a snapshot drained once at the top of each frame
//!
//! Given the same seed, the same input log and the same frame count, a run
//! reproduces exactly (see [`game::tick::replay_run`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod render;

// Re-export commonly used types
pub use crate::core::rng::GameRng;
pub use crate::core::vec3::Vec3;
pub use game::config::GameConfig;
pub use game::input::{InputEvent, InputQueue};
pub use game::state::{GameState, RunPhase};
pub use game::tick::{step, StepResult};
pub use render::{Hud, HudModel, Renderer, SceneFrame};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Frame rate the simulation is tuned for (Hz)
pub const FRAME_RATE: u32 = 60;

/// Duration of one frame in seconds
pub const FRAME_DT: f32 = 1.0 / FRAME_RATE as f32;
