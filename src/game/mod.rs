//! Game Logic Module
//!
//! The whole runner simulation. Pure and frame-driven: no wall clock, no
//! ambient entropy, no I/O.
//!
//! ## Module Structure
//!
//! - `config`: tunables, validation
//! - `input`: input events, per-frame snapshot, source mapping
//! - `player`: lane/jump/slide state machine
//! - `progression`: score, currency, jump skill, shop
//! - `track`: obstacle/coin pool, spawning, recycling
//! - `collision`: near-field obstacle and coin checks
//! - `events`: discrete events for the HUD
//! - `state`: top-level game state and run phases
//! - `tick`: frame driver

pub mod collision;
pub mod config;
pub mod events;
pub mod input;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;
pub mod track;

// Re-export key types
pub use config::GameConfig;
pub use events::GameEvent;
pub use input::{InputEvent, InputQueue};
pub use player::{Player, Stance};
pub use progression::Progression;
pub use state::{GameState, RunPhase};
pub use tick::{step, StepResult};
pub use track::{ObstacleKind, Track};
