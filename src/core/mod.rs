//! Deterministic primitives shared by the game modules.

pub mod rng;
pub mod vec3;

pub use rng::GameRng;
pub use vec3::Vec3;
