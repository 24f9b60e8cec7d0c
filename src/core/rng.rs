//! Seeded Random Number Generator
//!
//! Xorshift128+ behind every lane and obstacle-class draw. Given the same
//! seed, a run spawns the exact same track on any platform, which is what
//! makes scripted sessions and tests reproducible.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Seeded PRNG using the Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use starlane::core::rng::GameRng;
///
/// let mut rng = GameRng::new(12345);
/// let a = GameRng::new(12345).next_u64();
/// assert_eq!(rng.next_u64(), a); // same seed, same sequence
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    state: [u64; 2],
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Xorshift must never start from all-zero state
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create an RNG seeded from a human-readable session label.
    pub fn from_label(label: &str) -> Self {
        Self::new(derive_seed(label))
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range `[0, max)`.
    #[inline]
    pub fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        // Modulo bias is negligible for the single-digit ranges used here
        (self.next_u64() % max as u64) as usize
    }

    /// Generate a random f32 in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits keep the conversion exact
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Generate a random f32 in `[min, max)`.
    #[inline]
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Generate a random boolean with the given probability of `true`.
    #[inline]
    pub fn next_bool(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a 64-bit seed from a session label.
///
/// Labels are operator-facing strings ("daily-run-2024-07-01", a player tag,
/// whatever); hashing gives them full seed-space coverage and keeps typo'd
/// labels from colliding in obvious ways.
pub fn derive_seed(label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(b"STARLANE_SEED_V1");
    hasher.update(label.as_bytes());
    let hash = hasher.finalize();
    u64::from_le_bytes(hash[0..8].try_into().expect("sha256 output is 32 bytes"))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_index_in_range() {
        let mut rng = GameRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_index(3) < 3);
        }

        // Edge cases
        assert_eq!(rng.next_index(0), 0);
        assert_eq!(rng.next_index(1), 0);
    }

    #[test]
    fn test_next_f32_unit_interval() {
        let mut rng = GameRng::new(5678);

        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = GameRng::new(9999);

        for _ in 0..1000 {
            let v = rng.next_range(-7.5, 7.5);
            assert!((-7.5..7.5).contains(&v));
        }

        // Degenerate range collapses to min
        assert_eq!(rng.next_range(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_derive_seed_stability() {
        let seed1 = derive_seed("demo-session");
        let seed2 = derive_seed("demo-session");
        assert_eq!(seed1, seed2);

        let seed3 = derive_seed("demo-sessioN");
        assert_ne!(seed1, seed3);
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = GameRng::new(5555);

        for _ in 0..50 {
            rng.next_u64();
        }

        let saved = rng.state();
        let next_values: Vec<u64> = (0..10).map(|_| rng.next_u64()).collect();

        rng.set_state(saved);
        for expected in next_values {
            assert_eq!(rng.next_u64(), expected);
        }
    }
}
