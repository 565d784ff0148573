//! Roll Random Number Generator
//!
//! Xorshift128+ PRNG used for the randomized parts of a roll: the spawn
//! orientation of a prepared die and the angular kick applied on release.
//! Given the same seed, produces an identical sequence on all platforms.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::vec3::Vec3;

/// PRNG using the Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use dice_tower::core::rng::RollRng;
///
/// let mut rng = RollRng::new(12345);
/// let value = rng.next_u64();
/// assert_eq!(value, 6233086606872742541); // Always the same!
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RollRng {
    state: [u64; 2],
}

impl Default for RollRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RollRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
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

    /// Generate a random f32 in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Upper 24 bits give full f32 mantissa precision
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Generate a random f32 in [min, max).
    #[inline]
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Random Euler angles, each in [0, 2π).
    ///
    /// Used for the orientation a die is prepared at, so consecutive
    /// rolls do not start from the same face.
    pub fn random_euler_angles(&mut self) -> (f32, f32, f32) {
        const TAU: f32 = std::f32::consts::TAU;
        (
            self.next_f32_range(0.0, TAU),
            self.next_f32_range(0.0, TAU),
            self.next_f32_range(0.0, TAU),
        )
    }

    /// Random per-axis angular velocity in [-magnitude/2, magnitude/2].
    ///
    /// The small tumble kick applied when a waiting die is released.
    pub fn random_angular_kick(&mut self, magnitude: f32) -> Vec3 {
        Vec3::new(
            (self.next_f32() - 0.5) * magnitude,
            (self.next_f32() - 0.5) * magnitude,
            (self.next_f32() - 0.5) * magnitude,
        )
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive a roll seed from tower identity and roll counter.
///
/// Keeps per-roll randomness reproducible for a given tower while making
/// consecutive rolls independent of each other.
pub fn derive_roll_seed(tower_id: &[u8; 16], roll_index: u32) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"DICE_TOWER_SEED_V1");
    hasher.update(tower_id);
    hasher.update(roll_index.to_le_bytes());

    let hash = hasher.finalize();

    // Take first 8 bytes as seed
    u64::from_le_bytes(hash[0..8].try_into().unwrap())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = RollRng::new(12345);
        let mut rng2 = RollRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = RollRng::new(12345);
        let mut rng2 = RollRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_f32_range() {
        let mut rng = RollRng::new(1234);

        for _ in 0..1000 {
            let val = rng.next_f32();
            assert!((0.0..1.0).contains(&val));

            let val = rng.next_f32_range(-3.0, 3.0);
            assert!((-3.0..3.0).contains(&val));
        }

        // Edge case: min == max
        assert_eq!(rng.next_f32_range(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_random_euler_angles_in_range() {
        let mut rng = RollRng::new(5678);

        for _ in 0..100 {
            let (x, y, z) = rng.random_euler_angles();
            for angle in [x, y, z] {
                assert!((0.0..std::f32::consts::TAU).contains(&angle));
            }
        }
    }

    #[test]
    fn test_angular_kick_bounded() {
        let mut rng = RollRng::new(9999);

        for _ in 0..100 {
            let kick = rng.random_angular_kick(3.0);
            for component in [kick.x, kick.y, kick.z] {
                assert!(component.abs() <= 1.5);
            }
        }
    }

    #[test]
    fn test_derive_roll_seed() {
        let tower_id = [7u8; 16];

        // Same inputs = same seed
        assert_eq!(
            derive_roll_seed(&tower_id, 0),
            derive_roll_seed(&tower_id, 0)
        );

        // Different roll index = different seed
        assert_ne!(
            derive_roll_seed(&tower_id, 0),
            derive_roll_seed(&tower_id, 1)
        );
    }
}
