//! State Hashing for Verification
//!
//! SHA-256 digests of the world, used to check that a replayed recording
//! ends in exactly the same state as the live session.

use sha2::{Sha256, Digest};

use super::vec2::Vec2;
use crate::game::tick::World;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for simulation state.
///
/// Floats are hashed by bit pattern, so `0.0` and `-0.0` differ.
/// Order of updates is significant.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for world state.
    pub fn for_world_state() -> Self {
        Self::new(b"GUMP_WORLD_V1")
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u16 value (little-endian).
    #[inline]
    pub fn update_u16(&mut self, value: u16) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f32 bit pattern (little-endian).
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Update with a Vec2.
    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        self.update_f32(value.x);
        self.update_f32(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Hash everything that evolves from tick to tick.
///
/// Platforms are static and left out.
pub fn compute_world_hash(world: &World) -> StateHash {
    let mut hasher = StateHasher::for_world_state();
    let player = &world.player;

    hasher.update_u32(world.tick);
    hasher.update_vec2(player.position);
    hasher.update_vec2(player.velocity);
    hasher.update_vec2(player.acceleration);
    hasher.update_bool(player.on_ground);
    hasher.update_u8(player.animation_frame.value());
    hasher.update_u16(player.current_state().to_key().bits());

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_state_hasher_determinism() {
        let make_hash = || {
            let mut hasher = StateHasher::for_world_state();
            hasher.update_u32(100);
            hasher.update_f32(5.5);
            hasher.update_vec2(Vec2::new(1.0, 2.0));
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = StateHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_world_hash_tracks_changes() {
        let config = GameConfig::default();
        let world = World::new(&config);
        let base = compute_world_hash(&world);

        assert_eq!(base, compute_world_hash(&world.clone()));

        let mut moved = world.clone();
        moved.player.position.x += 1.0;
        assert_ne!(base, compute_world_hash(&moved));

        let mut grounded = world;
        grounded.player.on_ground = true;
        assert_ne!(base, compute_world_hash(&grounded));
    }
}
