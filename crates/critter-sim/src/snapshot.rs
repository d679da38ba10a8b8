//! BLAKE3 digest of simulation state, used to check determinism.

use critter_ecs::prelude::*;
use serde::Serialize;

/// Hex digest (64 lowercase chars) of the world snapshot and tick counter.
pub fn state_hash(world: &World, tick_counter: u64) -> Result<String, EcsError> {
    #[derive(Serialize)]
    struct HashableState<'a> {
        world: &'a WorldSnapshot,
        tick_counter: u64,
    }

    let snapshot = world.capture_snapshot()?;
    let hashable = HashableState {
        world: &snapshot,
        tick_counter,
    };
    let bytes = serde_json::to_vec(&hashable).map_err(|e| EcsError::ComponentSerialization {
        component: "world_snapshot".to_owned(),
        details: e.to_string(),
    })?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::init_world;
    use crate::components::Player;
    use crate::config::SimConfig;

    #[test]
    fn hash_is_hex_and_stable() {
        let (world, _) = init_world(&SimConfig::default()).unwrap();
        let a = state_hash(&world, 0).unwrap();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, state_hash(&world, 0).unwrap());
    }

    #[test]
    fn hash_covers_tick_and_components() {
        let (mut world, _) = init_world(&SimConfig::default()).unwrap();
        let base = state_hash(&world, 0).unwrap();
        assert_ne!(base, state_hash(&world, 1).unwrap());
        world.spawn_with(Player::new("ada", 1.0)).unwrap();
        assert_ne!(base, state_hash(&world, 0).unwrap());
    }
}
