//! Component types and their registry.
//!
//! A component is any plain serde-serializable value type that names itself
//! through [`Component::NAME`]. The name is the component's identity on the
//! wire: command buffers, snapshots and error messages all refer to it.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A value type that can be attached to an entity.
pub trait Component: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable, unique component name (e.g. `"health"`).
    const NAME: &'static str;
}

// ---------------------------------------------------------------------------
// ComponentRegistry
// ---------------------------------------------------------------------------

/// Two-way mapping between Rust types and registered component names.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    by_type: HashMap<TypeId, &'static str>,
    by_name: BTreeMap<&'static str, TypeId>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `T`. Returns `false` if it was already registered.
    ///
    /// # Panics
    ///
    /// Panics if another type already claimed `T::NAME`.
    pub fn register<T: Component>(&mut self) -> bool {
        let type_id = TypeId::of::<T>();
        if self.by_type.contains_key(&type_id) {
            return false;
        }
        if self.by_name.contains_key(T::NAME) {
            panic!(
                "component name '{}' is already registered for a different type",
                T::NAME
            );
        }
        self.by_type.insert(type_id, T::NAME);
        self.by_name.insert(T::NAME, type_id);
        true
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    pub fn type_of(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.keys().copied()
    }

    /// Comma-separated list of registered names, for error messages.
    pub fn names_joined(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }

    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Hunger(u32);
    impl Component for Hunger {
        const NAME: &'static str = "hunger";
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Mood(String);
    impl Component for Mood {
        const NAME: &'static str = "mood";
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Impostor;
    impl Component for Impostor {
        const NAME: &'static str = "hunger";
    }

    #[test]
    fn register_is_idempotent() {
        let mut reg = ComponentRegistry::new();
        assert!(reg.register::<Hunger>());
        assert!(!reg.register::<Hunger>());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = ComponentRegistry::new();
        reg.register::<Mood>();
        reg.register::<Hunger>();
        assert_eq!(reg.names_joined(), "hunger, mood");
        assert_eq!(reg.type_of("mood"), Some(TypeId::of::<Mood>()));
        assert_eq!(reg.type_of("thirst"), None);
    }

    #[test]
    #[should_panic(expected = "already registered for a different type")]
    fn name_collision_panics() {
        let mut reg = ComponentRegistry::new();
        reg.register::<Hunger>();
        reg.register::<Impostor>();
    }
}
