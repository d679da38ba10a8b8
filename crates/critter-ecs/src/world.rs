//! The [`World`]: entity allocator, component registry and column storage.
//!
//! All reads and writes validate the entity handle first. An id whose
//! generation no longer matches its slot yields [`EcsError::StaleEntity`];
//! it is never resolved to whatever entity now occupies the slot.

use std::any::TypeId;
use std::collections::HashMap;

use crate::component::{Component, ComponentRegistry};
use crate::entity::{EntityAllocator, EntityId};
use crate::storage::{Column, ErasedColumn};
use crate::EcsError;

// ---------------------------------------------------------------------------
// ComponentBundle
// ---------------------------------------------------------------------------

trait BundleEntry: Send {
    fn component_type(&self) -> TypeId;
    fn component_name(&self) -> &'static str;
    fn insert_into(self: Box<Self>, world: &mut World, entity: EntityId);
}

struct Entry<T>(T);

impl<T: Component> BundleEntry for Entry<T> {
    fn component_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn component_name(&self) -> &'static str {
        T::NAME
    }

    fn insert_into(self: Box<Self>, world: &mut World, entity: EntityId) {
        if let Some(column) = world.column_mut::<T>() {
            column.put(entity.index(), self.0);
        }
    }
}

/// A set of components spawned together by [`World::spawn_bundle`].
///
/// ```
/// use critter_ecs::prelude::*;
///
/// #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// struct Name(String);
/// impl Component for Name { const NAME: &'static str = "name"; }
///
/// #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
/// struct Age(u32);
/// impl Component for Age { const NAME: &'static str = "age"; }
///
/// let mut world = World::new();
/// world.register_component::<Name>();
/// world.register_component::<Age>();
///
/// let e = world
///     .spawn_bundle(ComponentBundle::new().with(Name("Rex".into())).with(Age(2)))
///     .unwrap();
/// assert_eq!(world.get_component::<Age>(e).unwrap(), &Age(2));
/// ```
#[derive(Default)]
pub struct ComponentBundle {
    entries: Vec<Box<dyn BundleEntry>>,
}

impl ComponentBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. A second value of the same type replaces the first.
    pub fn add<T: Component>(&mut self, value: T) {
        self.entries
            .retain(|entry| entry.component_type() != TypeId::of::<T>());
        self.entries.push(Box::new(Entry(value)));
    }

    /// Builder form of [`add`](Self::add).
    pub fn with<T: Component>(mut self, value: T) -> Self {
        self.add(value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// Entity/component store.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    registry: ComponentRegistry,
    columns: HashMap<TypeId, Box<dyn ErasedColumn>>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entity_count", &self.entity_count())
            .field("components", &self.registry.names_joined())
            .finish()
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub(crate) fn allocator(&self) -> &EntityAllocator {
        &self.allocator
    }

    /// Register `T` and create its column. Registering twice is a no-op.
    pub fn register_component<T: Component>(&mut self) {
        if self.registry.register::<T>() {
            self.columns
                .insert(TypeId::of::<T>(), Box::new(Column::<T>::new()));
        }
    }

    // -- column access ------------------------------------------------------

    pub(crate) fn column<T: Component>(&self) -> Option<&Column<T>> {
        self.columns
            .get(&TypeId::of::<T>())
            .and_then(|column| column.as_any().downcast_ref::<Column<T>>())
    }

    pub(crate) fn column_mut<T: Component>(&mut self) -> Option<&mut Column<T>> {
        self.columns
            .get_mut(&TypeId::of::<T>())
            .and_then(|column| column.as_any_mut().downcast_mut::<Column<T>>())
    }

    fn erased_column(&self, name: &str) -> Result<&dyn ErasedColumn, EcsError> {
        self.registry
            .type_of(name)
            .and_then(|type_id| self.columns.get(&type_id))
            .map(|column| &**column)
            .ok_or_else(|| self.unknown(name))
    }

    fn erased_column_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut (dyn ErasedColumn + 'static), EcsError> {
        let unknown = self.unknown(name);
        let type_id = self.registry.type_of(name).ok_or_else(|| unknown.clone())?;
        self.columns
            .get_mut(&type_id)
            .map(|column| &mut **column)
            .ok_or(unknown)
    }

    fn unknown(&self, name: &str) -> EcsError {
        EcsError::UnknownComponent {
            name: name.to_owned(),
            registered: self.registry.names_joined(),
        }
    }

    fn ensure_alive(&self, entity: EntityId) -> Result<(), EcsError> {
        if self.allocator.is_alive(entity) {
            Ok(())
        } else {
            Err(EcsError::StaleEntity { entity })
        }
    }

    // -- entity lifecycle ---------------------------------------------------

    /// Spawn an entity carrying every component in `bundle`.
    ///
    /// Fails without allocating if any bundled type is unregistered.
    pub fn spawn_bundle(&mut self, bundle: ComponentBundle) -> Result<EntityId, EcsError> {
        if let Some(entry) = bundle
            .entries
            .iter()
            .find(|entry| !self.columns.contains_key(&entry.component_type()))
        {
            return Err(EcsError::UnregisteredComponent {
                name: entry.component_name().to_owned(),
            });
        }
        let entity = self.allocator.allocate();
        for entry in bundle.entries {
            entry.insert_into(self, entity);
        }
        Ok(entity)
    }

    /// Spawn an entity with a single component.
    pub fn spawn_with<T: Component>(&mut self, component: T) -> Result<EntityId, EcsError> {
        self.spawn_bundle(ComponentBundle::new().with(component))
    }

    /// Spawn an entity with no components.
    pub fn spawn_empty(&mut self) -> EntityId {
        self.allocator.allocate()
    }

    /// Remove an entity and all of its components, retiring the handle.
    pub fn despawn(&mut self, entity: EntityId) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        for column in self.columns.values_mut() {
            column.clear(entity.index());
        }
        self.allocator.deallocate(entity);
        Ok(())
    }

    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.allocator.is_alive(entity)
    }

    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Live entities in ascending slot order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.allocator.iter_alive()
    }

    // -- typed component access ---------------------------------------------

    /// Borrow `entity`'s `T`.
    ///
    /// # Errors
    ///
    /// [`EcsError::StaleEntity`] for a dead or recycled handle,
    /// [`EcsError::UnregisteredComponent`] if `T` was never registered and
    /// [`EcsError::MissingComponent`] if the entity does not carry `T`.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Result<&T, EcsError> {
        self.ensure_alive(entity)?;
        self.column::<T>()
            .ok_or_else(|| EcsError::UnregisteredComponent {
                name: T::NAME.to_owned(),
            })?
            .get(entity.index())
            .ok_or_else(|| EcsError::MissingComponent {
                entity,
                component: T::NAME.to_owned(),
            })
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: EntityId) -> Result<&mut T, EcsError> {
        self.ensure_alive(entity)?;
        self.column_mut::<T>()
            .ok_or_else(|| EcsError::UnregisteredComponent {
                name: T::NAME.to_owned(),
            })?
            .get_mut(entity.index())
            .ok_or_else(|| EcsError::MissingComponent {
                entity,
                component: T::NAME.to_owned(),
            })
    }

    pub fn has_component<T: Component>(&self, entity: EntityId) -> bool {
        self.allocator.is_alive(entity)
            && self
                .column::<T>()
                .is_some_and(|column| column.get(entity.index()).is_some())
    }

    /// Attach or overwrite `entity`'s `T`.
    pub fn insert_component<T: Component>(&mut self, entity: EntityId, value: T) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        let column = self
            .column_mut::<T>()
            .ok_or_else(|| EcsError::UnregisteredComponent {
                name: T::NAME.to_owned(),
            })?;
        column.put(entity.index(), value);
        Ok(())
    }

    /// Detach `entity`'s `T`, returning it if it was present.
    pub fn remove_component<T: Component>(&mut self, entity: EntityId) -> Result<Option<T>, EcsError> {
        self.ensure_alive(entity)?;
        let column = self
            .column_mut::<T>()
            .ok_or_else(|| EcsError::UnregisteredComponent {
                name: T::NAME.to_owned(),
            })?;
        Ok(column.take(entity.index()))
    }

    // -- name-addressed access ----------------------------------------------

    /// Deserialize `value` into the component registered as `component_name`
    /// and attach it to `entity`. Used by the command buffer.
    pub fn set_component_by_name(
        &mut self,
        entity: EntityId,
        component_name: &str,
        value: &serde_json::Value,
    ) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.erased_column_mut(component_name)?
            .set_json(entity.index(), value)
            .map_err(|e| EcsError::ComponentDeserialization {
                component: component_name.to_owned(),
                details: e.to_string(),
            })
    }

    /// Detach the named component. Absent components are not an error.
    pub fn remove_component_by_name(&mut self, entity: EntityId, component_name: &str) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;
        self.erased_column_mut(component_name)?.clear(entity.index());
        Ok(())
    }

    /// JSON form of the named component, or `None` if the entity lacks it.
    pub fn component_json(
        &self,
        entity: EntityId,
        component_name: &str,
    ) -> Result<Option<serde_json::Value>, EcsError> {
        self.ensure_alive(entity)?;
        self.erased_column(component_name)?
            .get_json(entity.index())
            .transpose()
            .map_err(|e| EcsError::ComponentSerialization {
                component: component_name.to_owned(),
                details: e.to_string(),
            })
    }

    /// Names of the components `entity` carries, sorted.
    pub fn component_names_of(&self, entity: EntityId) -> Result<Vec<&'static str>, EcsError> {
        self.ensure_alive(entity)?;
        Ok(self
            .registry
            .names()
            .filter(|name| {
                self.erased_column(name)
                    .is_ok_and(|column| column.contains(entity.index()))
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Name(String);
    impl Component for Name {
        const NAME: &'static str = "name";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Age(u32);
    impl Component for Age {
        const NAME: &'static str = "age";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Unregistered;
    impl Component for Unregistered {
        const NAME: &'static str = "unregistered";
    }

    fn setup_world() -> World {
        let mut world = World::new();
        world.register_component::<Name>();
        world.register_component::<Age>();
        world
    }

    #[test]
    fn spawn_and_read_back() {
        let mut world = setup_world();
        let e = world
            .spawn_bundle(ComponentBundle::new().with(Name("Rex".into())).with(Age(3)))
            .unwrap();
        assert_eq!(world.get_component::<Name>(e).unwrap(), &Name("Rex".into()));
        assert_eq!(world.get_component::<Age>(e).unwrap(), &Age(3));
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn bundle_with_unregistered_type_allocates_nothing() {
        let mut world = setup_world();
        let err = world
            .spawn_bundle(ComponentBundle::new().with(Age(1)).with(Unregistered))
            .unwrap_err();
        assert!(matches!(err, EcsError::UnregisteredComponent { .. }));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn stale_handle_does_not_reach_new_tenant() {
        let mut world = setup_world();
        let old = world.spawn_with(Age(1)).unwrap();
        world.despawn(old).unwrap();
        let new = world.spawn_with(Age(2)).unwrap();
        assert_eq!(new.index(), old.index());

        assert!(matches!(
            world.get_component::<Age>(old),
            Err(EcsError::StaleEntity { entity }) if entity == old
        ));
        assert_eq!(world.get_component::<Age>(new).unwrap(), &Age(2));
        assert!(world.insert_component(old, Age(9)).is_err());
        assert!(world.despawn(old).is_err());
    }

    #[test]
    fn despawn_clears_components() {
        let mut world = setup_world();
        let e = world.spawn_with(Name("a".into())).unwrap();
        world.despawn(e).unwrap();
        let recycled = world.spawn_empty();
        assert_eq!(recycled.index(), e.index());
        assert!(!world.has_component::<Name>(recycled));
    }

    #[test]
    fn missing_component_is_distinct_from_stale() {
        let mut world = setup_world();
        let e = world.spawn_with(Name("a".into())).unwrap();
        assert!(matches!(
            world.get_component::<Age>(e),
            Err(EcsError::MissingComponent { .. })
        ));
        assert!(matches!(
            world.get_component::<Unregistered>(e),
            Err(EcsError::UnregisteredComponent { .. })
        ));
    }

    #[test]
    fn insert_overwrites_and_remove_returns_value() {
        let mut world = setup_world();
        let e = world.spawn_with(Age(1)).unwrap();
        world.insert_component(e, Age(5)).unwrap();
        assert_eq!(world.get_component::<Age>(e).unwrap(), &Age(5));
        assert_eq!(world.remove_component::<Age>(e).unwrap(), Some(Age(5)));
        assert_eq!(world.remove_component::<Age>(e).unwrap(), None);
        assert!(!world.has_component::<Age>(e));
    }

    #[test]
    fn get_component_mut_edits_in_place() {
        let mut world = setup_world();
        let e = world.spawn_with(Age(1)).unwrap();
        world.get_component_mut::<Age>(e).unwrap().0 += 10;
        assert_eq!(world.get_component::<Age>(e).unwrap(), &Age(11));
    }

    #[test]
    fn set_by_name_deserializes() {
        let mut world = setup_world();
        let e = world.spawn_empty();
        world
            .set_component_by_name(e, "age", &serde_json::json!(42))
            .unwrap();
        assert_eq!(world.get_component::<Age>(e).unwrap(), &Age(42));
        assert_eq!(
            world.component_json(e, "age").unwrap(),
            Some(serde_json::json!(42))
        );
        assert_eq!(world.component_names_of(e).unwrap(), vec!["age"]);
    }

    #[test]
    fn set_by_name_rejects_bad_input() {
        let mut world = setup_world();
        let e = world.spawn_empty();
        let err = world
            .set_component_by_name(e, "weight", &serde_json::json!(1))
            .unwrap_err();
        match err {
            EcsError::UnknownComponent { name, registered } => {
                assert_eq!(name, "weight");
                assert_eq!(registered, "age, name");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            world.set_component_by_name(e, "age", &serde_json::json!("old")),
            Err(EcsError::ComponentDeserialization { .. })
        ));
    }

    #[test]
    fn remove_by_name_is_noop_when_absent() {
        let mut world = setup_world();
        let e = world.spawn_empty();
        world.remove_component_by_name(e, "age").unwrap();
        world.insert_component(e, Age(1)).unwrap();
        world.remove_component_by_name(e, "age").unwrap();
        assert!(!world.has_component::<Age>(e));
    }

    #[test]
    fn entities_iterate_in_slot_order() {
        let mut world = setup_world();
        let a = world.spawn_empty();
        let b = world.spawn_empty();
        let c = world.spawn_empty();
        world.despawn(b).unwrap();
        assert_eq!(world.entities().collect::<Vec<_>>(), vec![a, c]);
    }
}
