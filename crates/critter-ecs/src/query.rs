//! Read-only tuple queries.
//!
//! `world.query::<(&A, &B)>()` visits every live entity that carries both
//! `A` and `B`, in ascending slot order. Iteration order is therefore a pure
//! function of the world's allocation history, which keeps every system
//! built on top of it deterministic. Filtering ("search") is plain iterator
//! composition:
//!
//! ```
//! use critter_ecs::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
//! struct Tag(String);
//! impl Component for Tag { const NAME: &'static str = "tag"; }
//!
//! let mut world = World::new();
//! world.register_component::<Tag>();
//! world.spawn_with(Tag("a".into())).unwrap();
//! let b = world.spawn_with(Tag("b".into())).unwrap();
//!
//! let found = world
//!     .query::<(&Tag,)>()
//!     .find(|(_, (tag,))| tag.0 == "b")
//!     .map(|(entity, _)| entity);
//! assert_eq!(found, Some(b));
//! ```

use std::marker::PhantomData;

use crate::component::Component;
use crate::entity::EntityId;
use crate::world::World;

// ---------------------------------------------------------------------------
// QueryItem
// ---------------------------------------------------------------------------

/// One element of a query tuple.
pub trait QueryItem {
    type Item<'w>;

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>>;
}

impl<T: Component> QueryItem for &T {
    type Item<'w> = &'w T;

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>> {
        world.column::<T>()?.get(entity.index())
    }
}

/// `Option<&T>` matches every entity and yields `None` where `T` is absent.
impl<T: Component> QueryItem for Option<&T> {
    type Item<'w> = Option<&'w T>;

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>> {
        Some(world.column::<T>().and_then(|column| column.get(entity.index())))
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A tuple of [`QueryItem`]s fetched together.
pub trait Query {
    type Item<'w>;

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>>;
}

impl<A: QueryItem> Query for (A,) {
    type Item<'w> = (A::Item<'w>,);

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>> {
        Some((A::fetch(world, entity)?,))
    }
}

impl<A: QueryItem, B: QueryItem> Query for (A, B) {
    type Item<'w> = (A::Item<'w>, B::Item<'w>);

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>> {
        Some((A::fetch(world, entity)?, B::fetch(world, entity)?))
    }
}

impl<A: QueryItem, B: QueryItem, C: QueryItem> Query for (A, B, C) {
    type Item<'w> = (A::Item<'w>, B::Item<'w>, C::Item<'w>);

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>> {
        Some((
            A::fetch(world, entity)?,
            B::fetch(world, entity)?,
            C::fetch(world, entity)?,
        ))
    }
}

impl<A: QueryItem, B: QueryItem, C: QueryItem, D: QueryItem> Query for (A, B, C, D) {
    type Item<'w> = (A::Item<'w>, B::Item<'w>, C::Item<'w>, D::Item<'w>);

    fn fetch(world: &World, entity: EntityId) -> Option<Self::Item<'_>> {
        Some((
            A::fetch(world, entity)?,
            B::fetch(world, entity)?,
            C::fetch(world, entity)?,
            D::fetch(world, entity)?,
        ))
    }
}

// ---------------------------------------------------------------------------
// QueryIter
// ---------------------------------------------------------------------------

/// Iterator returned by [`World::query`].
pub struct QueryIter<'w, Q: Query> {
    world: &'w World,
    next_index: u32,
    end: u32,
    _marker: PhantomData<Q>,
}

impl<'w, Q: Query> Iterator for QueryIter<'w, Q> {
    type Item = (EntityId, Q::Item<'w>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.end {
            let index = self.next_index;
            self.next_index += 1;
            let Some(entity) = self.world.allocator().live_at(index) else {
                continue;
            };
            if let Some(item) = Q::fetch(self.world, entity) {
                return Some((entity, item));
            }
        }
        None
    }
}

impl World {
    /// Iterate `(EntityId, components)` for every live entity matching `Q`.
    pub fn query<Q: Query>(&self) -> QueryIter<'_, Q> {
        QueryIter {
            world: self,
            next_index: 0,
            end: self.allocator().slot_count(),
            _marker: PhantomData,
        }
    }

    /// First entity matching `Q` for which `predicate` holds.
    pub fn find<'w, Q, F>(&'w self, mut predicate: F) -> Option<(EntityId, Q::Item<'w>)>
    where
        Q: Query,
        F: FnMut(&Q::Item<'w>) -> bool,
    {
        self.query::<Q>().find(|(_, item)| predicate(item))
    }
}
