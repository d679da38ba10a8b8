//! Per-component column storage.
//!
//! Each registered component type owns one [`Column`], a slot vector indexed
//! by entity index. Liveness and generation checks happen in [`World`]
//! before a column is touched, so columns only ever see valid slots.
//!
//! [`World`]: crate::world::World

use std::any::Any;

use crate::component::Component;

/// Type-erased view of a column, used for name-addressed access and cleanup.
pub(crate) trait ErasedColumn: Send + Sync {
    fn name(&self) -> &'static str;
    fn contains(&self, index: u32) -> bool;
    fn clear(&mut self, index: u32) -> bool;
    fn set_json(&mut self, index: u32, value: &serde_json::Value) -> Result<(), serde_json::Error>;
    fn get_json(&self, index: u32) -> Option<Result<serde_json::Value, serde_json::Error>>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug)]
pub(crate) struct Column<T> {
    slots: Vec<Option<T>>,
}

impl<T> Column<T> {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize).and_then(Option::as_mut)
    }

    /// Store `value`, returning whatever occupied the slot before.
    pub(crate) fn put(&mut self, index: u32, value: T) -> Option<T> {
        let idx = index as usize;
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, || None);
        }
        self.slots[idx].replace(value)
    }

    pub(crate) fn take(&mut self, index: u32) -> Option<T> {
        self.slots.get_mut(index as usize).and_then(Option::take)
    }
}

impl<T: Component> ErasedColumn for Column<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn contains(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    fn clear(&mut self, index: u32) -> bool {
        self.take(index).is_some()
    }

    fn set_json(&mut self, index: u32, value: &serde_json::Value) -> Result<(), serde_json::Error> {
        let typed: T = serde_json::from_value(value.clone())?;
        self.put(index, typed);
        Ok(())
    }

    fn get_json(&self, index: u32) -> Option<Result<serde_json::Value, serde_json::Error>> {
        self.get(index).map(serde_json::to_value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
