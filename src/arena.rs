//! Backing store for tree nodes. Nodes refer to each other by [`Handle`] instead of by pointer
//! so a child can point back at its parent without a second owner.

use std::num::NonZeroU32;

/// An index into an [`Arena`]. Stored off-by-one in a `NonZeroU32` so `Option<Handle>` is the
/// same size as `Handle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle(NonZeroU32);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as u32;
        Self(NonZeroU32::new(raw).expect("`index + 1` is never zero"))
    }

    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

/// A slab of `T`s. Freed slots are recycled by later allocations.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Number of live elements.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        match self.free.pop() {
            Some(handle) => {
                self.slots[handle.index()] = Some(element);
                handle
            }
            None => {
                let handle = Handle::from_index(self.slots.len());
                self.slots.push(Some(element));
                handle
            }
        }
    }

    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()]
            .as_ref()
            .expect("`Arena::get()` - `handle` is stale!")
    }

    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()]
            .as_mut()
            .expect("`Arena::get_mut()` - `handle` is stale!")
    }

    /// Removes the element, returning it and recycling its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()]
            .take()
            .expect("`Arena::take()` - `handle` is stale!");
        self.free.push(handle);
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_niche() {
        assert_eq!(
            std::mem::size_of::<Handle>(),
            std::mem::size_of::<Option<Handle>>()
        );
    }

    #[test]
    fn handle_index_round_trips() {
        for index in [0, 1, 41, Handle::MAX] {
            assert_eq!(Handle::from_index(index).index(), index);
        }
    }

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn handle_out_of_range() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn take_recycles_slot() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.take(a), "a");
        assert_eq!(arena.len(), 1);

        let c = arena.alloc("c");
        assert_eq!(c, a);
        assert_eq!(*arena.get(c), "c");
        assert_eq!(*arena.get(b), "b");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    #[should_panic(expected = "`Arena::get()` - `handle` is stale!")]
    fn stale_handle_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(());
        arena.take(a);
        arena.get(a);
    }

    #[test]
    fn clear_empties() {
        let mut arena = Arena::with_capacity(2);
        arena.alloc(1);
        arena.alloc(2);
        arena.clear();
        assert_eq!(arena.len(), 0);
    }
}
