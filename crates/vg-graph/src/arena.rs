//! Generational slab backing the genealogy's nodes.
//!
//! Slots are addressed by [`SlotId`]. Freeing a slot bumps its generation, so
//! handles issued before the free stop resolving instead of aliasing whatever
//! is stored there next.

use vg_core::{Id, SlotId};

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    /// Indices of vacant slots, reused LIFO.
    free: Vec<Id>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` and return a handle to it.
    ///
    /// # Panics
    ///
    /// Panics if more than `Id::MAX_INDEX` slots would be needed, the same way
    /// `Vec` panics on capacity overflow.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        if let Some(id) = self.free.pop() {
            let slot = &mut self.slots[id.index() as usize];
            slot.value = Some(value);
            return SlotId::new(id, slot.generation);
        }

        let index = self.slots.len();
        assert!(
            index <= Id::MAX_INDEX as usize,
            "node arena capacity overflow"
        );
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        SlotId::new(Id::from_index(index as u32), 0)
    }

    pub fn get(&self, slot: SlotId) -> Option<&T> {
        self.slots
            .get(slot.index())
            .filter(|s| s.generation == slot.generation())
            .and_then(|s| s.value.as_ref())
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(slot.index())
            .filter(|s| s.generation == slot.generation())
            .and_then(|s| s.value.as_mut())
    }

    /// Whether `slot` still names a live value.
    pub fn contains(&self, slot: SlotId) -> bool {
        self.get(slot).is_some()
    }

    /// Take the value out of `slot`, invalidating every handle to it.
    ///
    /// Returns `None` if the handle is already stale.
    pub fn remove(&mut self, slot: SlotId) -> Option<T> {
        let entry = self.slots.get_mut(slot.index())?;
        if entry.generation != slot.generation() {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(slot.id());
        self.len -= 1;
        Some(value)
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value
                .as_ref()
                .map(|v| (SlotId::new(Id::from_index(i as u32), s.generation), v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut arena = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn removed_handle_goes_stale() {
        let mut arena = Arena::new();
        let a = arena.insert(1);
        assert_eq!(arena.remove(a), Some(1));
        assert!(!arena.contains(a));
        assert_eq!(arena.remove(a), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn reused_slot_does_not_resolve_old_handle() {
        let mut arena = Arena::new();
        let old = arena.insert(1);
        arena.remove(old);
        let new = arena.insert(2);

        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&2));
    }

    #[test]
    fn iter_skips_vacant_slots() {
        let mut arena = Arena::new();
        let a = arena.insert('a');
        let b = arena.insert('b');
        let c = arena.insert('c');
        arena.remove(b);

        let live: Vec<_> = arena.iter().map(|(slot, v)| (slot, *v)).collect();
        assert_eq!(live, vec![(a, 'a'), (c, 'c')]);
    }
}
