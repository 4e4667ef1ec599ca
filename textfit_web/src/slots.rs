// Copyright 2025 the Textfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index slots for registered elements.

use alloc::vec::Vec;

/// A handle table where released slots are reused by later registrations.
#[derive(Clone, Debug)]
pub(crate) struct Slots<T> {
    items: Vec<Option<T>>,
}

impl<T: Clone + PartialEq> Slots<T> {
    pub(crate) const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the slot holding `item`, filling a free slot on first use.
    pub(crate) fn insert(&mut self, item: &T) -> usize {
        let mut free = None;
        for (index, slot) in self.items.iter().enumerate() {
            match slot {
                Some(existing) if existing == item => return index,
                None if free.is_none() => free = Some(index),
                _ => {}
            }
        }
        match free {
            Some(index) => {
                self.items[index] = Some(item.clone());
                index
            }
            None => {
                self.items.push(Some(item.clone()));
                self.items.len() - 1
            }
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// Frees a slot, returning what it held.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        let item = self.items.get_mut(index)?.take();
        while matches!(self.items.last(), Some(None)) {
            self.items.pop();
        }
        item
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.items.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn registering_twice_returns_the_same_slot() {
        let mut slots = Slots::new();
        let a = slots.insert(&"a");
        let b = slots.insert(&"b");
        assert_ne!(a, b);
        assert_eq!(slots.insert(&"a"), a);
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn released_slots_are_reused() {
        let mut slots = Slots::new();
        let a = slots.insert(&"a");
        let b = slots.insert(&"b");
        let _c = slots.insert(&"c");
        assert_eq!(slots.remove(b), Some("b"));
        assert_eq!(slots.get(b), None);
        assert_eq!(slots.remove(b), None, "double release is a no-op");
        assert_eq!(slots.insert(&"d"), b, "the freed slot is filled first");
        assert_eq!(slots.get(a), Some(&"a"));
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn releasing_the_tail_shrinks_the_table() {
        let mut slots = Slots::new();
        slots.insert(&1);
        let b = slots.insert(&2);
        let c = slots.insert(&3);
        slots.remove(b);
        slots.remove(c);
        assert_eq!(slots.items.len(), 1);
        assert_eq!(slots.insert(&4), 1);
    }
}
