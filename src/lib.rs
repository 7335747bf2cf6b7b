//! People, mutual friendships, and money moving between friends.
//!
//! A [`Person`] has a name, an age, and a non-negative balance. Persons live in a [`People`]
//! graph, which hands out a [`PersonId`] for each of them. Friendships are symmetric and stored on
//! both sides as IDs, so a friend's balance is always read from the one place it lives. Money only
//! moves between friends, and never far enough to leave anyone below zero.
//!
//! # Example
//!
//! ```
//! use friendledger::{People, PersonError};
//!
//! let mut people = People::new();
//! let roniel = people.add("Roniel", 20, 1520.0)?;
//! let albin = people.add("Albin", 20, 3300.0)?;
//! let enrique = people.add("Enrique", 21, 5540.0)?;
//!
//! people.add_friend(roniel, albin)?;
//! assert!(people.is_friends_with(albin, roniel));
//!
//! people.give_money_to_friend(roniel, 500.0, albin)?;
//! assert_eq!(people[roniel].balance(), 1020.0);
//! assert_eq!(people[albin].balance(), 3800.0);
//!
//! assert_eq!(
//!     people.give_money_to_friend(roniel, 500.0, enrique),
//!     Err(PersonError::NotFriend),
//! );
//! # Ok::<(), PersonError>(())
//! ```
//!
//! Under the hood, [`People`] is built on [`Registry`], a small generational arena. You can use it
//! directly for your own types.

use std::fmt;

mod error;
pub mod id;
pub mod iter;
mod people;
mod person;

#[cfg(test)]
mod test;

pub use error::PersonError;
pub use id::Id;
pub use people::People;
pub use person::{Person, PersonId};

use id::{MAX_GENERATION, MAX_LEN};

#[derive(Clone, Debug)]
pub(crate) struct Slot<T> {
    // The generation an ID needs to match this slot. Bumped when the value is removed, so IDs
    // handed out before the removal never match again.
    pub(crate) generation: u32,
    pub(crate) value: Option<T>,
}

/// A generational arena: insert a value, get back an [`Id`] you can use to find it again.
///
/// Removing a value frees its slot for reuse, but the slot's generation changes, so the old ID
/// won't find the new occupant. A slot whose generation runs out is retired and never reused.
///
/// # Example
///
/// ```
/// use friendledger::Registry;
///
/// let mut registry = Registry::new();
/// let foo = registry.insert("foo");
/// assert_eq!(registry[foo], "foo");
///
/// registry.remove(foo);
/// let bar = registry.insert("bar");
/// assert_eq!(foo.index(), bar.index());
/// assert!(registry.get(foo).is_none());
/// ```
#[derive(Clone)]
pub struct Registry<T> {
    slots: Vec<Slot<T>>,
    free_indexes: Vec<u32>,
    retired_indexes: Vec<u32>,
}

impl<T> Registry<T> {
    /// Construct a new, empty `Registry<T>`.
    ///
    /// The registry will not allocate until elements are inserted into it.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Construct a new, empty `Registry<T>` with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_indexes: Vec::new(),
            retired_indexes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free_indexes.len() - self.retired_indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    // We currently check for two possible violations:
    // 1. The index of an ID should never be larger than the number of slots. The only ways to
    //    violate this rule are to assemble a garbage ID by hand or to use an ID from one Registry
    //    with another of the same type.
    // 2. The generation of an ID should never be newer than its slot, for the same reasons.
    fn debug_best_effort_checks_for_contract_violations(&self, id: Id<T>) {
        if !cfg!(debug_assertions) {
            return;
        }
        let Some(slot) = self.slots.get(id.index() as usize) else {
            panic!("ID index out of bounds; is it from another Registry?");
        };
        debug_assert!(
            id.generation() <= slot.generation,
            "ID generation is newer than its slot; is it from another Registry?",
        );
    }

    pub fn contains_id(&self, id: Id<T>) -> bool {
        self.debug_best_effort_checks_for_contract_violations(id);
        match self.slots.get(id.index() as usize) {
            Some(slot) => slot.generation == id.generation() && slot.value.is_some(),
            None => false,
        }
    }

    /// Get a reference to an element. If [`remove`](Registry::remove) has been called on `id`,
    /// `get` will return `None`.
    pub fn get(&self, id: Id<T>) -> Option<&T> {
        if self.contains_id(id) {
            self.slots[id.index() as usize].value.as_ref()
        } else {
            None
        }
    }

    /// Get a mutable reference to an element. If [`remove`](Registry::remove) has been called on
    /// `id`, `get_mut` will return `None`.
    pub fn get_mut(&mut self, id: Id<T>) -> Option<&mut T> {
        if self.contains_id(id) {
            self.slots[id.index() as usize].value.as_mut()
        } else {
            None
        }
    }

    /// Get mutable references to two different elements at once, in argument order.
    ///
    /// Returns `None` if either ID is missing or if both IDs refer to the same slot.
    ///
    /// ```
    /// use friendledger::Registry;
    ///
    /// let mut registry = Registry::new();
    /// let a = registry.insert(1);
    /// let b = registry.insert(2);
    /// if let Some((x, y)) = registry.get_pair_mut(b, a) {
    ///     std::mem::swap(x, y);
    /// }
    /// assert_eq!((registry[a], registry[b]), (2, 1));
    /// assert!(registry.get_pair_mut(a, a).is_none());
    /// ```
    pub fn get_pair_mut(&mut self, first: Id<T>, second: Id<T>) -> Option<(&mut T, &mut T)> {
        if first.index() == second.index() {
            return None;
        }
        if !self.contains_id(first) || !self.contains_id(second) {
            return None;
        }
        let low = first.index().min(second.index()) as usize;
        let high = first.index().max(second.index()) as usize;
        let (left, right) = self.slots.split_at_mut(high);
        let low_value = left[low].value.as_mut()?;
        let high_value = right[0].value.as_mut()?;
        if first.index() < second.index() {
            Some((low_value, high_value))
        } else {
            Some((high_value, low_value))
        }
    }

    pub fn insert(&mut self, value: T) -> Id<T> {
        // Reuse a free slot if there are any. Its generation was already bumped by remove().
        if let Some(index) = self.free_indexes.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.value.is_none());
            slot.value = Some(value);
            return Id::new(index, slot.generation);
        }
        // Panic if the index space is full.
        assert!(self.slots.len() < MAX_LEN as usize, "all slots occupied");
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        Id::new(index, 0)
    }

    pub fn remove(&mut self, id: Id<T>) -> Option<T> {
        if !self.contains_id(id) {
            return None;
        }
        let slot = &mut self.slots[id.index() as usize];
        let value = slot.value.take();
        if slot.generation == MAX_GENERATION {
            self.retired_indexes.push(id.index());
        } else {
            slot.generation += 1;
            self.free_indexes.push(id.index());
        }
        value
    }

    pub fn iter(&self) -> iter::Iter<'_, T> {
        iter::Iter {
            inner: self.slots.iter().enumerate(),
        }
    }

    pub fn ids(&self) -> iter::Ids<'_, T> {
        iter::Ids { inner: self.iter() }
    }

    pub fn values(&self) -> iter::Values<'_, T> {
        iter::Values { inner: self.iter() }
    }

    pub fn iter_mut(&mut self) -> iter::IterMut<'_, T> {
        iter::IterMut {
            inner: self.slots.iter_mut().enumerate(),
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Registry<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        struct EmptySlot;

        impl fmt::Debug for EmptySlot {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
                write!(f, "<empty>")
            }
        }

        let mut list = f.debug_list();
        for slot in &self.slots {
            match &slot.value {
                Some(value) => list.entry(value),
                None => list.entry(&EmptySlot),
            };
        }
        list.finish()
    }
}

impl<T> std::ops::Index<Id<T>> for Registry<T> {
    type Output = T;

    fn index(&self, id: Id<T>) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("no element for {:?}", id),
        }
    }
}

impl<T> std::ops::IndexMut<Id<T>> for Registry<T> {
    fn index_mut(&mut self, id: Id<T>) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("no element for {:?}", id),
        }
    }
}
