//! iterator types

use crate::{Id, Person, PersonId, Registry};

/// An iterator over `(Id<T>, &T)`. Returned by [`iter`](crate::Registry::iter) or automatically
/// constructed by iterating over `&Registry`.
#[derive(Debug)]
pub struct Iter<'registry, T> {
    pub(crate) inner: std::iter::Enumerate<std::slice::Iter<'registry, crate::Slot<T>>>,
}

impl<'registry, T> Iterator for Iter<'registry, T> {
    type Item = (Id<T>, &'registry T);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.inner.by_ref() {
            if let Some(value) = &slot.value {
                return Some((Id::new(index as u32, slot.generation), value));
            }
        }
        None
    }
}

impl<'registry, T> Clone for Iter<'registry, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'registry, T> IntoIterator for &'registry Registry<T> {
    type Item = (Id<T>, &'registry T);
    type IntoIter = Iter<'registry, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over `Id<T>`. Returned by [`ids`](crate::Registry::ids).
#[derive(Clone, Debug)]
pub struct Ids<'registry, T> {
    pub(crate) inner: Iter<'registry, T>,
}

impl<'registry, T> Iterator for Ids<'registry, T> {
    type Item = Id<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, _val)| id)
    }
}

/// An iterator over `&T`. Returned by [`values`](crate::Registry::values).
#[derive(Clone, Debug)]
pub struct Values<'registry, T> {
    pub(crate) inner: Iter<'registry, T>,
}

impl<'registry, T> Iterator for Values<'registry, T> {
    type Item = &'registry T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_id, val)| val)
    }
}

/// An iterator over `(Id<T>, &mut T)`. Returned by [`iter_mut`](crate::Registry::iter_mut) or
/// automatically constructed by iterating over `&mut Registry`.
#[derive(Debug)]
pub struct IterMut<'registry, T> {
    pub(crate) inner: std::iter::Enumerate<std::slice::IterMut<'registry, crate::Slot<T>>>,
}

impl<'registry, T> Iterator for IterMut<'registry, T> {
    type Item = (Id<T>, &'registry mut T);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.inner.by_ref() {
            let generation = slot.generation;
            if let Some(value) = &mut slot.value {
                return Some((Id::new(index as u32, generation), value));
            }
        }
        None
    }
}

impl<'registry, T> IntoIterator for &'registry mut Registry<T> {
    type Item = (Id<T>, &'registry mut T);
    type IntoIter = IterMut<'registry, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over `(PersonId, &Person)` for everyone a person is friends with. Returned by
/// [`People::friends`](crate::People::friends). Order is unspecified.
#[derive(Clone)]
pub struct Friends<'people> {
    pub(crate) people: &'people Registry<Person>,
    pub(crate) ids: hashbrown::hash_map::Values<'people, String, PersonId>,
}

impl<'people> Iterator for Friends<'people> {
    type Item = (PersonId, &'people Person);

    fn next(&mut self) -> Option<Self::Item> {
        // Friend IDs are kept in sync with the registry by People, so this lookup only skips
        // entries if that invariant is broken.
        for &id in self.ids.by_ref() {
            if let Some(friend) = self.people.get(id) {
                return Some((id, friend));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.ids.size_hint().1)
    }
}
