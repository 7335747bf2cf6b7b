use crate::iter::{Friends, Iter};
use crate::{Person, PersonError, PersonId, Registry};
use tracing::debug;

/// A social graph: everyone in it, who their friends are, and how much money they have.
///
/// `People` owns every [`Person`] and refers to them by [`PersonId`]. Names are unique within a
/// graph, and friendships are always symmetric. Every operation checks its preconditions before
/// touching anything, so an `Err` means nothing changed.
///
/// Using a `PersonId` from one `People` with another one is a logic error. In debug builds it may
/// panic.
#[derive(Clone, Debug, Default)]
pub struct People {
    registry: Registry<Person>,
    by_name: hashbrown::HashMap<String, PersonId>,
}

impl People {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty graph with room for at least `capacity` people.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: Registry::with_capacity(capacity),
            by_name: hashbrown::HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.registry.get(id)
    }

    pub fn contains_id(&self, id: PersonId) -> bool {
        self.registry.contains_id(id)
    }

    pub fn find(&self, name: &str) -> Option<PersonId> {
        self.by_name.get(name).copied()
    }

    pub fn iter(&self) -> Iter<'_, Person> {
        self.registry.iter()
    }

    /// Sum of everyone's balance. Transfers between friends never change it.
    pub fn total_balance(&self) -> f64 {
        self.registry.values().map(Person::balance).sum()
    }

    /// Move a person into the graph.
    ///
    /// Fails with [`NameTaken`](PersonError::NameTaken) if someone with the same name is already
    /// here. A person carries no friendships into a graph; any it had elsewhere are dropped.
    pub fn insert(&mut self, mut person: Person) -> Result<PersonId, PersonError> {
        if self.by_name.contains_key(person.name()) {
            return Err(PersonError::NameTaken);
        }
        person.friends.clear();
        let name = person.name().to_owned();
        let id = self.registry.insert(person);
        debug!(person = %name, ?id, "inserted person");
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// [`Person::new`] followed by [`insert`](People::insert).
    pub fn add(
        &mut self,
        name: impl Into<String>,
        age: i64,
        balance: f64,
    ) -> Result<PersonId, PersonError> {
        self.insert(Person::new(name, age, balance)?)
    }

    /// Take a person out of the graph, unfriending them from everyone first. Returns `None` if
    /// `id` was already removed.
    pub fn remove(&mut self, id: PersonId) -> Option<Person> {
        let person = self.registry.get(id)?;
        let name = person.name().to_owned();
        let friend_ids: Vec<PersonId> = person.friends.values().copied().collect();
        for friend_id in friend_ids {
            if let Some(friend) = self.registry.get_mut(friend_id) {
                friend.friends.remove(&name);
            }
        }
        let mut person = self.registry.remove(id)?;
        person.friends.clear();
        self.by_name.remove(&name);
        debug!(person = %name, "removed person");
        Some(person)
    }

    pub fn set_age(&mut self, id: PersonId, age: i64) -> Result<(), PersonError> {
        self.live_mut(id)?.set_age(age)
    }

    /// Whether `other` is in `id`'s friends. `false` if either has been removed.
    pub fn is_friends_with(&self, id: PersonId, other: PersonId) -> bool {
        match (self.registry.get(id), self.registry.get(other)) {
            (Some(person), Some(other)) => person.is_friends_with(other),
            _ => false,
        }
    }

    /// Everyone `id` is friends with, in no particular order.
    pub fn friends(&self, id: PersonId) -> Result<Friends<'_>, PersonError> {
        let person = self.live(id)?;
        Ok(Friends {
            people: &self.registry,
            ids: person.friends.values(),
        })
    }

    /// Make `this` and `other` friends with each other.
    ///
    /// Fails with [`FriendAlreadyAdded`](PersonError::FriendAlreadyAdded) if they already are, or
    /// else with [`CannotBefriendItself`](PersonError::CannotBefriendItself) if they're the same
    /// person.
    pub fn add_friend(&mut self, this: PersonId, other: PersonId) -> Result<(), PersonError> {
        let person = self.live(this)?;
        let friend = self.live(other)?;
        if person.is_friends_with(friend) {
            return Err(PersonError::FriendAlreadyAdded);
        }
        if person.name() == friend.name() {
            return Err(PersonError::CannotBefriendItself);
        }
        let (person, friend) = self.pair_mut(this, other)?;
        person.friends.insert(friend.name().to_owned(), other);
        friend.friends.insert(person.name().to_owned(), this);
        debug!(person = %person.name(), friend = %friend.name(), "added friend");
        Ok(())
    }

    /// End the friendship between `this` and `friend`, on both sides.
    pub fn remove_friend(&mut self, this: PersonId, friend: PersonId) -> Result<(), PersonError> {
        self.check_friends(this, friend)?;
        let (person, friend) = self.pair_mut(this, friend)?;
        person.friends.remove(friend.name());
        friend.friends.remove(person.name());
        debug!(person = %person.name(), friend = %friend.name(), "removed friend");
        Ok(())
    }

    /// Move `amount` from `this` to `friend`.
    ///
    /// Fails with [`InvalidBalance`](PersonError::InvalidBalance) if `this` can't afford it.
    ///
    /// ```
    /// use friendledger::{People, PersonError};
    ///
    /// let mut people = People::new();
    /// let roniel = people.add("Roniel", 20, 300.0)?;
    /// let albin = people.add("Albin", 20, 3300.0)?;
    /// people.add_friend(roniel, albin)?;
    ///
    /// assert_eq!(
    ///     people.give_money_to_friend(roniel, 500.0, albin),
    ///     Err(PersonError::InvalidBalance),
    /// );
    /// assert_eq!(people[roniel].balance(), 300.0);
    /// # Ok::<(), PersonError>(())
    /// ```
    pub fn give_money_to_friend(
        &mut self,
        this: PersonId,
        amount: f64,
        friend: PersonId,
    ) -> Result<(), PersonError> {
        self.check_friends(this, friend)?;
        validate_amount(amount)?;
        if !self.live(this)?.can_afford(amount) {
            return Err(PersonError::InvalidBalance);
        }
        let (person, friend) = self.pair_mut(this, friend)?;
        person.debit(amount);
        friend.credit(amount);
        debug!(
            person = %person.name(),
            friend = %friend.name(),
            amount,
            "gave money to friend"
        );
        Ok(())
    }

    /// Move `amount` from `friend` to `this`.
    ///
    /// Fails with [`InvalidBalance`](PersonError::InvalidBalance) if `friend` can't afford it.
    pub fn receive_money_from_friend(
        &mut self,
        this: PersonId,
        amount: f64,
        friend: PersonId,
    ) -> Result<(), PersonError> {
        self.check_friends(this, friend)?;
        validate_amount(amount)?;
        if !self.live(friend)?.can_afford(amount) {
            return Err(PersonError::InvalidBalance);
        }
        let (person, friend) = self.pair_mut(this, friend)?;
        friend.debit(amount);
        person.credit(amount);
        debug!(
            person = %person.name(),
            friend = %friend.name(),
            amount,
            "received money from friend"
        );
        Ok(())
    }

    fn live(&self, id: PersonId) -> Result<&Person, PersonError> {
        self.registry.get(id).ok_or(PersonError::UnknownPerson)
    }

    fn live_mut(&mut self, id: PersonId) -> Result<&mut Person, PersonError> {
        self.registry.get_mut(id).ok_or(PersonError::UnknownPerson)
    }

    // Friends are never the same person, so the pair is always disjoint once check_friends or
    // the add_friend checks have passed.
    fn pair_mut(
        &mut self,
        this: PersonId,
        other: PersonId,
    ) -> Result<(&mut Person, &mut Person), PersonError> {
        self.registry
            .get_pair_mut(this, other)
            .ok_or(PersonError::UnknownPerson)
    }

    fn check_friends(&self, this: PersonId, friend: PersonId) -> Result<(), PersonError> {
        let person = self.live(this)?;
        let friend = self.live(friend)?;
        if person.is_friends_with(friend) {
            Ok(())
        } else {
            Err(PersonError::NotFriend)
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), PersonError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(PersonError::InvalidAmount)
    }
}

impl std::ops::Index<PersonId> for People {
    type Output = Person;

    fn index(&self, id: PersonId) -> &Person {
        &self.registry[id]
    }
}

impl<'people> IntoIterator for &'people People {
    type Item = (PersonId, &'people Person);
    type IntoIter = Iter<'people, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
