use crate::{Id, PersonError};

pub type PersonId = Id<Person>;

/// Someone with a name, an age, a balance, and friends.
///
/// A `Person` on its own can't do much besides validate its fields. Friendships and transfers
/// involve two people at once, so they're operations on [`People`](crate::People), which owns
/// everyone and hands out [`PersonId`]s.
#[derive(Clone, Debug)]
pub struct Person {
    name: String,
    age: i64,
    balance: f64,
    // Keyed by friend name. Names are unique within a People graph.
    pub(crate) friends: hashbrown::HashMap<String, PersonId>,
}

impl Person {
    /// Construct a person with no friends.
    ///
    /// Fails with [`MissingName`](PersonError::MissingName) if `name` is empty,
    /// [`InvalidAge`](PersonError::InvalidAge) if `age` is negative, and
    /// [`InvalidBalance`](PersonError::InvalidBalance) if `balance` is negative or not finite,
    /// checked in that order.
    ///
    /// ```
    /// use friendledger::{Person, PersonError};
    ///
    /// let person = Person::new("Roniel", 20, 1520.0)?;
    /// assert_eq!(person.name(), "Roniel");
    /// assert_eq!(Person::new("", 20, 1520.0).unwrap_err(), PersonError::MissingName);
    /// # Ok::<(), PersonError>(())
    /// ```
    pub fn new(name: impl Into<String>, age: i64, balance: f64) -> Result<Self, PersonError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PersonError::MissingName);
        }
        validate_age(age)?;
        if !(balance.is_finite() && balance >= 0.0) {
            return Err(PersonError::InvalidBalance);
        }
        Ok(Self {
            name,
            age,
            balance,
            friends: hashbrown::HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    /// Names of everyone this person is friends with, in no particular order.
    pub fn friend_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.friends.keys().map(String::as_str)
    }

    /// Friendship is looked up by name.
    pub fn is_friends_with(&self, other: &Person) -> bool {
        self.friends.contains_key(&other.name)
    }

    pub(crate) fn set_age(&mut self, age: i64) -> Result<(), PersonError> {
        validate_age(age)?;
        self.age = age;
        Ok(())
    }

    pub(crate) fn credit(&mut self, amount: f64) {
        self.balance += amount;
    }

    // Callers check funds first.
    pub(crate) fn debit(&mut self, amount: f64) {
        debug_assert!(self.balance - amount >= 0.0);
        self.balance -= amount;
    }

    pub(crate) fn can_afford(&self, amount: f64) -> bool {
        self.balance - amount >= 0.0
    }
}

fn validate_age(age: i64) -> Result<(), PersonError> {
    if age < 0 {
        Err(PersonError::InvalidAge)
    } else {
        Ok(())
    }
}
