//! error types

/// Every way a [`Person`](crate::Person) constructor or a [`People`](crate::People) operation can
/// refuse. Operations check all of their preconditions before mutating anything, so getting one
/// of these back means nothing changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PersonError {
    #[error("missing name field")]
    MissingName,
    #[error("invalid age: age cannot be lower than 0")]
    InvalidAge,
    /// Returned both for a negative starting balance and for a transfer that would overdraw the
    /// payer.
    #[error("invalid balance: balance cannot be lower than 0")]
    InvalidBalance,
    #[error("invalid amount: transfers must be finite and not negative")]
    InvalidAmount,
    #[error("friend has already been added")]
    FriendAlreadyAdded,
    #[error("cannot be friends with itself")]
    CannotBefriendItself,
    #[error("is not a friend")]
    NotFriend,
    #[error("a person with this name already exists")]
    NameTaken,
    #[error("this person ID has been removed")]
    UnknownPerson,
}
