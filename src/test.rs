use super::*;
use std::panic;

#[track_caller]
fn should_panic<T>(f: impl FnOnce() -> T) {
    let result = panic::catch_unwind(panic::AssertUnwindSafe(f));
    assert!(result.is_err(), "panic expected but missing");
    println!("↑↑↑↑↑ expected panic ↑↑↑↑↑\n");
}

// Roniel, Albin, and Enrique, with Roniel's starting balance swapped out.
fn three_people(roniel_balance: f64) -> (People, PersonId, PersonId, PersonId) {
    let mut people = People::new();
    let roniel = people.add("Roniel", 20, roniel_balance).unwrap();
    let albin = people.add("Albin", 20, 3300.0).unwrap();
    let enrique = people.add("Enrique", 21, 5540.0).unwrap();
    (people, roniel, albin, enrique)
}

#[test]
fn test_insert_and_remove() {
    let mut registry = Registry::new();
    let e1 = registry.insert("foo".to_string());
    let e2 = registry.insert("bar".to_string());
    assert!(registry.contains_id(e1));
    assert!(registry.contains_id(e2));
    assert_eq!(registry.get(e1), Some(&"foo".to_string()));
    assert_eq!(registry.get(e2), Some(&"bar".to_string()));
    assert_eq!(registry.get_mut(e1), Some(&mut "foo".to_string()));
    assert_eq!(&registry[e1], "foo");
    assert_eq!(&mut registry[e2], "bar");

    assert_eq!(registry.remove(e1), Some("foo".into()));
    assert!(!registry.contains_id(e1));
    assert!(registry.contains_id(e2));
    assert_eq!(registry.get(e1), None);
    assert_eq!(registry.get_mut(e1), None);
    assert_eq!(registry.remove(e1), None);
    assert_eq!(registry.len(), 1);

    assert_eq!(registry.remove(e2), Some("bar".into()));
    assert!(registry.is_empty());
    should_panic(|| registry[e2].clone());
}

#[test]
fn test_removed_ids_are_not_reused() {
    let mut registry = Registry::new();
    let first = registry.insert(1);
    registry.remove(first);
    let second = registry.insert(2);
    assert_eq!(first.index(), second.index());
    assert_eq!(second.generation(), first.generation() + 1);
    assert_ne!(first, second);
    assert_eq!(registry.get(first), None);
    assert_eq!(registry[second], 2);
}

#[test]
fn test_exhausted_generation_retires_the_slot() {
    let mut registry = Registry::new();
    registry.insert(());
    registry.slots[0].generation = id::MAX_GENERATION;
    let old = Id::new(0, id::MAX_GENERATION);
    assert!(registry.remove(old).is_some());
    assert_eq!(registry.retired_indexes, [0]);
    assert!(registry.free_indexes.is_empty());
    let new = registry.insert(());
    assert_eq!(new.index(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_out_of_bounds_index_panics() {
    let registry1 = Registry::new();
    let mut registry2 = Registry::new();
    let id = registry2.insert(());
    if cfg!(debug_assertions) {
        // In debug mode, we detect the contract violation and panic.
        should_panic(|| registry1.contains_id(id));
    } else {
        // In release mode, we don't check for contract violations.
        assert!(!registry1.contains_id(id));
    }
}

#[test]
fn test_get_pair_mut() {
    let mut registry = Registry::new();
    let a = registry.insert("a".to_string());
    let b = registry.insert("b".to_string());
    let c = registry.insert("c".to_string());
    {
        let (x, y) = registry.get_pair_mut(c, a).unwrap();
        assert_eq!((x.as_str(), y.as_str()), ("c", "a"));
        x.push('!');
    }
    assert_eq!(registry[c], "c!");
    assert!(registry.get_pair_mut(b, b).is_none());
    registry.remove(b);
    assert!(registry.get_pair_mut(a, b).is_none());
    assert!(registry.get_pair_mut(b, c).is_none());
}

#[test]
fn test_registry_debug() {
    let mut registry = Registry::new();
    let a = registry.insert(1);
    registry.insert(2);
    registry.remove(a);
    assert_eq!(format!("{:?}", registry), "[<empty>, 2]");
}

#[test]
fn test_add_friend() {
    let (mut people, roniel, albin, _) = three_people(1520.0);

    people.add_friend(roniel, albin).unwrap();
    assert!(people.is_friends_with(roniel, albin));
    assert!(people.is_friends_with(albin, roniel));
    assert!(people[roniel].is_friends_with(&people[albin]));

    assert_eq!(
        people.add_friend(roniel, albin),
        Err(PersonError::FriendAlreadyAdded),
    );
    assert_eq!(
        people.add_friend(albin, roniel),
        Err(PersonError::FriendAlreadyAdded),
    );
    assert_eq!(people[roniel].friend_count(), 1);
    assert_eq!(people[albin].friend_count(), 1);

    assert_eq!(
        people.add_friend(roniel, roniel),
        Err(PersonError::CannotBefriendItself),
    );
    assert!(!people.is_friends_with(roniel, roniel));
}

#[test]
fn test_remove_friend() {
    let (mut people, roniel, albin, enrique) = three_people(1520.0);

    people.add_friend(roniel, albin).unwrap();
    assert!(people.is_friends_with(roniel, albin));
    assert!(people.is_friends_with(albin, roniel));

    people.remove_friend(roniel, albin).unwrap();
    assert!(!people.is_friends_with(roniel, albin));
    assert!(!people.is_friends_with(albin, roniel));

    assert_eq!(
        people.remove_friend(roniel, enrique),
        Err(PersonError::NotFriend),
    );
    assert_eq!(
        people.remove_friend(roniel, albin),
        Err(PersonError::NotFriend),
    );

    // Friends again after removal.
    people.add_friend(albin, roniel).unwrap();
    assert!(people.is_friends_with(roniel, albin));
}

#[test]
fn test_give_money_to_friend() {
    let (mut people, roniel, albin, enrique) = three_people(1520.0);
    let amount = 500.00;
    let total = people.total_balance();

    people.add_friend(roniel, albin).unwrap();

    people.give_money_to_friend(roniel, amount, albin).unwrap();
    assert_eq!(people[roniel].balance(), 1020.0);
    assert_eq!(people[albin].balance(), 3800.0);
    assert_eq!(people.total_balance(), total);

    assert_eq!(
        people.give_money_to_friend(roniel, amount, enrique),
        Err(PersonError::NotFriend),
    );
    assert_eq!(people[roniel].balance(), 1020.0);
    assert_eq!(people[enrique].balance(), 5540.0);
}

#[test]
fn test_give_money_to_friend_no_balance() {
    let (mut people, roniel, albin, _) = three_people(300.0);

    people.add_friend(roniel, albin).unwrap();

    assert_eq!(
        people.give_money_to_friend(roniel, 500.0, albin),
        Err(PersonError::InvalidBalance),
    );
    assert_eq!(people[roniel].balance(), 300.0);
    assert_eq!(people[albin].balance(), 3300.0);

    // Emptying the account exactly is fine.
    people.give_money_to_friend(roniel, 300.0, albin).unwrap();
    assert_eq!(people[roniel].balance(), 0.0);
    assert_eq!(people[albin].balance(), 3600.0);
}

#[test]
fn test_receive_money_from_friend() {
    let (mut people, roniel, albin, enrique) = three_people(1520.0);
    let amount = 500.00;

    people.add_friend(roniel, albin).unwrap();

    people
        .receive_money_from_friend(roniel, amount, albin)
        .unwrap();
    assert_eq!(people[roniel].balance(), 2020.0);
    assert_eq!(people[albin].balance(), 2800.0);

    assert_eq!(
        people.receive_money_from_friend(roniel, amount, enrique),
        Err(PersonError::NotFriend),
    );
    assert_eq!(people[roniel].balance(), 2020.0);
    assert_eq!(people[enrique].balance(), 5540.0);
}

#[test]
fn test_receive_money_from_friend_no_balance() {
    let mut people = People::new();
    let roniel = people.add("Roniel", 20, 1200.0).unwrap();
    let albin = people.add("Albin", 20, 300.0).unwrap();

    people.add_friend(roniel, albin).unwrap();

    assert_eq!(
        people.receive_money_from_friend(roniel, 500.0, albin),
        Err(PersonError::InvalidBalance),
    );
    assert_eq!(people[roniel].balance(), 1200.0);
    assert_eq!(people[albin].balance(), 300.0);
}

#[test]
fn test_transfers_reject_bad_amounts() {
    let (mut people, roniel, albin, _) = three_people(1520.0);
    people.add_friend(roniel, albin).unwrap();

    for amount in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            people.give_money_to_friend(roniel, amount, albin),
            Err(PersonError::InvalidAmount),
        );
        assert_eq!(
            people.receive_money_from_friend(roniel, amount, albin),
            Err(PersonError::InvalidAmount),
        );
    }
    assert_eq!(people[roniel].balance(), 1520.0);
    assert_eq!(people[albin].balance(), 3300.0);

    // Zero moves nothing but is allowed.
    people.give_money_to_friend(roniel, 0.0, albin).unwrap();
    assert_eq!(people[roniel].balance(), 1520.0);
}

#[test]
fn test_not_friend_wins_over_amount_and_funds_checks() {
    let (mut people, roniel, albin, enrique) = three_people(1520.0);
    people.add_friend(roniel, albin).unwrap();

    // Enrique isn't a friend, so neither a bad amount nor a missing balance gets a say.
    for amount in [1e6, -1.0, f64::NAN] {
        assert_eq!(
            people.give_money_to_friend(roniel, amount, enrique),
            Err(PersonError::NotFriend),
        );
        assert_eq!(
            people.receive_money_from_friend(roniel, amount, enrique),
            Err(PersonError::NotFriend),
        );
    }
    assert_eq!(people[roniel].balance(), 1520.0);
    assert_eq!(people[enrique].balance(), 5540.0);

    // Between friends, a bad amount is reported before missing funds.
    assert_eq!(
        people.give_money_to_friend(roniel, f64::INFINITY, albin),
        Err(PersonError::InvalidAmount),
    );
    assert_eq!(
        people.give_money_to_friend(roniel, 1e6, albin),
        Err(PersonError::InvalidBalance),
    );
    assert_eq!(
        people.receive_money_from_friend(roniel, 1e6, albin),
        Err(PersonError::InvalidBalance),
    );

    // Nobody is their own friend, so self-transfers and self-removal are refused too.
    assert_eq!(
        people.give_money_to_friend(roniel, 1.0, roniel),
        Err(PersonError::NotFriend),
    );
    assert_eq!(
        people.remove_friend(roniel, roniel),
        Err(PersonError::NotFriend),
    );
    assert_eq!(people[roniel].balance(), 1520.0);
    assert_eq!(people[albin].balance(), 3300.0);
}

#[test]
fn test_transfers_conserve_money() {
    let (mut people, roniel, albin, enrique) = three_people(1520.0);
    people.add_friend(roniel, albin).unwrap();
    people.add_friend(albin, enrique).unwrap();
    let total = people.total_balance();

    let moves = [
        (roniel, 250.0, albin),
        (enrique, 1000.0, albin),
        (albin, 3000.0, enrique),
        (albin, 70.0, roniel),
    ];
    for (from, amount, to) in moves {
        people.give_money_to_friend(from, amount, to).unwrap();
        people.receive_money_from_friend(from, amount / 2.0, to).unwrap();
        assert_eq!(people.total_balance(), total);
    }
    for (_id, person) in &people {
        assert!(person.balance() >= 0.0);
    }
}

#[test]
fn test_friends_see_each_others_updates() {
    let (mut people, roniel, albin, _) = three_people(1520.0);
    people.add_friend(roniel, albin).unwrap();
    people.set_age(albin, 21).unwrap();
    people.give_money_to_friend(roniel, 20.0, albin).unwrap();

    let (id, friend) = people.friends(roniel).unwrap().next().unwrap();
    assert_eq!(id, albin);
    assert_eq!(friend.age(), 21);
    assert_eq!(friend.balance(), 3320.0);

    assert_eq!(people.set_age(albin, -1), Err(PersonError::InvalidAge));
    assert_eq!(people[albin].age(), 21);
}

#[test]
fn test_names_are_unique() {
    let (mut people, roniel, _, _) = three_people(1520.0);
    assert_eq!(
        people.add("Roniel", 30, 10.0),
        Err(PersonError::NameTaken),
    );
    assert_eq!(people.len(), 3);
    assert_eq!(people.find("Roniel"), Some(roniel));
    assert_eq!(people.find("Nobody"), None);
    assert_eq!(people.add("", 30, 10.0), Err(PersonError::MissingName));
}

#[test]
fn test_remove_person_unfriends_everyone() {
    let (mut people, roniel, albin, enrique) = three_people(1520.0);
    people.add_friend(roniel, albin).unwrap();
    people.add_friend(roniel, enrique).unwrap();
    people.add_friend(albin, enrique).unwrap();

    let removed = people.remove(roniel).unwrap();
    assert_eq!(removed.name(), "Roniel");
    assert_eq!(removed.friend_count(), 0);
    assert!(people.remove(roniel).is_none());
    assert_eq!(people.len(), 2);
    assert_eq!(people.find("Roniel"), None);

    assert_eq!(people[albin].friend_names().collect::<Vec<_>>(), ["Enrique"]);
    assert_eq!(people[enrique].friend_names().collect::<Vec<_>>(), ["Albin"]);
    assert_eq!(people.friends(albin).unwrap().count(), 1);

    // Stale IDs are refused everywhere.
    assert_eq!(
        people.add_friend(roniel, albin),
        Err(PersonError::UnknownPerson),
    );
    assert_eq!(
        people.remove_friend(albin, roniel),
        Err(PersonError::UnknownPerson),
    );
    assert_eq!(
        people.give_money_to_friend(roniel, 1.0, albin),
        Err(PersonError::UnknownPerson),
    );
    assert_eq!(
        people.receive_money_from_friend(albin, 1.0, roniel),
        Err(PersonError::UnknownPerson),
    );
    assert!(people.friends(roniel).is_err());
    assert!(!people.is_friends_with(albin, roniel));

    // The name is free again, and the new Roniel starts with no friends.
    let new_roniel = people.insert(removed).unwrap();
    assert_ne!(new_roniel, roniel);
    assert!(!people.is_friends_with(new_roniel, albin));
}

#[test]
fn test_insert_drops_foreign_friendships() {
    let (mut people, roniel, albin, _) = three_people(1520.0);
    people.add_friend(roniel, albin).unwrap();
    let copy = people[roniel].clone();
    assert_eq!(copy.friend_count(), 1);

    let mut other = People::with_capacity(1);
    let id = other.insert(copy).unwrap();
    assert_eq!(other[id].friend_count(), 0);
    assert_eq!(other[id].balance(), 1520.0);
}
