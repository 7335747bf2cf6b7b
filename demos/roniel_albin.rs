//! Two friends, one loan, and a stranger who doesn't get paid.
//!
//! Run with `RUST_LOG=friendledger=debug` (the default) to watch each step.

use friendledger::{People, PersonError};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("friendledger=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).compact())
        .init();
}

fn main() -> Result<(), PersonError> {
    init_logger();

    let mut people = People::new();
    let roniel = people.add("Roniel", 20, 1520.0)?;
    let albin = people.add("Albin", 20, 3300.0)?;
    let enrique = people.add("Enrique", 21, 5540.0)?;

    people.add_friend(roniel, albin)?;
    people.give_money_to_friend(roniel, 500.0, albin)?;
    assert_eq!(people[roniel].balance(), 1020.0);
    assert_eq!(people[albin].balance(), 3800.0);

    match people.give_money_to_friend(roniel, 500.0, enrique) {
        Err(e) => info!(error = %e, "Enrique stays unpaid"),
        Ok(()) => unreachable!("Enrique isn't Roniel's friend"),
    }
    assert_eq!(people.add_friend(roniel, roniel), Err(PersonError::CannotBefriendItself));

    for (_id, person) in &people {
        info!(
            name = person.name(),
            balance = person.balance(),
            friends = person.friend_count(),
            "final state"
        );
    }
    Ok(())
}
