//! generational ID types

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::NonZeroU64;

/// Indexes at or above this value are unrepresentable. The all-1-bits index would collide with
/// the `+ 1` niche below.
pub(crate) const MAX_LEN: u32 = u32::MAX - 1;

/// Generations use 31 bits. A slot whose generation reaches this value is retired on removal
/// instead of being reused.
pub(crate) const MAX_GENERATION: u32 = u32::MAX >> 1;

/// A 64-bit ID into a [`Registry`](crate::Registry): a 32-bit index and a 31-bit generation.
///
/// IDs are `Copy` and cheap to compare. An ID goes stale when its element is removed, and it
/// never matches whatever gets inserted into the same slot afterwards.
// Note that we can't use #[derive(...)] for common traits here, because for example Id should be
// Copy and Ord and Eq even when T isn't. See https://github.com/rust-lang/rust/issues/108894.
#[repr(transparent)]
pub struct Id<T>(
    NonZeroU64,
    // https://doc.rust-lang.org/nomicon/phantom-data.html#table-of-phantomdata-patterns
    PhantomData<fn() -> T>,
);

impl<T> Id<T> {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        debug_assert!(index <= MAX_LEN);
        debug_assert!(generation <= MAX_GENERATION);
        let data = ((index as u64) << 32) | generation as u64;
        // Adding 1 here makes data=u64::MAX unrepresentable, rather than data=0. The asserts
        // above keep us well clear of that.
        match NonZeroU64::new(data + 1) {
            Some(nonzero) => Self(nonzero, PhantomData),
            None => unreachable!("index and generation are bounded"),
        }
    }

    pub fn index(&self) -> u32 {
        let data = self.0.get() - 1;
        (data >> 32) as u32
    }

    pub fn generation(&self) -> u32 {
        let data = self.0.get() - 1;
        debug_assert_eq!(data & (1 << 31), 0, "this bit should never be set");
        data as u32
    }
}

impl<T> Copy for Id<T> {}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "Id {{ index: {}, generation: {} }}",
            self.index(),
            self.generation(),
        )
    }
}

impl<T> Hash for Id<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.0.hash(state);
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}
