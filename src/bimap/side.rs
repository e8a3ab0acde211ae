//! Role markers for the two sides of a [`Bimap`](crate::Bimap).

use std::fmt::Debug;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Left {}
    impl Sealed for super::Right {}
}

/// One side of a bidirectional map.
///
/// A side names which key of a stored pair it is ordered by, which links
/// block of a record its tree uses, and which side is its partner. Only
/// [`Left`] and [`Right`] implement it.
pub trait Side:
    sealed::Sealed + Copy + Eq + Hash + Debug + Default + Send + Sync + 'static
{
    /// The partner side.
    type Other: Side<Other = Self>;

    /// The key type of this side for a map of `(L, R)` pairs.
    type Key<L, R>;

    /// Index of this side's links block within a record.
    const INDEX: usize;

    /// Human-readable name, used in errors and log events.
    const NAME: &'static str;

    /// Projects a pair onto this side's key.
    fn key<L, R>(pair: &(L, R)) -> &Self::Key<L, R>;

    /// Projects a pair onto the partner side's key.
    #[inline]
    fn partner<L, R>(pair: &(L, R)) -> &<Self::Other as Side>::Key<L, R> {
        Self::Other::key(pair)
    }
}

/// The left side: pairs ordered by their first key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Left;

/// The right side: pairs ordered by their second key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Right;

impl Side for Left {
    type Other = Right;
    type Key<L, R> = L;

    const INDEX: usize = 0;
    const NAME: &'static str = "left";

    #[inline]
    fn key<L, R>(pair: &(L, R)) -> &L {
        &pair.0
    }
}

impl Side for Right {
    type Other = Left;
    type Key<L, R> = R;

    const INDEX: usize = 1;
    const NAME: &'static str = "right";

    #[inline]
    fn key<L, R>(pair: &(L, R)) -> &R {
        &pair.1
    }
}
