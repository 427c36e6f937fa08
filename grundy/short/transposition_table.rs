//! Thread safe transposition tables for memoising game values

use crate::numeric::nimber::Nimber;
use dashmap::DashMap;
use std::{fmt::Debug, hash::Hash, marker::PhantomData};

/// Interface of a transposition table
pub trait TranspositionTable<G, V = Nimber> {
    /// Lookup a position value if exists
    fn lookup_position(&self, position: &G) -> Option<V>;

    /// Save position and its value
    fn insert_position(&self, position: G, value: V);
}

/// Transposition table (cache) of positions and their values
pub struct ParallelTranspositionTable<G, V = Nimber> {
    positions: DashMap<G, V, ahash::RandomState>,
}

impl<G, V> ParallelTranspositionTable<G, V>
where
    G: Eq + Hash,
{
    /// Create new empty transposition table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of saved positions
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if table stores any position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Forget all saved positions
    #[inline]
    pub fn clear(&self) {
        self.positions.clear();
    }
}

impl<G, V> Debug for ParallelTranspositionTable<G, V>
where
    G: Debug + Hash + Eq,
    V: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelTranspositionTable")
            .field("positions", &self.positions)
            .finish()
    }
}

impl<G, V> Default for ParallelTranspositionTable<G, V>
where
    G: Hash + Eq,
{
    #[inline]
    fn default() -> Self {
        Self {
            positions: DashMap::default(),
        }
    }
}

impl<G, V> TranspositionTable<G, V> for ParallelTranspositionTable<G, V>
where
    G: Eq + Hash,
    V: Clone,
{
    #[inline]
    fn lookup_position(&self, position: &G) -> Option<V> {
        self.positions.get(position).map(|value| value.value().clone())
    }

    #[inline]
    fn insert_position(&self, position: G, value: V) {
        self.positions.insert(position, value);
    }
}

/// Dummy transposition table that does not store anythning
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoTranspositionTable<G, V = Nimber>(PhantomData<(G, V)>);

impl<G, V> NoTranspositionTable<G, V> {
    #[inline]
    /// Create new dummy transposition table
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<G, V> Default for NoTranspositionTable<G, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<G, V> TranspositionTable<G, V> for NoTranspositionTable<G, V> {
    #[inline]
    fn lookup_position(&self, _position: &G) -> Option<V> {
        None
    }

    #[inline]
    fn insert_position(&self, _position: G, _value: V) {}
}

impl<G, V, TT> TranspositionTable<G, V> for &TT
where
    TT: TranspositionTable<G, V> + ?Sized,
{
    #[inline]
    fn lookup_position(&self, position: &G) -> Option<V> {
        (**self).lookup_position(position)
    }

    #[inline]
    fn insert_position(&self, position: G, value: V) {
        (**self).insert_position(position, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_values() {
        let tt = ParallelTranspositionTable::<u32>::new();
        assert!(tt.is_empty());
        assert_eq!(tt.lookup_position(&3), None);

        tt.insert_position(3, Nimber::new(1));
        assert_eq!(tt.lookup_position(&3), Some(Nimber::new(1)));
        assert_eq!(tt.len(), 1);

        tt.clear();
        assert!(tt.is_empty());
    }

    #[test]
    fn dummy_stores_nothing() {
        let tt = NoTranspositionTable::<u32, bool>::new();
        tt.insert_position(3, true);
        assert_eq!(tt.lookup_position(&3), None);
    }
}
