//! Impartial game defined by its rules

use ahash::AHashMap;
use std::hash::Hash;

use crate::{
    error::Error,
    numeric::nimber::Nimber,
    short::{
        game_tree::GameTree,
        limits::Limits,
        transposition_table::{NoTranspositionTable, TranspositionTable},
    },
};

/// Impartial game
///
/// Unlike a [`GameTree`], a position given by rules may have plays that never end. Evaluation
/// gives up with [`Error::NotShort`] once play gets longer than the [`Limits`].
pub trait ImpartialGame: Sized {
    /// Get a list of moves from the position
    fn moves(&self) -> Vec<Self>;

    /// Calculate the Grundy value of the position
    fn grundy_value(&self, limits: &Limits) -> Result<Nimber, Error> {
        self.grundy_value_with(limits, &NoTranspositionTable::new())
    }

    /// Calculate the Grundy value of the position, caching values of visited positions
    fn grundy_value_with<TT>(
        &self,
        limits: &Limits,
        transposition_table: &TT,
    ) -> Result<Nimber, Error>
    where
        TT: TranspositionTable<Self>,
    {
        grundy_value_at(self, 0, limits, transposition_table)
    }

    /// Unfold the rules into an explicit game tree
    ///
    /// Transpositions are unfolded once and shared in the resulting tree.
    fn game_tree(&self, limits: &Limits) -> Result<GameTree, Error>
    where
        Self: Clone + Eq + Hash,
    {
        game_tree_at(self, 0, limits, &mut AHashMap::new())
    }
}

fn grundy_value_at<G, TT>(
    position: &G,
    depth: u32,
    limits: &Limits,
    transposition_table: &TT,
) -> Result<Nimber, Error>
where
    G: ImpartialGame,
    TT: TranspositionTable<G>,
{
    limits.check_depth(depth)?;

    if let Some(known) = transposition_table.lookup_position(position) {
        return Ok(known);
    }

    let moves = position.moves();
    let mut option_values = Vec::with_capacity(moves.len());
    for m in moves {
        let value = grundy_value_at(&m, depth + 1, limits, transposition_table)?;
        option_values.push(value);
        transposition_table.insert_position(m, value);
    }

    Ok(Nimber::mex(option_values))
}

fn game_tree_at<G>(
    position: &G,
    depth: u32,
    limits: &Limits,
    unfolded: &mut AHashMap<G, GameTree>,
) -> Result<GameTree, Error>
where
    G: ImpartialGame + Clone + Eq + Hash,
{
    limits.check_depth(depth)?;

    // A position reached again deeper down has to be walked again to find where it fails
    if let Some(known) = unfolded.get(position)
        && depth.saturating_add(known.birthday()) <= limits.max_depth()
    {
        return Ok(known.clone());
    }

    let options = position
        .moves()
        .iter()
        .map(|m| game_tree_at(m, depth + 1, limits, unfolded))
        .collect::<Result<Vec<_>, _>>()?;
    let tree = GameTree::new(options.clone(), options);
    unfolded.insert(position.clone(), tree.clone());
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Position that can always move back to itself
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Carousel;

    impl ImpartialGame for Carousel {
        fn moves(&self) -> Vec<Self> {
            vec![Carousel]
        }
    }

    /// Countdown where the player can take one or two, i.e. subtraction game on `{1, 2}`
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Countdown(u32);

    impl ImpartialGame for Countdown {
        fn moves(&self) -> Vec<Self> {
            (1..=2)
                .filter(|k| *k <= self.0)
                .map(|k| Countdown(self.0 - k))
                .collect()
        }
    }

    #[test]
    fn loopy_rules_are_not_short() {
        let limits = Limits::new(16);
        assert_eq!(
            Carousel.grundy_value(&limits),
            Err(Error::NotShort {
                depth: 17,
                limit: 16
            })
        );
        assert!(Carousel.game_tree(&limits).is_err());
    }

    #[test]
    fn countdown_values() {
        let limits = Limits::default();
        for n in 0..12 {
            assert_eq!(
                Countdown(n).grundy_value(&limits),
                Ok(Nimber::new(n % 3)),
                "n = {}",
                n
            );
        }
    }

    #[test]
    fn cache_does_not_change_values() {
        let limits = Limits::default();
        let tt = crate::short::transposition_table::ParallelTranspositionTable::new();
        for n in (0..24).rev() {
            assert_eq!(
                Countdown(n).grundy_value_with(&limits, &tt),
                Ok(Nimber::new(n % 3))
            );
        }
        assert!(!tt.is_empty());
    }

    #[test]
    fn unfolds_to_impartial_tree() {
        let limits = Limits::default();
        let tree = Countdown(4).game_tree(&limits).unwrap();
        assert!(tree.is_impartial());
        assert_eq!(tree.birthday(), 4);
        assert_eq!(Countdown(2).game_tree(&limits).unwrap(), GameTree::nim_heap(2));
        assert_eq!(
            Countdown(5).game_tree(&Limits::new(3)),
            Err(Error::NotShort { depth: 4, limit: 3 })
        );
    }

    #[test]
    fn transpositions_unfold_once() {
        let limits = Limits::default();
        // Without sharing this tree has Fibonacci many paths
        let tree = Countdown(90).game_tree(&limits).unwrap();
        assert_eq!(tree.birthday(), 90);
        assert_eq!(
            crate::short::impartial::grundy::GrundyEvaluator::new(limits).grundy_value(&tree),
            Ok(Nimber::new(0))
        );

        // 2 + 1 and 1 + 2 reach the same position under different depths
        assert_eq!(
            Countdown(6).game_tree(&Limits::new(5)),
            Err(Error::NotShort { depth: 6, limit: 5 })
        );
        assert!(Countdown(6).game_tree(&Limits::new(6)).is_ok());
    }
}
