//! Grundy values of impartial game trees
//!
//! By the Sprague-Grundy theorem every impartial game `G` is equal to the nim heap
//! `*grundy(G)`, where `grundy(G)` is the minimum excluded value of Grundy values of the options
//! of `G`. Sum of games corresponds to nim sum of their Grundy values.

use crate::{
    error::Error,
    numeric::nimber::Nimber,
    short::{
        game_tree::GameTree,
        limits::Limits,
        transposition_table::{ParallelTranspositionTable, TranspositionTable},
    },
};

/// Computes Grundy values of impartial [`GameTree`]s
#[derive(Debug)]
pub struct GrundyEvaluator<TT = ParallelTranspositionTable<GameTree>> {
    limits: Limits,
    transposition_table: TT,
}

impl GrundyEvaluator {
    /// Create new evaluator with fresh cache
    pub fn new(limits: Limits) -> Self {
        Self::with_transposition_table(limits, ParallelTranspositionTable::new())
    }

    /// Grundy value of sum of nim heaps of size `n` and `m`, i.e. their nim sum
    #[inline]
    pub const fn grundy_sum(n: Nimber, m: Nimber) -> Nimber {
        n.nim_sum(m)
    }
}

impl Default for GrundyEvaluator {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl<TT> GrundyEvaluator<TT>
where
    TT: TranspositionTable<GameTree>,
{
    /// Create new evaluator using a given cache
    pub const fn with_transposition_table(limits: Limits, transposition_table: TT) -> Self {
        Self {
            limits,
            transposition_table,
        }
    }

    /// Limits under which games are evaluated
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Cache of evaluated positions
    pub const fn transposition_table(&self) -> &TT {
        &self.transposition_table
    }

    fn check(&self, game: &GameTree) -> Result<(), Error> {
        self.limits.check_game(game)?;
        if !game.is_impartial() {
            log::debug!("Rejecting partizan position {}", game);
            return Err(Error::NotImpartial);
        }
        Ok(())
    }

    /// Calculate the Grundy value of the position
    pub fn grundy_value(&self, game: &GameTree) -> Result<Nimber, Error> {
        self.check(game)?;
        let value = self.grundy_value_unchecked(game);
        log::trace!(
            "Grundy value of game born on day {} is {}",
            game.birthday(),
            value
        );
        Ok(value)
    }

    fn grundy_value_unchecked(&self, game: &GameTree) -> Nimber {
        if let Some(heap) = game.to_nim_heap() {
            return heap;
        }

        if let Some(known) = self.transposition_table.lookup_position(game) {
            return known;
        }

        // Left and Right options are the same
        let value = Nimber::mex(
            game.left_moves()
                .iter()
                .map(|option| self.grundy_value_unchecked(option)),
        );
        self.transposition_table.insert_position(game.clone(), value);
        value
    }

    /// Size of the nim heap equal to the game. Alias for [`Self::grundy_value`]
    pub fn equivalent_nim_heap(&self, game: &GameTree) -> Result<Nimber, Error> {
        self.grundy_value(game)
    }

    /// Calculate the Grundy value of disjoint sum of games without constructing the sum
    pub fn grundy_value_of_sum(&self, games: &[GameTree]) -> Result<Nimber, Error> {
        games.iter().map(|g| self.grundy_value(g)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::short::{
        game_tree::ArbitraryImpartial, oracle::ShortGameOracle,
        transposition_table::NoTranspositionTable,
    };
    use quickcheck::{Gen, QuickCheck};
    use std::str::FromStr;

    fn uncached() -> GrundyEvaluator<NoTranspositionTable<GameTree>> {
        GrundyEvaluator::with_transposition_table(Limits::default(), NoTranspositionTable::new())
    }

    fn small() -> QuickCheck {
        QuickCheck::new().r#gen(Gen::new(24))
    }

    #[test]
    fn nim_heaps() {
        let evaluator = GrundyEvaluator::default();
        for n in 0..32 {
            assert_eq!(
                evaluator.grundy_value(&GameTree::nim_heap(n)),
                Ok(Nimber::new(n))
            );
        }
    }

    #[test]
    fn non_heap_trees() {
        let evaluator = uncached();
        macro_rules! assert_grundy {
            ($game:expr, $expected:expr) => {
                assert_eq!(
                    evaluator.grundy_value(&GameTree::from_str($game).unwrap()),
                    Ok(Nimber::new($expected)),
                    "{}",
                    $game
                )
            };
        }

        assert_grundy!("{*|*}", 0);
        assert_grundy!("{0, *2|0, *2}", 1);
        assert_grundy!("{*, *2|*, *2}", 0);
        assert_grundy!("{{*|*}, *|{*|*}, *}", 2);
        assert_grundy!("{0, *, *3|0, *, *3}", 2);
        assert_grundy!("{0, {*|*}, *4|0, {*|*}, *4}", 1);
    }

    #[test]
    fn sums_of_heaps() {
        let evaluator = uncached();
        assert_eq!(
            evaluator.grundy_value(&(GameTree::nim_heap(1) + GameTree::nim_heap(2))),
            Ok(Nimber::new(3))
        );
        assert_eq!(
            evaluator.grundy_value(&(GameTree::nim_heap(3) + GameTree::nim_heap(3))),
            Ok(Nimber::new(0))
        );
        assert_eq!(
            evaluator.grundy_value(&(GameTree::nim_heap(3) + GameTree::nim_heap(5))),
            Ok(Nimber::new(6))
        );
        assert_eq!(
            GrundyEvaluator::grundy_sum(Nimber::new(3), Nimber::new(5)),
            Nimber::new(6)
        );
    }

    #[test]
    fn grundy_sum_matches_materialized_sum() {
        let evaluator = GrundyEvaluator::default();
        for n in 0..6 {
            for m in 0..6 {
                let sum = GameTree::nim_heap(n) + GameTree::nim_heap(m);
                assert_eq!(
                    evaluator.grundy_value(&sum),
                    Ok(GrundyEvaluator::grundy_sum(Nimber::new(n), Nimber::new(m)))
                );
            }
        }
    }

    #[test]
    fn day_two() {
        let evaluator = GrundyEvaluator::default();
        let values = GameTree::impartial_born_by(2)
            .iter()
            .map(|g| evaluator.grundy_value(g).unwrap().value())
            .collect::<Vec<_>>();
        assert_eq!(values, vec![0, 1, 0, 2]);
    }

    #[test]
    fn rejects_partizan_games() {
        let evaluator = GrundyEvaluator::default();
        assert_eq!(
            evaluator.grundy_value(&GameTree::new_integer(1)),
            Err(Error::NotImpartial)
        );
        assert_eq!(
            evaluator.grundy_value(&GameTree::from_str("{0|*}").unwrap()),
            Err(Error::NotImpartial)
        );

        // Partizan deep inside
        let nested = GameTree::from_str("{{1|1}|{1|1}}").unwrap();
        assert!(!nested.is_impartial());
        assert_eq!(evaluator.grundy_value(&nested), Err(Error::NotImpartial));
    }

    #[test]
    fn rejects_long_games() {
        let evaluator = GrundyEvaluator::new(Limits::new(4));
        assert_eq!(
            evaluator.grundy_value(&GameTree::nim_heap(5)),
            Err(Error::NotShort { depth: 5, limit: 4 })
        );
        assert_eq!(
            evaluator.grundy_value_of_sum(&[GameTree::nim_heap(4), GameTree::nim_heap(6)]),
            Err(Error::NotShort { depth: 6, limit: 4 })
        );
    }

    #[test]
    fn sum_of_values_without_materializing() {
        let evaluator = GrundyEvaluator::default();
        let heaps = [1, 2, 3, 7].map(GameTree::nim_heap);
        assert_eq!(evaluator.grundy_value_of_sum(&heaps), Ok(Nimber::new(7)));
        assert_eq!(evaluator.grundy_value_of_sum(&[]), Ok(Nimber::new(0)));
    }

    #[test]
    fn sprague_grundy_sum() {
        let test = |g: ArbitraryImpartial, h: ArbitraryImpartial| {
            let evaluator = GrundyEvaluator::default();
            let sum = &g.0 + &h.0;
            assert_eq!(
                evaluator.grundy_value(&sum),
                Ok(evaluator.grundy_value(&g.0).unwrap() + evaluator.grundy_value(&h.0).unwrap())
            );
        };
        small().quickcheck(test as fn(ArbitraryImpartial, ArbitraryImpartial));
    }

    #[test]
    fn equivalent_to_nim_heap() {
        let test = |g: ArbitraryImpartial| {
            let evaluator = GrundyEvaluator::default();
            let oracle = ShortGameOracle::default();
            let heap = evaluator.equivalent_nim_heap(&g.0).unwrap();
            assert_eq!(
                oracle.equivalent(&g.0, &GameTree::nim_heap(heap.value())),
                Ok(true)
            );
        };
        small().quickcheck(test as fn(ArbitraryImpartial));
    }

    #[test]
    fn caching_is_invisible() {
        let test = |g: ArbitraryImpartial| {
            let cached = GrundyEvaluator::default();
            assert_eq!(cached.grundy_value(&g.0), uncached().grundy_value(&g.0));
            assert_eq!(cached.grundy_value(&g.0), cached.grundy_value(&g.0));
        };
        small().quickcheck(test as fn(ArbitraryImpartial));
    }
}
