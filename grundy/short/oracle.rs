//! Deciding order relations between short games

use crate::{
    error::Error,
    short::{
        game_tree::GameTree,
        limits::Limits,
        relation::{Outcome, Relation},
        transposition_table::{ParallelTranspositionTable, TranspositionTable},
    },
};

/// Transposition table used to remember `G <= H` results
pub type ComparisonTable = ParallelTranspositionTable<(GameTree, GameTree), bool>;

/// Decides `<=`, `<`, `≈` and `||` between finite games.
///
/// Every comparison first checks that both operands are short under the oracle's [`Limits`],
/// after that the recursion always terminates.
#[derive(Debug)]
pub struct ShortGameOracle<TT = ComparisonTable> {
    limits: Limits,
    transposition_table: TT,
}

impl ShortGameOracle {
    /// Create new oracle with fresh comparison cache
    pub fn new(limits: Limits) -> Self {
        Self::with_transposition_table(limits, ComparisonTable::new())
    }
}

impl Default for ShortGameOracle {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl<TT> ShortGameOracle<TT>
where
    TT: TranspositionTable<(GameTree, GameTree), bool>,
{
    /// Create new oracle using a given comparison cache
    pub const fn with_transposition_table(limits: Limits, transposition_table: TT) -> Self {
        Self {
            limits,
            transposition_table,
        }
    }

    /// Limits under which games are compared
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Comparison cache
    pub const fn transposition_table(&self) -> &TT {
        &self.transposition_table
    }

    fn check_short(&self, g: &GameTree, h: &GameTree) -> Result<(), Error> {
        self.limits.check_game(g)?;
        self.limits.check_game(h)
    }

    /// Less than or equals comparison on two games
    pub fn leq(&self, g: &GameTree, h: &GameTree) -> Result<bool, Error> {
        self.check_short(g, h)?;
        Ok(self.leq_unchecked(g, h))
    }

    /// `G <= H` unless `H <= G^L` for some Left option of `G` or `H^R <= G` for some Right
    /// option of `H`.
    ///
    /// Every recursive call removes a move from one of the sides, so depth is bounded by sum of
    /// birthdays.
    fn leq_unchecked(&self, g: &GameTree, h: &GameTree) -> bool {
        if g == h {
            return true;
        }

        if let (Some(g_int), Some(h_int)) = (g.to_integer(), h.to_integer()) {
            return g_int <= h_int;
        }

        // Different nim heaps are always confused with each other
        if g.to_nim_heap().is_some() && h.to_nim_heap().is_some() {
            return false;
        }

        let key = (g.clone(), h.clone());
        if let Some(known) = self.transposition_table.lookup_position(&key) {
            return known;
        }

        let result = g.left_moves().iter().all(|gl| !self.leq_unchecked(h, gl))
            && h.right_moves().iter().all(|hr| !self.leq_unchecked(hr, g));

        self.transposition_table.insert_position(key, result);
        result
    }

    /// Compare two games in both directions
    pub fn compare(&self, g: &GameTree, h: &GameTree) -> Result<Relation, Error> {
        self.check_short(g, h)?;
        log::trace!(
            "Comparing games born on days {} and {}",
            g.birthday(),
            h.birthday()
        );
        let relation = Relation::from_leq(self.leq_unchecked(g, h), self.leq_unchecked(h, g));
        log::trace!("Comparison result: {}", relation);
        Ok(relation)
    }

    /// Strictly less than comparison on two games
    pub fn lt(&self, g: &GameTree, h: &GameTree) -> Result<bool, Error> {
        self.compare(g, h).map(Relation::is_lt)
    }

    /// Check if two games are equal, i.e. can be replaced with each other in any sum
    pub fn equivalent(&self, g: &GameTree, h: &GameTree) -> Result<bool, Error> {
        self.compare(g, h).map(Relation::is_equivalent)
    }

    /// Check if two games are incomparable
    pub fn fuzzy(&self, g: &GameTree, h: &GameTree) -> Result<bool, Error> {
        self.compare(g, h).map(Relation::is_fuzzy)
    }

    /// Outcome class of a game, i.e. who wins with perfect play
    pub fn outcome(&self, g: &GameTree) -> Result<Outcome, Error> {
        self.compare(g, &GameTree::zero()).map(Outcome::from)
    }
}
