//! Results of comparing games

use std::{cmp::Ordering, fmt::Display};

/// Relation of `G` to `H` in the partial order of games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// `G < H`: `G <= H` but not `H <= G`
    Less,

    /// `G ≈ H`: `G <= H` and `H <= G`, games are interchangeable in any sum
    Equivalent,

    /// `G > H`: `H <= G` but not `G <= H`
    Greater,

    /// `G || H`: neither `G <= H` nor `H <= G`
    Fuzzy,
}

impl Relation {
    /// Combine both directions of `<=`
    #[inline]
    pub const fn from_leq(g_leq_h: bool, h_leq_g: bool) -> Self {
        match (g_leq_h, h_leq_g) {
            (true, true) => Relation::Equivalent,
            (true, false) => Relation::Less,
            (false, true) => Relation::Greater,
            (false, false) => Relation::Fuzzy,
        }
    }

    /// `G <= H`
    #[inline]
    pub const fn is_leq(self) -> bool {
        matches!(self, Relation::Less | Relation::Equivalent)
    }

    /// `G < H`
    #[inline]
    pub const fn is_lt(self) -> bool {
        matches!(self, Relation::Less)
    }

    /// `G ≈ H`
    #[inline]
    pub const fn is_equivalent(self) -> bool {
        matches!(self, Relation::Equivalent)
    }

    /// `G || H`
    #[inline]
    pub const fn is_fuzzy(self) -> bool {
        matches!(self, Relation::Fuzzy)
    }

    /// Relation of `H` to `G`
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Relation::Less => Relation::Greater,
            Relation::Greater => Relation::Less,
            Relation::Equivalent | Relation::Fuzzy => self,
        }
    }

    /// Convert to [`Ordering`], fuzzy games are incomparable
    #[inline]
    pub const fn to_ordering(self) -> Option<Ordering> {
        match self {
            Relation::Less => Some(Ordering::Less),
            Relation::Equivalent => Some(Ordering::Equal),
            Relation::Greater => Some(Ordering::Greater),
            Relation::Fuzzy => None,
        }
    }
}

impl From<Relation> for Option<Ordering> {
    fn from(relation: Relation) -> Self {
        relation.to_ordering()
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::Less => write!(f, "<"),
            Relation::Equivalent => write!(f, "="),
            Relation::Greater => write!(f, ">"),
            Relation::Fuzzy => write!(f, "||"),
        }
    }
}

/// Outcome class of a game under normal play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Left wins regardless of who starts (`G > 0`)
    L,

    /// First player wins (`G || 0`)
    N,

    /// Second player wins (`G ≈ 0`)
    P,

    /// Right wins regardless of who starts (`G < 0`)
    R,
}

impl From<Relation> for Outcome {
    /// Outcome of `G` from the relation of `G` to `0`
    fn from(relation_to_zero: Relation) -> Self {
        match relation_to_zero {
            Relation::Less => Outcome::R,
            Relation::Equivalent => Outcome::P,
            Relation::Greater => Outcome::L,
            Relation::Fuzzy => Outcome::N,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::L => write!(f, "L"),
            Outcome::N => write!(f, "N"),
            Outcome::P => write!(f, "P"),
            Outcome::R => write!(f, "R"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Relation; 4] = [
        Relation::Less,
        Relation::Equivalent,
        Relation::Greater,
        Relation::Fuzzy,
    ];

    #[test]
    fn leq_round_trip() {
        for relation in ALL {
            let g_leq_h = relation.is_leq();
            let h_leq_g = relation.flip().is_leq();
            assert_eq!(Relation::from_leq(g_leq_h, h_leq_g), relation);
            assert_eq!(relation.flip().flip(), relation);
        }
    }

    #[test]
    fn exactly_one_of_equivalent_or_fuzzy_when_symmetric() {
        for relation in ALL {
            if relation.is_leq() == relation.flip().is_leq() {
                assert!(relation.is_equivalent() ^ relation.is_fuzzy());
            }
        }
    }

    #[test]
    fn outcomes() {
        assert_eq!(Outcome::from(Relation::Fuzzy), Outcome::N);
        assert_eq!(Outcome::from(Relation::Equivalent), Outcome::P);
        assert_eq!(Outcome::from(Relation::Greater).to_string(), "L");
        assert_eq!(Relation::Fuzzy.to_ordering(), None);
        assert_eq!(Relation::Fuzzy.to_string(), "||");
    }
}
