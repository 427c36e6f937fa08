//! Short games - games with finitely many positions, where every play ends

pub mod game_tree;
pub mod impartial;
pub mod limits;
pub mod oracle;
pub mod relation;
pub mod transposition_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Player {
    Left,
    Right,
}

impl Player {
    /// Opposite player
    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Player {
        match self {
            Player::Left => Player::Right,
            Player::Right => Player::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for p in [Player::Left, Player::Right] {
            assert_ne!(p, p.opposite());
            assert_eq!(p, p.opposite().opposite());
        }
    }
}
