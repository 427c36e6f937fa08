//! Evaluation limits

use crate::{error::Error, short::game_tree::GameTree};

/// Default value of [`Limits::max_depth`]
pub const DEFAULT_MAX_DEPTH: u32 = 2048;

/// Bounds under which a position is considered short enough to evaluate.
///
/// Recursion depth of every evaluation is bounded by `max_depth` (or twice that when comparing
/// two positions), so the limit also guards against stack overflow on deeply nested inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    max_depth: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Limits {
    /// Create new limits
    #[inline]
    pub const fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Longest play that can be evaluated
    #[inline]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Fail if play can reach `depth`
    #[inline]
    pub fn check_depth(&self, depth: u32) -> Result<(), Error> {
        if depth > self.max_depth {
            log::debug!(
                "Rejecting position: depth {} exceeds limit {}",
                depth,
                self.max_depth
            );
            return Err(Error::NotShort {
                depth,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Fail if the longest play in `game` is over the limit
    #[inline]
    pub fn check_game(&self, game: &GameTree) -> Result<(), Error> {
        self.check_depth(game.birthday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_deep_games() {
        let limits = Limits::new(3);
        assert_eq!(limits.check_game(&GameTree::nim_heap(3)), Ok(()));
        assert_eq!(
            limits.check_game(&GameTree::nim_heap(4)),
            Err(Error::NotShort { depth: 4, limit: 3 })
        );
        assert_eq!(Limits::default().max_depth(), DEFAULT_MAX_DEPTH);
    }
}
