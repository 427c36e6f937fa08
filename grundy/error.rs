//! Errors reported by game evaluation

use std::fmt::Display;

/// Reasons a position cannot be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Position is not short: some play from it lasts longer than the configured limit, so it
    /// cannot be evaluated in finite time
    NotShort {
        /// Depth at which evaluation gave up
        depth: u32,

        /// Configured maximum depth, see [`crate::short::limits::Limits`]
        limit: u32,
    },

    /// Position is not impartial: at some reachable position Left and Right have different moves
    NotImpartial,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotShort { depth, limit } => write!(
                f,
                "Position is not short: reached depth {} but the limit is {}",
                depth, limit
            ),
            Error::NotImpartial => write!(f, "Position is not impartial"),
        }
    }
}

impl std::error::Error for Error {}
