//! Sprague-Grundy theory for finite impartial games.
//!
//! Library computes [Grundy values](crate::short::impartial::grundy::GrundyEvaluator) of
//! [impartial game trees](crate::short::game_tree::GameTree), performs
//! [nim arithmetic](crate::numeric::nimber::Nimber) and
//! [decides order relations](crate::short::oracle::ShortGameOracle) between short games.

#![warn(missing_docs)]

pub mod error;
pub mod numeric;
pub mod parsing;
pub mod short;

mod display;
