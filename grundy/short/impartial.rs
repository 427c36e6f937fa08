//! Impartial games - both players have the same moves

pub mod games;
pub mod grundy;
pub mod impartial_game;
