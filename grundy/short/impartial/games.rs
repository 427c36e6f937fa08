//! Concrete impartial rulesets

pub mod nim;
pub mod subtraction;
