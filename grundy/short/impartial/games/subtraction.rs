//! Subtraction game played on a finite subtraction set

use std::fmt::Display;

use crate::{
    display,
    numeric::nimber::Nimber,
    parsing::{Parser, ParseError, impl_from_str_via_parser},
    short::impartial::impartial_game::ImpartialGame,
};

/// Subtraction game played on an arbitrary finite subtraction set
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sub {
    // Invariant: sorted, deduplicated, no zero
    subtraction_set: Vec<u32>,
}

impl Display for Sub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub")?;
        display::parens(f, |f| display::commas(f, self.subtraction_set()))
    }
}

impl Sub {
    /// Define new subtraction game with a given subtraction set. Removing zero tokens is not a
    /// move, so zero is dropped from the set.
    #[inline]
    pub fn new(mut subtraction_set: Vec<u32>) -> Self {
        subtraction_set.sort_unstable();
        subtraction_set.dedup();
        subtraction_set.retain(|k| *k != 0);
        Self { subtraction_set }
    }

    /// Get the subtraction set of the game
    #[inline]
    pub fn subtraction_set(&self) -> &[u32] {
        &self.subtraction_set
    }

    /// Position of the game with a single heap
    #[inline]
    pub const fn position(self, heap: u32) -> SubtractionPosition {
        SubtractionPosition { game: self, heap }
    }

    /// Get the infinite Grundy sequence of the subtraction game
    #[inline]
    pub fn grundy_sequence(self) -> GrundySequence {
        let largest = self.subtraction_set().last().copied().unwrap_or(0).max(1);
        let previous = vec![Nimber::new(0); largest as usize];

        GrundySequence {
            game: self,
            previous,
            current: 0,
        }
    }

    fn parse(p: Parser<'_>) -> Result<(Parser<'_>, Sub), ParseError> {
        let p = p.expect_keyword("Sub")?.trim_whitespace();
        let p = p.expect_ascii_char('(')?;
        let (p, subtraction_set) = p.parse_list(|c| c.is_ascii_digit(), Parser::parse_u32)?;
        let p = p.expect_ascii_char(')')?;
        Ok((p, Sub::new(subtraction_set)))
    }
}

impl_from_str_via_parser!(Sub);

/// Grundy Sequence of [Sub] iterator using Grundy scale method.
#[derive(Debug)]
pub struct GrundySequence {
    /// The underlying subtraction game ruleset
    game: Sub,

    /// Ring buffer of previous values
    previous: Vec<Nimber>,

    /// Current heap size to compute nim value for
    current: u32,
}

impl Iterator for GrundySequence {
    type Item = Nimber;

    fn next(&mut self) -> Option<Self::Item> {
        let window = self.previous.len() as u32;

        let mex = Nimber::mex(
            self.game
                .subtraction_set()
                .iter()
                .take_while(|m| **m <= self.current)
                .map(|m| self.previous[((self.current - m) % window) as usize]),
        );

        self.previous[(self.current % window) as usize] = mex;
        self.current = self.current.checked_add(1)?;

        Some(mex)
    }
}

/// Single heap of a subtraction game
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubtractionPosition {
    game: Sub,
    heap: u32,
}

impl SubtractionPosition {
    /// Rules of the game
    #[inline]
    pub const fn game(&self) -> &Sub {
        &self.game
    }

    /// Number of tokens left
    #[inline]
    pub const fn heap(&self) -> u32 {
        self.heap
    }
}

impl ImpartialGame for SubtractionPosition {
    fn moves(&self) -> Vec<Self> {
        self.game
            .subtraction_set()
            .iter()
            .take_while(|m| **m <= self.heap)
            .map(|m| SubtractionPosition {
                game: self.game.clone(),
                heap: self.heap - m,
            })
            .collect()
    }
}

impl Display for SubtractionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.game, self.heap)
    }
}
