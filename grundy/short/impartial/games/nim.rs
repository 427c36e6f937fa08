//! Nim, the game every impartial game reduces to
//!
//! A position is a collection of heaps of tokens. On their turn a player removes any positive
//! number of tokens from a single heap.

use std::fmt::Display;

use crate::{
    display,
    numeric::nimber::Nimber,
    short::{game_tree::GameTree, impartial::impartial_game::ImpartialGame},
};

/// Single heap of nim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NimHeap(u32);

impl NimHeap {
    /// Create a heap with `size` tokens
    #[inline]
    pub const fn new(size: u32) -> Self {
        Self(size)
    }

    /// Number of tokens in the heap
    #[inline]
    pub const fn size(self) -> u32 {
        self.0
    }

    /// Grundy value of a nim heap is its size
    #[inline]
    pub const fn grundy_value(self) -> Nimber {
        Nimber::new(self.0)
    }

    /// Explicit game tree of the heap
    #[inline]
    pub fn game_tree(self) -> GameTree {
        GameTree::nim_heap(self.0)
    }
}

impl ImpartialGame for NimHeap {
    fn moves(&self) -> Vec<Self> {
        (0..self.0).map(NimHeap).collect()
    }
}

impl Display for NimHeap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", NimHeap::grundy_value(*self))
    }
}

/// Position of nim with any number of heaps
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nim {
    heaps: Vec<u32>,
}

impl Nim {
    /// Create new position from heap sizes
    #[inline]
    pub const fn new(heaps: Vec<u32>) -> Self {
        Self { heaps }
    }

    /// Heap sizes of the position
    #[inline]
    pub fn heaps(&self) -> &[u32] {
        &self.heaps
    }

    /// Grundy value of the position, i.e. the nim sum of its heaps
    pub fn nim_sum(&self) -> Nimber {
        self.heaps.iter().copied().map(Nimber::new).sum()
    }

    /// Explicit game tree of the position: sum of its heaps
    pub fn game_tree(&self) -> GameTree {
        self.heaps.iter().copied().map(GameTree::nim_heap).sum()
    }

    /// Moves to positions with zero nim sum
    ///
    /// Empty if and only if the position is already a second player win.
    pub fn winning_moves(&self) -> Vec<Self> {
        let total = self.nim_sum().value();
        if total == 0 {
            return Vec::new();
        }

        self.heaps
            .iter()
            .enumerate()
            .filter(|(_, heap)| **heap ^ total < **heap)
            .map(|(idx, heap)| {
                let mut heaps = self.heaps.clone();
                heaps[idx] = heap ^ total;
                Self::new(heaps)
            })
            .collect()
    }
}

impl ImpartialGame for Nim {
    fn moves(&self) -> Vec<Self> {
        let mut moves = Vec::with_capacity(self.heaps.iter().map(|h| *h as usize).sum());
        for (idx, heap) in self.heaps.iter().enumerate() {
            for smaller in 0..*heap {
                let mut heaps = self.heaps.clone();
                heaps[idx] = smaller;
                moves.push(Self::new(heaps));
            }
        }
        moves
    }
}

impl Display for Nim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Nim")?;
        display::parens(f, |f| display::commas(f, self.heaps()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::short::{limits::Limits, transposition_table::ParallelTranspositionTable};

    #[test]
    fn heap_values() {
        let limits = Limits::default();
        for n in 0..8 {
            let heap = NimHeap::new(n);
            assert_eq!(heap.grundy_value(), Nimber::new(n));
            assert_eq!(ImpartialGame::grundy_value(&heap, &limits), Ok(Nimber::new(n)));
            assert_eq!(ImpartialGame::game_tree(&heap, &limits), Ok(heap.game_tree()));
        }
    }

    #[test]
    fn multi_heap_values() {
        let limits = Limits::default();
        let tt = ParallelTranspositionTable::new();
        for heaps in [vec![], vec![1, 2], vec![3, 3], vec![1, 2, 3], vec![2, 4, 7]] {
            let position = Nim::new(heaps);
            assert_eq!(
                position.grundy_value_with(&limits, &tt),
                Ok(position.nim_sum()),
                "{}",
                position
            );
        }
    }

    #[test]
    fn game_tree_is_sum_of_heaps() {
        let limits = Limits::default();
        let position = Nim::new(vec![1, 2]);
        assert_eq!(position.game_tree().to_nim_heap(), None);
        assert_eq!(
            ImpartialGame::game_tree(&position, &limits),
            Ok(GameTree::nim_heap(1) + GameTree::nim_heap(2))
        );
    }

    #[test]
    fn winning_moves_reach_zero() {
        let position = Nim::new(vec![3, 4, 5]);
        assert_eq!(position.nim_sum(), Nimber::new(2));

        let moves = position.winning_moves();
        assert_eq!(moves, vec![Nim::new(vec![1, 4, 5])]);
        assert!(moves.iter().all(|m| m.nim_sum() == Nimber::new(0)));

        assert!(Nim::new(vec![1, 2, 3]).winning_moves().is_empty());
        assert_eq!(Nim::new(vec![1, 2, 4]).winning_moves().len(), 1);
    }

    #[test]
    fn display() {
        assert_eq!(NimHeap::new(0).to_string(), "0");
        assert_eq!(NimHeap::new(1).to_string(), "*");
        assert_eq!(NimHeap::new(4).to_string(), "*4");
        assert_eq!(Nim::new(vec![1, 2, 3]).to_string(), "Nim(1, 2, 3)");
    }
}
