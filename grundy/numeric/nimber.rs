//! Nimber is a number that represents a Nim heap of a given size.

use auto_ops::impl_op_ex;
use std::{fmt::Display, iter::Sum};

/// Number that represents a Nim heap of given size, i.e. a Grundy value.
///
/// Addition is overloaded to Nim sum.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying nimber value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Compute the minimum excluded value, the least nimber that does not occur in `nimbers`.
    /// Input may contain duplicates and come in any order.
    /// See <https://en.wikipedia.org/wiki/Mex_(mathematics)>
    pub fn mex<I>(nimbers: I) -> Self
    where
        I: IntoIterator<Item = Nimber>,
    {
        let nimbers = nimbers.into_iter().collect::<Vec<_>>();

        // mex(S) <= |S|, so anything above the length can be ignored
        let mut seen = vec![false; nimbers.len() + 1];
        for n in nimbers {
            if let Some(present) = seen.get_mut(n.0 as usize) {
                *present = true;
            }
        }

        let first_missing = seen.iter().position(|present| !present).unwrap_or(seen.len());
        Self(first_missing as u32)
    }

    /// Nim sum of two heaps, alias for `+`
    #[inline]
    pub const fn nim_sum(self, other: Self) -> Self {
        Self(self.0 ^ other.0)
    }
}

impl From<u32> for Nimber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// xor is correct, that's how nimbers additon works
impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { lhs.nim_sum(*rhs) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

// Subtraction is the same as addition
impl_op_ex!(-|lhs: &Nimber, rhs: &Nimber| -> Nimber { lhs.nim_sum(*rhs) });
impl_op_ex!(-=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

// Nimber is its own negative
impl_op_ex!(-|lhs: &Nimber| -> Nimber { *lhs });

impl Sum for Nimber {
    fn sum<I: Iterator<Item = Nimber>>(iter: I) -> Nimber {
        iter.fold(Nimber(0), |acc, n| acc + n)
    }
}

impl<'a> Sum<&'a Nimber> for Nimber {
    fn sum<I: Iterator<Item = &'a Nimber>>(iter: I) -> Nimber {
        iter.fold(Nimber(0), |acc, n| acc + n)
    }
}

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else if self.0 == 1 {
            write!(f, "*")
        } else {
            write!(f, "*{}", self.0)
        }
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Nimber {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Keep heaps small enough to materialize as game trees in tests
        Nimber(u32::arbitrary(g) % 64)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Nimber))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;

    #[test]
    fn mex_works() {
        assert_eq!(
            Nimber(3),
            Nimber::mex(vec![Nimber(0), Nimber(0), Nimber(2), Nimber(5), Nimber(1)])
        );

        assert_eq!(
            Nimber(3),
            Nimber::mex(vec![Nimber(0), Nimber(1), Nimber(2)])
        );

        assert_eq!(
            Nimber(2),
            Nimber::mex(vec![Nimber(0), Nimber(1), Nimber(1)])
        );

        assert_eq!(Nimber(2), Nimber::mex([0, 1, 3].map(Nimber)));
        assert_eq!(Nimber(0), Nimber::mex(vec![]));
        assert_eq!(Nimber(0), Nimber::mex([7, 3].map(Nimber)));
    }

    #[test]
    fn mex_of_prefix() {
        for n in 0..32 {
            assert_eq!(Nimber::mex((0..n).map(Nimber)), Nimber(n));
            assert_eq!(Nimber::mex((0..n).rev().map(Nimber)), Nimber(n));
        }
    }

    #[test]
    fn mex_is_excluded_and_bounded() {
        let test = |values: Vec<Nimber>| {
            let mex = Nimber::mex(values.iter().copied());
            assert!(!values.contains(&mex));
            assert!(mex.value() as usize <= values.len());
        };
        QuickCheck::new().quickcheck(test as fn(Vec<Nimber>));
    }

    #[test]
    fn mex_grows_with_set() {
        let test = |smaller: Vec<Nimber>, extra: Vec<Nimber>| {
            let mut larger = smaller.clone();
            larger.extend(extra);
            assert!(Nimber::mex(smaller) <= Nimber::mex(larger));
        };
        QuickCheck::new().quickcheck(test as fn(Vec<Nimber>, Vec<Nimber>));
    }

    #[test]
    fn mex_after_removal() {
        let values = [0, 1, 2, 4, 4].map(Nimber);
        assert_eq!(Nimber::mex(values), Nimber(3));

        // Removing a value below mex that occurs once opens a gap there
        assert_eq!(Nimber::mex([0, 2, 4, 4].map(Nimber)), Nimber(1));

        // Removing anything else does not matter
        assert_eq!(Nimber::mex([0, 1, 2, 4].map(Nimber)), Nimber(3));
        assert_eq!(Nimber::mex([0, 1, 2].map(Nimber)), Nimber(3));
    }

    #[test]
    fn nim_sum_laws() {
        assert_eq!(Nimber(3) + Nimber(5), Nimber(6));
        assert_eq!(Nimber(1) + Nimber(2), Nimber(3));

        let test = |n: Nimber, m: Nimber, p: Nimber| {
            assert_eq!(n + m, m + n);
            assert_eq!(n + n, Nimber(0));
            assert_eq!(n + Nimber(0), n);
            assert_eq!((n + m) + p, n + (m + p));
            assert_eq!(n - m, n + m);
            assert_eq!(-n, n);
        };
        QuickCheck::new().quickcheck(test as fn(Nimber, Nimber, Nimber));
    }

    #[test]
    fn display() {
        assert_eq!(Nimber(0).to_string(), "0");
        assert_eq!(Nimber(1).to_string(), "*");
        assert_eq!(Nimber(6).to_string(), "*6");
    }
}
