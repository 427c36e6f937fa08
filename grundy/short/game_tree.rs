//! Finite two-player game trees
//!
//! A [`GameTree`] is a game written explicitly as `{G^L | G^R}`: sets of positions Left and
//! Right can move to. Trees are built bottom-up from [`GameTree::zero`] and never change after
//! construction, so every tree is finite and every play on it ends.

use crate::{
    display,
    numeric::nimber::Nimber,
    parsing::{self, ParseError, Parser},
    short::{Player, limits::Limits},
};
use ahash::AHashMap;
use auto_ops::impl_op_ex;
use dashmap::{DashMap, mapref::entry::Entry};
use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::Hash,
    iter::Sum,
    str::FromStr,
    sync::{Arc, LazyLock, Weak},
};

/// Fixed seeds so digests are stable between runs
const DIGEST_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// Identity of a node: addresses of its (already interned) options
#[derive(PartialEq, Eq, Hash)]
struct NodeKey {
    left: Vec<usize>,
    right: Vec<usize>,
}

impl NodeKey {
    fn new(left: &[GameTree], right: &[GameTree]) -> NodeKey {
        NodeKey {
            left: left.iter().map(GameTree::address).collect(),
            right: right.iter().map(GameTree::address).collect(),
        }
    }
}

/// Every live node, so structurally equal trees share one allocation
static NODES: LazyLock<DashMap<NodeKey, Weak<Node>, ahash::RandomState>> =
    LazyLock::new(DashMap::default);

struct Node {
    // Invariant: sorted and deduplicated
    left: Vec<GameTree>,
    right: Vec<GameTree>,

    birthday: u32,
    digest: u64,
    impartial: bool,
    nim_heap: Option<u32>,
    integer: Option<i64>,
}

impl Node {
    fn new(left: Vec<GameTree>, right: Vec<GameTree>) -> Node {
        let birthday = left
            .iter()
            .chain(right.iter())
            .map(|g| g.birthday().saturating_add(1))
            .max()
            .unwrap_or(0);

        let impartial = left == right && left.iter().all(GameTree::is_impartial);

        // Options are sorted by birthday first and *k is born on day k
        let nim_heap = (impartial
            && left
                .iter()
                .enumerate()
                .all(|(k, g)| g.node.nim_heap == Some(k as u32)))
        .then_some(left.len() as u32);

        let integer = match (left.as_slice(), right.as_slice()) {
            ([], []) => Some(0),
            ([gl], []) => gl.to_integer().filter(|n| *n >= 0).map(|n| n + 1),
            ([], [gr]) => gr.to_integer().filter(|n| *n <= 0).map(|n| n - 1),
            _ => None,
        };

        let digest = ahash::RandomState::with_seeds(
            DIGEST_SEEDS[0],
            DIGEST_SEEDS[1],
            DIGEST_SEEDS[2],
            DIGEST_SEEDS[3],
        )
        .hash_one((
            left.iter().map(|g| g.node.digest).collect::<Vec<_>>(),
            right.iter().map(|g| g.node.digest).collect::<Vec<_>>(),
        ));

        Node {
            left,
            right,
            birthday,
            digest,
            impartial,
            nim_heap,
            integer,
        }
    }

    fn forget(&self) {
        NODES.remove_if(&NodeKey::new(&self.left, &self.right), |_, node| {
            node.strong_count() == 0
        });
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        self.forget();

        // Unlink options iteratively, recursive drop overflows the stack on deep trees
        let mut pending = std::mem::take(&mut self.left);
        pending.append(&mut self.right);
        while let Some(option) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(option.node) {
                node.forget();
                pending.append(&mut node.left);
                pending.append(&mut node.right);
            }
        }
    }
}

/// Finite game position given by its Left and Right options
///
/// Trees are hash-consed: structurally equal trees are the same allocation, so equality is a
/// pointer comparison. Note that equality, hashing and ordering are structural, i.e. `{*|*}` and
/// `0` are different trees even though they are equal games. To compare game values use
/// [`crate::short::oracle::ShortGameOracle`].
#[derive(Clone)]
pub struct GameTree {
    node: Arc<Node>,
}

impl GameTree {
    /// Construct a game from Left and Right options. Duplicate options are removed.
    pub fn new(mut left: Vec<GameTree>, mut right: Vec<GameTree>) -> GameTree {
        left.sort();
        left.dedup();

        right.sort();
        right.dedup();

        GameTree::from_sorted(left, right)
    }

    fn from_sorted(left: Vec<GameTree>, right: Vec<GameTree>) -> GameTree {
        debug_assert!(left.is_sorted() && right.is_sorted(), "Options not sorted");

        let key = NodeKey::new(&left, &right);
        if let Some(node) = NODES.get(&key).and_then(|node| node.upgrade()) {
            return GameTree { node };
        }

        let fresh = Arc::new(Node::new(left, right));
        let node = match NODES.entry(key) {
            Entry::Occupied(mut entry) => entry.get().upgrade().unwrap_or_else(|| {
                entry.insert(Arc::downgrade(&fresh));
                fresh.clone()
            }),
            Entry::Vacant(entry) => {
                entry.insert(Arc::downgrade(&fresh));
                fresh.clone()
            }
        };
        // `fresh` may be dropped here if another thread won the race, outside of the map lock
        GameTree { node }
    }

    #[inline]
    fn address(&self) -> usize {
        Arc::as_ptr(&self.node) as usize
    }

    /// The terminal position `{|}` where nobody can move
    pub fn zero() -> GameTree {
        GameTree::from_sorted(Vec::new(), Vec::new())
    }

    /// Alias for [`GameTree::zero`]
    #[inline]
    pub fn terminal() -> GameTree {
        GameTree::zero()
    }

    /// Canonical integer, i.e. `n = {n-1|}` for positive and `-n = {|-n+1}` for negative `n`
    pub fn new_integer(n: i64) -> GameTree {
        let mut game = GameTree::zero();
        for _ in 0..n.unsigned_abs() {
            game = if n > 0 {
                GameTree::from_sorted(vec![game], Vec::new())
            } else {
                GameTree::from_sorted(Vec::new(), vec![game])
            };
        }
        game
    }

    /// Nim heap of size `n` where both players can move to any smaller heap.
    ///
    /// Smaller heaps are shared between options, but the tree still holds `n(n+1)/2` option
    /// references in total.
    pub fn nim_heap(n: u32) -> GameTree {
        let mut heaps: Vec<GameTree> = Vec::with_capacity(n as usize + 1);
        for _ in 0..=n {
            let heap = GameTree::from_sorted(heaps.clone(), heaps.clone());
            heaps.push(heap);
        }
        heaps.pop().unwrap_or_else(GameTree::zero)
    }

    /// Left player's options
    #[inline]
    pub fn left_moves(&self) -> &[GameTree] {
        &self.node.left
    }

    /// Right player's options
    #[inline]
    pub fn right_moves(&self) -> &[GameTree] {
        &self.node.right
    }

    /// Options of a given player
    #[inline]
    pub fn moves(&self, player: Player) -> &[GameTree] {
        match player {
            Player::Left => self.left_moves(),
            Player::Right => self.right_moves(),
        }
    }

    /// Check if neither player can move
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.node.left.is_empty() && self.node.right.is_empty()
    }

    /// Length of the longest play from this position, terminal position is born on day 0
    #[inline]
    pub fn birthday(&self) -> u32 {
        self.node.birthday
    }

    /// Check if both players have the same options at every reachable position
    #[inline]
    pub fn is_impartial(&self) -> bool {
        self.node.impartial
    }

    /// Size of the heap if the tree is exactly a nim heap
    #[inline]
    pub fn to_nim_heap(&self) -> Option<Nimber> {
        self.node.nim_heap.map(Nimber::new)
    }

    /// Value of the integer if the tree is exactly a canonical integer
    #[inline]
    pub fn to_integer(&self) -> Option<i64> {
        self.node.integer
    }

    /// Construct negative of a game by swapping Left and Right. Alias for `-` operator
    #[must_use]
    pub fn negate(&self) -> GameTree {
        let mut negated = AHashMap::new();
        self.negate_memo(&mut negated)
    }

    fn negate_memo(&self, negated: &mut AHashMap<GameTree, GameTree>) -> GameTree {
        // Both sides are the same and every option is its own negative
        if self.is_impartial() {
            return self.clone();
        }

        if let Some(known) = negated.get(self) {
            return known.clone();
        }

        let left = self
            .right_moves()
            .iter()
            .map(|gr| gr.negate_memo(negated))
            .collect();
        let right = self
            .left_moves()
            .iter()
            .map(|gl| gl.negate_memo(negated))
            .collect();
        let result = GameTree::new(left, right);
        negated.insert(self.clone(), result.clone());
        result
    }

    /// Construct a disjoint sum of two games, where a move is a move in exactly one of the
    /// components. Alias for `+` operator
    pub fn disjoint_sum(g: &GameTree, h: &GameTree) -> GameTree {
        let mut sums = AHashMap::new();
        GameTree::disjoint_sum_memo(g, h, &mut sums)
    }

    fn disjoint_sum_memo(
        g: &GameTree,
        h: &GameTree,
        sums: &mut AHashMap<(GameTree, GameTree), GameTree>,
    ) -> GameTree {
        if g.is_terminal() {
            return h.clone();
        }
        if h.is_terminal() {
            return g.clone();
        }

        // Sum is commutative and trees are interned, so G+H and H+G share an entry
        let key = if g <= h {
            (g.clone(), h.clone())
        } else {
            (h.clone(), g.clone())
        };
        if let Some(known) = sums.get(&key) {
            return known.clone();
        }

        // { GL+H, G+HL | GR+H, G+HR }
        let mut side = |player: Player| {
            let mut moves = Vec::with_capacity(g.moves(player).len() + h.moves(player).len());
            for g_opt in g.moves(player) {
                moves.push(GameTree::disjoint_sum_memo(g_opt, h, sums));
            }
            for h_opt in h.moves(player) {
                moves.push(GameTree::disjoint_sum_memo(g, h_opt, sums));
            }
            moves
        };

        let left = side(Player::Left);
        let right = if g.is_impartial() && h.is_impartial() {
            left.clone()
        } else {
            side(Player::Right)
        };

        let result = GameTree::new(left, right);
        sums.insert(key, result.clone());
        result
    }

    /// All impartial games whose options are a subset of `day`.
    ///
    /// Starting from `[0]` this enumerates impartial game trees born by consecutive days.
    pub fn next_impartial_day(day: &[GameTree]) -> impl Iterator<Item = GameTree> + '_ {
        use itertools::Itertools;

        day.iter().powerset().map(|options| {
            let options = options.into_iter().cloned().collect::<Vec<_>>();
            GameTree::new(options.clone(), options)
        })
    }

    /// All impartial game trees born by day `day`
    pub fn impartial_born_by(day: u32) -> Vec<GameTree> {
        let mut games = vec![GameTree::zero()];
        for _ in 0..day {
            games = GameTree::next_impartial_day(&games).collect();
        }
        games
    }

    /// Parse game using `{a,b,...|c,d,...}` notation, integers and `*n` nimbers.
    ///
    /// Games born after `limits` are rejected while parsing, before anything is built.
    pub fn from_str_with_limits(input: &str, limits: &Limits) -> Result<GameTree, ParseError> {
        parsing::parse_all(input, |p| GameTree::parse_born_by(p, limits.max_depth()))
    }

    fn parse_option(p: Parser<'_>, day: u32) -> Result<(Parser<'_>, GameTree), ParseError> {
        match day.checked_sub(1) {
            Some(option_day) => GameTree::parse_born_by(p, option_day),
            None => Err(p.error(TOO_DEEP)),
        }
    }

    fn parse_born_by(p: Parser<'_>, day: u32) -> Result<(Parser<'_>, GameTree), ParseError> {
        let p = p.trim_whitespace();
        match p.peek() {
            Some('{') => {
                let p = p.expect_ascii_char('{')?;
                let (p, left) = p.parse_list(starts_game, |p| GameTree::parse_option(p, day))?;
                let p = p.expect_ascii_char('|')?;
                let (p, right) = p.parse_list(starts_game, |p| GameTree::parse_option(p, day))?;
                let p = p.trim_whitespace().expect_ascii_char('}')?;
                Ok((p, GameTree::new(left, right)))
            }
            Some('*') => {
                let p = p.expect_ascii_char('*')?;
                let (p, heap) = if p.peek().is_some_and(|c| c.is_ascii_digit()) {
                    p.parse_u32()?
                } else {
                    (p, 1)
                };
                if heap > day {
                    return Err(p.error(TOO_DEEP));
                }
                Ok((p, GameTree::nim_heap(heap)))
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                let (after, n) = p.parse_i64()?;
                if n.unsigned_abs() > u64::from(day) {
                    return Err(p.error(TOO_DEEP));
                }
                Ok((after, GameTree::new_integer(n)))
            }
            _ => Err(p.error("a game")),
        }
    }
}

const TOO_DEEP: &str = "a game born within the depth limit";

const fn starts_game(c: char) -> bool {
    matches!(c, '{' | '*' | '-' | '0'..='9')
}

impl PartialEq for GameTree {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for GameTree {}

impl PartialOrd for GameTree {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GameTree {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.node, &other.node) {
            return Ordering::Equal;
        }

        self.birthday()
            .cmp(&other.birthday())
            .then_with(|| self.node.digest.cmp(&other.node.digest))
            .then_with(|| self.node.left.cmp(&other.node.left))
            .then_with(|| self.node.right.cmp(&other.node.right))
    }
}

impl Hash for GameTree {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.node.digest);
    }
}

impl Display for GameTree {
    /// Print integers and nim heaps in short form, anything else using `{G^L | G^R}` notation
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.to_integer() {
            return write!(f, "{}", n);
        }
        if let Some(heap) = self.to_nim_heap() {
            return write!(f, "{}", heap);
        }
        display::braces(f, |f| {
            display::commas(f, self.left_moves())?;
            write!(f, "|")?;
            display::commas(f, self.right_moves())
        })
    }
}

impl fmt::Debug for GameTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameTree({})", self)
    }
}

impl FromStr for GameTree {
    type Err = ParseError;

    /// Parse under the default depth limit, see [`GameTree::from_str_with_limits`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameTree::from_str_with_limits(s, &Limits::default())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for GameTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GameTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        GameTree::from_str(&String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

impl_op_ex!(+|g: &GameTree, h: &GameTree| -> GameTree { GameTree::disjoint_sum(g, h) });
impl_op_ex!(+=|g: &mut GameTree, h: &GameTree| { *g = GameTree::disjoint_sum(g, h) });
impl_op_ex!(-|g: &GameTree| -> GameTree { g.negate() });
impl_op_ex!(-|g: &GameTree, h: &GameTree| -> GameTree { GameTree::disjoint_sum(g, &h.negate()) });

impl Sum for GameTree {
    fn sum<I: Iterator<Item = GameTree>>(iter: I) -> GameTree {
        iter.fold(GameTree::zero(), |acc, g| acc + g)
    }
}

impl<'a> Sum<&'a GameTree> for GameTree {
    fn sum<I: Iterator<Item = &'a GameTree>>(iter: I) -> GameTree {
        iter.fold(GameTree::zero(), |acc, g| acc + g)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl GameTree {
    fn arbitrary_sized(generator: &mut quickcheck::Gen, size: &mut usize, impartial: bool) -> Self {
        use quickcheck::Arbitrary;

        if *size == 0 {
            return GameTree::zero();
        }
        *size -= 1;

        let side = |generator: &mut quickcheck::Gen, size: &mut usize| {
            let num_options = usize::arbitrary(generator) % 4;
            let mut options = Vec::with_capacity(num_options);
            for _ in 0..num_options {
                if *size == 0 {
                    break;
                }
                options.push(GameTree::arbitrary_sized(generator, size, impartial));
            }
            options
        };

        let left = side(generator, size);
        let right = if impartial {
            left.clone()
        } else {
            side(generator, size)
        };
        GameTree::new(left, right)
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for GameTree {
    fn arbitrary(generator: &mut quickcheck::Gen) -> Self {
        let mut size = generator.size() / 4;
        GameTree::arbitrary_sized(generator, &mut size, false)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use itertools::Itertools;

        if self.is_terminal() {
            return quickcheck::empty_shrinker();
        }

        let right = self
            .right_moves()
            .to_vec()
            .shrink()
            .chain(std::iter::once(vec![]))
            .collect::<Vec<_>>();
        Box::new(
            self.left_moves()
                .to_vec()
                .shrink()
                .chain(std::iter::once(vec![]))
                .cartesian_product(right)
                .map(|(left, right)| GameTree::new(left, right)),
        )
    }
}

/// Wrapper generating only impartial trees in property tests
#[cfg(any(test, feature = "quickcheck"))]
#[derive(Debug, Clone)]
pub struct ArbitraryImpartial(pub GameTree);

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for ArbitraryImpartial {
    fn arbitrary(generator: &mut quickcheck::Gen) -> Self {
        let mut size = generator.size() / 4;
        ArbitraryImpartial(GameTree::arbitrary_sized(generator, &mut size, true))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let options = self
            .0
            .left_moves()
            .iter()
            .cloned()
            .map(ArbitraryImpartial)
            .collect::<Vec<_>>();
        Box::new(options.shrink().map(|options| {
            let options = options.into_iter().map(|g| g.0).collect::<Vec<_>>();
            ArbitraryImpartial(GameTree::new(options.clone(), options))
        }))
    }
}
