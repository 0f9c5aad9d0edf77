//! The symbol arena: grammar construction and the combinator set.
//!
//! A [`Grammar`] owns every node of a grammar graph in an arena; nodes are
//! addressed by [`SymbolId`], so rules can reference each other (including
//! themselves, through an [`or`](Grammar::or) placeholder patched with
//! [`add_alt`](Grammar::add_alt)) without ownership cycles. Construction mutates the
//! arena through `&mut Grammar`; parsing takes `&Grammar` and is freely
//! shareable.

use std::fmt;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::elem::Elem;
use crate::errors::ParseError;
use crate::value::Value;

mod eval;
mod node;

use node::{CharTest, Kind, LiteralOut, Node, Step};

/// A user-supplied transform applied to a node's raw matched value(s).
///
/// Single-valued nodes pass the one value; many-valued nodes pass the whole
/// `Value::Seq`.
pub type Maker = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Handle to a grammar node in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    fn idx(self) -> usize {
        self.0 as usize
    }
}

/// An arena of grammar nodes plus the construction and parse API.
///
/// # Examples
///
/// ```rust
/// use tantu::{Grammar, Value};
///
/// let mut g = Grammar::new();
/// let letter = g.one_of('a'..='z');
/// let word = g.rep_concat(letter, Some(1), None);
/// let comma = g.punct(',');
/// let list = g.rep_sep(word, comma);
/// assert_eq!(
///     g.try_parse_str(list, "a,b,c", true).unwrap(),
///     Value::Seq(vec!["a".into(), "b".into(), "c".into()]),
/// );
/// ```
pub struct Grammar<E: Elem> {
    nodes: Vec<Node<E>>,
}

impl<E: Elem> Default for Grammar<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Elem> fmt::Debug for Grammar<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grammar({} symbols)", self.nodes.len())
    }
}

impl<E: Elem> Grammar<E> {
    /// Creates an empty grammar arena.
    pub fn new() -> Self {
        Grammar { nodes: Vec::new() }
    }

    fn push(&mut self, kind: Kind<E>) -> SymbolId {
        let id = SymbolId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, maker: None });
        id
    }

    fn node(&self, id: SymbolId) -> &Node<E> {
        &self.nodes[id.idx()]
    }

    // ========================================================================
    // TERMINAL SYMBOLS
    // ========================================================================

    /// Matches any single element; captured.
    pub fn any(&mut self) -> SymbolId {
        self.terminal(CharTest::Any, true)
    }

    /// Matches exactly `e`; captured.
    pub fn exact(&mut self, e: E) -> SymbolId {
        self.terminal(CharTest::Exact(e), true)
    }

    /// Matches exactly `e`, suppressed — for structural punctuation whose
    /// value carries no information (brackets, separators).
    pub fn punct(&mut self, e: E) -> SymbolId {
        self.terminal(CharTest::Exact(e), false)
    }

    /// Matches any single element other than `e`; captured.
    pub fn not_elem(&mut self, e: E) -> SymbolId {
        self.terminal(CharTest::Not(e), true)
    }

    /// Matches any element of the set; captured.
    pub fn one_of<I: IntoIterator<Item = E>>(&mut self, elems: I) -> SymbolId {
        let set = dedup(elems);
        self.terminal(CharTest::OneOf(set), true)
    }

    /// Matches any element not in the set; captured.
    pub fn none_of<I: IntoIterator<Item = E>>(&mut self, elems: I) -> SymbolId {
        let set = dedup(elems);
        self.terminal(CharTest::NoneOf(set), true)
    }

    fn terminal(&mut self, test: CharTest<E>, capture: bool) -> SymbolId {
        self.push(Kind::Terminal {
            test,
            escape: None,
            capture,
        })
    }

    /// Attaches an escape element to a terminal: when the next element
    /// equals `esc`, the element after it is consumed and taken verbatim,
    /// bypassing the validity test. Returns `id` for chaining.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a terminal symbol.
    pub fn with_escape(&mut self, id: SymbolId, esc: E) -> SymbolId {
        match &mut self.nodes[id.idx()].kind {
            Kind::Terminal { escape, .. } => *escape = Some(esc),
            _ => panic!("with_escape applies only to terminal symbols"),
        }
        id
    }

    // ========================================================================
    // STRUCTURAL COMBINATORS
    // ========================================================================

    /// Ordered, atomic AND: every child must match in order, or the whole
    /// sequence rolls back. Contribution counting: zero emitting children
    /// means the sequence is suppressed; exactly one passes that child's
    /// value through; more yield a `Value::Seq` of contributions.
    pub fn seq<I: IntoIterator<Item = SymbolId>>(&mut self, children: I) -> SymbolId {
        self.push(Kind::Seq {
            children: children.into_iter().collect(),
            ignore: false,
        })
    }

    /// A sequence that matches (and consumes) but contributes nothing —
    /// for matched-but-discarded fragments such as whitespace.
    pub fn ignore<I: IntoIterator<Item = SymbolId>>(&mut self, children: I) -> SymbolId {
        self.push(Kind::Seq {
            children: children.into_iter().collect(),
            ignore: true,
        })
    }

    /// Negative lookahead: fails if `excluded` matches here (tried in a
    /// throwaway attempt), otherwise evaluates `base` — "any `base` other
    /// than `excluded`".
    pub fn except(&mut self, base: SymbolId, excluded: SymbolId) -> SymbolId {
        self.push(Kind::Except { base, excluded })
    }

    /// Bounded repetition: matches `child` between `min` and `max` times
    /// (both optional), contributing a `Value::Seq` of per-iteration values.
    /// Fewer than `min` successes fails the whole repetition.
    pub fn rep(
        &mut self,
        child: SymbolId,
        min: Option<usize>,
        max: Option<usize>,
    ) -> SymbolId {
        self.push(Kind::Rep {
            child,
            min,
            max,
            concat: false,
            none: None,
            ignore: false,
        })
    }

    /// Repetition that concatenates per-iteration fragments into one
    /// `Str`/`Bytes` scalar. A typical digit run is
    /// `rep_concat(digit, Some(1), None)`.
    pub fn rep_concat(
        &mut self,
        child: SymbolId,
        min: Option<usize>,
        max: Option<usize>,
    ) -> SymbolId {
        self.push(Kind::Rep {
            child,
            min,
            max,
            concat: true,
            none: None,
            ignore: false,
        })
    }

    /// Zero-or-one repetition. On a match the contribution is
    /// `Seq([value])`; on no match it degrades to the empty `Seq([])`.
    pub fn opt(&mut self, child: SymbolId) -> SymbolId {
        self.rep(child, None, Some(1))
    }

    /// Single-valued optional: yields the matched value itself, or the
    /// given `sentinel` when absent.
    pub fn opt_or(&mut self, child: SymbolId, sentinel: Value) -> SymbolId {
        self.push(Kind::Rep {
            child,
            min: None,
            max: Some(1),
            concat: false,
            none: Some(sentinel),
            ignore: false,
        })
    }

    /// Optional and suppressed: matches zero or one `child` and contributes
    /// nothing either way (interstitial whitespace).
    pub fn ignore_opt(&mut self, child: SymbolId) -> SymbolId {
        self.push(Kind::Rep {
            child,
            min: None,
            max: Some(1),
            concat: false,
            none: None,
            ignore: true,
        })
    }

    /// Ordered choice: alternatives are tried in registration order and the
    /// first success wins, even if a later one would also match. Start with
    /// an empty alternative list to create a placeholder for recursive
    /// rules, then patch branches in with [`Grammar::add_alt`].
    pub fn or<I: IntoIterator<Item = SymbolId>>(&mut self, alts: I) -> SymbolId {
        self.push(Kind::Or {
            alts: alts.into_iter().collect(),
        })
    }

    /// Appends an alternative to an existing `or` node.
    ///
    /// # Panics
    ///
    /// Panics if `or` is not an alternation symbol.
    pub fn add_alt(&mut self, or: SymbolId, alt: SymbolId) {
        match &mut self.nodes[or.idx()].kind {
            Kind::Or { alts } => alts.push(alt),
            _ => panic!("add_alt applies only to alternation symbols"),
        }
    }

    /// Like [`Grammar::seq`], but flattens each sequence-valued contribution
    /// one level into a single flat `Value::Seq` — splices a repetition's
    /// list together with an optional tail into one uniform list.
    pub fn chain<I: IntoIterator<Item = SymbolId>>(&mut self, children: I) -> SymbolId {
        self.push(Kind::Chain {
            children: children.into_iter().collect(),
        })
    }

    /// Like [`Grammar::chain`], but concatenates recursively into one
    /// `Str`/`Bytes` scalar — assembles compound tokens (a signed decimal,
    /// say) from nested fragment shapes.
    pub fn chain_concat<I: IntoIterator<Item = SymbolId>>(&mut self, children: I) -> SymbolId {
        self.push(Kind::ChainConcat {
            children: children.into_iter().collect(),
        })
    }

    // ========================================================================
    // DERIVED SUGAR
    // ========================================================================

    /// Repetition with separator: zero or more `element` each followed by
    /// `sep`, plus an optional trailing `element` with no separator after
    /// it. Both "trailing separator" and "no trailing separator" inputs
    /// yield the same flattened element list.
    pub fn rep_sep(&mut self, element: SymbolId, sep: SymbolId) -> SymbolId {
        let pair = self.seq([element, sep]);
        let run = self.rep(pair, None, None);
        let tail = self.opt(element);
        self.chain([run, tail])
    }

    /// Attaches a maker to a node: the node's raw matched value (or whole
    /// value sequence) is passed through `maker` before contributing upward.
    /// Returns `id` for chaining.
    pub fn with_maker<F>(&mut self, id: SymbolId, maker: F) -> SymbolId
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.nodes[id.idx()].maker = Some(Arc::new(maker));
        id
    }

    fn literal_node(&mut self, text: Vec<E>, out: LiteralOut) -> SymbolId {
        self.push(Kind::Literal { text, out })
    }

    // ========================================================================
    // TOP-LEVEL PARSE
    // ========================================================================

    /// Attempts `root` against `input` from a fresh cursor.
    ///
    /// With `use_all`, leftover input after a successful match fails with
    /// [`ParseError::NotAllCharsUsed`]. A suppressed root contributes
    /// `Value::Null`.
    pub fn try_parse(
        &self,
        root: SymbolId,
        input: &[E],
        use_all: bool,
    ) -> Result<Value, ParseError> {
        let mut cursor = Cursor::new(input);
        let step = match self.eval(root, &mut cursor) {
            Ok(step) => step,
            Err(fail) => {
                return Err(ParseError::from_fail(
                    fail,
                    E::render(input),
                    E::byte_span(input, cursor.high_water_mark()),
                ))
            }
        };
        if use_all && !cursor.is_eof() {
            return Err(ParseError::not_all_chars_used(
                E::render(input),
                E::byte_span(input, cursor.pos()),
            ));
        }
        Ok(match step {
            Step::Emit(value) => value,
            Step::Skip => Value::Null,
        })
    }
}

impl Grammar<char> {
    /// Matches the literal `text` character-by-character, suppressed.
    pub fn text(&mut self, text: &str) -> SymbolId {
        self.literal_node(text.chars().collect(), LiteralOut::Ignore)
    }

    /// Matches the literal `text` and contributes the matched text.
    pub fn expl_text(&mut self, text: &str) -> SymbolId {
        self.literal_node(text.chars().collect(), LiteralOut::Text)
    }

    /// Matches the literal `text` but always contributes the fixed `value`
    /// (matching `"true"` can yield `Value::Bool(true)`).
    pub fn keyword(&mut self, text: &str, value: Value) -> SymbolId {
        self.literal_node(text.chars().collect(), LiteralOut::Fixed(value))
    }

    /// [`Grammar::try_parse`] over the characters of `text`.
    pub fn try_parse_str(
        &self,
        root: SymbolId,
        text: &str,
        use_all: bool,
    ) -> Result<Value, ParseError> {
        let input: Vec<char> = text.chars().collect();
        self.try_parse(root, &input, use_all)
    }
}

impl Grammar<u8> {
    /// Matches the literal `bytes`, suppressed.
    pub fn bytes_text(&mut self, bytes: &[u8]) -> SymbolId {
        self.literal_node(bytes.to_vec(), LiteralOut::Ignore)
    }

    /// Matches the literal `bytes` and contributes the matched bytes.
    pub fn expl_bytes(&mut self, bytes: &[u8]) -> SymbolId {
        self.literal_node(bytes.to_vec(), LiteralOut::Text)
    }
}

fn dedup<E: Elem, I: IntoIterator<Item = E>>(elems: I) -> Vec<E> {
    let mut set = Vec::new();
    for e in elems {
        if !set.contains(&e) {
            set.push(e);
        }
    }
    set
}
