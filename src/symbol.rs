use std::collections::BTreeSet;

use itertools::Itertools;

use crate::Show;

/// A label on a transition. Either a concrete character of the input or the reserved
/// [`Symbol::Epsilon`], which is taken without consuming any input.
///
/// Epsilon is a separate variant rather than some reserved character, so no input
/// character can ever be mistaken for it.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum Symbol {
    /// The empty word, consumes nothing.
    Epsilon,
    /// A single character of the input.
    Char(char),
}

/// Shorthand for [`Symbol::Epsilon`].
pub const EPSILON: Symbol = Symbol::Epsilon;

impl Symbol {
    /// Returns true if and only if `self` is [`Symbol::Epsilon`].
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the underlying character, or `None` for epsilon.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(*c),
        }
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::Char(value)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

impl Show for Symbol {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

/// The set of concrete characters that appear on the transitions of an automaton. Epsilon
/// is never part of an alphabet. Iteration is in ascending order, which makes every
/// algorithm that walks the alphabet deterministic.
#[derive(Clone, Default, Hash, PartialEq, Eq, Debug)]
pub struct Alphabet(BTreeSet<char>);

impl Alphabet {
    /// Creates an empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given symbol, returns false if it was present already. Adding epsilon is a no-op.
    pub fn insert<S: Into<Symbol>>(&mut self, symbol: S) -> bool {
        match symbol.into() {
            Symbol::Epsilon => false,
            Symbol::Char(c) => self.0.insert(c),
        }
    }

    /// Returns true if `c` is part of the alphabet.
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    /// The number of characters.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the characters in ascending order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<char> for Alphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().filter_map(|s| s.as_char()).collect())
    }
}

impl Show for Alphabet {
    fn show(&self) -> String {
        format!("{{{}}}", self.universe().join(", "))
    }
}
