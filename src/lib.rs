//! Library for nondeterministic and deterministic finite automata over characters.
//!
//! An [`Automaton`] consists of a set of states, at most one initial state, a set of final states
//! and a [`TransitionTable`]. The table is either deterministic (a single target per state and
//! symbol) or nondeterministic (a set of targets per state and symbol, with epsilon transitions
//! allowed). Running an automaton on an input with [`Automaton::compute`] decides whether the input
//! is accepted.
//!
//! States are plain identities that are minted by a [`StateAllocator`]. Whether a state is initial
//! or final is recorded by the automaton using it, so the same state never carries a designation
//! from one automaton into another.
//!
//! Small automata can be combined with the Thompson-style combinators in [`operations`]
//! (union, concatenation and Kleene star) and turned into a deterministic automaton with the
//! subset construction implemented by [`Determinizer`].
//!
//! ```
//! use finite_automata::prelude::*;
//!
//! fn symbol(alloc: &StateAllocator, c: char) -> Result<Automaton, AutomatonError> {
//!     let (start, end) = (alloc.mint(), alloc.mint());
//!     let mut nfa = Automaton::new();
//!     nfa.add_states([start, end]);
//!     nfa.add_transition(start, c, end)?;
//!     nfa.make_initial(start)?;
//!     nfa.make_final(end)?;
//!     Ok(nfa)
//! }
//!
//! let alloc = StateAllocator::new();
//! // (a|b)*
//! let nfa = symbol(&alloc, 'a')?.union(symbol(&alloc, 'b')?, &alloc)?.star()?;
//! let dfa = nfa.determinize(&alloc)?;
//! for word in ["", "abba", "bbb"] {
//!     assert!(nfa.compute(word)? && dfa.compute(word)?);
//! }
//! assert!(!dfa.compute("abc")?);
//! # Ok::<(), AutomatonError>(())
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use finite_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Automaton, FinishedAutomaton},
        determinize::{to_dfa, Determinizer},
        error::{AutomatonError, ErrorKind},
        math, operations,
        options::{Options, TrailingEpsilon},
        state::{MultiState, State, StateAllocator, StateFlags},
        symbol::{Alphabet, Symbol, EPSILON},
        table::{DeterministicTable, NondeterministicTable, TransitionTable},
        traverse::Traverser,
        Show,
    };
}

/// Collection types used throughout the crate.
pub mod math;

/// Symbols, the epsilon sentinel and alphabets.
pub mod symbol;
pub use symbol::{Alphabet, Symbol, EPSILON};

/// State identities, their allocation and the sets of states used by the subset construction.
pub mod state;
pub use state::{MultiState, State, StateAllocator, StateFlags};

mod error;
pub use error::{AutomatonError, ErrorKind};

mod options;
pub use options::{Options, TrailingEpsilon};

/// Deterministic and nondeterministic transition tables.
pub mod table;
pub use table::{DeterministicTable, NondeterministicTable, TransitionTable};

/// Epsilon closures and symbol transitions over nondeterministic tables.
pub mod traverse;
pub use traverse::Traverser;

/// Defines the automaton itself, its validation and simulation.
pub mod automaton;
pub use automaton::{Automaton, FinishedAutomaton};

pub mod operations;

/// The subset construction.
pub mod determinize;
pub use determinize::{to_dfa, Determinizer};

/// Helper trait which can be used to display states, symbols and automata.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example q0, q1, q2, ... and for an automaton it is its transition table.
    /// This is mainly used for debugging purposes.
    fn show(&self) -> String;
}

#[cfg(test)]
pub(crate) mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    /// Accepts exactly the word consisting of `symbol`.
    pub fn single_symbol(alloc: &StateAllocator, symbol: char) -> Automaton {
        single_word(alloc, &symbol.to_string())
    }

    /// Accepts exactly `word`, for the empty word this is [`empty_word`].
    pub fn single_word(alloc: &StateAllocator, word: &str) -> Automaton {
        if word.is_empty() {
            return empty_word(alloc);
        }
        let mut last = alloc.mint();
        let mut nfa = Automaton::new();
        nfa.add_state(last);
        nfa.make_initial(last).unwrap();
        for symbol in word.chars() {
            let current = alloc.mint();
            nfa.add_state(current);
            nfa.add_transition(last, symbol, current).unwrap();
            last = current;
        }
        nfa.make_final(last).unwrap();
        nfa
    }

    /// Accepts only the empty word.
    pub fn empty_word(alloc: &StateAllocator) -> Automaton {
        let only = alloc.mint();
        let mut nfa = Automaton::new();
        nfa.add_state(only);
        nfa.make_initial(only).unwrap();
        nfa.make_final(only).unwrap();
        nfa
    }

    /// All words over `alphabet` of length at most `max_len`, shortest first.
    pub fn all_words(alphabet: &[char], max_len: usize) -> Vec<String> {
        std::iter::once(String::new())
            .chain((1..=max_len).flat_map(|len| {
                std::iter::repeat(alphabet.iter().copied())
                    .take(len)
                    .multi_cartesian_product()
                    .map(|word| word.into_iter().collect::<String>())
            }))
            .collect()
    }

    #[test]
    fn words_up_to_length() {
        let words = all_words(&['a', 'b'], 3);
        assert_eq!(words.len(), 1 + 2 + 4 + 8);
        assert_eq!(words[0], "");
        assert_eq!(&words[1..3], &["a", "b"]);
        assert_eq!(words.iter().unique().count(), words.len());
    }

    #[test_log::test]
    fn atoms() {
        let alloc = StateAllocator::new();
        let word = single_word(&alloc, "dog");
        assert_eq!(word.size(), 4);
        assert!(word.compute("dog").unwrap());
        assert!(!word.compute("do").unwrap());
        assert_eq!(single_word(&alloc, "").size(), 1);
        assert!(single_symbol(&alloc, 'x').compute("x").unwrap());
    }
}
