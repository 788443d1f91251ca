use itertools::Itertools;

use crate::{
    math::{Map, Set},
    prelude::*,
};

/// Maps pairs of a state and a concrete character to exactly one target state. Epsilon labels
/// are not allowed.
///
/// Such a table is only well-formed once every pair of a registered state and a symbol of the
/// alphabet has an entry, see [`DeterministicTable::check_complete`].
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DeterministicTable {
    states: Set<State>,
    edges: Map<(State, char), State>,
}

impl DeterministicTable {
    /// Creates an empty table without any states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table in which the given states are registered.
    pub fn with_states<I: IntoIterator<Item = State>>(states: I) -> Self {
        Self {
            states: states.into_iter().collect(),
            edges: Map::default(),
        }
    }

    /// Registers a state, returns false if it was registered already.
    pub fn add_state(&mut self, state: State) -> bool {
        self.states.insert(state)
    }

    /// Unregisters a state together with all transitions leaving or reaching it.
    pub fn remove_state(&mut self, state: State) -> bool {
        if !self.states.remove(&state) {
            return false;
        }
        self.edges
            .retain(|(from, _), to| *from != state && *to != state);
        true
    }

    /// Returns true if `state` is registered.
    pub fn contains(&self, state: State) -> bool {
        self.states.contains(&state)
    }

    /// The registered states.
    pub fn states(&self) -> &Set<State> {
        &self.states
    }

    /// Sets the target of `from` on `symbol` to `to` and returns the target that was replaced,
    /// if any.
    pub fn add_transition<S: Into<Symbol>>(
        &mut self,
        from: State,
        symbol: S,
        to: State,
    ) -> Result<Option<State>, AutomatonError> {
        let Some(c) = symbol.into().as_char() else {
            return Err(AutomatonError::EpsilonInDeterministicTable { from });
        };
        for q in [from, to] {
            if !self.contains(q) {
                return Err(AutomatonError::UnknownState(q));
            }
        }
        Ok(self.edges.insert((from, c), to))
    }

    /// The successor of `from` on `symbol`. `None` means that there is no such transition.
    pub fn transition(&self, from: State, symbol: char) -> Option<State> {
        self.edges.get(&(from, symbol)).copied()
    }

    /// The symbols that appear on some transition.
    pub fn symbols(&self) -> Alphabet {
        self.edges.keys().map(|(_, c)| *c).collect()
    }

    /// Iterates over all transitions as triples of source, symbol and target.
    pub fn edges(&self) -> impl Iterator<Item = (State, Symbol, State)> + '_ {
        self.edges
            .iter()
            .map(|((from, c), to)| (*from, Symbol::Char(*c), *to))
    }

    /// The total number of transitions.
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// Verifies that every registered state has a transition on every symbol of `alphabet`. The
    /// first gap in the order of states and symbols is reported.
    pub fn check_complete(&self, alphabet: &Alphabet) -> Result<(), AutomatonError> {
        for state in self.states.iter().sorted() {
            for symbol in alphabet.universe() {
                if !self.edges.contains_key(&(*state, symbol)) {
                    return Err(AutomatonError::IncompleteTable {
                        state: *state,
                        symbol,
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns true if [`Self::check_complete`] succeeds for the table's own symbols.
    pub fn is_complete(&self) -> bool {
        self.check_complete(&self.symbols()).is_ok()
    }

    /// Builds the equivalent [`NondeterministicTable`], every target becomes a singleton set.
    pub fn to_nondeterministic(&self) -> NondeterministicTable {
        NondeterministicTable::from_edges(self.states.iter().copied(), self.edges())
    }
}
