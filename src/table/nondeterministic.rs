use crate::{
    math::{Map, Set},
    prelude::*,
};

/// Maps pairs of a state and a [`Symbol`] (epsilon included) to a set of target states. There is
/// no completeness requirement, a missing entry simply means that no transition exists.
///
/// The table keeps track of the states registered with it, transitions can only be added
/// between registered states.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct NondeterministicTable {
    states: Set<State>,
    edges: Map<(State, Symbol), Set<State>>,
}

impl NondeterministicTable {
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

    /// Assembles a table from registered states and edges **without** checking that the edges
    /// only touch registered states. Use [`crate::Automaton::validate`] to find out.
    pub fn from_edges<I, J>(states: I, edges: J) -> Self
    where
        I: IntoIterator<Item = State>,
        J: IntoIterator<Item = (State, Symbol, State)>,
    {
        let mut table = Self::with_states(states);
        for (from, symbol, to) in edges {
            table.edges.entry((from, symbol)).or_default().insert(to);
        }
        table
    }

    /// Registers a state, returns false if it was registered already.
    pub fn add_state(&mut self, state: State) -> bool {
        self.states.insert(state)
    }

    /// Unregisters a state and drops every transition that leaves or reaches it. Returns false
    /// if the state was not registered.
    pub fn remove_state(&mut self, state: State) -> bool {
        if !self.states.remove(&state) {
            return false;
        }
        self.edges.retain(|(from, _), targets| {
            targets.remove(&state);
            *from != state && !targets.is_empty()
        });
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

    /// Adds a transition from `from` to `to` on `symbol`. Transitions on the same pair of state and
    /// symbol accumulate. Fails if one of the endpoints is not registered, returns whether the
    /// transition is new otherwise.
    pub fn add_transition<S: Into<Symbol>>(
        &mut self,
        from: State,
        symbol: S,
        to: State,
    ) -> Result<bool, AutomatonError> {
        for q in [from, to] {
            if !self.contains(q) {
                return Err(AutomatonError::UnknownState(q));
            }
        }
        Ok(self
            .edges
            .entry((from, symbol.into()))
            .or_default()
            .insert(to))
    }

    /// The set of states that `from` reaches by a single transition on `symbol`, this is empty
    /// if there is no such transition. Epsilon is treated as an ordinary label here, for
    /// closures see [`crate::Traverser`].
    pub fn transition<S: Into<Symbol>>(&self, from: State, symbol: S) -> Set<State> {
        self.targets(from, symbol.into()).collect()
    }

    /// Iterates over the targets of transitions leaving `from` on `symbol`.
    pub fn targets(&self, from: State, symbol: Symbol) -> impl Iterator<Item = State> + '_ {
        self.edges
            .get(&(from, symbol))
            .into_iter()
            .flat_map(|targets| targets.iter().copied())
    }

    /// The concrete symbols that appear on some transition.
    pub fn symbols(&self) -> Alphabet {
        self.edges.keys().map(|(_, symbol)| *symbol).collect()
    }

    /// Iterates over all transitions as triples of source, symbol and target.
    pub fn edges(&self) -> impl Iterator<Item = (State, Symbol, State)> + '_ {
        self.edges.iter().flat_map(|((from, symbol), targets)| {
            targets.iter().map(move |to| (*from, *symbol, *to))
        })
    }

    /// The total number of transitions.
    pub fn size(&self) -> usize {
        self.edges.values().map(|targets| targets.len()).sum()
    }

    /// Moves all states and transitions of `other` into `self`.
    pub fn absorb(&mut self, other: NondeterministicTable) {
        self.states.extend(other.states);
        for (key, targets) in other.edges {
            self.edges.entry(key).or_default().extend(targets);
        }
    }
}
