use itertools::Itertools;
use tracing::trace;

use crate::{math::Set, prelude::*};

/// Stateless algorithms over a [`NondeterministicTable`]: epsilon closures and symbol
/// transitions of single states and sets of states.
///
/// A transition on a concrete symbol first closes the origin under epsilon transitions and then
/// takes the transitions labeled with the symbol. The resulting set is **not** closed again.
#[derive(Clone, Copy, Debug)]
pub struct Traverser<'a> {
    table: &'a NondeterministicTable,
}

impl<'a> Traverser<'a> {
    /// Creates a traverser for the given table.
    pub fn new(table: &'a NondeterministicTable) -> Self {
        Self { table }
    }

    /// The table that is traversed.
    pub fn table(&self) -> &'a NondeterministicTable {
        self.table
    }

    /// All states reachable from `state` through epsilon transitions only, including `state`
    /// itself. Terminates on cycles of epsilon transitions.
    pub fn epsilon_closure(&self, state: State) -> Set<State> {
        let mut seen = Set::default();
        self.close_into(state, &mut seen);
        seen
    }

    /// The union of the epsilon closures of all given states.
    pub fn epsilon_closure_of<I: IntoIterator<Item = State>>(&self, states: I) -> Set<State> {
        let mut seen = Set::default();
        for state in states {
            self.close_into(state, &mut seen);
        }
        seen
    }

    /// Depth first search over epsilon transitions. States in `seen` are neither revisited
    /// nor expanded.
    fn close_into(&self, origin: State, seen: &mut Set<State>) {
        let mut stack = vec![origin];
        while let Some(q) = stack.pop() {
            if !seen.insert(q) {
                continue;
            }
            stack.extend(self.table.targets(q, EPSILON).filter(|p| !seen.contains(p)));
        }
    }

    /// Takes the transitions on the concrete `symbol` from every state in `from`.
    fn step(&self, from: &Set<State>, symbol: Symbol) -> Set<State> {
        debug_assert!(!symbol.is_epsilon());
        from.iter()
            .flat_map(|q| self.table.targets(*q, symbol))
            .collect()
    }

    /// For epsilon this is the epsilon closure of `state`. For a concrete symbol it is the set
    /// of states reached by a transition on `symbol` from some state in the epsilon closure of
    /// `state`.
    pub fn transition<S: Into<Symbol>>(&self, state: State, symbol: S) -> Set<State> {
        let symbol = symbol.into();
        let closure = self.epsilon_closure(state);
        if symbol.is_epsilon() {
            return closure;
        }
        self.step(&closure, symbol)
    }

    /// The union of [`Self::transition`] over all states in `states`.
    pub fn transition_set<S: Into<Symbol>>(&self, states: &Set<State>, symbol: S) -> Set<State> {
        let symbol = symbol.into();
        let closure = self.epsilon_closure_of(states.iter().copied());
        if symbol.is_epsilon() {
            return closure;
        }
        let out = self.step(&closure, symbol);
        trace!(
            "{{{}}} --{}--> {{{}}}",
            states.iter().sorted().map(|q| q.show()).join(", "),
            symbol.show(),
            out.iter().sorted().map(|q| q.show()).join(", ")
        );
        out
    }
}
