use std::borrow::Cow;

use itertools::Either;

use crate::{math::Set, prelude::*};

mod deterministic;
pub use deterministic::DeterministicTable;

mod nondeterministic;
pub use nondeterministic::NondeterministicTable;

/// The transition storage of an automaton. Both variants are keyed by a state and a symbol, they
/// differ in what they store per key: a single target in the deterministic case, a set of targets
/// (and possibly epsilon labels) in the nondeterministic case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionTable {
    /// At most one target per state and symbol, no epsilon transitions.
    Deterministic(DeterministicTable),
    /// Any number of targets per state and symbol, epsilon transitions allowed.
    Nondeterministic(NondeterministicTable),
}

impl Default for TransitionTable {
    fn default() -> Self {
        TransitionTable::Nondeterministic(NondeterministicTable::default())
    }
}

impl From<DeterministicTable> for TransitionTable {
    fn from(value: DeterministicTable) -> Self {
        TransitionTable::Deterministic(value)
    }
}

impl From<NondeterministicTable> for TransitionTable {
    fn from(value: NondeterministicTable) -> Self {
        TransitionTable::Nondeterministic(value)
    }
}

impl TransitionTable {
    /// Returns true for the deterministic variant.
    pub fn is_deterministic(&self) -> bool {
        matches!(self, TransitionTable::Deterministic(_))
    }

    /// The registered states.
    pub fn states(&self) -> &Set<State> {
        match self {
            TransitionTable::Deterministic(t) => t.states(),
            TransitionTable::Nondeterministic(t) => t.states(),
        }
    }

    /// Returns true if `state` is registered.
    pub fn contains(&self, state: State) -> bool {
        self.states().contains(&state)
    }

    /// Registers a state, returns false if it was registered already.
    pub fn add_state(&mut self, state: State) -> bool {
        match self {
            TransitionTable::Deterministic(t) => t.add_state(state),
            TransitionTable::Nondeterministic(t) => t.add_state(state),
        }
    }

    /// Unregisters a state and removes all transitions touching it.
    pub fn remove_state(&mut self, state: State) -> bool {
        match self {
            TransitionTable::Deterministic(t) => t.remove_state(state),
            TransitionTable::Nondeterministic(t) => t.remove_state(state),
        }
    }

    /// Adds a transition. For the deterministic variant an existing target is replaced and
    /// epsilon is rejected.
    pub fn add_transition(
        &mut self,
        from: State,
        symbol: Symbol,
        to: State,
    ) -> Result<(), AutomatonError> {
        match self {
            TransitionTable::Deterministic(t) => t.add_transition(from, symbol, to).map(|_| ()),
            TransitionTable::Nondeterministic(t) => t.add_transition(from, symbol, to).map(|_| ()),
        }
    }

    /// The set of targets of single transitions from `from` on `symbol`.
    pub fn successors(&self, from: State, symbol: Symbol) -> Set<State> {
        match self {
            TransitionTable::Deterministic(t) => symbol
                .as_char()
                .and_then(|c| t.transition(from, c))
                .into_iter()
                .collect(),
            TransitionTable::Nondeterministic(t) => t.transition(from, symbol),
        }
    }

    /// The concrete symbols used on transitions.
    pub fn symbols(&self) -> Alphabet {
        match self {
            TransitionTable::Deterministic(t) => t.symbols(),
            TransitionTable::Nondeterministic(t) => t.symbols(),
        }
    }

    /// Iterates over all transitions.
    pub fn edges(&self) -> impl Iterator<Item = (State, Symbol, State)> + '_ {
        match self {
            TransitionTable::Deterministic(t) => Either::Left(t.edges()),
            TransitionTable::Nondeterministic(t) => Either::Right(t.edges()),
        }
    }

    /// The number of transitions.
    pub fn size(&self) -> usize {
        match self {
            TransitionTable::Deterministic(t) => t.size(),
            TransitionTable::Nondeterministic(t) => t.size(),
        }
    }

    /// Gives a nondeterministic view on the table, which is borrowed if `self` is
    /// nondeterministic already.
    pub fn to_nondeterministic(&self) -> Cow<'_, NondeterministicTable> {
        match self {
            TransitionTable::Deterministic(t) => Cow::Owned(t.to_nondeterministic()),
            TransitionTable::Nondeterministic(t) => Cow::Borrowed(t),
        }
    }

    /// Consumes `self` and returns the equivalent nondeterministic table.
    pub fn into_nondeterministic(self) -> NondeterministicTable {
        match self {
            TransitionTable::Deterministic(t) => t.to_nondeterministic(),
            TransitionTable::Nondeterministic(t) => t,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::{math::Set, prelude::*};

    #[test_log::test]
    fn variants_agree_on_lookups() {
        let alloc = StateAllocator::new();
        let [p, q] = [alloc.mint(), alloc.mint()];

        let mut det = TransitionTable::from(DeterministicTable::with_states([p, q]));
        let mut nondet = TransitionTable::from(NondeterministicTable::with_states([p, q]));
        for table in [&mut det, &mut nondet] {
            table.add_transition(p, 'a'.into(), q).unwrap();
            table.add_transition(q, 'b'.into(), p).unwrap();
        }
        assert!(det.is_deterministic());
        assert!(!nondet.is_deterministic());

        for table in [&det, &nondet] {
            assert_eq!(table.successors(p, 'a'.into()), Set::from_iter([q]));
            assert!(table.successors(p, 'b'.into()).is_empty());
            assert!(table.successors(p, EPSILON).is_empty());
            assert_eq!(table.symbols().size(), 2);
            assert_eq!(table.size(), 2);
        }
        assert_eq!(
            det.edges().collect::<Set<_>>(),
            nondet.edges().collect::<Set<_>>()
        );
        assert_eq!(det.clone().into_nondeterministic(), *nondet.to_nondeterministic());
        assert!(matches!(nondet.to_nondeterministic(), Cow::Borrowed(_)));
        assert!(det.add_transition(p, EPSILON, q).is_err());
        assert!(nondet.add_transition(p, EPSILON, q).is_ok());
    }
}
