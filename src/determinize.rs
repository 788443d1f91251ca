use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::{
    math::{Bijection, Set},
    prelude::*,
};

/// Turns a (possibly nondeterministic) automaton into one with a total deterministic transition
/// table through the subset construction.
///
/// The states of the result stand for sets of states of the input, each such set is represented
/// by a [`MultiState`] and gets a freshly minted [`State`]. The correspondence is kept in a
/// bijection, so each set of input states is represented exactly once. The empty set is a
/// regular state of the result, it is the sink that unmatched input ends up in.
///
/// The number of subsets can be exponential in the number of input states. A limit can be set
/// with [`Determinizer::with_max_states`] or through [`Options::with_max_subset_states`] on the
/// input; exceeding it aborts with [`AutomatonError::TooManyStates`].
#[derive(Clone, Copy, Debug)]
pub struct Determinizer<'a> {
    alloc: &'a StateAllocator,
    max_states: Option<usize>,
}

/// The mutable bookkeeping of one run of the subset construction.
struct Construction<'n> {
    nfa_finals: &'n Set<State>,
    trailing_epsilon: TrailingEpsilon,
    limit: Option<usize>,
    subsets: Bijection<MultiState, State>,
    table: DeterministicTable,
    finals: Set<State>,
    queue: VecDeque<(MultiState, State)>,
}

impl<'n> Construction<'n> {
    /// A subset is accepting if it meets the final states of the input. When trailing epsilon
    /// transitions are followed, its epsilon closure has to meet them instead.
    fn accepting(&self, subset: &MultiState, traverser: &Traverser<'_>) -> bool {
        match self.trailing_epsilon {
            TrailingEpsilon::Follow => traverser
                .epsilon_closure_of(subset.iter())
                .iter()
                .any(|q| self.nfa_finals.contains(q)),
            TrailingEpsilon::Ignore => subset.intersects(self.nfa_finals),
        }
    }

    /// Returns the state standing for `subset`, minting and enqueueing it if it is new.
    fn state_of(
        &mut self,
        subset: MultiState,
        traverser: &Traverser<'_>,
        alloc: &StateAllocator,
    ) -> Result<State, AutomatonError> {
        if let Some(q) = self.subsets.get_by_left(&subset) {
            return Ok(*q);
        }
        if let Some(limit) = self.limit {
            if self.subsets.len() >= limit {
                warn!("subset construction aborted after {limit} states");
                return Err(AutomatonError::TooManyStates { limit });
            }
        }

        let q = alloc.mint();
        self.table.add_state(q);
        if self.accepting(&subset, traverser) {
            self.finals.insert(q);
        }
        trace!("{} stands for {}", q.show(), subset.show());
        self.subsets.insert(subset.clone(), q);
        self.queue.push_back((subset, q));
        Ok(q)
    }
}

impl<'a> Determinizer<'a> {
    /// Creates a determinizer that mints the states of its results from `alloc`.
    pub fn new(alloc: &'a StateAllocator) -> Self {
        Self {
            alloc,
            max_states: None,
        }
    }

    /// Limits the number of states of the result, this takes precedence over the limit in the
    /// [`Options`] of the input.
    pub fn with_max_states(mut self, limit: usize) -> Self {
        self.max_states = Some(limit);
        self
    }

    /// Runs the subset construction on `nfa`, which has to pass [`Automaton::validate`]. The result
    /// has a deterministic table that is total over the symbols of `nfa` and carries the same
    /// [`Options`].
    pub fn determinize(&self, nfa: &Automaton) -> Result<Automaton, AutomatonError> {
        nfa.validate()?;
        let initial = nfa.initial().ok_or(AutomatonError::MissingInitial)?;
        let table = nfa.table().to_nondeterministic();
        let traverser = Traverser::new(&table);
        let alphabet = table.symbols();

        let mut construction = Construction {
            nfa_finals: nfa.finals(),
            trailing_epsilon: nfa.options().trailing_epsilon(),
            limit: self.max_states.or(nfa.options().max_subset_states()),
            subsets: Bijection::new(),
            table: DeterministicTable::new(),
            finals: Set::default(),
            queue: VecDeque::new(),
        };

        let start = traverser.epsilon_closure(initial).into_iter().collect();
        let start = construction.state_of(start, &traverser, self.alloc)?;

        while let Some((subset, source)) = construction.queue.pop_front() {
            let members: Set<State> = subset.iter().collect();
            for symbol in alphabet.universe() {
                let image = traverser
                    .transition_set(&members, symbol)
                    .into_iter()
                    .collect();
                let target = construction.state_of(image, &traverser, self.alloc)?;
                construction.table.add_transition(source, symbol, target)?;
            }
        }

        debug!(
            "determinized {} states into {} states over {}",
            nfa.size(),
            construction.subsets.len(),
            alphabet.show()
        );
        Ok(
            Automaton::from_parts(construction.table, Some(start), construction.finals)
                .with_options(nfa.options()),
        )
    }
}

/// Determinizes `nfa` with the limit configured in its [`Options`], see [`Determinizer`].
pub fn to_dfa(alloc: &StateAllocator, nfa: &Automaton) -> Result<Automaton, AutomatonError> {
    Determinizer::new(alloc).determinize(nfa)
}
