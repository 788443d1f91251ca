use std::fmt::Debug;

use tracing::trace;

use crate::{math::Set, prelude::*};

mod show;

/// A finite automaton over characters. It consists of a [`TransitionTable`], which also holds
/// the set of declared states, at most one initial state and a set of final states.
///
/// Automata are usually built from freshly minted states (see [`StateAllocator`]), composed with
/// the functions in [`crate::operations`] and possibly determinized with a [`Determinizer`].
/// Whether a state is initial or final is recorded here and not on the state, so the same
/// [`State`] can be used in several automata without them influencing each other.
///
/// # Example
/// The automaton for `(ab)?e*`:
/// ```
/// use finite_automata::prelude::*;
///
/// let alloc = StateAllocator::new();
/// let [s0, s1, s2, s3] = [alloc.mint(), alloc.mint(), alloc.mint(), alloc.mint()];
/// let mut nfa = Automaton::new();
/// nfa.add_states([s0, s1, s2, s3]);
/// nfa.add_transition(s0, 'a', s1)?;
/// nfa.add_transition(s1, 'b', s2)?;
/// nfa.add_transition(s2, 'e', s3)?;
/// nfa.add_transition(s3, 'e', s3)?;
/// nfa.add_transition(s0, EPSILON, s3)?;
/// nfa.make_initial(s0)?;
/// nfa.make_final(s2)?;
/// nfa.make_final(s3)?;
///
/// assert!(nfa.compute("abeee")?);
/// assert!(!nfa.compute("jake")?);
/// # Ok::<(), AutomatonError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton {
    table: TransitionTable,
    initial: Option<State>,
    finals: Set<State>,
    options: Options,
}

impl Default for Automaton {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton {
    /// Creates an empty automaton with a nondeterministic transition table.
    pub fn new() -> Self {
        Self::from_parts(NondeterministicTable::new(), None, [])
    }

    /// Creates an empty automaton with a deterministic transition table.
    pub fn deterministic() -> Self {
        Self::from_parts(DeterministicTable::new(), None, [])
    }

    /// Assembles an automaton from its constituent parts. Nothing is checked here, inconsistencies
    /// such as a final state that is not declared are reported by [`Self::validate`].
    pub fn from_parts<T, I>(table: T, initial: Option<State>, finals: I) -> Self
    where
        T: Into<TransitionTable>,
        I: IntoIterator<Item = State>,
    {
        Self {
            table: table.into(),
            initial,
            finals: finals.into_iter().collect(),
            options: Options::default(),
        }
    }

    /// Decomposes `self` into its table, initial state and final states.
    pub fn into_parts(self) -> (TransitionTable, Option<State>, Set<State>) {
        (self.table, self.initial, self.finals)
    }

    /// Replaces the [`Options`] of `self`.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// The [`Options`] of `self`.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Replaces the [`Options`] of `self` in place.
    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Declares a single state, returns false if it was declared already.
    pub fn add_state(&mut self, state: State) -> bool {
        self.table.add_state(state)
    }

    /// Declares all given states.
    pub fn add_states<I: IntoIterator<Item = State>>(&mut self, states: I) -> &mut Self {
        for state in states {
            self.add_state(state);
        }
        self
    }

    /// Removes a declared state with all transitions touching it. If the state was initial or
    /// final, that designation is dropped too.
    pub fn remove_state(&mut self, state: State) -> Result<(), AutomatonError> {
        if !self.table.remove_state(state) {
            return Err(AutomatonError::UnknownState(state));
        }
        if self.initial == Some(state) {
            self.initial = None;
        }
        self.finals.remove(&state);
        Ok(())
    }

    fn ensure_declared(&self, state: State) -> Result<(), AutomatonError> {
        if self.table.contains(state) {
            Ok(())
        } else {
            Err(AutomatonError::UnknownState(state))
        }
    }

    /// Makes `state` the initial state, a previously initial state loses that designation.
    pub fn make_initial(&mut self, state: State) -> Result<(), AutomatonError> {
        self.ensure_declared(state)?;
        self.initial = Some(state);
        Ok(())
    }

    /// Removes the initial designation, returns the state that was initial.
    pub fn clear_initial(&mut self) -> Option<State> {
        self.initial.take()
    }

    /// Makes `state` a final state.
    pub fn make_final(&mut self, state: State) -> Result<(), AutomatonError> {
        self.ensure_declared(state)?;
        self.finals.insert(state);
        Ok(())
    }

    /// Reverts `state` to a non-final state.
    pub fn clear_final(&mut self, state: State) -> Result<(), AutomatonError> {
        self.ensure_declared(state)?;
        self.finals.remove(&state);
        Ok(())
    }

    /// Adds a transition between two declared states.
    pub fn add_transition<S: Into<Symbol>>(
        &mut self,
        from: State,
        symbol: S,
        to: State,
    ) -> Result<(), AutomatonError> {
        self.table.add_transition(from, symbol.into(), to)
    }

    /// The declared states.
    pub fn states(&self) -> &Set<State> {
        self.table.states()
    }

    /// The initial state, if one is set.
    pub fn initial(&self) -> Option<State> {
        self.initial
    }

    /// The final states.
    pub fn finals(&self) -> &Set<State> {
        &self.finals
    }

    /// The symbols used on transitions, epsilon excluded.
    pub fn symbols(&self) -> Alphabet {
        self.table.symbols()
    }

    /// The underlying transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Returns true if the transition table is deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.table.is_deterministic()
    }

    /// The number of declared states.
    pub fn size(&self) -> usize {
        self.states().len()
    }

    /// How `state` is designated in `self`, or `None` if it is not declared.
    pub fn flags(&self, state: State) -> Option<StateFlags> {
        if !self.table.contains(state) {
            return None;
        }
        Some(StateFlags {
            initial: self.initial == Some(state),
            accepting: self.finals.contains(&state),
        })
    }

    /// Checks that `self` can be run: an initial state must be set, there must be at least one
    /// final state and the table as well as the designations must only refer to declared states.
    /// Deterministic tables must moreover be complete with respect to their symbols.
    pub fn validate(&self) -> Result<(), AutomatonError> {
        let initial = self.initial.ok_or(AutomatonError::MissingInitial)?;
        if self.finals.is_empty() {
            return Err(AutomatonError::NoFinalStates);
        }
        if let Some(q) = std::iter::once(initial)
            .chain(self.finals.iter().copied())
            .filter(|q| !self.table.contains(*q))
            .min()
        {
            return Err(AutomatonError::UndeclaredState(q));
        }
        if let Some((from, symbol, to)) = self
            .table
            .edges()
            .filter(|(p, _, q)| !self.table.contains(*p) || !self.table.contains(*q))
            .min()
        {
            return Err(AutomatonError::UndeclaredTransition { from, symbol, to });
        }
        if let TransitionTable::Deterministic(table) = &self.table {
            table.check_complete(&table.symbols())?;
        }
        Ok(())
    }

    /// Validates `self` and decides whether `input` is accepted.
    pub fn compute(&self, input: &str) -> Result<bool, AutomatonError> {
        self.validate()?;
        Ok(self.run(input))
    }

    /// Validates `self` and seals it, the result can only be run and inspected.
    pub fn finish(self) -> Result<FinishedAutomaton, AutomatonError> {
        self.validate()?;
        Ok(FinishedAutomaton(self))
    }

    /// Runs `input`, assuming that `self` has been validated.
    fn run(&self, input: &str) -> bool {
        let Some(initial) = self.initial else {
            return false;
        };
        match &self.table {
            TransitionTable::Deterministic(table) => {
                let mut current = initial;
                for c in input.chars() {
                    match table.transition(current, c) {
                        Some(next) => current = next,
                        None => {
                            trace!("no transition from {} on {c}", current.show());
                            return false;
                        }
                    }
                }
                self.finals.contains(&current)
            }
            TransitionTable::Nondeterministic(table) => {
                let traverser = Traverser::new(table);
                let mut current = traverser.epsilon_closure(initial);
                for c in input.chars() {
                    current = traverser.transition_set(&current, c);
                    if current.is_empty() {
                        trace!("frontier is empty after reading {c}");
                        return false;
                    }
                }
                if self.options.trailing_epsilon() == TrailingEpsilon::Follow {
                    current = traverser.epsilon_closure_of(current);
                }
                current.iter().any(|q| self.finals.contains(q))
            }
        }
    }

    /// Builds the automaton for the union of the languages of `self` and `other`, see
    /// [`operations::union`].
    pub fn union(self, other: Automaton, alloc: &StateAllocator) -> Result<Self, AutomatonError> {
        operations::union(alloc, self, other)
    }

    /// Builds the automaton for the concatenation of the languages of `self` and `other`, see
    /// [`operations::concat`].
    pub fn concat(self, other: Automaton) -> Result<Self, AutomatonError> {
        operations::concat(self, other)
    }

    /// Builds the automaton for the Kleene closure of the language of `self`, see
    /// [`operations::kleene_star`].
    pub fn star(self) -> Result<Self, AutomatonError> {
        operations::kleene_star(self)
    }

    /// Determinizes `self`, see [`Determinizer`].
    pub fn determinize(&self, alloc: &StateAllocator) -> Result<Self, AutomatonError> {
        Determinizer::new(alloc).determinize(self)
    }
}

impl Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

/// An [`Automaton`] that has been validated and can no longer be modified.
#[derive(Clone, PartialEq, Eq)]
pub struct FinishedAutomaton(Automaton);

impl FinishedAutomaton {
    /// Decides whether `input` is accepted.
    pub fn compute(&self, input: &str) -> bool {
        self.0.run(input)
    }

    /// Read access to the underlying automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.0
    }

    /// Gives back the underlying automaton for further modification.
    pub fn into_inner(self) -> Automaton {
        self.0
    }
}

impl Debug for FinishedAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{math::Set, prelude::*};

    /// `(ab)?e*`
    fn optional_ab_then_es(alloc: &StateAllocator) -> Automaton {
        let [s0, s1, s2, s3] = [alloc.mint(), alloc.mint(), alloc.mint(), alloc.mint()];
        let mut nfa = Automaton::new();
        nfa.add_states([s0, s1, s2, s3]);
        nfa.add_transition(s0, 'a', s1).unwrap();
        nfa.add_transition(s1, 'b', s2).unwrap();
        nfa.add_transition(s2, 'e', s3).unwrap();
        nfa.add_transition(s3, 'e', s3).unwrap();
        nfa.add_transition(s0, EPSILON, s3).unwrap();
        nfa.make_initial(s0).unwrap();
        nfa.make_final(s2).unwrap();
        nfa.make_final(s3).unwrap();
        nfa
    }

    #[test_log::test]
    fn optional_prefix_with_loop() {
        let alloc = StateAllocator::new();
        let nfa = optional_ab_then_es(&alloc);
        for word in ["", "ab", "abe", "abeeeeeeeeee", "eeee"] {
            assert!(nfa.compute(word).unwrap(), "{word} should be accepted");
        }
        for word in ["jake", "a", "abab", "ba", "eab"] {
            assert!(!nfa.compute(word).unwrap(), "{word} should be rejected");
        }
        assert_eq!(nfa.symbols().universe().collect::<String>(), "abe");
    }

    /// `(abe*|doh*)+` with `s` as initial state.
    fn words_with_loops(alloc: &StateAllocator) -> (Automaton, State) {
        let [s, a, b, e, d, o, h] = [
            alloc.mint(),
            alloc.mint(),
            alloc.mint(),
            alloc.mint(),
            alloc.mint(),
            alloc.mint(),
            alloc.mint(),
        ];
        let mut nfa = Automaton::new();
        nfa.add_states([s, a, b, e, d, o, h]);
        nfa.make_initial(s).unwrap();
        nfa.add_transition(a, 'a', b).unwrap();
        nfa.add_transition(b, 'b', e).unwrap();
        nfa.add_transition(e, 'e', e).unwrap();
        nfa.make_final(e).unwrap();
        nfa.add_transition(d, 'd', o).unwrap();
        nfa.add_transition(o, 'o', h).unwrap();
        nfa.add_transition(h, 'h', h).unwrap();
        nfa.make_final(h).unwrap();
        nfa.add_transition(s, EPSILON, a).unwrap();
        nfa.add_transition(s, EPSILON, d).unwrap();
        nfa.add_transition(e, EPSILON, s).unwrap();
        nfa.add_transition(h, EPSILON, s).unwrap();
        assert_eq!(nfa.finals(), &Set::from_iter([e, h]));
        (nfa, s)
    }

    #[test_log::test]
    fn epsilon_loops_between_words() {
        let alloc = StateAllocator::new();
        let (mut nfa, s) = words_with_loops(&alloc);

        for word in [
            "ab",
            "abeee",
            "do",
            "dohhhh",
            "dohabedohabe",
            "dohdohdohdohdoh",
            "abeeedohabeedohhdohhhhabeeeeeeeeedohdohdoh",
            "abdoabdoababababdododoabeedodoabeeedohhhdododododododohhhh",
        ] {
            assert!(nfa.compute(word).unwrap(), "{word} should be accepted");
        }
        for word in ["haha", "doo", "d", "a", "aaa", "ddd", "jake", " "] {
            assert!(!nfa.compute(word).unwrap(), "{word} should be rejected");
        }

        assert!(!nfa.compute("").unwrap());
        nfa.make_final(s).unwrap();
        assert!(nfa.compute("").unwrap());
        nfa.clear_final(s).unwrap();
        assert!(!nfa.compute("").unwrap());
    }

    #[test_log::test]
    fn designations() {
        let alloc = StateAllocator::new();
        let [p, q] = [alloc.mint(), alloc.mint()];
        let mut nfa = Automaton::new();
        nfa.add_states([p, q]);

        nfa.make_initial(p).unwrap();
        nfa.make_initial(q).unwrap();
        assert_eq!(nfa.initial(), Some(q));
        assert_eq!(
            nfa.flags(p),
            Some(StateFlags {
                initial: false,
                accepting: false
            })
        );
        nfa.make_final(p).unwrap();
        assert_eq!(
            nfa.flags(p),
            Some(StateFlags {
                initial: false,
                accepting: true
            })
        );
        assert!(nfa.flags(q).unwrap().initial);
        assert_eq!(nfa.flags(alloc.mint()), None);
        assert_eq!(nfa.clear_initial(), Some(q));
        assert_eq!(nfa.initial(), None);
    }

    #[test_log::test]
    fn flags_are_local_to_the_automaton() {
        let alloc = StateAllocator::new();
        let [p, q] = [alloc.mint(), alloc.mint()];
        let mut first = Automaton::new();
        first.add_states([p, q]);
        let mut second = first.clone();

        first.make_final(q).unwrap();
        second.make_initial(q).unwrap();
        assert!(!first.flags(q).unwrap().initial);
        assert!(!second.flags(q).unwrap().accepting);
    }

    #[test_log::test]
    fn mutators_reject_unknown_states() {
        let alloc = StateAllocator::new();
        let mut nfa = optional_ab_then_es(&alloc);
        let stranger = alloc.mint();
        let known = nfa.initial().unwrap();

        for result in [
            nfa.make_initial(stranger),
            nfa.make_final(stranger),
            nfa.clear_final(stranger),
            nfa.add_transition(known, 'x', stranger),
            nfa.add_transition(stranger, 'x', known),
            nfa.remove_state(stranger),
        ] {
            assert_eq!(result, Err(AutomatonError::UnknownState(stranger)));
        }
        assert_eq!(nfa.initial(), Some(known));
        assert!(!nfa.symbols().contains('x'));
    }

    #[test_log::test]
    fn validation() {
        let alloc = StateAllocator::new();
        let [p, q] = [alloc.mint(), alloc.mint()];
        let mut nfa = Automaton::new();
        nfa.add_states([p, q]);
        nfa.add_transition(p, 'a', q).unwrap();

        assert_eq!(nfa.compute("a"), Err(AutomatonError::MissingInitial));
        nfa.make_initial(p).unwrap();
        assert_eq!(nfa.compute("a"), Err(AutomatonError::NoFinalStates));
        nfa.make_final(q).unwrap();
        assert_eq!(nfa.compute("a"), Ok(true));

        let stranger = alloc.mint();
        let broken = Automaton::from_parts(
            NondeterministicTable::from_edges([p, q], [(p, Symbol::Char('a'), stranger)]),
            Some(p),
            [q],
        );
        let err = broken.compute("a").unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UndeclaredTransition {
                from: p,
                symbol: Symbol::Char('a'),
                to: stranger
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidMachine);

        let broken = Automaton::from_parts(NondeterministicTable::with_states([p]), Some(p), [q]);
        assert_eq!(broken.validate(), Err(AutomatonError::UndeclaredState(q)));
    }

    #[test_log::test]
    fn trailing_epsilon() {
        let alloc = StateAllocator::new();
        let [p, q, r] = [alloc.mint(), alloc.mint(), alloc.mint()];
        let mut nfa = Automaton::new();
        nfa.add_states([p, q, r]);
        nfa.add_transition(p, 'a', q).unwrap();
        nfa.add_transition(q, EPSILON, r).unwrap();
        nfa.make_initial(p).unwrap();
        nfa.make_final(r).unwrap();

        assert_eq!(nfa.options().trailing_epsilon(), TrailingEpsilon::Follow);
        assert!(nfa.compute("a").unwrap());

        let legacy =
            nfa.with_options(Options::default().with_trailing_epsilon(TrailingEpsilon::Ignore));
        assert!(!legacy.compute("a").unwrap());
        assert!(!legacy.compute("").unwrap());
    }

    #[test_log::test]
    fn deterministic_table() {
        let alloc = StateAllocator::new();
        let [even, odd] = [alloc.mint(), alloc.mint()];
        let mut dfa = Automaton::deterministic();
        dfa.add_states([even, odd]);
        dfa.make_initial(even).unwrap();
        dfa.make_final(even).unwrap();
        dfa.add_transition(even, 'a', odd).unwrap();

        assert_eq!(
            dfa.compute("aa"),
            Err(AutomatonError::IncompleteTable {
                state: odd,
                symbol: 'a'
            })
        );
        dfa.add_transition(odd, 'a', even).unwrap();
        assert!(dfa.is_deterministic());
        assert!(dfa.compute("").unwrap());
        assert!(!dfa.compute("a").unwrap());
        assert!(dfa.compute("aaaa").unwrap());
        assert!(!dfa.compute("ab").unwrap());
        assert_eq!(
            dfa.add_transition(even, EPSILON, odd).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test_log::test]
    fn removing_states() {
        let alloc = StateAllocator::new();
        let mut nfa = optional_ab_then_es(&alloc);
        let initial = nfa.initial().unwrap();
        let size = nfa.size();

        let finals = nfa.finals().iter().copied().collect::<Vec<_>>();
        nfa.remove_state(finals[0]).unwrap();
        assert_eq!(nfa.size(), size - 1);
        assert_eq!(nfa.finals().len(), 1);
        assert!(nfa.table().edges().all(|(p, _, q)| p != finals[0] && q != finals[0]));

        nfa.remove_state(initial).unwrap();
        assert_eq!(nfa.initial(), None);
        assert_eq!(nfa.compute(""), Err(AutomatonError::MissingInitial));
    }

    #[test_log::test]
    fn finished_automata_only_compute() {
        let alloc = StateAllocator::new();
        let nfa = optional_ab_then_es(&alloc);
        let finished = nfa.clone().finish().unwrap();
        assert!(finished.compute("abe"));
        assert!(!finished.compute("b"));
        assert_eq!(finished.automaton(), &nfa);
        assert_eq!(finished.into_inner(), nfa);

        assert!(Automaton::new().finish().is_err());
    }

    #[test_log::test]
    fn shows_a_transition_table() {
        let alloc = StateAllocator::new();
        let nfa = optional_ab_then_es(&alloc);
        let shown = format!("{:?}", nfa);
        assert!(shown.contains('ε'));
        assert!(shown.contains('→'));
        assert!(shown.contains('*'));
        for q in nfa.states() {
            assert!(shown.contains(&q.show()));
        }
    }
}
