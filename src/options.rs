/// Decides what happens with epsilon transitions that leave the frontier after the last symbol of
/// the input has been consumed.
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Hash)]
pub enum TrailingEpsilon {
    /// The frontier is closed under epsilon transitions once more before it is checked for final
    /// states. A final state that is only reachable through epsilon edges after the last symbol
    /// leads to acceptance.
    #[default]
    Follow,
    /// The frontier is checked as it is after consuming the last symbol. Epsilon edges are only
    /// followed before a symbol is consumed, so a trailing epsilon path into a final state is not
    /// taken into account.
    Ignore,
}

/// Configuration that travels with an [`crate::Automaton`]. Composition results inherit the
/// options of their left (or only) operand, determinization passes them on to its output.
///
/// ```
/// use finite_automata::prelude::*;
///
/// let options = Options::default()
///     .with_trailing_epsilon(TrailingEpsilon::Ignore)
///     .with_max_subset_states(1 << 12);
/// assert_eq!(options.max_subset_states(), Some(4096));
/// ```
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq, Hash)]
pub struct Options {
    trailing_epsilon: TrailingEpsilon,
    max_subset_states: Option<usize>,
}

impl Options {
    /// Sets the treatment of trailing epsilon transitions during simulation.
    pub fn with_trailing_epsilon(mut self, trailing_epsilon: TrailingEpsilon) -> Self {
        self.trailing_epsilon = trailing_epsilon;
        self
    }

    /// Caps the number of states the subset construction may create.
    pub fn with_max_subset_states(mut self, limit: usize) -> Self {
        self.max_subset_states = Some(limit);
        self
    }

    /// Removes the cap on the number of states created by the subset construction.
    pub fn unbounded(mut self) -> Self {
        self.max_subset_states = None;
        self
    }

    /// The configured treatment of trailing epsilon transitions.
    pub fn trailing_epsilon(&self) -> TrailingEpsilon {
        self.trailing_epsilon
    }

    /// The configured cap on subset states, if any.
    pub fn max_subset_states(&self) -> Option<usize> {
        self.max_subset_states
    }
}
