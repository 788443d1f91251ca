use thiserror::Error;

use crate::{State, Symbol};

/// Coarse classification of an [`AutomatonError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// An argument is not acceptable for the operation, regardless of the automaton.
    InvalidArgument,
    /// A state was referenced that is not registered with the automaton or table.
    InvalidState,
    /// The automaton as a whole is malformed and can not be run.
    InvalidMachine,
    /// The operands of a composition violate its precondition.
    PreconditionViolation,
    /// A configured limit was exceeded.
    ResourceLimit,
}

/// Everything that can go wrong when building, composing, determinizing or running an automaton.
#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("epsilon can not label a transition in a deterministic table (from {from:?})")]
    EpsilonInDeterministicTable { from: State },
    #[error("state {0:?} is not part of the automaton")]
    UnknownState(State),
    #[error("automaton has no initial state")]
    MissingInitial,
    #[error("automaton has no final states")]
    NoFinalStates,
    #[error("transition {from:?} --{symbol}--> {to:?} uses a state that is not declared")]
    UndeclaredTransition {
        from: State,
        symbol: Symbol,
        to: State,
    },
    #[error("state {0:?} is designated initial or final but not declared")]
    UndeclaredState(State),
    #[error("transition table incomplete: no transition from {state:?} on '{symbol}'")]
    IncompleteTable { state: State, symbol: char },
    #[error("freshly minted state {0:?} is already in use, the allocator was probably reset")]
    StaleState(State),
    #[error("the operands share {count} states")]
    SharedStates { count: usize },
    #[error("subset construction exceeded the limit of {limit} states")]
    TooManyStates { limit: usize },
}

impl AutomatonError {
    /// Returns the [`ErrorKind`] of `self`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AutomatonError::EpsilonInDeterministicTable { .. } => ErrorKind::InvalidArgument,
            AutomatonError::UnknownState(_) => ErrorKind::InvalidState,
            AutomatonError::MissingInitial
            | AutomatonError::NoFinalStates
            | AutomatonError::UndeclaredTransition { .. }
            | AutomatonError::UndeclaredState(_)
            | AutomatonError::IncompleteTable { .. } => ErrorKind::InvalidMachine,
            AutomatonError::SharedStates { .. } | AutomatonError::StaleState(_) => {
                ErrorKind::PreconditionViolation
            }
            AutomatonError::TooManyStates { .. } => ErrorKind::ResourceLimit,
        }
    }
}
