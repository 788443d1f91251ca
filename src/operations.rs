//! Thompson-style combinators that build new automata from existing ones. Every combinator consumes
//! its operands, the states of the operands are reused without renaming.
//!
//! The binary combinators require the state sets of their operands to be disjoint, which holds
//! automatically if all operands draw their states from the same [`StateAllocator`]. Operands with
//! a deterministic table are converted to nondeterministic ones, the result is always
//! nondeterministic and carries the [`crate::Options`] of the left operand.

use tracing::debug;

use crate::prelude::*;

fn ensure_disjoint(left: &Automaton, right: &Automaton) -> Result<(), AutomatonError> {
    let count = left.states().intersection(right.states()).count();
    if count > 0 {
        return Err(AutomatonError::SharedStates { count });
    }
    Ok(())
}

fn initial_of(automaton: &Automaton) -> Result<State, AutomatonError> {
    automaton.initial().ok_or(AutomatonError::MissingInitial)
}

/// Accepts the words accepted by `left` or by `right`. A fresh initial state is minted from
/// `alloc` with epsilon transitions to both initial states, the final states of both operands
/// remain final.
pub fn union(
    alloc: &StateAllocator,
    left: Automaton,
    right: Automaton,
) -> Result<Automaton, AutomatonError> {
    ensure_disjoint(&left, &right)?;
    let (left_initial, right_initial) = (initial_of(&left)?, initial_of(&right)?);
    let options = left.options();

    let (left_table, _, left_finals) = left.into_parts();
    let (right_table, _, right_finals) = right.into_parts();
    let mut table = left_table.into_nondeterministic();
    table.absorb(right_table.into_nondeterministic());

    let start = alloc.mint();
    if !table.add_state(start) {
        return Err(AutomatonError::StaleState(start));
    }
    table.add_transition(start, EPSILON, left_initial)?;
    table.add_transition(start, EPSILON, right_initial)?;

    let out = Automaton::from_parts(table, Some(start), left_finals.into_iter().chain(right_finals))
        .with_options(options);
    debug!(
        "union of {} and {} has {} states",
        left_initial.show(),
        right_initial.show(),
        out.size()
    );
    Ok(out)
}

/// Accepts the words `uv` where `u` is accepted by `left` and `v` by `right`. The initial state of
/// `left` stays initial, every final state of `left` gets an epsilon transition to the initial
/// state of `right` and only the final states of `right` remain final.
pub fn concat(left: Automaton, right: Automaton) -> Result<Automaton, AutomatonError> {
    ensure_disjoint(&left, &right)?;
    let (left_initial, right_initial) = (initial_of(&left)?, initial_of(&right)?);
    let options = left.options();

    let (left_table, _, left_finals) = left.into_parts();
    let (right_table, _, right_finals) = right.into_parts();
    let mut table = left_table.into_nondeterministic();
    table.absorb(right_table.into_nondeterministic());
    for q in left_finals {
        table.add_transition(q, EPSILON, right_initial)?;
    }

    let out =
        Automaton::from_parts(table, Some(left_initial), right_finals).with_options(options);
    debug!("concatenation has {} states", out.size());
    Ok(out)
}

/// Accepts every concatenation of zero or more words accepted by `automaton`. The initial state
/// is kept and additionally made final, so the empty word is accepted. Every final state gets an
/// epsilon transition back to the initial state.
pub fn kleene_star(automaton: Automaton) -> Result<Automaton, AutomatonError> {
    let initial = initial_of(&automaton)?;
    let options = automaton.options();

    let (table, _, mut finals) = automaton.into_parts();
    let mut table = table.into_nondeterministic();
    for q in &finals {
        table.add_transition(*q, EPSILON, initial)?;
    }
    finals.insert(initial);

    let out = Automaton::from_parts(table, Some(initial), finals).with_options(options);
    debug!("kleene star has {} states", out.size());
    Ok(out)
}
