use std::{
    fmt::Debug,
    sync::atomic::{AtomicU32, Ordering},
};

use itertools::Itertools;

use crate::{
    math::{OrderedSet, Set},
    Show,
};

/// The identity of a state. A state is nothing but an ordinal, two states are equal if and only
/// if their ordinals are equal. Whether a state is initial or final is not a property of the
/// state itself but of the [`crate::Automaton`] it is used in, see [`StateFlags`].
///
/// Fresh states should be obtained from a [`StateAllocator`], which guarantees that no ordinal
/// is handed out twice.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct State(u32);

impl State {
    /// Returns the ordinal of `self`.
    pub fn ordinal(self) -> u32 {
        self.0
    }
}

impl From<u32> for State {
    fn from(n: u32) -> Self {
        State(n)
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl Show for State {
    fn show(&self) -> String {
        format!("q{}", self.0)
    }
}

/// Hands out fresh [`State`]s with strictly increasing ordinals.
///
/// All automata that are going to be composed with each other should draw their states from
/// the same allocator, then their state sets are disjoint by construction. The counter is
/// atomic, so minting only needs a shared reference.
#[derive(Debug, Default)]
pub struct StateAllocator {
    next: AtomicU32,
}

impl StateAllocator {
    /// Creates an allocator whose first state has ordinal 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that starts counting at `first`. Useful when states with lower
    /// ordinals have been created through `State::from`.
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Mints a state that has never been returned by this allocator before.
    ///
    /// Panics once all ordinals are used up. The counter stays exhausted afterwards, so no
    /// ordinal is handed out twice even if the panic is caught.
    pub fn mint(&self) -> State {
        match self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
        {
            Ok(n) => State(n),
            Err(_) => panic!("state allocator is exhausted"),
        }
    }

    /// Mints `count` fresh states at once.
    pub fn mint_many(&self, count: usize) -> Vec<State> {
        (0..count).map(|_| self.mint()).collect()
    }

    /// The number of states minted since creation or the last [`Self::reset`].
    pub fn minted(&self) -> u32 {
        self.next.load(Ordering::Relaxed)
    }

    /// Starts counting from zero again. States minted before the reset may collide with states
    /// minted afterwards, so automata built on either side of it must not be composed.
    pub fn reset(&mut self) {
        *self.next.get_mut() = 0;
    }
}

/// The designation of a state within one automaton.
#[derive(Clone, Copy, Default, Hash, Eq, PartialEq, Debug)]
pub struct StateFlags {
    /// The state is the initial state.
    pub initial: bool,
    /// The state is a final (accepting) state.
    pub accepting: bool,
}

/// A set of states of some nondeterministic automaton, used as the label of a state during the
/// subset construction. Equality and hashing go by the content of the set.
#[derive(Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MultiState(OrderedSet<State>);

impl MultiState {
    /// Returns an iterator over the underlying states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        self.0.iter().copied()
    }

    /// Returns true if `state` is a member.
    pub fn contains(&self, state: State) -> bool {
        self.0.contains(&state)
    }

    /// Returns true if `self` and `other` have at least one state in common.
    pub fn intersects(&self, other: &Set<State>) -> bool {
        self.iter().any(|q| other.contains(&q))
    }

    /// The number of underlying states.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if this is the empty set of states.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<State> for MultiState {
    fn from_iter<T: IntoIterator<Item = State>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for MultiState {
    type Item = State;
    type IntoIter = std::collections::btree_set::IntoIter<State>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Debug for MultiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl Show for MultiState {
    fn show(&self) -> String {
        if self.0.is_empty() {
            "∅".to_string()
        } else {
            format!("{{{}}}", self.iter().map(|q| q.show()).join(", "))
        }
    }
}
