// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Defines a generic `Finite-State Machine` (FSM).
//!
//! The FSM operates with a state-transition table of tuples and enums. The
//! intended use case is to ensure correct state transitions, as well as holding a
//! deterministic state value.
//!
//! # References
//!
//! <https://en.wikipedia.org/wiki/Finite-state_machine>

use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Debug, Display},
    hash::Hash,
};

/// Error representing an invalid trigger for the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidStateTrigger {
    /// The current state as a string.
    pub current_state: String,
    /// The trigger as a string.
    pub trigger: String,
}

impl Display for InvalidStateTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid state transition: {} -> {}",
            self.current_state, self.trigger
        )
    }
}

impl Error for InvalidStateTrigger {}

/// Provides a generic finite state machine.
///
/// States and triggers render through their [`Display`] implementations in
/// error messages.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use renkowick_core::fsm::FiniteStateMachine;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum State {
///     Ready,
///     Running,
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Trigger {
///     Start,
/// }
///
/// impl std::fmt::Display for State {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{self:?}")
///     }
/// }
///
/// impl std::fmt::Display for Trigger {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{self:?}")
///     }
/// }
///
/// let table = HashMap::from([((State::Ready, Trigger::Start), State::Running)]);
/// let mut fsm = FiniteStateMachine::new(State::Ready, table);
///
/// fsm.trigger(Trigger::Start).unwrap();
/// assert_eq!(fsm.state(), State::Running);
/// assert!(fsm.trigger(Trigger::Start).is_err());
/// ```
pub struct FiniteStateMachine<S, T>
where
    S: Copy + Eq + Hash + Display,
    T: Copy + Eq + Hash + Display,
{
    state: S,
    state_transition_table: HashMap<(S, T), S>,
}

impl<S, T> Debug for FiniteStateMachine<S, T>
where
    S: Copy + Eq + Hash + Display + Debug,
    T: Copy + Eq + Hash + Display + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(stringify!(FiniteStateMachine))
            .field("state", &self.state)
            .field("state_transition_table", &self.state_transition_table)
            .finish()
    }
}

impl<S, T> FiniteStateMachine<S, T>
where
    S: Copy + Eq + Hash + Display,
    T: Copy + Eq + Hash + Display,
{
    /// Creates a new finite state machine.
    ///
    /// # Arguments
    ///
    /// * `initial_state` - The initial state for the FSM.
    /// * `state_transition_table` - The state-transition table for the FSM consisting of a tuple of
    ///   starting state and trigger as keys, and resulting states as values.
    ///
    /// # Panics
    ///
    /// Panics if `state_transition_table` is empty.
    #[must_use]
    pub fn new(initial_state: S, state_transition_table: HashMap<(S, T), S>) -> Self {
        assert!(
            !state_transition_table.is_empty(),
            "state_transition_table cannot be empty"
        );

        Self {
            state: initial_state,
            state_transition_table,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> S {
        self.state
    }

    /// Returns `true` if `trigger` is valid for the current state.
    #[must_use]
    pub fn can_trigger(&self, trigger: T) -> bool {
        self.state_transition_table
            .contains_key(&(self.state, trigger))
    }

    /// Process the FSM with the given trigger, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidStateTrigger`] if the state and `trigger` combination
    /// is not found in the transition table. The state is left unchanged.
    pub fn trigger(&mut self, trigger: T) -> Result<S, InvalidStateTrigger> {
        match self.state_transition_table.get(&(self.state, trigger)) {
            Some(&next_state) => {
                self.state = next_state;
                Ok(next_state)
            }
            None => Err(InvalidStateTrigger {
                current_state: self.state.to_string(),
                trigger: trigger.to_string(),
            }),
        }
    }
}
