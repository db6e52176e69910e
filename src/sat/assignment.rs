#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tracks the truth value of every variable: true, false, or unassigned.

use crate::sat::literal::{Literal, Variable};
use crate::sat::solver::Solutions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl From<VarState> for Option<bool> {
    fn from(state: VarState) -> Self {
        match state {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }
}

/// Dense per-variable value array, indexed by variable; slot 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    states: Vec<VarState>,
}

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            states: vec![VarState::Unassigned; num_vars + 1],
        }
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.states.len() - 1
    }

    pub fn set(&mut self, var: Variable, value: bool) {
        self.states[var as usize] = VarState::Assigned(value);
    }

    pub fn unassign(&mut self, var: Variable) {
        self.states[var as usize] = VarState::Unassigned;
    }

    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        self.states[var as usize].into()
    }

    #[must_use]
    pub fn is_assigned(&self, var: Variable) -> bool {
        self.var_value(var).is_some()
    }

    /// Value of a literal under the current assignment, `None` while its
    /// variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: impl Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// Publishes the current assignment as a model. Unassigned variables are
    /// reported positive; any value for them is sound.
    #[must_use]
    pub fn solutions(&self) -> Solutions {
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let literals: Vec<i32> = (1..=self.num_vars())
            .map(|v| match self.states[v] {
                VarState::Assigned(false) => -(v as i32),
                _ => v as i32,
            })
            .collect();
        Solutions::new(&literals)
    }
}
