#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The trail: every literal currently assigned true, in assignment order,
//! together with the per-variable level and reason arrays.
//!
//! The implication graph is never materialised; it is implied by trail
//! order plus these two arrays and is reconstructed on demand during
//! conflict analysis.

use crate::sat::assignment::Assignment;
use crate::sat::literal::{Literal, Variable};
use std::ops::Index;

/// Why a variable holds its value: forced by a clause, or a free decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum Reason {
    #[default]
    Decision,
    Clause(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail<L: Literal> {
    trail: Vec<L>,
    /// Trail length at the start of each decision level.
    lim: Vec<usize>,
    /// Trail positions below this have been run through propagation.
    propagated: usize,
    level: Vec<usize>,
    reason: Vec<Reason>,
}

impl<L: Literal> Trail<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            trail: Vec::with_capacity(num_vars),
            lim: Vec::new(),
            propagated: 0,
            level: vec![0; num_vars + 1],
            reason: vec![Reason::Decision; num_vars + 1],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trail.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trail.is_empty()
    }

    #[must_use]
    pub fn decision_level(&self) -> usize {
        self.lim.len()
    }

    #[must_use]
    pub fn level(&self, var: Variable) -> usize {
        self.level[var as usize]
    }

    #[must_use]
    pub fn reason(&self, var: Variable) -> Reason {
        self.reason[var as usize]
    }

    /// Trail position where `level` began.
    #[must_use]
    pub fn level_start(&self, level: usize) -> usize {
        if level == 0 {
            0
        } else {
            self.lim[level - 1]
        }
    }

    pub fn new_decision_level(&mut self) {
        self.lim.push(self.trail.len());
    }

    /// Makes `lit` true and appends it to the trail. The variable must be
    /// unassigned; a second assignment to it is a bug in the caller.
    pub fn assign(&mut self, lit: L, reason: Reason, assignment: &mut Assignment) {
        let var = lit.variable();
        debug_assert!(
            !assignment.is_assigned(var),
            "variable {var} assigned twice"
        );

        assignment.set(var, lit.polarity());
        self.level[var as usize] = self.lim.len();
        self.reason[var as usize] = reason;
        self.trail.push(lit);
    }

    /// Next trail literal not yet run through propagation, advancing the
    /// cursor past it.
    pub fn next_unpropagated(&mut self) -> Option<L> {
        let lit = *self.trail.get(self.propagated)?;
        self.propagated += 1;
        Some(lit)
    }

    /// Pops every literal assigned above `target` level, clearing its value,
    /// level, and reason.
    pub fn undo_to(&mut self, target: usize, assignment: &mut Assignment) {
        while let Some(&lit) = self.trail.last() {
            let var = lit.variable();
            if self.level[var as usize] <= target {
                break;
            }
            assignment.unassign(var);
            self.level[var as usize] = 0;
            self.reason[var as usize] = Reason::Decision;
            self.trail.pop();
        }
        self.lim.truncate(target);
        // Propagation halts only on a conflict, and everything a conflict
        // leaves unprocessed sits at the conflicting level, above `target`.
        self.propagated = self.trail.len();
    }
}

impl<L: Literal> Index<usize> for Trail<L> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.trail[index]
    }
}
