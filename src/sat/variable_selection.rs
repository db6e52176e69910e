#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching heuristics: which unassigned variable to decide on next.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;

pub trait VariableSelection {
    fn new(num_vars: usize) -> Self;

    /// An unassigned variable to branch on, or `None` when every variable
    /// is assigned.
    fn pick(&self, assignment: &Assignment) -> Option<Variable>;

    fn bump(&mut self, var: Variable);

    fn bumps<I: IntoIterator<Item = Variable>>(&mut self, vars: I) {
        for var in vars {
            self.bump(var);
        }
    }
}

const RESCALE_THRESHOLD: f64 = 1e100;
const RESCALE_FACTOR: f64 = 1e-100;

/// Conflict-driven activity ordering. Variables touched by conflict
/// analysis accumulate score; the unassigned variable with the highest
/// score is branched on, ties going to the smallest index. While no
/// variable has been bumped yet this degrades to smallest-index-first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Activity {
    scores: Vec<f64>,
    inc: f64,
}

impl VariableSelection for Activity {
    fn new(num_vars: usize) -> Self {
        Self {
            scores: vec![0.0; num_vars + 1],
            inc: 1.0,
        }
    }

    fn pick(&self, assignment: &Assignment) -> Option<Variable> {
        let mut best = None;
        let mut best_score = -1.0;

        for var in 1..self.scores.len() {
            #[allow(clippy::cast_possible_truncation)]
            let var = var as Variable;
            if !assignment.is_assigned(var) && self.scores[var as usize] > best_score {
                best_score = self.scores[var as usize];
                best = Some(var);
            }
        }
        best
    }

    fn bump(&mut self, var: Variable) {
        self.scores[var as usize] += self.inc;
        if self.scores[var as usize] > RESCALE_THRESHOLD {
            for score in &mut self.scores {
                *score *= RESCALE_FACTOR;
            }
            self.inc *= RESCALE_FACTOR;
        }
    }
}

/// Smallest unassigned index first; conflict activity is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FixedOrder {
    num_vars: usize,
}

impl VariableSelection for FixedOrder {
    fn new(num_vars: usize) -> Self {
        Self { num_vars }
    }

    fn pick(&self, assignment: &Assignment) -> Option<Variable> {
        #[allow(clippy::cast_possible_truncation)]
        let last = self.num_vars as Variable;
        (1..=last).find(|&v| !assignment.is_assigned(v))
    }

    fn bump(&mut self, _: Variable) {}
}
