#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The CDCL search driver.
//!
//! The loop alternates propagation and decisions. A conflict above the root
//! level is analysed into a learnt clause; the solver backjumps to the
//! clause's assertion level and propagates its asserting literal. A conflict
//! at the root level, or an empty or contradictory unit clause during
//! bootstrap, means the formula is unsatisfiable. When no unassigned
//! variable remains the current assignment is a model.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::conflict_analysis::{Analyser, Learnt};
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::propagation::Propagator;
use crate::sat::solver::{Solutions, Solver, SolverStats};
use crate::sat::trail::{Reason, Trail};
use crate::sat::variable_selection::{Activity, VariableSelection};
use log::trace;

#[derive(Debug, Clone)]
pub struct Cdcl<L: Literal = PackedLiteral, V: VariableSelection = Activity> {
    cnf: Cnf<L>,
    assignment: Assignment,
    trail: Trail<L>,
    propagator: Propagator<L>,
    analyser: Analyser,
    selector: V,
    decisions: usize,
}

impl<L: Literal, V: VariableSelection> Cdcl<L, V> {
    #[must_use]
    pub fn cnf(&self) -> &Cnf<L> {
        &self.cnf
    }

    /// Assigns every unit clause of the input at the root level. Returns
    /// `false` when the input holds an empty clause or two unit clauses
    /// that contradict each other.
    fn bootstrap(&mut self) -> bool {
        for id in 0..self.cnf.len() {
            if self.cnf[id].is_empty() {
                return false;
            }
            if !self.cnf[id].is_unit() {
                continue;
            }
            let lit = self.cnf[id][0];
            match self.assignment.literal_value(lit) {
                None => self.trail.assign(lit, Reason::Clause(id), &mut self.assignment),
                Some(false) => return false,
                Some(true) => {}
            }
        }
        true
    }

    /// Ingests a learnt clause, backjumps, and asserts its first literal
    /// with the new clause as reason.
    fn learn(&mut self, learnt: Learnt<L>) {
        let asserting = learnt.clause[0];
        trace!(
            "learnt clause of length {}, backjumping to level {}",
            learnt.clause.len(),
            learnt.backjump
        );

        let id = self.cnf.add_clause(learnt.clause);
        self.propagator.attach(&self.cnf[id], id);
        self.trail.undo_to(learnt.backjump, &mut self.assignment);
        self.trail
            .assign(asserting, Reason::Clause(id), &mut self.assignment);
    }
}

impl<L: Literal, V: VariableSelection> Solver<L> for Cdcl<L, V> {
    fn new(cnf: Cnf<L>) -> Self {
        Self {
            assignment: Assignment::new(cnf.num_vars),
            trail: Trail::new(cnf.num_vars),
            propagator: Propagator::new(&cnf),
            analyser: Analyser::new(cnf.num_vars),
            selector: V::new(cnf.num_vars),
            decisions: 0,
            cnf,
        }
    }

    fn solve(&mut self) -> Option<Solutions> {
        if !self.bootstrap() {
            return None;
        }

        loop {
            if let Some(conflict) =
                self.propagator
                    .propagate(&mut self.trail, &mut self.assignment, &self.cnf)
            {
                if self.trail.decision_level() == 0 {
                    return None;
                }
                let (learnt, to_bump) = self.analyser.analyse(&self.cnf, &self.trail, conflict);
                self.selector.bumps(to_bump);
                self.learn(learnt);
            } else if let Some(var) = self.selector.pick(&self.assignment) {
                self.decisions += 1;
                self.trail.new_decision_level();
                self.trail
                    .assign(L::new(var, true), Reason::Decision, &mut self.assignment);
            } else {
                return Some(self.assignment.solutions());
            }
        }
    }

    fn stats(&self) -> SolverStats {
        SolverStats {
            conflicts: self.analyser.num_conflicts(),
            decisions: self.decisions,
            propagations: self.propagator.num_propagations(),
            learnt_clauses: self.cnf.learnt_len(),
        }
    }
}
