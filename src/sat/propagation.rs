#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation over two watched literals.
//!
//! Every clause is watched on two of its literals (a unit clause on its sole
//! literal, twice). A clause is only inspected when a watched literal becomes
//! false; the inspection either finds the clause satisfied, moves the watch
//! to another non-false literal, propagates the last candidate literal, or
//! reports the clause as the conflict. Watches live in the index; clause
//! literals are never reordered.
//!
//! After `propagate` returns `None` the trail is at fixpoint: every clause
//! is satisfied or has at least two unassigned literals.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::trail::{Reason, Trail};
use crate::sat::watch::Watches;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Propagator<L: Literal> {
    watches: Watches,
    /// The two literals each clause is currently watched on, by clause id.
    watched: Vec<[L; 2]>,
    num_propagations: usize,
}

impl<L: Literal> Propagator<L> {
    #[must_use]
    pub fn new(cnf: &Cnf<L>) -> Self {
        let mut propagator = Self {
            watches: Watches::new(cnf.num_vars),
            watched: Vec::with_capacity(cnf.len()),
            num_propagations: 0,
        };
        for (id, clause) in cnf.iter().enumerate() {
            propagator.attach(clause, id);
        }
        propagator
    }

    /// Installs watches for a clause: its first two literals, or its sole
    /// literal twice. Clause ids must arrive in insertion order.
    pub fn attach(&mut self, clause: &Clause<L>, id: usize) {
        debug_assert_eq!(id, self.watched.len(), "clause attached out of order");

        if clause.is_empty() {
            self.watched.push([L::default(); 2]);
            return;
        }

        let first = clause[0];
        let second = if clause.is_unit() { clause[0] } else { clause[1] };
        self.watches.watch(first, id);
        self.watches.watch(second, id);
        self.watched.push([first, second]);
    }

    /// Runs unit propagation to fixpoint. Returns the id of a falsified
    /// clause, or `None` once the trail is fully processed.
    pub fn propagate(
        &mut self,
        trail: &mut Trail<L>,
        assignment: &mut Assignment,
        cnf: &Cnf<L>,
    ) -> Option<usize> {
        while let Some(lit) = trail.next_unpropagated() {
            self.num_propagations += 1;
            let falsified = lit.negated();

            // Watch migration edits the lists while they are walked, so
            // inspect a snapshot.
            let watchers: SmallVec<[usize; 6]> =
                SmallVec::from_slice(self.watches.watchers_of(falsified));

            for &clause_id in &watchers {
                if let Some(conflict) =
                    self.inspect(clause_id, falsified, trail, assignment, cnf)
                {
                    return Some(conflict);
                }
            }
        }
        None
    }

    fn inspect(
        &mut self,
        clause_id: usize,
        falsified: L,
        trail: &mut Trail<L>,
        assignment: &mut Assignment,
        cnf: &Cnf<L>,
    ) -> Option<usize> {
        let [first, second] = self.watched[clause_id];
        let other = if first == falsified { second } else { first };

        if assignment.literal_value(other) == Some(true) {
            return None;
        }

        let replacement = cnf[clause_id]
            .iter()
            .copied()
            .find(|&l| l != falsified && l != other && assignment.literal_value(l) != Some(false));

        if let Some(replacement) = replacement {
            self.watches.unwatch(falsified, clause_id);
            self.watches.watch(replacement, clause_id);
            self.watched[clause_id] = [replacement, other];
            return None;
        }

        if assignment.literal_value(other) == Some(false) {
            return Some(clause_id);
        }

        trail.assign(other, Reason::Clause(clause_id), assignment);
        None
    }

    #[must_use]
    pub fn num_propagations(&self) -> usize {
        self.num_propagations
    }

    #[cfg(test)]
    pub(crate) fn watches(&self) -> &Watches {
        &self.watches
    }

    #[cfg(test)]
    pub(crate) fn watched_pair(&self, clause_id: usize) -> [L; 2] {
        self.watched[clause_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    fn lit(value: i32) -> PackedLiteral {
        PackedLiteral::from_dimacs(value)
    }

    fn setup(clauses: Vec<Vec<i32>>) -> (Cnf<PackedLiteral>, Trail<PackedLiteral>, Assignment) {
        let cnf: Cnf<PackedLiteral> = Cnf::new(clauses);
        let trail = Trail::new(cnf.num_vars);
        let assignment = Assignment::new(cnf.num_vars);
        (cnf, trail, assignment)
    }

    #[test]
    fn test_initial_watches() {
        let (cnf, _, _) = setup(vec![vec![1, 2, -3], vec![-1, 4], vec![2]]);
        let propagator = Propagator::new(&cnf);

        assert_eq!(propagator.watches().watchers_of(lit(1)), &[0]);
        assert_eq!(propagator.watches().watchers_of(lit(2)), &[0, 2, 2]);
        assert!(propagator.watches().watchers_of(lit(-3)).is_empty());
        assert_eq!(propagator.watches().watchers_of(lit(-1)), &[1]);
        assert_eq!(propagator.watches().watchers_of(lit(4)), &[1]);
    }

    #[test]
    fn test_propagation_chain() {
        let (cnf, mut trail, mut assignment) = setup(vec![vec![-1, 2], vec![-2, 3]]);
        let mut propagator = Propagator::new(&cnf);

        trail.new_decision_level();
        trail.assign(lit(1), Reason::Decision, &mut assignment);

        let conflict = propagator.propagate(&mut trail, &mut assignment, &cnf);
        assert_eq!(conflict, None);

        assert_eq!(trail.len(), 3);
        assert_eq!(trail[1], lit(2));
        assert_eq!(trail[2], lit(3));
        assert_eq!(trail.reason(2), Reason::Clause(0));
        assert_eq!(trail.reason(3), Reason::Clause(1));
        assert_eq!(assignment.var_value(3), Some(true));
        assert_eq!(propagator.num_propagations(), 3);
    }

    #[test]
    fn test_conflict_is_reported() {
        let (cnf, mut trail, mut assignment) = setup(vec![vec![-1, 2], vec![-1, -2]]);
        let mut propagator = Propagator::new(&cnf);

        trail.new_decision_level();
        trail.assign(lit(1), Reason::Decision, &mut assignment);

        let conflict = propagator.propagate(&mut trail, &mut assignment, &cnf);
        assert_eq!(conflict, Some(1));
    }

    #[test]
    fn test_watch_migrates_to_unassigned_literal() {
        let (cnf, mut trail, mut assignment) = setup(vec![vec![-1, 2, 3, -4]]);
        let mut propagator = Propagator::new(&cnf);

        trail.new_decision_level();
        trail.assign(lit(1), Reason::Decision, &mut assignment);

        let conflict = propagator.propagate(&mut trail, &mut assignment, &cnf);
        assert_eq!(conflict, None);
        assert_eq!(trail.len(), 1);

        assert!(propagator.watches().watchers_of(lit(-1)).is_empty());
        assert_eq!(propagator.watches().watchers_of(lit(3)), &[0]);
        assert_eq!(propagator.watches().watchers_of(lit(2)), &[0]);
        assert_eq!(propagator.watched_pair(0), [lit(3), lit(2)]);
    }

    #[test]
    fn test_clause_becomes_unit_through_unwatched_literals() {
        // Falsify the two unwatched literals first, then a watched one; the
        // single inspection must still find the unit literal.
        let (cnf, mut trail, mut assignment) = setup(vec![vec![1, 2, 3, 4]]);
        let mut propagator = Propagator::new(&cnf);

        trail.new_decision_level();
        trail.assign(lit(-3), Reason::Decision, &mut assignment);
        assert_eq!(propagator.propagate(&mut trail, &mut assignment, &cnf), None);

        trail.new_decision_level();
        trail.assign(lit(-4), Reason::Decision, &mut assignment);
        assert_eq!(propagator.propagate(&mut trail, &mut assignment, &cnf), None);

        trail.new_decision_level();
        trail.assign(lit(-1), Reason::Decision, &mut assignment);
        assert_eq!(propagator.propagate(&mut trail, &mut assignment, &cnf), None);

        assert_eq!(assignment.var_value(2), Some(true));
        assert_eq!(trail.reason(2), Reason::Clause(0));
    }

    #[test]
    fn test_falsified_unit_clause_conflicts() {
        let (cnf, mut trail, mut assignment) = setup(vec![vec![2]]);
        let mut propagator = Propagator::new(&cnf);

        trail.new_decision_level();
        trail.assign(lit(-2), Reason::Decision, &mut assignment);
        let conflict = propagator.propagate(&mut trail, &mut assignment, &cnf);
        assert_eq!(conflict, Some(0));
    }
}
