#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Dense watcher index: for every literal, the clauses that must be
//! inspected when that literal becomes false.

use crate::sat::literal::Literal;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Watches(Vec<SmallVec<[usize; 6]>>);

impl Watches {
    /// Sized for both polarities of every variable in `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![SmallVec::new(); 2 * (num_vars + 1)])
    }

    pub fn watch<L: Literal>(&mut self, lit: L, clause_id: usize) {
        self.0[lit.index()].push(clause_id);
    }

    /// Removes one occurrence of `clause_id` from the list for `lit`.
    pub fn unwatch<L: Literal>(&mut self, lit: L, clause_id: usize) {
        let list = &mut self.0[lit.index()];
        if let Some(pos) = list.iter().position(|&id| id == clause_id) {
            list.swap_remove(pos);
        }
    }

    #[must_use]
    pub fn watchers_of<L: Literal>(&self, lit: L) -> &[usize] {
        &self.0[lit.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::{Literal, PackedLiteral};

    fn lit(value: i32) -> PackedLiteral {
        PackedLiteral::from_dimacs(value)
    }

    #[test]
    fn test_watch_and_unwatch() {
        let mut watches = Watches::new(3);
        watches.watch(lit(1), 0);
        watches.watch(lit(-2), 0);
        watches.watch(lit(1), 4);

        assert_eq!(watches.watchers_of(lit(1)), &[0, 4]);
        assert_eq!(watches.watchers_of(lit(-2)), &[0]);
        assert!(watches.watchers_of(lit(2)).is_empty());

        watches.unwatch(lit(1), 0);
        assert_eq!(watches.watchers_of(lit(1)), &[4]);

        // Removing an id that is not present leaves the list alone.
        watches.unwatch(lit(-2), 9);
        assert_eq!(watches.watchers_of(lit(-2)), &[0]);
    }

    #[test]
    fn test_duplicate_entries_are_allowed() {
        let mut watches = Watches::new(1);
        watches.watch(lit(1), 0);
        watches.watch(lit(1), 0);
        assert_eq!(watches.watchers_of(lit(1)), &[0, 0]);

        watches.unwatch(lit(1), 0);
        assert_eq!(watches.watchers_of(lit(1)), &[0]);
    }
}
