#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver interface and its result types.

use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, PackedLiteral};
use itertools::Itertools;
use std::fmt::Display;
use std::num::NonZeroI32;

/// A satisfying assignment, stored as signed DIMACS literals ordered by
/// variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(Vec<i32>);

impl Solutions {
    #[must_use]
    pub fn new(literals: &[i32]) -> Self {
        let mut literals = literals.to_vec();
        literals.sort_unstable_by_key(|l| l.unsigned_abs());
        Self(literals)
    }

    /// Whether the model makes `lit` true.
    #[must_use]
    pub fn check(&self, lit: NonZeroI32) -> bool {
        self.0
            .binary_search_by_key(&lit.get().unsigned_abs(), |l| l.unsigned_abs())
            .is_ok_and(|pos| self.0[pos] == lit.get())
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// Counters accumulated over a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStats {
    pub conflicts: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub learnt_clauses: usize,
}

pub trait Solver<L: Literal = PackedLiteral> {
    fn new(cnf: Cnf<L>) -> Self;

    /// Decides the formula: a model if satisfiable, `None` if not.
    fn solve(&mut self) -> Option<Solutions>;

    fn stats(&self) -> SolverStats;
}
