#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! First-UIP conflict analysis.
//!
//! Starting from a falsified clause, the analyser resolves backwards along
//! the trail against the antecedents of current-level literals until a
//! single current-level literal remains: the first unique implication
//! point. The learnt clause is that literal's negation plus the absorbed
//! literals from lower levels, and the backjump level is the highest level
//! among the latter.
//!
//! Every variable touched during the resolution has its activity bumped,
//! once; the bump set is handed back to the caller for the branching
//! heuristic.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::{Literal, Variable};
use crate::sat::trail::{Reason, Trail};
use bit_vec::BitVec;
use smallvec::SmallVec;

/// A clause learnt from a conflict. The asserting literal comes first; it
/// is the only literal of the conflicting decision level, and the only one
/// left unassigned after backjumping to `backjump`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learnt<L: Literal> {
    pub clause: Clause<L>,
    pub backjump: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analyser {
    /// Variables already absorbed into the resolvent.
    seen: BitVec,
    conflicts: usize,
}

impl Analyser {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            seen: BitVec::from_elem(num_vars + 1, false),
            conflicts: 0,
        }
    }

    /// Analyses the conflict `conflict` at the current decision level, which
    /// must be positive: level-zero conflicts mean the formula is
    /// unsatisfiable and never reach the analyser.
    pub fn analyse<L: Literal>(
        &mut self,
        cnf: &Cnf<L>,
        trail: &Trail<L>,
        conflict: usize,
    ) -> (Learnt<L>, SmallVec<[Variable; 16]>) {
        let level = trail.decision_level();
        debug_assert!(level > 0, "conflict at the root level reached the analyser");

        self.conflicts += 1;
        self.seen.clear();

        let mut to_bump: SmallVec<[Variable; 16]> = SmallVec::new();
        // Literals of the resolvent below the conflicting level.
        let mut absorbed: SmallVec<[L; 8]> = SmallVec::new();
        // Resolvent literals still at the conflicting level.
        let mut unresolved = 0;

        self.absorb(
            cnf, trail, conflict, None, level, &mut unresolved, &mut absorbed, &mut to_bump,
        );

        let boundary = trail.level_start(level);
        let mut position = trail.len();
        let asserting = loop {
            debug_assert!(
                position > boundary,
                "first UIP not found within the conflicting level"
            );
            position -= 1;
            let lit = trail[position];
            let var = lit.variable();
            if !self.seen[var as usize] {
                continue;
            }
            if unresolved == 1 {
                break lit.negated();
            }

            unresolved -= 1;
            match trail.reason(var) {
                Reason::Clause(antecedent) => self.absorb(
                    cnf,
                    trail,
                    antecedent,
                    Some(var),
                    level,
                    &mut unresolved,
                    &mut absorbed,
                    &mut to_bump,
                ),
                Reason::Decision => {
                    unreachable!("resolved against a decision before reaching the UIP")
                }
            }
        };

        let backjump = absorbed
            .iter()
            .map(|l| trail.level(l.variable()))
            .max()
            .unwrap_or(0);

        // Put a literal from the assertion level right after the asserting
        // one: the clause is watched on its first two literals, and those
        // two must never be left false by a backjump that unassigns only
        // one of them.
        if let Some(pos) = absorbed
            .iter()
            .position(|l| trail.level(l.variable()) == backjump)
        {
            absorbed.swap(0, pos);
        }

        let clause = std::iter::once(asserting)
            .chain(absorbed.iter().copied())
            .collect();

        (Learnt { clause, backjump }, to_bump)
    }

    /// Folds the literals of clause `id` into the resolvent, skipping the
    /// pivot variable being resolved away.
    #[allow(clippy::too_many_arguments)]
    fn absorb<L: Literal>(
        &mut self,
        cnf: &Cnf<L>,
        trail: &Trail<L>,
        id: usize,
        pivot: Option<Variable>,
        level: usize,
        unresolved: &mut usize,
        absorbed: &mut SmallVec<[L; 8]>,
        to_bump: &mut SmallVec<[Variable; 16]>,
    ) {
        for &lit in cnf[id].iter() {
            let var = lit.variable();
            if pivot == Some(var) || self.seen[var as usize] {
                continue;
            }
            self.seen.set(var as usize, true);
            to_bump.push(var);
            if trail.level(var) == level {
                *unresolved += 1;
            } else {
                absorbed.push(lit);
            }
        }
    }

    #[must_use]
    pub fn num_conflicts(&self) -> usize {
        self.conflicts
    }
}
