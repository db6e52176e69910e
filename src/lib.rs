//! A conflict-driven clause learning (CDCL) SAT solver.
//!
//! Given a formula in conjunctive normal form, [`sat::cdcl::Cdcl`] decides
//! satisfiability and, for satisfiable formulas, produces a model. The
//! [`sat::dimacs`] module reads the DIMACS CNF format.

/// The solver core: clause store, trail, watched-literal propagation,
/// conflict analysis, branching heuristics, and the search driver.
pub mod sat;
