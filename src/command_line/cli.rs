#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The command-line driver: reads DIMACS input, runs the solver, and
//! renders the verdict in the competition format with exit codes 10 (SAT),
//! 20 (UNSAT), and 0 (no decision rendered).

use anyhow::Context;
use clap::{Parser, ValueEnum};
use clausal::sat::cdcl::Cdcl;
use clausal::sat::cnf::Cnf;
use clausal::sat::dimacs;
use clausal::sat::literal::PackedLiteral;
use clausal::sat::solver::{Solutions, Solver};
use clausal::sat::variable_selection::{Activity, FixedOrder, VariableSelection};
use env_logger::{Builder, Target};
use log::{info, Level, LevelFilter};
use std::io;
use std::path::PathBuf;

pub(crate) const EXIT_SAT: i32 = 10;
pub(crate) const EXIT_UNSAT: i32 = 20;
pub(crate) const EXIT_UNDECIDED: i32 = 0;

#[derive(Parser, Debug)]
#[command(
    name = "clausal",
    version,
    about = "A conflict-driven clause learning SAT solver"
)]
pub(crate) struct Cli {
    /// DIMACS CNF input file; stdin when omitted.
    pub(crate) path: Option<PathBuf>,

    /// Branching heuristic.
    #[arg(long, value_enum, default_value_t = Heuristic::Activity)]
    pub(crate) heuristic: Heuristic,

    /// Cross-check a model against the input formula before reporting it.
    #[arg(long, default_value_t = false)]
    pub(crate) verify: bool,

    /// Log search statistics after solving.
    #[arg(long, default_value_t = false)]
    pub(crate) stats: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Heuristic {
    /// Conflict-driven activity ordering.
    Activity,
    /// Smallest unassigned variable first.
    Fixed,
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Activity => "activity",
            Self::Fixed => "fixed",
        })
    }
}

/// Routes all logging to stdout as DIMACS `c` comment lines, so solver
/// output and diagnostics interleave without breaking downstream parsers.
pub(crate) fn init_logging() {
    let mut builder = Builder::new();
    builder
        .target(Target::Stdout)
        .format(|buf, record| {
            use std::io::Write;
            if record.level() == Level::Info {
                writeln!(buf, "c {}", record.args())
            } else {
                writeln!(buf, "c {}: {}", record.level(), record.args())
            }
        })
        .filter(None, LevelFilter::Info);

    if let Ok(filters) = std::env::var("CLAUSAL_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

pub(crate) fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cnf: Cnf = match &cli.path {
        Some(path) => {
            info!("reading {}", path.display());
            dimacs::parse_file(path)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => {
            info!("reading from stdin");
            dimacs::parse_dimacs(io::stdin().lock()).context("failed to parse stdin")?
        }
    };

    info!("{} variables, {} clauses", cnf.num_vars, cnf.len());

    match cli.heuristic {
        Heuristic::Activity => decide::<Activity>(cnf, cli),
        Heuristic::Fixed => decide::<FixedOrder>(cnf, cli),
    }
}

fn decide<V: VariableSelection>(cnf: Cnf, cli: &Cli) -> anyhow::Result<i32> {
    let mut solver: Cdcl<PackedLiteral, V> = Cdcl::new(cnf);
    let model = solver.solve();

    if cli.stats {
        let stats = solver.stats();
        info!("conflicts     {}", stats.conflicts);
        info!("decisions     {}", stats.decisions);
        info!("propagations  {}", stats.propagations);
        info!("learnt        {}", stats.learnt_clauses);
    }

    match model {
        Some(model) => {
            if cli.verify && !solver.cnf().verify(&model) {
                anyhow::bail!("model failed verification against the input formula");
            }
            report_sat(&model);
            Ok(EXIT_SAT)
        }
        None => {
            println!("s UNSATISFIABLE");
            Ok(EXIT_UNSAT)
        }
    }
}

fn report_sat(model: &Solutions) {
    println!("s SATISFIABLE");
    if model.is_empty() {
        println!("v 0");
    } else {
        println!("v {model} 0");
    }
}
