#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reader for the DIMACS CNF format.
//!
//! Comment lines start with `c`, the problem line with `p cnf`; everything
//! else is clause data. Literals are whitespace-separated signed integers
//! terminated by `0`, and a clause may span several lines. A `0` with no
//! preceding literals yields an empty clause, which is kept; the solver
//! reports it as immediate unsatisfiability. The header's declared counts
//! are not trusted; the variable count is inferred from the literals.

use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use log::warn;
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Largest admissible variable index: literals are packed into 31 bits.
const MAX_VARIABLE: u64 = 0x7FFF_FFFF;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected a literal, found {token:?}")]
    InvalidLiteral { line: usize, token: String },

    #[error("line {line}: literal {value} is out of range")]
    LiteralOutOfRange { line: usize, value: i64 },

    #[error("line {line}: malformed problem line {text:?}")]
    Header { line: usize, text: String },
}

/// Parses DIMACS data into a clause store.
///
/// # Errors
///
/// Fails on I/O errors, non-integer literal tokens, literals whose
/// magnitude cannot be represented, and malformed problem lines. The
/// solver is never invoked on a formula that failed to parse.
pub fn parse_dimacs<R: BufRead, L: Literal>(reader: R) -> Result<Cnf<L>, DimacsError> {
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let mut pending: Vec<i32> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            let mut parts = line.split_ascii_whitespace();
            if parts.next() != Some("p") || parts.next() != Some("cnf") {
                return Err(DimacsError::Header {
                    line: number,
                    text: line.to_string(),
                });
            }
            continue;
        }

        for token in line.split_ascii_whitespace() {
            let value: i64 = token.parse().map_err(|_| DimacsError::InvalidLiteral {
                line: number,
                token: token.to_string(),
            })?;

            if value.unsigned_abs() > MAX_VARIABLE {
                return Err(DimacsError::LiteralOutOfRange {
                    line: number,
                    value,
                });
            }

            #[allow(clippy::cast_possible_truncation)]
            match value as i32 {
                0 => clauses.push(std::mem::take(&mut pending)),
                literal => pending.push(literal),
            }
        }
    }

    if !pending.is_empty() {
        warn!("input ended inside a clause; keeping the unterminated clause");
        clauses.push(pending);
    }

    Ok(Cnf::new(clauses))
}

/// Parses DIMACS data held in a string.
///
/// # Errors
///
/// See [`parse_dimacs`].
pub fn parse_str<L: Literal>(text: &str) -> Result<Cnf<L>, DimacsError> {
    parse_dimacs(io::Cursor::new(text))
}

/// Opens and parses a DIMACS file.
///
/// # Errors
///
/// See [`parse_dimacs`]; additionally fails when the file cannot be opened.
pub fn parse_file<L: Literal>(path: &Path) -> Result<Cnf<L>, DimacsError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;
    use itertools::Itertools;

    fn clause_dimacs(cnf: &Cnf<PackedLiteral>, id: usize) -> Vec<i32> {
        cnf[id].iter().map(|l| l.to_dimacs()).collect_vec()
    }

    #[test]
    fn test_comments_and_header_are_skipped() {
        let text = "c a comment\np cnf 3 2\n1 -2 0\n2 3 0\n";
        let cnf: Cnf<PackedLiteral> = parse_str(text).expect("parses");

        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(clause_dimacs(&cnf, 0), vec![1, -2]);
        assert_eq!(clause_dimacs(&cnf, 1), vec![2, 3]);
    }

    #[test]
    fn test_clause_spanning_lines() {
        let text = "p cnf 4 1\n1 -2\n3\n-4 0\n";
        let cnf: Cnf<PackedLiteral> = parse_str(text).expect("parses");

        assert_eq!(cnf.len(), 1);
        assert_eq!(clause_dimacs(&cnf, 0), vec![1, -2, 3, -4]);
    }

    #[test]
    fn test_several_clauses_on_one_line() {
        let text = "1 2 0 -1 0 -2 0\n";
        let cnf: Cnf<PackedLiteral> = parse_str(text).expect("parses");

        assert_eq!(cnf.len(), 3);
        assert_eq!(clause_dimacs(&cnf, 1), vec![-1]);
    }

    #[test]
    fn test_empty_clause_is_forwarded() {
        let text = "p cnf 1 2\n0\n1 0\n";
        let cnf: Cnf<PackedLiteral> = parse_str(text).expect("parses");

        assert_eq!(cnf.len(), 2);
        assert!(cnf[0].is_empty());
    }

    #[test]
    fn test_percent_ends_the_data_section() {
        let text = "1 0\n%\nthis is not dimacs\n";
        let cnf: Cnf<PackedLiteral> = parse_str(text).expect("parses");
        assert_eq!(cnf.len(), 1);
    }

    #[test]
    fn test_invalid_literal_is_rejected() {
        let result: Result<Cnf<PackedLiteral>, _> = parse_str("1 abc 0\n");
        assert!(matches!(
            result,
            Err(DimacsError::InvalidLiteral { line: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_range_literal_is_rejected() {
        let result: Result<Cnf<PackedLiteral>, _> = parse_str("1 -3000000000 0\n");
        assert!(matches!(
            result,
            Err(DimacsError::LiteralOutOfRange { line: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        let result: Result<Cnf<PackedLiteral>, _> = parse_str("p sat 3 2\n1 0\n");
        assert!(matches!(result, Err(DimacsError::Header { line: 1, .. })));
    }

    #[test]
    fn test_unterminated_clause_is_kept() {
        let text = "1 0\n-1 2\n";
        let cnf: Cnf<PackedLiteral> = parse_str(text).expect("parses");
        assert_eq!(cnf.len(), 2);
        assert_eq!(clause_dimacs(&cnf, 1), vec![-1, 2]);
    }
}
