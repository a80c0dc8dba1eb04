use crate::error::{Error, Result};
use crate::formula::{Clause, Cnf, Literal, Variable};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads a DIMACS CNF problem. Variables are named by their number, so `-3`
/// becomes the literal `~3`.
pub fn parse<R: Read>(reader: R) -> Result<Cnf> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut num_clauses = None;
    let mut clause = vec![];

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | Some(&"%") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(Error::Dimacs("missing 'cnf'".into()));
                }

                let _num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| Error::Dimacs("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| Error::Dimacs("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                let expected = num_clauses.ok_or_else(|| Error::Dimacs("missing 'p' line before clauses".into()))?;

                // Clauses may span lines; a 0 terminates each one
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => clauses.push(Clause::new(clause.drain(..))),
                    }
                }

                if clauses.len() >= expected {
                    break;
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(Error::Dimacs("missing 'p' line before clauses".into()));
    }
    if !clause.is_empty() {
        clauses.push(Clause::new(clause));
    }

    Ok(Cnf::new(clauses))
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<Option<Literal>> {
    let l = s
        .parse::<isize>()
        .map_err(|_| Error::Dimacs(format!("invalid literal '{}'", s)))?;
    let index = l
        .checked_abs()
        .ok_or_else(|| Error::Dimacs(format!("literal '{}' out of range", s)))?;
    let name = Variable::new(index.to_string());
    if l > 0 {
        Ok(Some(Literal::Positive(name)))
    } else if l < 0 {
        Ok(Some(Literal::Negative(name)))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::formula::{n, p};
    use crate::{SatResult, Solver};

    use super::*;

    #[test]
    fn parse_cnf_basic() {
        let cnf = "c  simple_v3_c2.cnf
c
p cnf 3 2
1 -3 0
2 3 -1 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.len(), 2);

        assert_eq!(
            f.clauses().nth(0).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![p("1"), n("3")]
        );
        assert_eq!(
            f.clauses().nth(1).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![n("1"), p("2"), p("3")]
        );
    }

    #[test]
    fn parse_clause_across_lines() {
        let cnf = "p cnf 3 1\n1 2\n-3 0\n";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.clauses().cloned().collect::<Vec<_>>(), vec![Clause::new(vec![p("1"), p("2"), n("3")])]);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse("1 2 0\n".as_bytes()), Err(Error::Dimacs(_))));
        assert!(matches!(parse("p dnf 1 1\n".as_bytes()), Err(Error::Dimacs(_))));
        assert!(matches!(parse("p cnf 2 1\n1 x 0\n".as_bytes()), Err(Error::Dimacs(_))));
        assert!(matches!(parse("c only comments\n".as_bytes()), Err(Error::Dimacs(_))));
        assert!(matches!(
            parse("p cnf 1 1\n-9223372036854775808 0\n".as_bytes()),
            Err(Error::Dimacs(_))
        ));
    }

    #[test]
    fn parse_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "p cnf 2 2\n1 0\n-1 -2 0").unwrap();
        let f = parse_file(file.path()).unwrap();
        assert_eq!(f.len(), 2);

        assert!(matches!(parse_file("/nonexistent/rustprove.cnf"), Err(Error::Io(_))));
    }

    #[test]
    fn solve_cnf_quinn() {
        let cnf = "c  quinn.cnf
c
p cnf 16 18
  1    2  0
 -2   -4  0
  3    4  0
 -4   -5  0
  5   -6  0
  6   -7  0
  6    7  0
  7  -16  0
  8   -9  0
 -8  -14  0
  9   10  0
  9  -10  0
-10  -11  0
 10   12  0
 11   12  0
 13   14  0
 14  -15  0
 15   16  0
";

        let f = parse(cnf.as_bytes()).expect("failed to parse");

        let mut solver = Solver::new(f.clone());
        match solver.solve() {
            SatResult::Satisfiable(model) => assert!(f.is_satisfied_by(&model)),
            SatResult::Unsatisfiable => panic!("quinn.cnf is satisfiable"),
        }
    }
}
