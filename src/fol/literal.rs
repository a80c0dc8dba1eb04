use crate::fol::term::{write_args, Term};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// `[~]predicate(term, ...)`
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Literal {
    pub predicate: String,
    pub args: Vec<Term>,
    pub negated: bool,
}

impl Literal {
    pub fn positive(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Literal {
            predicate: predicate.into(),
            args,
            negated: false,
        }
    }

    pub fn negative(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Literal {
            negated: true,
            ..Literal::positive(predicate, args)
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn complement(&self) -> Literal {
        Literal {
            negated: !self.negated,
            ..self.clone()
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.negated {
            f.write_str("~")?;
        }
        write!(f, "{}(", self.predicate)?;
        write_args(f, &self.args)?;
        f.write_str(")")
    }
}

/// A first-order clause: an order-independent set of literals
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Names of the variables occurring anywhere in this clause
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = vec![];
        for literal in &self.literals {
            for arg in &literal.args {
                arg.variables(&mut vars);
            }
        }
        vars.into_iter().collect()
    }

    /// Holds some literal together with its complement
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|l| self.literals.contains(&l.complement()))
    }
}

impl std::iter::FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.literals.is_empty() {
            return f.write_str("[]");
        }
        let mut first = true;
        for literal in &self.literals {
            if first {
                first = false;
            } else {
                f.write_str(" | ")?;
            }
            write!(f, "{}", literal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let l = Literal::negative("Loves", vec![Term::symbol("x"), Term::function("mother", vec![Term::symbol("x")])]);
        assert_eq!(l.to_string(), "~Loves(x,mother(x))");
        assert_eq!(l.complement().to_string(), "Loves(x,mother(x))");
        assert_eq!(Clause::default().to_string(), "[]");
    }

    #[test]
    fn clause_is_order_independent() {
        let p = Literal::positive("P", vec![Term::symbol("x")]);
        let q = Literal::negative("Q", vec![Term::symbol("A")]);
        assert_eq!(Clause::new(vec![p.clone(), q.clone()]), Clause::new(vec![q.clone(), p.clone(), q]));
        assert!(!Clause::new(vec![p.clone()]).is_tautology());
        assert!(Clause::new(vec![p.clone(), p.complement()]).is_tautology());
    }

    #[test]
    fn clause_variables() {
        let c: Clause = vec!["P(x, f(y))", "~Q(A, x)"].into_iter().map(|l| l.parse::<Literal>().unwrap()).collect();
        assert_eq!(c.variables().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
        assert!(Clause::new(vec!["R(A)".parse::<Literal>().unwrap()]).variables().is_empty());
    }
}
