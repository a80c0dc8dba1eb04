pub mod cnf;
pub mod dimacs;
pub mod expr;
pub mod parse;

pub use cnf::to_cnf;
pub use expr::Expr;

use crate::error::Error;
use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

#[derive(Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable(name.into())
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(v.clone()),
            Literal::Negative(v) => Literal::Positive(v.clone()),
        }
    }

    pub fn is_complement_of(&self, other: &Literal) -> bool {
        self.variable() == other.variable() && self.is_positive() != other.is_positive()
    }
}

// Literals over the same variable sit next to each other, positive first
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.variable()
            .cmp(other.variable())
            .then_with(|| other.is_positive().cmp(&self.is_positive()))
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Literal::Positive(v) => write!(f, "{}", v),
            Literal::Negative(v) => write!(f, "~{}", v),
        }
    }
}

impl FromStr for Literal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, name) = match s.strip_prefix('~') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, s),
        };
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(Error::MalformedFormula(format!("invalid literal `{}`", s)));
        }
        let v = Variable::new(name);
        Ok(if negative { Literal::Negative(v) } else { Literal::Positive(v) })
    }
}

/// A disjunction of literals. Duplicates collapse, and iteration is in literal order.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Clause {
    literals: BTreeSet<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
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

    /// The only literal of a unit clause
    pub fn unit(&self) -> Option<&Literal> {
        if self.literals.len() == 1 {
            self.literals.iter().next()
        } else {
            None
        }
    }

    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|l| self.literals.contains(&l.negated()))
    }

    /// A copy of this clause with `literal` removed
    pub fn without(&self, literal: &Literal) -> Clause {
        let mut literals = self.literals.clone();
        literals.remove(literal);
        Clause { literals }
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.literals.iter().any(|l| assignment.literal_value(l) == Some(true))
    }
}

impl std::iter::FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for literal in &self.literals {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}", literal)?;
        }
        f.write_str("}")
    }
}

/// A conjunction of clauses
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn variables(&self) -> BTreeSet<&Variable> {
        self.clauses
            .iter()
            .flat_map(|clause| clause.literals().map(|literal| literal.variable()))
            .collect()
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|clause| clause.is_satisfied_by(assignment))
    }
}

impl Debug for Cnf {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.len() != 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in clause.literals() {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                write!(f, "{}", literal)?;
            }
            if clause.len() != 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

/// Truth values for some set of variables
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Assignment {
    values: BTreeMap<Variable, bool>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, variable: &Variable) -> Option<bool> {
        self.values.get(variable).copied()
    }

    pub fn literal_value(&self, literal: &Literal) -> Option<bool> {
        self.value(literal.variable()).map(|v| v == literal.is_positive())
    }

    /// Make `literal` true
    pub fn assign(&mut self, literal: &Literal) {
        self.values.insert(literal.variable().clone(), literal.is_positive());
    }

    pub fn set(&mut self, variable: Variable, value: bool) {
        self.values.insert(variable, value);
    }

    /// The literals made true by this assignment
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.values.iter().map(|(v, value)| {
            if *value {
                Literal::Positive(v.clone())
            } else {
                Literal::Negative(v.clone())
            }
        })
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Variable, bool> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::iter::FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (v, value) in &self.values {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", v, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
pub(crate) fn p(name: &str) -> Literal {
    Literal::Positive(Variable::new(name))
}

#[cfg(test)]
pub(crate) fn n(name: &str) -> Literal {
    Literal::Negative(Variable::new(name))
}

/// Random 3-SAT-shaped formulas over at most `MAX_VARS` variables
#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Cnf> {
    use proptest::prelude::*;

    const MAX_VARS: usize = 8;
    const MAX_CLAUSES: usize = 16;

    let literal = (0..MAX_VARS, any::<bool>()).prop_map(|(v, positive)| {
        let name = format!("x{}", v);
        if positive {
            p(&name)
        } else {
            n(&name)
        }
    });
    let clause = proptest::collection::vec(literal, 1..=3).prop_map(Clause::new);
    proptest::collection::vec(clause, 1..=MAX_CLAUSES).prop_map(Cnf::new)
}
