//! Variable substitutions

use crate::fol::{Clause, Literal, Term};
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// A mapping from variable names to terms, kept in binding order.
///
/// Bindings may chain (`x -> y`, `y -> f(z)`); [`Substitution::apply`] follows
/// chains until it reaches an unbound variable or a non-variable term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: IndexMap<String, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `var -> term`. The caller must keep bindings acyclic.
    pub fn bind(&mut self, var: impl Into<String>, term: Term) {
        self.map.insert(var.into(), term);
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.map.get(var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Variable(v) => match self.map.get(v) {
                Some(bound) => self.apply(bound),
                None => term.clone(),
            },
            Term::Constant(_) => term.clone(),
            Term::Function { symbol, args } => Term::Function {
                symbol: symbol.clone(),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
        }
    }

    pub fn apply_literal(&self, literal: &Literal) -> Literal {
        Literal {
            predicate: literal.predicate.clone(),
            args: literal.args.iter().map(|arg| self.apply(arg)).collect(),
            negated: literal.negated,
        }
    }

    pub fn apply_clause(&self, clause: &Clause) -> Clause {
        clause.literals().map(|l| self.apply_literal(l)).collect()
    }
}

impl std::iter::FromIterator<(String, Term)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        Substitution {
            map: iter.into_iter().collect(),
        }
    }
}

impl Display for Substitution {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (var, term) in &self.map {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            write!(f, "{} -> {}", var, term)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(text: &str) -> Term {
        text.parse().unwrap()
    }

    #[test]
    fn apply_binding() {
        let mut subst = Substitution::new();
        subst.bind("x", t("A"));
        assert_eq!(subst.apply(&t("x")), t("A"));
        assert_eq!(subst.apply(&t("y")), t("y"));
        assert_eq!(subst.apply(&t("f(x,g(x),y)")), t("f(A,g(A),y)"));
    }

    #[test]
    fn chains_are_followed() {
        let subst: Substitution = vec![("x".to_string(), t("y")), ("y".to_string(), t("f(z)"))]
            .into_iter()
            .collect();
        assert_eq!(subst.apply(&t("x")), t("f(z)"));

        // Bindings inside a bound term are chased too
        let mut subst = Substitution::new();
        subst.bind("x", t("f(y)"));
        subst.bind("y", t("B"));
        assert_eq!(subst.apply(&t("g(x)")), t("g(f(B))"));
    }

    #[test]
    fn apply_to_literal() {
        let mut subst = Substitution::new();
        subst.bind("x", t("mother(John)"));
        let l: Literal = "~Loves(x,y)".parse().unwrap();
        assert_eq!(subst.apply_literal(&l).to_string(), "~Loves(mother(John),y)");
        assert_eq!(subst.to_string(), "{x -> mother(John)}");
    }

    #[test]
    fn apply_to_clause_merges_literals() {
        let mut subst = Substitution::new();
        subst.bind("x", t("y"));
        let c = Clause::new(vec!["P(x)".parse::<Literal>().unwrap(), "P(y)".parse().unwrap()]);
        assert_eq!(c.len(), 2);
        assert_eq!(subst.apply_clause(&c), Clause::new(vec!["P(y)".parse::<Literal>().unwrap()]));
    }
}
