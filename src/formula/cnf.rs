//! Syntax-directed conversion of propositional formulas to clause form.
//!
//! The pipeline is implication elimination, then negation normal form, then
//! distribution of `|` over `&`, then flattening into clauses. No auxiliary
//! variables are introduced, so the output is equivalent to the input but can
//! be exponentially larger.

use crate::formula::{Clause, Cnf, Expr, Literal, Variable};
use log::trace;

pub fn to_cnf(expr: &Expr) -> Cnf {
    let expr = eliminate_implications(expr);
    let expr = to_nnf(expr);
    let expr = distribute(expr);
    trace!("distributed form: {}", expr);

    let mut clauses = vec![];
    flatten(&expr, &mut clauses);
    Cnf::new(clauses)
}

/// `A -> B` becomes `~A | B`, everywhere in the tree
pub(crate) fn eliminate_implications(expr: &Expr) -> Expr {
    match expr {
        Expr::Var(name) => Expr::Var(name.clone()),
        Expr::Not(inner) => Expr::not(eliminate_implications(inner)),
        Expr::And(l, r) => Expr::and(eliminate_implications(l), eliminate_implications(r)),
        Expr::Or(l, r) => Expr::or(eliminate_implications(l), eliminate_implications(r)),
        Expr::Implies(l, r) => Expr::or(Expr::not(eliminate_implications(l)), eliminate_implications(r)),
    }
}

/// Pushes negations down to the variables with double negation and De Morgan.
/// Input must be implication-free.
pub(crate) fn to_nnf(expr: Expr) -> Expr {
    match expr {
        Expr::Var(_) => expr,
        Expr::And(l, r) => Expr::and(to_nnf(*l), to_nnf(*r)),
        Expr::Or(l, r) => Expr::or(to_nnf(*l), to_nnf(*r)),
        Expr::Not(inner) => match *inner {
            Expr::Var(name) => Expr::not(Expr::Var(name)),
            Expr::Not(e) => to_nnf(*e),
            Expr::And(l, r) => Expr::or(to_nnf(Expr::Not(l)), to_nnf(Expr::Not(r))),
            Expr::Or(l, r) => Expr::and(to_nnf(Expr::Not(l)), to_nnf(Expr::Not(r))),
            Expr::Implies(..) => unreachable!("implication survived elimination"),
        },
        Expr::Implies(..) => unreachable!("implication survived elimination"),
    }
}

/// Rewrites an NNF formula until no `|` has an `&` below it
pub(crate) fn distribute(expr: Expr) -> Expr {
    match expr {
        Expr::And(l, r) => Expr::and(distribute(*l), distribute(*r)),
        Expr::Or(l, r) => distribute_or(distribute(*l), distribute(*r)),
        Expr::Var(_) | Expr::Not(_) => expr,
        Expr::Implies(..) => unreachable!("implication survived elimination"),
    }
}

// Both sides are already distributed
fn distribute_or(left: Expr, right: Expr) -> Expr {
    match (left, right) {
        (Expr::And(a, b), right) => Expr::and(distribute_or(*a, right.clone()), distribute_or(*b, right)),
        (left, Expr::And(a, b)) => Expr::and(distribute_or(left.clone(), *a), distribute_or(left, *b)),
        (left, right) => Expr::or(left, right),
    }
}

fn flatten(expr: &Expr, clauses: &mut Vec<Clause>) {
    match expr {
        Expr::And(l, r) => {
            flatten(l, clauses);
            flatten(r, clauses);
        }
        _ => {
            let mut literals = vec![];
            collect_literals(expr, &mut literals);
            clauses.push(Clause::new(literals));
        }
    }
}

fn collect_literals(expr: &Expr, literals: &mut Vec<Literal>) {
    match expr {
        Expr::Var(name) => literals.push(Literal::Positive(Variable::new(name.clone()))),
        Expr::Not(inner) => match &**inner {
            Expr::Var(name) => literals.push(Literal::Negative(Variable::new(name.clone()))),
            other => unreachable!("negation above non-variable {} after NNF", other),
        },
        Expr::Or(l, r) => {
            collect_literals(l, literals);
            collect_literals(r, literals);
        }
        Expr::And(..) => unreachable!("conjunction below disjunction after distribution"),
        Expr::Implies(..) => unreachable!("implication survived elimination"),
    }
}
