use crate::formula::{Assignment, Variable};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// A propositional formula over named variables
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Expr {
    Var(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Implies(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: Expr) -> Expr {
        Expr::Not(Box::new(inner))
    }

    pub fn and(left: Expr, right: Expr) -> Expr {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Expr {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Expr, right: Expr) -> Expr {
        Expr::Implies(Box::new(left), Box::new(right))
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Expr::Var(name) => {
                vars.insert(Variable::new(name.clone()));
            }
            Expr::Not(inner) => inner.collect_variables(vars),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Implies(l, r) => {
                l.collect_variables(vars);
                r.collect_variables(vars);
            }
        }
    }

    /// Truth value under `assignment`; unassigned variables count as false
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Expr::Var(name) => assignment.value(&Variable::new(name.clone())).unwrap_or(false),
            Expr::Not(inner) => !inner.eval(assignment),
            Expr::And(l, r) => l.eval(assignment) && r.eval(assignment),
            Expr::Or(l, r) => l.eval(assignment) || r.eval(assignment),
            Expr::Implies(l, r) => !l.eval(assignment) || r.eval(assignment),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => f.write_str(name),
            Expr::Not(inner) => write!(f, "~{}", inner),
            Expr::And(l, r) => write!(f, "({} & {})", l, r),
            Expr::Or(l, r) => write!(f, "({} | {})", l, r),
            Expr::Implies(l, r) => write!(f, "({} -> {})", l, r),
        }
    }
}
