use std::fmt::{self, Display, Formatter};

/// A first-order term.
///
/// A symbol without an argument list is a variable if it starts with a
/// lowercase letter and a constant otherwise, so `x` and `a` are both
/// variables while `John` is a constant.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Term {
    Variable(String),
    Constant(String),
    Function { symbol: String, args: Vec<Term> },
}

impl Term {
    /// Classifies a bare symbol as a variable or a constant
    pub fn symbol(name: impl Into<String>) -> Term {
        let name = name.into();
        if name.chars().next().map_or(false, char::is_lowercase) {
            Term::Variable(name)
        } else {
            Term::Constant(name)
        }
    }

    pub fn function(symbol: impl Into<String>, args: Vec<Term>) -> Term {
        Term::Function {
            symbol: symbol.into(),
            args,
        }
    }

    /// Whether the variable `name` occurs anywhere in this term
    pub fn contains_variable(&self, name: &str) -> bool {
        match self {
            Term::Variable(v) => v == name,
            Term::Constant(_) => false,
            Term::Function { args, .. } => args.iter().any(|arg| arg.contains_variable(name)),
        }
    }

    pub fn variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Term::Variable(v) => {
                if !out.contains(&v.as_str()) {
                    out.push(v);
                }
            }
            Term::Constant(_) => {}
            Term::Function { args, .. } => {
                for arg in args {
                    arg.variables(out);
                }
            }
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Term::Variable(name) | Term::Constant(name) => f.write_str(name),
            Term::Function { symbol, args } => {
                write!(f, "{}(", symbol)?;
                write_args(f, args)?;
                f.write_str(")")
            }
        }
    }
}

pub(crate) fn write_args(f: &mut Formatter, args: &[Term]) -> fmt::Result {
    let mut first = true;
    for arg in args {
        if first {
            first = false;
        } else {
            f.write_str(",")?;
        }
        write!(f, "{}", arg)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_symbols() {
        assert_eq!(Term::symbol("x"), Term::Variable("x".into()));
        assert_eq!(Term::symbol("a"), Term::Variable("a".into()));
        assert_eq!(Term::symbol("John"), Term::Constant("John".into()));
        assert_eq!(Term::symbol("42"), Term::Constant("42".into()));
    }

    #[test]
    fn occurs() {
        let t = Term::function("f", vec![Term::symbol("x"), Term::function("g", vec![Term::symbol("y")])]);
        assert!(t.contains_variable("y"));
        assert!(!t.contains_variable("z"));
        assert_eq!(t.to_string(), "f(x,g(y))");

        let mut vars = vec![];
        t.variables(&mut vars);
        assert_eq!(vars, vec!["x", "y"]);
    }
}
