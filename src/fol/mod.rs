//! First-order terms, literals, clauses and unification.

pub mod literal;
pub mod parse;
pub mod signature;
pub mod substitution;
pub mod term;
pub mod unify;

pub use literal::{Clause, Literal};
pub use parse::{parse_clauses, parse_problem};
pub use signature::Signature;
pub use substitution::Substitution;
pub use term::Term;
pub use unify::{unify, unify_terms};
