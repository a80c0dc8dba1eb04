pub mod error;
pub mod fol;
pub mod formula;
pub mod proof;
pub mod prover;
pub mod solver;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Assignment),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    /// The satisfying assignment, if there is one
    pub fn model(&self) -> Option<&Assignment> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use error::{Error, Result};
pub use formula::{to_cnf, Assignment, Clause, Cnf, Expr, Literal, Variable};
pub use proof::ProofStep;
pub use prover::{robinson_resolution, Prover, ProverConfig, Resolution};
pub use solver::{dpll, Solver};
