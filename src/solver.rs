use crate::formula::{Assignment, Clause, Cnf, Literal, Variable};
use crate::SatResult;
use log::{debug, trace};
use std::collections::BTreeMap;

/// Recursive DPLL: unit propagation, then pure literals, then branching on the
/// first literal of the first clause. Each branch owns its own copy of the
/// clause list and assignment, so backtracking is just returning.
pub struct Solver {
    clauses: Vec<Clause>,
    assignment: Assignment,
    stats: SolverStats,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SolverStats {
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub backtracks: usize,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
struct DecisionLevel(usize);

impl DecisionLevel {
    fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

/// Solve `clauses` starting from a partial `assignment`
pub fn dpll(clauses: impl IntoIterator<Item = Clause>, assignment: Assignment) -> SatResult {
    Solver::with_assignment(Cnf::new(clauses), assignment).solve()
}

impl Solver {
    pub fn new(formula: Cnf) -> Self {
        Self::with_assignment(formula, Assignment::new())
    }

    pub fn with_assignment(formula: Cnf, assignment: Assignment) -> Self {
        Self {
            clauses: formula.into_clauses(),
            assignment,
            stats: SolverStats::default(),
        }
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn solve(&mut self) -> SatResult {
        // Fold the caller's assignment into the clauses so the search only
        // ever sees unassigned variables
        let mut clauses = self.clauses.clone();
        for literal in self.assignment.literals() {
            clauses = simplify(&clauses, &literal);
        }

        let result = match self.search(clauses, self.assignment.clone(), DecisionLevel(0)) {
            Some(model) => SatResult::Satisfiable(model),
            None => SatResult::Unsatisfiable,
        };
        debug!("{:?} after {:?}", result, self.stats);
        result
    }

    fn search(&mut self, clauses: Vec<Clause>, mut assignment: Assignment, level: DecisionLevel) -> Option<Assignment> {
        if clauses.is_empty() {
            return Some(assignment);
        }
        if let Some(idx) = clauses.iter().position(Clause::is_empty) {
            trace!("conflict: clause {} is empty at level {}", idx, level.0);
            return None;
        }

        if let Some(unit) = clauses.iter().find_map(Clause::unit) {
            if assignment.literal_value(unit) == Some(false) {
                trace!("conflict: {} already assigned the other way at level {}", unit, level.0);
                return None;
            }
            let unit = unit.clone();
            trace!("implied {} at level {}", unit, level.0);
            self.stats.propagations += 1;
            assignment.assign(&unit);
            return self.search(simplify(&clauses, &unit), assignment, level);
        }

        if let Some(pure) = pure_literal(&clauses, &assignment) {
            trace!("pure {} at level {}", pure, level.0);
            self.stats.pure_literals += 1;
            assignment.assign(&pure);
            return self.search(simplify(&clauses, &pure), assignment, level);
        }

        // No empty clauses, so the first one has a literal
        let variable = clauses[0].literals().next()?.variable().clone();
        let level = level.next();
        self.stats.decisions += 1;

        let positive = Literal::Positive(variable);
        trace!("decision {} at level {}", positive, level.0);
        let mut branch = assignment.clone();
        branch.assign(&positive);
        if let Some(model) = self.search(simplify(&clauses, &positive), branch, level) {
            return Some(model);
        }

        let negative = positive.negated();
        trace!("backtrack: retrying with {} at level {}", negative, level.0);
        self.stats.backtracks += 1;
        assignment.assign(&negative);
        self.search(simplify(&clauses, &negative), assignment, level)
    }
}

/// Makes `literal` true: drops every clause it satisfies and removes its
/// complement from the rest
fn simplify(clauses: &[Clause], literal: &Literal) -> Vec<Clause> {
    let complement = literal.negated();
    clauses
        .iter()
        .filter(|clause| !clause.contains(literal))
        .map(|clause| {
            if clause.contains(&complement) {
                clause.without(&complement)
            } else {
                clause.clone()
            }
        })
        .collect()
}

/// The first unassigned literal, in clause order, whose variable occurs with
/// only one polarity
fn pure_literal(clauses: &[Clause], assignment: &Assignment) -> Option<Literal> {
    let mut polarities: BTreeMap<&Variable, (bool, bool)> = BTreeMap::new();
    for literal in clauses.iter().flat_map(|clause| clause.literals()) {
        let entry = polarities.entry(literal.variable()).or_default();
        if literal.is_positive() {
            entry.0 = true;
        } else {
            entry.1 = true;
        }
    }

    clauses
        .iter()
        .flat_map(|clause| clause.literals())
        .find(|literal| {
            let (positive, negative) = polarities[literal.variable()];
            positive != negative && assignment.value(literal.variable()).is_none()
        })
        .cloned()
}
