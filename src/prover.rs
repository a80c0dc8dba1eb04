use crate::error::Result;
use crate::fol::{parse_clauses, unify, Clause, Literal, Substitution, Term};
use crate::proof::{write_proof, ProofStep};
use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use std::borrow::Cow;
use std::cmp::max;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProverConfig {
    /// Number of saturation rounds before giving up
    pub max_iterations: usize,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig { max_iterations: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The empty clause was derived; the proof ends with the step producing it
    Unsat(Vec<ProofStep>),
    /// Saturated or out of iterations without finding a refutation
    Timeout,
}

impl Resolution {
    pub fn status(&self) -> &'static str {
        match self {
            Resolution::Unsat(_) => "UNSAT",
            Resolution::Timeout => "TIMEOUT",
        }
    }

    pub fn proof(&self) -> &[ProofStep] {
        match self {
            Resolution::Unsat(steps) => steps,
            Resolution::Timeout => &[],
        }
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Resolution::Unsat(_))
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "{}", self.status())?;
        write_proof(f, self.proof())
    }
}

/// Parses `clauses` (each a list of literal strings) and runs resolution on them
pub fn robinson_resolution<S: AsRef<str>>(clauses: &[Vec<S>], max_iterations: usize) -> Result<Resolution> {
    let clauses = parse_clauses(clauses)?;
    Ok(Prover::new(clauses, ProverConfig { max_iterations }).prove())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClauseId(usize);

#[derive(Debug, Clone)]
struct Derivation {
    parents: (ClauseId, ClauseId),
    literals: (Literal, Literal),
    substitution: Substitution,
}

/// Saturation-based binary resolution.
///
/// Clauses live in an insertion-ordered arena; a clause's index is its id and
/// `derivations[id]` records how it was produced (`None` for input clauses).
/// The arena only grows.
pub struct Prover {
    clauses: IndexSet<Clause>,
    derivations: Vec<Option<Derivation>>,
    config: ProverConfig,
}

impl Prover {
    pub fn new(clauses: impl IntoIterator<Item = Clause>, config: ProverConfig) -> Self {
        let clauses: IndexSet<Clause> = clauses.into_iter().collect();
        let derivations = vec![None; clauses.len()];
        Prover {
            clauses,
            derivations,
            config,
        }
    }

    /// Every clause known so far, inputs first, in derivation order
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn prove(&mut self) -> Resolution {
        if self.clauses.iter().any(Clause::is_empty) {
            debug!("input already contains the empty clause");
            return Resolution::Unsat(vec![]);
        }

        // Clauses below `frontier` were all present in the previous round, so
        // pairs of them have already been resolved
        let mut frontier = 0;
        for iteration in 0..self.config.max_iterations {
            let mut staged: IndexMap<Clause, Derivation> = IndexMap::new();

            for (i, c1) in self.clauses.iter().enumerate() {
                for (j, c2) in self.clauses.iter().enumerate().skip(max(i + 1, frontier)) {
                    let c2 = rename_apart(c1, c2);
                    for l1 in c1.literals() {
                        for l2 in c2.literals() {
                            let substitution = match unify(l1, l2) {
                                Some(substitution) => substitution,
                                None => continue,
                            };
                            let resolvent = resolve(c1, l1, &c2, l2, &substitution);
                            let derivation = Derivation {
                                parents: (ClauseId(i), ClauseId(j)),
                                literals: (l1.clone(), l2.clone()),
                                substitution,
                            };

                            if resolvent.is_empty() {
                                debug!("refutation in iteration {} from clauses {} and {}", iteration, i, j);
                                return Resolution::Unsat(self.proof(derivation));
                            }
                            if resolvent.is_tautology() {
                                trace!("dropping tautology {}", resolvent);
                                continue;
                            }
                            if self.clauses.contains(&resolvent) || staged.contains_key(&resolvent) {
                                continue;
                            }
                            trace!("resolved {} and {} into {}", c1, c2, resolvent);
                            staged.insert(resolvent, derivation);
                        }
                    }
                }
            }

            if staged.is_empty() {
                debug!("saturated after {} iterations with {} clauses", iteration + 1, self.clauses.len());
                return Resolution::Timeout;
            }

            frontier = self.clauses.len();
            for (clause, derivation) in staged {
                self.clauses.insert(clause);
                self.derivations.push(Some(derivation));
            }
            debug!(
                "iteration {}: {} new clauses, {} total",
                iteration,
                self.clauses.len() - frontier,
                self.clauses.len()
            );
        }

        debug!("gave up after {} iterations", self.config.max_iterations);
        Resolution::Timeout
    }

    /// Linearises the derivation DAG below the empty clause, ancestors first
    fn proof(&self, last: Derivation) -> Vec<ProofStep> {
        let mut steps = vec![];
        let mut emitted = vec![false; self.clauses.len()];
        self.emit(last.parents.0, &mut emitted, &mut steps);
        self.emit(last.parents.1, &mut emitted, &mut steps);
        steps.push(self.step(&last, Clause::default()));
        steps
    }

    fn emit(&self, id: ClauseId, emitted: &mut [bool], steps: &mut Vec<ProofStep>) {
        if emitted[id.0] {
            return;
        }
        emitted[id.0] = true;
        if let Some(derivation) = &self.derivations[id.0] {
            self.emit(derivation.parents.0, emitted, steps);
            self.emit(derivation.parents.1, emitted, steps);
            steps.push(self.step(derivation, self.clauses[id.0].clone()));
        }
    }

    fn step(&self, derivation: &Derivation, resolvent: Clause) -> ProofStep {
        let (p1, p2) = derivation.parents;
        ProofStep {
            parents: (self.clauses[p1.0].clone(), self.clauses[p2.0].clone()),
            resolved: derivation.literals.clone(),
            substitution: derivation.substitution.clone(),
            resolvent,
        }
    }
}

/// `(c1 - l1)σ ∪ (c2 - l2)σ`
pub(crate) fn resolve(c1: &Clause, l1: &Literal, c2: &Clause, l2: &Literal, substitution: &Substitution) -> Clause {
    let rest = c1.literals().filter(|l| *l != l1).chain(c2.literals().filter(|l| *l != l2));
    substitution.apply_clause(&rest.cloned().collect())
}

/// Renames the variables of `c2` that also occur in `c1`, so that the two
/// clauses share none. `x` becomes `x_1`, or `x_2` if that is taken too.
pub(crate) fn rename_apart<'a>(c1: &Clause, c2: &'a Clause) -> Cow<'a, Clause> {
    let ours = c1.variables();
    let theirs = c2.variables();
    if ours.is_disjoint(&theirs) {
        return Cow::Borrowed(c2);
    }

    let mut taken: BTreeSet<String> = ours.union(&theirs).map(|v| v.to_string()).collect();
    let mut renaming = Substitution::new();
    for v in theirs.intersection(&ours) {
        let mut i = 1;
        let fresh = loop {
            let name = format!("{}_{}", v, i);
            if !taken.contains(&name) {
                break name;
            }
            i += 1;
        };
        taken.insert(fresh.clone());
        renaming.bind(*v, Term::Variable(fresh));
    }
    trace!("renamed {} apart from {} with {}", c2, c1, renaming);
    Cow::Owned(renaming.apply_clause(c2))
}
