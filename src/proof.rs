use crate::fol::{Clause, Literal, Substitution};
use std::fmt::{self, Display, Formatter};

/// One binary resolution step: `resolved.0` from `parents.0` and `resolved.1`
/// from `parents.1` are complementary under `substitution`, and `resolvent` is
/// what is left of both parents after applying it. Variables of `parents.1`
/// that clash with `parents.0` are renamed first, so `resolved.1` and the
/// substitution use the renamed names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    pub parents: (Clause, Clause),
    pub resolved: (Literal, Literal),
    pub substitution: Substitution,
    pub resolvent: Clause,
}

impl Display for ProofStep {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}  +  {}  on {} / {} with {}  =>  {}",
            self.parents.0, self.parents.1, self.resolved.0, self.resolved.1, self.substitution, self.resolvent
        )
    }
}

/// Writes a proof one numbered step per line
pub fn write_proof(f: &mut impl fmt::Write, steps: &[ProofStep]) -> fmt::Result {
    for (i, step) in steps.iter().enumerate() {
        writeln!(f, "{:>3}. {}", i + 1, step)?;
    }
    Ok(())
}
