use crate::formula::{Assignment, Cnf};

// Simple brute-force implementation for use in property tests
pub(crate) fn solve_brute_force(f: &Cnf) -> Option<Assignment> {
    let variables = f.variables().into_iter().cloned().collect::<Vec<_>>();
    assert!(variables.len() <= 15); // just for safety

    for bits in 0..2u32.pow(variables.len() as u32) {
        let assignment = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), bits & (1 << i) == 0))
            .collect::<Assignment>();
        if f.is_satisfied_by(&assignment) {
            return Some(assignment);
        }
    }
    // no assignment is valid
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Clause};

    #[test]
    fn solve_bcp_sat() {
        let c1 = Clause::new(vec![p("0"), p("1")]);
        let c2 = Clause::new(vec![n("0")]);
        let f = Cnf::new(vec![c1, c2]);

        let model = solve_brute_force(&f).expect("satisfiable");
        assert!(f.is_satisfied_by(&model));
    }

    #[test]
    fn solve_bcp_unsat() {
        let c1 = Clause::new(vec![p("0"), p("1")]);
        let c2 = Clause::new(vec![n("0")]);
        let c3 = Clause::new(vec![n("1")]);
        let f = Cnf::new(vec![c1, c2, c3]);

        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn solve_conflict_sat() {
        let c1 = Clause::new(vec![p("0"), p("1"), p("2")]);
        let c2 = Clause::new(vec![n("0"), n("1"), p("2")]);
        let c3 = Clause::new(vec![n("1"), n("2")]);
        let f = Cnf::new(vec![c1, c2, c3]);

        assert!(solve_brute_force(&f).is_some());
    }
}
