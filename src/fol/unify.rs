//! Most general unifiers for terms and complementary literals

use crate::fol::{Literal, Substitution, Term};
use log::trace;

/// Unifies two literals for resolution: same predicate, same arity and
/// opposite polarity. Arguments are unified left to right.
pub fn unify(a: &Literal, b: &Literal) -> Option<Substitution> {
    if a.predicate != b.predicate || a.negated == b.negated || a.arity() != b.arity() {
        return None;
    }
    let subst = unify_all(&a.args, &b.args, Substitution::new());
    trace!(
        "unify {} with {}: {}",
        a,
        b,
        subst.as_ref().map_or_else(|| "failed".to_string(), |s| s.to_string())
    );
    subst
}

/// Extends `subst` so that it unifies `s` and `t`, or returns `None`
pub fn unify_terms(s: &Term, t: &Term, mut subst: Substitution) -> Option<Substitution> {
    let s = subst.apply(s);
    let t = subst.apply(t);

    match (&s, &t) {
        _ if s == t => Some(subst),

        (Term::Variable(v), other) | (other, Term::Variable(v)) => {
            // Occurs check: x can't be bound to a term that contains x
            if other.contains_variable(v) {
                None
            } else {
                subst.bind(v.clone(), other.clone());
                Some(subst)
            }
        }

        (Term::Function { symbol: f, args: xs }, Term::Function { symbol: g, args: ys })
            if f == g && xs.len() == ys.len() =>
        {
            unify_all(xs, ys, subst)
        }

        _ => None,
    }
}

fn unify_all(xs: &[Term], ys: &[Term], subst: Substitution) -> Option<Substitution> {
    xs.iter()
        .zip(ys)
        .try_fold(subst, |subst, (x, y)| unify_terms(x, y, subst))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn lit(text: &str) -> Literal {
        text.parse().unwrap()
    }

    fn t(text: &str) -> Term {
        text.parse().unwrap()
    }

    fn unify_str(a: &str, b: &str) -> Option<Substitution> {
        unify(&lit(a), &lit(b))
    }

    #[test]
    fn variable_with_symbol() {
        let subst = unify_str("P(x)", "~P(a)").unwrap();
        assert_eq!(subst.get("x"), Some(&t("a")));
        assert_eq!(subst.len(), 1);
    }

    #[test]
    fn requires_opposite_polarity() {
        assert_eq!(unify_str("P(x)", "P(A)"), None);
        assert_eq!(unify_str("~P(x)", "~P(A)"), None);
        assert!(unify_str("~P(x)", "P(A)").is_some());
    }

    #[test]
    fn requires_same_predicate_and_arity() {
        assert_eq!(unify_str("P(x)", "~Q(x)"), None);
        assert_eq!(unify_str("P(x)", "~P(x,y)"), None);
    }

    #[test]
    fn constant_clash() {
        assert_eq!(unify_str("P(John)", "~P(Mary)"), None);
        assert!(unify_str("P(John)", "~P(John)").unwrap().is_empty());
    }

    #[test]
    fn function_terms() {
        let subst = unify_str("Knows(John, x)", "~Knows(y, mother(y))").unwrap();
        assert_eq!(subst.apply(&t("x")), t("mother(John)"));
        assert_eq!(subst.apply(&t("y")), t("John"));

        assert_eq!(unify_str("P(f(x))", "~P(g(x))"), None);
        assert_eq!(unify_str("P(f(x))", "~P(f(x,y))"), None);
        assert_eq!(unify_str("P(f(x))", "~P(John)"), None);
    }

    #[test]
    fn bindings_thread_left_to_right() {
        // x gets bound by the first argument and must be respected by the second
        assert_eq!(unify_str("P(x, x)", "~P(A, B)"), None);
        let subst = unify_str("P(x, x)", "~P(y, A)").unwrap();
        assert_eq!(subst.apply(&t("x")), t("A"));
        assert_eq!(subst.apply(&t("y")), t("A"));
    }

    #[test]
    fn occurs_check() {
        assert_eq!(unify_str("P(x)", "~P(f(x))"), None);
        assert_eq!(unify_terms(&t("x"), &t("g(y,f(x))"), Substitution::new()), None);
        // Same variable on both sides is fine
        assert!(unify_terms(&t("x"), &t("x"), Substitution::new()).unwrap().is_empty());
    }

    #[derive(Debug, Clone)]
    enum TermDesc {
        Var(u8),
        Const(u8),
        Func(u8, Vec<TermDesc>),
    }

    fn arb_term_desc(max_depth: u32) -> BoxedStrategy<TermDesc> {
        if max_depth == 0 {
            prop_oneof![(0..4u8).prop_map(TermDesc::Var), (0..3u8).prop_map(TermDesc::Const)].boxed()
        } else {
            prop_oneof![
                3 => (0..4u8).prop_map(TermDesc::Var),
                2 => (0..3u8).prop_map(TermDesc::Const),
                2 => (0..2u8, proptest::collection::vec(arb_term_desc(max_depth - 1), 1..=2))
                    .prop_map(|(f, args)| TermDesc::Func(f, args)),
            ]
            .boxed()
        }
    }

    /// Builds a term whose variables are named `{prefix}0`, `{prefix}1`, ...
    fn build_term_over(desc: &TermDesc, prefix: &str) -> Term {
        match desc {
            TermDesc::Var(i) => Term::Variable(format!("{}{}", prefix, i)),
            TermDesc::Const(i) => Term::Constant(format!("C{}", i)),
            // Arity is part of the name so every symbol has a single arity
            TermDesc::Func(f, args) => Term::function(
                format!("f{}_{}", f, args.len()),
                args.iter().map(|arg| build_term_over(arg, prefix)).collect(),
            ),
        }
    }

    fn build_term(desc: &TermDesc) -> Term {
        build_term_over(desc, "x")
    }

    fn arb_args() -> impl Strategy<Value = (Vec<Term>, Vec<Term>)> {
        (1..=3usize).prop_flat_map(|n| {
            (
                proptest::collection::vec(arb_term_desc(2), n),
                proptest::collection::vec(arb_term_desc(2), n),
            )
                .prop_map(|(a, b)| -> (Vec<Term>, Vec<Term>) {
                    (a.iter().map(build_term).collect(), b.iter().map(build_term).collect())
                })
        })
    }

    proptest! {
        /// If unify(a, b) = σ, then aσ and bσ agree argument-wise
        #[test]
        fn unification_soundness((xs, ys) in arb_args()) {
            let a = Literal::positive("P", xs);
            let b = Literal::negative("P", ys);
            if let Some(subst) = unify(&a, &b) {
                let a = subst.apply_literal(&a);
                let b = subst.apply_literal(&b);
                prop_assert_eq!(a.args, b.args);
            }
        }

        #[test]
        fn unification_symmetry((xs, ys) in arb_args()) {
            let a = Literal::positive("P", xs);
            let b = Literal::negative("P", ys);
            prop_assert_eq!(unify(&a, &b).is_some(), unify(&b, &a).is_some());
        }

        /// A term always unifies with itself under the empty substitution
        #[test]
        fn unification_reflexivity((xs, _ys) in arb_args()) {
            let a = Literal::positive("P", xs.clone());
            let b = Literal::negative("P", xs);
            prop_assert_eq!(unify(&a, &b), Some(Substitution::new()));
        }

        /// If some substitution σ over fresh variables makes xsσ = ys, unify
        /// finds a unifier
        #[test]
        fn unification_completeness(
            xs in proptest::collection::vec(arb_term_desc(2), 1..=3),
            bindings in proptest::collection::vec(arb_term_desc(1), 4),
        ) {
            let xs: Vec<Term> = xs.iter().map(build_term).collect();
            let sigma: Substitution = bindings
                .iter()
                .enumerate()
                .map(|(i, desc)| (format!("x{}", i), build_term_over(desc, "y")))
                .collect();
            let ys: Vec<Term> = xs.iter().map(|t| sigma.apply(t)).collect();

            let a = Literal::positive("P", xs);
            let b = Literal::negative("P", ys);
            let subst = unify(&a, &b);
            prop_assert!(subst.is_some(), "{} and {} should unify via {}", a, b, sigma);
            if let Some(subst) = subst {
                prop_assert_eq!(subst.apply_literal(&a).args, subst.apply_literal(&b).args);
            }
        }

        #[test]
        fn same_polarity_never_unifies((xs, ys) in arb_args()) {
            let a = Literal::positive("P", xs);
            let b = Literal::positive("P", ys);
            prop_assert_eq!(unify(&a, &b), None);
        }
    }
}
