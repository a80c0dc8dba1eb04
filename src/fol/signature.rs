use crate::error::{Error, Result};
use crate::fol::{Literal, Term};
use std::collections::HashMap;

/// Arities seen so far for predicate and function symbols
#[derive(Debug, Default)]
pub struct Signature {
    predicates: HashMap<String, usize>,
    functions: HashMap<String, usize>,
}

impl Signature {
    pub fn check_literal(&mut self, literal: &Literal) -> Result<()> {
        record(&mut self.predicates, &literal.predicate, literal.arity())?;
        literal.args.iter().try_for_each(|arg| self.check_term(arg))
    }

    fn check_term(&mut self, term: &Term) -> Result<()> {
        match term {
            Term::Variable(_) | Term::Constant(_) => Ok(()),
            Term::Function { symbol, args } => {
                record(&mut self.functions, symbol, args.len())?;
                args.iter().try_for_each(|arg| self.check_term(arg))
            }
        }
    }
}

fn record(arities: &mut HashMap<String, usize>, symbol: &str, found: usize) -> Result<()> {
    match arities.get(symbol) {
        Some(&expected) if expected != found => Err(Error::ArityMismatch {
            symbol: symbol.to_string(),
            expected,
            found,
        }),
        Some(_) => Ok(()),
        None => {
            arities.insert(symbol.to_string(), found);
            Ok(())
        }
    }
}
