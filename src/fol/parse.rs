//! Parsing of first-order literals such as `~Loves(x, mother(John))`.

use crate::error::{Error, Result};
use crate::fol::{Clause, Literal, Signature, Term};
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn symbol(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '\''))
            .unwrap_or_else(|| rest.len());
        if len == 0 {
            None
        } else {
            self.pos += len;
            Some(&rest[..len])
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::literal(self.text, reason)
    }

    fn literal(&mut self) -> Result<Literal> {
        let negated = self.eat('~');
        let predicate = self.symbol().ok_or_else(|| self.error("missing predicate symbol"))?;
        if !self.eat('(') {
            return Err(self.error(format!("missing `(` after `{}`", predicate)));
        }
        let args = self.args()?;
        Ok(Literal {
            predicate: predicate.to_string(),
            args,
            negated,
        })
    }

    // Everything after the opening parenthesis, up to and including the closing one
    fn args(&mut self) -> Result<Vec<Term>> {
        let mut args = vec![self.term()?];
        loop {
            if self.eat(',') {
                args.push(self.term()?);
            } else if self.eat(')') {
                return Ok(args);
            } else {
                return Err(self.error("missing `)`"));
            }
        }
    }

    fn term(&mut self) -> Result<Term> {
        let symbol = self.symbol().ok_or_else(|| self.error("empty argument"))?;
        if self.eat('(') {
            Ok(Term::function(symbol, self.args()?))
        } else {
            Ok(Term::symbol(symbol))
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(self.error(format!("unexpected trailing `{}`", self.rest())))
        }
    }
}

impl FromStr for Literal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cursor = Cursor::new(s);
        let literal = cursor.literal()?;
        cursor.finish()?;
        Ok(literal)
    }
}

impl FromStr for Term {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cursor = Cursor::new(s);
        let term = cursor.term()?;
        cursor.finish()?;
        Ok(term)
    }
}

/// Parses a list of clauses given as literal strings, and checks that every
/// symbol is used with a single arity across all of them
pub fn parse_clauses<S: AsRef<str>>(clauses: &[Vec<S>]) -> Result<Vec<Clause>> {
    let mut signature = Signature::default();
    clauses
        .iter()
        .map(|clause| -> Result<Clause> {
            let literals = clause
                .iter()
                .map(|text| text.as_ref().parse::<Literal>())
                .collect::<Result<Vec<_>>>()?;
            for literal in &literals {
                signature.check_literal(literal)?;
            }
            Ok(Clause::new(literals))
        })
        .collect()
}

/// Reads a problem with one clause per line and literals separated by `|`.
/// `#` starts a comment; blank lines are skipped.
pub fn parse_problem<R: Read>(reader: R) -> Result<Vec<Clause>> {
    let mut clauses = vec![];
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => &line[..],
        };
        if line.trim().is_empty() {
            continue;
        }
        clauses.push(line.split('|').map(str::to_string).collect::<Vec<_>>());
    }
    parse_clauses(&clauses)
}
