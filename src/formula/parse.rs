//! Text syntax for propositional formulas.
//!
//! ```text
//! expr    := or ( "->" expr )?
//! or      := and ( "|" and )*
//! and     := unary ( "&" unary )*
//! unary   := "~" unary | "(" expr ")" | name
//! ```

use crate::error::{Error, Result};
use crate::formula::Expr;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

#[derive(Clone, PartialEq, Eq, Debug)]
enum Token {
    Name(String),
    Not,
    And,
    Or,
    Implies,
    Open,
    Close,
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = vec![];
    let mut chars: Peekable<CharIndices> = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '~' | '!' => Token::Not,
            '&' => Token::And,
            '|' => Token::Or,
            '(' => Token::Open,
            ')' => Token::Close,
            '-' => match chars.next() {
                Some((_, '>')) => Token::Implies,
                _ => return Err(Error::MalformedFormula(format!("expected `->` at offset {}", i))),
            },
            c if c.is_alphanumeric() || c == '_' => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, d)) = chars.peek() {
                    if d.is_alphanumeric() || d == '_' {
                        end = j + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Name(text[i..end].to_string())
            }
            c => return Err(Error::MalformedFormula(format!("unexpected `{}` at offset {}", c, i))),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Result<Expr> {
        let left = self.or()?;
        if self.eat(&Token::Implies) {
            Ok(Expr::implies(left, self.expr()?))
        } else {
            Ok(left)
        }
    }

    fn or(&mut self) -> Result<Expr> {
        let mut left = self.and()?;
        while self.eat(&Token::Or) {
            left = Expr::or(left, self.and()?);
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr> {
        let mut left = self.unary()?;
        while self.eat(&Token::And) {
            left = Expr::and(left, self.unary()?);
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        match token {
            Some(Token::Not) => Ok(Expr::not(self.unary()?)),
            Some(Token::Open) => {
                let inner = self.expr()?;
                if self.eat(&Token::Close) {
                    Ok(inner)
                } else {
                    Err(Error::MalformedFormula("missing `)`".into()))
                }
            }
            Some(Token::Name(name)) => Ok(Expr::Var(name)),
            Some(t) => Err(Error::MalformedFormula(format!("unexpected {:?}", t))),
            None => Err(Error::MalformedFormula("unexpected end of formula".into())),
        }
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = Parser {
            tokens: tokenize(s)?,
            pos: 0,
        };
        let expr = parser.expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some(t) => Err(Error::MalformedFormula(format!("trailing {:?}", t))),
        }
    }
}
