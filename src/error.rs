use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A first-order literal or term that doesn't follow `[~]pred(term, ...)`
    #[error("malformed literal `{text}`: {reason}")]
    MalformedLiteral { text: String, reason: String },

    /// The same predicate or function symbol used with two different arities
    #[error("symbol `{symbol}` used with arity {found}, but earlier with arity {expected}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed formula: {0}")]
    MalformedFormula(String),

    #[error("dimacs: {0}")]
    Dimacs(String),
}

impl Error {
    pub(crate) fn literal(text: &str, reason: impl Into<String>) -> Self {
        Error::MalformedLiteral {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}
