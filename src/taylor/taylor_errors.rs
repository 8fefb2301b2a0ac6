use crate::symbolic::symbolic_errors::SymbolicError;
use thiserror::Error;

/// Everything that can stop an expansion. No partial series is ever returned.
#[derive(Debug, Error)]
pub enum TaylorError {
    /// expression text is not a well-formed algebraic expression
    #[error("parse error: {0}")]
    Parse(#[source] SymbolicError),

    /// the derivative of some required order cannot be formed
    #[error("derivative of order {order} is undefined: {source}")]
    DifferentiationUndefined {
        order: usize,
        #[source]
        source: SymbolicError,
    },

    /// a derivative has no real value at the expansion point
    #[error("derivative of order {order} cannot be evaluated at a = {point}: {source}")]
    EvaluationDomain {
        order: usize,
        point: f64,
        #[source]
        source: SymbolicError,
    },

    #[error("expression has more than one free variable: {}", variables.join(", "))]
    UnsupportedMultiVariable { variables: Vec<String> },

    /// task document is missing a required key or holds a value of the wrong kind
    #[error("invalid task: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
