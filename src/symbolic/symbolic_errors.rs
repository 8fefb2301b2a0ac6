use thiserror::Error;

/// Failures reported by the symbolic layer: parsing, differentiation and numeric evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolicError {
    #[error("cannot parse expression '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("derivative of '{expr}' with respect to {var} is undefined: {reason}")]
    UndefinedDerivative {
        expr: String,
        var: String,
        reason: String,
    },

    #[error("variable '{name}' has no value bound")]
    UnboundVariable { name: String },

    #[error("'{expr}' is undefined at {var} = {value} (evaluates to {result})")]
    Domain {
        expr: String,
        var: String,
        value: f64,
        result: f64,
    },
}
