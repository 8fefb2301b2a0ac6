/// Number of orders computed for transcendental expressions when no degree is given.
///
/// Exponential and trigonometric forms never differentiate down to zero, and some of them
/// (tangent in particular) grow with every order. 15 orders give close to double precision
/// near the expansion point for exp, sin and cos, and keep the cost of the derivative chain
/// of tg bounded.
pub const DEFAULT_TRANSCENDENTAL_DEGREE: usize = 15;

/// Variable assumed for expressions that name none, e.g. a plain constant.
pub const DEFAULT_CANONICAL_VARIABLE: &str = "x";

/// Tunables of the expansion core.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionConfig {
    pub transcendental_degree: usize,
    pub canonical_variable: String,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            transcendental_degree: DEFAULT_TRANSCENDENTAL_DEGREE,
            canonical_variable: DEFAULT_CANONICAL_VARIABLE.to_string(),
        }
    }
}

impl ExpansionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcendental_degree(mut self, degree: usize) -> Self {
        self.transcendental_degree = degree;
        self
    }

    pub fn with_canonical_variable(mut self, variable: &str) -> Self {
        self.canonical_variable = variable.to_string();
        self
    }
}
