//! # Taylor Series Expansion
//!
//! f(x) ≈ Σ f⁽ⁿ⁾(a)/n! · (x − a)ⁿ,  n = 0..degree
//!
//! ## Pipeline
//! 1. `Expression::new` classifies the text, parses it and fixes the degree once
//! 2. `derivative_chain` differentiates order by order, each step from its predecessor only
//! 3. `evaluate_term` turns one derivative into one contribution
//! 4. `assemble_series` sums contributions in ascending order
//!
//! Every call owns its chain; nothing is kept between calls, so expansions may run
//! concurrently on different threads.
//!
//! # Example
//! ```
//! use RustedTaylor::taylor::taylor_series::{expand, expand_total};
//! let series = expand("-0.5*x**5 + 3*x**2 + 2*x + 1", 5.0, 0.0, None).unwrap();
//! assert_eq!(series.terms().len(), 6);
//! assert_eq!(series.total(), -1476.5);
//! let approx_tan = expand_total("tan(x)", 0.1, 0.0, None).unwrap();
//! assert!((approx_tan - 0.1_f64.tan()).abs() < 1e-10);
//! ```
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{inverse_factorial, linspace};
use crate::taylor::degree_selector::select_degree;
use crate::taylor::expansion_config::ExpansionConfig;
use crate::taylor::expression_classifier::{Classification, classify_expression};
use crate::taylor::taylor_errors::TaylorError;
use log::{debug, info, warn};
use tabled::{Table, builder::Builder, settings::Style};

/// Expression text with its parsed form, classification and degree, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    text: String,
    form: Expr,
    classification: Classification,
    degree: usize,
}

impl Expression {
    pub fn new(
        text: &str,
        degree_override: Option<usize>,
        config: &ExpansionConfig,
    ) -> Result<Self, TaylorError> {
        let form = Expr::parse_expression(text).map_err(TaylorError::Parse)?;
        let classification = classify_expression(text, config)?;
        let degree = select_degree(text, &classification, degree_override, config);
        Ok(Expression {
            text: text.to_string(),
            form,
            classification,
            degree,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn form(&self) -> &Expr {
        &self.form
    }

    pub fn variable(&self) -> &str {
        &self.classification.variable
    }

    pub fn is_transcendental(&self) -> bool {
        self.classification.transcendental
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// The expression differentiated `order` times; order 0 is the expression itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivativeStep {
    pub order: usize,
    pub form: Expr,
}

/// One order's contribution to the series.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub order: usize,
    pub derivative: Expr,
    /// expansion point a
    pub point: f64,
    pub value_at_point: f64,
    /// 1/n!
    pub coefficient: f64,
    /// (x - a)^n, 1 for n = 0
    pub power_factor: f64,
    pub contribution: f64,
}

impl Term {
    pub fn derivative_text(&self) -> String {
        self.derivative.to_string()
    }
}

/// Ordered terms and their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    variable: String,
    expansion_point: f64,
    target: f64,
    terms: Vec<Term>,
    total: f64,
}

/// Orders 0..=degree of the derivative chain. Each step is the simplified derivative of the
/// previous one; the base form is recorded as is.
pub fn derivative_chain(
    base: &Expr,
    variable: &str,
    degree: usize,
) -> Result<Vec<DerivativeStep>, TaylorError> {
    let mut steps = Vec::with_capacity(degree + 1);
    steps.push(DerivativeStep {
        order: 0,
        form: base.clone(),
    });
    let mut current = base.clone();
    for order in 1..=degree {
        current = current
            .diff(variable)
            .map_err(|source| TaylorError::DifferentiationUndefined { order, source })?
            .simplify();
        debug!(
            "derivative of order {}: {} nodes, {}",
            order,
            current.node_count(),
            current
        );
        steps.push(DerivativeStep {
            order,
            form: current.clone(),
        });
    }
    Ok(steps)
}

/// Evaluates one derivative at `a` and weighs it for the target `x`.
pub fn evaluate_term(
    step: &DerivativeStep,
    variable: &str,
    a: f64,
    x: f64,
) -> Result<Term, TaylorError> {
    let order = step.order;
    let coefficient = inverse_factorial(order);
    let value_at_point = step
        .form
        .eval1D(variable, a)
        .map_err(|source| TaylorError::EvaluationDomain {
            order,
            point: a,
            source,
        })?;
    let power_factor = power_of_offset(x - a, order);
    let contribution = coefficient * value_at_point * power_factor;
    debug!(
        "term {}: f({}) = {}, 1/n! = {}, (x-a)^n = {}, contribution {}",
        order, a, value_at_point, coefficient, power_factor, contribution
    );
    Ok(Term {
        order,
        derivative: step.form.clone(),
        point: a,
        value_at_point,
        coefficient,
        power_factor,
        contribution,
    })
}

// 0^0 is 1 here
fn power_of_offset(offset: f64, order: usize) -> f64 {
    if order == 0 {
        return 1.0;
    }
    match i32::try_from(order) {
        Ok(n) => offset.powi(n),
        Err(_) => offset.powf(order as f64),
    }
}

/// Sums the contributions in ascending order of n.
pub fn assemble_series(variable: &str, a: f64, x: f64, terms: Vec<Term>) -> Series {
    let total = terms.iter().fold(0.0, |acc, term| acc + term.contribution);
    Series {
        variable: variable.to_string(),
        expansion_point: a,
        target: x,
        terms,
        total,
    }
}

impl Series {
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn expansion_point(&self) -> f64 {
        self.expansion_point
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn degree(&self) -> usize {
        self.terms.len().saturating_sub(1)
    }

    /// Taylor polynomial Σ f⁽ⁿ⁾(a)/n! · (v − a)ⁿ as a simplified expression in the tracked variable.
    pub fn polynomial(&self) -> Expr {
        let offset = Expr::Var(self.variable.clone()) - Expr::Const(self.expansion_point);
        self.terms
            .iter()
            .map(|term| {
                let weight = Expr::Const(term.coefficient * term.value_at_point);
                if term.order == 0 {
                    weight
                } else {
                    weight * offset.clone().pow(Expr::Const(term.order as f64))
                }
            })
            .reduce(|acc, term| acc + term)
            .unwrap_or(Expr::Const(0.0))
            .simplify()
    }

    /// Value of the same polynomial at another target, without differentiating again.
    pub fn evaluate_at(&self, x: f64) -> f64 {
        self.terms.iter().fold(0.0, |acc, term| {
            acc + term.coefficient
                * term.value_at_point
                * power_of_offset(x - self.expansion_point, term.order)
        })
    }

    /// (x, approximation) pairs on `n` evenly spaced targets from `start` to `end`.
    pub fn sweep(&self, start: f64, end: f64, n: usize) -> Vec<(f64, f64)> {
        linspace(start, end, n)
            .into_iter()
            .map(|x| (x, self.evaluate_at(x)))
            .collect()
    }

    /// Per-order breakdown as a pretty table.
    pub fn to_table(&self) -> Table {
        let mut builder = Builder::default();
        builder.push_record([
            "n".to_string(),
            "derivative".to_string(),
            format!("f(n)({})", self.expansion_point),
            "1/n!".to_string(),
            format!("(x-a)^n, x = {}", self.target),
            "contribution".to_string(),
        ]);
        for term in &self.terms {
            builder.push_record([
                term.order.to_string(),
                term.derivative_text(),
                term.value_at_point.to_string(),
                format!("{:e}", term.coefficient),
                term.power_factor.to_string(),
                term.contribution.to_string(),
            ]);
        }
        builder.push_record([
            String::new(),
            "total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            self.total.to_string(),
        ]);
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table
    }
}

/// Expands `text` around `a` with the given config and evaluates the polynomial at `x`.
pub fn expand_with_config(
    text: &str,
    x: f64,
    a: f64,
    degree: Option<usize>,
    config: &ExpansionConfig,
) -> Result<Series, TaylorError> {
    let expression = Expression::new(text, degree, config)?;
    let variable = expression.variable();
    info!(
        "expanding '{}' in {} around a = {} up to order {} (transcendental: {})",
        expression.text(),
        variable,
        a,
        expression.degree(),
        expression.is_transcendental()
    );
    if expression.degree() == 0 && x != a {
        warn!(
            "degree 0: the approximation at x = {} is the value at a = {} only",
            x, a
        );
    }
    let steps = derivative_chain(expression.form(), variable, expression.degree())?;
    let terms = steps
        .iter()
        .map(|step| evaluate_term(step, variable, a, x))
        .collect::<Result<Vec<_>, _>>()?;
    let series = assemble_series(variable, a, x, terms);
    info!(
        "expansion of '{}' at x = {}: {}",
        expression.text(),
        x,
        series.total()
    );
    Ok(series)
}

/// Expands `text` around `a` and evaluates at `x`, with the default config.
///
/// `degree` overrides the automatic choice: 15 for transcendental expressions, the highest
/// explicit power of the variable otherwise.
pub fn expand(text: &str, x: f64, a: f64, degree: Option<usize>) -> Result<Series, TaylorError> {
    expand_with_config(text, x, a, degree, &ExpansionConfig::default())
}

/// Same as `expand` but returns only the approximation value.
pub fn expand_total(text: &str, x: f64, a: f64, degree: Option<usize>) -> Result<f64, TaylorError> {
    expand(text, x, a, degree).map(|series| series.total())
}

/// Expansion entry point carrying its own configuration.
///
/// # Example
/// ```
/// use RustedTaylor::taylor::taylor_series::TaylorSeries;
/// let taylor = TaylorSeries::new().with_transcendental_degree(8);
/// let series = taylor.expand("e**x", 1.0, 0.0, None).unwrap();
/// assert_eq!(series.terms().len(), 9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaylorSeries {
    pub config: ExpansionConfig,
}

impl TaylorSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ExpansionConfig) -> Self {
        TaylorSeries { config }
    }

    pub fn with_transcendental_degree(mut self, degree: usize) -> Self {
        self.config.transcendental_degree = degree;
        self
    }

    pub fn with_canonical_variable(mut self, variable: &str) -> Self {
        self.config.canonical_variable = variable.to_string();
        self
    }

    pub fn expand(
        &self,
        text: &str,
        x: f64,
        a: f64,
        degree: Option<usize>,
    ) -> Result<Series, TaylorError> {
        expand_with_config(text, x, a, degree, &self.config)
    }

    pub fn expand_total(
        &self,
        text: &str,
        x: f64,
        a: f64,
        degree: Option<usize>,
    ) -> Result<f64, TaylorError> {
        self.expand(text, x, a, degree).map(|series| series.total())
    }
}
