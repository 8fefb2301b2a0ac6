//! Taylor series expansion of single-variable expressions
///
/// # Example
/// ```
/// use RustedTaylor::taylor::taylor_series::expand;
/// let series = expand("e**x", 1.0, 0.0, None).unwrap();
/// for term in series.terms() {
///     println!("{}: {} -> {}", term.order, term.derivative_text(), term.contribution);
/// }
/// println!("{}", series.to_table());
/// assert!((series.total() - std::f64::consts::E).abs() < 1e-12);
/// ```
pub mod taylor_series;
/// decides transcendental vs polynomial-like and finds the variable
pub mod expression_classifier;
/// how many derivative orders to compute
pub mod degree_selector;
/// default degree and variable
pub mod expansion_config;
pub mod taylor_errors;
mod taylor_tests;
