//! # Symbolic Engine Derivatives Module
//!
//! Extends the symbolic engine with analytical differentiation.
//!
//! ## Key Methods
//!
//! - `diff(var: &str)` - analytical derivative with respect to one variable
//! - `n_th_derivative1D()` - higher-order derivatives, simplified after every step
//!
//! ## Differentiation Rules
//!
//! - Sum and difference rules
//! - Product rule: d(f*g) = f'*g + f*g'
//! - Quotient rule: d(f/g) = (f'*g - f*g')/g^2
//! - Power rule for exponents free of the variable, general rule b^g * (g'*ln(b) + g*b'/b) otherwise
//! - Chain rule for exp, ln, sin, cos and tg
//!
//! The derivative of tg(u) is written as (1 + tg(u)^2) * u' rather than u'/cos(u)^2: repeated
//! derivatives then stay polynomials in tg(u), which the simplifier keeps compact.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::SymbolicError;

impl Expr {
    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// # Returns
    /// New symbolic expression representing the derivative, or `UndefinedDerivative`
    /// for a variable exponent over a non-positive constant base.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.clone().pow(Expr::Const(2.0)); // x^2
    /// let df_dx = f.diff("x")?; // 2*x^1*1
    /// ```
    pub fn diff(&self, var: &str) -> Result<Expr, SymbolicError> {
        let derivative = match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)?), Box::new(rhs.diff(var)?)),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)?), Box::new(rhs.diff(var)?)),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)?), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)?))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)?), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)?), lhs.clone())),
                )),
                Box::new(Expr::Pow(rhs.clone(), Box::new(Expr::Const(2.0)))),
            ),
            Expr::Pow(base, exp) => self.diff_power(base, exp, var)?,
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)?))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)?), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)?))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)?),
            ),
            Expr::tg(expr) => Expr::Mul(
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::tg(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)?),
            ),
        };
        Ok(derivative)
    }

    fn diff_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, SymbolicError> {
        if !exp.contains_variable(var) {
            // n * b^(n-1) * b'
            let reduced = match exp {
                Expr::Const(n) => Expr::Const(n - 1.0),
                _ => Expr::Sub(Box::new(exp.clone()), Box::new(Expr::Const(1.0))),
            };
            return Ok(Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(exp.clone()),
                    Box::new(Expr::Pow(Box::new(base.clone()), Box::new(reduced))),
                )),
                Box::new(base.diff(var)?),
            ));
        }
        if let Expr::Const(b) = base {
            if *b <= 0.0 {
                return Err(SymbolicError::UndefinedDerivative {
                    expr: self.to_string(),
                    var: var.to_string(),
                    reason: format!("variable exponent over non-positive base {}", b),
                });
            }
            // b^g * ln(b) * g'
            return Ok(Expr::Mul(
                Box::new(Expr::Mul(Box::new(self.clone()), Box::new(base.clone().ln()))),
                Box::new(exp.diff(var)?),
            ));
        }
        // b^g * (g' * ln(b) + g * b' / b)
        Ok(Expr::Mul(
            Box::new(self.clone()),
            Box::new(Expr::Add(
                Box::new(Expr::Mul(Box::new(exp.diff(var)?), Box::new(base.clone().ln()))),
                Box::new(Expr::Div(
                    Box::new(Expr::Mul(Box::new(exp.clone()), Box::new(base.diff(var)?))),
                    Box::new(base.clone()),
                )),
            )),
        ))
    }

    /// Computes the n-th derivative, simplifying after each differentiation.
    ///
    /// For n = 0 the expression is returned unchanged.
    pub fn n_th_derivative1D(&self, var_name: &str, n: usize) -> Result<Expr, SymbolicError> {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff(var_name)?.simplify();
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    fn at(expr: &Expr, value: f64) -> f64 {
        expr.eval1D("x", value).unwrap()
    }

    #[test]
    fn test_diff_constant_and_variable() {
        assert_eq!(Expr::Const(7.0).diff("x").unwrap(), Expr::Const(0.0));
        assert_eq!(x().diff("x").unwrap(), Expr::Const(1.0));
        assert_eq!(Expr::Var("y".to_string()).diff("x").unwrap(), Expr::Const(0.0));
    }

    #[test]
    fn test_diff_polynomial() {
        // d/dx (3x^2 + 2x + 1) = 6x + 2
        let f = Expr::parse_expression("3*x**2 + 2*x + 1").unwrap();
        let df = f.diff("x").unwrap();
        assert_relative_eq!(at(&df, 2.0), 14.0);
        assert_relative_eq!(at(&df, -1.0), -4.0);
    }

    #[test]
    fn test_diff_quotient() {
        // d/dx (1/x) = -1/x^2
        let f = Expr::Const(1.0) / x();
        let df = f.diff("x").unwrap();
        assert_relative_eq!(at(&df, 2.0), -0.25);
    }

    #[test]
    fn test_diff_transcendental() {
        let sin_df = Expr::sin(x().boxed()).diff("x").unwrap();
        assert_relative_eq!(at(&sin_df, 0.3), 0.3_f64.cos(), epsilon = 1e-14);

        let cos_df = Expr::cos(x().boxed()).diff("x").unwrap();
        assert_relative_eq!(at(&cos_df, 0.3), -(0.3_f64.sin()), epsilon = 1e-14);

        let exp_df = (Expr::Const(2.0) * x()).exp().diff("x").unwrap();
        assert_relative_eq!(at(&exp_df, 0.5), 2.0 * 1.0_f64.exp(), epsilon = 1e-12);

        let ln_df = x().ln().diff("x").unwrap();
        assert_relative_eq!(at(&ln_df, 4.0), 0.25);
    }

    #[test]
    fn test_diff_tangent_uses_tangent_squared() {
        let df = Expr::tg(x().boxed()).diff("x").unwrap();
        let expected = Expr::Mul(
            Box::new(Expr::Add(
                Box::new(Expr::Const(1.0)),
                Box::new(Expr::Pow(
                    Box::new(Expr::tg(x().boxed())),
                    Box::new(Expr::Const(2.0)),
                )),
            )),
            Box::new(Expr::Const(1.0)),
        );
        assert_eq!(df, expected);
        let secant_squared = 1.0 / 0.4_f64.cos().powi(2);
        assert_relative_eq!(at(&df, 0.4), secant_squared, epsilon = 1e-13);
    }

    #[test]
    fn test_diff_variable_exponent() {
        // d/dx 2^x = 2^x ln 2
        let f = Expr::Const(2.0).pow(x());
        let df = f.diff("x").unwrap();
        assert_relative_eq!(at(&df, 3.0), 8.0 * 2.0_f64.ln(), epsilon = 1e-12);

        // d/dx x^x = x^x (ln x + 1)
        let f = x().pow(x());
        let df = f.diff("x").unwrap();
        assert_relative_eq!(at(&df, 2.0), 4.0 * (2.0_f64.ln() + 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_diff_variable_exponent_over_negative_base() {
        let f = Expr::Const(-2.0).pow(x());
        assert!(matches!(
            f.diff("x"),
            Err(SymbolicError::UndefinedDerivative { .. })
        ));
    }

    #[test]
    fn test_n_th_derivative() {
        let f = Expr::parse_expression("x**5").unwrap();
        assert_eq!(f.n_th_derivative1D("x", 0).unwrap(), f);
        // 5*4*3 x^2
        let d3 = f.n_th_derivative1D("x", 3).unwrap();
        assert_relative_eq!(at(&d3, 2.0), 240.0);
        let d6 = f.n_th_derivative1D("x", 6).unwrap();
        assert_eq!(d6, Expr::Const(0.0));
    }
}
