use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::SymbolicError;

/// single-argument closure produced by `lambdify1D`
pub type Function1D = Box<dyn Fn(f64) -> f64 + Send + Sync>;

fn integer_exponent(exp: &Expr) -> Option<i32> {
    match exp {
        Expr::Const(n) if n.fract() == 0.0 && n.abs() <= i32::MAX as f64 => Some(*n as i32),
        _ => None,
    }
}

impl Expr {
    /// LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// Every variable of the expression must be `var`; a constant expression is accepted and
    /// ignores its argument. Integer constant exponents compile to `powi`.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D("x")?;
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self, var: &str) -> Result<Function1D, SymbolicError> {
        self.check_bound(var)?;
        Ok(self.compile1D())
    }

    fn check_bound(&self, var: &str) -> Result<(), SymbolicError> {
        match self
            .all_arguments_are_variables()
            .into_iter()
            .find(|name| name != var)
        {
            Some(name) => Err(SymbolicError::UnboundVariable { name }),
            None => Ok(()),
        }
    }

    fn compile1D(&self) -> Function1D {
        match self {
            Expr::Var(_) => Box::new(|x| x),
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let lf = lhs.compile1D();
                let rf = rhs.compile1D();
                Box::new(move |x| lf(x) + rf(x))
            }
            Expr::Sub(lhs, rhs) => {
                let lf = lhs.compile1D();
                let rf = rhs.compile1D();
                Box::new(move |x| lf(x) - rf(x))
            }
            Expr::Mul(lhs, rhs) => {
                let lf = lhs.compile1D();
                let rf = rhs.compile1D();
                Box::new(move |x| lf(x) * rf(x))
            }
            Expr::Div(lhs, rhs) => {
                let lf = lhs.compile1D();
                let rf = rhs.compile1D();
                Box::new(move |x| lf(x) / rf(x))
            }
            Expr::Pow(b, e) => {
                let bf = b.compile1D();
                match integer_exponent(e) {
                    Some(n) => Box::new(move |x| bf(x).powi(n)),
                    None => {
                        let ef = e.compile1D();
                        Box::new(move |x| bf(x).powf(ef(x)))
                    }
                }
            }
            Expr::Exp(e) => {
                let f = e.compile1D();
                Box::new(move |x| f(x).exp())
            }
            Expr::Ln(e) => {
                let f = e.compile1D();
                Box::new(move |x| f(x).ln())
            }
            Expr::sin(e) => {
                let f = e.compile1D();
                Box::new(move |x| f(x).sin())
            }
            Expr::cos(e) => {
                let f = e.compile1D();
                Box::new(move |x| f(x).cos())
            }
            Expr::tg(e) => {
                let f = e.compile1D();
                Box::new(move |x| f(x).tan())
            }
        }
    }

    /// Evaluates the expression with `var` bound to `value`.
    ///
    /// A result that is not finite (division by zero, log of a non-positive number, overflow)
    /// is reported as `SymbolicError::Domain`. Goes through the same closure as `lambdify1D`.
    pub fn eval1D(&self, var: &str, value: f64) -> Result<f64, SymbolicError> {
        let func = self.lambdify1D(var)?;
        let result = func(value);
        if result.is_finite() {
            Ok(result)
        } else {
            Err(SymbolicError::Domain {
                expr: self.to_string(),
                var: var.to_string(),
                value,
                result,
            })
        }
    }
}
