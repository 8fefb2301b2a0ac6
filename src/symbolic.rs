#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedTaylor::symbolic::symbolic_engine::Expr;
/// let input = "-0.5*x**5 + 3*x**2 + 2*x + 1";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// let parsed_function = parsed_expression.lambdify1D("x").unwrap();
/// println!("{}, Rust function: {}  \n", input, parsed_function(5.0));
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds a symbolic expression as a tree and builds it with operator syntax
/// 2) substitutes values for variables and lists the variables of an expression
///# Example#
/// ```
/// use RustedTaylor::symbolic::symbolic_engine::Expr;
/// let input = "tan(x) + e**x";
/// // here you've got symbolic expression
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// // return vec of all arguments
/// let all = parsed_expression.all_arguments_are_variables();
/// assert_eq!(all, vec!["x"]);
/// // differentiate with respect to x and bring the result into canonical form
/// let df_dx = parsed_expression.diff("x").unwrap().simplify();
/// println!("df_dx = {}", df_dx);
/// // evaluate at a point
/// let value = df_dx.eval1D("x", 0.0).unwrap();
/// assert!((value - 2.0).abs() < 1e-12);
/// ```
pub mod symbolic_engine;
/// differentiation rules and higher-order derivatives
pub mod symbolic_engine_derivatives;
/// errors of parsing, differentiation and evaluation
pub mod symbolic_errors;
/// compiles expressions into closures and evaluates them at a point
pub mod symbolic_lambdify;
/// canonical polynomial-over-atoms form used after every differentiation
pub mod symbolic_simplify;
/// factorials and grids
pub mod utils;
