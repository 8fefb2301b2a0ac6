//! a module turns a String expression into a symbolic expression
//!
//! # Example
//! ```
//! use RustedTaylor::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("-0.5*x**5 + 3*x^2 + tan(x)").unwrap();
//! println!(" parsed_expression {}", parsed_expression);
//! ```
//
//                      grammar, lowest precedence first
//      expression  :=  term   (('+' | '-') term)*
//      term        :=  unary  (('*' | '/') unary)*
//      unary       :=  ('-' | '+') unary | power
//      power       :=  atom   (('**' | '^') unary)?        right associative
//      atom        :=  number | identifier | call | '(' expression ')'
//      call        :=  (exp | ln | log | sin | cos | tan | tg) '(' expression ')'
//
// The bare identifiers `e` and `E` are Euler's number: `e**u` becomes Exp(u) and a lone `e`
// becomes the constant. They can never name a variable.
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::SymbolicError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, not, opt, recognize},
    error::{Error, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};
use std::f64::consts::E;

/// names accepted in function-call position and the node each one builds
const FUNCTIONS: [(&str, fn(Box<Expr>) -> Expr); 7] = [
    ("exp", Expr::Exp),
    ("ln", Expr::Ln),
    ("log", Expr::Ln),
    ("sin", Expr::sin),
    ("cos", Expr::cos),
    ("tan", Expr::tg),
    ("tg", Expr::tg),
];

/// true for the identifiers reserved for Euler's number
pub fn is_euler_marker(name: &str) -> bool {
    name == "e" || name == "E"
}

/// true for identifiers that are function names rather than variables
pub fn is_function_name(name: &str) -> bool {
    FUNCTIONS.iter().any(|(f, _)| *f == name)
}

fn number(input: &str) -> IResult<&str, Expr> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = opt(recognize((one_of("eE"), opt(one_of("+-")), digit1)));
    map_res(recognize(pair(mantissa, exponent)), |s: &str| {
        s.parse::<f64>().map(Expr::Const)
    })
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn identifier_or_call(input: &str) -> IResult<&str, Expr> {
    let (rest, name) = identifier(input)?;
    let (after_bracket, bracket) = opt(preceded(multispace0, char('('))).parse(rest)?;
    if bracket.is_none() {
        let expr = if is_euler_marker(name) {
            Expr::Const(E)
        } else {
            Expr::Var(name.to_string())
        };
        return Ok((rest, expr));
    }
    let Some((_, build)) = FUNCTIONS.iter().find(|(f, _)| *f == name) else {
        // a call to something we cannot differentiate: stop here, alternatives won't help
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::Tag)));
    };
    let (rest, argument) =
        terminated(expression, preceded(multispace0, char(')'))).parse(after_bracket)?;
    Ok((rest, build(Box::new(argument))))
}

fn parenthesized(input: &str) -> IResult<&str, Expr> {
    delimited(char('('), expression, preceded(multispace0, char(')'))).parse(input)
}

fn atom(input: &str) -> IResult<&str, Expr> {
    preceded(multispace0, alt((number, identifier_or_call, parenthesized))).parse(input)
}

fn power(input: &str) -> IResult<&str, Expr> {
    let (rest, base) = atom(input)?;
    let power_sign = preceded(multispace0, alt((tag("**"), tag("^"))));
    let (rest, exponent) = opt(preceded(power_sign, unary)).parse(rest)?;
    let expr = match exponent {
        None => base,
        // e**u is the exponential function, not a power of a variable called e
        Some(exponent) if matches!(base, Expr::Const(c) if c == E) => Expr::Exp(Box::new(exponent)),
        Some(exponent) => Expr::Pow(Box::new(base), Box::new(exponent)),
    };
    Ok((rest, expr))
}

fn unary(input: &str) -> IResult<&str, Expr> {
    alt((
        map(preceded(preceded(multispace0, char('-')), unary), |expr| match expr {
            Expr::Const(val) => Expr::Const(-val),
            other => -other,
        }),
        preceded(preceded(multispace0, char('+')), unary),
        power,
    ))
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (rest, first) = unary(input)?;
    let operator = preceded(
        multispace0,
        alt((terminated(char('*'), not(char('*'))), char('/'))),
    );
    let (rest, tail) = many0(pair(operator, unary)).parse(rest)?;
    let expr = tail.into_iter().fold(first, |acc, (op, rhs)| match op {
        '*' => Expr::Mul(Box::new(acc), Box::new(rhs)),
        _ => Expr::Div(Box::new(acc), Box::new(rhs)),
    });
    Ok((rest, expr))
}

fn expression(input: &str) -> IResult<&str, Expr> {
    let (rest, first) = term(input)?;
    let operator = preceded(multispace0, one_of("+-"));
    let (rest, tail) = many0(pair(operator, term)).parse(rest)?;
    let expr = tail.into_iter().fold(first, |acc, (op, rhs)| match op {
        '+' => Expr::Add(Box::new(acc), Box::new(rhs)),
        _ => Expr::Sub(Box::new(acc), Box::new(rhs)),
    });
    Ok((rest, expr))
}

fn describe_failure(input: &str, remaining: &str) -> String {
    let position = input.len() - remaining.len();
    if remaining.trim().is_empty() {
        return "unexpected end of expression".to_string();
    }
    if let Ok((after, name)) = identifier(remaining) {
        if after.trim_start().starts_with('(') && !is_function_name(name) {
            return format!("unknown function '{}' at position {}", name, position);
        }
    }
    format!("unexpected input at position {}: '{}'", position, remaining.trim())
}

/// Parses the whole input into an expression tree. Any unconsumed input is an error.
pub fn parse_expression_func(input: &str) -> Result<Expr, SymbolicError> {
    if input.trim().is_empty() {
        return Err(SymbolicError::Parse {
            input: input.to_string(),
            reason: "empty expression".to_string(),
        });
    }
    match all_consuming(terminated(expression, multispace0)).parse(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(SymbolicError::Parse {
            input: input.to_string(),
            reason: describe_failure(input, e.input),
        }),
        Err(nom::Err::Incomplete(_)) => Err(SymbolicError::Parse {
            input: input.to_string(),
            reason: "incomplete input".to_string(),
        }),
    }
}

impl Expr {
    /// Parses a mathematical expression from string representation.
    ///
    /// # Supported Syntax
    /// - Variables: x, t, var_name
    /// - Constants: 3.14, 2, 1e-6, and Euler's number `e`
    /// - Operators: +, -, *, /, ** or ^
    /// - Functions: exp, ln/log, sin, cos, tan/tg
    /// - Parentheses for grouping
    pub fn parse_expression(input: &str) -> Result<Expr, SymbolicError> {
        parse_expression_func(input)
    }
}
