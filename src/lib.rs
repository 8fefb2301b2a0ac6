// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # RustedTaylor
//! Taylor series approximation of single-variable functions given as text:
//! the expression is parsed into a symbolic tree, differentiated order by order,
//! every derivative is simplified and evaluated at the expansion point and the
//! per-order contributions f⁽ⁿ⁾(a)/n!·(x−a)ⁿ are summed up.
//! ```
//! use RustedTaylor::taylor::taylor_series::expand;
//! let series = expand("-0.5*x**5 + 3*x**2 + 2*x + 1", 5.0, 0.0, None).unwrap();
//! assert_eq!(series.total(), -1476.5);
//! ```
pub mod Examples;
pub mod Utils;
pub mod symbolic;
pub mod taylor;
