// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::symbolic::symbolic_engine::Expr;
use crate::taylor::taylor_series::{TaylorSeries, expand, expand_total};
use crate::Utils::task_parser::parse_document_as;
use crate::Utils::taylor_task::TaylorTask;
use strum_macros::EnumIter;

/*
three classic expansions:
quintic polynomial  -0.5*x**5 + 3*x**2 + 2*x + 1   at x = 5 around 0, exact with degree 5
exponential         e**x                           at x = 1 around 0, ≈ e
tangent             tan(x)                         at x = 0.1 around 0, ≈ tan(0.1)
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum TaylorExample {
    Quintic,
    Exponential,
    Tangent,
}

impl TaylorExample {
    pub fn expression(&self) -> &'static str {
        match self {
            TaylorExample::Quintic => "-0.5*x**5 + 3*x**2 + 2*x + 1",
            TaylorExample::Exponential => "e**x",
            TaylorExample::Tangent => "tan(x)",
        }
    }

    /// (x, a)
    pub fn points(&self) -> (f64, f64) {
        match self {
            TaylorExample::Quintic => (5.0, 0.0),
            TaylorExample::Exponential => (1.0, 0.0),
            TaylorExample::Tangent => (0.1, 0.0),
        }
    }

    /// value of the function itself at x
    pub fn exact(&self) -> f64 {
        let (x, _) = self.points();
        match self {
            TaylorExample::Quintic => -0.5 * x.powi(5) + 3.0 * x.powi(2) + 2.0 * x + 1.0,
            TaylorExample::Exponential => x.exp(),
            TaylorExample::Tangent => x.tan(),
        }
    }
}

#[allow(dead_code)]
pub fn taylor_examples(example: usize) {
    match example {
        0 => {
            // the three scenarios with their breakdown
            use strum::IntoEnumIterator;
            for case in TaylorExample::iter() {
                let (x, a) = case.points();
                match expand(case.expression(), x, a, None) {
                    Ok(series) => {
                        println!("{} at x = {}, a = {}", case.expression(), x, a);
                        println!("{}", series.to_table());
                        println!(
                            "approximation {}, exact {}, error {:e}",
                            series.total(),
                            case.exact(),
                            (series.total() - case.exact()).abs()
                        );
                    }
                    Err(e) => println!("{:?} failed: {}", case, e),
                }
            }
        }
        1 => {
            // how the approximation of tan improves with the degree
            for degree in [1, 3, 5, 9, 15] {
                match expand_total("tan(x)", 0.3, 0.0, Some(degree)) {
                    Ok(total) => println!(
                        "degree {:2}: {:.15}  error {:e}",
                        degree,
                        total,
                        (total - 0.3_f64.tan()).abs()
                    ),
                    Err(e) => println!("degree {} failed: {}", degree, e),
                }
            }
        }
        2 => {
            // one expansion, then the polynomial reused at several targets
            let taylor = TaylorSeries::new().with_transcendental_degree(10);
            match taylor.expand("sin(x)*e**x", 0.5, 0.0, None) {
                Ok(series) => {
                    println!("Taylor polynomial: {}", series.polynomial());
                    for (x, approx) in series.sweep(-1.0, 1.0, 9) {
                        let exact = x.sin() * x.exp();
                        println!("x = {:5.2}: {:.12} vs {:.12}", x, approx, exact);
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
        3 => {
            // errors are reported, never papered over
            for text in ["(x + 1", "1/x", "x*y", "(-2)**x"] {
                match expand(text, 1.0, 0.0, Some(3)) {
                    Ok(series) => println!("{}: {}", text, series.total()),
                    Err(e) => println!("{}: {}", text, e),
                }
            }
        }
        4 => {
            // the same computation driven by a task document
            let task = "expansion\n expression: e**x\n x: 1.5\n a: 1\nsettings\n transcendental_degree: 12\n";
            match parse_document_as(task) {
                Ok(document) => match TaylorTask::from_document(&document).and_then(|t| t.run()) {
                    Ok(series) => println!("{}", series.to_table()),
                    Err(e) => println!("{}", e),
                },
                Err(e) => println!("{}", e),
            }
        }
        5 => {
            // the derivative chain of tan stays a polynomial in tg(x)
            if let Ok(f) = Expr::parse_expression("tan(x)") {
                let mut derivative = f;
                for order in 1..=6 {
                    match derivative.diff("x") {
                        Ok(d) => derivative = d.simplify(),
                        Err(e) => {
                            println!("{}", e);
                            break;
                        }
                    }
                    println!("order {}: {}", order, derivative);
                }
            }
        }
        _ => {
            println!("example {} does not exist", example);
        }
    }
}
