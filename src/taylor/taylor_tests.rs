/////////////////////////////TESTS////////////////////////////////////////////////////
/*
expansion tests:
degree selection for polynomials
single term for degree 0
vanishing power factors at x = a
derivative chain consistency
accuracy of transcendental expansions
error surfacing: parse, differentiation, evaluation domain, several variables
reproducibility and concurrent expansions
polynomial, re-evaluation and table of a built series
*/

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::Expr;
    use crate::taylor::expansion_config::ExpansionConfig;
    use crate::taylor::taylor_errors::TaylorError;
    use crate::taylor::taylor_series::{
        DerivativeStep, Expression, TaylorSeries, derivative_chain, evaluate_term, expand,
        expand_total,
    };
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const QUINTIC: &str = "-0.5*x**5 + 3*x**2 + 2*x + 1";

    #[test]
    fn test_quintic_expansion() {
        let series = expand(QUINTIC, 5.0, 0.0, None).unwrap();
        assert_eq!(series.degree(), 5);
        assert_eq!(series.terms().len(), 6);
        let orders: Vec<usize> = series.terms().iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 4, 5]);
        // -1562.5 + 75 + 10 + 1, every partial product is exact in f64
        assert_eq!(series.total(), -1476.5);
        let contributions: Vec<f64> = series.terms().iter().map(|t| t.contribution).collect();
        assert_eq!(contributions, vec![1.0, 10.0, 75.0, 0.0, 0.0, -1562.5]);
    }

    #[test]
    fn test_expression_caches_classification_and_degree() {
        let expression = Expression::new(QUINTIC, None, &ExpansionConfig::default()).unwrap();
        assert_eq!(expression.variable(), "x");
        assert!(!expression.is_transcendental());
        assert_eq!(expression.degree(), 5);
        assert_eq!(expression.text(), QUINTIC);
        let expression = Expression::new("tan(x)", None, &ExpansionConfig::default()).unwrap();
        assert!(expression.is_transcendental());
        assert_eq!(expression.degree(), 15);
    }

    #[test]
    fn test_degree_zero_has_single_term() {
        let at_far = expand(QUINTIC, 5.0, 1.0, Some(0)).unwrap();
        let at_near = expand(QUINTIC, -3.0, 1.0, Some(0)).unwrap();
        assert_eq!(at_far.terms().len(), 1);
        // f(1) = -0.5 + 3 + 2 + 1
        assert_relative_eq!(at_far.terms()[0].contribution, 5.5);
        assert_relative_eq!(at_far.total(), 5.5);
        assert_eq!(at_far.total(), at_near.total());
        assert_eq!(at_far.terms()[0].power_factor, 1.0);
    }

    #[test]
    fn test_target_equal_to_point() {
        let series = expand("x**3 - 2*x + 1", 2.0, 2.0, None).unwrap();
        assert_eq!(series.terms()[0].power_factor, 1.0);
        for term in &series.terms()[1..] {
            assert_eq!(term.power_factor, 0.0);
            assert_eq!(term.contribution, 0.0);
        }
        assert_relative_eq!(series.total(), 5.0);
        assert_eq!(series.total(), series.terms()[0].contribution);
    }

    #[test]
    fn test_derivative_chain_consistency() {
        for text in ["tan(x)", "sin(x)*exp(x)", QUINTIC, "1/(1 - x)"] {
            let form = Expr::parse_expression(text).unwrap();
            let steps = derivative_chain(&form, "x", 6).unwrap();
            assert_eq!(steps.len(), 7);
            assert_eq!(steps[0].form, form, "order 0 is the expression verbatim");
            for n in 1..steps.len() {
                assert_eq!(steps[n].order, n);
                let expected = steps[n - 1].form.diff("x").unwrap().simplify();
                assert_eq!(steps[n].form, expected, "{} at order {}", text, n);
            }
            let sixth = form.n_th_derivative1D("x", 6).unwrap();
            assert_eq!(steps[6].form, sixth);
        }
    }

    #[test]
    fn test_identity_function() {
        assert_eq!(expand_total("x", 5.0, 0.0, Some(1)).unwrap(), 5.0);
        // a linear expression gets degree 0 when nothing is asked for
        let series = expand("x", 5.0, 0.0, None).unwrap();
        assert_eq!(series.terms().len(), 1);
        assert_eq!(series.total(), 0.0);
    }

    #[test]
    fn test_tangent_near_zero() {
        let series = expand("tan(x)", 0.1, 0.0, None).unwrap();
        assert_eq!(series.terms().len(), 16);
        assert_abs_diff_eq!(series.total(), 0.1_f64.tan(), epsilon = 1e-10);
        assert_abs_diff_eq!(series.total(), 0.10033467208545055, epsilon = 1e-10);
        // even orders of an odd function vanish
        for term in series.terms().iter().filter(|t| t.order % 2 == 0) {
            assert_abs_diff_eq!(term.value_at_point, 0.0, epsilon = 1e-12);
        }
        // tan'''(0) = 2
        assert_relative_eq!(series.terms()[3].value_at_point, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_marker() {
        let total = expand_total("e**x", 1.0, 0.0, None).unwrap();
        assert_abs_diff_eq!(total, std::f64::consts::E, epsilon = 1e-12);
        let total = expand_total("E^x", 1.5, 1.0, None).unwrap();
        assert_abs_diff_eq!(total, 1.5_f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_sine_and_cosine() {
        assert_abs_diff_eq!(
            expand_total("sin(x)", 0.5, 0.0, None).unwrap(),
            0.5_f64.sin(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            expand_total("cos(x)", 1.0, 0.0, None).unwrap(),
            1.0_f64.cos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_non_default_point() {
        // ln around 1 converges slowly, the fixed degree still gives several digits at 1.2
        let total = expand_total("ln(x) + sin(x)", 1.2, 1.0, None).unwrap();
        assert_abs_diff_eq!(total, 1.2_f64.ln() + 1.2_f64.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_malformed_expression() {
        // several letters in broken text are still a parse failure
        for text in ["(x + 1", "x +* 2", "", "sinh(x)", "x*y + (", "speed * time )"] {
            assert!(
                matches!(expand(text, 1.0, 0.0, None), Err(TaylorError::Parse(_))),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_huge_integer_exponents() {
        let series = expand("(x**2)**2000000000", 1.0, 0.5, Some(1)).unwrap();
        assert_eq!(series.total(), 0.0);

        let series = expand("(x**2)**2000000000", 1.0, 1.0, Some(1)).unwrap();
        assert_eq!(series.terms()[0].value_at_point, 1.0);
        assert_relative_eq!(series.terms()[1].value_at_point, 4.0e9, max_relative = 1e-12);
        assert_eq!(series.total(), 1.0);
    }

    #[test]
    fn test_evaluation_domain_error() {
        match expand("1/x", 1.0, 0.0, None) {
            Err(TaylorError::EvaluationDomain { order, point, .. }) => {
                assert_eq!(order, 0);
                assert_eq!(point, 0.0);
            }
            other => panic!("expected domain error, got {:?}", other),
        }
        assert!(matches!(
            expand("ln(x)", 1.0, 0.0, None),
            Err(TaylorError::EvaluationDomain { .. })
        ));
    }

    #[test]
    fn test_undefined_derivative() {
        match expand("(-2)**x", 1.0, 0.0, Some(2)) {
            Err(TaylorError::DifferentiationUndefined { order, .. }) => assert_eq!(order, 1),
            other => panic!("expected differentiation error, got {:?}", other),
        }
    }

    #[test]
    fn test_several_variables_rejected() {
        assert!(matches!(
            expand("x*y + 1", 1.0, 0.0, None),
            Err(TaylorError::UnsupportedMultiVariable { .. })
        ));
    }

    #[test]
    fn test_evaluate_term_directly() {
        let step = DerivativeStep {
            order: 3,
            form: Expr::Const(12.0),
        };
        let term = evaluate_term(&step, "x", 1.0, 3.0).unwrap();
        assert_relative_eq!(term.coefficient, 1.0 / 6.0);
        assert_eq!(term.power_factor, 8.0);
        assert_relative_eq!(term.contribution, 16.0);
        assert_eq!(term.derivative_text(), "12");
    }

    #[test]
    fn test_expansion_is_reproducible() {
        let first = expand("tan(x) + x**2", 0.3, 0.1, None).unwrap();
        let second = expand("tan(x) + x**2", 0.3, 0.1, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_expansions() {
        let expected = expand_total("sin(x)*e**x", 0.4, 0.0, None).unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| expand_total("sin(x)*e**x", 0.4, 0.0, None).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_series_polynomial_and_reevaluation() {
        let series = expand(QUINTIC, 5.0, 0.0, None).unwrap();
        let polynomial = series.polynomial();
        let exact = Expr::parse_expression(QUINTIC).unwrap();
        for x in [-1.0, 0.5, 2.0] {
            assert_relative_eq!(
                polynomial.eval1D("x", x).unwrap(),
                exact.eval1D("x", x).unwrap(),
                epsilon = 1e-12
            );
            assert_relative_eq!(
                series.evaluate_at(x),
                exact.eval1D("x", x).unwrap(),
                epsilon = 1e-12
            );
        }

        let tan = expand("tan(x)", 0.1, 0.0, None).unwrap();
        assert_relative_eq!(
            tan.evaluate_at(0.2),
            expand_total("tan(x)", 0.2, 0.0, None).unwrap(),
            epsilon = 1e-15
        );
        let sweep = tan.sweep(-0.2, 0.2, 5);
        assert_eq!(sweep.len(), 5);
        assert_eq!(sweep[0].0, -0.2);
        assert_abs_diff_eq!(sweep[2].1, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_polynomial_around_shifted_point() {
        let series = expand("e**x", 1.3, 1.0, Some(6)).unwrap();
        let polynomial = series.polynomial();
        assert_relative_eq!(
            polynomial.eval1D("x", 1.3).unwrap(),
            series.total(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_table() {
        let series = expand(QUINTIC, 5.0, 0.0, None).unwrap();
        let table = series.to_table().to_string();
        assert!(table.contains("contribution"));
        assert!(table.contains("total"));
        assert!(table.contains("-1476.5"));
    }

    #[test]
    fn test_custom_config() {
        let taylor = TaylorSeries::new().with_transcendental_degree(4);
        let series = taylor.expand("e**x", 1.0, 0.0, None).unwrap();
        assert_eq!(series.terms().len(), 5);
        // 1 + 1 + 1/2 + 1/6 + 1/24
        assert_relative_eq!(series.total(), 65.0 / 24.0, epsilon = 1e-14);

        let taylor = TaylorSeries::from_config(ExpansionConfig::default().with_canonical_variable("t"));
        let series = taylor.expand("3", 1.0, 0.0, None).unwrap();
        assert_eq!(series.variable(), "t");
        assert_eq!(series.total(), 3.0);
        assert_eq!(taylor.expand_total("3", 1.0, 0.0, None).unwrap(), 3.0);
    }
}
