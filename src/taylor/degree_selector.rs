use crate::taylor::expansion_config::ExpansionConfig;
use crate::taylor::expression_classifier::Classification;
use regex::Regex;

/// Highest integer `k` of any `var**k` or `var^k` in the text, 0 when there is none.
pub fn max_explicit_power(text: &str, variable: &str) -> usize {
    let pattern = format!(
        r"(?:^|[^A-Za-z0-9_]){}\s*(?:\*\*|\^)\s*\(?\s*(\d+)",
        regex::escape(variable)
    );
    let Ok(re) = Regex::new(&pattern) else {
        return 0;
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|k| k.as_str().parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}

/// Number of derivative orders to compute.
///
/// An explicit override is used verbatim. Otherwise transcendental expressions get the fixed
/// degree of the config and polynomial-like ones the highest explicit power of their variable.
/// A linear or constant expression therefore gets degree 0 unless the caller asks for more.
pub fn select_degree(
    text: &str,
    classification: &Classification,
    degree_override: Option<usize>,
    config: &ExpansionConfig,
) -> usize {
    if let Some(degree) = degree_override {
        return degree;
    }
    if classification.transcendental {
        return config.transcendental_degree;
    }
    max_explicit_power(text, &classification.variable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polynomial(variable: &str) -> Classification {
        Classification {
            variable: variable.to_string(),
            transcendental: false,
        }
    }

    #[test]
    fn test_degree_is_max_power() {
        let config = ExpansionConfig::default();
        let text = "-0.5*x**5 + 3*x**2 + 2*x + 1";
        assert_eq!(select_degree(text, &polynomial("x"), None, &config), 5);
        assert_eq!(select_degree("x^2 + x**7 - x^3", &polynomial("x"), None, &config), 7);
    }

    #[test]
    fn test_multi_digit_powers_compare_numerically() {
        // 12 > 9 although '9' > '1' digit by digit
        assert_eq!(max_explicit_power("x**9 + x**12", "x"), 12);
        assert_eq!(max_explicit_power("x ** 10 - x^ 3", "x"), 10);
    }

    #[test]
    fn test_no_powers_gives_zero() {
        let config = ExpansionConfig::default();
        assert_eq!(select_degree("2*x + 1", &polynomial("x"), None, &config), 0);
        assert_eq!(select_degree("42", &polynomial("x"), None, &config), 0);
    }

    #[test]
    fn test_power_of_other_identifier_is_ignored() {
        assert_eq!(max_explicit_power("max**4 + x**2", "x"), 2);
        assert_eq!(max_explicit_power("t**3", "t"), 3);
    }

    #[test]
    fn test_transcendental_uses_config() {
        let classification = Classification {
            variable: "x".to_string(),
            transcendental: true,
        };
        let config = ExpansionConfig::default();
        assert_eq!(select_degree("tan(x)", &classification, None, &config), 15);
        let config = config.with_transcendental_degree(8);
        assert_eq!(select_degree("tan(x)", &classification, None, &config), 8);
    }

    #[test]
    fn test_override_wins() {
        let config = ExpansionConfig::default();
        assert_eq!(select_degree("x**5", &polynomial("x"), Some(2), &config), 2);
        assert_eq!(select_degree("x**5", &polynomial("x"), Some(0), &config), 0);
    }
}
