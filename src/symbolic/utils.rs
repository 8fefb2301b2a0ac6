// numeric helpers shared by the symbolic layer and the Taylor core

/// n! when it fits into u128, None otherwise (n > 34)
pub fn factorial(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// 1/n! as f64. Past the exact integer range the product is accumulated in floating point.
pub fn inverse_factorial(n: usize) -> f64 {
    match factorial(n) {
        Some(value) => 1.0 / value as f64,
        None => (1..=n).fold(1.0, |acc, k| acc / k as f64),
    }
}

pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);

    for i in 0..num_values {
        let value = start + (i as f64 * step);
        values.push(value);
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(15), Some(1_307_674_368_000));
        assert!(factorial(34).is_some());
        assert_eq!(factorial(35), None);
    }

    #[test]
    fn test_inverse_factorial() {
        assert_eq!(inverse_factorial(0), 1.0);
        assert_relative_eq!(inverse_factorial(4), 1.0 / 24.0);
        // beyond u128 the float fallback keeps going
        assert!(inverse_factorial(40) > 0.0);
        assert_relative_eq!(
            inverse_factorial(35),
            inverse_factorial(34) / 35.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_linspace() {
        let values = linspace(0.0, 1.0, 5);
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
