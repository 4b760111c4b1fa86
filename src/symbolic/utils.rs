//! Numeric helpers used to check analytic derivatives against finite differences.

/// `num_values` evenly spaced points from `start` to `end` inclusive.
/// A single point yields `[start]`.
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

/// Central difference `(f(x+h) - f(x-h)) / 2h` at every point of `x_values`.
/// The first failing evaluation of `f` aborts the whole computation.
pub fn numerical_derivative<F, E>(f: F, x_values: &[f64], h: f64) -> Result<Vec<f64>, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let mut derivatives = Vec::with_capacity(x_values.len());

    for &x in x_values {
        let f_x_plus_h = f(x + h)?;
        let f_x_minus_h = f(x - h)?;
        let derivative = (f_x_plus_h - f_x_minus_h) / (2.0 * h);
        derivatives.push(derivative);
    }

    Ok(derivatives)
}

/// Distance between two samples: `sqrt(sum (a-b)^2) / n`.
/// Only the common prefix is compared when the lengths differ; empty input gives 0.
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    (1.0 / n as f64)
        * x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_numerical_derivative() {
        let points = linspace(-1.0, 1.0, 11);
        let derivative =
            numerical_derivative(|x| Ok::<f64, ()>(x * x * x), &points, 1e-5).unwrap();
        for (x, d) in points.iter().zip(derivative.iter()) {
            assert_relative_eq!(*d, 3.0 * x * x, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_numerical_derivative_propagates_error() {
        let result = numerical_derivative(
            |x| if x > 0.5 { Err("out of range") } else { Ok(x) },
            &[0.0, 1.0],
            1e-3,
        );
        assert_eq!(result, Err("out of range"));
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_relative_eq!(norm(&[3.0, 0.0], &[0.0, 4.0]), 2.5);
        assert_eq!(norm(&[], &[]), 0.0);
    }
}
