/// Arithmetic mean; zero for an empty sample.
///
/// Accumulated incrementally so large finite inputs do not overflow.
pub fn mean(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64)
}

/// Sample variance with Bessel's correction (n-1 denominator).
///
/// Zero for fewer than two values.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let sum_sq_diff: f64 = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum();
    sum_sq_diff / (values.len() - 1) as f64
}

/// Sample standard deviation, consistent with [`variance`].
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(mean(&[7.0]), 7.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_of_large_values_stays_finite() {
        assert_eq!(mean(&[1e308, 1e308, 1e308]), 1e308);
        assert_eq!(mean(&[f64::MAX, f64::MAX]), f64::MAX);
        assert_eq!(variance(&[1e308, 1e308, 1e308]), 0.0);
    }

    #[test]
    fn test_variance_uses_sample_denominator() {
        // Sum of squared deviations is 10, n - 1 = 4.
        assert!((variance(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 2.5).abs() < 1e-12);
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138_089_935).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_samples_have_zero_spread() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[3.0]), 0.0);
        assert_eq!(std_dev(&[3.0, 3.0, 3.0]), 0.0);
    }
}
