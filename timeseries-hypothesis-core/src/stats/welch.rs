use statrs::distribution::{ContinuousCDF, StudentsT};

use super::descriptive::{mean, variance};

/// Welch's t-test for two independent samples with potentially unequal variances.
///
/// Returns `(t_statistic, two_tailed_p_value)`. The result is total over all
/// inputs:
/// * either sample has fewer than two observations: `(0, 1)`
/// * both samples have zero variance and equal means: `(0, 1)`
/// * both samples have zero variance and different means: `(±inf, 0)`
pub fn welch_t_test(x: &[f64], y: &[f64]) -> (f64, f64) {
    let n1 = x.len();
    let n2 = y.len();

    if n1 < 2 || n2 < 2 {
        return (0.0, 1.0);
    }

    let mean1 = mean(x);
    let mean2 = mean(y);
    let var1 = variance(x);
    let var2 = variance(y);

    // Standard error of the difference
    let se = (var1 / n1 as f64 + var2 / n2 as f64).sqrt();

    if se == 0.0 {
        if mean1 == mean2 {
            return (0.0, 1.0);
        }
        let t = if mean1 > mean2 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
        return (t, 0.0);
    }

    // t = (mean1 - mean2) / sqrt(var1/n1 + var2/n2)
    let t_statistic = (mean1 - mean2) / se;
    let df = welch_satterthwaite_df(var1, n1, var2, n2);

    let p_value = match StudentsT::new(0.0, 1.0, df) {
        // Two-tailed test: p = 2 * P(T > |t|)
        Ok(t_dist) => (2.0 * t_dist.sf(t_statistic.abs())).clamp(0.0, 1.0),
        Err(_) => 1.0,
    };

    (t_statistic, p_value)
}

/// Degrees of freedom from the Welch-Satterthwaite equation.
///
/// df = (var1/n1 + var2/n2)^2 / ((var1/n1)^2/(n1-1) + (var2/n2)^2/(n2-1))
fn welch_satterthwaite_df(var1: f64, n1: usize, var2: f64, n2: usize) -> f64 {
    let s1 = var1 / n1 as f64;
    let s2 = var2 / n2 as f64;
    let numerator = (s1 + s2).powi(2);
    let denominator = (s1.powi(2) / (n1 - 1) as f64) + (s2.powi(2) / (n2 - 1) as f64);

    if denominator == 0.0 {
        // Fallback to minimum df when variances are zero
        return (n1.min(n2) - 1) as f64;
    }

    numerator / denominator
}
