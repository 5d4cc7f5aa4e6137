use statrs::distribution::{ContinuousCDF, StudentsT};

use super::descriptive::{mean, std_dev};

/// Two-sided confidence interval for the mean of `values`.
///
/// `margin = t(n-1, (1 + confidence_level) / 2) * s / sqrt(n)`. With fewer
/// than two values, or a confidence level outside `(0, 1)`, the interval
/// collapses onto the mean.
pub fn confidence_interval(values: &[f64], confidence_level: f64) -> (f64, f64) {
    let mean = mean(values);
    let n = values.len();

    if n < 2 || !(confidence_level > 0.0 && confidence_level < 1.0) {
        return (mean, mean);
    }

    let std_err = std_dev(values) / (n as f64).sqrt();
    if std_err == 0.0 {
        return (mean, mean);
    }

    let t_value = match StudentsT::new(0.0, 1.0, (n - 1) as f64) {
        Ok(t_dist) => t_dist.inverse_cdf((1.0 + confidence_level) / 2.0),
        Err(_) => return (mean, mean),
    };

    let margin = t_value * std_err;
    (mean - margin, mean + margin)
}
