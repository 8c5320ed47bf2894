//! Pearson product-moment correlation over two paired series.

use crate::error::CorrError;

/// Compute the Pearson correlation coefficient of two equal-length series.
///
/// The coefficient is only defined for at least two paired points with
/// non-zero variance on both sides; anything else is reported as
/// [`CorrError::InsufficientData`] rather than silently producing NaN.
pub fn pearson(series_a: &[f64], series_b: &[f64]) -> Result<f64, CorrError> {
    if series_a.len() != series_b.len() {
        return Err(CorrError::InsufficientData(format!(
            "series length mismatch: {} vs {}",
            series_a.len(),
            series_b.len()
        )));
    }
    let n = series_a.len();
    if n < 2 {
        return Err(CorrError::InsufficientData(format!(
            "need at least 2 paired points, got {n}"
        )));
    }

    let n_f = n as f64;
    let mean_a = series_a.iter().sum::<f64>() / n_f;
    let mean_b = series_b.iter().sum::<f64>() / n_f;

    let mut cov_sum = 0.0;
    let mut var_a_sum = 0.0;
    let mut var_b_sum = 0.0;
    for (&a, &b) in series_a.iter().zip(series_b) {
        let da = a - mean_a;
        let db = b - mean_b;
        cov_sum += da * db;
        var_a_sum += da * da;
        var_b_sum += db * db;
    }

    if var_a_sum == 0.0 || var_b_sum == 0.0 {
        return Err(CorrError::InsufficientData(
            "zero variance in at least one series".to_string(),
        ));
    }

    // The 1/(n-1) factors cancel between the covariance and the two standard
    // deviations, so the raw deviation sums divide directly.
    let r = cov_sum / (var_a_sum.sqrt() * var_b_sum.sqrt());
    if !r.is_finite() {
        // Non-finite inputs and overflowed deviation sums both land here.
        return Err(CorrError::InsufficientData(
            "non-finite coefficient from degenerate input".to_string(),
        ));
    }
    Ok(r)
}
