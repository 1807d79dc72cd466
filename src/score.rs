use crate::error::{EvalError, Result};

/// The logistic function, 1 / (1 + e^-x).
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Intercept plus the dot product of the remaining coefficients with the
/// features.
///
/// `coefficients[0]` is the intercept, so there must be exactly one more
/// coefficient than there are features.
pub fn linear(coefficients: &[f64], features: &[i64]) -> Result<f64> {
    match coefficients.split_first() {
        Some((intercept, weights)) if weights.len() == features.len() => Ok(weights
            .iter()
            .zip(features)
            .fold(*intercept, |sum, (w, x)| sum + w * *x as f64)),
        _ => Err(EvalError::DimensionMismatch {
            coefficients: coefficients.len(),
            features: features.len(),
        }),
    }
}

/// Sigmoid of the linear score of one class for one row.
pub fn score(coefficients: &[f64], features: &[i64]) -> Result<f64> {
    Ok(sigmoid(linear(coefficients, features)?))
}
