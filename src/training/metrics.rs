//! Regression metrics.

/// Root mean squared error. Returns `0.0` for empty input.
pub fn rmse(predictions: &[f32], targets: &[f32]) -> f64 {
    let n = predictions.len().min(targets.len());
    if n == 0 {
        return 0.0;
    }
    let sum_sq: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(&p, &y)| {
            let diff = p as f64 - y as f64;
            diff * diff
        })
        .sum();
    (sum_sq / n as f64).sqrt()
}

/// Mean absolute error. Returns `0.0` for empty input.
pub fn mae(predictions: &[f32], targets: &[f32]) -> f64 {
    let n = predictions.len().min(targets.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = predictions
        .iter()
        .zip(targets)
        .map(|(&p, &y)| (p as f64 - y as f64).abs())
        .sum();
    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rmse_known_values() {
        assert_relative_eq!(rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_relative_eq!(rmse(&[0.0, 0.0], &[3.0, 4.0]), (12.5f64).sqrt());
        assert_eq!(rmse(&[], &[]), 0.0);
    }

    #[test]
    fn mae_known_values() {
        assert_relative_eq!(mae(&[1.0, -1.0], &[0.0, 0.0]), 1.0);
    }
}
