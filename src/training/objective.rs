//! Training objectives.

use super::gradients::Gradients;

/// A differentiable loss used to drive boosting.
pub trait ObjectiveFn: Send + Sync {
    /// Stable name, recorded in model metadata.
    fn name(&self) -> &'static str;

    /// Constant prediction that minimizes the loss over `targets`.
    fn base_score(&self, targets: &[f32]) -> f32;

    /// Write per-row gradients and hessians for the current predictions.
    fn compute_gradients(&self, predictions: &[f32], targets: &[f32], gradients: &mut Gradients);
}

/// Squared error: `L = ½ (pred - y)²`, `g = pred - y`, `h = 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredLoss;

impl ObjectiveFn for SquaredLoss {
    fn name(&self) -> &'static str {
        "squared_error"
    }

    fn base_score(&self, targets: &[f32]) -> f32 {
        if targets.is_empty() {
            return 0.0;
        }
        let sum: f64 = targets.iter().map(|&y| y as f64).sum();
        (sum / targets.len() as f64) as f32
    }

    fn compute_gradients(&self, predictions: &[f32], targets: &[f32], gradients: &mut Gradients) {
        let (grads, hess) = gradients.pairs_mut();
        for (((g, h), &pred), &y) in grads
            .iter_mut()
            .zip(hess.iter_mut())
            .zip(predictions)
            .zip(targets)
        {
            *g = pred - y;
            *h = 1.0;
        }
    }
}
