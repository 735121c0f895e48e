//! Gain computation and regularization parameters.

/// Smallest improvement accepted as a real split.
const GAIN_EPS: f64 = 1e-6;

/// Parameters for split gain computation and leaf weight calculation.
///
/// Static for the lifetime of training.
#[derive(Clone, Debug, PartialEq)]
pub struct GainParams {
    /// L2 regularization (lambda).
    pub reg_lambda: f32,
    /// L1 regularization (alpha).
    pub reg_alpha: f32,
    /// Minimum split gain (gamma).
    pub min_gain: f32,
    /// Minimum sum of hessians per child.
    pub min_child_weight: f32,
    /// Minimum samples per child.
    pub min_samples_leaf: u32,
}

impl Default for GainParams {
    fn default() -> Self {
        Self {
            reg_lambda: 1.0,
            reg_alpha: 0.0,
            min_gain: 0.0,
            min_child_weight: 1.0,
            min_samples_leaf: 1,
        }
    }
}

impl GainParams {
    /// L1 soft thresholding of a gradient sum.
    #[inline]
    fn soft_threshold(&self, grad: f64) -> f64 {
        let alpha = self.reg_alpha as f64;
        if grad > alpha {
            grad - alpha
        } else if grad < -alpha {
            grad + alpha
        } else {
            0.0
        }
    }

    /// Structure score of a node: `T_α(G)² / (H + λ)`.
    #[inline]
    pub fn node_score(&self, grad: f64, hess: f64) -> f64 {
        let g = self.soft_threshold(grad);
        g * g / (hess + self.reg_lambda as f64)
    }

    /// Split gain (XGBoost formula).
    ///
    /// ```text
    /// gain = 0.5 * [score(L) + score(R) - score(P)]
    /// ```
    #[inline]
    pub fn compute_gain(
        &self,
        (grad_left, hess_left): (f64, f64),
        (grad_right, hess_right): (f64, f64),
        (grad_parent, hess_parent): (f64, f64),
    ) -> f64 {
        0.5 * (self.node_score(grad_left, hess_left) + self.node_score(grad_right, hess_right)
            - self.node_score(grad_parent, hess_parent))
    }

    /// Whether both children satisfy the hessian and sample minimums.
    #[inline]
    pub fn is_valid_split(
        &self,
        hess_left: f64,
        hess_right: f64,
        count_left: u32,
        count_right: u32,
    ) -> bool {
        let min_weight = self.min_child_weight as f64;
        hess_left >= min_weight
            && hess_right >= min_weight
            && count_left >= self.min_samples_leaf
            && count_right >= self.min_samples_leaf
    }

    /// Whether `gain` clears `min_gain`.
    #[inline]
    pub fn accepts_gain(&self, gain: f64) -> bool {
        gain > GAIN_EPS && gain > self.min_gain as f64
    }

    /// Leaf weight with L1 and L2 regularization.
    ///
    /// ```text
    /// weight = -T_α(G) / (H + λ)
    /// ```
    #[inline]
    pub fn compute_leaf_weight(&self, grad_sum: f64, hess_sum: f64) -> f32 {
        let denom = hess_sum + self.reg_lambda as f64;
        if denom <= 0.0 {
            return 0.0;
        }
        (-self.soft_threshold(grad_sum) / denom) as f32
    }
}
