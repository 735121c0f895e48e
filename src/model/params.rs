//! Nested parameter groups for [`TrainConfig`](super::TrainConfig).
//!
//! - [`TreeParams`]: tree shape
//! - [`RegularizationParams`]: L1/L2 regularization and split constraints
//! - [`SamplingParams`]: row subsampling

use super::ConfigError;

// =============================================================================
// TreeParams
// =============================================================================

/// Tree structure parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeParams {
    /// Maximum depth of each tree; the root is depth 0. Default: 6.
    pub max_depth: u32,
    /// Categorical features with at most this many categories present at a
    /// node use one-vs-rest splits; others use a gradient-sorted partition.
    /// Default: 4.
    pub max_onehot_cats: u32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: 6,
            max_onehot_cats: 4,
        }
    }
}

impl TreeParams {
    pub fn depth_wise(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    pub fn with_max_onehot_cats(mut self, max_onehot_cats: u32) -> Self {
        self.max_onehot_cats = max_onehot_cats;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }
        Ok(())
    }
}

// =============================================================================
// RegularizationParams
// =============================================================================

/// Regularization parameters.
///
/// ```
/// use price_boost::model::RegularizationParams;
///
/// let params = RegularizationParams {
///     lambda: 2.0,
///     min_child_weight: 0.0,
///     ..Default::default()
/// };
/// assert_eq!(params.alpha, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationParams {
    /// L2 regularization on leaf weights. Default: 1.0.
    pub lambda: f32,
    /// L1 regularization on leaf weights. Default: 0.0.
    pub alpha: f32,
    /// Minimum hessian sum per child. Default: 1.0.
    pub min_child_weight: f32,
    /// Minimum gain to make a split. Default: 0.0.
    pub min_gain: f32,
    /// Minimum rows per child. Default: 1.
    pub min_samples_leaf: u32,
}

impl Default for RegularizationParams {
    fn default() -> Self {
        Self {
            lambda: 1.0,
            alpha: 0.0,
            min_child_weight: 1.0,
            min_gain: 0.0,
            min_samples_leaf: 1,
        }
    }
}

impl RegularizationParams {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("lambda", self.lambda),
            ("alpha", self.alpha),
            ("min_child_weight", self.min_child_weight),
            ("min_gain", self.min_gain),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidRegularization { field, value });
            }
        }
        Ok(())
    }
}

// =============================================================================
// SamplingParams
// =============================================================================

/// Row sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// Fraction of rows drawn per round, in (0, 1]. Default: 1.0.
    pub subsample: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self { subsample: 1.0 }
    }
}

impl SamplingParams {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(ConfigError::InvalidSamplingRatio {
                field: "subsample",
                value: self.subsample,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TreeParams::default().validate().is_ok());
        assert!(RegularizationParams::default().validate().is_ok());
        assert!(SamplingParams::default().validate().is_ok());
    }

    #[test]
    fn negative_regularization_names_field() {
        let params = RegularizationParams {
            min_gain: -1.0,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::InvalidRegularization {
                field: "min_gain",
                value: -1.0
            })
        );
    }

    #[test]
    fn nan_regularization_is_rejected() {
        let params = RegularizationParams {
            lambda: f32::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn subsample_bounds() {
        for bad in [0.0, -0.5, 1.5, f32::NAN] {
            assert!(SamplingParams { subsample: bad }.validate().is_err());
        }
        assert!(SamplingParams { subsample: 0.01 }.validate().is_ok());
    }

    #[test]
    fn tree_builders() {
        let params = TreeParams::depth_wise(3).with_max_onehot_cats(8);
        assert_eq!(params.max_depth, 3);
        assert_eq!(params.max_onehot_cats, 8);
        assert_eq!(TreeParams::depth_wise(0).validate(), Err(ConfigError::InvalidMaxDepth));
    }
}
