//! Training configuration with builder pattern.
//!
//! [`TrainConfig`] groups boosting, tree, regularization and sampling
//! settings. The `bon` builder validates the result at build time.
//!
//! # Example
//!
//! ```
//! use price_boost::model::{SamplingParams, TrainConfig, TreeParams};
//!
//! let config = TrainConfig::builder()
//!     .n_trees(50)
//!     .learning_rate(0.1)
//!     .tree(TreeParams::depth_wise(4))
//!     .sampling(SamplingParams { subsample: 0.8 })
//!     .build()
//!     .unwrap();
//! assert_eq!(config.n_trees, 50);
//! ```

use bon::Builder;
use thiserror::Error;

use super::{RegularizationParams, SamplingParams, TreeParams};
use crate::training::{GBDTParams, GainParams, GrowerParams, Verbosity};

// =============================================================================
// ConfigError
// =============================================================================

/// Invalid training configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("learning_rate must be positive, got {0}")]
    InvalidLearningRate(f32),

    #[error("n_trees must be at least 1")]
    InvalidNTrees,

    #[error("max_depth must be at least 1")]
    InvalidMaxDepth,

    #[error("{field} must be in (0, 1], got {value}")]
    InvalidSamplingRatio { field: &'static str, value: f32 },

    #[error("{field} must be non-negative, got {value}")]
    InvalidRegularization { field: &'static str, value: f32 },
}

// =============================================================================
// TrainConfig
// =============================================================================

/// Configuration for training a pricing model.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
pub struct TrainConfig {
    /// Number of boosting rounds. Default: 100.
    #[builder(default = 100)]
    pub n_trees: u32,

    /// Shrinkage applied to every tree. Default: 0.3.
    #[builder(default = 0.3)]
    pub learning_rate: f32,

    #[builder(default)]
    pub tree: TreeParams,

    #[builder(default)]
    pub regularization: RegularizationParams,

    #[builder(default)]
    pub sampling: SamplingParams,

    /// `0` = all cores, `1` = sequential, `n` = exactly `n` threads. Default: 0.
    #[builder(default = 0)]
    pub n_threads: usize,

    /// Seed for row sampling. Default: 42.
    #[builder(default = 42)]
    pub seed: u64,

    /// Progress logging level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl<S: train_config_builder::IsComplete> TrainConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when `n_trees == 0`, `learning_rate <= 0`,
    /// `max_depth == 0`, `subsample` is outside (0, 1], or a regularization
    /// term is negative.
    pub fn build(self) -> Result<TrainConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TrainConfig {
    /// Check every field; see [`TrainConfigBuilder::build`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if self.n_trees == 0 {
            return Err(ConfigError::InvalidNTrees);
        }
        self.tree.validate()?;
        self.regularization.validate()?;
        self.sampling.validate()?;
        Ok(())
    }

    /// Lower to trainer parameters.
    pub fn to_gbdt_params(&self) -> GBDTParams {
        let reg = &self.regularization;
        GBDTParams {
            n_trees: self.n_trees,
            grower: GrowerParams {
                gain: GainParams {
                    reg_lambda: reg.lambda,
                    reg_alpha: reg.alpha,
                    min_gain: reg.min_gain,
                    min_child_weight: reg.min_child_weight,
                    min_samples_leaf: reg.min_samples_leaf,
                },
                learning_rate: self.learning_rate,
                max_depth: self.tree.max_depth,
                max_onehot_cats: self.tree.max_onehot_cats,
            },
            subsample: self.sampling.subsample,
            seed: self.seed,
            n_threads: self.n_threads,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            learning_rate: 0.3,
            tree: TreeParams::default(),
            regularization: RegularizationParams::default(),
            sampling: SamplingParams::default(),
            n_threads: 0,
            seed: 42,
            verbosity: Verbosity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn builder_defaults_match_default() {
        let built = TrainConfig::builder().build().unwrap();
        assert_eq!(built, TrainConfig::default());
        assert_eq!(built.n_trees, 100);
        assert_eq!(built.seed, 42);
        assert_eq!(built.verbosity, Verbosity::Silent);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.1)]
    #[case(f32::NAN)]
    fn invalid_learning_rate(#[case] lr: f32) {
        let result = TrainConfig::builder().learning_rate(lr).build();
        assert!(matches!(result, Err(ConfigError::InvalidLearningRate(_))));
    }

    #[test]
    fn learning_rate_above_one_is_allowed() {
        assert!(TrainConfig::builder().learning_rate(1.5).build().is_ok());
    }

    #[test]
    fn zero_trees_rejected() {
        assert_eq!(
            TrainConfig::builder().n_trees(0).build(),
            Err(ConfigError::InvalidNTrees)
        );
    }

    #[test]
    fn nested_errors_surface() {
        let result = TrainConfig::builder()
            .sampling(SamplingParams { subsample: 0.0 })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSamplingRatio { field: "subsample", .. })
        ));

        let result = TrainConfig::builder().tree(TreeParams::depth_wise(0)).build();
        assert_eq!(result, Err(ConfigError::InvalidMaxDepth));
    }

    #[test]
    fn lowering_copies_every_field() {
        let config = TrainConfig::builder()
            .n_trees(7)
            .learning_rate(0.1)
            .tree(TreeParams::depth_wise(3).with_max_onehot_cats(2))
            .regularization(RegularizationParams {
                lambda: 2.0,
                alpha: 0.5,
                min_child_weight: 3.0,
                min_gain: 0.1,
                min_samples_leaf: 4,
            })
            .sampling(SamplingParams { subsample: 0.5 })
            .n_threads(1)
            .seed(9)
            .build()
            .unwrap();

        let params = config.to_gbdt_params();
        assert_eq!(params.n_trees, 7);
        assert_eq!(params.grower.learning_rate, 0.1);
        assert_eq!(params.grower.max_depth, 3);
        assert_eq!(params.grower.max_onehot_cats, 2);
        assert_eq!(params.grower.gain.reg_lambda, 2.0);
        assert_eq!(params.grower.gain.reg_alpha, 0.5);
        assert_eq!(params.grower.gain.min_child_weight, 3.0);
        assert_eq!(params.grower.gain.min_gain, 0.1);
        assert_eq!(params.grower.gain.min_samples_leaf, 4);
        assert_eq!(params.subsample, 0.5);
        assert_eq!(params.seed, 9);
        assert_eq!(params.n_threads, 1);
    }
}
