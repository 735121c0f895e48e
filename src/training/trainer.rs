//! GBDT trainer.
//!
//! Main boosting loop: compute gradients, sample rows, grow a tree, update
//! predictions, report progress.
//!
//! # Example
//!
//! ```ignore
//! use price_boost::training::{GBDTParams, GBDTTrainer, NoopObserver, SquaredLoss};
//!
//! let trainer = GBDTTrainer::new(SquaredLoss, GBDTParams::default());
//! let trained = trainer.train(features.view(), &targets, &categorical, &mut NoopObserver);
//! ```

use ndarray::ArrayView2;

use crate::repr::Forest;
use crate::utils::{run_with_threads, Parallelism};

use super::gradients::Gradients;
use super::grower::{GrowerParams, TreeGrower};
use super::metrics::rmse;
use super::objective::ObjectiveFn;
use super::observer::{RoundReport, TrainingObserver};
use super::sampling::RowSampler;

// =============================================================================
// GBDTParams
// =============================================================================

/// Parameters for GBDT training.
#[derive(Clone, Debug)]
pub struct GBDTParams {
    /// Number of boosting rounds.
    pub n_trees: u32,
    /// Tree shape, shrinkage and regularization.
    pub grower: GrowerParams,
    /// Fraction of rows drawn per round, in (0, 1].
    pub subsample: f32,
    /// Seed for row sampling.
    pub seed: u64,
    /// `0` = global pool, `1` = sequential, `n > 1` = dedicated pool of `n`.
    pub n_threads: usize,
}

impl Default for GBDTParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            grower: GrowerParams::default(),
            subsample: 1.0,
            seed: 42,
            n_threads: 0,
        }
    }
}

/// A trained forest with its final training error.
#[derive(Clone, Debug)]
pub struct TrainedForest {
    pub forest: Forest,
    /// RMSE of the full forest over the training rows.
    pub train_rmse: f64,
}

// =============================================================================
// GBDTTrainer
// =============================================================================

/// Gradient boosting trainer.
pub struct GBDTTrainer<O: ObjectiveFn> {
    objective: O,
    params: GBDTParams,
}

impl<O: ObjectiveFn> GBDTTrainer<O> {
    pub fn new(objective: O, params: GBDTParams) -> Self {
        Self { objective, params }
    }

    #[inline]
    pub fn params(&self) -> &GBDTParams {
        &self.params
    }

    #[inline]
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Train a forest.
    ///
    /// `features` is rows × features, `categorical[f]` marks categorical
    /// columns. Returns `None` when there are no rows or the target length
    /// does not match.
    pub fn train(
        &self,
        features: ArrayView2<'_, f32>,
        targets: &[f32],
        categorical: &[bool],
        observer: &mut (dyn TrainingObserver + Send),
    ) -> Option<TrainedForest> {
        run_with_threads(self.params.n_threads, |parallelism| {
            self.train_impl(features, targets, categorical, observer, parallelism)
        })
    }

    fn train_impl(
        &self,
        features: ArrayView2<'_, f32>,
        targets: &[f32],
        categorical: &[bool],
        observer: &mut (dyn TrainingObserver + Send),
        parallelism: Parallelism,
    ) -> Option<TrainedForest> {
        let n_rows = features.nrows();
        if n_rows == 0 || targets.len() != n_rows {
            return None;
        }

        let base_score = self.objective.base_score(targets);
        let mut forest = Forest::new(base_score);
        let mut predictions = vec![base_score; n_rows];
        let mut gradients = Gradients::new(n_rows);

        let sampler = RowSampler::new(self.params.subsample, self.params.seed);
        let mut grower = TreeGrower::new(self.params.grower.clone(), categorical.to_vec());

        observer.on_start(n_rows, self.params.n_trees);
        tracing::debug!(
            rows = n_rows,
            features = features.ncols(),
            trees = self.params.n_trees,
            base_score,
            "starting boosting"
        );

        let mut train_rmse = rmse(&predictions, targets);
        for round in 0..self.params.n_trees {
            self.objective
                .compute_gradients(&predictions, targets, &mut gradients);

            let rows = sampler.sample(n_rows, round);
            let tree = grower.grow(features, &gradients, rows, parallelism);

            let deltas = parallelism.maybe_par_map(0..n_rows, |row| {
                let values = features.row(row);
                match values.as_slice() {
                    Some(slice) => tree.predict_row(slice),
                    None => tree.predict_row(&values.to_vec()),
                }
            });
            for (pred, delta) in predictions.iter_mut().zip(deltas) {
                *pred += delta;
            }

            train_rmse = rmse(&predictions, targets);
            let report = RoundReport {
                round,
                n_rounds: self.params.n_trees,
                train_rmse,
                n_leaves: tree.n_leaves(),
            };
            tracing::debug!(round, rmse = train_rmse, leaves = report.n_leaves, "round complete");
            observer.on_round(&report);

            forest.push_tree(tree);
        }

        Some(TrainedForest { forest, train_rmse })
    }
}
