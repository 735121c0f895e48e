//! Training infrastructure for gradient boosting.
//!
//! - [`GBDTTrainer`]: boosting loop over an assembled feature matrix
//! - [`TreeGrower`]: depth-wise growth of a single tree
//! - [`GreedySplitter`]: exact split search over numeric and categorical features
//! - [`ObjectiveFn`] / [`SquaredLoss`]: gradients of the training loss
//! - [`TrainingObserver`]: injected progress reporting
//!
//! ## Metrics
//!
//! - [`rmse`]: root mean squared error
//! - [`mae`]: mean absolute error

mod gain;
mod gradients;
mod grower;
mod metrics;
mod objective;
mod observer;
mod sampling;
mod split;
mod trainer;

pub use gain::GainParams;
pub use gradients::Gradients;
pub use grower::{GrowerParams, TreeGrower};
pub use metrics::{mae, rmse};
pub use objective::{ObjectiveFn, SquaredLoss};
pub use observer::{
    LoggingObserver, NoopObserver, RecordingObserver, RoundReport, TrainingObserver, Verbosity,
};
pub use sampling::RowSampler;
pub use split::{GreedySplitter, NodeStats, SplitInfo, SplitKind};
pub use trainer::{GBDTParams, GBDTTrainer, TrainedForest};
