//! High-level model API.
//!
//! - [`ModelArtifact`]: trained model bundle; the only type that can predict
//! - [`TrainConfig`]: validated training configuration
//! - [`pipeline`]: file-based entry points (`train_and_save`, `load`, `predict`)

mod artifact;
mod config;
mod meta;
mod params;
pub mod pipeline;

pub use artifact::ModelArtifact;
pub use config::{ConfigError, TrainConfig, TrainConfigBuilder};
pub use meta::ModelMeta;
pub use params::{RegularizationParams, SamplingParams, TreeParams};
