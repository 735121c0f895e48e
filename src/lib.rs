//! price-boost: gradient-boosted tree pricing for tabular records.
//!
//! Records are encoded (categorical strings to integer codes), assembled into
//! a fixed-order feature vector, and fed to a squared-error GBDT. The trained
//! [`ModelArtifact`] bundles encoders, feature order and forest, persists to a
//! checksummed binary file, and scores new records through the same
//! encode → assemble path used in training.
//!
//! ```
//! use price_boost::{ModelArtifact, TrainConfig};
//! use price_boost::testing::{scenario_query, scenario_records};
//!
//! let config = TrainConfig::builder().n_trees(50).build().unwrap();
//! let artifact = ModelArtifact::train(&scenario_records(), &config).unwrap();
//!
//! let bytes = price_boost::persist::to_bytes(&artifact).unwrap();
//! let loaded = price_boost::persist::from_bytes(&bytes).unwrap();
//! assert_eq!(loaded.predict(&scenario_query()), artifact.predict(&scenario_query()));
//! ```

pub mod data;
pub mod encoding;
pub mod error;
pub mod features;
pub mod model;
pub mod persist;
pub mod repr;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{parse_records, read_records, Prediction, PriceRecord, RecordSchema, SchemaError};
pub use encoding::{CategoryEncoder, EncodingTable};
pub use error::{PipelineError, Result};
pub use features::{assemble, FeatureOrder, FeatureVector};
pub use model::pipeline::{load, predict, save, train, train_and_save, train_and_save_with};
pub use model::{ModelArtifact, TrainConfig};
pub use training::{TrainingObserver, Verbosity};
pub use utils::Parallelism;
