//! The trained, self-contained pricing model.

use crate::data::{ColumnRole, FieldValue, Prediction, PriceRecord, RecordSchema, SchemaError};
use crate::encoding::EncodingTable;
use crate::error::{PipelineError, Result};
use crate::features::{assemble, assemble_matrix, FeatureOrder, FeatureVector};
use crate::repr::Forest;
use crate::training::{GBDTTrainer, LoggingObserver, ObjectiveFn, SquaredLoss, TrainingObserver};
use crate::utils::Parallelism;

use super::config::TrainConfig;
use super::meta::ModelMeta;

/// Encoding tables, feature order and forest needed to score a record.
///
/// Only produced by training or by loading a persisted artifact, and never
/// mutated afterwards, so a shared reference can be used from many threads.
///
/// ```
/// use price_boost::model::{ModelArtifact, TrainConfig};
/// use price_boost::testing::scenario_records;
///
/// let artifact = ModelArtifact::train(&scenario_records(), &TrainConfig::default()).unwrap();
/// let score = artifact.predict(&scenario_records()[0]);
/// assert!((score - 7.0).abs() < 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    encodings: EncodingTable,
    order: FeatureOrder,
    forest: Forest,
    meta: ModelMeta,
}

impl ModelArtifact {
    /// Train on labeled records, reporting progress through `tracing`.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Config`] if `config` is invalid
    /// - [`PipelineError::EmptyTrainingSet`] if `records` is empty
    /// - [`PipelineError::SchemaMismatch`] if a record has no label or a
    ///   non-finite numeric field
    pub fn train(records: &[PriceRecord], config: &TrainConfig) -> Result<Self> {
        let mut observer = LoggingObserver::new(config.verbosity);
        Self::train_with_observer(records, config, &mut observer)
    }

    /// Train on labeled records with a caller-supplied observer.
    pub fn train_with_observer(
        records: &[PriceRecord],
        config: &TrainConfig,
        observer: &mut (dyn TrainingObserver + Send),
    ) -> Result<Self> {
        config.validate()?;
        if records.is_empty() {
            return Err(PipelineError::EmptyTrainingSet);
        }

        let schema = RecordSchema::price();
        let targets = labels(records, &schema)?;
        let order = FeatureOrder::price();
        let parallelism = Parallelism::from_threads(config.n_threads);

        let encodings = EncodingTable::fit(records, &schema, parallelism);
        let features = assemble_matrix(records, &encodings, order);
        let categorical: Vec<bool> = (0..order.n_features())
            .map(|f| order.is_categorical(f))
            .collect();

        let objective = SquaredLoss;
        let trainer = GBDTTrainer::new(objective, config.to_gbdt_params());
        let trained = trainer
            .train(features.view(), &targets, &categorical, observer)
            .ok_or(PipelineError::EmptyTrainingSet)?;

        let meta = ModelMeta::for_order(
            order,
            records.len() as u64,
            trained.forest.n_trees(),
            objective.name(),
            trained.train_rmse,
        );
        tracing::info!(
            rows = records.len(),
            trees = meta.n_trees,
            rmse = meta.train_rmse,
            "training complete"
        );

        Ok(Self {
            encodings,
            order,
            forest: trained.forest,
            meta,
        })
    }

    /// Assemble parts without validation; callers validate first.
    pub(crate) fn from_parts(
        encodings: EncodingTable,
        order: FeatureOrder,
        forest: Forest,
        meta: ModelMeta,
    ) -> Self {
        Self {
            encodings,
            order,
            forest,
            meta,
        }
    }

    /// Score one record.
    ///
    /// Unseen categories map to the reserved unknown code; the label, if
    /// any, is ignored.
    pub fn predict(&self, record: &PriceRecord) -> f32 {
        self.predict_features(&self.assemble(record))
    }

    /// Score an already assembled feature vector.
    #[inline]
    pub fn predict_features(&self, features: &FeatureVector) -> f32 {
        self.forest.predict_row(features.as_slice())
    }

    /// Score a record and keep it alongside the result.
    pub fn score(&self, record: PriceRecord) -> Prediction {
        let score = self.predict(&record);
        Prediction { record, score }
    }

    /// The feature vector this artifact would score for `record`.
    #[inline]
    pub fn assemble(&self, record: &PriceRecord) -> FeatureVector {
        assemble(record, &self.encodings, self.order)
    }

    #[inline]
    pub fn encodings(&self) -> &EncodingTable {
        &self.encodings
    }

    #[inline]
    pub fn order(&self) -> FeatureOrder {
        self.order
    }

    #[inline]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    #[inline]
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }
}

/// Labels of `records`, checking every numeric column the way the reader does.
/// Errors carry the 1-based record index.
fn labels(records: &[PriceRecord], schema: &RecordSchema) -> Result<Vec<f32>, SchemaError> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let line = idx + 1;
            let mut target = None;
            for column in schema.columns() {
                let value = match record.value(column.field) {
                    FieldValue::Number(value) => value,
                    FieldValue::Missing if column.role == ColumnRole::Label => {
                        return Err(SchemaError::MissingLabel {
                            line,
                            column: column.name,
                        });
                    }
                    FieldValue::Category(_) | FieldValue::Missing => continue,
                };
                if !value.is_finite() {
                    return Err(SchemaError::NonFinite {
                        line,
                        column: column.name,
                        value,
                    });
                }
                if column.role == ColumnRole::Label {
                    target = Some(value);
                }
            }
            target.ok_or(SchemaError::MissingLabel {
                line,
                column: "target_price",
            })
        })
        .collect()
}
