//! Conversion between runtime types and the serialized schema.
//!
//! Decoding validates everything a corrupt or foreign payload could break:
//! feature order, encoder presence, tree structure and feature references.

use thiserror::Error;

use crate::data::ColumnType;
use crate::encoding::{CategoryEncoder, EncodingError, EncodingTable};
use crate::features::FeatureOrder;
use crate::model::{ModelArtifact, ModelMeta};
use crate::repr::{CategoriesStorage, Forest, ForestValidationError, SplitType, Tree};

use super::schema::{
    ArtifactSchema, CategoriesSchema, EncoderSchema, FeatureKindSchema, FeatureSchema,
    ForestSchema, MetaSchema, TreeSchema,
};

/// A decoded payload that does not describe a usable model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("feature order differs from this build")]
    FeatureOrderMismatch,

    #[error("header declares {header} features, payload has {payload}")]
    FeatureCountMismatch { header: u32, payload: usize },

    #[error("no encoder for categorical feature `{column}`")]
    MissingEncoder { column: String },

    #[error("encoder for unknown or numeric column `{column}`")]
    UnexpectedEncoder { column: String },

    #[error("column `{column}`: {source}")]
    Encoder {
        column: String,
        #[source]
        source: EncodingError,
    },

    #[error("tree {tree_idx}: unknown split type {value}")]
    UnknownSplitType { tree_idx: usize, value: u8 },

    #[error(transparent)]
    Forest(#[from] ForestValidationError),
}

// ============================================================================
// Runtime → schema
// ============================================================================

impl From<&ModelArtifact> for ArtifactSchema {
    fn from(artifact: &ModelArtifact) -> Self {
        let meta = artifact.meta();
        Self {
            meta: MetaSchema {
                n_train_rows: meta.n_train_rows,
                objective: meta.objective.clone(),
                train_rmse: meta.train_rmse,
            },
            features: artifact
                .order()
                .features()
                .iter()
                .map(|spec| FeatureSchema {
                    name: spec.name.to_string(),
                    kind: spec.feature_type.into(),
                })
                .collect(),
            encodings: artifact
                .encodings()
                .columns()
                .map(|(column, encoder)| EncoderSchema {
                    column: column.to_string(),
                    categories: encoder.categories().to_vec(),
                })
                .collect(),
            forest: ForestSchema {
                base_score: artifact.forest().base_score(),
                trees: artifact.forest().trees().map(TreeSchema::from).collect(),
            },
        }
    }
}

impl From<ColumnType> for FeatureKindSchema {
    fn from(value: ColumnType) -> Self {
        match value {
            ColumnType::Categorical => Self::Categorical,
            ColumnType::Numeric => Self::Numeric,
        }
    }
}

impl From<FeatureKindSchema> for ColumnType {
    fn from(value: FeatureKindSchema) -> Self {
        match value {
            FeatureKindSchema::Categorical => Self::Categorical,
            FeatureKindSchema::Numeric => Self::Numeric,
        }
    }
}

impl From<&Tree> for TreeSchema {
    fn from(tree: &Tree) -> Self {
        Self {
            split_indices: tree.split_indices().to_vec(),
            thresholds: tree.split_thresholds().to_vec(),
            left_children: tree.left_children().to_vec(),
            right_children: tree.right_children().to_vec(),
            is_leaf: tree.leaf_flags().to_vec(),
            leaf_values: tree.leaf_values().to_vec(),
            split_types: tree.split_types().iter().map(|&t| t as u8).collect(),
            categories: CategoriesSchema {
                bitsets: tree.categories().bitsets().to_vec(),
                segments: tree.categories().segments().to_vec(),
            },
            gains: tree.gains().map(<[f32]>::to_vec),
            covers: tree.covers().map(<[f32]>::to_vec),
        }
    }
}

// ============================================================================
// Schema → runtime
// ============================================================================

impl ArtifactSchema {
    /// Rebuild and validate an artifact against the compiled feature order.
    pub fn into_artifact(self, header_features: u32) -> Result<ModelArtifact, ValidationError> {
        let order = FeatureOrder::price();

        if header_features as usize != self.features.len() {
            return Err(ValidationError::FeatureCountMismatch {
                header: header_features,
                payload: self.features.len(),
            });
        }
        let same_order = self.features.len() == order.n_features()
            && self.features.iter().zip(order.features()).all(|(stored, spec)| {
                stored.name == spec.name && ColumnType::from(stored.kind) == spec.feature_type
            });
        if !same_order {
            return Err(ValidationError::FeatureOrderMismatch);
        }

        let encodings = decode_encodings(self.encodings, order)?;

        let mut forest = Forest::new(self.forest.base_score);
        for (tree_idx, tree) in self.forest.trees.into_iter().enumerate() {
            forest.push_tree(decode_tree(tree_idx, tree)?);
        }
        forest.validate(order.n_features(), |f| order.is_categorical(f))?;

        let meta = ModelMeta::for_order(
            order,
            self.meta.n_train_rows,
            forest.n_trees(),
            self.meta.objective,
            self.meta.train_rmse,
        );
        Ok(ModelArtifact::from_parts(encodings, order, forest, meta))
    }
}

fn decode_encodings(
    stored: Vec<EncoderSchema>,
    order: FeatureOrder,
) -> Result<EncodingTable, ValidationError> {
    let mut columns = Vec::with_capacity(stored.len());
    for EncoderSchema { column, categories } in stored {
        let is_categorical_feature = order
            .features()
            .iter()
            .any(|spec| spec.name == column && spec.is_categorical());
        if !is_categorical_feature {
            return Err(ValidationError::UnexpectedEncoder { column });
        }
        match CategoryEncoder::from_categories(categories) {
            Ok(encoder) => columns.push((column, encoder)),
            Err(source) => return Err(ValidationError::Encoder { column, source }),
        }
    }

    let table = EncodingTable::from_columns(columns);
    for spec in order.features().iter().filter(|spec| spec.is_categorical()) {
        if table.encoder(spec.name).is_none() {
            return Err(ValidationError::MissingEncoder {
                column: spec.name.to_string(),
            });
        }
    }
    Ok(table)
}

fn decode_tree(tree_idx: usize, stored: TreeSchema) -> Result<Tree, ValidationError> {
    let split_types = stored
        .split_types
        .iter()
        .map(|&value| {
            SplitType::from_u8(value).ok_or(ValidationError::UnknownSplitType { tree_idx, value })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let tree = Tree::new(
        stored.split_indices,
        stored.thresholds,
        stored.left_children,
        stored.right_children,
        stored.is_leaf,
        stored.leaf_values,
        split_types,
        CategoriesStorage::new(stored.categories.bitsets, stored.categories.segments),
    );
    Ok(match (stored.gains, stored.covers) {
        (Some(gains), Some(covers)) => tree.with_stats(gains, covers),
        _ => tree,
    })
}
