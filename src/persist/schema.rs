//! Serialized form of a [`ModelArtifact`](crate::model::ModelArtifact).
//!
//! These types mirror the runtime types but are owned by the file format, so
//! runtime types can change without silently changing the bytes on disk.

use serde::{Deserialize, Serialize};

/// Whole payload that follows the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSchema {
    pub meta: MetaSchema,
    pub features: Vec<FeatureSchema>,
    pub encodings: Vec<EncoderSchema>,
    pub forest: ForestSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaSchema {
    pub n_train_rows: u64,
    pub objective: String,
    pub train_rmse: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKindSchema {
    Categorical,
    Numeric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub name: String,
    pub kind: FeatureKindSchema,
}

/// Categories of one column; the position of a value is its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderSchema {
    pub column: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSchema {
    pub base_score: f32,
    pub trees: Vec<TreeSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSchema {
    pub split_indices: Vec<u32>,
    pub thresholds: Vec<f32>,
    pub left_children: Vec<u32>,
    pub right_children: Vec<u32>,
    pub is_leaf: Vec<bool>,
    pub leaf_values: Vec<f32>,
    /// 0 = numeric, 1 = categorical.
    pub split_types: Vec<u8>,
    pub categories: CategoriesSchema,
    pub gains: Option<Vec<f32>>,
    pub covers: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesSchema {
    pub bitsets: Vec<u32>,
    pub segments: Vec<(u32, u32)>,
}
