//! Model metadata.

use crate::data::ColumnType;
use crate::features::FeatureOrder;

/// Descriptive information recorded at training time.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMeta {
    /// Number of input features.
    pub n_features: usize,
    /// Feature names in vector order.
    pub feature_names: Vec<String>,
    /// Feature types in vector order.
    pub feature_types: Vec<ColumnType>,
    /// Rows seen during training.
    pub n_train_rows: u64,
    /// Trees in the forest.
    pub n_trees: usize,
    /// Training objective, e.g. `"squared_error"`.
    pub objective: String,
    /// Training RMSE of the final model.
    pub train_rmse: f64,
}

impl ModelMeta {
    /// Metadata for a model trained on `order`.
    pub fn for_order(
        order: FeatureOrder,
        n_train_rows: u64,
        n_trees: usize,
        objective: impl Into<String>,
        train_rmse: f64,
    ) -> Self {
        Self {
            n_features: order.n_features(),
            feature_names: order.names().map(String::from).collect(),
            feature_types: order.types().collect(),
            n_train_rows,
            n_trees,
            objective: objective.into(),
            train_rmse,
        }
    }

    /// Whether names and types agree with `order`.
    pub fn matches_order(&self, order: FeatureOrder) -> bool {
        self.n_features == order.n_features()
            && self.feature_names.iter().map(String::as_str).eq(order.names())
            && self.feature_types.iter().copied().eq(order.types())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_from_order() {
        let meta = ModelMeta::for_order(FeatureOrder::price(), 2, 10, "squared_error", 0.1);
        assert_eq!(meta.n_features, 5);
        assert_eq!(meta.feature_names[3], "loan_value");
        assert_eq!(meta.feature_types[0], ColumnType::Categorical);
        assert!(meta.matches_order(FeatureOrder::price()));
    }

    #[test]
    fn renamed_feature_does_not_match() {
        let mut meta = ModelMeta::for_order(FeatureOrder::price(), 2, 10, "squared_error", 0.1);
        meta.feature_names[1] = "discount".into();
        assert!(!meta.matches_order(FeatureOrder::price()));
    }
}
