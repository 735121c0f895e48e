//! Additive collection of regression trees.

use thiserror::Error;

use super::node::SplitType;
use super::tree::{Tree, TreeValidationError};

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForestValidationError {
    #[error("base score is not finite")]
    NonFiniteBaseScore,

    #[error("tree {tree_idx}: {error}")]
    InvalidTree {
        tree_idx: usize,
        error: TreeValidationError,
    },

    #[error("tree {tree_idx}, node {node}: feature {feature} out of range ({n_features} features)")]
    FeatureOutOfRange {
        tree_idx: usize,
        node: u32,
        feature: u32,
        n_features: usize,
    },

    #[error("tree {tree_idx}, node {node}: categorical split on numeric feature {feature}")]
    CategoricalOnNumeric {
        tree_idx: usize,
        node: u32,
        feature: u32,
    },
}

/// Single-output forest: `prediction = base_score + Σ tree(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
    base_score: f32,
}

impl Forest {
    pub fn new(base_score: f32) -> Self {
        Self {
            trees: Vec::new(),
            base_score,
        }
    }

    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    #[inline]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    #[inline]
    pub fn tree(&self, idx: usize) -> &Tree {
        &self.trees[idx]
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    pub fn has_categorical(&self) -> bool {
        self.trees.iter().any(Tree::has_categorical)
    }

    /// Validate every tree and its feature references.
    ///
    /// `is_categorical(f)` tells whether feature `f` is categorical; a
    /// categorical split on a numeric feature is rejected.
    pub fn validate(
        &self,
        n_features: usize,
        is_categorical: impl Fn(usize) -> bool,
    ) -> Result<(), ForestValidationError> {
        if !self.base_score.is_finite() {
            return Err(ForestValidationError::NonFiniteBaseScore);
        }

        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|error| ForestValidationError::InvalidTree { tree_idx, error })?;

            for node in 0..tree.n_nodes() as u32 {
                if tree.is_leaf(node) {
                    continue;
                }
                let feature = tree.split_index(node);
                if feature as usize >= n_features {
                    return Err(ForestValidationError::FeatureOutOfRange {
                        tree_idx,
                        node,
                        feature,
                        n_features,
                    });
                }
                if tree.split_type(node) == SplitType::Categorical
                    && !is_categorical(feature as usize)
                {
                    return Err(ForestValidationError::CategoricalOnNumeric {
                        tree_idx,
                        node,
                        feature,
                    });
                }
            }
        }

        Ok(())
    }

    /// Predict a single row.
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.predict_row(features))
    }

    /// Add every tree's output for each row of `features` into `output`.
    pub fn predict_into(&self, features: ndarray::ArrayView2<'_, f32>, output: &mut [f32]) {
        for (row, out) in features.rows().into_iter().zip(output.iter_mut()) {
            *out = match row.as_slice() {
                Some(slice) => self.predict_row(slice),
                None => self.predict_row(&row.to_vec()),
            };
        }
    }
}
