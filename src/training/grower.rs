//! Depth-wise tree grower.
//!
//! Grows one regression tree from the gradients of a boosting round. All
//! nodes of one depth are expanded before any node of the next, in the order
//! they were created, so node numbering is deterministic.

use ndarray::ArrayView2;

use crate::repr::{categories_to_bitset, MutableTree, NodeId, Tree};
use crate::utils::Parallelism;

use super::gain::GainParams;
use super::gradients::Gradients;
use super::split::{GreedySplitter, NodeStats, SplitInfo, SplitKind};

/// Parameters for tree growth.
#[derive(Clone, Debug)]
pub struct GrowerParams {
    /// Regularization and child constraints.
    pub gain: GainParams,
    /// Shrinkage applied to every leaf.
    pub learning_rate: f32,
    /// Maximum depth; the root is depth 0.
    pub max_depth: u32,
    /// Max categories present at a node for one-vs-rest categorical splits.
    pub max_onehot_cats: u32,
}

impl Default for GrowerParams {
    fn default() -> Self {
        Self {
            gain: GainParams::default(),
            learning_rate: 0.3,
            max_depth: 6,
            max_onehot_cats: 4,
        }
    }
}

/// A node waiting to be split or turned into a leaf.
struct NodeCandidate {
    node: NodeId,
    rows: Vec<u32>,
    stats: NodeStats,
}

/// Tree grower for gradient boosting.
pub struct TreeGrower {
    params: GrowerParams,
    splitter: GreedySplitter,
    /// `true` for categorical features.
    feature_types: Vec<bool>,
    tree: MutableTree,
}

impl TreeGrower {
    pub fn new(params: GrowerParams, feature_types: Vec<bool>) -> Self {
        let splitter = GreedySplitter::new(params.gain.clone(), params.max_onehot_cats);
        let capacity = (1usize << params.max_depth.min(12)) * 2;
        Self {
            params,
            splitter,
            feature_types,
            tree: MutableTree::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn params(&self) -> &GrowerParams {
        &self.params
    }

    /// Grow a tree over `rows` of `features`.
    ///
    /// Leaf values are already scaled by the learning rate.
    pub fn grow(
        &mut self,
        features: ArrayView2<'_, f32>,
        gradients: &Gradients,
        rows: Vec<u32>,
        parallelism: Parallelism,
    ) -> Tree {
        let (grad_sum, hess_sum) = gradients.sum(&rows);
        let root = self.tree.init_root(hess_sum as f32);

        let mut level = vec![NodeCandidate {
            node: root,
            stats: NodeStats {
                grad_sum,
                hess_sum,
                count: rows.len() as u32,
            },
            rows,
        }];

        for depth in 0..=self.params.max_depth {
            let mut next = Vec::with_capacity(level.len() * 2);
            for candidate in level {
                let split = if depth < self.params.max_depth {
                    self.splitter.find_split(
                        features,
                        gradients,
                        &candidate.rows,
                        candidate.stats,
                        &self.feature_types,
                        parallelism,
                    )
                } else {
                    None
                };

                match split {
                    Some(split) => {
                        let (left, right) = self.apply_split(candidate.node, &split);
                        let (left_rows, right_rows) =
                            partition_rows(features, &split, candidate.rows);
                        next.push(NodeCandidate {
                            node: left,
                            rows: left_rows,
                            stats: NodeStats {
                                grad_sum: split.grad_left,
                                hess_sum: split.hess_left,
                                count: split.count_left,
                            },
                        });
                        next.push(NodeCandidate {
                            node: right,
                            rows: right_rows,
                            stats: NodeStats {
                                grad_sum: split.grad_right,
                                hess_sum: split.hess_right,
                                count: split.count_right,
                            },
                        });
                    }
                    None => {
                        let weight = self
                            .splitter
                            .compute_leaf_weight(candidate.stats.grad_sum, candidate.stats.hess_sum);
                        self.tree.make_leaf(candidate.node, weight);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            level = next;
        }

        self.tree.apply_learning_rate(self.params.learning_rate);
        let tree = std::mem::take(&mut self.tree).freeze();
        tracing::trace!(nodes = tree.n_nodes(), leaves = tree.n_leaves(), "grew tree");
        tree
    }

    fn apply_split(&mut self, node: NodeId, split: &SplitInfo) -> (NodeId, NodeId) {
        let covers = (split.hess_left as f32, split.hess_right as f32);
        let gain = split.gain as f32;
        match &split.kind {
            SplitKind::Numeric { threshold } => {
                self.tree
                    .apply_numeric_split(node, split.feature, *threshold, gain, covers)
            }
            SplitKind::Categorical { right } => self.tree.apply_categorical_split(
                node,
                split.feature,
                categories_to_bitset(right),
                gain,
                covers,
            ),
        }
    }
}

/// Split `rows` into (left, right), keeping the original order on each side.
fn partition_rows(
    features: ArrayView2<'_, f32>,
    split: &SplitInfo,
    rows: Vec<u32>,
) -> (Vec<u32>, Vec<u32>) {
    let feature = split.feature as usize;
    rows.into_iter()
        .partition(|&row| split.goes_left(features[[row as usize, feature]]))
}
