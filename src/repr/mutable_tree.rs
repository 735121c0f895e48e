//! Growable tree used while training.

use super::categories::CategoriesStorage;
use super::node::SplitType;
use super::tree::Tree;
use super::NodeId;

/// Tree under construction.
///
/// Nodes are allocated as placeholders and turned into splits or leaves by
/// the grower; [`freeze`](Self::freeze) packs the result into a [`Tree`].
#[derive(Debug, Clone, Default)]
pub struct MutableTree {
    split_indices: Vec<u32>,
    split_thresholds: Vec<f32>,
    left_children: Vec<u32>,
    right_children: Vec<u32>,
    is_leaf: Vec<bool>,
    leaf_values: Vec<f32>,
    split_types: Vec<SplitType>,
    gains: Vec<f32>,
    covers: Vec<f32>,
    categorical_nodes: Vec<(NodeId, Vec<u32>)>,
}

impl MutableTree {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            split_indices: Vec::with_capacity(capacity),
            split_thresholds: Vec::with_capacity(capacity),
            left_children: Vec::with_capacity(capacity),
            right_children: Vec::with_capacity(capacity),
            is_leaf: Vec::with_capacity(capacity),
            leaf_values: Vec::with_capacity(capacity),
            split_types: Vec::with_capacity(capacity),
            gains: Vec::with_capacity(capacity),
            covers: Vec::with_capacity(capacity),
            categorical_nodes: Vec::new(),
        }
    }

    /// Reset and allocate the root. Returns the root id (always 0).
    pub fn init_root(&mut self, cover: f32) -> NodeId {
        self.reset();
        self.allocate_node(cover)
    }

    /// Turn `node` into a numeric split. Returns `(left, right)`.
    pub fn apply_numeric_split(
        &mut self,
        node: NodeId,
        feature: u32,
        threshold: f32,
        gain: f32,
        covers: (f32, f32),
    ) -> (NodeId, NodeId) {
        self.set_split(node, feature, threshold, SplitType::Numeric, gain, covers)
    }

    /// Turn `node` into a categorical split.
    ///
    /// Codes in `right_set` (packed bitset) go right. Returns `(left, right)`.
    pub fn apply_categorical_split(
        &mut self,
        node: NodeId,
        feature: u32,
        right_set: Vec<u32>,
        gain: f32,
        covers: (f32, f32),
    ) -> (NodeId, NodeId) {
        self.categorical_nodes.push((node, right_set));
        self.set_split(node, feature, 0.0, SplitType::Categorical, gain, covers)
    }

    pub fn make_leaf(&mut self, node: NodeId, value: f32) {
        let idx = node as usize;
        self.is_leaf[idx] = true;
        self.leaf_values[idx] = value;
    }

    /// Scale every leaf by `learning_rate`.
    pub fn apply_learning_rate(&mut self, learning_rate: f32) {
        for (is_leaf, value) in self.is_leaf.iter().zip(self.leaf_values.iter_mut()) {
            if *is_leaf {
                *value *= learning_rate;
            }
        }
    }

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.split_indices.len()
    }

    pub fn reset(&mut self) {
        self.split_indices.clear();
        self.split_thresholds.clear();
        self.left_children.clear();
        self.right_children.clear();
        self.is_leaf.clear();
        self.leaf_values.clear();
        self.split_types.clear();
        self.gains.clear();
        self.covers.clear();
        self.categorical_nodes.clear();
    }

    /// Finalize into immutable storage.
    pub fn freeze(self) -> Tree {
        let categories = CategoriesStorage::from_nodes(self.n_nodes(), self.categorical_nodes);
        Tree::new(
            self.split_indices,
            self.split_thresholds,
            self.left_children,
            self.right_children,
            self.is_leaf,
            self.leaf_values,
            self.split_types,
            categories,
        )
        .with_stats(self.gains, self.covers)
    }

    fn set_split(
        &mut self,
        node: NodeId,
        feature: u32,
        threshold: f32,
        split_type: SplitType,
        gain: f32,
        (left_cover, right_cover): (f32, f32),
    ) -> (NodeId, NodeId) {
        let left = self.allocate_node(left_cover);
        let right = self.allocate_node(right_cover);

        let idx = node as usize;
        self.split_indices[idx] = feature;
        self.split_thresholds[idx] = threshold;
        self.left_children[idx] = left;
        self.right_children[idx] = right;
        self.is_leaf[idx] = false;
        self.split_types[idx] = split_type;
        self.gains[idx] = gain;

        (left, right)
    }

    fn allocate_node(&mut self, cover: f32) -> NodeId {
        let id = self.split_indices.len() as NodeId;
        self.split_indices.push(0);
        self.split_thresholds.push(0.0);
        self.left_children.push(0);
        self.right_children.push(0);
        self.is_leaf.push(true);
        self.leaf_values.push(0.0);
        self.split_types.push(SplitType::Numeric);
        self.gains.push(0.0);
        self.covers.push(cover);
        id
    }
}
