//! Immutable tree storage (structure of arrays) and traversal.

use thiserror::Error;

use super::categories::{float_to_category, CategoriesStorage};
use super::node::SplitType;
use super::NodeId;

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeValidationError {
    #[error("tree has no nodes")]
    EmptyTree,

    #[error("node arrays have inconsistent lengths")]
    LengthMismatch,

    #[error("node {node}: {side} child {child} out of bounds ({n_nodes} nodes)")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },

    #[error("node {node} references itself")]
    SelfLoop { node: NodeId },

    #[error("node {node} reached by more than one path")]
    DuplicateVisit { node: NodeId },

    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },

    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },

    #[error("node {node} has a non-finite value")]
    NonFiniteValue { node: NodeId },

    #[error("category segments do not match the node array")]
    CategoriesMismatch,
}

/// Structure-of-Arrays tree storage.
///
/// Child indices are local to this tree (0 = root).
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f32]>,
    left_children: Box<[u32]>,
    right_children: Box<[u32]>,
    is_leaf: Box<[bool]>,
    leaf_values: Box<[f32]>,
    split_types: Box<[SplitType]>,
    categories: CategoriesStorage,
    /// Split gain per node, zero for leaves.
    gains: Option<Box<[f32]>>,
    /// Hessian sum per node.
    covers: Option<Box<[f32]>>,
}

impl Tree {
    /// Create a tree from parallel arrays.
    ///
    /// Array lengths are checked by [`validate`](Self::validate), not here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f32>,
        left_children: Vec<u32>,
        right_children: Vec<u32>,
        is_leaf: Vec<bool>,
        leaf_values: Vec<f32>,
        split_types: Vec<SplitType>,
        categories: CategoriesStorage,
    ) -> Self {
        Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            is_leaf: is_leaf.into_boxed_slice(),
            leaf_values: leaf_values.into_boxed_slice(),
            split_types: split_types.into_boxed_slice(),
            categories,
            gains: None,
            covers: None,
        }
    }

    /// A tree with a single leaf.
    pub fn leaf(value: f32) -> Self {
        Self::new(
            vec![0],
            vec![0.0],
            vec![0],
            vec![0],
            vec![true],
            vec![value],
            vec![SplitType::Numeric],
            CategoriesStorage::empty(),
        )
    }

    pub fn with_stats(mut self, gains: Vec<f32>, covers: Vec<f32>) -> Self {
        self.gains = Some(gains.into_boxed_slice());
        self.covers = Some(covers.into_boxed_slice());
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.split_indices.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.is_leaf.iter().filter(|&&leaf| leaf).count()
    }

    #[inline]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.is_leaf[node as usize]
    }

    #[inline]
    pub fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    pub fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    pub fn split_type(&self, node: NodeId) -> SplitType {
        self.split_types[node as usize]
    }

    #[inline]
    pub fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    pub fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    pub fn leaf_value(&self, node: NodeId) -> f32 {
        self.leaf_values[node as usize]
    }

    #[inline]
    pub fn categories(&self) -> &CategoriesStorage {
        &self.categories
    }

    pub fn has_categorical(&self) -> bool {
        self.split_types
            .iter()
            .zip(self.is_leaf.iter())
            .any(|(&t, &leaf)| !leaf && t == SplitType::Categorical)
    }

    pub fn gains(&self) -> Option<&[f32]> {
        self.gains.as_deref()
    }

    pub fn covers(&self) -> Option<&[f32]> {
        self.covers.as_deref()
    }

    pub fn split_indices(&self) -> &[u32] {
        &self.split_indices
    }

    pub fn split_thresholds(&self) -> &[f32] {
        &self.split_thresholds
    }

    pub fn left_children(&self) -> &[u32] {
        &self.left_children
    }

    pub fn right_children(&self) -> &[u32] {
        &self.right_children
    }

    pub fn leaf_flags(&self) -> &[bool] {
        &self.is_leaf
    }

    pub fn leaf_values(&self) -> &[f32] {
        &self.leaf_values
    }

    pub fn split_types(&self) -> &[SplitType] {
        &self.split_types
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate structural invariants.
    ///
    /// Checks array lengths, child bounds, cycles, reachability, category
    /// segments and that every leaf value is finite. Feature indices are
    /// checked by [`Forest::validate`](super::Forest::validate).
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        let lengths = [
            self.split_thresholds.len(),
            self.left_children.len(),
            self.right_children.len(),
            self.is_leaf.len(),
            self.leaf_values.len(),
            self.split_types.len(),
        ];
        let stats_ok = self.gains.as_ref().map_or(true, |g| g.len() == n_nodes)
            && self.covers.as_ref().map_or(true, |c| c.len() == n_nodes);
        if lengths.iter().any(|&len| len != n_nodes) || !stats_ok {
            return Err(TreeValidationError::LengthMismatch);
        }

        if self.has_categorical()
            && (self.categories.segments().len() != n_nodes || !self.categories.segments_in_bounds())
        {
            return Err(TreeValidationError::CategoriesMismatch);
        }

        // Iterative DFS with color marking: 0 = unvisited, 1 = visiting, 2 = done.
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, bool)> = vec![(0, false)];

        while let Some((node, finished)) = stack.pop() {
            let idx = node as usize;
            if finished {
                color[idx] = 2;
                continue;
            }
            match color[idx] {
                0 => {}
                1 => return Err(TreeValidationError::CycleDetected { node }),
                _ => return Err(TreeValidationError::DuplicateVisit { node }),
            }
            color[idx] = 1;
            stack.push((node, true));

            if self.is_leaf(node) {
                if !self.leaf_value(node).is_finite() {
                    return Err(TreeValidationError::NonFiniteValue { node });
                }
                continue;
            }

            if self.split_type(node) == SplitType::Numeric && !self.split_threshold(node).is_finite()
            {
                return Err(TreeValidationError::NonFiniteValue { node });
            }

            let left = self.left_child(node);
            let right = self.right_child(node);
            if left == node || right == node {
                return Err(TreeValidationError::SelfLoop { node });
            }
            for (side, child) in [("left", left), ("right", right)] {
                if child as usize >= n_nodes {
                    return Err(TreeValidationError::ChildOutOfBounds {
                        node,
                        side,
                        child,
                        n_nodes,
                    });
                }
            }
            stack.push((right, false));
            stack.push((left, false));
        }

        if let Some(node) = color.iter().position(|&c| c == 0) {
            return Err(TreeValidationError::UnreachableNode { node: node as u32 });
        }

        Ok(())
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Walk from the root to the leaf reached by `features`.
    ///
    /// NaN values go left. For categorical nodes the value's code goes right
    /// only if it is in the node's category set.
    #[inline]
    pub fn traverse_to_leaf(&self, features: &[f32]) -> NodeId {
        let mut node: NodeId = 0;
        while !self.is_leaf(node) {
            let value = features
                .get(self.split_index(node) as usize)
                .copied()
                .unwrap_or(f32::NAN);

            let go_right = match self.split_type(node) {
                SplitType::Numeric => value >= self.split_threshold(node),
                SplitType::Categorical => float_to_category(value)
                    .is_some_and(|cat| self.categories.category_goes_right(node, cat)),
            };

            node = if go_right {
                self.right_child(node)
            } else {
                self.left_child(node)
            };
        }
        node
    }

    /// Leaf value for a single row.
    #[inline]
    pub fn predict_row(&self, features: &[f32]) -> f32 {
        self.leaf_value(self.traverse_to_leaf(features))
    }
}
