//! Canonical model representation: trees and forests.

/// Index into a tree's node arrays.
pub type NodeId = u32;

pub mod categories;
pub mod forest;
pub mod mutable_tree;
pub mod node;
pub mod tree;

pub use categories::{bitset_to_categories, categories_to_bitset, float_to_category, CategoriesStorage};
pub use forest::{Forest, ForestValidationError};
pub use mutable_tree::MutableTree;
pub use node::SplitType;
pub use tree::{Tree, TreeValidationError};
