//! Tree node types.

/// Type of split in a decision tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SplitType {
    /// Go left if `value < threshold`.
    #[default]
    Numeric = 0,
    /// Go right if the value's code is in the node's category set.
    Categorical = 1,
}

impl SplitType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SplitType::Numeric),
            1 => Some(SplitType::Categorical),
            _ => None,
        }
    }
}
