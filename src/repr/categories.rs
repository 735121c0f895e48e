//! Packed category sets for categorical splits.
//!
//! Each categorical node stores the set of codes that go RIGHT as a packed
//! `u32` bitset. Codes outside the set go LEFT, including codes beyond the
//! stored words (the reserved unknown code in particular).

use super::NodeId;

/// Category bitsets for every categorical node of one tree.
///
/// `segments[node] = (start, size)` indexes into the flat `bitsets` array.
/// Numeric nodes and leaves have `(0, 0)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoriesStorage {
    bitsets: Box<[u32]>,
    segments: Box<[(u32, u32)]>,
}

impl CategoriesStorage {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(bitsets: Vec<u32>, segments: Vec<(u32, u32)>) -> Self {
        Self {
            bitsets: bitsets.into_boxed_slice(),
            segments: segments.into_boxed_slice(),
        }
    }

    /// Build storage for `n_nodes` nodes from `(node, bitset)` pairs.
    pub fn from_nodes(n_nodes: usize, mut nodes: Vec<(NodeId, Vec<u32>)>) -> Self {
        if nodes.is_empty() {
            return Self::empty();
        }
        nodes.sort_by_key(|(node, _)| *node);

        let mut segments = vec![(0u32, 0u32); n_nodes];
        let mut bitsets = Vec::new();
        for (node, words) in nodes {
            if let Some(segment) = segments.get_mut(node as usize) {
                *segment = (bitsets.len() as u32, words.len() as u32);
                bitsets.extend(words);
            }
        }
        Self::new(bitsets, segments)
    }

    /// Whether `category` is in the right-going set of `node`.
    #[inline]
    pub fn category_goes_right(&self, node: NodeId, category: u32) -> bool {
        let Some(&(start, size)) = self.segments.get(node as usize) else {
            return false;
        };
        let word_idx = category >> 5;
        if word_idx >= size {
            return false;
        }
        let word = self.bitsets[(start + word_idx) as usize];
        (word >> (category & 31)) & 1 != 0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bitsets.is_empty()
    }

    #[inline]
    pub fn segments(&self) -> &[(u32, u32)] {
        &self.segments
    }

    #[inline]
    pub fn bitsets(&self) -> &[u32] {
        &self.bitsets
    }

    /// Bitset words of one node (empty for non-categorical nodes).
    pub fn bitset_for_node(&self, node: NodeId) -> &[u32] {
        match self.segments.get(node as usize) {
            Some(&(start, size)) => self
                .bitsets
                .get(start as usize..(start + size) as usize)
                .unwrap_or(&[]),
            None => &[],
        }
    }

    /// Whether every segment lies inside the bitset array.
    pub(crate) fn segments_in_bounds(&self) -> bool {
        self.segments
            .iter()
            .all(|&(start, size)| (start as usize + size as usize) <= self.bitsets.len())
    }
}

/// Convert a feature value to a category code.
///
/// Returns `None` for NaN, negative or fractional values; such values never
/// match a category set.
#[inline]
pub fn float_to_category(value: f32) -> Option<u32> {
    if value >= 0.0 && value == value.trunc() && value <= u32::MAX as f32 {
        Some(value as u32)
    } else {
        None
    }
}

/// Pack category codes into `u32` words, bit `c` set for each code `c`.
pub fn categories_to_bitset(categories: &[u32]) -> Vec<u32> {
    let Some(max_cat) = categories.iter().copied().max() else {
        return Vec::new();
    };
    let mut bitset = vec![0u32; (max_cat >> 5) as usize + 1];
    for &cat in categories {
        bitset[(cat >> 5) as usize] |= 1 << (cat & 31);
    }
    bitset
}

/// Unpack a bitset into sorted category codes.
pub fn bitset_to_categories(bitset: &[u32]) -> Vec<u32> {
    let mut categories = Vec::new();
    for (word_idx, &word) in bitset.iter().enumerate() {
        for bit in 0..32u32 {
            if (word >> bit) & 1 != 0 {
                categories.push(word_idx as u32 * 32 + bit);
            }
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitset_packing() {
        assert_eq!(categories_to_bitset(&[1, 3, 5]), vec![0b101010]);
        assert_eq!(categories_to_bitset(&[33]), vec![0, 0b10]);
        assert!(categories_to_bitset(&[]).is_empty());
        assert_eq!(bitset_to_categories(&categories_to_bitset(&[0, 7, 40])), vec![0, 7, 40]);
    }

    #[test]
    fn goes_right_only_for_members() {
        let storage = CategoriesStorage::from_nodes(3, vec![(0, categories_to_bitset(&[1, 2]))]);
        assert!(storage.category_goes_right(0, 1));
        assert!(storage.category_goes_right(0, 2));
        assert!(!storage.category_goes_right(0, 0));
        assert!(!storage.category_goes_right(0, 100));
        assert!(!storage.category_goes_right(1, 1));
        assert!(!storage.category_goes_right(9, 1));
    }

    #[test]
    fn float_conversion_rejects_non_codes() {
        assert_eq!(float_to_category(3.0), Some(3));
        assert_eq!(float_to_category(-1.0), None);
        assert_eq!(float_to_category(1.5), None);
        assert_eq!(float_to_category(f32::NAN), None);
    }
}
