//! Single-column categorical encoder.

use std::collections::HashMap;

use thiserror::Error;

/// Errors building an encoder from persisted categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("category {value:?} appears more than once")]
    DuplicateCategory { value: String },
}

/// Stable value-to-code mapping for one categorical column.
///
/// Codes are assigned by insertion order of first occurrence: the first
/// distinct value gets `0`, the next new value `1`, and so on. The code
/// `n_categories()` is reserved for unseen values.
#[derive(Clone, Debug, Default)]
pub struct CategoryEncoder {
    categories: Vec<String>,
    index: HashMap<String, u32>,
}

impl PartialEq for CategoryEncoder {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories
    }
}

impl Eq for CategoryEncoder {}

impl CategoryEncoder {
    /// Learn codes from the values of one column.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut encoder = Self::default();
        for value in values {
            if !encoder.index.contains_key(value) {
                let code = encoder.categories.len() as u32;
                encoder.index.insert(value.to_string(), code);
                encoder.categories.push(value.to_string());
            }
        }
        encoder
    }

    /// Rebuild an encoder from its categories in code order.
    pub fn from_categories(categories: Vec<String>) -> Result<Self, EncodingError> {
        let mut index = HashMap::with_capacity(categories.len());
        for (code, value) in categories.iter().enumerate() {
            if index.insert(value.clone(), code as u32).is_some() {
                return Err(EncodingError::DuplicateCategory {
                    value: value.clone(),
                });
            }
        }
        Ok(Self { categories, index })
    }

    /// Code for `value`, or [`unknown_code`](Self::unknown_code) if it was not
    /// seen during fitting.
    #[inline]
    pub fn encode(&self, value: &str) -> u32 {
        self.index
            .get(value)
            .copied()
            .unwrap_or_else(|| self.unknown_code())
    }

    /// The code reserved for unseen values.
    #[inline]
    pub fn unknown_code(&self) -> u32 {
        self.categories.len() as u32
    }

    /// Whether `value` was seen during fitting.
    #[inline]
    pub fn is_known(&self, value: &str) -> bool {
        self.index.contains_key(value)
    }

    /// Number of learned categories (excludes the unknown code).
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }

    /// Number of distinct codes, unknown code included.
    #[inline]
    pub fn n_codes(&self) -> usize {
        self.categories.len() + 1
    }

    /// Value for a learned code.
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.categories.get(code as usize).map(String::as_str)
    }

    /// Learned values in code order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}
