//! Categorical encoding.
//!
//! [`CategoryEncoder`] maps the distinct string values of one column to dense
//! integer codes; [`EncodingTable`] holds one encoder per categorical feature
//! column. Codes are assigned in order of first occurrence, and one extra
//! code per column is reserved for values never seen during fitting.

mod category;
mod table;

pub use category::{CategoryEncoder, EncodingError};
pub use table::EncodingTable;
