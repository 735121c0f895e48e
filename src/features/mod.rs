//! Feature assembly.
//!
//! A record becomes a [`FeatureVector`] by encoding its categorical fields and
//! placing them, together with the numeric fields, in the fixed
//! [`FeatureOrder`].

mod assemble;
mod order;

pub use assemble::{assemble, assemble_matrix, FeatureAssembler, FeatureVector};
pub use order::{fingerprint_of, FeatureOrder, FeatureSpec, LAYOUT_VERSION, N_FEATURES};
