//! Categorical normalization - maps UI choices onto labels an encoder knows

mod normalizer;
mod table;

pub use normalizer::{LabelNormalizer, Normalization, NormalizationSource};
pub use table::{NormalizationEntry, NormalizationTable};
