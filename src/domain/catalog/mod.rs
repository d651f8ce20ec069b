//! Catalog domain - static table of historical laptop listings

mod entity;
mod retrieval;

pub use entity::{Catalog, LaptopRecord};
pub use retrieval::{ComparableFinder, ReferencePrice, RetrievalMode};
