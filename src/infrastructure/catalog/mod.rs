//! Catalog loading - CSV listings from a local file or a remote URL

mod loader;
mod parser;

pub use loader::{load_catalog, CatalogSource};
pub use parser::parse_catalog;
