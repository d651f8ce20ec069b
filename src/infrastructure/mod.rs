//! Infrastructure layer - Artifact loading, model backends and runtime plumbing

pub mod artifacts;
pub mod catalog;
pub mod logging;
pub mod model;
pub mod observability;
pub mod services;
