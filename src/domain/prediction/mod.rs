//! Prediction domain - request, feature vector and result types

mod features;
mod request;
mod result;

pub use features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use request::{PredictionRequest, Purpose, DEFAULT_WEIGHT_KG, RAM_CHOICES_GB};
pub use result::PricePrediction;
