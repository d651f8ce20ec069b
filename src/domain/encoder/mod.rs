//! Categorical label encoders

mod label_encoder;

pub use label_encoder::LabelEncoder;
