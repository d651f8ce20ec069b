//! Domain layer - Core business logic and entities

pub mod calibration;
pub mod catalog;
pub mod encoder;
pub mod error;
pub mod normalization;
pub mod pipeline;
pub mod prediction;
pub mod regressor;

pub use calibration::{
    Adjustment, AdjustmentKind, Calibration, CalibrationInput, CalibrationPolicy, CpuBonus,
    PurposeBonus, RefreshRateBonus,
};
pub use catalog::{Catalog, ComparableFinder, LaptopRecord, ReferencePrice, RetrievalMode};
pub use encoder::LabelEncoder;
pub use error::DomainError;
pub use normalization::{
    LabelNormalizer, Normalization, NormalizationEntry, NormalizationSource, NormalizationTable,
};
pub use pipeline::{PredictionOptions, PricePipeline};
pub use prediction::{
    FeatureVector, PricePrediction, PredictionRequest, Purpose, DEFAULT_WEIGHT_KG, FEATURE_COUNT,
    FEATURE_NAMES, RAM_CHOICES_GB,
};
pub use regressor::Regressor;
