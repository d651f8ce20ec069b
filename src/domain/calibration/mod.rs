//! Calibration domain - business-rule adjustments applied after inference

mod policy;

pub use policy::{
    Adjustment, AdjustmentKind, Calibration, CalibrationInput, CalibrationPolicy, CpuBonus,
    PurposeBonus, RefreshRateBonus,
};
