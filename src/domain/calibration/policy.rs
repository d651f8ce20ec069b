//! Heuristic price calibration
//!
//! The regression model was trained on older listings. Calibration scales its
//! output for inflation and adds flat bonuses for options the model has no
//! feature for. It never touches the model or its inputs.
//!
//! ```text
//! final = trunc(max(raw, 0) * inflation_multiplier + min(sum(bonuses), bonus_cap))
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::prediction::Purpose;
use crate::domain::DomainError;

/// Flat bonus for a premium processor choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuBonus {
    /// Raw processor choice, before normalization
    pub choice: String,
    pub bonus: f64,
}

/// Flat bonus for an intended use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurposeBonus {
    pub purpose: Purpose,
    pub bonus: f64,
}

/// Bonus per full refresh-rate step above a baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRateBonus {
    pub baseline_hz: u32,
    pub step_hz: u32,
    pub bonus_per_step: f64,
}

impl Default for RefreshRateBonus {
    fn default() -> Self {
        Self {
            baseline_hz: 60,
            step_hz: 60,
            bonus_per_step: 5000.0,
        }
    }
}

impl RefreshRateBonus {
    /// Bonus earned by a display refresh rate
    pub fn bonus_for(&self, hz: u32) -> f64 {
        if self.step_hz == 0 || hz <= self.baseline_hz {
            return 0.0;
        }

        let steps = (hz - self.baseline_hz) / self.step_hz;
        f64::from(steps) * self.bonus_per_step
    }
}

/// Kind of a single price adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Inflation,
    PremiumCpu,
    RefreshRate,
    Purpose,
    BonusCap,
}

/// One applied adjustment, in currency units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub amount: f64,
    pub description: String,
}

impl Adjustment {
    fn new(kind: AdjustmentKind, amount: f64, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
        }
    }
}

/// Options calibration reads from a request
#[derive(Debug, Clone, Copy)]
pub struct CalibrationInput<'a> {
    pub cpu_choice: &'a str,
    pub refresh_rate_hz: Option<u32>,
    pub purpose: Option<Purpose>,
}

/// Calibrated price and the adjustments that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calibration {
    pub price: u64,
    pub adjustments: Vec<Adjustment>,
}

/// Calibration rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPolicy {
    #[serde(default = "default_inflation_multiplier")]
    pub inflation_multiplier: f64,

    #[serde(default = "default_premium_cpu_bonus")]
    pub premium_cpu_bonus: Vec<CpuBonus>,

    #[serde(default = "default_refresh_rate")]
    pub refresh_rate: Option<RefreshRateBonus>,

    #[serde(default = "default_purpose_bonus")]
    pub purpose_bonus: Vec<PurposeBonus>,

    /// Upper bound on the sum of flat bonuses; `None` leaves them uncapped
    #[serde(default = "default_bonus_cap")]
    pub bonus_cap: Option<f64>,
}

fn default_inflation_multiplier() -> f64 {
    1.02
}

fn default_premium_cpu_bonus() -> Vec<CpuBonus> {
    vec![
        CpuBonus {
            choice: "Intel Core i9".to_string(),
            bonus: 45000.0,
        },
        CpuBonus {
            choice: "AMD Ryzen 9".to_string(),
            bonus: 35000.0,
        },
    ]
}

fn default_refresh_rate() -> Option<RefreshRateBonus> {
    Some(RefreshRateBonus::default())
}

fn default_purpose_bonus() -> Vec<PurposeBonus> {
    vec![
        PurposeBonus {
            purpose: Purpose::Gaming,
            bonus: 15000.0,
        },
        PurposeBonus {
            purpose: Purpose::Editing,
            bonus: 10000.0,
        },
    ]
}

fn default_bonus_cap() -> Option<f64> {
    Some(60000.0)
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self {
            inflation_multiplier: default_inflation_multiplier(),
            premium_cpu_bonus: default_premium_cpu_bonus(),
            refresh_rate: default_refresh_rate(),
            purpose_bonus: default_purpose_bonus(),
            bonus_cap: default_bonus_cap(),
        }
    }
}

impl CalibrationPolicy {
    /// Inflation only, no bonuses
    pub fn inflation_only(multiplier: f64) -> Self {
        Self {
            inflation_multiplier: multiplier,
            premium_cpu_bonus: Vec::new(),
            refresh_rate: None,
            purpose_bonus: Vec::new(),
            bonus_cap: None,
        }
    }

    pub fn with_bonus_cap(mut self, cap: Option<f64>) -> Self {
        self.bonus_cap = cap;
        self
    }

    /// Reject rules that could produce a negative or non-finite price
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.inflation_multiplier.is_finite() || self.inflation_multiplier <= 0.0 {
            return Err(DomainError::configuration(format!(
                "calibration inflation_multiplier must be positive, got {}",
                self.inflation_multiplier
            )));
        }

        let bonuses = self
            .premium_cpu_bonus
            .iter()
            .map(|b| b.bonus)
            .chain(self.purpose_bonus.iter().map(|b| b.bonus))
            .chain(self.refresh_rate.iter().map(|r| r.bonus_per_step))
            .chain(self.bonus_cap);

        for bonus in bonuses {
            if !bonus.is_finite() || bonus < 0.0 {
                return Err(DomainError::configuration(format!(
                    "calibration bonuses and cap must be non-negative, got {}",
                    bonus
                )));
            }
        }

        Ok(())
    }

    /// Apply every rule to a raw model output
    pub fn calibrate(&self, raw_price: f64, input: &CalibrationInput<'_>) -> Calibration {
        let base = raw_price.max(0.0);
        let inflated = base * self.inflation_multiplier;
        let mut adjustments = Vec::new();

        if inflated != base {
            adjustments.push(Adjustment::new(
                AdjustmentKind::Inflation,
                inflated - base,
                format!("x{} market inflation", self.inflation_multiplier),
            ));
        }

        if let Some(rule) = self
            .premium_cpu_bonus
            .iter()
            .find(|rule| rule.choice == input.cpu_choice)
        {
            adjustments.push(Adjustment::new(
                AdjustmentKind::PremiumCpu,
                rule.bonus,
                format!("premium processor: {}", rule.choice),
            ));
        }

        if let (Some(rule), Some(hz)) = (&self.refresh_rate, input.refresh_rate_hz) {
            let bonus = rule.bonus_for(hz);
            if bonus > 0.0 {
                adjustments.push(Adjustment::new(
                    AdjustmentKind::RefreshRate,
                    bonus,
                    format!("{}Hz display over {}Hz baseline", hz, rule.baseline_hz),
                ));
            }
        }

        if let Some(purpose) = input.purpose {
            if let Some(rule) = self.purpose_bonus.iter().find(|rule| rule.purpose == purpose) {
                adjustments.push(Adjustment::new(
                    AdjustmentKind::Purpose,
                    rule.bonus,
                    format!("{} workload", purpose),
                ));
            }
        }

        let bonus_total: f64 = adjustments
            .iter()
            .filter(|a| a.kind != AdjustmentKind::Inflation)
            .map(|a| a.amount)
            .sum();

        if let Some(cap) = self.bonus_cap {
            if bonus_total > cap {
                adjustments.push(Adjustment::new(
                    AdjustmentKind::BonusCap,
                    cap - bonus_total,
                    format!("bonuses capped at {}", cap),
                ));
            }
        }

        let total: f64 = inflated + adjustments
            .iter()
            .filter(|a| a.kind != AdjustmentKind::Inflation)
            .map(|a| a.amount)
            .sum::<f64>();

        Calibration {
            price: total.max(0.0).trunc() as u64,
            adjustments,
        }
    }
}
